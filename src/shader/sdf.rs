use super::{
    GlslSource, ShaderDescriptor, ShaderOptions, Uniform, base_uniforms, textured_vertex_shader,
};

/// Shader for single-channel signed distance field atlases.
///
/// The edge sits at 0.5 in the alpha channel and is smoothed over one
/// screen pixel, using `GL_OES_standard_derivatives` when the driver has it.
pub fn sdf_shader<T>(options: &ShaderOptions, map: Option<T>) -> ShaderDescriptor<T> {
    let mut uniforms = base_uniforms(options);
    uniforms.insert("map".to_string(), Uniform::Texture(map));

    let fragment_shader = GlslSource::new()
        .lines([
            "#ifdef GL_OES_standard_derivatives",
            "#extension GL_OES_standard_derivatives : enable",
            "#endif",
        ])
        .precision(options.precision)
        .lines([
            "uniform float opacity;",
            "uniform vec3 color;",
            "uniform sampler2D map;",
            "varying vec2 vUv;",
            "float aastep(float value) {",
            "  #ifdef GL_OES_standard_derivatives",
            "    float afwidth = length(vec2(dFdx(value), dFdy(value))) * 0.70710678118654757;",
            "  #else",
            "    float afwidth = (1.0 / 32.0) * (1.4142135623730951 / (2.0 * gl_FragCoord.w));",
            "  #endif",
            "  return smoothstep(0.5 - afwidth, 0.5 + afwidth, value);",
            "}",
            "void main() {",
            "  vec4 texColor = texture2D(map, vUv);",
            "  float alpha = aastep(texColor.a);",
            "  gl_FragColor = vec4(color, opacity * alpha);",
        ])
        .alpha_test(options.alpha_test)
        .line("}")
        .finish();

    ShaderDescriptor {
        vertex_shader: textured_vertex_shader(),
        fragment_shader,
        uniforms,
        attributes: None,
    }
}
