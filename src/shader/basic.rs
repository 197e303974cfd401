use super::{
    GlslSource, ShaderDescriptor, ShaderOptions, Uniform, base_uniforms, textured_vertex_shader,
};

/// Shader for single-page fonts: samples `map` and tints it with
/// `vec4(color, opacity)`.
pub fn basic_shader<T>(options: &ShaderOptions, map: Option<T>) -> ShaderDescriptor<T> {
    let mut uniforms = base_uniforms(options);
    uniforms.insert("map".to_string(), Uniform::Texture(map));

    let fragment_shader = GlslSource::new()
        .precision(options.precision)
        .lines([
            "uniform float opacity;",
            "uniform vec3 color;",
            "uniform sampler2D map;",
            "varying vec2 vUv;",
            "void main() {",
            "  gl_FragColor = texture2D(map, vUv) * vec4(color, opacity);",
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
