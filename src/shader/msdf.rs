use super::{
    GlslSource, ShaderDescriptor, ShaderOptions, Uniform, base_uniforms, textured_vertex_shader,
};

/// Shader for multi-channel signed distance field atlases.
///
/// The distance is the median of the RGB channels. `negate` inverts the
/// sample first, which is what most MSDF generators expect; pass `true` unless
/// the atlas was generated inverted.
pub fn msdf_shader<T>(
    options: &ShaderOptions,
    map: Option<T>,
    negate: bool,
) -> ShaderDescriptor<T> {
    let mut uniforms = base_uniforms(options);
    uniforms.insert("map".to_string(), Uniform::Texture(map));

    let sample = if negate {
        "  vec3 texSample = 1.0 - texture2D(map, vUv).rgb;"
    } else {
        "  vec3 texSample = texture2D(map, vUv).rgb;"
    };

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
            "float median(float r, float g, float b) {",
            "  return max(min(r, g), min(max(r, g), b));",
            "}",
            "void main() {",
            sample,
            "  float sigDist = median(texSample.r, texSample.g, texSample.b) - 0.5;",
            "  float alpha = clamp(sigDist / fwidth(sigDist) + 0.5, 0.0, 1.0);",
            "  gl_FragColor = vec4(color.xyz, alpha * opacity);",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate() {
        let shader = msdf_shader::<u32>(&ShaderOptions::default(), None, true);
        assert!(shader.fragment_shader.contains("1.0 - texture2D(map, vUv).rgb"));
        assert!(shader.fragment_shader.contains("median(texSample.r"));

        let shader = msdf_shader::<u32>(&ShaderOptions::default(), None, false);
        assert!(!shader.fragment_shader.contains("1.0 - texture2D"));
    }

    #[test]
    fn test_uniforms_match_basic() {
        let msdf = msdf_shader(&ShaderOptions::default(), Some(3u32), true);
        let basic = crate::shader::basic_shader(&ShaderOptions::default(), Some(3u32));
        assert_eq!(msdf.uniforms, basic.uniforms);
        assert_eq!(msdf.vertex_shader, basic.vertex_shader);
    }

    #[test]
    fn test_alpha_test_rule() {
        let options = ShaderOptions {
            alpha_test: 0.35,
            ..Default::default()
        };
        let shader = msdf_shader::<u32>(&options, None, true);
        assert!(
            shader
                .fragment_shader
                .contains("if (gl_FragColor.a < 0.35) discard;")
        );
    }
}
