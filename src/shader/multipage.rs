use super::{
    AttributeDeclaration, AttributeKind, GlslSource, ShaderDescriptor, ShaderOptions, Uniform,
    base_uniforms,
};

/// Shader for fonts spread over several atlas pages.
///
/// Texture `i` is bound to `uniform sampler2D texture<i>`. The fragment stage
/// compares the interpolated `page` attribute against each index in order and
/// starts from `vec4(0.0)`, so a page without a texture renders transparent.
///
/// `legacy_attributes` additionally describes the `page` attribute in
/// [`ShaderDescriptor::attributes`] for hosts that need attributes declared up
/// front.
pub fn multipage_shader<T>(
    options: &ShaderOptions,
    textures: impl IntoIterator<Item = T>,
    legacy_attributes: bool,
) -> ShaderDescriptor<T> {
    let mut uniforms = base_uniforms(options);
    let mut page_count = 0;
    for (i, texture) in textures.into_iter().enumerate() {
        uniforms.insert(format!("texture{i}"), Uniform::Texture(Some(texture)));
        page_count += 1;
    }

    let vertex_shader = GlslSource::new()
        .lines([
            "attribute vec4 position;",
            "attribute vec2 uv;",
            "attribute float page;",
            "uniform mat4 projectionMatrix;",
            "uniform mat4 modelViewMatrix;",
            "varying vec2 vUv;",
            "varying float vPage;",
            "void main() {",
            "  vUv = uv;",
            "  vPage = page;",
            "  gl_Position = projectionMatrix * modelViewMatrix * position;",
            "}",
        ])
        .finish();

    let fragment_shader = GlslSource::new()
        .precision(options.precision)
        .lines(["uniform float opacity;", "uniform vec3 color;"])
        .lines((0..page_count).map(|i| format!("uniform sampler2D texture{i};")))
        .lines([
            "varying float vPage;",
            "varying vec2 vUv;",
            "void main() {",
            "  vec4 sampleColor = vec4(0.0);",
        ])
        .lines((0..page_count).flat_map(page_branch))
        .line("  gl_FragColor = sampleColor * vec4(color, opacity);")
        .alpha_test(options.alpha_test)
        .line("}")
        .finish();

    let attributes = legacy_attributes.then(|| {
        vec![AttributeDeclaration {
            name: "page",
            kind: AttributeKind::Float,
            default: 0.0,
        }]
    });

    ShaderDescriptor {
        vertex_shader,
        fragment_shader,
        uniforms,
        attributes,
    }
}

fn page_branch(page: usize) -> [String; 3] {
    let cond = if page == 0 { "if" } else { "else if" };
    [
        format!("  {cond} (vPage == {page}.0) {{"),
        format!("    sampleColor = texture2D(texture{page}, vUv);"),
        "  }".to_string(),
    ]
}
