//! GLSL source generation for bitmap font materials.
//!
//! Every generator is a pure function of its options. The output pairs a
//! vertex and a fragment shader with the uniforms they declare; binding them to
//! a pipeline is up to the caller.

/// Single texture sampling.
pub mod basic;
/// Multi-channel signed distance field atlases.
pub mod msdf;
/// One sampler per atlas page, picked per vertex.
pub mod multipage;
/// Single-channel signed distance field atlases.
pub mod sdf;

use std::collections::HashMap;

use palette::Srgb;

pub use basic::basic_shader;
pub use msdf::msdf_shader;
pub use multipage::multipage_shader;
pub use sdf::sdf_shader;

pub const DEFAULT_OPACITY: f32 = 1.0;
pub const DEFAULT_ALPHA_TEST: f32 = 0.0001;

/// Float precision qualifier of the fragment stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    Low,
    Medium,
    #[default]
    High,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Low => "lowp",
            Precision::Medium => "mediump",
            Precision::High => "highp",
        }
    }
}

/// Options shared by all shader variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderOptions {
    pub opacity: f32,
    /// Fragments with alpha below this are discarded. `0` (or less) disables
    /// the test, and so does a NaN or infinite value.
    pub alpha_test: f32,
    pub precision: Precision,
    /// Tint multiplied into every sample.
    pub color: Srgb<f32>,
}

impl Default for ShaderOptions {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            alpha_test: DEFAULT_ALPHA_TEST,
            precision: Precision::High,
            color: Srgb::new(1.0, 1.0, 1.0),
        }
    }
}

/// Value bound to a named uniform. `T` is the caller's texture handle.
#[derive(Clone, Debug, PartialEq)]
pub enum Uniform<T> {
    Float(f32),
    Color(Srgb<f32>),
    /// `None` leaves the sampler for the caller to bind later.
    Texture(Option<T>),
}

pub type Uniforms<T> = HashMap<String, Uniform<T>, fxhash::FxBuildHasher>;

/// Per-vertex attribute declaration for hosts that bind attributes by
/// description instead of by shader reflection.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDeclaration {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub default: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Float,
}

/// Generated vertex/fragment pair plus the uniforms it expects.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderDescriptor<T> {
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub uniforms: Uniforms<T>,
    /// Only set by [`multipage_shader`] in legacy attribute mode.
    pub attributes: Option<Vec<AttributeDeclaration>>,
}

impl<T> ShaderDescriptor<T> {
    pub fn uniform(&self, name: &str) -> Option<&Uniform<T>> {
        self.uniforms.get(name)
    }
}

/// Uniforms every variant declares.
fn base_uniforms<T>(options: &ShaderOptions) -> Uniforms<T> {
    let mut uniforms = Uniforms::default();
    uniforms.insert("opacity".to_string(), Uniform::Float(options.opacity));
    uniforms.insert("color".to_string(), Uniform::Color(options.color));
    uniforms
}

/// Formats `value` as a GLSL float literal. GLSL ES 1.0 has no implicit
/// int-to-float conversion, so the literal always carries a decimal point.
pub(crate) fn glsl_float(value: f32) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E', 'N', 'i']) {
        text
    } else {
        format!("{text}.0")
    }
}

/// Line-oriented GLSL writer.
#[derive(Default)]
pub(crate) struct GlslSource {
    lines: Vec<String>,
}

impl GlslSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn precision(&mut self, precision: Precision) -> &mut Self {
        self.line(format!("precision {} float;", precision.as_str()))
    }

    /// Emits the discard guard when `alpha_test` is positive and finite.
    pub fn alpha_test(&mut self, alpha_test: f32) -> &mut Self {
        if !alpha_test.is_finite() {
            log::warn!(
                "Ignoring non-finite alpha test ({}); no discard is emitted.",
                alpha_test
            );
            return self;
        }
        if alpha_test > 0.0 {
            self.line(format!(
                "  if (gl_FragColor.a < {}) discard;",
                glsl_float(alpha_test)
            ));
        }
        self
    }

    pub fn finish(&self) -> String {
        self.lines.join("\n")
    }
}

/// Vertex stage shared by the single texture variants: projects `position`
/// and forwards `uv`.
pub(crate) fn textured_vertex_shader() -> String {
    GlslSource::new()
        .lines([
            "attribute vec2 uv;",
            "attribute vec4 position;",
            "uniform mat4 projectionMatrix;",
            "uniform mat4 modelViewMatrix;",
            "varying vec2 vUv;",
            "void main() {",
            "  vUv = uv;",
            "  gl_Position = projectionMatrix * modelViewMatrix * position;",
            "}",
        ])
        .finish()
}
