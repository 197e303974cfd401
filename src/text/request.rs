use crate::font::BitmapFont;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Horizontal justification applied by the layout engine to each line.
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Wrapping rules the layout engine should follow.
pub enum WrapStyle {
    /// Break at word boundaries when a width is given.
    #[default]
    WordWrap,
    /// Keep whitespace and only break on explicit newlines.
    Pre,
    /// Never break lines.
    NoWrap,
}

/// Everything a [`TextLayouter`](super::TextLayouter) needs for one layout pass.
///
/// Built by [`TextGeometry::update`](crate::TextGeometry::update) from the
/// merged options, so all defaults are already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRequest<'a> {
    pub text: &'a str,
    pub font: &'a BitmapFont,
    /// Maximum line width in pixels, `None` for unbounded.
    pub width: Option<f32>,
    pub align: HorizontalAlign,
    pub letter_spacing: f32,
    /// Line advance in pixels. Falls back to the font's `line_height`.
    pub line_height: f32,
    pub tab_size: u32,
    pub wrap_style: WrapStyle,
}
