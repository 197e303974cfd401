use std::sync::Arc;

use crate::font::BitmapFont;
use crate::text::{HorizontalAlign, WrapStyle};

/// Text geometry configuration.
///
/// Every field is optional. Options given at construction act as defaults and
/// each [`TextGeometry::update`](crate::TextGeometry::update) call merges its
/// own options over them with [`Self::merged_over`].
///
/// | field            | default                       |
/// |------------------|-------------------------------|
/// | `text`           | `""`                          |
/// | `font`           | none, required                |
/// | `width`          | unbounded                     |
/// | `align`          | [`HorizontalAlign::Left`]     |
/// | `letter_spacing` | `0.0`                         |
/// | `line_height`    | the font's `line_height`      |
/// | `tab_size`       | `4`                           |
/// | `wrap_style`     | [`WrapStyle::WordWrap`]       |
/// | `flip_y`         | `true`                        |
/// | `multipage`      | `false`                       |
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextGeometryOptions {
    pub text: Option<String>,
    pub font: Option<Arc<BitmapFont>>,
    pub width: Option<f32>,
    pub align: Option<HorizontalAlign>,
    pub letter_spacing: Option<f32>,
    pub line_height: Option<f32>,
    pub tab_size: Option<u32>,
    pub wrap_style: Option<WrapStyle>,
    /// Flip the V texture coordinate for atlases with a bottom-left origin.
    pub flip_y: Option<bool>,
    /// Emit the per-vertex page buffer for multi-texture fonts.
    pub multipage: Option<bool>,
}

pub const DEFAULT_TAB_SIZE: u32 = 4;

impl TextGeometryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn font(mut self, font: impl Into<Arc<BitmapFont>>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = Some(letter_spacing);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    pub fn wrap_style(mut self, wrap_style: WrapStyle) -> Self {
        self.wrap_style = Some(wrap_style);
        self
    }

    pub fn flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = Some(flip_y);
        self
    }

    pub fn multipage(mut self, multipage: bool) -> Self {
        self.multipage = Some(multipage);
        self
    }

    /// Shallow merge: fields set on `self` win, the rest come from `base`.
    pub fn merged_over(&self, base: &TextGeometryOptions) -> TextGeometryOptions {
        TextGeometryOptions {
            text: self.text.clone().or_else(|| base.text.clone()),
            font: self.font.clone().or_else(|| base.font.clone()),
            width: self.width.or(base.width),
            align: self.align.or(base.align),
            letter_spacing: self.letter_spacing.or(base.letter_spacing),
            line_height: self.line_height.or(base.line_height),
            tab_size: self.tab_size.or(base.tab_size),
            wrap_style: self.wrap_style.or(base.wrap_style),
            flip_y: self.flip_y.or(base.flip_y),
            multipage: self.multipage.or(base.multipage),
        }
    }

    pub fn flip_y_or_default(&self) -> bool {
        self.flip_y.unwrap_or(true)
    }

    pub fn multipage_or_default(&self) -> bool {
        self.multipage.unwrap_or(false)
    }
}

/// String shorthand: only the text is set.
impl From<&str> for TextGeometryOptions {
    fn from(text: &str) -> Self {
        Self::new().text(text)
    }
}

impl From<String> for TextGeometryOptions {
    fn from(text: String) -> Self {
        Self::new().text(text)
    }
}
