//! Section title styles. A style decorates titles only; section bodies are
//! drawn the same way for every variant.

use crate::document::render::{render_items, Align, Emphasis, Renderer, Rgb, TextStyle};
use crate::models::{Section, StyleVariant};

const BASIC_TITLE: TextStyle = TextStyle::new(13, Emphasis::Bold);

const HIGHLIGHT_INK: Rgb = Rgb(0, 0, 120);
const HIGHLIGHT_FILL: Rgb = Rgb(220, 240, 255);
const HIGHLIGHT_TITLE: TextStyle = TextStyle::new(13, Emphasis::Bold).with_color(HIGHLIGHT_INK);

pub trait SectionStyle: Sync {
    fn render_title(&self, renderer: &mut dyn Renderer, title: &str);

    fn render_section(&self, renderer: &mut dyn Renderer, section: &Section) {
        self.render_title(renderer, &section.title);
        render_items(renderer, &section.items);
    }
}

pub struct BasicStyle;

impl SectionStyle for BasicStyle {
    fn render_title(&self, renderer: &mut dyn Renderer, title: &str) {
        renderer.set_style(BASIC_TITLE);
        renderer.cell(title, Align::Left, None);
        renderer.separator();
    }
}

/// Colored title on a filled band. Ink is reset afterwards so the body stays black.
pub struct HighlightStyle;

impl SectionStyle for HighlightStyle {
    fn render_title(&self, renderer: &mut dyn Renderer, title: &str) {
        renderer.set_style(HIGHLIGHT_TITLE);
        renderer.cell(title, Align::Left, Some(HIGHLIGHT_FILL));
        renderer.set_style(BASIC_TITLE);
        renderer.separator();
    }
}

impl StyleVariant {
    pub fn strategy(self) -> &'static dyn SectionStyle {
        match self {
            StyleVariant::Basic => &BasicStyle,
            StyleVariant::Highlight => &HighlightStyle,
        }
    }
}
