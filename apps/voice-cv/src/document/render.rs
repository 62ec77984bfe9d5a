//! Render collaborator interface and the driver that walks a DocumentModel.
//!
//! The `Renderer` trait is the full capability set an output format must offer.
//! `render_document` is format-agnostic: header, sections via the style
//! strategy, then the contact block with its optional QR code.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::document::assembler::CONTACT_TITLE;
use crate::document::qr::{QrEncoder, QrImage};
use crate::models::{BlockBody, DocumentModel, Record, SectionItem};

pub const BULLET_MARKER: &str = "- ";

const DEFAULT_NAME: &str = "Your Name";
const DEFAULT_TAG: &str = "Your Tagline";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("Document was never started")]
    NotStarted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Capability set
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const LINK_BLUE: Rgb = Rgb(0, 0, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Regular,
    Bold,
    Italic,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size_pt: u8,
    pub emphasis: Emphasis,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(size_pt: u8, emphasis: Emphasis) -> Self {
        Self {
            size_pt,
            emphasis,
            color: Rgb::BLACK,
        }
    }

    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

pub const BODY: TextStyle = TextStyle::new(11, Emphasis::Regular);
pub const BLOCK_HEADING: TextStyle = TextStyle::new(12, Emphasis::Bold);
pub const BLOCK_SUBHEADING: TextStyle = TextStyle::new(11, Emphasis::Italic);
pub const LINK: TextStyle = TextStyle::new(11, Emphasis::Underline).with_color(Rgb::LINK_BLUE);
const HEADER_NAME: TextStyle = TextStyle::new(16, Emphasis::Bold);
const HEADER_TAG: TextStyle = TextStyle::new(10, Emphasis::Italic);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Where an image goes relative to the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePlacement {
    pub x_mm: u32,
    pub y_offset_mm: u32,
    pub width_mm: u32,
}

const QR_PLACEMENT: ImagePlacement = ImagePlacement {
    x_mm: 160,
    y_offset_mm: 10,
    width_mm: 30,
};

pub trait Renderer {
    fn start_document(&mut self);
    fn set_style(&mut self, style: TextStyle);
    /// Single line; `fill` paints the cell background.
    fn cell(&mut self, text: &str, align: Align, fill: Option<Rgb>);
    /// Wrapped multi-line block.
    fn multi_cell(&mut self, text: &str);
    fn separator(&mut self);
    fn image(&mut self, image: &QrImage, placement: ImagePlacement);
    fn link_cell(&mut self, text: &str, url: &str);
    fn save(&mut self, path: &Path) -> Result<(), RenderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Name and tag line printed above the sections. Sourced from the "current"
/// pointer snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub tag: String,
}

impl Header {
    pub fn from_record(record: Option<&Record>) -> Self {
        let pick = |field: &str, default: &str| {
            record
                .and_then(|r| r.provided_text(field))
                .unwrap_or(default)
                .to_string()
        };
        Self {
            name: pick("name", DEFAULT_NAME),
            tag: pick("tag", DEFAULT_TAG),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Driver
// ────────────────────────────────────────────────────────────────────────────

pub fn render_document(
    model: &DocumentModel,
    header: &Header,
    renderer: &mut dyn Renderer,
    qr: &dyn QrEncoder,
) -> Result<(), RenderError> {
    renderer.start_document();

    renderer.set_style(HEADER_NAME);
    renderer.cell(&header.name, Align::Center, None);
    renderer.set_style(HEADER_TAG);
    renderer.cell(&header.tag, Align::Center, None);
    renderer.separator();

    let style = model.style.strategy();
    for section in &model.sections {
        style.render_section(renderer, section);
    }

    style.render_title(renderer, CONTACT_TITLE);
    for entry in &model.contact {
        renderer.set_style(LINK);
        renderer.link_cell(&format!("{}: {}", entry.label, entry.url), &entry.url);
        if entry.qr {
            let image = qr.encode(&entry.url)?;
            renderer.image(&image, QR_PLACEMENT);
        }
    }
    renderer.set_style(BODY);

    debug!(
        "Rendered {} sections and {} contact entries",
        model.sections.len(),
        model.contact.len()
    );
    Ok(())
}

/// Section body shared by every style.
pub fn render_items(renderer: &mut dyn Renderer, items: &[SectionItem]) {
    for item in items {
        match item {
            SectionItem::Bullet(text) => {
                renderer.set_style(BODY);
                renderer.multi_cell(&format!("{BULLET_MARKER}{text}"));
            }
            SectionItem::Block(block) => {
                renderer.set_style(BLOCK_HEADING);
                renderer.cell(&block.heading, Align::Left, None);
                if let Some(subheading) = &block.subheading {
                    renderer.set_style(BLOCK_SUBHEADING);
                    renderer.cell(subheading, Align::Left, None);
                }
                renderer.set_style(BODY);
                match &block.body {
                    BlockBody::Bullets(bullets) => {
                        for bullet in bullets {
                            renderer.multi_cell(&format!("{BULLET_MARKER}{bullet}"));
                        }
                    }
                    BlockBody::Paragraph(text) => renderer.multi_cell(text),
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test support
// ────────────────────────────────────────────────────────────────────────────
