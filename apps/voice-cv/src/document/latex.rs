//! LaTeX source renderer.
//!
//! Accumulates a body of LaTeX commands while the driver walks the model and
//! writes a standalone `.tex` file on `save`. QR markup is embedded as-is.

use std::path::Path;

use tracing::info;

use crate::document::qr::QrImage;
use crate::document::render::{
    Align, Emphasis, ImagePlacement, RenderError, Renderer, Rgb, TextStyle,
};

const PREAMBLE: &str = r"\documentclass[11pt]{article}
\usepackage[a4paper,margin=15mm]{geometry}
\usepackage[T1]{fontenc}
\usepackage[table]{xcolor}
\usepackage{graphicx}
\usepackage{qrcode}
\usepackage{hyperref}
\setlength{\parindent}{0pt}
\pagestyle{empty}
";

#[derive(Debug, Default)]
pub struct LatexRenderer {
    body: Option<String>,
    style: Option<TextStyle>,
}

impl LatexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full document source, or None before `start_document`.
    pub fn source(&self) -> Option<String> {
        self.body.as_ref().map(|body| {
            format!("{PREAMBLE}\\begin{{document}}\n{body}\\end{{document}}\n")
        })
    }

    fn push(&mut self, line: &str) {
        if let Some(body) = self.body.as_mut() {
            body.push_str(line);
            body.push('\n');
        }
    }

    fn styled(&self, text: &str) -> String {
        let escaped = escape(text);
        let Some(style) = self.style else {
            return escaped;
        };
        let inner = match style.emphasis {
            Emphasis::Regular => escaped,
            Emphasis::Bold => format!("\\textbf{{{escaped}}}"),
            Emphasis::Italic => format!("\\textit{{{escaped}}}"),
            Emphasis::Underline => format!("\\underline{{{escaped}}}"),
        };
        let sized = format!(
            "{{\\fontsize{{{0}}}{{{1}}}\\selectfont {inner}}}",
            style.size_pt,
            style.size_pt + 2
        );
        if style.color == Rgb::BLACK {
            sized
        } else {
            format!("\\textcolor[RGB]{{{}}}{{{sized}}}", rgb(style.color))
        }
    }
}

impl Renderer for LatexRenderer {
    fn start_document(&mut self) {
        self.body = Some(String::new());
        self.style = None;
    }

    fn set_style(&mut self, style: TextStyle) {
        self.style = Some(style);
    }

    fn cell(&mut self, text: &str, align: Align, fill: Option<Rgb>) {
        let mut content = self.styled(text);
        if let Some(fill) = fill {
            content = format!(
                "\\colorbox[RGB]{{{}}}{{\\parbox{{\\dimexpr\\linewidth-2\\fboxsep}}{{{content}}}}}",
                rgb(fill)
            );
        }
        let line = match align {
            Align::Left => format!("{content}\\par"),
            Align::Center => format!("{{\\centering {content}\\par}}"),
        };
        self.push(&line);
    }

    fn multi_cell(&mut self, text: &str) {
        let line = format!("{}\\par", self.styled(text));
        self.push(&line);
    }

    fn separator(&mut self) {
        self.push("\\vspace{2pt}\\hrule\\vspace{4pt}");
    }

    fn image(&mut self, image: &QrImage, placement: ImagePlacement) {
        let line = format!(
            "\\vspace{{-{}mm}}\\hspace*{{{}mm}}\\resizebox{{{}mm}}{{!}}{{{}}}\\par",
            placement.y_offset_mm, placement.x_mm, placement.width_mm, image.markup
        );
        self.push(&line);
    }

    fn link_cell(&mut self, text: &str, url: &str) {
        let line = format!("\\href{{{}}}{{{}}}\\par", escape_url(url), self.styled(text));
        self.push(&line);
    }

    fn save(&mut self, path: &Path) -> Result<(), RenderError> {
        let source = self.source().ok_or(RenderError::NotStarted)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, source)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

fn rgb(color: Rgb) -> String {
    format!("{},{},{}", color.0, color.1, color.2)
}

/// Escapes LaTeX special characters in body text.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// `\href` targets only need `%` and `#` escaped.
fn escape_url(url: &str) -> String {
    url.replace('%', "\\%").replace('#', "\\#")
}
