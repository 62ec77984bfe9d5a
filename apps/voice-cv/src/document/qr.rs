//! QR collaborator: `encode(url) → image`.

use crate::document::render::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub url: String,
    /// Renderer-native markup that draws the code itself.
    pub markup: String,
}

pub trait QrEncoder: Send + Sync {
    fn encode(&self, url: &str) -> Result<QrImage, RenderError>;
}

/// Emits a `\qrcode` command for the LaTeX `qrcode` package.
#[derive(Debug, Clone, Copy)]
pub struct LatexQrEncoder {
    pub height_mm: u32,
}

impl Default for LatexQrEncoder {
    fn default() -> Self {
        Self { height_mm: 30 }
    }
}

impl QrEncoder for LatexQrEncoder {
    fn encode(&self, url: &str) -> Result<QrImage, RenderError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RenderError::Qr("cannot encode an empty URL".to_string()));
        }
        Ok(QrImage {
            url: url.to_string(),
            markup: format!(
                "\\qrcode[height={}mm]{{{}}}",
                self.height_mm,
                escape_payload(url)
            ),
        })
    }
}

/// The qrcode package takes `\`, `{`, `}`, `#`, `%` and `~` backslash-escaped.
fn escape_payload(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '\\' | '{' | '}' | '#' | '%' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_markup() {
        let image = LatexQrEncoder::default()
            .encode("https://linkedin.com/in/alenso")
            .unwrap();
        assert_eq!(image.url, "https://linkedin.com/in/alenso");
        assert_eq!(
            image.markup,
            "\\qrcode[height=30mm]{https://linkedin.com/in/alenso}"
        );
    }

    #[test]
    fn test_encode_escapes_special_characters() {
        let image = LatexQrEncoder::default().encode("https://x.com/a%20b#top").unwrap();
        assert!(image.markup.contains("a\\%20b\\#top"));
    }

    #[test]
    fn test_empty_url_is_rejected() {
        assert!(matches!(
            LatexQrEncoder::default().encode("  "),
            Err(RenderError::Qr(_))
        ));
    }
}
