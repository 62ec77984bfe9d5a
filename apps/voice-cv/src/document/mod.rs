// Document pipeline: Record → DocumentModel (assembler) → Renderer calls
// (render + style strategy) → artifact on disk (latex).

pub mod assembler;
pub mod latex;
pub mod qr;
pub mod render;
pub mod style;

pub use assembler::assemble;
pub use latex::LatexRenderer;
pub use qr::{LatexQrEncoder, QrEncoder};
pub use render::{render_document, Header, RenderError, Renderer};
