//! # lex-docx
//!
//! Office Open XML (`.docx`) handling for petitions.
//!
//! - [`render_petition`] / [`render_text`] build a minimal WordprocessingML
//!   package in memory (`zip`).
//! - [`inspect`] lists a package's parts, paragraphs and template
//!   placeholders.
//! - [`encode_base64`] / [`decode_base64`] wrap the bytes for the JSON API.

mod encoding;
mod error;
mod inspect;
mod package;
mod render;
mod xml;

pub use encoding::{DOCX_MIME_TYPE, decode_base64, document_filename, encode_base64};
pub use error::DocxError;
pub use inspect::{DocxSummary, inspect};
pub use render::{render_petition, render_text};
