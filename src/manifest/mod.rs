//! Debian-copyright-style manifest handling.
//!
//! - [`reader`] — line/tag scanner (`Key: value` plus indented continuations).
//! - [`parser`] — paragraph assembly into projects and standalone licenses.
//! - [`flatten`] — offset-indexed tables ready for emission.

pub mod flatten;
pub mod parser;
pub mod reader;

pub use flatten::flatten;
pub use parser::parse_manifest;
