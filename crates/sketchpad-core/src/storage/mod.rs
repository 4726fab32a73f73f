//! Persistence: the line-oriented text format and the XML export.

mod file;
mod text;
mod xml;

pub use file::{FileManager, TEXT_EXTENSION, XML_EXTENSION};
pub use text::{format_shape, parse_line, parse_text, write_text};
pub use xml::{XmlExporter, export_xml_string};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
