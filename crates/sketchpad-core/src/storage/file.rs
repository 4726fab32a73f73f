//! File-backed persistence for the editor.

use super::text::{parse_text, write_text};
use super::xml::export_xml_string;
use super::StorageResult;
use crate::canvas::CanvasDocument;
use crate::shapes::Shape;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension given to saved drawings without one.
pub const TEXT_EXTENSION: &str = "txt";
/// Extension given to XML exports without one.
pub const XML_EXTENSION: &str = "xml";

/// Tracks the current file and whether the document has unsaved changes.
#[derive(Debug, Clone, Default)]
pub struct FileManager {
    /// File that plain saves write to.
    current_file: Option<PathBuf>,
    /// Set by any document mutation, cleared by save, open and export.
    dirty: bool,
}

impl FileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with a file already registered for saving.
    pub fn with_current_file(path: impl Into<PathBuf>) -> Self {
        Self {
            current_file: Some(path.into()),
            dirty: false,
        }
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Write the document in text format and make `path` the current file.
    pub fn save(&mut self, document: &CanvasDocument, path: &Path) -> StorageResult<PathBuf> {
        let path = with_default_extension(path, TEXT_EXTENSION);
        fs::write(&path, write_text(document.shapes_ordered()))?;
        log::info!("Saved {} shapes to {}", document.len(), path.display());
        self.current_file = Some(path.clone());
        self.dirty = false;
        Ok(path)
    }

    /// Read and parse a text file. On success `path` becomes the current file.
    ///
    /// Nothing is changed when reading or parsing fails.
    pub fn open(&mut self, path: &Path) -> StorageResult<Vec<Shape>> {
        let contents = fs::read_to_string(path)?;
        let shapes = parse_text(&contents)?;
        log::info!("Read {} shapes from {}", shapes.len(), path.display());
        self.current_file = Some(path.to_path_buf());
        self.dirty = false;
        Ok(shapes)
    }

    /// Write an XML export. The current file is left alone.
    pub fn export(
        &mut self,
        document: &CanvasDocument,
        path: &Path,
        include_groups: bool,
    ) -> StorageResult<PathBuf> {
        let path = with_default_extension(path, XML_EXTENSION);
        let xml = export_xml_string(document, include_groups)?;
        fs::write(&path, xml)?;
        log::info!("Exported {} shapes to {}", document.len(), path.display());
        self.dirty = false;
        Ok(path)
    }
}

/// Append `extension` when `path` has none.
fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}
