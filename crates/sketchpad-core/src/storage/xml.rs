//! XML export of a document.
//!
//! ```xml
//! <shapes>
//!   <line><begin><x/><y/></begin><end><x/><y/></end><color/></line>
//!   <rectangle><upper-left/><lower-right/><color/><corner/></rectangle>
//!   <group><shape><line/></shape><group/></group>
//! </shapes>
//! ```

use super::{StorageError, StorageResult};
use crate::canvas::CanvasDocument;
use crate::shapes::{CanvasPoint, Group, Shape};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Writer that serializes a document to XML.
pub struct XmlExporter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlExporter<W> {
    /// Create an exporter writing tab-indented XML to `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b'\t', 1),
        }
    }

    /// Write the whole document under a `<shapes>` root.
    ///
    /// Shapes come first, in document order. With `include_groups`, every top-level group
    /// follows as a `<group>` tree.
    pub fn write_document(
        &mut self,
        document: &CanvasDocument,
        include_groups: bool,
    ) -> StorageResult<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.start("shapes")?;
        for shape in document.shapes_ordered() {
            self.write_shape(shape)?;
        }
        if include_groups {
            for group in document.top_level_groups() {
                self.write_group(document, group)?;
            }
        }
        self.end("shapes")
    }

    /// Write one shape element.
    pub fn write_shape(&mut self, shape: &Shape) -> StorageResult<()> {
        let (p1, p2) = shape.corners();
        match shape {
            Shape::Line(line) => {
                self.start("line")?;
                self.write_point("begin", p1)?;
                self.write_point("end", p2)?;
                self.write_text_element("color", &line.color)?;
                self.end("line")
            }
            Shape::Rectangle(rect) => {
                self.start("rectangle")?;
                self.write_point("upper-left", p1)?;
                self.write_point("lower-right", p2)?;
                self.write_text_element("color", &rect.color)?;
                self.write_text_element("corner", rect.corner.code())?;
                self.end("rectangle")
            }
        }
    }

    /// Write a group: each direct shape wrapped in `<shape>`, then nested sub-groups.
    pub fn write_group(&mut self, document: &CanvasDocument, group: &Group) -> StorageResult<()> {
        self.start("group")?;
        for id in group.direct_shapes() {
            if let Some(shape) = document.get_shape(*id) {
                self.start("shape")?;
                self.write_shape(shape)?;
                self.end("shape")?;
            }
        }
        for sub_id in group.sub_groups() {
            match document.get_group(*sub_id) {
                Some(sub) if !sub.is_empty() => self.write_group(document, sub)?,
                _ => {}
            }
        }
        self.end("group")
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_point(&mut self, name: &str, point: CanvasPoint) -> StorageResult<()> {
        self.start(name)?;
        self.write_text_element("x", &point.x.to_string())?;
        self.write_text_element("y", &point.y.to_string())?;
        self.end(name)
    }

    fn write_text_element(&mut self, name: &str, text: &str) -> StorageResult<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn start(&mut self, name: &str) -> StorageResult<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> StorageResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn event(&mut self, event: Event<'_>) -> StorageResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| StorageError::Xml(e.to_string()))
    }
}

/// Export a document to an XML string.
pub fn export_xml_string(document: &CanvasDocument, include_groups: bool) -> StorageResult<String> {
    let mut buffer = Vec::new();
    {
        let mut exporter = XmlExporter::new(&mut buffer);
        exporter.write_document(document, include_groups)?;
    }
    String::from_utf8(buffer).map_err(|e| StorageError::Xml(e.to_string()))
}
