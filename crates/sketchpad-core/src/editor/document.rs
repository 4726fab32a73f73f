//! File commands on the editor.

use super::{Editor, Mode};
use crate::prompt::{FileDialog, Prompter};
use crate::selection::Selection;
use crate::shapes::Shape;
use crate::storage::StorageResult;
use std::path::{Path, PathBuf};

impl Editor {
    /// Ask for a drawing and load it, replacing the current document.
    ///
    /// Returns `Ok(false)` when the user backs out at the unsaved-changes check or the
    /// file dialog. A file that fails to parse leaves the document untouched.
    pub fn open_document(&mut self, prompter: &mut dyn Prompter) -> StorageResult<bool> {
        if self.is_dirty()
            && !prompter.confirm(
                "Unsaved Changes",
                "You have unsaved changes. Do you want to continue?",
            )
        {
            return Ok(false);
        }
        let Some(path) = prompter.choose_file(FileDialog::Open) else {
            return Ok(false);
        };
        self.load_file(&path)?;
        Ok(true)
    }

    /// Load a drawing from `path`, which becomes the current file.
    pub fn load_file(&mut self, path: &Path) -> StorageResult<usize> {
        let shapes = self.files.open(path)?;
        let count = shapes.len();
        self.replace_contents(shapes);
        Ok(count)
    }

    /// Clear document and surface, then insert and draw `shapes` in order.
    fn replace_contents(&mut self, shapes: Vec<Shape>) {
        self.selection = Selection::new();
        self.document.clear();
        self.surface.clear();
        self.tools.cancel();
        for shape in shapes {
            self.insert_and_draw(shape);
        }
        self.fresh_load = true;
        if self.mode == Mode::ReadyToMove {
            self.mode = Mode::Idle;
        }
    }

    /// Save to the current file, asking for one if none is set.
    ///
    /// Returns the written path, or `None` if the dialog was cancelled.
    pub fn save_document(&mut self, prompter: &mut dyn Prompter) -> StorageResult<Option<PathBuf>> {
        let path = match self.files.current_file() {
            Some(path) => path.to_path_buf(),
            None => match prompter.choose_file(FileDialog::Save) {
                Some(path) => path,
                None => return Ok(None),
            },
        };
        self.save_as(&path).map(Some)
    }

    /// Save to `path` and make it the current file.
    pub fn save_as(&mut self, path: &Path) -> StorageResult<PathBuf> {
        self.sync_from_surface();
        self.files.save(&self.document, path)
    }

    /// Ask for a destination and write the XML export there.
    pub fn export_xml(&mut self, prompter: &mut dyn Prompter) -> StorageResult<Option<PathBuf>> {
        let Some(path) = prompter.choose_file(FileDialog::Export) else {
            return Ok(None);
        };
        self.sync_from_surface();
        let include_groups = self.config.xml_include_groups;
        self.files
            .export(&self.document, &path, include_groups)
            .map(Some)
    }

    /// Copy geometry and color back from each shape's render object.
    pub fn sync_from_surface(&mut self) {
        for id in self.document.order().to_vec() {
            let Some(shape) = self.document.get_shape_mut(id) else {
                continue;
            };
            let Some(item) = shape.render_handle().and_then(|h| self.surface.get(h)) else {
                continue;
            };
            if let Some((p1, p2)) = item.corners() {
                shape.set_corners(p1, p2);
            }
            if shape.color() != item.color {
                shape.set_color(item.color.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::{Editor, Mode};
    use crate::input::PointerEvent;
    use crate::prompt::{FileDialog, Prompter, SilentPrompter};
    use crate::shapes::{CanvasPoint, CornerStyle, Line, Rectangle, Shape};
    use crate::storage::StorageError;
    use crate::tools::ToolKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Prompter that answers file dialogs with fixed paths.
    struct Files {
        open: Option<PathBuf>,
        save: Option<PathBuf>,
        export: Option<PathBuf>,
        confirm: bool,
        confirmations: usize,
    }

    impl Files {
        fn new() -> Self {
            Self {
                open: None,
                save: None,
                export: None,
                confirm: true,
                confirmations: 0,
            }
        }
    }

    impl Prompter for Files {
        fn confirm(&mut self, _title: &str, _message: &str) -> bool {
            self.confirmations += 1;
            self.confirm
        }

        fn ask_string(&mut self, _title: &str, _prompt: &str) -> Option<String> {
            None
        }

        fn message(&mut self, _text: &str) {}

        fn choose_file(&mut self, dialog: FileDialog) -> Option<PathBuf> {
            match dialog {
                FileDialog::Open => self.open.clone(),
                FileDialog::Save => self.save.clone(),
                FileDialog::Export => self.export.clone(),
            }
        }
    }

    fn pt(x: i32, y: i32) -> CanvasPoint {
        CanvasPoint::new(x, y)
    }

    #[test]
    fn test_save_asks_for_path_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.txt");
        let mut editor = Editor::new();
        editor.add_shape(Shape::Line(Line::new(pt(1, 2), pt(3, 4), "red".into())));

        let mut prompter = Files::new();
        assert_eq!(editor.save_document(&mut prompter).unwrap(), None);

        prompter.save = Some(path.clone());
        assert_eq!(editor.save_document(&mut prompter).unwrap(), Some(path.clone()));
        assert!(!editor.is_dirty());

        // Later saves go to the current file without a dialog.
        prompter.save = None;
        editor.add_shape(Shape::Line(Line::new(pt(5, 6), pt(7, 8), "blue".into())));
        assert_eq!(editor.save_document(&mut prompter).unwrap(), Some(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "line 1 2 3 4 red\nline 5 6 7 8 blue\n"
        );
    }

    #[test]
    fn test_open_replaces_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.txt");
        fs::write(&path, "rectangle 0 0 40 40 blue r\nline 10 10 100 100 black\n").unwrap();

        let mut editor = Editor::new();
        editor.add_shape(Shape::Line(Line::new(pt(0, 0), pt(1, 1), "red".into())));

        let mut prompter = Files::new();
        prompter.open = Some(path.clone());
        assert!(editor.open_document(&mut prompter).unwrap());
        assert_eq!(prompter.confirmations, 1);

        assert_eq!(editor.document().len(), 2);
        assert_eq!(editor.surface().len(), 2);
        assert!(!editor.is_dirty());
        assert_eq!(editor.files().current_file(), Some(path.as_path()));
        let first = editor.document().shapes_ordered().next().unwrap();
        assert_eq!(first.corner_style(), Some(CornerStyle::Rounded));
    }

    #[test]
    fn test_open_declined_when_dirty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.txt");
        fs::write(&path, "line 0 0 1 1 red\n").unwrap();

        let mut editor = Editor::new();
        editor.add_shape(Shape::Line(Line::new(pt(0, 0), pt(5, 5), "blue".into())));

        let mut prompter = Files::new();
        prompter.open = Some(path);
        prompter.confirm = false;
        assert!(!editor.open_document(&mut prompter).unwrap());
        assert_eq!(editor.document().shapes_ordered().next().unwrap().color(), "blue");
    }

    #[test]
    fn test_open_malformed_file_keeps_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "line 0 0 1 1 red\nline 0 0\n").unwrap();

        let mut editor = Editor::new();
        let id = editor.add_shape(Shape::Line(Line::new(pt(0, 0), pt(5, 5), "blue".into())));

        let mut prompter = Files::new();
        prompter.open = Some(path);
        let err = editor.open_document(&mut prompter).unwrap_err();
        assert!(matches!(err, StorageError::MalformedLine { line: 2, .. }));
        assert_eq!(editor.document().order(), &[id]);
        assert_eq!(editor.surface().len(), 1);
    }

    #[test]
    fn test_fresh_load_guard_suppresses_first_preview() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.txt");
        fs::write(&path, "line 0 0 1 1 red\n").unwrap();

        let mut editor = Editor::new();
        editor.load_file(&path).unwrap();

        let mut prompter = SilentPrompter::default();
        editor.set_tool(Some(ToolKind::Rectangle));
        editor.set_mode(Mode::Draw);
        editor.dispatch(PointerEvent::Down(pt(10, 10)), &mut prompter);
        editor.dispatch(PointerEvent::Drag(pt(20, 20)), &mut prompter);
        let preview = editor.tools().preview().unwrap();
        let handle = editor.document().get_shape(preview).unwrap().render_handle();

        // Preview updates are held back until the gesture ends.
        editor.dispatch(PointerEvent::Drag(pt(30, 30)), &mut prompter);
        let shape = editor.document().get_shape(preview).unwrap();
        assert_eq!(shape.corners(), (pt(10, 10), pt(20, 20)));
        assert_eq!(shape.render_handle(), handle);

        editor.dispatch(PointerEvent::Up(pt(40, 40)), &mut prompter);
        let shape = editor.document().get_shape(preview).unwrap();
        assert_eq!(shape.corners(), (pt(10, 10), pt(40, 40)));

        // The next gesture updates live again.
        editor.set_tool(Some(ToolKind::Line));
        editor.set_mode(Mode::Draw);
        editor.dispatch(PointerEvent::Down(pt(0, 0)), &mut prompter);
        editor.dispatch(PointerEvent::Drag(pt(5, 5)), &mut prompter);
        let preview = editor.tools().preview().unwrap();
        editor.dispatch(PointerEvent::Drag(pt(9, 9)), &mut prompter);
        assert_eq!(
            editor.document().get_shape(preview).unwrap().corners(),
            (pt(0, 0), pt(9, 9))
        );
    }

    #[test]
    fn test_export_writes_separate_file() {
        let dir = tempdir().unwrap();
        let current = dir.path().join("drawing.txt");
        let export = dir.path().join("drawing.xml");

        let mut editor = Editor::new();
        editor.files_mut().set_current_file(Some(current.clone()));
        editor.add_shape(Shape::Rectangle(Rectangle::new(
            pt(0, 0),
            pt(40, 40),
            "blue".into(),
            CornerStyle::Sharp,
        )));

        let mut prompter = Files::new();
        assert_eq!(editor.export_xml(&mut prompter).unwrap(), None);

        prompter.export = Some(export.clone());
        assert_eq!(editor.export_xml(&mut prompter).unwrap(), Some(export.clone()));
        assert!(fs::read_to_string(&export).unwrap().contains("<corner>s</corner>"));
        assert!(!current.exists());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_sync_from_surface_reads_rounded_geometry() {
        let mut editor = Editor::new();
        let id = editor.add_shape(Shape::Rectangle(Rectangle::new(
            pt(15, 25),
            pt(95, 85),
            "green".into(),
            CornerStyle::Rounded,
        )));
        editor.sync_from_surface();
        let shape = editor.document().get_shape(id).unwrap();
        assert_eq!(shape.corners(), (pt(15, 25), pt(95, 85)));
        assert_eq!(shape.color(), "green");
    }
}
