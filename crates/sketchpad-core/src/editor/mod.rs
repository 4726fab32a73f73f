//! Interaction engine.
//!
//! The editor owns the document and the render surface and advances a mode-driven state
//! machine from pointer events. [`Editor::dispatch`] is the only place modes change in
//! response to input; the command methods change tool, style and mode directly.

mod document;

use crate::canvas::{CanvasDocument, GroupError};
use crate::config::EditorConfig;
use crate::input::PointerEvent;
use crate::prompt::Prompter;
use crate::selection::Selection;
use crate::shapes::{
    CanvasPoint, CornerStyle, GroupId, Rectangle, Shape, ShapeId, is_valid_color,
};
use crate::storage::FileManager;
use crate::surface::{RenderHandle, RenderItem, RenderSurface};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Rect};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shown after a successful group.
pub const GROUP_FORMED: &str = "Group Formed";
/// Shown after a successful ungroup.
pub const OBJECTS_UNGROUPED: &str = "Objects Ungrouped";

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Idle,
    Draw,
    Edit,
    Delete,
    Move,
    /// A move selection is made; the next press places it.
    ReadyToMove,
    Copy,
    Group,
    Ungroup,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Draw => "draw",
            Mode::Edit => "edit",
            Mode::Delete => "delete",
            Mode::Move => "move",
            Mode::ReadyToMove => "ready_to_move",
            Mode::Copy => "copy",
            Mode::Group => "group",
            Mode::Ungroup => "ungroup",
        }
    }

    /// Modes in which highlighted shapes get no property annotation.
    fn hides_annotations(self) -> bool {
        matches!(
            self,
            Mode::Delete | Mode::Move | Mode::Copy | Mode::Group | Mode::Ungroup
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" | "none" => Ok(Mode::Idle),
            "draw" => Ok(Mode::Draw),
            "edit" => Ok(Mode::Edit),
            "delete" => Ok(Mode::Delete),
            "move" => Ok(Mode::Move),
            "ready_to_move" => Ok(Mode::ReadyToMove),
            "copy" => Ok(Mode::Copy),
            "group" => Ok(Mode::Group),
            "ungroup" => Ok(Mode::Ungroup),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Errors from editing shape properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Multiple objects cannot be edited at once")]
    MultipleSelection,
    #[error("Invalid style '{0}' (expected s or r)")]
    InvalidStyle(String),
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
}

/// Observable outcome of a dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShapeCreated(ShapeId),
    ShapeRemoved(ShapeId),
    ShapeMoved(ShapeId),
    /// A shape's properties changed. Rectangles are replaced, so `old` and `new` differ.
    ShapeEdited { old: ShapeId, new: ShapeId },
    GroupFormed(GroupId),
    GroupDissolved(GroupId),
    /// The selection now holds these shapes.
    SelectionChanged(Vec<ShapeId>),
    SelectionCleared,
    /// A message was shown to the user.
    Notice(String),
}

/// Result of [`Editor::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub effects: Vec<Effect>,
}

/// The drawing editor.
#[derive(Debug)]
pub struct Editor {
    document: CanvasDocument,
    surface: RenderSurface,
    tools: ToolManager,
    selection: Selection,
    mode: Mode,
    /// Where the current press started.
    anchor: CanvasPoint,
    /// Set by loading a file; suppresses preview updates until the next release.
    fresh_load: bool,
    config: EditorConfig,
    files: FileManager,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an editor with custom configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            surface: RenderSurface::new(),
            tools: ToolManager::with_style(&config.default_color, config.default_corner),
            selection: Selection::new(),
            mode: Mode::Idle,
            anchor: CanvasPoint::default(),
            fresh_load: false,
            config,
            files: FileManager::new(),
        }
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileManager {
        &mut self.files
    }

    /// Whether the document has changes not yet saved, opened over or exported.
    pub fn is_dirty(&self) -> bool {
        self.files.is_dirty()
    }

    // --- command surface ---

    /// Choose the tool for the next drawing gesture.
    pub fn set_tool(&mut self, tool: Option<ToolKind>) {
        log::debug!("tool -> {tool:?}");
        self.tools.set_tool(tool);
    }

    /// Choose the color for new shapes.
    pub fn set_color(&mut self, color: &str) -> Result<(), EditError> {
        if !is_valid_color(color) {
            return Err(EditError::InvalidColor(color.to_string()));
        }
        self.tools.current_color = color.to_string();
        Ok(())
    }

    /// Choose the corner style for new rectangles.
    pub fn set_style(&mut self, corner: CornerStyle) {
        self.tools.current_corner = corner;
    }

    /// Switch interaction mode.
    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    /// Append a shape to the document and draw it.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.insert_and_draw(shape);
        self.files.mark_dirty();
        id
    }

    fn insert_and_draw(&mut self, shape: Shape) -> ShapeId {
        let id = self.document.add_shape(shape);
        self.redraw_shape(id);
        id
    }

    /// Draw a shape afresh from its model, replacing its previous render object.
    ///
    /// The old handle is deleted from the surface before the new one is bound.
    pub fn redraw_shape(&mut self, id: ShapeId) -> Option<RenderHandle> {
        let width = if self.selection.contains(id) {
            self.config.highlight_width
        } else {
            self.config.normal_width
        };
        let shape = self.document.get_shape_mut(id)?;
        if let Some(old) = shape.take_render_handle() {
            self.surface.delete(old);
        }
        let item = RenderItem::for_shape(shape, self.config.corner_radius, width);
        let handle = self.surface.create(item);
        shape.bind_render_handle(handle);
        Some(handle)
    }

    // --- state machine ---

    /// Advance the state machine by one pointer event.
    pub fn dispatch(&mut self, event: PointerEvent, prompter: &mut dyn Prompter) -> Transition {
        let from = self.mode;
        let mut effects = Vec::new();

        match event {
            PointerEvent::Down(p) => self.on_down(p, &mut effects),
            PointerEvent::Drag(p) => self.on_drag(p, &mut effects),
            PointerEvent::Up(p) => self.on_up(p, prompter, &mut effects),
        }

        if from != self.mode {
            log::debug!("{event}: {from} -> {}", self.mode);
        }
        Transition {
            from,
            to: self.mode,
            effects,
        }
    }

    fn on_down(&mut self, p: CanvasPoint, effects: &mut Vec<Effect>) {
        self.anchor = p;
        if self.mode == Mode::ReadyToMove {
            self.move_selection_to(p, effects);
            self.mode = Mode::Idle;
        }
        if !self.selection.is_empty() {
            self.clear_selection(effects);
        }
        if self.mode == Mode::Draw {
            self.tools.begin(p);
        }
    }

    fn on_drag(&mut self, p: CanvasPoint, effects: &mut Vec<Effect>) {
        match self.mode {
            Mode::Draw => self.drag_draw(p, effects),
            _ => self.highlight_area(self.anchor, p, effects),
        }
    }

    fn on_up(&mut self, p: CanvasPoint, prompter: &mut dyn Prompter, effects: &mut Vec<Effect>) {
        match self.mode {
            Mode::Copy => {
                self.copy_selection(effects);
                self.mode = Mode::Idle;
            }
            Mode::Move => self.mode = Mode::ReadyToMove,
            Mode::Draw => self.finish_draw(p),
            Mode::Edit => {
                self.edit_selection(prompter, effects);
                self.mode = Mode::Idle;
            }
            Mode::Delete => {
                self.delete_selection(effects);
                self.mode = Mode::Idle;
            }
            Mode::Group => {
                self.group_selection(prompter, effects);
                self.mode = Mode::Idle;
            }
            Mode::Ungroup => {
                self.ungroup_selection(prompter, effects);
                self.mode = Mode::Idle;
            }
            Mode::Idle | Mode::ReadyToMove => self.highlight_area(self.anchor, p, effects),
        }
        self.fresh_load = false;
    }

    fn drag_draw(&mut self, p: CanvasPoint, effects: &mut Vec<Effect>) {
        if !self.tools.is_active() {
            self.tools.begin(self.anchor);
        }
        self.tools.update(p);
        let start = self.tools.start().unwrap_or(self.anchor);

        match self.tools.preview() {
            None => {
                let Some(shape) = self.tools.create_shape(start, p) else {
                    return;
                };
                let id = self.add_shape(shape);
                self.tools.set_preview(id);
                effects.push(Effect::ShapeCreated(id));
            }
            Some(id) => {
                if self.fresh_load {
                    return;
                }
                self.set_shape_corners(id, start, p);
            }
        }
    }

    fn finish_draw(&mut self, p: CanvasPoint) {
        match self.tools.preview() {
            Some(id) => {
                let start = self.tools.start().unwrap_or(self.anchor);
                self.set_shape_corners(id, start, p);
                self.tools.end();
                self.mode = Mode::Idle;
            }
            // A click without a drag draws nothing and keeps the tool armed.
            None => self.tools.cancel(),
        }
    }

    fn set_shape_corners(&mut self, id: ShapeId, p1: CanvasPoint, p2: CanvasPoint) {
        let Some(shape) = self.document.get_shape_mut(id) else {
            return;
        };
        if shape.corners() == (p1, p2) {
            return;
        }
        shape.set_corners(p1, p2);
        self.redraw_shape(id);
        self.files.mark_dirty();
    }

    // --- selection ---

    /// Select every shape whose drawn bounds touch the rectangle between `a` and `b`.
    ///
    /// Newly hit shapes are added to the current selection, which is then closed under
    /// group membership.
    fn highlight_area(&mut self, a: CanvasPoint, b: CanvasPoint, effects: &mut Vec<Effect>) {
        for handle in self.selection.take_annotations() {
            self.surface.delete(handle);
        }

        let owners: HashMap<RenderHandle, ShapeId> = self
            .document
            .shapes_ordered()
            .filter_map(|s| s.render_handle().map(|h| (h, s.id())))
            .collect();
        let area = Rect::from_points(Point::from(a), Point::from(b));

        let mut selected = self.selection.shapes().to_vec();
        for handle in self.surface.find_overlapping(area) {
            if let Some(&id) = owners.get(&handle) {
                if !selected.contains(&id) {
                    selected.push(id);
                }
            }
        }
        let selected = self.document.expand_through_groups(&selected);

        let annotate = !self.mode.hides_annotations();
        for &id in &selected {
            let Some(shape) = self.document.get_shape(id) else {
                continue;
            };
            let Some(handle) = shape.render_handle() else {
                continue;
            };
            self.surface.set_width(handle, self.config.highlight_width);
            if annotate {
                if let Some(bbox) = self.surface.bbox(handle) {
                    let text = RenderItem::text(bbox.center(), shape.properties_text());
                    let annotation = self.surface.create(text);
                    self.selection.push_annotation(annotation);
                }
            }
        }

        self.selection.set_shapes(selected.clone());
        effects.push(Effect::SelectionChanged(selected));
    }

    /// Restore outline widths and drop the selection and its annotations.
    fn clear_selection(&mut self, effects: &mut Vec<Effect>) {
        for id in self.selection.take_shapes() {
            if let Some(handle) = self.document.get_shape(id).and_then(Shape::render_handle) {
                self.surface.set_width(handle, self.config.normal_width);
            }
        }
        for handle in self.selection.take_annotations() {
            self.surface.delete(handle);
        }
        effects.push(Effect::SelectionCleared);
    }

    // --- operations ---

    /// Move the selection so the first selected shape is centred on `p`.
    fn move_selection_to(&mut self, p: CanvasPoint, effects: &mut Vec<Effect>) {
        let Some(center) = self
            .selection
            .first()
            .and_then(|id| self.document.get_shape(id))
            .map(Shape::center)
        else {
            return;
        };
        let (dx, dy) = center.delta_to(p);

        for id in self.selection.shapes().to_vec() {
            let Some(shape) = self.document.get_shape_mut(id) else {
                continue;
            };
            shape.translate(dx, dy);
            self.document.bring_to_front(id);
            self.redraw_shape(id);
            effects.push(Effect::ShapeMoved(id));
        }
        log::debug!("moved {} shapes by ({dx}, {dy})", self.selection.len());
        self.files.mark_dirty();
    }

    fn copy_selection(&mut self, effects: &mut Vec<Effect>) {
        let (dx, dy) = self.config.copy_offset;
        for id in self.selection.shapes().to_vec() {
            let Some(copy) = self.document.get_shape(id).map(|s| s.duplicate(dx, dy)) else {
                continue;
            };
            let new_id = self.add_shape(copy);
            effects.push(Effect::ShapeCreated(new_id));
        }
    }

    fn delete_selection(&mut self, effects: &mut Vec<Effect>) {
        for id in self.selection.take_shapes() {
            if let Some(mut shape) = self.document.remove_shape(id) {
                if let Some(handle) = shape.take_render_handle() {
                    self.surface.delete(handle);
                }
                effects.push(Effect::ShapeRemoved(id));
                self.files.mark_dirty();
            }
        }
        for handle in self.selection.take_annotations() {
            self.surface.delete(handle);
        }
        effects.push(Effect::SelectionCleared);
    }

    fn edit_selection(&mut self, prompter: &mut dyn Prompter, effects: &mut Vec<Effect>) {
        let id = match self.selection.shapes() {
            [] => return,
            [id] => *id,
            _ => {
                notify(prompter, effects, &EditError::MultipleSelection.to_string());
                return;
            }
        };
        let Some(is_rectangle) = self.document.get_shape(id).map(Shape::is_rectangle) else {
            return;
        };

        let result = if is_rectangle {
            self.edit_rectangle(id, prompter)
        } else {
            self.edit_line(id, prompter)
        };
        match result {
            Ok(Some(new_id)) => effects.push(Effect::ShapeEdited { old: id, new: new_id }),
            Ok(None) => {}
            Err(e) => {
                log::warn!("edit rejected: {e}");
                notify(prompter, effects, &e.to_string());
            }
        }
        self.clear_selection(effects);
    }

    /// Ask for a new color and style, then replace the rectangle with a restyled copy.
    fn edit_rectangle(
        &mut self,
        id: ShapeId,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<ShapeId>, EditError> {
        let Some(color) = ask(prompter, "Enter new color (e.g., red, blue, green):") else {
            return Ok(None);
        };
        let Some(style) = ask(prompter, "Enter new style (s or r):") else {
            return Ok(None);
        };
        if !is_valid_color(&color) {
            return Err(EditError::InvalidColor(color));
        }
        let corner = CornerStyle::from_code(&style).ok_or(EditError::InvalidStyle(style))?;

        let Some((p1, p2)) = self.document.get_shape(id).map(Shape::corners) else {
            return Ok(None);
        };
        let replacement = Shape::Rectangle(Rectangle::new(p1, p2, color, corner));
        let new_id = replacement.id();
        let Ok(mut old) = self.document.replace_shape(id, replacement) else {
            return Ok(None);
        };
        if let Some(handle) = old.take_render_handle() {
            self.surface.delete(handle);
        }
        self.selection.replace(id, new_id);
        self.redraw_shape(new_id);
        self.files.mark_dirty();
        Ok(Some(new_id))
    }

    /// Ask for a new color and apply it to the line in place.
    fn edit_line(
        &mut self,
        id: ShapeId,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<ShapeId>, EditError> {
        let Some(color) = ask(prompter, "Enter new color (e.g., red, blue, green):") else {
            return Ok(None);
        };
        if !is_valid_color(&color) {
            return Err(EditError::InvalidColor(color));
        }
        let Some(shape) = self.document.get_shape_mut(id) else {
            return Ok(None);
        };
        if let Some(handle) = shape.render_handle() {
            self.surface.set_color(handle, &color);
        }
        shape.set_color(color);
        self.files.mark_dirty();
        Ok(Some(id))
    }

    fn group_selection(&mut self, prompter: &mut dyn Prompter, effects: &mut Vec<Effect>) {
        match self.document.group(self.selection.shapes()) {
            Ok(group_id) => {
                effects.push(Effect::GroupFormed(group_id));
                notify(prompter, effects, GROUP_FORMED);
                self.files.mark_dirty();
            }
            Err(GroupError::InsufficientSelection) => {
                log::debug!("group ignored: {} shapes selected", self.selection.len());
            }
            Err(e) => notify(prompter, effects, &e.to_string()),
        }
    }

    fn ungroup_selection(&mut self, prompter: &mut dyn Prompter, effects: &mut Vec<Effect>) {
        if self.selection.is_empty() {
            return;
        }
        match self.document.ungroup(self.selection.shapes()) {
            Ok(group_id) => {
                effects.push(Effect::GroupDissolved(group_id));
                notify(prompter, effects, OBJECTS_UNGROUPED);
                self.files.mark_dirty();
            }
            Err(e) => {
                log::warn!("ungroup rejected: {e}");
                notify(prompter, effects, &e.to_string());
            }
        }
    }
}

/// Ask for a value; blank answers count as cancelling.
fn ask(prompter: &mut dyn Prompter, prompt: &str) -> Option<String> {
    prompter
        .ask_string("Input", prompt)
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
}

fn notify(prompter: &mut dyn Prompter, effects: &mut Vec<Effect>, text: &str) {
    prompter.message(text);
    effects.push(Effect::Notice(text.to_string()));
}
