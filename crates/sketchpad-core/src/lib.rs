//! Sketchpad Core Library
//!
//! Document model, interaction engine and persistence for the Sketchpad vector editor.

pub mod canvas;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod prompt;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod surface;
pub mod tools;

pub use canvas::{CanvasDocument, GroupError};
pub use config::{ConfigError, EditorConfig};
pub use editor::{EditError, Editor, Effect, Mode, Transition};
pub use input::PointerEvent;
pub use prompt::{FileDialog, Prompter, SilentPrompter};
pub use selection::Selection;
pub use shapes::{CanvasPoint, CornerStyle, Group, GroupId, Line, Rectangle, Shape, ShapeId};
pub use storage::{FileManager, StorageError, StorageResult};
pub use surface::{RenderHandle, RenderItem, RenderSurface};
pub use tools::{PRESET_COLORS, ToolKind, ToolManager};
