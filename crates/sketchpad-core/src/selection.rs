//! Highlighted shapes and their property annotations.

use crate::shapes::ShapeId;
use crate::surface::RenderHandle;

/// The current selection.
///
/// Shapes are kept in the order they were selected. Annotations are text objects on the
/// render surface, owned by the selection until cleared.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    shapes: Vec<ShapeId>,
    annotations: Vec<RenderHandle>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected shapes in selection order.
    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    /// Replace the selected shapes.
    pub fn set_shapes(&mut self, shapes: Vec<ShapeId>) {
        self.shapes = shapes;
    }

    pub fn first(&self) -> Option<ShapeId> {
        self.shapes.first().copied()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Swap a selected shape for its replacement.
    pub fn replace(&mut self, old: ShapeId, new: ShapeId) {
        for id in &mut self.shapes {
            if *id == old {
                *id = new;
            }
        }
    }

    /// Remember an annotation drawn for the selection.
    pub fn push_annotation(&mut self, handle: RenderHandle) {
        self.annotations.push(handle);
    }

    pub fn annotations(&self) -> &[RenderHandle] {
        &self.annotations
    }

    /// Hand over the annotation handles so they can be deleted from the surface.
    pub fn take_annotations(&mut self) -> Vec<RenderHandle> {
        std::mem::take(&mut self.annotations)
    }

    /// Drop the selected shapes, returning them. Annotations are left alone.
    pub fn take_shapes(&mut self) -> Vec<ShapeId> {
        std::mem::take(&mut self.shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_selection_keeps_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.set_shapes(vec![b, a]);
        assert_eq!(selection.first(), Some(b));
        assert_eq!(selection.len(), 2);

        let fresh = Uuid::new_v4();
        selection.replace(b, fresh);
        assert_eq!(selection.shapes(), &[fresh, a]);
        assert!(!selection.contains(b));
    }

    #[test]
    fn test_annotations_are_taken_separately() {
        let mut selection = Selection::new();
        selection.set_shapes(vec![Uuid::new_v4()]);
        selection.push_annotation(RenderHandle(4));
        selection.push_annotation(RenderHandle(5));

        assert_eq!(selection.take_annotations(), vec![RenderHandle(4), RenderHandle(5)]);
        assert!(selection.annotations().is_empty());
        assert!(!selection.is_empty());
        assert_eq!(selection.take_shapes().len(), 1);
        assert!(selection.is_empty());
    }
}
