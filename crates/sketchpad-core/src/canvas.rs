//! Canvas document: the shapes, their order, and the groups over them.

use crate::shapes::{Group, GroupId, Shape, ShapeId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from grouping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("at least two shapes are needed to form a group")]
    InsufficientSelection,
    #[error("The selected elements do not belong to a common group")]
    NoCommonGroup,
}

/// The document being edited.
///
/// Every shape appears exactly once in `order`; group membership never stands in for
/// presence in the document.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Document order (back to front).
    order: Vec<ShapeId>,
    /// Every group ever formed, in creation order.
    groups: Vec<Group>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape at the end of the document order.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Remove a shape from the document and from any group listing it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;
        self.order.retain(|&shape_id| shape_id != id);
        for group_id in shape.groups() {
            if let Some(group) = self.get_group_mut(*group_id) {
                group.remove_shape(id);
            }
        }
        Some(shape)
    }

    /// Drop every shape and group.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
        self.groups.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Position of a shape in the document order.
    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.order.iter().position(|&shape_id| shape_id == id)
    }

    /// Shape IDs in document order.
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// Shapes in document order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Move a shape to the end of the document order.
    pub fn bring_to_front(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.order.retain(|&shape_id| shape_id != id);
            self.order.push(id);
        }
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn get_group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    fn get_group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    /// All groups in creation order, including emptied ones.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Non-empty groups that are not a sub-group of another non-empty group.
    pub fn top_level_groups(&self) -> Vec<&Group> {
        let nested: HashSet<GroupId> = self
            .groups
            .iter()
            .filter(|g| !g.is_empty())
            .flat_map(|g| g.sub_groups().iter().copied())
            .collect();
        self.groups
            .iter()
            .filter(|g| !g.is_empty() && !nested.contains(&g.id()))
            .collect()
    }

    /// Group the given shapes under a new group.
    ///
    /// The new group is pushed onto each shape's membership stack. Shapes that were
    /// ungrouped become direct members; the distinct innermost groups of the others
    /// become sub-groups.
    pub fn group(&mut self, ids: &[ShapeId]) -> Result<GroupId, GroupError> {
        let mut members: Vec<ShapeId> = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.shapes.contains_key(&id) && !members.contains(&id) {
                members.push(id);
            }
        }
        if members.len() < 2 {
            return Err(GroupError::InsufficientSelection);
        }

        let mut group = Group::new();
        let group_id = group.id();
        for id in members {
            if let Some(shape) = self.shapes.get_mut(&id) {
                group.add_shape(id, shape.innermost_group());
                shape.groups_mut().push(group_id);
            }
        }
        log::debug!("formed group {group_id} with {} members", group.len());
        self.groups.push(group);
        Ok(group_id)
    }

    /// Dissolve the innermost group shared by all of the given shapes.
    ///
    /// Either every shape loses its innermost group or nothing changes.
    pub fn ungroup(&mut self, ids: &[ShapeId]) -> Result<GroupId, GroupError> {
        let mut common: Option<GroupId> = None;
        for &id in ids {
            let innermost = self
                .shapes
                .get(&id)
                .and_then(Shape::innermost_group)
                .ok_or(GroupError::NoCommonGroup)?;
            match common {
                None => common = Some(innermost),
                Some(g) if g == innermost => {}
                Some(_) => return Err(GroupError::NoCommonGroup),
            }
        }
        let group_id = common.ok_or(GroupError::NoCommonGroup)?;

        for &id in ids {
            if let Some(shape) = self.shapes.get_mut(&id) {
                // Duplicate ids in the selection must not pop twice.
                if shape.innermost_group() == Some(group_id) {
                    shape.groups_mut().pop();
                }
            }
        }
        if let Some(group) = self.get_group_mut(group_id) {
            for &id in ids {
                group.remove_shape(id);
            }
        }
        log::debug!("dissolved group {group_id} for {} shapes", ids.len());
        Ok(group_id)
    }

    /// Replace shape `old` with `new` at the same position, carrying over its groups.
    ///
    /// Returns the removed shape, or gives `new` back if `old` is not present.
    pub fn replace_shape(&mut self, old: ShapeId, mut new: Shape) -> Result<Shape, Shape> {
        let Some(index) = self.position(old) else {
            return Err(new);
        };
        let Some(previous) = self.shapes.remove(&old) else {
            return Err(new);
        };
        let new_id = new.id();
        *new.groups_mut() = previous.groups().to_vec();
        for group_id in previous.groups() {
            if let Some(group) = self.get_group_mut(*group_id) {
                group.replace_shape(old, new_id);
            }
        }
        self.order[index] = new_id;
        self.shapes.insert(new_id, new);
        Ok(previous)
    }

    /// Close a set of shapes under group membership.
    ///
    /// Starting from `seeds`, any shape sharing a group with a collected shape is
    /// collected too. The result keeps `seeds` order, followed by discovered shapes in
    /// the order they were reached.
    pub fn expand_through_groups(&self, seeds: &[ShapeId]) -> Vec<ShapeId> {
        let mut result: Vec<ShapeId> = Vec::new();
        let mut seen: HashSet<ShapeId> = HashSet::new();
        let mut visited_groups: HashSet<GroupId> = HashSet::new();
        let mut pending: Vec<ShapeId> = Vec::new();

        for &id in seeds {
            if self.shapes.contains_key(&id) && seen.insert(id) {
                result.push(id);
                pending.push(id);
            }
        }

        let mut cursor = 0;
        while cursor < pending.len() {
            let id = pending[cursor];
            cursor += 1;
            let Some(shape) = self.shapes.get(&id) else {
                continue;
            };
            for group_id in shape.groups() {
                if !visited_groups.insert(*group_id) {
                    continue;
                }
                let Some(group) = self.get_group(*group_id) else {
                    continue;
                };
                for &member in group.members() {
                    if self.shapes.contains_key(&member) && seen.insert(member) {
                        result.push(member);
                        pending.push(member);
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CanvasPoint, CornerStyle, Line, Rectangle};

    fn line(doc: &mut CanvasDocument, x: i32) -> ShapeId {
        doc.add_shape(Shape::Line(Line::new(
            CanvasPoint::new(x, 0),
            CanvasPoint::new(x + 10, 10),
            "black".to_string(),
        )))
    }

    fn stack(doc: &CanvasDocument, id: ShapeId) -> Vec<GroupId> {
        doc.get_shape(id).unwrap().groups().to_vec()
    }

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
        assert!(doc.groups().is_empty());
    }

    #[test]
    fn test_add_and_remove_shape() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        assert_eq!(doc.order(), &[a, b]);

        assert!(doc.remove_shape(a).is_some());
        assert_eq!(doc.order(), &[b]);
        assert!(doc.remove_shape(a).is_none());
    }

    #[test]
    fn test_bring_to_front() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        doc.bring_to_front(a);
        assert_eq!(doc.order(), &[b, a]);
    }

    #[test]
    fn test_group_requires_two_shapes() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);

        assert_eq!(doc.group(&[a]), Err(GroupError::InsufficientSelection));
        assert_eq!(doc.group(&[]), Err(GroupError::InsufficientSelection));
        // The same shape twice is still a single shape.
        assert_eq!(doc.group(&[a, a]), Err(GroupError::InsufficientSelection));
        assert!(stack(&doc, a).is_empty());
        assert!(doc.groups().is_empty());
    }

    #[test]
    fn test_group_then_ungroup_restores_stacks() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);

        let g = doc.group(&[a, b]).unwrap();
        assert_eq!(stack(&doc, a), vec![g]);
        assert_eq!(stack(&doc, b), vec![g]);
        assert_eq!(doc.get_group(g).unwrap().direct_shapes(), &[a, b]);

        assert_eq!(doc.ungroup(&[a, b]), Ok(g));
        assert!(stack(&doc, a).is_empty());
        assert!(stack(&doc, b).is_empty());
        // The emptied group stays allocated but is no longer top level.
        assert!(doc.get_group(g).unwrap().is_empty());
        assert!(doc.top_level_groups().is_empty());
    }

    #[test]
    fn test_nested_grouping_records_sub_groups() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        let c = line(&mut doc, 40);

        let inner = doc.group(&[a, b]).unwrap();
        let outer = doc.group(&[a, b, c]).unwrap();

        assert_eq!(stack(&doc, a), vec![inner, outer]);
        assert_eq!(stack(&doc, c), vec![outer]);
        let outer_group = doc.get_group(outer).unwrap();
        assert_eq!(outer_group.direct_shapes(), &[c]);
        assert_eq!(outer_group.sub_groups(), &[inner]);

        let top: Vec<GroupId> = doc.top_level_groups().iter().map(|g| g.id()).collect();
        assert_eq!(top, vec![outer]);
    }

    #[test]
    fn test_ungroup_is_atomic() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        let c = line(&mut doc, 40);
        let d = line(&mut doc, 60);

        let g1 = doc.group(&[a, b]).unwrap();
        let g2 = doc.group(&[c, d]).unwrap();

        assert_eq!(doc.ungroup(&[a, c]), Err(GroupError::NoCommonGroup));
        assert_eq!(stack(&doc, a), vec![g1]);
        assert_eq!(stack(&doc, c), vec![g2]);

        let e = line(&mut doc, 80);
        assert_eq!(doc.ungroup(&[a, e]), Err(GroupError::NoCommonGroup));
        assert_eq!(doc.ungroup(&[e]), Err(GroupError::NoCommonGroup));
        assert_eq!(doc.ungroup(&[]), Err(GroupError::NoCommonGroup));
        assert_eq!(stack(&doc, a), vec![g1]);
        assert!(doc.get_group(g1).unwrap().contains(a));
    }

    #[test]
    fn test_expand_through_groups_is_transitive() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        let c = line(&mut doc, 40);
        let lone = line(&mut doc, 60);

        doc.group(&[a, b]).unwrap();
        // b is the bridge between the two groups.
        let g2 = doc.group(&[b, c]).unwrap();
        assert_eq!(stack(&doc, c), vec![g2]);

        assert_eq!(doc.expand_through_groups(&[a]), vec![a, b, c]);
        assert_eq!(doc.expand_through_groups(&[c]), vec![c, b, a]);
        assert_eq!(doc.expand_through_groups(&[lone]), vec![lone]);
    }

    #[test]
    fn test_remove_shape_leaves_groups_consistent() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        let g = doc.group(&[a, b]).unwrap();

        doc.remove_shape(a);
        assert_eq!(doc.get_group(g).unwrap().members(), &[b]);
        assert_eq!(doc.expand_through_groups(&[b]), vec![b]);
    }

    #[test]
    fn test_replace_shape_keeps_position_and_groups() {
        let mut doc = CanvasDocument::new();
        let a = line(&mut doc, 0);
        let b = line(&mut doc, 20);
        let c = line(&mut doc, 40);
        let g = doc.group(&[a, b]).unwrap();

        let replacement = Shape::Rectangle(Rectangle::new(
            CanvasPoint::new(0, 0),
            CanvasPoint::new(10, 10),
            "red".to_string(),
            CornerStyle::Rounded,
        ));
        let new_id = replacement.id();
        let old = doc.replace_shape(a, replacement).unwrap();

        assert_eq!(old.id(), a);
        assert_eq!(doc.order(), &[new_id, b, c]);
        assert_eq!(stack(&doc, new_id), vec![g]);
        assert!(doc.get_group(g).unwrap().contains(new_id));
        assert!(!doc.contains(a));

        let missing = Shape::Line(Line::new(CanvasPoint::new(0, 0), CanvasPoint::new(1, 1), "x".into()));
        assert!(doc.replace_shape(a, missing).is_err());
    }
}
