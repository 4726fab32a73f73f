//! Groups of shapes.
//!
//! A group does not own its shapes. Membership is recorded twice: the group lists its
//! member ids, and every member carries the group on its own membership stack. Nested
//! groups arise when a selection already containing grouped shapes is grouped again.

use super::ShapeId;
use uuid::Uuid;

/// Unique identifier for groups.
pub type GroupId = Uuid;

/// A set of shapes that are selected and manipulated together.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) id: GroupId,
    /// Every shape added to this group, in insertion order.
    members: Vec<ShapeId>,
    /// Members that were not in any group when this group was formed.
    direct_shapes: Vec<ShapeId>,
    /// Distinct innermost groups of the members that were already grouped.
    sub_groups: Vec<GroupId>,
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Group {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            members: Vec::new(),
            direct_shapes: Vec::new(),
            sub_groups: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Add a shape, given the innermost group it belonged to before joining.
    pub fn add_shape(&mut self, shape: ShapeId, innermost: Option<GroupId>) {
        if self.members.contains(&shape) {
            return;
        }
        self.members.push(shape);
        match innermost {
            Some(group) => {
                if !self.sub_groups.contains(&group) {
                    self.sub_groups.push(group);
                }
            }
            None => self.direct_shapes.push(shape),
        }
    }

    /// Remove a shape. Returns false if it was not a member.
    pub fn remove_shape(&mut self, shape: ShapeId) -> bool {
        let before = self.members.len();
        self.members.retain(|&id| id != shape);
        self.direct_shapes.retain(|&id| id != shape);
        self.members.len() != before
    }

    /// Swap a member for another shape, keeping its position.
    pub fn replace_shape(&mut self, old: ShapeId, new: ShapeId) {
        for id in self.members.iter_mut().chain(self.direct_shapes.iter_mut()) {
            if *id == old {
                *id = new;
            }
        }
    }

    pub fn contains(&self, shape: ShapeId) -> bool {
        self.members.contains(&shape)
    }

    pub fn members(&self) -> &[ShapeId] {
        &self.members
    }

    pub fn direct_shapes(&self) -> &[ShapeId] {
        &self.direct_shapes
    }

    pub fn sub_groups(&self) -> &[GroupId] {
        &self.sub_groups
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_partitions_members() {
        let inner = Uuid::new_v4();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut group = Group::new();
        group.add_shape(a, None);
        group.add_shape(b, Some(inner));
        group.add_shape(c, Some(inner));

        assert_eq!(group.members(), &[a, b, c]);
        assert_eq!(group.direct_shapes(), &[a]);
        // The shared inner group is only recorded once.
        assert_eq!(group.sub_groups(), &[inner]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let a = Uuid::new_v4();
        let mut group = Group::new();
        group.add_shape(a, None);
        group.add_shape(a, None);
        assert_eq!(group.len(), 1);
        assert_eq!(group.direct_shapes().len(), 1);
    }

    #[test]
    fn test_remove_shape() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut group = Group::new();
        group.add_shape(a, None);
        group.add_shape(b, None);

        assert!(group.remove_shape(a));
        assert!(!group.remove_shape(a));
        assert_eq!(group.members(), &[b]);
        assert_eq!(group.direct_shapes(), &[b]);

        assert!(group.remove_shape(b));
        assert!(group.is_empty());
    }

    #[test]
    fn test_replace_shape() {
        let (a, b, fresh) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut group = Group::new();
        group.add_shape(a, None);
        group.add_shape(b, None);

        group.replace_shape(a, fresh);
        assert_eq!(group.members(), &[fresh, b]);
        assert!(group.contains(fresh));
        assert!(!group.contains(a));
    }
}
