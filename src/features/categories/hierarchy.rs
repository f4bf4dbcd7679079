//! Two-level category hierarchy and the deletion-safety rule.
//!
//! The store allows arbitrary nesting through `parent_id`, but the admin
//! only ever exposes roots and their direct children. Everything here is
//! pure so the API and the admin client agree on the same rules.

use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Anything that sits in the category hierarchy
pub trait CategoryNode {
    fn id(&self) -> Uuid;
    fn parent_id(&self) -> Option<Uuid>;

    fn is_root(&self) -> bool {
        self.parent_id().is_none()
    }
}

/// Why a category cannot be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DeleteBlocker {
    HasProducts,
    HasSubcategories,
}

impl DeleteBlocker {
    pub fn reason(&self) -> &'static str {
        match self {
            DeleteBlocker::HasProducts => "Cannot delete category with products.",
            DeleteBlocker::HasSubcategories => "Cannot delete category with subcategories.",
        }
    }
}

/// Outcome of checking a category against the deletion rule.
///
/// Each blocking condition is reported on its own, so both reasons show up
/// when a category has products and subcategories at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteGate {
    blockers: Vec<DeleteBlocker>,
}

impl DeleteGate {
    pub fn evaluate(product_count: i64, child_count: usize) -> Self {
        let mut blockers = Vec::new();
        if product_count > 0 {
            blockers.push(DeleteBlocker::HasProducts);
        }
        if child_count > 0 {
            blockers.push(DeleteBlocker::HasSubcategories);
        }
        Self { blockers }
    }

    pub fn is_deletable(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn blockers(&self) -> &[DeleteBlocker] {
        &self.blockers
    }

    pub fn reasons(&self) -> Vec<&'static str> {
        self.blockers.iter().map(DeleteBlocker::reason).collect()
    }

    /// All reasons joined into one message, or `None` when deletable
    pub fn message(&self) -> Option<String> {
        if self.is_deletable() {
            None
        } else {
            Some(self.reasons().join(" "))
        }
    }
}

/// Why a parent cannot be assigned to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRejection {
    OwnParent,
    ParentMissing,
    ParentNotRoot,
    HasSubcategories,
}

impl ParentRejection {
    pub fn message(&self) -> &'static str {
        match self {
            ParentRejection::OwnParent => "A category cannot be its own parent",
            ParentRejection::ParentMissing => "Parent category not found",
            ParentRejection::ParentNotRoot => "Parent must be a top-level category",
            ParentRejection::HasSubcategories => {
                "A category with subcategories cannot become a subcategory"
            }
        }
    }
}

/// Check that giving `editing` (or a new category) the parent `parent_id`
/// keeps the tree two levels deep.
///
/// `parent_of_parent` is `None` when the parent does not exist and
/// `Some(None)` when it is a root. `editing_children` counts the direct
/// children of the category being edited.
pub fn check_parent_assignment(
    editing: Option<Uuid>,
    parent_id: Uuid,
    parent_of_parent: Option<Option<Uuid>>,
    editing_children: i64,
) -> Result<(), ParentRejection> {
    if editing == Some(parent_id) {
        return Err(ParentRejection::OwnParent);
    }
    match parent_of_parent {
        None => return Err(ParentRejection::ParentMissing),
        Some(Some(_)) => return Err(ParentRejection::ParentNotRoot),
        Some(None) => {}
    }
    if editing.is_some() && editing_children > 0 {
        return Err(ParentRejection::HasSubcategories);
    }
    Ok(())
}

/// A root category with its direct children
#[derive(Debug)]
pub struct CategoryGroup<'a, T> {
    pub root: &'a T,
    pub children: Vec<&'a T>,
}

/// Partition a flat list into roots and their direct children.
///
/// Input order is kept for roots and for children within a root. Categories
/// whose parent is not a root (or is missing) belong to no group.
pub fn group_two_levels<T: CategoryNode>(categories: &[T]) -> Vec<CategoryGroup<'_, T>> {
    let mut groups: Vec<CategoryGroup<'_, T>> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for category in categories.iter().filter(|c| c.is_root()) {
        index.insert(category.id(), groups.len());
        groups.push(CategoryGroup {
            root: category,
            children: Vec::new(),
        });
    }

    for category in categories {
        if let Some(&slot) = category.parent_id().and_then(|p| index.get(&p)) {
            groups[slot].children.push(category);
        }
    }

    groups
}

/// Categories that may be chosen as parent: roots only, never the one being edited
pub fn parent_candidates<T: CategoryNode>(categories: &[T], editing: Option<Uuid>) -> Vec<&T> {
    categories
        .iter()
        .filter(|c| c.is_root() && Some(c.id()) != editing)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        id: Uuid,
        parent: Option<Uuid>,
    }

    impl CategoryNode for Node {
        fn id(&self) -> Uuid {
            self.id
        }
        fn parent_id(&self) -> Option<Uuid> {
            self.parent
        }
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn node(n: u128, parent: Option<u128>) -> Node {
        Node {
            id: id(n),
            parent: parent.map(id),
        }
    }

    #[test]
    fn test_delete_gate() {
        assert!(DeleteGate::evaluate(0, 0).is_deletable());
        assert_eq!(DeleteGate::evaluate(0, 0).message(), None);

        let with_products = DeleteGate::evaluate(3, 0);
        assert!(!with_products.is_deletable());
        assert_eq!(with_products.blockers(), &[DeleteBlocker::HasProducts]);

        let with_child = DeleteGate::evaluate(0, 1);
        assert!(!with_child.is_deletable());
        assert_eq!(with_child.blockers(), &[DeleteBlocker::HasSubcategories]);
    }

    #[test]
    fn test_delete_gate_reports_both_reasons() {
        let gate = DeleteGate::evaluate(2, 4);
        assert_eq!(
            gate.reasons(),
            vec![
                "Cannot delete category with products.",
                "Cannot delete category with subcategories."
            ]
        );
        assert_eq!(
            gate.message().unwrap(),
            "Cannot delete category with products. Cannot delete category with subcategories."
        );
    }

    #[test]
    fn test_parent_assignment_rules() {
        let root = Some(None);

        assert_eq!(check_parent_assignment(None, id(1), root, 0), Ok(()));
        assert_eq!(check_parent_assignment(Some(id(2)), id(1), root, 0), Ok(()));

        assert_eq!(
            check_parent_assignment(Some(id(1)), id(1), root, 0),
            Err(ParentRejection::OwnParent)
        );
        assert_eq!(
            check_parent_assignment(None, id(9), None, 0),
            Err(ParentRejection::ParentMissing)
        );
        assert_eq!(
            check_parent_assignment(None, id(2), Some(Some(id(1))), 0),
            Err(ParentRejection::ParentNotRoot)
        );
        assert_eq!(
            check_parent_assignment(Some(id(3)), id(1), root, 2),
            Err(ParentRejection::HasSubcategories)
        );
    }

    #[test]
    fn test_children_count_ignored_on_create() {
        assert_eq!(check_parent_assignment(None, id(1), Some(None), 5), Ok(()));
    }

    #[test]
    fn test_group_two_levels() {
        let categories = vec![node(1, None), node(2, Some(1)), node(3, None)];
        let groups = group_two_levels(&categories);

        let roots: Vec<Uuid> = groups.iter().map(|g| g.root.id).collect();
        assert_eq!(roots, vec![id(1), id(3)]);

        let children_of_1: Vec<Uuid> = groups[0].children.iter().map(|c| c.id).collect();
        assert_eq!(children_of_1, vec![id(2)]);
        assert!(groups[1].children.is_empty());
    }

    #[test]
    fn test_group_two_levels_ignores_deeper_and_orphaned_nodes() {
        // 4 is a grandchild of 1; 5 points at a category that does not exist
        let categories = vec![
            node(2, Some(1)),
            node(1, None),
            node(4, Some(2)),
            node(5, Some(99)),
            node(6, Some(1)),
        ];
        let groups = group_two_levels(&categories);

        assert_eq!(groups.len(), 1);
        let children: Vec<Uuid> = groups[0].children.iter().map(|c| c.id).collect();
        assert_eq!(children, vec![id(2), id(6)]);
    }

    #[test]
    fn test_parent_candidates_exclude_self_and_children() {
        let categories = vec![node(1, None), node(2, Some(1)), node(3, None)];

        let for_new: Vec<Uuid> = parent_candidates(&categories, None)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(for_new, vec![id(1), id(3)]);

        let for_edit: Vec<Uuid> = parent_candidates(&categories, Some(id(1)))
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(for_edit, vec![id(3)]);
    }
}
