//! Parent-to-children index over a [`Model`].
//!
//! Elements only store a link to their parent. [`Hierarchy`] inverts those
//! links once so trees can be walked top-down, and answers bounded ancestor
//! queries bottom-up.

use std::collections::HashMap;

use crate::{
    element::{Element, ElementId},
    model::Model,
};

/// Children of every element, in model insertion order.
#[derive(Debug)]
pub struct Hierarchy<'a> {
    model: &'a Model,
    children: HashMap<&'a ElementId, Vec<&'a Element>>,
}

impl<'a> Hierarchy<'a> {
    /// Builds the index for all elements of `model`.
    pub fn new(model: &'a Model) -> Self {
        let mut children: HashMap<&'a ElementId, Vec<&'a Element>> = HashMap::new();
        for element in model.elements() {
            if let Some(parent) = element.parent() {
                children.entry(parent).or_default().push(element);
            }
        }
        Self { model, children }
    }

    /// Returns the direct children of `id` in insertion order.
    pub fn children(&self, id: &ElementId) -> &[&'a Element] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` when `ancestor` is found among the first `max_depth`
    /// ancestors of `element` (1 = parent, 2 = grandparent, ...).
    ///
    /// The walk stops early at a parent link that points outside the model.
    pub fn is_descendant_of(
        &self,
        element: &Element,
        ancestor: &ElementId,
        max_depth: usize,
    ) -> bool {
        let mut current = element.parent();
        for _ in 0..max_depth {
            let Some(parent_id) = current else {
                return false;
            };
            if parent_id == ancestor {
                return true;
            }
            current = self
                .model
                .element(parent_id.as_str())
                .and_then(Element::parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_model() -> Model {
        let mut model = Model::new();
        model.add_element(Element::software_system("sys", "System"));
        model.add_element(Element::container("web", "Web", "sys"));
        model.add_element(Element::container("api", "API", "sys"));
        model.add_element(Element::component("ctrl", "Controller", "api"));
        model.add_element(Element::component("helper", "Helper", "ctrl"));
        model.add_element(Element::component("deep", "Deep", "helper"));
        model
    }

    #[test]
    fn test_children_in_insertion_order() {
        let model = nested_model();
        let hierarchy = Hierarchy::new(&model);

        let names: Vec<_> = hierarchy
            .children(&ElementId::new("sys"))
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, ["Web", "API"]);
        assert!(hierarchy.children(&ElementId::new("web")).is_empty());
    }

    #[test]
    fn test_is_descendant_of_respects_depth() {
        let model = nested_model();
        let hierarchy = Hierarchy::new(&model);
        let sys = ElementId::new("sys");

        let helper = model.element("helper").expect("helper exists");
        assert!(hierarchy.is_descendant_of(helper, &sys, 3));
        assert!(!hierarchy.is_descendant_of(helper, &sys, 2));

        let deep = model.element("deep").expect("deep exists");
        assert!(!hierarchy.is_descendant_of(deep, &sys, 3));
        assert!(hierarchy.is_descendant_of(deep, &sys, 4));
    }

    #[test]
    fn test_is_descendant_of_stops_at_dangling_parent() {
        let mut model = Model::new();
        model.add_element(Element::container("orphan", "Orphan", "gone"));
        let hierarchy = Hierarchy::new(&model);

        let orphan = model.element("orphan").expect("orphan exists");
        assert!(hierarchy.is_descendant_of(orphan, &ElementId::new("gone"), 1));
        assert!(!hierarchy.is_descendant_of(orphan, &ElementId::new("other"), 3));
    }
}
