//! Deployment tree walk.
//!
//! Deployment nodes nest: a data centre holds clusters, a cluster holds
//! servers, a server runs container instances. The walk writes each node as a
//! frame, descends into its child nodes (sorted by name), lists the node's
//! container instances (in model order), and closes the frame.

use log::trace;

use c4_model::{Element, ElementKind, Hierarchy};

use crate::{
    C4Error,
    boundary::sort_by_name,
    element::{BOUNDARY_CLOSE, ElementRenderer},
    output::Output,
};

/// Walks deployment trees, writing frames and instances depth-first.
pub struct DeploymentWalker<'r, 'a> {
    hierarchy: &'r Hierarchy<'a>,
    elements: ElementRenderer<'a>,
}

impl<'r, 'a> DeploymentWalker<'r, 'a> {
    pub fn new(hierarchy: &'r Hierarchy<'a>, elements: ElementRenderer<'a>) -> Self {
        Self {
            hierarchy,
            elements,
        }
    }

    /// Writes every tree rooted at `roots`, in the given order.
    ///
    /// # Errors
    ///
    /// Propagates [`C4Error::UnsupportedElementKind`] from the element renderer.
    pub fn walk(&self, roots: &[&'a Element], output: &mut Output) -> Result<(), C4Error> {
        for root in roots {
            self.walk_node(root, 0, output)?;
        }
        Ok(())
    }

    fn walk_node(&self, node: &'a Element, depth: usize, output: &mut Output) -> Result<(), C4Error> {
        trace!(node = node.id().as_str(), depth; "Entering deployment node");
        output.line(depth, &self.elements.boundary(node)?);

        let children = self.hierarchy.children(node.id());

        let mut child_nodes: Vec<&'a Element> = children
            .iter()
            .copied()
            .filter(|child| matches!(child.kind(), ElementKind::DeploymentNode { .. }))
            .collect();
        sort_by_name(&mut child_nodes);
        for child in child_nodes {
            self.walk_node(child, depth + 1, output)?;
        }

        for instance in children
            .iter()
            .filter(|child| matches!(child.kind(), ElementKind::ContainerInstance { .. }))
        {
            output.line(depth + 1, &self.elements.leaf(instance)?);
        }

        output.line(depth, BOUNDARY_CLOSE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use c4_model::Model;

    use super::*;

    fn render(model: &Model, root_ids: &[&str]) -> Result<String, C4Error> {
        let hierarchy = Hierarchy::new(model);
        let walker = DeploymentWalker::new(&hierarchy, ElementRenderer::new(model));
        let roots: Vec<_> = root_ids
            .iter()
            .filter_map(|id| model.element(id))
            .collect();

        let mut output = Output::new();
        walker.walk(&roots, &mut output)?;
        Ok(output.into_string())
    }

    #[test]
    fn test_nested_nodes_with_instance() {
        let mut model = Model::new();
        model.add_element(Element::software_system("bank", "Bank"));
        model.add_element(Element::container("api", "API", "bank").with_technology("Rust"));
        model.add_element(Element::deployment_node("a", "A"));
        model.add_element(Element::deployment_node("b", "B").with_parent("a"));
        model.add_element(Element::container_instance("i", "API Instance", "api", "b"));

        let text = render(&model, &["a"]).unwrap();
        assert_eq!(
            text,
            concat!(
                "Deployment_Node(A, \"A\") {\n",
                "  Deployment_Node(B, \"B\") {\n",
                "    ContainerInstance(APIInstance, \"API\", \"Rust\")\n",
                "  }\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_children_sorted_and_instances_after_children() {
        let mut model = Model::new();
        model.add_element(Element::software_system("bank", "Bank"));
        model.add_element(Element::container("web", "Web", "bank"));
        model.add_element(Element::container("api", "API", "bank"));
        model.add_element(Element::deployment_node("dc", "Data Centre"));
        model.add_element(Element::container_instance("i2", "Web 1", "web", "dc"));
        model.add_element(Element::deployment_node("z", "Zulu").with_parent("dc"));
        model.add_element(Element::container_instance("i1", "API 1", "api", "dc"));
        model.add_element(Element::deployment_node("y", "Yankee").with_parent("dc"));

        let text = render(&model, &["dc"]).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Deployment_Node(DataCentre, \"Data Centre\") {",
                "  Deployment_Node(Yankee, \"Yankee\") {",
                "  }",
                "  Deployment_Node(Zulu, \"Zulu\") {",
                "  }",
                "  ContainerInstance(Web1, \"Web\")",
                "  ContainerInstance(API1, \"API\")",
                "}",
            ]
        );
    }

    #[test]
    fn test_multiple_roots_in_given_order() {
        let mut model = Model::new();
        model.add_element(Element::deployment_node("p", "Production"));
        model.add_element(Element::deployment_node("d", "Development"));

        let text = render(&model, &["d", "p"]).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Deployment_Node(Development, \"Development\") {",
                "}",
                "Deployment_Node(Production, \"Production\") {",
                "}",
            ]
        );
    }
}
