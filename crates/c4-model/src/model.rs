//! The model store and the workspace that pairs it with its views.

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use crate::{
    element::{Element, ElementId},
    relationship::{Relationship, RelationshipId},
    view::View,
};

/// The organisation that owns the modelled systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enterprise {
    name: String,
}

impl Enterprise {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Owning store for elements and relationships.
///
/// Elements and relationships keep their insertion order, which is the
/// order traversals fall back to when names tie.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "ModelSource")]
pub struct Model {
    enterprise: Option<Enterprise>,
    elements: IndexMap<ElementId, Element>,
    relationships: IndexMap<RelationshipId, Relationship>,
}

/// Serialized shape of a [`Model`].
#[derive(Deserialize)]
struct ModelSource {
    #[serde(default)]
    enterprise: Option<String>,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl From<ModelSource> for Model {
    fn from(source: ModelSource) -> Self {
        let mut model = Model::new();
        model.enterprise = source.enterprise.map(Enterprise::new);
        for element in source.elements {
            model.add_element(element);
        }
        for relationship in source.relationships {
            model.add_relationship(relationship);
        }
        model
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enterprise name (builder style).
    pub fn with_enterprise(mut self, name: impl Into<String>) -> Self {
        self.enterprise = Some(Enterprise::new(name));
        self
    }

    /// Adds an element; an element with the same identity is replaced in place.
    pub fn add_element(&mut self, element: Element) {
        if let Some(previous) = self.elements.insert(element.id().clone(), element) {
            warn!(element_id = previous.id().as_str(); "Replacing element with duplicate identity");
        }
    }

    /// Adds a relationship; one with the same identity is replaced in place.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        if let Some(previous) = self
            .relationships
            .insert(relationship.id().clone(), relationship)
        {
            warn!(relationship_id = previous.id().as_str(); "Replacing relationship with duplicate identity");
        }
    }

    pub fn enterprise(&self) -> Option<&Enterprise> {
        self.enterprise.as_ref()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Iterates over all elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Iterates over all relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }
}

/// A model together with the views defined on it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    name: String,
    #[serde(default)]
    model: Model,
    #[serde(default)]
    views: Vec<View>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            model,
            views: Vec::new(),
        }
    }

    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Looks a view up by its key.
    pub fn view(&self, key: &str) -> Option<&View> {
        self.views.iter().find(|view| view.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        element::ElementKind,
        relationship::Direction,
        view::ViewKind,
    };

    #[test]
    fn test_add_element_keeps_insertion_order() {
        let mut model = Model::new();
        model.add_element(Element::person("z", "Zed"));
        model.add_element(Element::person("a", "Alice"));

        let names: Vec<_> = model.elements().map(Element::name).collect();
        assert_eq!(names, ["Zed", "Alice"]);
    }

    #[test]
    fn test_add_element_replaces_duplicate_in_place() {
        let mut model = Model::new();
        model.add_element(Element::person("u", "User"));
        model.add_element(Element::person("x", "Other"));
        model.add_element(Element::person("u", "Renamed"));

        let names: Vec<_> = model.elements().map(Element::name).collect();
        assert_eq!(names, ["Renamed", "Other"]);
    }

    #[test]
    fn test_lookup_by_str() {
        let mut model = Model::new().with_enterprise("Big Bank plc");
        model.add_element(Element::software_system("bank", "Banking"));
        model.add_relationship(Relationship::new("r1", "bank", "bank"));

        assert_eq!(model.element("bank").map(Element::name), Some("Banking"));
        assert!(model.element("missing").is_none());
        assert!(model.relationship("r1").is_some());
        assert_eq!(model.enterprise().map(Enterprise::name), Some("Big Bank plc"));
    }

    #[test]
    fn test_workspace_from_toml() {
        let source = r#"
            name = "Big Bank"

            [model]
            enterprise = "Big Bank plc"

            [[model.elements]]
            id = "customer"
            kind = "person"
            name = "Customer"
            location = "external"

            [[model.elements]]
            id = "bank"
            kind = "software_system"
            name = "Internet Banking"

            [[model.elements]]
            id = "db"
            kind = "container"
            name = "Database"
            parent = "bank"
            technology = "PostgreSQL"
            database = true

            [[model.elements]]
            id = "node"
            kind = "deployment_node"
            name = "Server"
            instances = 3

            [[model.relationships]]
            id = "r1"
            source = "customer"
            destination = "bank"
            description = "Uses"
            direction = "neighbour"

            [[views]]
            key = "context"
            kind = "system_context"
            scope = "bank"
            elements = ["customer", "bank"]
            relationships = [{ relationship = "r1" }]
        "#;

        let workspace: Workspace = toml::from_str(source).expect("Failed to parse workspace");
        let model = workspace.model();

        assert_eq!(workspace.name(), "Big Bank");
        assert!(model.element("customer").is_some_and(Element::is_external));
        assert_eq!(
            model.element("db").map(Element::kind),
            Some(&ElementKind::Container {
                technology: "PostgreSQL".to_string(),
                database: true,
            })
        );
        assert_eq!(model.element("node").and_then(Element::instances), Some(3));
        assert_eq!(
            model.relationship("r1").map(Relationship::direction),
            Some(Direction::Neighbor)
        );

        let view = workspace.view("context").expect("view should exist");
        assert_eq!(view.kind(), ViewKind::SystemContext);
        assert_eq!(view.relationships().len(), 1);
        assert!(workspace.view("missing").is_none());
    }
}
