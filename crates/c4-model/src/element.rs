//! Architecture model elements.
//!
//! An [`Element`] couples the attributes every element shares (identity,
//! name, description, parent link) with an [`ElementKind`] carrying the
//! attributes that only make sense for one kind of element.
//!
//! # Example
//!
//! ```
//! use c4_model::Element;
//!
//! let system = Element::software_system("banking", "Internet Banking");
//! let api = Element::container("api", "API Application", "banking")
//!     .with_technology("Rust, axum")
//!     .with_description("Provides banking functionality via JSON/HTTPS");
//!
//! assert_eq!(api.parent().map(|id| id.as_str()), Some("banking"));
//! assert_eq!(api.technology(), Some("Rust, axum"));
//! assert!(!system.is_external());
//! ```

use std::{borrow::Borrow, fmt};

use serde::Deserialize;

/// Stable identity of an element inside a model.
///
/// Identities are opaque strings; two elements are the same element exactly
/// when their identities are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether a person or software system sits inside or outside the enterprise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Internal,
    External,
}

/// The closed set of element kinds together with their kind-specific data.
///
/// Technology strings are empty when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    Person {
        #[serde(default)]
        location: Location,
    },
    SoftwareSystem {
        #[serde(default)]
        location: Location,
    },
    Container {
        #[serde(default)]
        technology: String,
        #[serde(default)]
        database: bool,
    },
    Component {
        #[serde(default)]
        technology: String,
        #[serde(default)]
        database: bool,
    },
    DeploymentNode {
        #[serde(default)]
        technology: String,
        #[serde(default = "default_instances")]
        instances: u32,
    },
    /// A deployed copy of a container; `container` points at the container
    /// it stands for.
    ContainerInstance { container: ElementId },
}

fn default_instances() -> u32 {
    1
}

impl ElementKind {
    /// Returns the name of the kind, e.g. `"SoftwareSystem"`.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Person { .. } => "Person",
            ElementKind::SoftwareSystem { .. } => "SoftwareSystem",
            ElementKind::Container { .. } => "Container",
            ElementKind::Component { .. } => "Component",
            ElementKind::DeploymentNode { .. } => "DeploymentNode",
            ElementKind::ContainerInstance { .. } => "ContainerInstance",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single element of an architecture model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Element {
    id: ElementId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parent: Option<ElementId>,
    #[serde(flatten)]
    kind: ElementKind,
}

impl Element {
    /// Creates an element of the given kind without description or parent.
    pub fn new(id: impl Into<ElementId>, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            parent: None,
            kind,
        }
    }

    /// Creates an internal person.
    pub fn person(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            ElementKind::Person {
                location: Location::Internal,
            },
        )
    }

    /// Creates an internal software system.
    pub fn software_system(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            ElementKind::SoftwareSystem {
                location: Location::Internal,
            },
        )
    }

    /// Creates a container owned by the software system `system`.
    pub fn container(
        id: impl Into<ElementId>,
        name: impl Into<String>,
        system: impl Into<ElementId>,
    ) -> Self {
        Self::new(
            id,
            name,
            ElementKind::Container {
                technology: String::new(),
                database: false,
            },
        )
        .with_parent(system)
    }

    /// Creates a component owned by the container `container`.
    pub fn component(
        id: impl Into<ElementId>,
        name: impl Into<String>,
        container: impl Into<ElementId>,
    ) -> Self {
        Self::new(
            id,
            name,
            ElementKind::Component {
                technology: String::new(),
                database: false,
            },
        )
        .with_parent(container)
    }

    /// Creates a top-level deployment node with a single instance.
    pub fn deployment_node(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            ElementKind::DeploymentNode {
                technology: String::new(),
                instances: 1,
            },
        )
    }

    /// Creates an instance of `container` deployed on the node `node`.
    pub fn container_instance(
        id: impl Into<ElementId>,
        name: impl Into<String>,
        container: impl Into<ElementId>,
        node: impl Into<ElementId>,
    ) -> Self {
        Self::new(
            id,
            name,
            ElementKind::ContainerInstance {
                container: container.into(),
            },
        )
        .with_parent(node)
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the parent element (builder style).
    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the technology (builder style).
    ///
    /// Ignored for kinds that carry no technology.
    pub fn with_technology(mut self, value: impl Into<String>) -> Self {
        match &mut self.kind {
            ElementKind::Container { technology, .. }
            | ElementKind::Component { technology, .. }
            | ElementKind::DeploymentNode { technology, .. } => *technology = value.into(),
            ElementKind::Person { .. }
            | ElementKind::SoftwareSystem { .. }
            | ElementKind::ContainerInstance { .. } => {}
        }
        self
    }

    /// Marks a person or software system as external (builder style).
    pub fn external(mut self) -> Self {
        if let ElementKind::Person { location } | ElementKind::SoftwareSystem { location } =
            &mut self.kind
        {
            *location = Location::External;
        }
        self
    }

    /// Marks a container or component as a data store (builder style).
    pub fn database(mut self) -> Self {
        if let ElementKind::Container { database, .. } | ElementKind::Component { database, .. } =
            &mut self.kind
        {
            *database = true;
        }
        self
    }

    /// Sets the instance count of a deployment node (builder style).
    pub fn with_instances(mut self, count: u32) -> Self {
        if let ElementKind::DeploymentNode { instances, .. } = &mut self.kind {
            *instances = count;
        }
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> Option<&ElementId> {
        self.parent.as_ref()
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Returns the technology, or `None` when the kind has none or it is blank.
    pub fn technology(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Container { technology, .. }
            | ElementKind::Component { technology, .. }
            | ElementKind::DeploymentNode { technology, .. } => {
                Some(technology.as_str()).filter(|t| !t.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Returns `true` for people and software systems located outside the enterprise.
    pub fn is_external(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Person {
                location: Location::External
            } | ElementKind::SoftwareSystem {
                location: Location::External
            }
        )
    }

    /// Returns `true` for containers and components flagged as data stores.
    pub fn is_database(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Container { database: true, .. }
                | ElementKind::Component { database: true, .. }
        )
    }

    /// Returns the instance count of a deployment node, `None` for other kinds.
    pub fn instances(&self) -> Option<u32> {
        match self.kind {
            ElementKind::DeploymentNode { instances, .. } => Some(instances),
            _ => None,
        }
    }

    /// Returns the container a container instance stands for.
    pub fn represented_container(&self) -> Option<&ElementId> {
        match &self.kind {
            ElementKind::ContainerInstance { container } => Some(container),
            _ => None,
        }
    }
}
