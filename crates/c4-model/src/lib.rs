//! C4 Model Types
//!
//! This crate provides the plain data containers that describe an
//! architecture model and the views onto it. It includes:
//!
//! - **Elements**: people, software systems, containers, components,
//!   deployment nodes and container instances ([`element`] module)
//! - **Relationships**: directed, described links between elements
//!   ([`relationship`] module)
//! - **Views**: the per-diagram selection of elements and relationships
//!   ([`view`] module)
//! - **Model / Workspace**: the owning stores ([`model`] module)
//! - **Hierarchy**: a parent-to-children index used for tree traversal
//!   ([`hierarchy`] module)
//!
//! All types implement [`serde::Deserialize`] so a complete workspace can be
//! loaded from an external description.

pub mod element;
pub mod hierarchy;
pub mod model;
pub mod relationship;
pub mod view;

pub use element::{Element, ElementId, ElementKind, Location};
pub use hierarchy::Hierarchy;
pub use model::{Enterprise, Model, Workspace};
pub use relationship::{Direction, Relationship, RelationshipId};
pub use view::{RelationshipView, View, ViewKind};
