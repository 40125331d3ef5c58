//! Relationships between model elements.

use std::{borrow::Borrow, fmt};

use serde::Deserialize;

use crate::element::ElementId;

/// Stable identity of a relationship inside a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(String);

impl RelationshipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RelationshipId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelationshipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RelationshipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Layout hint telling the renderer which way a relationship should point.
///
/// Both spellings of "neighbor" are accepted when parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    None,
    Back,
    #[serde(alias = "neighbour")]
    Neighbor,
    #[serde(alias = "back-neighbour")]
    BackNeighbor,
    Up,
    Down,
    Left,
    Right,
}

/// A directed link from a source element to a destination element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relationship {
    id: RelationshipId,
    source: ElementId,
    destination: ElementId,
    #[serde(default)]
    description: String,
    #[serde(default)]
    technology: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    direction: Direction,
}

impl Relationship {
    /// Creates an undescribed relationship between two elements.
    pub fn new(
        id: impl Into<RelationshipId>,
        source: impl Into<ElementId>,
        destination: impl Into<ElementId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            destination: destination.into(),
            description: String::new(),
            technology: String::new(),
            tags: Vec::new(),
            direction: Direction::None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn id(&self) -> &RelationshipId {
        &self.id
    }

    pub fn source(&self) -> &ElementId {
        &self.source
    }

    pub fn destination(&self) -> &ElementId {
        &self.destination
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the technology, or `None` when it is blank.
    pub fn technology(&self) -> Option<&str> {
        Some(self.technology.as_str()).filter(|t| !t.trim().is_empty())
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_technology_is_none() {
        let rel = Relationship::new("r", "a", "b").with_technology(" ");
        assert_eq!(rel.technology(), None);
        assert_eq!(
            rel.with_technology("HTTPS").technology(),
            Some("HTTPS")
        );
    }

    #[test]
    fn test_builder_sets_fields() {
        let rel = Relationship::new("r1", "web", "api")
            .with_description("Calls")
            .with_tag("sync")
            .with_direction(Direction::Right);

        assert_eq!(rel.source(), &ElementId::new("web"));
        assert_eq!(rel.destination(), &ElementId::new("api"));
        assert_eq!(rel.description(), "Calls");
        assert_eq!(rel.tags(), ["sync".to_string()]);
        assert_eq!(rel.direction(), Direction::Right);
    }
}
