//! Relationship rendering.
//!
//! Each relationship of a view becomes one `Rel*` macro call. The layout
//! hint of the relationship selects the macro variant:
//!
//! | Direction | Macro |
//! |-----------|-------|
//! | none | `Rel` |
//! | back | `Rel_Back` |
//! | neighbor | `Rel_Neighbor` |
//! | back-neighbor | `Rel_Back_Neighbor` |
//! | up / down / left / right | `Rel_Up` / `Rel_Down` / `Rel_Left` / `Rel_Right` |

use log::{debug, trace};

use c4_model::{Direction, Model, Relationship, RelationshipView};

use crate::{
    output::Output,
    text::{alias, escape},
};

/// How the relationships of a view are ordered and labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipOrdering {
    /// Sorted by source name followed by destination name.
    Static,
    /// Sorted by the per-view step number, which prefixes each label.
    Dynamic,
}

/// Returns the macro for a layout hint.
pub fn macro_name(direction: Direction) -> &'static str {
    match direction {
        Direction::None => "Rel",
        Direction::Back => "Rel_Back",
        Direction::Neighbor => "Rel_Neighbor",
        Direction::BackNeighbor => "Rel_Back_Neighbor",
        Direction::Up => "Rel_Up",
        Direction::Down => "Rel_Down",
        Direction::Left => "Rel_Left",
        Direction::Right => "Rel_Right",
    }
}

/// Renders the relationships of one view.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipRenderer<'a> {
    model: &'a Model,
}

impl<'a> RelationshipRenderer<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Writes one line per relationship view in the order `ordering` defines.
    ///
    /// Relationship views that refer to an unknown relationship are skipped.
    pub fn render_all(
        &self,
        views: &[RelationshipView],
        ordering: RelationshipOrdering,
        output: &mut Output,
    ) {
        let mut resolved: Vec<(&RelationshipView, &Relationship)> = views
            .iter()
            .filter_map(|rv| match self.model.relationship(rv.relationship().as_str()) {
                Some(relationship) => Some((rv, relationship)),
                None => {
                    debug!(relationship = rv.relationship().as_str(); "Skipping unknown relationship");
                    None
                }
            })
            .collect();

        match ordering {
            RelationshipOrdering::Static => {
                resolved.sort_by_cached_key(|(_, relationship)| {
                    format!(
                        "{}{}",
                        self.endpoint_name(relationship.source().as_str()),
                        self.endpoint_name(relationship.destination().as_str())
                    )
                });
                for (_, relationship) in resolved {
                    output.line(0, &self.render(relationship, relationship.description()));
                }
            }
            RelationshipOrdering::Dynamic => {
                // Unnumbered steps go last.
                resolved.sort_by_key(|(rv, _)| (rv.order().is_none(), rv.order()));
                for (rv, relationship) in resolved {
                    let description = rv.description().unwrap_or(relationship.description());
                    let label = match rv.order() {
                        Some(order) => format!("{order}: {description}"),
                        None => description.to_string(),
                    };
                    output.line(0, &self.render(relationship, &label));
                }
            }
        }
    }

    /// Renders a single relationship with the given label, without indentation.
    pub fn render(&self, relationship: &Relationship, label: &str) -> String {
        let source = alias(self.endpoint_name(relationship.source().as_str()));
        let destination = alias(self.endpoint_name(relationship.destination().as_str()));
        let name = macro_name(relationship.direction());
        trace!(relationship = relationship.id().as_str(), macro_name = name; "Rendering relationship");

        match relationship.technology() {
            Some(technology) => format!(
                "{name}({source}, {destination}, \"{}\", \"{}\")",
                escape(label),
                escape(technology)
            ),
            None => format!("{name}({source}, {destination}, \"{}\")", escape(label)),
        }
    }

    /// Name of an endpoint; unknown endpoints fall back to their identity.
    fn endpoint_name<'b>(&self, id: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.model.element(id).map(|e| e.name()).unwrap_or(id)
    }
}
