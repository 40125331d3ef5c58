//! Element rendering.
//!
//! Every element is written either as a leaf macro call on a single line or
//! as the opening line of a boundary frame. Closing a frame is the caller's
//! job ([`BOUNDARY_CLOSE`]).
//!
//! | Kind | Leaf | Boundary |
//! |------|------|----------|
//! | Person | `Person[_Ext]` | - |
//! | SoftwareSystem | `System[_Ext]` | `System_Boundary` |
//! | Container | `Container[Db]` | `Container_Boundary` |
//! | Component | `Component[Db]` | - |
//! | DeploymentNode | - | `Deployment_Node` |
//! | ContainerInstance | `ContainerInstance[Db]` | - |

use std::fmt;

use log::debug;

use c4_model::{Element, ElementKind, Model};

use crate::{
    C4Error,
    text::{alias, block_text, escape},
};

/// Closing line of every boundary frame.
pub const BOUNDARY_CLOSE: &str = "}";

/// Frame technology longer than this is wrapped.
const TECHNOLOGY_WRAP_WIDTH: usize = 30;

/// Line break PlantUML honours inside a boundary title.
const TECHNOLOGY_LINE_BREAK: &str = "</size>\\n<size:TECHN_FONT_SIZE>";

/// How an element is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    /// A single node.
    Leaf,
    /// The opening line of a frame that encloses other elements.
    Boundary,
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderContext::Leaf => write!(f, "leaf element"),
            RenderContext::Boundary => write!(f, "boundary"),
        }
    }
}

/// Renders single elements of one model.
///
/// The model is needed to resolve the container behind a container instance.
#[derive(Debug, Clone, Copy)]
pub struct ElementRenderer<'a> {
    model: &'a Model,
}

impl<'a> ElementRenderer<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Renders `element` as a leaf node, without indentation.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::UnsupportedElementKind`] for deployment nodes, which
    /// are only ever drawn as boundaries.
    pub fn leaf(&self, element: &Element) -> Result<String, C4Error> {
        let alias = alias(element.name());
        let line = match element.kind() {
            ElementKind::Person { .. } => {
                let name = decorate("Person", false, element.is_external());
                macro_call(&name, &alias, element.name(), None, element.description())
            }
            ElementKind::SoftwareSystem { .. } => {
                let name = decorate("System", false, element.is_external());
                macro_call(&name, &alias, element.name(), None, element.description())
            }
            ElementKind::Container { .. } | ElementKind::Component { .. } => {
                let base = if matches!(element.kind(), ElementKind::Container { .. }) {
                    "Container"
                } else {
                    "Component"
                };
                let name = decorate(base, element.is_database(), false);
                macro_call(
                    &name,
                    &alias,
                    element.name(),
                    Some(element.technology().unwrap_or_default()),
                    element.description(),
                )
            }
            ElementKind::ContainerInstance { .. } => {
                // An instance is drawn as the container it stands for, under its own alias.
                let container = element.represented_container();
                let proxy = match container.and_then(|id| self.model.element(id.as_str())) {
                    Some(proxy) => proxy,
                    None => {
                        debug!(
                            instance = element.id().as_str(),
                            container:? = container;
                            "Container instance refers to an unknown container"
                        );
                        element
                    }
                };
                let name = decorate("ContainerInstance", proxy.is_database(), false);
                macro_call(
                    &name,
                    &alias,
                    proxy.name(),
                    Some(proxy.technology().unwrap_or_default()),
                    proxy.description(),
                )
            }
            ElementKind::DeploymentNode { .. } => {
                return Err(C4Error::UnsupportedElementKind {
                    kind: element.kind().name(),
                    context: RenderContext::Leaf,
                });
            }
        };
        Ok(line)
    }

    /// Renders the opening line of a boundary frame around `element`,
    /// without indentation.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::UnsupportedElementKind`] for people, components and
    /// container instances, which cannot enclose other elements.
    pub fn boundary(&self, element: &Element) -> Result<String, C4Error> {
        let alias = alias(element.name());
        let line = match element.kind() {
            ElementKind::SoftwareSystem { .. } => {
                boundary_call("System_Boundary", &alias, element.name(), None)
            }
            ElementKind::Container { .. } => {
                boundary_call("Container_Boundary", &alias, element.name(), None)
            }
            ElementKind::DeploymentNode { .. } => {
                let title = match element.instances() {
                    Some(instances) if instances > 1 => {
                        format!("{} (x{instances})", element.name())
                    }
                    _ => element.name().to_string(),
                };
                let technology = element.technology().map(wrap_technology);
                boundary_call("Deployment_Node", &alias, &title, technology.as_deref())
            }
            ElementKind::Person { .. }
            | ElementKind::Component { .. }
            | ElementKind::ContainerInstance { .. } => {
                return Err(C4Error::UnsupportedElementKind {
                    kind: element.kind().name(),
                    context: RenderContext::Boundary,
                });
            }
        };
        Ok(line)
    }
}

/// Renders the opening line of the enterprise frame.
pub fn enterprise_boundary(name: &str) -> String {
    boundary_call("Enterprise_Boundary", &alias(name), name, None)
}

/// Appends the data-store and external suffixes to a base macro name.
fn decorate(base: &str, database: bool, external: bool) -> String {
    let mut name = base.to_string();
    if database {
        name.push_str("Db");
    }
    if external {
        name.push_str("_Ext");
    }
    name
}

/// Formats a leaf macro call.
///
/// `technology` is `Some` for kinds whose macro has a technology parameter.
/// Trailing blank arguments are dropped; a blank technology is still written
/// when a description follows so arguments keep their positions.
fn macro_call(
    name: &str,
    alias: &str,
    title: &str,
    technology: Option<&str>,
    description: &str,
) -> String {
    let has_description = !description.trim().is_empty();
    let mut call = format!("{name}({alias}, \"{}\"", escape(title));
    if let Some(technology) = technology {
        if has_description || !technology.trim().is_empty() {
            call.push_str(&format!(", \"{}\"", escape(technology)));
        }
    }
    if has_description {
        call.push_str(&format!(", \"{}\"", escape(description)));
    }
    call.push(')');
    call
}

/// Escapes a deployment node technology, breaking it onto several lines
/// once it grows past [`TECHNOLOGY_WRAP_WIDTH`].
///
/// Each line is escaped on its own so the line break markup between them is
/// written as is.
fn wrap_technology(technology: &str) -> String {
    if technology.chars().count() <= TECHNOLOGY_WRAP_WIDTH {
        return escape(technology);
    }
    block_text(technology, TECHNOLOGY_WRAP_WIDTH, TECHNOLOGY_LINE_BREAK)
        .split(TECHNOLOGY_LINE_BREAK)
        .map(escape)
        .collect::<Vec<_>>()
        .join(TECHNOLOGY_LINE_BREAK)
}

/// Formats the opening line of a frame.
///
/// `technology` is written verbatim and must already be escaped.
fn boundary_call(name: &str, alias: &str, title: &str, technology: Option<&str>) -> String {
    match technology {
        Some(technology) => {
            format!("{name}({alias}, \"{}\", \"{technology}\") {{", escape(title))
        }
        None => format!("{name}({alias}, \"{}\") {{", escape(title)),
    }
}
