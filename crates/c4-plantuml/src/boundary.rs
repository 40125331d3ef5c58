//! Boundary classification.
//!
//! Decides, per view kind, which elements are drawn at the top level
//! ("outer"), which are nested inside the view's main frame ("inner"), and
//! which frame (if any) is drawn. Component views may add further frames, one
//! per foreign parent container.
//!
//! Deployment views have no frames of their own here; they only yield the
//! roots for the deployment tree walk.

use indexmap::IndexMap;
use log::debug;

use c4_model::{Element, ElementId, ElementKind, Hierarchy, Model, View, ViewKind};

/// How many ancestors of an element a dynamic view inspects when deciding
/// whether the element belongs inside the focal element's frame.
pub const DYNAMIC_BOUNDARY_DEPTH: usize = 3;

/// A frame enclosing nested elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// The enterprise frame, labelled with the enterprise name.
    Enterprise(&'a str),
    /// A frame drawn around a model element.
    Element(&'a Element),
}

/// A frame together with the elements drawn inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub frame: Frame<'a>,
    pub members: Vec<&'a Element>,
}

/// The elements of a view split by where they are drawn.
///
/// Emission order is: `outer`, then `inner` (inside `primary` when there is
/// one, at the top level otherwise), then each of `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub outer: Vec<&'a Element>,
    pub primary: Option<Frame<'a>>,
    pub inner: Vec<&'a Element>,
    pub extra: Vec<Group<'a>>,
}

/// Result of classifying a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    Partitioned(Partition<'a>),
    /// Root deployment nodes, sorted by name.
    Deployment { roots: Vec<&'a Element> },
}

/// Classifies the elements of `view`.
///
/// Every list is sorted by name; equal names keep view order.
pub fn classify<'a>(
    model: &'a Model,
    view: &'a View,
    hierarchy: &Hierarchy<'a>,
) -> Classification<'a> {
    let elements = resolve(model, view);
    match view.kind() {
        ViewKind::SystemLandscape => {
            let (outer, inner): (Vec<_>, Vec<_>) =
                elements.into_iter().partition(|e| e.is_external());
            Classification::Partitioned(enterprise_partition(model, view, outer, inner))
        }
        ViewKind::SystemContext => {
            Classification::Partitioned(enterprise_partition(model, view, Vec::new(), elements))
        }
        ViewKind::Container => {
            let (inner, outer): (Vec<_>, Vec<_>) = elements
                .into_iter()
                .partition(|e| matches!(e.kind(), ElementKind::Container { .. }));
            let primary = if outer.is_empty() {
                None
            } else {
                scope_frame(model, view)
            };
            Classification::Partitioned(sorted(Partition {
                outer,
                primary,
                inner,
                extra: Vec::new(),
            }))
        }
        ViewKind::Component => {
            Classification::Partitioned(component_partition(model, view, elements))
        }
        ViewKind::Dynamic => {
            Classification::Partitioned(dynamic_partition(model, view, hierarchy, elements))
        }
        ViewKind::Deployment => {
            let mut roots: Vec<_> = elements
                .into_iter()
                .filter(|e| {
                    matches!(e.kind(), ElementKind::DeploymentNode { .. }) && e.parent().is_none()
                })
                .collect();
            sort_by_name(&mut roots);
            Classification::Deployment { roots }
        }
    }
}

/// Looks up the view's elements; references to unknown elements are dropped.
fn resolve<'a>(model: &'a Model, view: &'a View) -> Vec<&'a Element> {
    view.elements()
        .iter()
        .filter_map(|id| {
            let element = model.element(id.as_str());
            if element.is_none() {
                debug!(view_key = view.key(), element = id.as_str(); "Skipping unknown element");
            }
            element
        })
        .collect()
}

/// Landscape and context views: `inner` goes into the enterprise frame when it
/// is visible, to the top level otherwise.
fn enterprise_partition<'a>(
    model: &'a Model,
    view: &View,
    outer: Vec<&'a Element>,
    inner: Vec<&'a Element>,
) -> Partition<'a> {
    let primary = if view.enterprise_boundary_visible() {
        model
            .enterprise()
            .map(|enterprise| Frame::Enterprise(enterprise.name()))
    } else {
        None
    };
    sorted(Partition {
        outer,
        primary,
        inner,
        extra: Vec::new(),
    })
}

/// Component views: components of the scope container go inside its frame,
/// components of other containers get a frame per container, everything else
/// is drawn at the top level.
fn component_partition<'a>(
    model: &'a Model,
    view: &'a View,
    elements: Vec<&'a Element>,
) -> Partition<'a> {
    let scope = view.scope();
    let mut outer = Vec::new();
    let mut inner = Vec::new();
    let mut foreign: IndexMap<&ElementId, Vec<&'a Element>> = IndexMap::new();

    for element in elements {
        if !matches!(element.kind(), ElementKind::Component { .. }) {
            outer.push(element);
            continue;
        }
        match element.parent() {
            Some(parent) if Some(parent) == scope => inner.push(element),
            Some(parent) => foreign.entry(parent).or_default().push(element),
            None => outer.push(element),
        }
    }

    let mut extra = Vec::new();
    for (parent, members) in foreign {
        match model.element(parent.as_str()) {
            Some(parent) => extra.push(Group {
                frame: Frame::Element(parent),
                members,
            }),
            // Without a parent element there is nothing to frame them with.
            None => outer.extend(members),
        }
    }
    extra.sort_by(|a, b| frame_name(&a.frame).cmp(frame_name(&b.frame)));

    let primary = if outer.is_empty() && extra.is_empty() {
        None
    } else {
        scope_frame(model, view)
    };

    sorted(Partition {
        outer,
        primary,
        inner,
        extra,
    })
}

/// Dynamic views: with a focal element, elements up to
/// [`DYNAMIC_BOUNDARY_DEPTH`] levels below it are inner and the focal frame is
/// drawn when anything is outer. Without one, everything is inner and
/// unframed.
fn dynamic_partition<'a>(
    model: &'a Model,
    view: &'a View,
    hierarchy: &Hierarchy<'a>,
    elements: Vec<&'a Element>,
) -> Partition<'a> {
    let Some(scope) = view.scope() else {
        return sorted(Partition {
            inner: elements,
            ..Partition::default()
        });
    };

    let (inner, outer): (Vec<_>, Vec<_>) = elements
        .into_iter()
        .partition(|e| hierarchy.is_descendant_of(e, scope, DYNAMIC_BOUNDARY_DEPTH));
    let primary = if outer.is_empty() {
        None
    } else {
        scope_frame(model, view)
    };

    sorted(Partition {
        outer,
        primary,
        inner,
        extra: Vec::new(),
    })
}

/// Frame for the view's scope element, if the scope exists in the model.
fn scope_frame<'a>(model: &'a Model, view: &View) -> Option<Frame<'a>> {
    view.scope()
        .and_then(|scope| model.element(scope.as_str()))
        .map(Frame::Element)
}

fn frame_name<'a>(frame: &Frame<'a>) -> &'a str {
    match *frame {
        Frame::Enterprise(name) => name,
        Frame::Element(element) => element.name(),
    }
}

fn sorted(mut partition: Partition<'_>) -> Partition<'_> {
    sort_by_name(&mut partition.outer);
    sort_by_name(&mut partition.inner);
    for group in &mut partition.extra {
        sort_by_name(&mut group.members);
    }
    partition
}

/// Stable, ordinal sort by element name.
pub(crate) fn sort_by_name(elements: &mut [&Element]) {
    elements.sort_by(|a, b| a.name().cmp(b.name()));
}
