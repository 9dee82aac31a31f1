//! Structures the layout stages operate on.
//!
//! - [`ScopeTree`] / [`ContainmentScope`]: the model split into nesting levels
//! - [`GraphBuilder`] / [`LayoutGraph`]: the simplified graph of one scope

mod graph;
mod scope;

pub use graph::{Endpoint, GraphBuilder, LayoutEdge, LayoutGraph, LayoutNode};
pub use scope::{ContainmentScope, ScopeTree};
