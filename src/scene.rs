//! Retained scene: the node tree, named handles into it, and the device viewport.

pub(crate) mod graph;
pub(crate) mod registry;
pub(crate) mod viewport;
