//! Per-frame motion rules. Every step is a fixed per-call increment, not time-delta based.

pub(crate) mod clouds;
pub(crate) mod ground;
pub(crate) mod leaves;
pub(crate) mod pan;
