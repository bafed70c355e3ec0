//! Build-then-run lifecycle: scene assembly, the per-frame coordinator and its scheduling.

pub(crate) mod coordinator;
pub(crate) mod fingerprint;
pub(crate) mod overlay;
pub(crate) mod scheduler;
pub(crate) mod state;
