//! Destinations for rendered frames.

pub(crate) mod ffmpeg;
pub(crate) mod sink;
