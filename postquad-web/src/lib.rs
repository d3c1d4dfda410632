//! Browser host for the postquad post-processing pass.
//!
//! [`PostQuadHost`] owns the canvas's WebGL2 context and drives a
//! [`PostProcessRenderer`] from JavaScript: construct it once per session,
//! call `renderFrame` after the host engine has drawn its frame, and
//! `shutdown` when the session ends.

mod error;
mod host;
mod logging;

pub(crate) mod js;

pub use postquad_core::{GlslVersion, PostProcessRenderer, RendererConfig, Span, SurfaceInfo};

pub use crate::{error::Error, host::PostQuadHost};
