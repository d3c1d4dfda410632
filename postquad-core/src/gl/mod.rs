mod backend;
pub(crate) mod buffer;
mod context;
pub(crate) mod geometry;
#[cfg(test)]
pub(crate) mod mock;
mod post_process;
mod program;
pub(crate) mod quad;
mod renderer;

pub use backend::GraphicsContext;
pub use geometry::{FLOATS_PER_QUAD, GeometryBuffer, GrowableBuffer, INDICES_PER_QUAD, Upload};
pub use post_process::PostProcessRenderer;
pub use quad::{QuadGeometry, QuadPlacement, Span, build_full_screen_quad, build_quad};
pub use renderer::{Drawable, RenderContext, render};
