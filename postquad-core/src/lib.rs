//! A post-processing quad pass that borrows a GL context from a host
//! renderer.
//!
//! [`PostProcessRenderer`] owns its shader program and a pair of growable
//! vertex/index buffers. Every frame it binds its program, draws the quads it
//! has accumulated and hands the context back with the host's program
//! current again.

mod config;
pub mod error;
/// GL plumbing: the context contract, buffers, programs and the pass itself.
pub mod gl;
mod mat3;

pub use config::{RendererConfig, SurfaceInfo};
pub use error::Error;
pub use gl::{
    Drawable, FLOATS_PER_QUAD, GeometryBuffer, GraphicsContext, GrowableBuffer, INDICES_PER_QUAD,
    PostProcessRenderer, QuadGeometry, QuadPlacement, RenderContext, Span, Upload,
    build_full_screen_quad, build_quad, render,
};
pub use mat3::Mat3;

/// GL shader language target for version injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslVersion {
    /// WebGL2 / OpenGL ES 3.0: `#version 300 es`
    Es300,
    /// OpenGL 3.3 Core: `#version 330 core`
    Gl330,
}

impl GlslVersion {
    /// `#version` line and float precision for vertex shaders.
    pub fn vertex_preamble(&self) -> &'static str {
        match self {
            Self::Es300 => "#version 300 es\nprecision highp float;\n",
            Self::Gl330 => "#version 330 core\n",
        }
    }

    /// `#version` line and float precision for fragment shaders.
    pub fn fragment_preamble(&self) -> &'static str {
        match self {
            Self::Es300 => "#version 300 es\nprecision mediump float;\n",
            Self::Gl330 => "#version 330 core\n",
        }
    }
}
