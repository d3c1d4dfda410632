//! Errors raised while building GPU resources.

/// Error categories for the post-processing layer.
///
/// None of these escape [`crate::PostProcessRenderer`]: the renderer logs
/// them and keeps running with the affected resource disabled.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Shader compilation, linking, or program creation errors.
    #[error("Shader error: {0}")]
    Shader(String),

    /// GL resource creation or management errors.
    #[error("Resource error: {0}")]
    Resource(String),
}

impl Error {
    // Shader errors
    pub(crate) fn shader_creation_failed(detail: &str) -> Self {
        Self::Shader(format!("Shader creation failed: {detail}"))
    }

    pub(crate) fn shader_compile_failed(stage: &str, log: &str) -> Self {
        Self::Shader(format!("{stage} shader failed to compile: {log}"))
    }

    pub(crate) fn shader_program_creation_failed(detail: &str) -> Self {
        Self::Shader(format!("Shader program creation failed: {detail}"))
    }

    pub(crate) fn shader_link_failed(log: &str) -> Self {
        Self::Shader(format!("Shader linking failed: {log}"))
    }

    // Resource errors
    pub(crate) fn buffer_creation_failed(buffer_type: &str, detail: &str) -> Self {
        Self::Resource(format!("Failed to create {buffer_type} buffer: {detail}"))
    }

    pub(crate) fn vertex_array_creation_failed(detail: &str) -> Self {
        Self::Resource(format!("Failed to create vertex array object: {detail}"))
    }

    pub(crate) fn attrib_location_failed(name: &str) -> Self {
        Self::Resource(format!("Failed to get attribute location: {name}"))
    }

    pub(crate) fn uniform_location_failed(name: &str) -> Self {
        Self::Resource(format!("Failed to get uniform location: {name}"))
    }

    pub(crate) fn index_range_exhausted(base: u32) -> Self {
        Self::Resource(format!(
            "16-bit index range exhausted: next quad would start at vertex {base}"
        ))
    }
}
