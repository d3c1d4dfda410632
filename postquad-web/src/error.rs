/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to initialize the WebGL context or retrieve DOM elements.
    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl Error {
    pub(crate) fn window_not_found() -> Self {
        Self::Initialization("Unable to retrieve window".to_string())
    }

    pub(crate) fn document_not_found() -> Self {
        Self::Initialization("Unable to retrieve document".to_string())
    }

    pub(crate) fn canvas_not_found(selector: &str) -> Self {
        Self::Initialization(format!("Unable to retrieve canvas: {selector}"))
    }

    pub(crate) fn canvas_context_failed() -> Self {
        Self::Initialization("Failed to retrieve canvas rendering context".to_string())
    }

    pub(crate) fn webgl_context_failed() -> Self {
        Self::Initialization("Failed to retrieve WebGL2 rendering context".to_string())
    }
}
