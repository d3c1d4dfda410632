use tracing::{Level, level_filters::LevelFilter};

use crate::GlslVersion;

/// Construction-time settings for [`crate::PostProcessRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Shader language the sources are prefixed for.
    pub glsl_version: GlslVersion,
    /// Verbosity of the renderer's diagnostic notices (growth events,
    /// missing programs, upload counts). Shader failures are always
    /// reported at WARN.
    pub log_level: LevelFilter,
    /// Number of quads the buffers hold before the first reallocation.
    pub initial_quad_capacity: usize,
    /// Uniform scale of the view matrix.
    pub view_scale: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            glsl_version: GlslVersion::Es300,
            log_level: LevelFilter::WARN,
            initial_quad_capacity: 90,
            view_scale: 0.6,
        }
    }
}

impl RendererConfig {
    /// Environment variable overriding [`RendererConfig::log_level`].
    pub const LOG_LEVEL_ENV: &'static str = "POSTQUAD_LOG_LEVEL";

    /// Default configuration with the log level taken from `POSTQUAD_LOG_LEVEL`,
    /// if set to a valid level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub fn from_env() -> Self {
        match std::env::var(Self::LOG_LEVEL_ENV) {
            Ok(level) => Self::default().with_log_level_named(&level),
            Err(_) => Self::default(),
        }
    }

    /// Sets the shader language the sources are prefixed for.
    pub fn with_glsl_version(mut self, glsl_version: GlslVersion) -> Self {
        self.glsl_version = glsl_version;
        self
    }

    /// Sets the verbosity of diagnostic notices.
    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets the verbosity from a level name such as `"debug"`. Names that
    /// don't parse leave the current level in place.
    pub fn with_log_level_named(self, name: &str) -> Self {
        match name.trim().parse::<LevelFilter>() {
            Ok(level) => self.with_log_level(level),
            Err(_) => self,
        }
    }

    /// Sets how many quads the buffers hold before growing.
    pub fn with_initial_quad_capacity(mut self, quads: usize) -> Self {
        self.initial_quad_capacity = quads;
        self
    }

    /// Sets the uniform scale of the view matrix.
    pub fn with_view_scale(mut self, scale: f32) -> Self {
        self.view_scale = scale;
        self
    }

    /// Returns true if notices at `level` should be emitted.
    pub fn logs(&self, level: Level) -> bool {
        level <= self.log_level
    }
}

/// Host surface parameters captured once when the renderer is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInfo {
    /// Canvas size in pixels; feeds the clip matrix and `iResolution`.
    pub canvas_size: (f32, f32),
    /// Host camera position in world units; feeds the view matrix.
    pub camera_position: (f32, f32),
}

impl SurfaceInfo {
    /// Surface of `canvas_size` pixels with the camera at the world origin.
    pub fn new(canvas_size: (f32, f32)) -> Self {
        Self { canvas_size, camera_position: (0.0, 0.0) }
    }

    /// Sets the host camera position in world units.
    pub fn with_camera_position(mut self, x: f32, y: f32) -> Self {
        self.camera_position = (x, y);
        self
    }
}
