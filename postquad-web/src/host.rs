use postquad_core::{PostProcessRenderer, RenderContext, RendererConfig, Span, SurfaceInfo, render};
use tracing::{info, level_filters::LevelFilter};
use wasm_bindgen::prelude::*;

use crate::{js, logging};

/// Thin `#[wasm_bindgen]` wrapper owning the GL context and the pass.
#[wasm_bindgen]
pub struct PostQuadHost {
    gl: glow::Context,
    renderer: Option<PostProcessRenderer<glow::Context>>,
    started_at_ms: f64,
}

#[wasm_bindgen]
impl PostQuadHost {
    /// Attaches the post-processing pass to the canvas matching `canvas_id`.
    ///
    /// # Arguments
    /// * `canvas_id` - CSS selector for the canvas element
    /// * `world_width`, `world_height` - size of the full-screen quad in world units
    /// * `camera_x`, `camera_y` - host camera position at attach time
    /// * `log_level` - optional verbosity (`"debug"`, `"trace"`, ...) for
    ///   the pass's diagnostic notices; unknown names keep the default
    ///
    /// When no WebGL2 context can be obtained the user is alerted and
    /// construction fails; every later failure only disables the effect.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        world_width: f32,
        world_height: f32,
        camera_x: f32,
        camera_y: f32,
        log_level: Option<String>,
    ) -> Result<PostQuadHost, JsError> {
        console_error_panic_hook::set_once();

        let config = match log_level.as_deref() {
            Some(level) => RendererConfig::default().with_log_level_named(level),
            None => RendererConfig::default(),
        };
        logging::init_console_logging(config.log_level.max(LevelFilter::INFO));

        let canvas = js::get_canvas_by_id(canvas_id)?;
        let gl = match js::create_glow_context(&canvas) {
            Ok(gl) => gl,
            Err(e) => {
                js::alert(&format!("Unable to initialize graphics: {e}"));
                return Err(e.into());
            },
        };

        let surface = SurfaceInfo::new((canvas.width() as f32, canvas.height() as f32))
            .with_camera_position(camera_x, camera_y);

        let mut renderer = PostProcessRenderer::initialize(&gl, config, surface);
        renderer.append_quad(&gl, Span::new(world_width, world_height));
        info!(canvas = canvas_id, program = renderer.has_program(), "post-processing attached");

        Ok(PostQuadHost {
            gl,
            renderer: Some(renderer),
            started_at_ms: js::now_ms(),
        })
    }

    /// Draws the pass over whatever the host rendered this frame.
    ///
    /// Does nothing after [`shutdown`](Self::shutdown).
    #[wasm_bindgen(js_name = "renderFrame")]
    pub fn render_frame(&self) {
        let Some(renderer) = &self.renderer else {
            return;
        };

        let elapsed = js::elapsed_between(self.started_at_ms, js::now_ms());
        render(&mut RenderContext::new(&self.gl, elapsed), renderer);
    }

    /// Appends another quad covering `width` x `height` world units.
    #[wasm_bindgen(js_name = "appendQuad")]
    pub fn append_quad(&mut self, width: f32, height: f32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.append_quad(&self.gl, Span::new(width, height));
        }
    }

    /// Number of indices submitted per frame.
    #[wasm_bindgen(getter, js_name = "drawCount")]
    pub fn draw_count(&self) -> usize {
        self.renderer.as_ref().map_or(0, PostProcessRenderer::draw_count)
    }

    /// Releases the pass's GPU resources and hands the context back clean.
    ///
    /// Safe to call more than once.
    #[wasm_bindgen]
    pub fn shutdown(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.teardown(&self.gl);
            info!("post-processing detached");
        }
    }
}
