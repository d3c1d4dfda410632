use std::{cell::Cell, fmt::Debug, time::Duration};

use tracing::{Level, debug, trace, warn};

use crate::{
    config::{RendererConfig, SurfaceInfo},
    error::Error,
    gl::{
        Drawable, GraphicsContext, RenderContext,
        buffer::{GpuBuffers, GpuElement},
        context::{GlLimits, HostBindings, reset_bindings},
        geometry::{GeometryBuffer, Upload},
        program::{ProgramContext, ShaderProgram},
        quad::{Span, build_full_screen_quad},
    },
    mat3::Mat3,
};

/// A full-screen post-processing pass drawn into a context owned by a
/// host renderer.
///
/// Geometry is appended once during scene setup and mirrored into growable
/// GPU buffers. Every frame the host calls [`bind`](Self::bind),
/// [`draw`](Self::draw) and [`restore`](Self::restore), in that order, on
/// the thread that owns the context; `restore` puts the host's program
/// back so the host renderer never observes this pass.
///
/// Vertex input goes through a vertex array object owned by the pass. The
/// host's vertex array and `ARRAY_BUFFER` binding are captured by `bind`
/// and put back by `restore`.
///
/// Failures never propagate: a shader that fails to compile or a buffer
/// that cannot be created is logged and the pass turns into a no-op.
#[must_use = "call `teardown(gl)` before dropping to release GPU resources"]
pub struct PostProcessRenderer<G: GraphicsContext> {
    config: RendererConfig,
    programs: ProgramContext<G::Program>,
    locations: Locations<G::UniformLocation>,
    buffers: Option<GpuBuffers<G::Buffer, G::VertexArray>>,
    /// Host vertex input captured by the last `bind`.
    host_bindings: Cell<Option<HostBindings<G::Buffer, G::VertexArray>>>,
    geometry: GeometryBuffer,
    limits: GlLimits,
    next_index_base: u32,
    draw_count: usize,
    /// Set once the "nothing to draw with" notice has been emitted.
    reported_unavailable: Cell<bool>,
}

/// Resolved shader inputs; absent when the program is missing or the
/// driver optimized an input away.
#[derive(Debug)]
struct Locations<U> {
    vertex_position: Option<u32>,
    time: Option<U>,
}

impl<U> Default for Locations<U> {
    fn default() -> Self {
        Self { vertex_position: None, time: None }
    }
}

impl<G: GraphicsContext> PostProcessRenderer<G> {
    const VERTEX_GLSL: &'static str = include_str!("../shaders/postfx.vert");
    const FRAGMENT_GLSL: &'static str = include_str!("../shaders/postfx.frag");

    /// Compiles the pass's program, captures the host program and
    /// allocates buffers for `config.initial_quad_capacity` quads.
    ///
    /// View and clip matrices and `iResolution` are set once from
    /// `surface`. The host program, if any, is current again on return.
    pub fn initialize(gl: &G, config: RendererConfig, surface: SurfaceInfo) -> Self {
        let verbose = config.logs(Level::DEBUG);

        let vertex_source = format!(
            "{}{}",
            config.glsl_version.vertex_preamble(),
            Self::VERTEX_GLSL
        );
        let fragment_source = format!(
            "{}{}",
            config.glsl_version.fragment_preamble(),
            Self::FRAGMENT_GLSL
        );
        let own = ShaderProgram::create(gl, &vertex_source, &fragment_source)
            .inspect_err(|e| warn!(error = %e, "post-processing effect disabled"))
            .ok();

        let programs = ProgramContext::capture(gl, own, verbose);
        programs.bind(gl);

        let locations = match programs.own() {
            Some(program) => init_uniforms(gl, program.program, &config, surface, verbose),
            None => Locations::default(),
        };

        let host_bindings = HostBindings::capture(gl);
        let geometry = GeometryBuffer::with_quad_capacity(config.initial_quad_capacity);
        let buffers = GpuBuffers::create(gl, &geometry, locations.vertex_position)
            .inspect_err(|e| warn!(error = %e, "post-processing geometry unavailable"))
            .ok();
        host_bindings.restore(gl);

        programs.restore(gl);

        Self {
            config,
            programs,
            locations,
            buffers,
            host_bindings: Cell::new(None),
            geometry,
            limits: GlLimits::query(gl),
            next_index_base: 0,
            draw_count: 0,
            reported_unavailable: Cell::new(false),
        }
    }

    /// Appends a quad covering `span` from the world origin.
    ///
    /// Each quad advances the running index base by 4. A quad whose
    /// indices would not fit in 16 bits is dropped with a warning.
    pub fn append_quad(&mut self, gl: &G, span: Span) {
        match build_full_screen_quad(span, self.next_index_base) {
            Some(quad) => {
                self.next_index_base = quad.next_index_base;
                self.append(gl, &quad.vertices, &quad.indices);
            },
            None => {
                let e = Error::index_range_exhausted(self.next_index_base);
                warn!(error = %e, "quad dropped");
            },
        }
    }

    /// Appends raw vertex components and indices and mirrors them on the GPU.
    ///
    /// Callers are responsible for passing whole primitives; indices are
    /// not validated against the vertex data. The draw count follows the
    /// index count immediately.
    pub fn append(&mut self, gl: &G, vertices: &[f32], indices: &[u16]) {
        let uploads = self.geometry.append(vertices, indices);
        self.report_growth("vertex", &uploads.0);
        self.report_growth("index", &uploads.1);

        if let Some(buffers) = &self.buffers {
            let host_bindings = HostBindings::capture(gl);
            buffers.sync(gl, &self.geometry, &uploads);
            host_bindings.restore(gl);
        }

        self.draw_count = self.geometry.indices().len();

        if self.config.logs(Level::TRACE) {
            trace!(
                vertices = self.geometry.vertices().len(),
                indices = self.geometry.indices().len(),
                "geometry uploaded"
            );
        }
    }

    /// Makes the pass's program and vertex array current, remembering the
    /// host's vertex array and `ARRAY_BUFFER` binding for [`restore`](Self::restore).
    pub fn bind(&self, gl: &G) {
        self.host_bindings.set(Some(HostBindings::capture(gl)));
        self.programs.bind(gl);
        if let Some(buffers) = &self.buffers {
            buffers.bind(gl);
        }
    }

    /// Draws all appended geometry with the pass's program.
    ///
    /// Expects [`bind`](Self::bind) to have been called this frame.
    /// `elapsed` is written to `iTime` in seconds.
    pub fn draw(&self, gl: &G, elapsed: Duration) {
        let Some(buffers) = self.buffers.as_ref().filter(|_| self.has_program()) else {
            self.report_unavailable();
            return;
        };
        if self.draw_count == 0 {
            return;
        }

        buffers.bind(gl);

        if let Some(time) = &self.locations.time {
            gl.uniform_1_f32(time, elapsed.as_secs_f32());
        }

        gl.draw_elements(
            glow::TRIANGLES,
            self.draw_count as i32,
            <u16 as GpuElement>::GL_TYPE,
            0,
        );
    }

    /// Makes the host's program current again and puts back the vertex
    /// input bindings captured by [`bind`](Self::bind).
    pub fn restore(&self, gl: &G) {
        self.programs.restore(gl);
        if let Some(host_bindings) = self.host_bindings.take() {
            host_bindings.restore(gl);
        }
    }

    /// Releases every GPU resource and leaves shared bindings clean.
    ///
    /// The host program is restored first, or no program is left current
    /// if the host had none. Then the pass's program, vertex array and
    /// buffers are deleted, all texture units are unbound and every
    /// attribute of the default vertex array is reset. The host's own
    /// vertex array binding is put back last.
    pub fn teardown(self, gl: &G) {
        self.programs.delete(gl);

        let host_bindings = HostBindings::capture(gl);
        if let Some(buffers) = self.buffers {
            buffers.delete(gl);
        }

        gl.bind_vertex_array(None);
        if let Err(e) = reset_bindings(gl, self.limits) {
            warn!(error = %e, "vertex attributes left bound after teardown");
        }
        host_bindings.restore(gl);
    }

    /// Number of indices the next draw call submits.
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Index base the next appended quad starts at.
    pub fn next_index_base(&self) -> u32 {
        self.next_index_base
    }

    /// CPU mirror of the GPU geometry.
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    /// Vertex components appended so far.
    pub fn vertex_len(&self) -> usize {
        self.geometry.vertices().len()
    }

    /// Indices appended so far.
    pub fn index_len(&self) -> usize {
        self.geometry.indices().len()
    }

    /// Vertex components the GPU store holds before the next reallocation.
    pub fn vertex_capacity(&self) -> usize {
        self.geometry.vertices().capacity()
    }

    /// Indices the GPU store holds before the next reallocation.
    pub fn index_capacity(&self) -> usize {
        self.geometry.indices().capacity()
    }

    /// Returns true if the pass's program compiled and linked.
    pub fn has_program(&self) -> bool {
        self.programs.own().is_some()
    }

    /// Configuration the pass was created with.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn report_growth(&self, kind: &str, upload: &Upload) {
        if let Upload::Reallocate { previous_capacity, capacity, .. } = upload {
            if self.config.logs(Level::DEBUG) {
                debug!(
                    buffer = kind,
                    from = previous_capacity,
                    to = capacity,
                    "growing {kind} buffer"
                );
            }
        }
    }

    fn report_unavailable(&self) {
        if self.config.logs(Level::DEBUG) && !self.reported_unavailable.replace(true) {
            warn!(
                has_program = self.has_program(),
                has_buffers = self.buffers.is_some(),
                "post-processing pass skipped: resources unavailable"
            );
        }
    }
}

fn init_uniforms<G: GraphicsContext>(
    gl: &G,
    program: G::Program,
    config: &RendererConfig,
    surface: SurfaceInfo,
    verbose: bool,
) -> Locations<G::UniformLocation> {
    let uniform = |name: &str| {
        let location = gl.uniform_location(program, name);
        if location.is_none() && verbose {
            let e = Error::uniform_location_failed(name);
            warn!(error = %e, "uniform ignored");
        }
        location
    };

    let vertex_position = gl.attrib_location(program, "aVertexPosition");
    if vertex_position.is_none() && verbose {
        let e = Error::attrib_location_failed("aVertexPosition");
        warn!(error = %e, "attribute ignored");
    }

    let (width, height) = surface.canvas_size;

    if let Some(view) = uniform("viewMatrix") {
        let matrix = Mat3::view(surface.camera_position, config.view_scale);
        gl.uniform_matrix_3(&view, &matrix.data);
    }

    if let Some(clip) = uniform("clipMatrix") {
        gl.uniform_matrix_3(&clip, &Mat3::orthographic_from_size(width, height).data);
    }

    let time = uniform("iTime");
    if let Some(time) = &time {
        gl.uniform_1_f32(time, 0.0);
    }

    if let Some(resolution) = uniform("iResolution") {
        gl.uniform_2_f32(&resolution, width, height);
    }

    Locations { vertex_position, time }
}

impl<G: GraphicsContext> Drawable<G> for PostProcessRenderer<G> {
    fn prepare(&self, context: &mut RenderContext<G>) {
        self.bind(context.gl);
    }

    fn draw(&self, context: &mut RenderContext<G>) {
        PostProcessRenderer::draw(self, context.gl, context.elapsed);
    }

    fn cleanup(&self, context: &mut RenderContext<G>) {
        self.restore(context.gl);
    }
}

impl<G: GraphicsContext> Debug for PostProcessRenderer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostProcessRenderer")
            .field("has_program", &self.has_program())
            .field("saved_program", &self.programs.saved())
            .field("vertex_array", &self.buffers.as_ref().map(|b| b.vertex_array))
            .field("vertex_buffer", &self.buffers.as_ref().map(|b| b.vertices.handle()))
            .field("index_buffer", &self.buffers.as_ref().map(|b| b.indices.handle()))
            .field("vertices", &self.vertex_len())
            .field("indices", &self.index_len())
            .field("draw_count", &self.draw_count)
            .finish_non_exhaustive()
    }
}
