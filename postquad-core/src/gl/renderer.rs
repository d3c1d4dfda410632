use std::time::Duration;

use crate::gl::GraphicsContext;

/// Per-frame context handed to [`Drawable`]s.
pub struct RenderContext<'a, G> {
    /// Context borrowed from the host renderer.
    pub gl: &'a G,
    /// Time since the host session started; drives time-based shader effects.
    pub elapsed: Duration,
}

impl<'a, G: GraphicsContext> RenderContext<'a, G> {
    /// Frame context over `gl` at `elapsed` since session start.
    pub fn new(gl: &'a G, elapsed: Duration) -> Self {
        Self { gl, elapsed }
    }
}

/// Trait for objects that draw into a context owned by another renderer.
pub trait Drawable<G: GraphicsContext> {
    /// Prepares the object for rendering.
    ///
    /// This method should make the object's program current and set up
    /// whatever state the draw call depends on.
    fn prepare(&self, context: &mut RenderContext<G>);

    /// Performs the actual rendering.
    ///
    /// This method should issue draw calls to render the object. All necessary
    /// state should already be set up from the `prepare()` call.
    fn draw(&self, context: &mut RenderContext<G>);

    /// Cleans up after rendering.
    ///
    /// This method should hand the context back in the state the host
    /// renderer expects, restoring its program.
    fn cleanup(&self, context: &mut RenderContext<G>);
}

/// Runs `prepare`, `draw` and `cleanup` in order.
pub fn render<G: GraphicsContext>(context: &mut RenderContext<G>, drawable: &impl Drawable<G>) {
    drawable.prepare(context);
    drawable.draw(context);
    drawable.cleanup(context);
}
