use crate::{error::Error, gl::GraphicsContext};

/// Implementation limits relevant to resetting shared binding state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlLimits {
    pub(crate) texture_units: u32,
    pub(crate) vertex_attribs: u32,
}

impl GlLimits {
    pub(crate) fn query<G: GraphicsContext>(gl: &G) -> Self {
        Self {
            texture_units: gl.max_texture_units(),
            vertex_attribs: gl.max_vertex_attribs(),
        }
    }
}

/// Vertex input bindings that belong to the host and must survive a pass.
///
/// `ARRAY_BUFFER` is global state, the element buffer and attribute
/// pointers belong to the vertex array; restoring both puts the host's
/// vertex input back exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HostBindings<B, V> {
    vertex_array: Option<V>,
    array_buffer: Option<B>,
}

impl<B: Copy, V: Copy> HostBindings<B, V> {
    pub(crate) fn capture<G>(gl: &G) -> Self
    where
        G: GraphicsContext<Buffer = B, VertexArray = V>,
    {
        Self {
            vertex_array: gl.current_vertex_array(),
            array_buffer: gl.current_array_buffer(),
        }
    }

    pub(crate) fn restore<G>(&self, gl: &G)
    where
        G: GraphicsContext<Buffer = B, VertexArray = V>,
    {
        gl.bind_vertex_array(self.vertex_array);
        gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer);
    }
}

/// Leaves texture, buffer and attribute bindings in their default state
/// for whichever renderer uses the context next.
///
/// Every texture unit gets its 2D binding cleared and every vertex
/// attribute is repointed at a throwaway buffer, which is deleted again so
/// no attribute keeps a reference to buffers this layer owned. The active
/// texture unit ends at `TEXTURE0`.
pub(crate) fn reset_bindings<G: GraphicsContext>(gl: &G, limits: GlLimits) -> Result<(), Error> {
    for unit in 0..limits.texture_units {
        gl.active_texture(glow::TEXTURE0 + unit);
        gl.unbind_texture_2d();
    }
    gl.active_texture(glow::TEXTURE0);

    gl.bind_buffer(glow::ARRAY_BUFFER, None);
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

    let unbinder = gl
        .create_buffer()
        .map_err(|e| Error::buffer_creation_failed("attribute-reset", &e))?;

    gl.bind_buffer(glow::ARRAY_BUFFER, Some(unbinder));
    for attrib in 0..limits.vertex_attribs {
        gl.vertex_attrib_pointer_f32(attrib, 1, false, 0, 0);
    }
    gl.delete_buffer(unbinder);
    gl.bind_buffer(glow::ARRAY_BUFFER, None);

    Ok(())
}
