use std::slice;

use crate::{
    error::Error,
    gl::{
        GraphicsContext,
        geometry::{GeometryBuffer, GrowableBuffer, Upload},
    },
};

/// Plain element types that can be mirrored into a GL buffer.
pub(crate) trait GpuElement: Copy + Default {
    /// GL type enum used when the element is consumed by a draw call.
    const GL_TYPE: u32;
}

impl GpuElement for f32 {
    const GL_TYPE: u32 = glow::FLOAT;
}

impl GpuElement for u16 {
    const GL_TYPE: u32 = glow::UNSIGNED_SHORT;
}

/// Reinterprets a slice of plain elements as raw bytes for upload.
pub(crate) fn as_bytes<T: GpuElement>(data: &[T]) -> &[u8] {
    // SAFETY: GpuElement is only implemented for primitive numeric types,
    // which have no padding and no invalid byte patterns.
    unsafe { slice::from_raw_parts(data.as_ptr() as *const u8, size_of_val(data)) }
}

/// A GL buffer object whose store follows a [`GrowableBuffer`] mirror.
///
/// The handle survives growth; only its store is reallocated with
/// `buffer_data_size`, which both OpenGL and WebGL allow in place.
#[derive(Debug)]
pub(crate) struct DynamicBuffer<B> {
    handle: B,
    target: u32,
}

impl<B: Copy> DynamicBuffer<B> {
    const USAGE: u32 = glow::DYNAMIC_DRAW;

    /// Creates the buffer and allocates room for `capacity` elements of `T`.
    pub(crate) fn create<G, T>(
        gl: &G,
        target: u32,
        capacity: usize,
        label: &str,
    ) -> Result<Self, Error>
    where
        G: GraphicsContext<Buffer = B>,
        T: GpuElement,
    {
        let handle = gl
            .create_buffer()
            .map_err(|e| Error::buffer_creation_failed(label, &e))?;

        gl.bind_buffer(target, Some(handle));
        gl.buffer_data_size(target, capacity * size_of::<T>(), Self::USAGE);

        Ok(Self { handle, target })
    }

    /// Pushes the range described by `upload` from `mirror` to the GPU.
    pub(crate) fn sync<G, T>(&self, gl: &G, mirror: &GrowableBuffer<T>, upload: &Upload)
    where
        G: GraphicsContext<Buffer = B>,
        T: GpuElement,
    {
        let elem_size = size_of::<T>();
        gl.bind_buffer(self.target, Some(self.handle));

        if let Upload::Reallocate { capacity, .. } = upload {
            gl.buffer_data_size(self.target, capacity * elem_size, Self::USAGE);
        }

        let range = upload.range();
        if !range.is_empty() {
            let offset = range.start * elem_size;
            gl.buffer_sub_data(self.target, offset, as_bytes(mirror.slice(range)));
        }
    }

    pub(crate) fn handle(&self) -> B {
        self.handle
    }

    pub(crate) fn delete<G: GraphicsContext<Buffer = B>>(self, gl: &G) {
        gl.delete_buffer(self.handle);
    }
}

/// Vertex and index buffer objects mirroring a [`GeometryBuffer`], plus the
/// vertex array object that records how they feed the vertex shader.
///
/// Attribute pointers and the element buffer binding live in the owned
/// vertex array, so whichever vertex array the host has bound is never
/// written to.
#[derive(Debug)]
pub(crate) struct GpuBuffers<B, V> {
    pub(crate) vertex_array: V,
    pub(crate) vertices: DynamicBuffer<B>,
    pub(crate) indices: DynamicBuffer<B>,
}

impl<B: Copy, V: Copy> GpuBuffers<B, V> {
    /// Creates the vertex array and both buffers with stores matching the
    /// mirrors' current capacity. `vertex_position`, when resolved, is
    /// pointed at the vertex buffer as three floats per vertex.
    ///
    /// Leaves the new vertex array and the vertex buffer bound; callers
    /// restore the host's bindings afterwards.
    pub(crate) fn create<G>(
        gl: &G,
        geometry: &GeometryBuffer,
        vertex_position: Option<u32>,
    ) -> Result<Self, Error>
    where
        G: GraphicsContext<Buffer = B, VertexArray = V>,
    {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|e| Error::vertex_array_creation_failed(&e))?;
        gl.bind_vertex_array(Some(vertex_array));

        let (vertices, indices) = match create_buffers(gl, geometry) {
            Ok(buffers) => buffers,
            Err(e) => {
                gl.delete_vertex_array(vertex_array);
                return Err(e);
            },
        };

        if let Some(location) = vertex_position {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertices.handle()));
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, 3, false, 0, 0);
        }

        Ok(Self { vertex_array, vertices, indices })
    }

    /// Mirrors the result of [`GeometryBuffer::append`] on the GPU.
    ///
    /// Binds the owned vertex array first so the element buffer binding
    /// lands there; callers restore the host's bindings afterwards.
    pub(crate) fn sync<G>(&self, gl: &G, geometry: &GeometryBuffer, uploads: &(Upload, Upload))
    where
        G: GraphicsContext<Buffer = B, VertexArray = V>,
    {
        let (vertex_upload, index_upload) = uploads;
        self.bind(gl);
        self.vertices
            .sync(gl, geometry.vertices(), vertex_upload);
        self.indices
            .sync(gl, geometry.indices(), index_upload);
    }

    /// Binds the owned vertex array, which carries the element buffer and
    /// attribute setup.
    pub(crate) fn bind<G>(&self, gl: &G)
    where
        G: GraphicsContext<Buffer = B, VertexArray = V>,
    {
        gl.bind_vertex_array(Some(self.vertex_array));
    }

    pub(crate) fn delete<G>(self, gl: &G)
    where
        G: GraphicsContext<Buffer = B, VertexArray = V>,
    {
        gl.delete_vertex_array(self.vertex_array);
        self.vertices.delete(gl);
        self.indices.delete(gl);
    }
}

fn create_buffers<G: GraphicsContext>(
    gl: &G,
    geometry: &GeometryBuffer,
) -> Result<(DynamicBuffer<G::Buffer>, DynamicBuffer<G::Buffer>), Error> {
    let vertices = DynamicBuffer::create::<G, f32>(
        gl,
        glow::ARRAY_BUFFER,
        geometry.vertices().capacity(),
        "vertex",
    )?;

    match DynamicBuffer::create::<G, u16>(
        gl,
        glow::ELEMENT_ARRAY_BUFFER,
        geometry.indices().capacity(),
        "index",
    ) {
        Ok(indices) => Ok((vertices, indices)),
        Err(e) => {
            vertices.delete(gl);
            Err(e)
        },
    }
}
