use std::ops::Range;

/// Floats written per quad: 4 corners of `(x, y, z)`.
pub const FLOATS_PER_QUAD: usize = 12;
/// Indices written per quad: two triangles.
pub const INDICES_PER_QUAD: usize = 6;

/// How an append must be mirrored on the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upload {
    /// Store was too small: reallocate to `capacity` elements and upload
    /// `[0, end)` in one transfer.
    Reallocate {
        /// Capacity before this append.
        previous_capacity: usize,
        /// Capacity the store must be reallocated to.
        capacity: usize,
        /// End of the written elements after this append.
        end: usize,
    },
    /// Store still fits: upload only the freshly written elements.
    Partial(Range<usize>),
}

impl Upload {
    /// Element range that has to be transferred.
    pub fn range(&self) -> Range<usize> {
        match self {
            Upload::Reallocate { end, .. } => 0..*end,
            Upload::Partial(range) => range.clone(),
        }
    }

    /// Returns true if the GPU store must be reallocated.
    pub fn is_reallocation(&self) -> bool {
        matches!(self, Upload::Reallocate { .. })
    }
}

/// Append-only CPU mirror of a GPU buffer, in elements of `T`.
///
/// The backing vector is always exactly `capacity` long; `cursor` marks the
/// next free element. Capacity never shrinks.
#[derive(Debug, Clone)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
    cursor: usize,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    /// Empty mirror holding `capacity` elements before it grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: vec![T::default(); capacity], cursor: 0 }
    }

    /// Writes `items` at the cursor, growing the store first if they don't fit.
    pub fn append(&mut self, items: &[T]) -> Upload {
        let start = self.cursor;
        let end = start + items.len();

        // an append that exactly fills the store does not grow it
        let upload = if end > self.data.len() {
            let previous_capacity = self.data.len();
            let capacity = grown_capacity(previous_capacity, end);
            self.data.resize(capacity, T::default());
            Upload::Reallocate { previous_capacity, capacity, end }
        } else {
            Upload::Partial(start..end)
        };

        self.data[start..end].copy_from_slice(items);
        self.cursor = end;
        upload
    }

    /// Number of elements written so far.
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of elements the store can hold before growing.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The written elements, `[0, len)`.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.cursor]
    }

    /// Elements in `range`; the range must lie within the written part.
    pub(crate) fn slice(&self, range: Range<usize>) -> &[T] {
        &self.data[range]
    }
}

/// Grows `current` by a factor of 1.5 (rounded down) until it holds `required`.
///
/// Each step adds at least one element so that capacities below 2 still
/// make progress.
pub(crate) fn grown_capacity(current: usize, required: usize) -> usize {
    let mut capacity = current;
    while capacity < required {
        capacity = (capacity + capacity / 2).max(capacity + 1);
    }
    capacity
}

/// Paired vertex and index mirrors backing the post-processing geometry.
#[derive(Debug, Clone)]
pub struct GeometryBuffer {
    vertices: GrowableBuffer<f32>,
    indices: GrowableBuffer<u16>,
}

impl GeometryBuffer {
    /// Creates mirrors sized for `quads` quads before the first reallocation.
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self {
            vertices: GrowableBuffer::with_capacity(FLOATS_PER_QUAD * quads),
            indices: GrowableBuffer::with_capacity(INDICES_PER_QUAD * quads),
        }
    }

    /// Appends raw vertex components and indices.
    ///
    /// The two sides are thresholded independently. No geometry validation
    /// is done; callers pass vertex/index pairs describing whole primitives.
    pub fn append(&mut self, vertices: &[f32], indices: &[u16]) -> (Upload, Upload) {
        (self.vertices.append(vertices), self.indices.append(indices))
    }

    /// Vertex component mirror.
    pub fn vertices(&self) -> &GrowableBuffer<f32> {
        &self.vertices
    }

    /// Index mirror.
    pub fn indices(&self) -> &GrowableBuffer<u16> {
        &self.indices
    }
}
