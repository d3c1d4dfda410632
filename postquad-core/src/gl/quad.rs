use crate::gl::geometry::{FLOATS_PER_QUAD, INDICES_PER_QUAD};

/// World-space extent of a quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Extent along x in world units.
    pub width: f32,
    /// Extent along y in world units.
    pub height: f32,
}

impl Span {
    /// Span of `width` by `height` world units.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Placement of a quad: position of its anchor point, the anchor as a
/// fraction of the span, and a rotation in radians around the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadPlacement {
    /// World position of the anchor point.
    pub origin: (f32, f32),
    /// Anchor as a fraction of the span; `(0, 0)` is the bottom-left corner.
    pub anchor: (f32, f32),
    /// Rotation around the anchor, in radians.
    pub rotation: f32,
}

/// Vertices and indices of a single quad, ready for appending.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadGeometry {
    /// Corners as `(x, y, 0)`: bottom-left, top-left, top-right, bottom-right.
    pub vertices: [f32; FLOATS_PER_QUAD],
    /// Two counter-clockwise triangles offset by the index base.
    pub indices: [u16; INDICES_PER_QUAD],
    /// Index base for the next quad.
    pub next_index_base: u32,
}

/// Builds a quad covering `span` at the given placement.
///
/// `index_base` is the vertex index of this quad's first corner within the
/// shared vertex buffer. Returns `None` if the quad's corners would not be
/// addressable with 16-bit indices.
pub fn build_quad(span: Span, placement: QuadPlacement, index_base: u32) -> Option<QuadGeometry> {
    let b = u16::try_from(index_base).ok()?;
    b.checked_add(3)?;

    let (sin, cos) = placement.rotation.sin_cos();
    let (ax, ay) = placement.anchor;
    let (ox, oy) = placement.origin;

    let left = -span.width * ax;
    let right = span.width * (1.0 - ax);
    let bottom = -span.height * ay;
    let top = span.height * (1.0 - ay);

    let corner = |x: f32, y: f32| (x * cos - y * sin + ox, x * sin + y * cos + oy);

    let (x0, y0) = corner(left, bottom);
    let (x1, y1) = corner(left, top);
    let (x2, y2) = corner(right, top);
    let (x3, y3) = corner(right, bottom);

    #[rustfmt::skip]
    let vertices = [
        x0, y0, 0.0, // bottom-left
        x1, y1, 0.0, // top-left
        x2, y2, 0.0, // top-right
        x3, y3, 0.0, // bottom-right
    ];

    let indices = [b, b + 1, b + 2, b, b + 2, b + 3];

    Some(QuadGeometry { vertices, indices, next_index_base: index_base + 4 })
}

/// Builds an axis-aligned quad from `(0, 0)` to `(width, height)`.
pub fn build_full_screen_quad(span: Span, index_base: u32) -> Option<QuadGeometry> {
    build_quad(span, QuadPlacement::default(), index_base)
}
