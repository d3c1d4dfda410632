/// Column-major 3x3 matrix for 2D affine transforms, as consumed by
/// `uniformMatrix3fv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Elements in column-major order.
    pub data: [f32; 9],
}

impl Mat3 {
    /// Uniform scale followed by a translation.
    #[rustfmt::skip]
    pub fn scale_translate(scale: f32, tx: f32, ty: f32) -> Self {
        Self {
            data: [
                scale, 0.0,   0.0,
                0.0,   scale, 0.0,
                tx,    ty,    1.0,
            ],
        }
    }

    /// View transform for a camera at `camera`: moves the world by the
    /// negated camera position and scales it by `scale`.
    pub fn view(camera: (f32, f32), scale: f32) -> Self {
        Self::scale_translate(scale, -camera.0, -camera.1)
    }

    /// Maps `[0, width] x [0, height]` to normalized device coordinates.
    #[rustfmt::skip]
    pub fn orthographic_from_size(width: f32, height: f32) -> Self {
        Self {
            data: [
                2.0 / width, 0.0,          0.0,
                0.0,         2.0 / height, 0.0,
                -1.0,        -1.0,         1.0,
            ],
        }
    }

    /// Transforms a point.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.data;
        (m[0] * x + m[3] * y + m[6], m[1] * x + m[4] * y + m[7])
    }
}
