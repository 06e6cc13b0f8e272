use crate::{Fit, SizingMode, SizingParams, SurfaceSize};

/// CPU-side copy of the sizing transform the vertex stage applies.
///
/// `world_scale` is surface size divided by the fitted box size; multiplying a
/// centred surface UV by it yields box-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingTransform {
    pub mode: SizingMode,
    pub resolution: [f32; 2],
    pub pixel_ratio: f32,
    pub box_size: [f32; 2],
    pub world_scale: [f32; 2],
    pub box_origin: [f32; 2],
    pub offset: [f32; 2],
    pub scale: f32,
    /// Column-major 2x2 rotation matrix.
    pub rotation: [f32; 4],
    /// Extra zoom patterns apply when a fit is active, 1 otherwise.
    pub pattern_zoom: f32,
}

impl SizingTransform {
    /// No-op transform: `map_uv` returns its input unchanged.
    pub fn identity() -> Self {
        Self {
            mode: SizingMode::Object,
            resolution: [0.0, 0.0],
            pixel_ratio: 1.0,
            box_size: [0.0, 0.0],
            world_scale: [1.0, 1.0],
            box_origin: [0.0, 0.0],
            offset: [0.0, 0.0],
            scale: 1.0,
            rotation: [1.0, 0.0, 0.0, 1.0],
            pattern_zoom: 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Maps a surface UV centred on zero (`frag / resolution - 0.5`) into
    /// graphic space.
    pub fn map_uv(&self, uv: [f32; 2]) -> [f32; 2] {
        match self.mode {
            SizingMode::Object => {
                let mut p = [0.0; 2];
                for axis in 0..2 {
                    p[axis] = uv[axis] * self.world_scale[axis]
                        + self.box_origin[axis] * (self.world_scale[axis] - 1.0)
                        + self.offset[axis];
                    p[axis] /= self.scale;
                }
                self.rotate(p)
            }
            SizingMode::Pattern => {
                let mut p = [0.0; 2];
                for axis in 0..2 {
                    p[axis] = uv[axis] + self.offset[axis] / self.world_scale[axis]
                        + self.box_origin[axis]
                        - self.box_origin[axis] / self.world_scale[axis];
                    p[axis] *= self.resolution[axis] / self.pixel_ratio;
                    p[axis] *= self.pattern_zoom / self.scale;
                }
                let mut p = self.rotate(p);
                for axis in 0..2 {
                    p[axis] += self.box_origin[axis] / self.world_scale[axis]
                        - self.box_origin[axis]
                        + 0.5;
                }
                p
            }
        }
    }

    fn rotate(&self, p: [f32; 2]) -> [f32; 2] {
        let [c0x, c0y, c1x, c1y] = self.rotation;
        [c0x * p[0] + c1x * p[1], c0y * p[0] + c1y * p[1]]
    }

    fn is_finite(&self) -> bool {
        self.box_size
            .iter()
            .chain(&self.world_scale)
            .chain(&self.offset)
            .chain(&self.rotation)
            .chain([&self.scale, &self.pattern_zoom])
            .all(|value| value.is_finite())
    }
}

impl Default for SizingTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Fits the world box described by `params` onto `surface`.
///
/// Zero-sized or non-finite surfaces, and non-positive scales, resolve to
/// [`SizingTransform::identity`].
pub fn resolve(params: &SizingParams, mode: SizingMode, surface: SurfaceSize) -> SizingTransform {
    if surface.is_degenerate() || !(params.scale.is_finite() && params.scale > 0.0) {
        tracing::debug!(?surface, scale = params.scale, "degenerate sizing input; using identity");
        return SizingTransform::identity();
    }

    let resolution = [surface.width, surface.height];
    let ratio = surface.pixel_ratio;
    let given = [
        params.world_width.max(1.0) * ratio,
        params.world_height.max(1.0) * ratio,
    ];
    let box_given = [
        if params.world_width == 0.0 { resolution[0] } else { given[0] },
        if params.world_height == 0.0 { resolution[1] } else { given[1] },
    ];

    let (box_size, pattern_zoom) = match mode {
        SizingMode::Object => {
            let side = match params.fit {
                Fit::None => box_given[0].min(box_given[1]),
                Fit::Contain => resolution[0].min(resolution[1]),
                Fit::Cover => resolution[0].max(resolution[1]),
            };
            ([side, side], 1.0)
        }
        SizingMode::Pattern => {
            let box_ratio = given[0] / given[1];
            let unfitted = box_ratio * (box_given[0] / box_ratio).min(box_given[1]);
            let width = match params.fit {
                Fit::None => unfitted,
                Fit::Contain => box_ratio * (resolution[0] / box_ratio).min(resolution[1]),
                Fit::Cover => box_ratio * (resolution[0] / box_ratio).max(resolution[1]),
            };
            let zoom = if params.fit == Fit::None { 1.0 } else { unfitted / width };
            ([width, width / box_ratio], zoom)
        }
    };

    let radians = params.rotation.to_radians();
    let (sin, cos) = radians.sin_cos();
    let transform = SizingTransform {
        mode,
        resolution,
        pixel_ratio: ratio,
        box_size,
        world_scale: [resolution[0] / box_size[0], resolution[1] / box_size[1]],
        box_origin: [0.5 - params.origin_x, params.origin_y - 0.5],
        offset: [-params.offset_x, params.offset_y],
        scale: params.scale,
        rotation: [cos, sin, -sin, cos],
        pattern_zoom,
    };

    if transform.is_finite() {
        transform
    } else {
        tracing::debug!(?params, ?surface, "sizing produced non-finite values; using identity");
        SizingTransform::identity()
    }
}
