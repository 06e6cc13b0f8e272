//! Sizing vocabulary shared by every shader kind: how a logical "world" box is
//! fitted onto the render surface, and how large that surface should be in
//! device pixels.
//!
//! Types:
//!
//! - `Fit` mirrors CSS `object-fit` (`none`, `contain`, `cover`) and carries the
//!   integer code the shaders compare against.
//! - `SizingMode` distinguishes fixed-ratio objects from patterns whose box
//!   follows the world aspect ratio and tiles across the surface.
//! - `SizingParams` is the user-facing sizing block embedded in every parameter
//!   bag, with object and pattern defaults.
//! - `SurfaceSize`, `SizingTransform` and `RenderTarget` describe the resolved
//!   outputs.
//!
//! Functions:
//!
//! - `resolve` turns params + surface into a `SizingTransform`.
//! - `resolve_render_target` picks canvas dimensions from a CSS size.

mod resolve;
mod target;

use serde::{Deserialize, Serialize};

pub use resolve::{resolve, SizingTransform};
pub use target::{resolve_render_target, RenderScaleOptions, RenderTarget, DEFAULT_MAX_PIXEL_COUNT};

/// How the world box is scaled onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Keep the world box at its own size.
    #[default]
    None,
    /// Scale the box to fit entirely inside the surface.
    Contain,
    /// Scale the box to fill the surface, cropping overflow.
    Cover,
}

impl Fit {
    pub const ALL: [Fit; 3] = [Fit::None, Fit::Contain, Fit::Cover];

    /// Integer code uploaded as `u_fit`.
    pub fn code(self) -> i32 {
        match self {
            Fit::None => 0,
            Fit::Contain => 1,
            Fit::Cover => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fit::None => "none",
            Fit::Contain => "contain",
            Fit::Cover => "cover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Fit::None),
            "contain" => Some(Fit::Contain),
            "cover" => Some(Fit::Cover),
            _ => None,
        }
    }
}

/// Coordinate space a shader kind draws in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    /// Graphics with a fixed 1:1 ratio, e.g. gradients anchored to a box.
    Object,
    /// Repeating graphics that respect the world width/height ratio.
    Pattern,
}

/// Sizing block shared by every parameter bag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingParams {
    pub fit: Fit,
    pub scale: f32,
    /// Degrees.
    pub rotation: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Zero means "use the surface width".
    pub world_width: f32,
    /// Zero means "use the surface height".
    pub world_height: f32,
}

impl SizingParams {
    pub const fn object_default() -> Self {
        Self {
            fit: Fit::Contain,
            ..Self::pattern_default()
        }
    }

    pub const fn pattern_default() -> Self {
        Self {
            fit: Fit::None,
            scale: 1.0,
            rotation: 0.0,
            origin_x: 0.5,
            origin_y: 0.5,
            offset_x: 0.0,
            offset_y: 0.0,
            world_width: 0.0,
            world_height: 0.0,
        }
    }

    pub fn default_for(mode: SizingMode) -> Self {
        match mode {
            SizingMode::Object => Self::object_default(),
            SizingMode::Pattern => Self::pattern_default(),
        }
    }
}

impl Default for SizingParams {
    fn default() -> Self {
        Self::pattern_default()
    }
}

/// Render surface in device pixels plus the CSS→device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.pixel_ratio.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
            || self.pixel_ratio <= 0.0
    }
}

impl From<RenderTarget> for SurfaceSize {
    fn from(target: RenderTarget) -> Self {
        Self {
            width: target.width as f32,
            height: target.height as f32,
            pixel_ratio: target.pixel_ratio,
        }
    }
}
