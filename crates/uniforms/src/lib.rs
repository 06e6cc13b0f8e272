//! Typed shader parameters and their mapping to GPU uniforms.
//!
//! Types:
//!
//! - `ShaderParams` is implemented by one parameter bag per shader kind
//!   (`DitheringParams`, `WarpParams`, ...). `Default` is the kind's default
//!   preset, and `to_uniforms` is a pure mapping into a `UniformBag`.
//! - `ParamPatch`/`ParamValue` carry untyped partial updates from links, UI
//!   controls and the command line; `apply` validates a whole patch before
//!   touching the bag.
//! - `UniformLayout` packs a bag into a std140 block and emits the matching
//!   GLSL declaration.
//! - `RenderMount` is the seam to whatever draws the shader; `ShaderSession`
//!   drives it and skips uploads that would not change anything.
//!
//! Functions:
//!
//! - `find_preset`, `apply_preset` and `matching_preset` work on the
//!   built-in preset lists.
//! - `assemble_fragment_shader` wraps a GLSL body with the uniform blocks.

mod layout;
mod motion;
mod mount;
mod params;
mod presets;
mod value;

pub mod kinds;

pub use kinds::dithering::{DitheringParams, DitheringShape, DitheringType};
pub use kinds::dot_grid::{DotGridParams, DotGridShape};
pub use kinds::grain_gradient::{GrainGradientParams, GrainGradientShape};
pub use kinds::neuro_noise::NeuroNoiseParams;
pub use kinds::simplex_noise::SimplexNoiseParams;
pub use kinds::spiral::SpiralParams;
pub use kinds::static_mesh_gradient::StaticMeshGradientParams;
pub use kinds::static_radial_gradient::StaticRadialGradientParams;
pub use kinds::swirl::SwirlParams;
pub use kinds::warp::{WarpParams, WarpPattern};
pub use kinds::{AnyParams, ShaderKind};
pub use layout::{
    assemble_fragment_shader, FrameUniforms, LayoutError, UniformDecl, UniformLayout, UniformType,
    FRAME_BLOCK, PARAMS_BLOCK,
};
pub use motion::MotionClock;
pub use mount::{MountRequest, RenderMount, ShaderSession};
pub use params::{
    coerce, MotionParams, ParamAlias, ParamDef, ParamEnum, ParamError, ParamPatch, ParamType, ParamValue,
    ShaderParams,
};
pub use presets::{apply_preset, find_in, find_preset, matching_preset, Preset};
pub use value::{UniformBag, UniformValue};
