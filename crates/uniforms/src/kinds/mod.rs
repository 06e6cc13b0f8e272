//! Shader kinds: their parameter bags, uniform mappings and built-in presets.
//!
//! `ShaderKind` names a kind at runtime and `AnyParams` carries a bag of any
//! kind for callers that only learn the kind from user input.

pub mod dithering;
pub mod dot_grid;
pub mod grain_gradient;
pub mod neuro_noise;
pub mod simplex_noise;
pub mod spiral;
pub mod static_mesh_gradient;
pub mod static_radial_gradient;
pub mod swirl;
pub mod warp;

use std::fmt;

use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::layout::UniformLayout;
use crate::params::{MotionParams, ParamAlias, ParamDef, ParamError, ParamPatch, ParamValue, ShaderParams};
use crate::presets::{apply_preset, find_preset, matching_preset};
use crate::value::UniformBag;

use dithering::DitheringParams;
use dot_grid::DotGridParams;
use grain_gradient::GrainGradientParams;
use neuro_noise::NeuroNoiseParams;
use simplex_noise::SimplexNoiseParams;
use spiral::SpiralParams;
use static_mesh_gradient::StaticMeshGradientParams;
use static_radial_gradient::StaticRadialGradientParams;
use swirl::SwirlParams;
use warp::WarpParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Dithering,
    DotGrid,
    GrainGradient,
    NeuroNoise,
    SimplexNoise,
    Spiral,
    StaticMeshGradient,
    StaticRadialGradient,
    Swirl,
    Warp,
}

/// Runs `$body` with `$P` bound to the parameter type of `$kind`.
macro_rules! with_params_type {
    ($kind:expr, $P:ident => $body:expr) => {
        match $kind {
            ShaderKind::Dithering => {
                type $P = DitheringParams;
                $body
            }
            ShaderKind::DotGrid => {
                type $P = DotGridParams;
                $body
            }
            ShaderKind::GrainGradient => {
                type $P = GrainGradientParams;
                $body
            }
            ShaderKind::NeuroNoise => {
                type $P = NeuroNoiseParams;
                $body
            }
            ShaderKind::SimplexNoise => {
                type $P = SimplexNoiseParams;
                $body
            }
            ShaderKind::Spiral => {
                type $P = SpiralParams;
                $body
            }
            ShaderKind::StaticMeshGradient => {
                type $P = StaticMeshGradientParams;
                $body
            }
            ShaderKind::StaticRadialGradient => {
                type $P = StaticRadialGradientParams;
                $body
            }
            ShaderKind::Swirl => {
                type $P = SwirlParams;
                $body
            }
            ShaderKind::Warp => {
                type $P = WarpParams;
                $body
            }
        }
    };
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 10] = [
        ShaderKind::Dithering,
        ShaderKind::DotGrid,
        ShaderKind::GrainGradient,
        ShaderKind::NeuroNoise,
        ShaderKind::SimplexNoise,
        ShaderKind::Spiral,
        ShaderKind::StaticMeshGradient,
        ShaderKind::StaticRadialGradient,
        ShaderKind::Swirl,
        ShaderKind::Warp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Dithering => "dithering",
            ShaderKind::DotGrid => "dot-grid",
            ShaderKind::GrainGradient => "grain-gradient",
            ShaderKind::NeuroNoise => "neuro-noise",
            ShaderKind::SimplexNoise => "simplex-noise",
            ShaderKind::Spiral => "spiral",
            ShaderKind::StaticMeshGradient => "static-mesh-gradient",
            ShaderKind::StaticRadialGradient => "static-radial-gradient",
            ShaderKind::Swirl => "swirl",
            ShaderKind::Warp => "warp",
        }
    }

    /// Accepts `dot-grid`, `dot_grid`, `DotGrid` and `dotgrid`.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().replace('-', "") == wanted)
    }

    pub fn description(self) -> &'static str {
        match self {
            ShaderKind::Dithering => "Animated 2-color dithering over a choice of pattern sources",
            ShaderKind::DotGrid => "Static grid of circles, diamonds, squares or triangles",
            ShaderKind::GrainGradient => "Multi-color gradient with grainy, noise-textured distortion",
            ShaderKind::NeuroNoise => "Glowing web of interconnected neon lines",
            ShaderKind::SimplexNoise => "Multi-color gradient mapped into smooth, animated noise curves",
            ShaderKind::Spiral => "Single spiral stroke with perspective falloff and noise",
            ShaderKind::StaticMeshGradient => "Mesh gradient of up to 10 color spots with wave distortion",
            ShaderKind::StaticRadialGradient => "Radial gradient with a movable focal point and grain",
            ShaderKind::Swirl => "Color bands twisting into spirals and arcs around the center",
            ShaderKind::Warp => "Color gradient deformed by noise, swirls and a base pattern",
        }
    }

    pub fn sizing_mode(self) -> SizingMode {
        match self {
            ShaderKind::GrainGradient
            | ShaderKind::StaticMeshGradient
            | ShaderKind::StaticRadialGradient
            | ShaderKind::Swirl => SizingMode::Object,
            ShaderKind::Dithering
            | ShaderKind::DotGrid
            | ShaderKind::NeuroNoise
            | ShaderKind::SimplexNoise
            | ShaderKind::Spiral
            | ShaderKind::Warp => SizingMode::Pattern,
        }
    }

    /// Slots reserved for the `u_colors` array, 0 for kinds without one.
    pub fn color_capacity(self) -> usize {
        match self {
            ShaderKind::GrainGradient => 7,
            ShaderKind::SimplexNoise
            | ShaderKind::StaticMeshGradient
            | ShaderKind::StaticRadialGradient
            | ShaderKind::Swirl
            | ShaderKind::Warp => 10,
            ShaderKind::Dithering | ShaderKind::DotGrid | ShaderKind::NeuroNoise | ShaderKind::Spiral => 0,
        }
    }

    pub fn is_animated(self) -> bool {
        with_params_type!(self, P => P::default().motion().is_some())
    }

    pub fn schema(self) -> &'static [ParamDef] {
        with_params_type!(self, P => P::schema())
    }

    pub fn aliases(self) -> &'static [ParamAlias] {
        with_params_type!(self, P => P::aliases())
    }

    pub fn preset_names(self) -> Vec<String> {
        with_params_type!(self, P => P::presets().into_iter().map(|preset| preset.name).collect())
    }

    /// std140 layout of the kind's parameter block.
    pub fn layout(self) -> UniformLayout {
        UniformLayout::from_bag(&AnyParams::default_for(self).to_uniforms(), self.color_capacity())
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameter bag of a kind chosen at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyParams {
    Dithering(DitheringParams),
    DotGrid(DotGridParams),
    GrainGradient(GrainGradientParams),
    NeuroNoise(NeuroNoiseParams),
    SimplexNoise(SimplexNoiseParams),
    Spiral(SpiralParams),
    StaticMeshGradient(StaticMeshGradientParams),
    StaticRadialGradient(StaticRadialGradientParams),
    Swirl(SwirlParams),
    Warp(WarpParams),
}

macro_rules! dispatch {
    ($value:expr, $params:ident => $body:expr) => {
        match $value {
            AnyParams::Dithering($params) => $body,
            AnyParams::DotGrid($params) => $body,
            AnyParams::GrainGradient($params) => $body,
            AnyParams::NeuroNoise($params) => $body,
            AnyParams::SimplexNoise($params) => $body,
            AnyParams::Spiral($params) => $body,
            AnyParams::StaticMeshGradient($params) => $body,
            AnyParams::StaticRadialGradient($params) => $body,
            AnyParams::Swirl($params) => $body,
            AnyParams::Warp($params) => $body,
        }
    };
}

impl AnyParams {
    pub fn default_for(kind: ShaderKind) -> Self {
        match kind {
            ShaderKind::Dithering => AnyParams::Dithering(Default::default()),
            ShaderKind::DotGrid => AnyParams::DotGrid(Default::default()),
            ShaderKind::GrainGradient => AnyParams::GrainGradient(Default::default()),
            ShaderKind::NeuroNoise => AnyParams::NeuroNoise(Default::default()),
            ShaderKind::SimplexNoise => AnyParams::SimplexNoise(Default::default()),
            ShaderKind::Spiral => AnyParams::Spiral(Default::default()),
            ShaderKind::StaticMeshGradient => AnyParams::StaticMeshGradient(Default::default()),
            ShaderKind::StaticRadialGradient => AnyParams::StaticRadialGradient(Default::default()),
            ShaderKind::Swirl => AnyParams::Swirl(Default::default()),
            ShaderKind::Warp => AnyParams::Warp(Default::default()),
        }
    }

    /// Built-in preset `name` of `kind`.
    pub fn preset(kind: ShaderKind, name: &str) -> Option<Self> {
        Some(match kind {
            ShaderKind::Dithering => AnyParams::Dithering(find_preset(name)?.params),
            ShaderKind::DotGrid => AnyParams::DotGrid(find_preset(name)?.params),
            ShaderKind::GrainGradient => AnyParams::GrainGradient(find_preset(name)?.params),
            ShaderKind::NeuroNoise => AnyParams::NeuroNoise(find_preset(name)?.params),
            ShaderKind::SimplexNoise => AnyParams::SimplexNoise(find_preset(name)?.params),
            ShaderKind::Spiral => AnyParams::Spiral(find_preset(name)?.params),
            ShaderKind::StaticMeshGradient => AnyParams::StaticMeshGradient(find_preset(name)?.params),
            ShaderKind::StaticRadialGradient => AnyParams::StaticRadialGradient(find_preset(name)?.params),
            ShaderKind::Swirl => AnyParams::Swirl(find_preset(name)?.params),
            ShaderKind::Warp => AnyParams::Warp(find_preset(name)?.params),
        })
    }

    /// Default bag of `kind` with `patch` applied.
    pub fn from_patch(kind: ShaderKind, patch: &ParamPatch) -> Result<Self, ParamError> {
        let mut params = Self::default_for(kind);
        params.apply(patch)?;
        Ok(params)
    }

    pub fn kind(&self) -> ShaderKind {
        match self {
            AnyParams::Dithering(_) => ShaderKind::Dithering,
            AnyParams::DotGrid(_) => ShaderKind::DotGrid,
            AnyParams::GrainGradient(_) => ShaderKind::GrainGradient,
            AnyParams::NeuroNoise(_) => ShaderKind::NeuroNoise,
            AnyParams::SimplexNoise(_) => ShaderKind::SimplexNoise,
            AnyParams::Spiral(_) => ShaderKind::Spiral,
            AnyParams::StaticMeshGradient(_) => ShaderKind::StaticMeshGradient,
            AnyParams::StaticRadialGradient(_) => ShaderKind::StaticRadialGradient,
            AnyParams::Swirl(_) => ShaderKind::Swirl,
            AnyParams::Warp(_) => ShaderKind::Warp,
        }
    }

    pub fn apply(&mut self, patch: &ParamPatch) -> Result<(), ParamError> {
        dispatch!(self, params => params.apply(patch))
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        dispatch!(self, params => params.get(name))
    }

    pub fn to_patch(&self) -> ParamPatch {
        dispatch!(self, params => params.to_patch())
    }

    pub fn to_uniforms(&self) -> UniformBag {
        dispatch!(self, params => params.to_uniforms())
    }

    pub fn sizing(&self) -> &SizingParams {
        dispatch!(self, params => params.sizing())
    }

    pub fn motion(&self) -> Option<MotionParams> {
        dispatch!(self, params => params.motion())
    }

    /// Switches to the built-in preset `name`, keeping the world size.
    /// Returns false when the kind has no such preset.
    pub fn switch_preset(&mut self, name: &str) -> bool {
        dispatch!(self, params => match find_preset(name) {
            Some(preset) => {
                *params = apply_preset(params, &preset);
                true
            }
            None => false,
        })
    }

    /// Name of the built-in preset this bag equals, ignoring the frame.
    pub fn matching_preset(&self) -> Option<String> {
        fn matching<P: ShaderParams>(params: &P) -> Option<String> {
            matching_preset(params, &P::presets()).map(|preset| preset.name.clone())
        }
        dispatch!(self, params => matching(params))
    }
}
