//! Mesh gradient of up to ten color spots, distorted by two sine waves.
//!
//! The kind renders a still image; speed defaults to 0 but the motion fields
//! are kept so a mount can still animate it.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{self, MotionParams, ParamDef, ParamError, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMeshGradientParams {
    pub colors: Vec<Color>,
    /// Seed for the placement of the color spots.
    pub positions: f32,
    pub wave_x: f32,
    pub wave_x_shift: f32,
    pub wave_y: f32,
    pub wave_y_shift: f32,
    pub mixing: f32,
    pub grain_mixer: f32,
    pub grain_overlay: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

/// Numeric look of a preset, in schema order.
struct Waves {
    positions: f32,
    wave_x: f32,
    wave_x_shift: f32,
    wave_y: f32,
    wave_y_shift: f32,
    mixing: f32,
    grain_mixer: f32,
    grain_overlay: f32,
}

impl StaticMeshGradientParams {
    fn look(colors: &[&str], rotation: f32, waves: Waves) -> Self {
        Self {
            colors: colors.iter().map(|color| normalize_color(*color)).collect(),
            positions: waves.positions,
            wave_x: waves.wave_x,
            wave_x_shift: waves.wave_x_shift,
            wave_y: waves.wave_y,
            wave_y_shift: waves.wave_y_shift,
            mixing: waves.mixing,
            grain_mixer: waves.grain_mixer,
            grain_overlay: waves.grain_overlay,
            motion: MotionParams::new(0.0, 0.0),
            sizing: params::sizing_with(SizingMode::Object, 1.0, rotation),
        }
    }
}

impl Default for StaticMeshGradientParams {
    fn default() -> Self {
        Self::look(
            &["#ffad0a", "#6200ff", "#e2a3ff", "#ff99fd"],
            270.0,
            Waves {
                positions: 2.0,
                wave_x: 1.0,
                wave_x_shift: 0.6,
                wave_y: 1.0,
                wave_y_shift: 0.21,
                mixing: 0.93,
                grain_mixer: 0.0,
                grain_overlay: 0.0,
            },
        )
    }
}

static SCHEMA: [ParamDef; 20] = [
    ParamDef::colors("colors", "Up to 10 colors used in the gradient", 10),
    ParamDef::number("positions", "Color spots placement", 0.0, 100.0),
    ParamDef::number("waveX", "Strength of sine wave distortion along X axis", 0.0, 1.0),
    ParamDef::number("waveXShift", "Phase offset applied to the X-axis wave", 0.0, 1.0),
    ParamDef::number("waveY", "Strength of sine wave distortion along Y axis", 0.0, 1.0),
    ParamDef::number("waveYShift", "Phase offset applied to the Y-axis wave", 0.0, 1.0),
    ParamDef::number("mixing", "Blending behavior (sharper vs. smoother color transitions)", 0.0, 1.0),
    ParamDef::number("grainMixer", "Strength of grain distortion applied to color edges", 0.0, 1.0),
    ParamDef::number("grainOverlay", "Post-processing RGB grain overlay", 0.0, 1.0),
    params::SPEED,
    params::FRAME,
    params::SCALE,
    params::ROTATION,
    params::OFFSET_X,
    params::OFFSET_Y,
    params::FIT,
    params::WORLD_WIDTH,
    params::WORLD_HEIGHT,
    params::ORIGIN_X,
    params::ORIGIN_Y,
];

impl ShaderParams for StaticMeshGradientParams {
    const KIND: ShaderKind = ShaderKind::StaticMeshGradient;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "1960s",
                Self::look(
                    &["#000000", "#082400", "#b1aa91", "#8e8c15"],
                    0.0,
                    Waves {
                        positions: 42.0,
                        wave_x: 0.45,
                        wave_x_shift: 0.0,
                        wave_y: 1.0,
                        wave_y_shift: 0.0,
                        mixing: 0.0,
                        grain_mixer: 0.37,
                        grain_overlay: 0.78,
                    },
                ),
            ),
            Preset::new(
                "Sunset",
                Self::look(
                    &["#264653", "#9c2b2b", "#f4a261", "#ffffff"],
                    0.0,
                    Waves {
                        positions: 0.0,
                        wave_x: 0.6,
                        wave_x_shift: 0.7,
                        wave_y: 0.7,
                        wave_y_shift: 0.7,
                        mixing: 0.5,
                        grain_mixer: 0.0,
                        grain_overlay: 0.0,
                    },
                ),
            ),
            Preset::new(
                "Sea",
                Self::look(
                    &["#013b65", "#03738c", "#a3d3ff", "#f2faef"],
                    0.0,
                    Waves {
                        positions: 0.0,
                        wave_x: 0.53,
                        wave_x_shift: 0.0,
                        wave_y: 0.95,
                        wave_y_shift: 0.64,
                        mixing: 0.5,
                        grain_mixer: 0.0,
                        grain_overlay: 0.0,
                    },
                ),
            ),
        ]
    }

    fn sizing(&self) -> &SizingParams {
        &self.sizing
    }

    fn sizing_mut(&mut self) -> &mut SizingParams {
        &mut self.sizing
    }

    fn motion(&self) -> Option<MotionParams> {
        Some(self.motion)
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "colors" => ParamValue::Colors(self.colors.clone()),
            "positions" => ParamValue::Number(self.positions),
            "waveX" => ParamValue::Number(self.wave_x),
            "waveXShift" => ParamValue::Number(self.wave_x_shift),
            "waveY" => ParamValue::Number(self.wave_y),
            "waveYShift" => ParamValue::Number(self.wave_y_shift),
            "mixing" => ParamValue::Number(self.mixing),
            "grainMixer" => ParamValue::Number(self.grain_mixer),
            "grainOverlay" => ParamValue::Number(self.grain_overlay),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colors" => self.colors = params::color_list(name, value, Self::KIND.color_capacity())?,
            "positions" => self.positions = params::number(name, value)?,
            "waveX" => self.wave_x = params::number(name, value)?,
            "waveXShift" => self.wave_x_shift = params::number(name, value)?,
            "waveY" => self.wave_y = params::number(name, value)?,
            "waveYShift" => self.wave_y_shift = params::number(name, value)?,
            "mixing" => self.mixing = params::number(name, value)?,
            "grainMixer" => self.grain_mixer = params::number(name, value)?,
            "grainOverlay" => self.grain_overlay = params::number(name, value)?,
            _ => {
                return params::set_common(Self::KIND, &mut self.sizing, Some(&mut self.motion), name, value)
            }
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color_list("u_colors", "u_colorsCount", &self.colors);
        bag.float("u_positions", self.positions);
        bag.float("u_waveX", self.wave_x);
        bag.float("u_waveXShift", self.wave_x_shift);
        bag.float("u_waveY", self.wave_y);
        bag.float("u_waveYShift", self.wave_y_shift);
        bag.float("u_mixing", self.mixing);
        bag.float("u_grainMixer", self.grain_mixer);
        bag.float("u_grainOverlay", self.grain_overlay);
        bag.sizing(&self.sizing);
        bag
    }
}
