//! Fractal web of glowing lines.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{self, MotionParams, ParamDef, ParamError, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuroNoiseParams {
    pub color_front: Color,
    pub color_mid: Color,
    pub color_back: Color,
    pub brightness: f32,
    pub contrast: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

impl NeuroNoiseParams {
    fn look(front: &str, mid: &str, back: &str, brightness: f32, contrast: f32, scale: f32) -> Self {
        Self {
            color_front: normalize_color(front),
            color_mid: normalize_color(mid),
            color_back: normalize_color(back),
            brightness,
            contrast,
            motion: MotionParams::new(1.0, 0.0),
            sizing: params::sizing_with(SizingMode::Pattern, scale, 0.0),
        }
    }
}

impl Default for NeuroNoiseParams {
    fn default() -> Self {
        Self::look("#ffffff", "#47a6ff", "#000000", 0.05, 0.3, 1.0)
    }
}

static SCHEMA: [ParamDef; 16] = [
    ParamDef::color("colorFront", "Graphics highlight color"),
    ParamDef::color("colorMid", "Graphics main color"),
    ParamDef::color("colorBack", "Background color"),
    ParamDef::number("brightness", "Luminosity of the crossing points", 0.0, 1.0),
    ParamDef::number("contrast", "Sharpness of the bright-dark transition", 0.0, 1.0),
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

impl ShaderParams for NeuroNoiseParams {
    const KIND: ShaderKind = ShaderKind::NeuroNoise;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Preset::new("Sensation", Self::look("#00c8ff", "#fbff00", "#8b42ff", 0.19, 0.12, 3.0)),
            Preset::new("Bloodstream", Self::look("#ff0000", "#ff0000", "#ffffff", 0.24, 0.17, 0.7)),
            Preset::new("Ghost", Self::look("#ffffff", "#000000", "#ffffff", 0.0, 1.0, 0.55)),
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
            "colorFront" => ParamValue::Color(self.color_front),
            "colorMid" => ParamValue::Color(self.color_mid),
            "colorBack" => ParamValue::Color(self.color_back),
            "brightness" => ParamValue::Number(self.brightness),
            "contrast" => ParamValue::Number(self.contrast),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colorFront" => self.color_front = params::color(name, value)?,
            "colorMid" => self.color_mid = params::color(name, value)?,
            "colorBack" => self.color_back = params::color(name, value)?,
            "brightness" => self.brightness = params::number(name, value)?,
            "contrast" => self.contrast = params::number(name, value)?,
            _ => {
                return params::set_common(Self::KIND, &mut self.sizing, Some(&mut self.motion), name, value)
            }
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color("u_colorFront", self.color_front);
        bag.color("u_colorMid", self.color_mid);
        bag.color("u_colorBack", self.color_back);
        bag.float("u_brightness", self.brightness);
        bag.float("u_contrast", self.contrast);
        bag.sizing(&self.sizing);
        bag
    }
}
