//! Color gradient warped by noise, swirls and a base pattern.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{
    self, param_enum, MotionParams, ParamDef, ParamEnum, ParamError, ParamType, ParamValue, ShaderParams,
};
use crate::presets::Preset;
use crate::value::UniformBag;

param_enum! {
    pub enum WarpPattern {
        Checks = ("checks", 0),
        Stripes = ("stripes", 1),
        Edge = ("edge", 2),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarpParams {
    pub colors: Vec<Color>,
    pub proportion: f32,
    pub softness: f32,
    pub distortion: f32,
    pub swirl: f32,
    pub swirl_iterations: f32,
    pub shape_scale: f32,
    pub shape: WarpPattern,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

/// Preset description; fields not listed keep the default.
struct Look<'a> {
    colors: &'a [&'a str],
    scale: f32,
    rotation: f32,
    offset_y: f32,
    speed: f32,
    proportion: f32,
    softness: f32,
    distortion: f32,
    swirl: f32,
    swirl_iterations: f32,
    shape_scale: f32,
    shape: WarpPattern,
}

impl Look<'_> {
    fn build(self) -> WarpParams {
        let mut sizing = params::sizing_with(SizingMode::Pattern, self.scale, self.rotation);
        sizing.offset_y = self.offset_y;
        WarpParams {
            colors: self.colors.iter().map(|color| normalize_color(*color)).collect(),
            proportion: self.proportion,
            softness: self.softness,
            distortion: self.distortion,
            swirl: self.swirl,
            swirl_iterations: self.swirl_iterations,
            shape_scale: self.shape_scale,
            shape: self.shape,
            motion: MotionParams::new(self.speed, 0.0),
            sizing,
        }
    }
}

impl Default for WarpParams {
    fn default() -> Self {
        Look {
            colors: &["#121212", "#9470ff", "#121212", "#8838ff"],
            scale: 1.0,
            rotation: 0.0,
            offset_y: 0.0,
            speed: 1.0,
            proportion: 0.45,
            softness: 1.0,
            distortion: 0.25,
            swirl: 0.8,
            swirl_iterations: 10.0,
            shape_scale: 0.1,
            shape: WarpPattern::Checks,
        }
        .build()
    }
}

static SCHEMA: [ParamDef; 19] = [
    ParamDef::colors("colors", "Up to 10 colors in the gradient", 10),
    ParamDef::number("proportion", "Blend point between 2 colors (0.5 = equal distribution)", 0.0, 1.0),
    ParamDef::number("softness", "Color transition sharpness (0 = hard edge, 1 = smooth gradient)", 0.0, 1.0),
    ParamDef::number("distortion", "Strength of noise-based distortion", 0.0, 1.0),
    ParamDef::number("swirl", "Strength of the swirl distortion", 0.0, 1.0),
    ParamDef::number("swirlIterations", "Number of layered swirl passes", 0.0, 20.0),
    ParamDef::new(
        "shape",
        ParamType::Choice(<WarpPattern as ParamEnum>::NAMES),
        "Base pattern type",
    ),
    ParamDef::number("shapeScale", "Zoom level of the base pattern", 0.0, 1.0),
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

impl ShaderParams for WarpParams {
    const KIND: ShaderKind = ShaderKind::Warp;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "Cauldron Pot",
                Look {
                    colors: &["#a7e58b", "#324472", "#0a180d"],
                    scale: 0.9,
                    rotation: 160.0,
                    offset_y: 0.0,
                    speed: 10.0,
                    proportion: 0.64,
                    softness: 1.5,
                    distortion: 0.2,
                    swirl: 0.86,
                    swirl_iterations: 7.0,
                    shape_scale: 0.6,
                    shape: WarpPattern::Edge,
                }
                .build(),
            ),
            Preset::new(
                "Live Ink",
                Look {
                    colors: &["#111314", "#9faeab", "#f3fee7", "#f3fee7"],
                    scale: 1.2,
                    rotation: 44.0,
                    offset_y: -0.3,
                    speed: 2.5,
                    proportion: 0.05,
                    softness: 0.0,
                    distortion: 0.25,
                    swirl: 0.8,
                    swirl_iterations: 10.0,
                    shape_scale: 0.28,
                    shape: WarpPattern::Checks,
                }
                .build(),
            ),
            Preset::new(
                "Kelp",
                Look {
                    colors: &["#dbff8f", "#404f3e", "#091316"],
                    scale: 0.8,
                    rotation: 50.0,
                    offset_y: 0.0,
                    speed: 20.0,
                    proportion: 0.67,
                    softness: 0.0,
                    distortion: 0.0,
                    swirl: 0.2,
                    swirl_iterations: 3.0,
                    shape_scale: 1.0,
                    shape: WarpPattern::Stripes,
                }
                .build(),
            ),
            Preset::new(
                "Nectar",
                Look {
                    colors: &["#151310", "#d3a86b", "#f0edea"],
                    scale: 2.0,
                    rotation: 0.0,
                    offset_y: 0.6,
                    speed: 4.2,
                    proportion: 0.24,
                    softness: 1.0,
                    distortion: 0.21,
                    swirl: 0.57,
                    swirl_iterations: 10.0,
                    shape_scale: 0.75,
                    shape: WarpPattern::Edge,
                }
                .build(),
            ),
            Preset::new(
                "Passion",
                Look {
                    colors: &["#3b1515", "#954751", "#ffc085"],
                    scale: 2.5,
                    rotation: 1.35,
                    offset_y: 0.0,
                    speed: 3.0,
                    proportion: 0.5,
                    softness: 1.0,
                    distortion: 0.09,
                    swirl: 0.9,
                    swirl_iterations: 6.0,
                    shape_scale: 0.25,
                    shape: WarpPattern::Checks,
                }
                .build(),
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
            "proportion" => ParamValue::Number(self.proportion),
            "softness" => ParamValue::Number(self.softness),
            "distortion" => ParamValue::Number(self.distortion),
            "swirl" => ParamValue::Number(self.swirl),
            "swirlIterations" => ParamValue::Number(self.swirl_iterations),
            "shape" => params::option(self.shape),
            "shapeScale" => ParamValue::Number(self.shape_scale),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colors" => self.colors = params::color_list(name, value, Self::KIND.color_capacity())?,
            "proportion" => self.proportion = params::number(name, value)?,
            "softness" => self.softness = params::number(name, value)?,
            "distortion" => self.distortion = params::number(name, value)?,
            "swirl" => self.swirl = params::number(name, value)?,
            "swirlIterations" => self.swirl_iterations = params::number(name, value)?,
            "shape" => self.shape = params::choice(name, value)?,
            "shapeScale" => self.shape_scale = params::number(name, value)?,
            _ => {
                return params::set_common(Self::KIND, &mut self.sizing, Some(&mut self.motion), name, value)
            }
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color_list("u_colors", "u_colorsCount", &self.colors);
        bag.float("u_proportion", self.proportion);
        bag.float("u_softness", self.softness);
        bag.float("u_distortion", self.distortion);
        bag.float("u_swirl", self.swirl);
        bag.float("u_swirlIterations", self.swirl_iterations);
        bag.float("u_shapeScale", self.shape_scale);
        bag.option("u_shape", self.shape);
        bag.sizing(&self.sizing);
        bag
    }
}
