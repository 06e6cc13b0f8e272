//! Multi-color gradient with grainy noise distortion in seven abstract forms.

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
    pub enum GrainGradientShape {
        Wave = ("wave", 1),
        Dots = ("dots", 2),
        Truchet = ("truchet", 3),
        Corners = ("corners", 4),
        Ripple = ("ripple", 5),
        Blob = ("blob", 6),
        Sphere = ("sphere", 7),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrainGradientParams {
    pub color_back: Color,
    /// Up to seven colors, in gradient order.
    pub colors: Vec<Color>,
    pub softness: f32,
    pub intensity: f32,
    pub noise: f32,
    pub shape: GrainGradientShape,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

impl Default for GrainGradientParams {
    fn default() -> Self {
        build(
            SizingMode::Object,
            1.0,
            "#000000",
            &["#7300ff", "#eba8ff", "#00bfff", "#2a00ff"],
            [0.5, 0.5, 0.25],
            GrainGradientShape::Corners,
        )
    }
}

/// `tuning` is `[softness, intensity, noise]`.
fn build(
    mode: SizingMode,
    scale: f32,
    back: &str,
    colors: &[&str],
    tuning: [f32; 3],
    shape: GrainGradientShape,
) -> GrainGradientParams {
    let [softness, intensity, noise] = tuning;
    GrainGradientParams {
        color_back: normalize_color(back),
        colors: colors.iter().map(|color| normalize_color(*color)).collect(),
        softness,
        intensity,
        noise,
        shape,
        motion: MotionParams::new(1.0, 0.0),
        sizing: params::sizing_with(mode, scale, 0.0),
    }
}

static SCHEMA: [ParamDef; 17] = [
    ParamDef::colors("colors", "Up to 7 colors used in the gradient", 7),
    ParamDef::color("colorBack", "Background color"),
    ParamDef::number("softness", "Color transition sharpness (0 = hard edge, 1 = smooth gradient)", 0.0, 1.0),
    ParamDef::number("intensity", "Distortion between color bands", 0.0, 1.0),
    ParamDef::number("noise", "Grainy noise overlay", 0.0, 1.0),
    ParamDef::new(
        "shape",
        ParamType::Choice(<GrainGradientShape as ParamEnum>::NAMES),
        "Shape type",
    ),
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

impl ShaderParams for GrainGradientParams {
    const KIND: ShaderKind = ShaderKind::GrainGradient;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        use GrainGradientShape as S;
        use SizingMode::{Object, Pattern};
        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "Wave",
                build(Pattern, 1.0, "#000a0f", &["#c4730b", "#bdad5f", "#d8ccc7"], [0.7, 0.15, 0.5], S::Wave),
            ),
            Preset::new(
                "Dots",
                build(
                    Pattern,
                    0.6,
                    "#0a0000",
                    &["#6f0000", "#0080ff", "#f2ebc9", "#33cc33"],
                    [1.0, 1.0, 0.7],
                    S::Dots,
                ),
            ),
            Preset::new(
                "Truchet",
                build(Pattern, 1.0, "#0a0000", &["#6f2200", "#eabb7c", "#39b523"], [0.0, 0.2, 1.0], S::Truchet),
            ),
            Preset::new(
                "Ripple",
                build(Object, 0.5, "#140a00", &["#6f2d00", "#88ddae", "#2c0b1d"], [0.5, 0.5, 0.5], S::Ripple),
            ),
            Preset::new(
                "Blob",
                build(Object, 1.3, "#0f0e18", &["#3e6172", "#a49b74", "#568c50"], [0.0, 0.15, 0.5], S::Blob),
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
            "colorBack" => ParamValue::Color(self.color_back),
            "softness" => ParamValue::Number(self.softness),
            "intensity" => ParamValue::Number(self.intensity),
            "noise" => ParamValue::Number(self.noise),
            "shape" => params::option(self.shape),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colors" => self.colors = params::color_list(name, value, Self::KIND.color_capacity())?,
            "colorBack" => self.color_back = params::color(name, value)?,
            "softness" => self.softness = params::number(name, value)?,
            "intensity" => self.intensity = params::number(name, value)?,
            "noise" => self.noise = params::number(name, value)?,
            "shape" => self.shape = params::choice(name, value)?,
            _ => {
                return params::set_common(Self::KIND, &mut self.sizing, Some(&mut self.motion), name, value)
            }
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color("u_colorBack", self.color_back);
        bag.color_list("u_colors", "u_colorsCount", &self.colors);
        bag.float("u_softness", self.softness);
        bag.float("u_intensity", self.intensity);
        bag.float("u_noise", self.noise);
        bag.option("u_shape", self.shape);
        bag.sizing(&self.sizing);
        bag
    }
}
