//! Radial gradient with a movable focal point, radial distortion and grain.
//!
//! Still by default, like the mesh gradient.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::SizingParams;

use crate::kinds::ShaderKind;
use crate::params::{self, MotionParams, ParamDef, ParamError, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticRadialGradientParams {
    pub color_back: Color,
    pub colors: Vec<Color>,
    pub radius: f32,
    pub focal_distance: f32,
    /// Degrees.
    pub focal_angle: f32,
    pub falloff: f32,
    pub mixing: f32,
    pub distortion: f32,
    pub distortion_shift: f32,
    pub distortion_freq: f32,
    pub grain_mixer: f32,
    pub grain_overlay: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

struct Shape {
    radius: f32,
    focal_distance: f32,
    falloff: f32,
    mixing: f32,
    distortion: f32,
    grain_mixer: f32,
    grain_overlay: f32,
}

impl StaticRadialGradientParams {
    fn look(back: &str, colors: &[&str], shape: Shape) -> Self {
        Self {
            color_back: normalize_color(back),
            colors: colors.iter().map(|color| normalize_color(*color)).collect(),
            radius: shape.radius,
            focal_distance: shape.focal_distance,
            focal_angle: 0.0,
            falloff: shape.falloff,
            mixing: shape.mixing,
            distortion: shape.distortion,
            distortion_shift: 0.0,
            distortion_freq: 12.0,
            grain_mixer: shape.grain_mixer,
            grain_overlay: shape.grain_overlay,
            motion: MotionParams::new(0.0, 0.0),
            sizing: SizingParams::object_default(),
        }
    }
}

impl Default for StaticRadialGradientParams {
    fn default() -> Self {
        Self::look(
            "#000000",
            &["#00bbff", "#00ffe1", "#ffffff"],
            Shape {
                radius: 0.8,
                focal_distance: 0.99,
                falloff: 0.24,
                mixing: 0.35,
                distortion: 0.0,
                grain_mixer: 0.0,
                grain_overlay: 0.0,
            },
        )
    }
}

static SCHEMA: [ParamDef; 23] = [
    ParamDef::colors("colors", "Up to 10 colors used in the gradient", 10),
    ParamDef::color("colorBack", "Background color"),
    ParamDef::number("radius", "The size of the shape", 0.0, 3.0),
    ParamDef::number("focalDistance", "Distance of the focal point from center", 0.0, 3.0),
    ParamDef::number("falloff", "Gradient decay (0 for linear gradient)", -1.0, 1.0),
    ParamDef::number("focalAngle", "Angle of the focal point in degrees", 0.0, 360.0),
    ParamDef::number("mixing", "Blending behavior (sharper vs. smoother color transitions)", 0.0, 1.0),
    ParamDef::number("distortion", "Strength of radial distortion", 0.0, 1.0),
    ParamDef::number("distortionShift", "Radial distortion offset", -1.0, 1.0),
    ParamDef::number("distortionFreq", "Radial distortion frequency", 0.0, 20.0),
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

impl ShaderParams for StaticRadialGradientParams {
    const KIND: ShaderKind = ShaderKind::StaticRadialGradient;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "Lo-Fi",
                Self::look(
                    "#2e1f27",
                    &["#d72638", "#3f88c5", "#f49d37"],
                    Shape {
                        radius: 1.0,
                        focal_distance: 0.0,
                        falloff: 0.9,
                        mixing: 0.5,
                        distortion: 0.0,
                        grain_mixer: 1.0,
                        grain_overlay: 0.5,
                    },
                ),
            ),
            Preset::new(
                "Cross Section",
                Self::look(
                    "#3d348b",
                    &["#7678ed", "#f7b801", "#f18701", "#37a066"],
                    Shape {
                        radius: 1.0,
                        focal_distance: 0.0,
                        falloff: 0.0,
                        mixing: 0.0,
                        distortion: 1.0,
                        grain_mixer: 0.0,
                        grain_overlay: 0.0,
                    },
                ),
            ),
            Preset::new(
                "Radial",
                Self::look(
                    "#264653",
                    &["#9c2b2b", "#f4a261", "#ffffff"],
                    Shape {
                        radius: 1.0,
                        focal_distance: 0.0,
                        falloff: 0.0,
                        mixing: 0.7,
                        distortion: 0.0,
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
            "colorBack" => ParamValue::Color(self.color_back),
            "radius" => ParamValue::Number(self.radius),
            "focalDistance" => ParamValue::Number(self.focal_distance),
            "falloff" => ParamValue::Number(self.falloff),
            "focalAngle" => ParamValue::Number(self.focal_angle),
            "mixing" => ParamValue::Number(self.mixing),
            "distortion" => ParamValue::Number(self.distortion),
            "distortionShift" => ParamValue::Number(self.distortion_shift),
            "distortionFreq" => ParamValue::Number(self.distortion_freq),
            "grainMixer" => ParamValue::Number(self.grain_mixer),
            "grainOverlay" => ParamValue::Number(self.grain_overlay),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colors" => self.colors = params::color_list(name, value, Self::KIND.color_capacity())?,
            "colorBack" => self.color_back = params::color(name, value)?,
            "radius" => self.radius = params::number(name, value)?,
            "focalDistance" => self.focal_distance = params::number(name, value)?,
            "falloff" => self.falloff = params::number(name, value)?,
            "focalAngle" => self.focal_angle = params::number(name, value)?,
            "mixing" => self.mixing = params::number(name, value)?,
            "distortion" => self.distortion = params::number(name, value)?,
            "distortionShift" => self.distortion_shift = params::number(name, value)?,
            "distortionFreq" => self.distortion_freq = params::number(name, value)?,
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
        bag.color("u_colorBack", self.color_back);
        bag.color_list("u_colors", "u_colorsCount", &self.colors);
        bag.float("u_radius", self.radius);
        bag.float("u_focalDistance", self.focal_distance);
        bag.float("u_focalAngle", self.focal_angle);
        bag.float("u_falloff", self.falloff);
        bag.float("u_mixing", self.mixing);
        bag.float("u_distortion", self.distortion);
        bag.float("u_distortionShift", self.distortion_shift);
        bag.float("u_distortionFreq", self.distortion_freq);
        bag.float("u_grainMixer", self.grain_mixer);
        bag.float("u_grainOverlay", self.grain_overlay);
        bag.sizing(&self.sizing);
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::find_preset;
    use crate::value::UniformValue;

    #[test]
    fn default_is_still_and_contained() {
        let params = StaticRadialGradientParams::default();
        assert_eq!(params.motion().map(|m| m.speed), Some(0.0));
        let bag = params.to_uniforms();
        assert_eq!(bag.get("u_focalDistance"), Some(&UniformValue::Float(0.99)));
        assert_eq!(bag.get("u_distortionFreq"), Some(&UniformValue::Float(12.0)));
        assert_eq!(bag.get("u_colorsCount"), Some(&UniformValue::Float(3.0)));
        assert_eq!(bag.get("u_fit"), Some(&UniformValue::Float(1.0)));
    }

    #[test]
    fn lo_fi_is_grainy() {
        let names: Vec<String> = StaticRadialGradientParams::presets().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Default", "Lo-Fi", "Cross Section", "Radial"]);
        let lo_fi = find_preset::<StaticRadialGradientParams>("lo-fi").unwrap();
        assert_eq!(lo_fi.params.grain_mixer, 1.0);
        assert_eq!(lo_fi.params.grain_overlay, 0.5);
        assert_eq!(lo_fi.params.falloff, 0.9);
    }

    #[test]
    fn negative_falloff_is_kept() {
        let mut params = StaticRadialGradientParams::default();
        params.set("falloff", ParamValue::Number(-0.5)).unwrap();
        assert_eq!(params.to_uniforms().get("u_falloff"), Some(&UniformValue::Float(-0.5)));
    }
}
