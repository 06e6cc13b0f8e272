//! Color bands twisting around the center into spirals and arcs.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{self, MotionParams, ParamDef, ParamError, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwirlParams {
    pub color_back: Color,
    pub colors: Vec<Color>,
    /// 0 draws concentric ripples instead of bands.
    pub band_count: f32,
    pub twist: f32,
    pub center: f32,
    pub proportion: f32,
    pub softness: f32,
    pub noise_frequency: f32,
    pub noise: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

struct Look<'a> {
    back: &'a str,
    colors: &'a [&'a str],
    speed: f32,
    band_count: f32,
    twist: f32,
    center: f32,
    proportion: f32,
    softness: f32,
    noise_frequency: f32,
    noise: f32,
}

impl Look<'_> {
    fn build(self) -> SwirlParams {
        SwirlParams {
            color_back: normalize_color(self.back),
            colors: self.colors.iter().map(|color| normalize_color(*color)).collect(),
            band_count: self.band_count,
            twist: self.twist,
            center: self.center,
            proportion: self.proportion,
            softness: self.softness,
            noise_frequency: self.noise_frequency,
            noise: self.noise,
            motion: MotionParams::new(self.speed, 0.0),
            sizing: SizingParams::object_default(),
        }
    }
}

impl Default for SwirlParams {
    fn default() -> Self {
        Look {
            back: "#330000",
            colors: &["#ffd1d1", "#ff8a8a", "#660000"],
            speed: 0.32,
            band_count: 4.0,
            twist: 0.1,
            center: 0.2,
            proportion: 0.5,
            softness: 0.0,
            noise_frequency: 0.4,
            noise: 0.2,
        }
        .build()
    }
}

static SCHEMA: [ParamDef; 20] = [
    ParamDef::colors("colors", "Up to 10 colors used for the stripes", 10),
    ParamDef::color("colorBack", "Background color"),
    ParamDef::number("bandCount", "Number of color bands (0 for concentric ripples)", 0.0, 15.0),
    ParamDef::number("twist", "Vortex power (0 = straight sectoral shapes)", 0.0, 1.0),
    ParamDef::number("center", "How far from the center the swirl colors begin to appear", 0.0, 1.0),
    ParamDef::number("proportion", "Blend point between colors (0.5 = equal distribution)", 0.0, 1.0),
    ParamDef::number("softness", "Color transition sharpness (0 = hard edge, 1 = smooth gradient)", 0.0, 1.0),
    ParamDef::number("noise", "Strength of noise distortion (no effect with noiseFrequency = 0)", 0.0, 1.0),
    ParamDef::number("noiseFrequency", "Noise frequency (no effect with noise = 0)", 0.0, 1.0),
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

impl ShaderParams for SwirlParams {
    const KIND: ShaderKind = ShaderKind::Swirl;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        let mut opening = Look {
            back: "#ff8b61",
            colors: &["#fefff0", "#ffd8bd", "#ff8b61"],
            speed: 0.5,
            band_count: 2.0,
            twist: 0.3,
            center: 0.2,
            proportion: 0.5,
            softness: 0.0,
            noise_frequency: 0.0,
            noise: 0.0,
        }
        .build();
        opening.sizing.offset_x = -0.4;
        opening.sizing.offset_y = 1.0;

        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "007",
                Look {
                    back: "#E9E7DA",
                    colors: &["#000000"],
                    speed: 1.0,
                    band_count: 5.0,
                    twist: 0.3,
                    center: 0.0,
                    proportion: 0.0,
                    softness: 0.0,
                    noise_frequency: 0.5,
                    noise: 0.0,
                }
                .build(),
            ),
            Preset::new("Opening", opening),
            Preset::new(
                "Candy",
                Look {
                    back: "#ffcd66",
                    colors: &["#6bbceb", "#d7b3ff", "#ff9fff"],
                    speed: 1.0,
                    band_count: 2.0,
                    twist: 0.15,
                    center: 0.2,
                    proportion: 0.5,
                    softness: 1.0,
                    noise_frequency: 0.5,
                    noise: 0.0,
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
            "colorBack" => ParamValue::Color(self.color_back),
            "bandCount" => ParamValue::Number(self.band_count),
            "twist" => ParamValue::Number(self.twist),
            "center" => ParamValue::Number(self.center),
            "proportion" => ParamValue::Number(self.proportion),
            "softness" => ParamValue::Number(self.softness),
            "noise" => ParamValue::Number(self.noise),
            "noiseFrequency" => ParamValue::Number(self.noise_frequency),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colors" => self.colors = params::color_list(name, value, Self::KIND.color_capacity())?,
            "colorBack" => self.color_back = params::color(name, value)?,
            "bandCount" => self.band_count = params::number(name, value)?,
            "twist" => self.twist = params::number(name, value)?,
            "center" => self.center = params::number(name, value)?,
            "proportion" => self.proportion = params::number(name, value)?,
            "softness" => self.softness = params::number(name, value)?,
            "noise" => self.noise = params::number(name, value)?,
            "noiseFrequency" => self.noise_frequency = params::number(name, value)?,
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
        bag.float("u_bandCount", self.band_count);
        bag.float("u_twist", self.twist);
        bag.float("u_center", self.center);
        bag.float("u_proportion", self.proportion);
        bag.float("u_softness", self.softness);
        bag.float("u_noiseFrequency", self.noise_frequency);
        bag.float("u_noise", self.noise);
        bag.sizing(&self.sizing);
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamPatch;
    use crate::presets::find_preset;
    use crate::value::UniformValue;

    #[test]
    fn opening_is_offset() {
        let opening = find_preset::<SwirlParams>("opening").unwrap();
        assert_eq!(opening.params.sizing.offset_x, -0.4);
        assert_eq!(opening.params.sizing.offset_y, 1.0);
        assert_eq!(opening.params.sizing.fit, sizing::Fit::Contain);
        let bag = opening.params.to_uniforms();
        assert_eq!(bag.get("u_offsetX"), Some(&UniformValue::Float(-0.4)));
        assert_eq!(bag.get("u_bandCount"), Some(&UniformValue::Float(2.0)));
    }

    #[test]
    fn single_color_preset() {
        let bond = find_preset::<SwirlParams>("007").unwrap();
        let bag = bond.params.to_uniforms();
        assert_eq!(bag.get("u_colorsCount"), Some(&UniformValue::Float(1.0)));
        assert_eq!(
            bag.get("u_colors"),
            Some(&UniformValue::Vec4Array(vec![[0.0, 0.0, 0.0, 1.0]]))
        );
    }

    #[test]
    fn color_list_bounds() {
        let mut params = SwirlParams::default();
        for colors in [Vec::new(), vec![Color::BLACK; 11]] {
            assert!(params.apply(&ParamPatch::new().with("colors", colors)).is_err());
        }
        assert_eq!(params, SwirlParams::default());
    }
}
