//! Single spiral stroke over a background, with perspective falloff and
//! noise distortion.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{self, MotionParams, ParamDef, ParamError, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiralParams {
    pub color_back: Color,
    pub color_front: Color,
    pub density: f32,
    pub distortion: f32,
    pub stroke_width: f32,
    pub stroke_taper: f32,
    pub stroke_cap: f32,
    pub noise: f32,
    pub noise_frequency: f32,
    pub softness: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

struct Look {
    back: &'static str,
    front: &'static str,
    scale: f32,
    speed: f32,
    density: f32,
    stroke_width: f32,
    stroke_taper: f32,
    stroke_cap: f32,
    noise: f32,
    noise_frequency: f32,
    softness: f32,
}

impl Look {
    fn build(self) -> SpiralParams {
        SpiralParams {
            color_back: normalize_color(self.back),
            color_front: normalize_color(self.front),
            density: self.density,
            distortion: 0.0,
            stroke_width: self.stroke_width,
            stroke_taper: self.stroke_taper,
            stroke_cap: self.stroke_cap,
            noise: self.noise,
            noise_frequency: self.noise_frequency,
            softness: self.softness,
            motion: MotionParams::new(self.speed, 0.0),
            sizing: params::sizing_with(SizingMode::Pattern, self.scale, 0.0),
        }
    }
}

impl Default for SpiralParams {
    fn default() -> Self {
        Look {
            back: "#001429",
            front: "#79D1FF",
            scale: 1.0,
            speed: 1.0,
            density: 1.0,
            stroke_width: 0.5,
            stroke_taper: 0.0,
            stroke_cap: 0.0,
            noise: 0.0,
            noise_frequency: 0.0,
            softness: 0.0,
        }
        .build()
    }
}

static SCHEMA: [ParamDef; 21] = [
    ParamDef::color("colorBack", "Background color"),
    ParamDef::color("colorFront", "The color of spiral shape"),
    ParamDef::number("density", "Spacing falloff simulating perspective (0 = flat spiral)", 0.0, 1.0),
    ParamDef::number("distortion", "Power of shape distortion applied along the spiral", 0.0, 1.0),
    ParamDef::number("strokeWidth", "Thickness of spiral curve", 0.0, 1.0),
    ParamDef::number("strokeTaper", "How much the stroke narrows away from the center", 0.0, 1.0),
    ParamDef::number("strokeCap", "Extra stroke width at the center", 0.0, 1.0),
    ParamDef::number("noise", "Noise distortion applied over the canvas", 0.0, 1.0),
    ParamDef::number("noiseFrequency", "Noise frequency (no effect with noise = 0)", 0.0, 1.0),
    ParamDef::number("softness", "Color transition sharpness (0 = hard edge, 1 = smooth gradient)", 0.0, 1.0),
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

impl ShaderParams for SpiralParams {
    const KIND: ShaderKind = ShaderKind::Spiral;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "Jungle",
                Look {
                    back: "#a0ef2a",
                    front: "#288b18",
                    scale: 1.3,
                    speed: 0.75,
                    density: 0.5,
                    stroke_width: 0.5,
                    stroke_taper: 0.0,
                    stroke_cap: 0.0,
                    noise: 1.0,
                    noise_frequency: 0.25,
                    softness: 0.0,
                }
                .build(),
            ),
            Preset::new(
                "Droplet",
                Look {
                    back: "#effafe",
                    front: "#bf40a0",
                    scale: 1.0,
                    speed: 1.0,
                    density: 0.9,
                    stroke_width: 0.75,
                    stroke_taper: 0.18,
                    stroke_cap: 1.0,
                    noise: 0.74,
                    noise_frequency: 0.33,
                    softness: 0.02,
                }
                .build(),
            ),
            Preset::new(
                "Swirl",
                Look {
                    back: "#b3e6d9",
                    front: "#1a2b4d",
                    scale: 0.45,
                    speed: 1.0,
                    density: 0.2,
                    stroke_width: 0.5,
                    stroke_taper: 0.0,
                    stroke_cap: 0.0,
                    noise: 0.0,
                    noise_frequency: 0.3,
                    softness: 0.5,
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
            "colorBack" => ParamValue::Color(self.color_back),
            "colorFront" => ParamValue::Color(self.color_front),
            "density" => ParamValue::Number(self.density),
            "distortion" => ParamValue::Number(self.distortion),
            "strokeWidth" => ParamValue::Number(self.stroke_width),
            "strokeTaper" => ParamValue::Number(self.stroke_taper),
            "strokeCap" => ParamValue::Number(self.stroke_cap),
            "noise" => ParamValue::Number(self.noise),
            "noiseFrequency" => ParamValue::Number(self.noise_frequency),
            "softness" => ParamValue::Number(self.softness),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colorBack" => self.color_back = params::color(name, value)?,
            "colorFront" => self.color_front = params::color(name, value)?,
            "density" => self.density = params::number(name, value)?,
            "distortion" => self.distortion = params::number(name, value)?,
            "strokeWidth" => self.stroke_width = params::number(name, value)?,
            "strokeTaper" => self.stroke_taper = params::number(name, value)?,
            "strokeCap" => self.stroke_cap = params::number(name, value)?,
            "noise" => self.noise = params::number(name, value)?,
            "noiseFrequency" => self.noise_frequency = params::number(name, value)?,
            "softness" => self.softness = params::number(name, value)?,
            _ => {
                return params::set_common(Self::KIND, &mut self.sizing, Some(&mut self.motion), name, value)
            }
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color("u_colorBack", self.color_back);
        bag.color("u_colorFront", self.color_front);
        bag.float("u_density", self.density);
        bag.float("u_distortion", self.distortion);
        bag.float("u_strokeWidth", self.stroke_width);
        bag.float("u_strokeTaper", self.stroke_taper);
        bag.float("u_strokeCap", self.stroke_cap);
        bag.float("u_noise", self.noise);
        bag.float("u_noiseFrequency", self.noise_frequency);
        bag.float("u_softness", self.softness);
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
    fn droplet_keeps_default_scale() {
        let droplet = find_preset::<SpiralParams>("Droplet").unwrap();
        assert_eq!(droplet.params.sizing.scale, 1.0);
        assert_eq!(droplet.params.stroke_cap, 1.0);
        let bag = droplet.params.to_uniforms();
        assert_eq!(bag.get("u_strokeTaper"), Some(&UniformValue::Float(0.18)));
        assert_eq!(
            bag.get("u_colorFront"),
            Some(&UniformValue::Vec4(Color::rgba8(0xbf, 0x40, 0xa0, 0xff).to_array()))
        );
    }

    #[test]
    fn has_no_color_list() {
        let bag = SpiralParams::default().to_uniforms();
        assert!(!bag.contains("u_colors"));
        assert!(!bag.contains("u_colorsCount"));
        assert_eq!(ShaderKind::Spiral.color_capacity(), 0);
        assert_eq!(bag.len(), 19);
    }
}
