//! Multi-color gradient stepped over animated simplex noise curves.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{self, MotionParams, ParamDef, ParamError, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplexNoiseParams {
    pub colors: Vec<Color>,
    /// Extra bands between consecutive colors; 1 is a plain color per level.
    pub steps_per_color: f32,
    pub softness: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

impl SimplexNoiseParams {
    fn look(colors: &[&str], scale: f32, speed: f32, steps_per_color: f32, softness: f32) -> Self {
        Self {
            colors: colors.iter().map(|color| normalize_color(*color)).collect(),
            steps_per_color,
            softness,
            motion: MotionParams::new(speed, 0.0),
            sizing: params::sizing_with(SizingMode::Pattern, scale, 0.0),
        }
    }
}

impl Default for SimplexNoiseParams {
    fn default() -> Self {
        Self::look(
            &["#4449CF", "#FFD1E0", "#F94446", "#FFD36B", "#FFFFFF"],
            0.6,
            0.5,
            2.0,
            0.0,
        )
    }
}

static SCHEMA: [ParamDef; 14] = [
    ParamDef::colors("colors", "Up to 10 base colors", 10),
    ParamDef::number("stepsPerColor", "Number of extra colors between base colors", 1.0, 10.0),
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

impl ShaderParams for SimplexNoiseParams {
    const KIND: ShaderKind = ShaderKind::SimplexNoise;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Preset::new(
                "Spots",
                Self::look(&["#ff7b00", "#f9ffeb", "#320d82"], 1.0, 0.6, 1.0, 0.0),
            ),
            Preset::new(
                "First contact",
                Self::look(
                    &["#e8cce6", "#120d22", "#442c44", "#e6baba", "#fff5f5"],
                    0.2,
                    2.0,
                    2.0,
                    0.0,
                ),
            ),
            Preset::new(
                "Bubblegum",
                Self::look(&["#ffffff", "#ff9e9e", "#5f57ff", "#00f7ff"], 1.6, 2.0, 1.0, 1.0),
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
            "stepsPerColor" => ParamValue::Number(self.steps_per_color),
            "softness" => ParamValue::Number(self.softness),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colors" => self.colors = params::color_list(name, value, Self::KIND.color_capacity())?,
            "stepsPerColor" => self.steps_per_color = params::number(name, value)?,
            "softness" => self.softness = params::number(name, value)?,
            _ => {
                return params::set_common(Self::KIND, &mut self.sizing, Some(&mut self.motion), name, value)
            }
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color_list("u_colors", "u_colorsCount", &self.colors);
        bag.float("u_stepsPerColor", self.steps_per_color);
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
    fn default_uniforms() {
        let bag = SimplexNoiseParams::default().to_uniforms();
        assert_eq!(bag.get("u_colorsCount"), Some(&UniformValue::Float(5.0)));
        assert_eq!(bag.get("u_stepsPerColor"), Some(&UniformValue::Float(2.0)));
        assert_eq!(bag.get("u_scale"), Some(&UniformValue::Float(0.6)));
        assert_eq!(bag.get("u_fit"), Some(&UniformValue::Float(0.0)));
        assert!(!bag.contains("u_colorBack"));
    }

    #[test]
    fn presets_in_declared_order() {
        let names: Vec<String> = SimplexNoiseParams::presets().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Default", "Spots", "First contact", "Bubblegum"]);
        let bubblegum = find_preset::<SimplexNoiseParams>("bubblegum").unwrap();
        assert_eq!(bubblegum.params.motion.speed, 2.0);
        assert_eq!(bubblegum.params.sizing.scale, 1.6);
        assert_eq!(bubblegum.params.colors[2], Color::rgba8(0x5f, 0x57, 0xff, 0xff));
    }

    #[test]
    fn eleventh_color_is_rejected() {
        let mut params = SimplexNoiseParams::default();
        let err = params
            .set("colors", ParamValue::Colors(vec![Color::BLACK; 11]))
            .unwrap_err();
        assert!(matches!(err, ParamError::ListLength { len: 11, max: 10, .. }));
        assert_eq!(params.colors.len(), 5);
    }
}
