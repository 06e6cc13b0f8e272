//! Two-color ordered/random dithering over an animated pattern source.

use colors::Color;
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{
    self, param_enum, ParamAlias, ParamDef, ParamEnum, ParamError, ParamType, ParamValue, MotionParams,
    ShaderParams,
};
use crate::presets::Preset;
use crate::value::UniformBag;

param_enum! {
    /// Pattern the dithering is applied to.
    pub enum DitheringShape {
        Simplex = ("simplex", 1),
        Warp = ("warp", 2),
        Dots = ("dots", 3),
        Wave = ("wave", 4),
        Ripple = ("ripple", 5),
        Swirl = ("swirl", 6),
        Sphere = ("sphere", 7),
    }
}

param_enum! {
    /// Threshold matrix; `Random` uses white noise instead of a Bayer matrix.
    pub enum DitheringType {
        Random = ("random", 1),
        Bayer2 = ("2x2", 2),
        Bayer4 = ("4x4", 3),
        Bayer8 = ("8x8", 4),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DitheringParams {
    pub color_back: Color,
    pub color_front: Color,
    pub shape: DitheringShape,
    #[serde(rename = "type")]
    pub dither_type: DitheringType,
    /// Dither cell size in pixels.
    pub size: f32,
    #[serde(flatten)]
    pub motion: MotionParams,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

impl Default for DitheringParams {
    fn default() -> Self {
        Self {
            color_back: Color::rgba8(0x00, 0x00, 0x00, 0xff),
            color_front: Color::rgba8(0x00, 0xb2, 0xff, 0xff),
            shape: DitheringShape::Sphere,
            dither_type: DitheringType::Bayer4,
            size: 2.0,
            motion: MotionParams::new(1.0, 0.0),
            sizing: params::sizing_with(SizingMode::Pattern, 0.6, 0.0),
        }
    }
}

static SCHEMA: [ParamDef; 16] = [
    ParamDef::color("colorBack", "Background color"),
    ParamDef::color("colorFront", "The foreground (ink) color"),
    ParamDef::new(
        "shape",
        ParamType::Choice(<DitheringShape as ParamEnum>::NAMES),
        "Shape pattern type",
    ),
    ParamDef::new(
        "type",
        ParamType::Choice(<DitheringType as ParamEnum>::NAMES),
        "Dithering type",
    ),
    ParamDef::number("size", "Pixel size of dithering grid", 1.0, 20.0),
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

static ALIASES: [ParamAlias; 1] = [ParamAlias {
    alias: "pxSize",
    canonical: "size",
}];

#[allow(clippy::too_many_arguments)]
fn preset(
    name: &str,
    mode: SizingMode,
    scale: f32,
    back: &str,
    front: &str,
    shape: DitheringShape,
    dither_type: DitheringType,
    size: f32,
) -> Preset<DitheringParams> {
    Preset::new(
        name,
        DitheringParams {
            color_back: colors::normalize_color(back),
            color_front: colors::normalize_color(front),
            shape,
            dither_type,
            size,
            motion: MotionParams::new(1.0, 0.0),
            sizing: params::sizing_with(mode, scale, 0.0),
        },
    )
}

impl ShaderParams for DitheringParams {
    const KIND: ShaderKind = ShaderKind::Dithering;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn aliases() -> &'static [ParamAlias] {
        &ALIASES
    }

    fn presets() -> Vec<Preset<Self>> {
        use DitheringShape as S;
        use DitheringType as T;
        vec![
            Preset::new("Default", Self::default()),
            preset("Warp", SizingMode::Object, 1.0, "#301c2a", "#56ae6c", S::Warp, T::Bayer4, 2.5),
            preset("Sine Wave", SizingMode::Pattern, 1.2, "#730d54", "#00becc", S::Wave, T::Bayer4, 11.0),
            preset("Ripple", SizingMode::Object, 1.0, "#603520", "#c67953", S::Ripple, T::Bayer2, 3.0),
            preset("Bugs", SizingMode::Pattern, 1.0, "#000000", "#008000", S::Dots, T::Random, 9.0),
            preset("Swirl", SizingMode::Object, 1.0, "#00000000", "#47a8e1", S::Swirl, T::Bayer8, 2.0),
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
            "shape" => params::option(self.shape),
            "type" => params::option(self.dither_type),
            "size" => ParamValue::Number(self.size),
            _ => return params::get_common(&self.sizing, Some(&self.motion), name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colorBack" => self.color_back = params::color(name, value)?,
            "colorFront" => self.color_front = params::color(name, value)?,
            "shape" => self.shape = params::choice(name, value)?,
            "type" => self.dither_type = params::choice(name, value)?,
            "size" => self.size = params::number(name, value)?,
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
        bag.option("u_shape", self.shape);
        bag.option("u_type", self.dither_type);
        bag.float("u_pxSize", self.size);
        bag.sizing(&self.sizing);
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamPatch;
    use crate::value::UniformValue;

    #[test]
    fn default_uniforms() {
        let bag = DitheringParams::default().to_uniforms();
        assert_eq!(
            bag.get("u_colorFront"),
            Some(&UniformValue::Vec4(Color::rgba8(0, 0xb2, 0xff, 0xff).to_array()))
        );
        assert_eq!(bag.get("u_shape"), Some(&UniformValue::Float(7.0)));
        assert_eq!(bag.get("u_type"), Some(&UniformValue::Float(3.0)));
        assert_eq!(bag.get("u_pxSize"), Some(&UniformValue::Float(2.0)));
        assert_eq!(bag.get("u_scale"), Some(&UniformValue::Float(0.6)));
        assert_eq!(bag.get("u_fit"), Some(&UniformValue::Float(0.0)));
        assert!(!bag.contains("u_speed"));
    }

    #[test]
    fn px_size_alias() {
        let params = DitheringParams::from_patch(&ParamPatch::new().with("pxSize", 5.0_f32)).unwrap();
        assert_eq!(params.size, 5.0);
        assert_eq!(
            params.to_uniforms().get("u_pxSize"),
            Some(&UniformValue::Float(5.0))
        );

        let both = ParamPatch::new().with("pxSize", 5.0_f32).with("size", 8.0_f32);
        assert_eq!(DitheringParams::from_patch(&both).unwrap().size, 8.0);
    }

    #[test]
    fn transparent_background_preset() {
        let swirl = crate::presets::find_preset::<DitheringParams>("swirl").unwrap();
        assert_eq!(swirl.params.color_back, Color::TRANSPARENT);
        assert_eq!(swirl.params.sizing.fit, sizing::Fit::Contain);
        assert_eq!(
            swirl.params.to_uniforms().get("u_type"),
            Some(&UniformValue::Float(4.0))
        );
    }

    #[test]
    fn every_type_code_is_distinct() {
        let codes: Vec<i32> = DitheringType::OPTIONS.iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
        assert_eq!(DitheringType::from_name("8X8"), Some(DitheringType::Bayer8));
    }

    #[test]
    fn serializes_with_public_names() {
        let json = serde_json::to_value(DitheringParams::default()).unwrap();
        assert_eq!(json["type"], "4x4");
        assert_eq!(json["shape"], "sphere");
        assert_eq!(json["colorFront"], "#00b2ff");
        assert_eq!(json["speed"], 1.0);
        assert_eq!(json["fit"], "none");
    }
}
