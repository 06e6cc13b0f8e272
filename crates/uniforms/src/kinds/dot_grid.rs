//! Static grid of filled and stroked shapes.

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::params::{self, param_enum, ParamDef, ParamEnum, ParamError, ParamType, ParamValue, ShaderParams};
use crate::presets::Preset;
use crate::value::UniformBag;

param_enum! {
    pub enum DotGridShape {
        Circle = ("circle", 0),
        Diamond = ("diamond", 1),
        Square = ("square", 2),
        Triangle = ("triangle", 3),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DotGridParams {
    pub color_back: Color,
    pub color_fill: Color,
    pub color_stroke: Color,
    /// Base shape size in pixels.
    pub size: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub stroke_width: f32,
    pub size_range: f32,
    pub opacity_range: f32,
    pub shape: DotGridShape,
    #[serde(flatten)]
    pub sizing: SizingParams,
}

impl Default for DotGridParams {
    fn default() -> Self {
        Self {
            color_back: Color::rgba8(0x00, 0x00, 0x00, 0xff),
            color_fill: Color::rgba8(0xff, 0xff, 0xff, 0xff),
            color_stroke: Color::rgba8(0xff, 0xaa, 0x00, 0xff),
            size: 2.0,
            gap_x: 32.0,
            gap_y: 32.0,
            stroke_width: 0.0,
            size_range: 0.0,
            opacity_range: 0.0,
            shape: DotGridShape::Circle,
            sizing: SizingParams::pattern_default(),
        }
    }
}

static SCHEMA: [ParamDef; 19] = [
    ParamDef::color("colorBack", "Background color"),
    ParamDef::color("colorFill", "Shape fill color"),
    ParamDef::color("colorStroke", "Shape stroke color"),
    ParamDef::new(
        "shape",
        ParamType::Choice(<DotGridShape as ParamEnum>::NAMES),
        "The shape type",
    ),
    ParamDef::number("size", "Base size of each shape, pixels", 1.0, 100.0),
    ParamDef::number("gapX", "Pattern horizontal spacing, pixels", 2.0, 500.0),
    ParamDef::number("gapY", "Pattern vertical spacing, pixels", 2.0, 500.0),
    ParamDef::number("strokeWidth", "The outline stroke width, pixels", 0.0, 50.0),
    ParamDef::number("sizeRange", "Random variation in shape size", 0.0, 1.0),
    ParamDef::number("opacityRange", "Random variation in shape opacity", 0.0, 1.0),
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

struct Look {
    back: &'static str,
    fill: &'static str,
    stroke: &'static str,
    size: f32,
    gap: (f32, f32),
    stroke_width: f32,
    size_range: f32,
    opacity_range: f32,
    shape: DotGridShape,
}

impl Look {
    fn preset(self, name: &str) -> Preset<DotGridParams> {
        Preset::new(
            name,
            DotGridParams {
                color_back: normalize_color(self.back),
                color_fill: normalize_color(self.fill),
                color_stroke: normalize_color(self.stroke),
                size: self.size,
                gap_x: self.gap.0,
                gap_y: self.gap.1,
                stroke_width: self.stroke_width,
                size_range: self.size_range,
                opacity_range: self.opacity_range,
                shape: self.shape,
                sizing: SizingParams::default_for(SizingMode::Pattern),
            },
        )
    }
}

impl ShaderParams for DotGridParams {
    const KIND: ShaderKind = ShaderKind::DotGrid;

    fn schema() -> &'static [ParamDef] {
        &SCHEMA
    }

    fn presets() -> Vec<Preset<Self>> {
        vec![
            Preset::new("Default", Self::default()),
            Look {
                back: "#ffffff",
                fill: "#ffffff",
                stroke: "#808080",
                size: 5.0,
                gap: (32.0, 32.0),
                stroke_width: 1.0,
                size_range: 0.0,
                opacity_range: 0.0,
                shape: DotGridShape::Triangle,
            }
            .preset("Triangles"),
            Look {
                back: "#f4fce7",
                fill: "#052e19",
                stroke: "#000000",
                size: 8.0,
                gap: (20.0, 90.0),
                stroke_width: 0.0,
                size_range: 1.0,
                opacity_range: 0.6,
                shape: DotGridShape::Circle,
            }
            .preset("Tree line"),
            Look {
                back: "#204030",
                fill: "#000000",
                stroke: "#bd955b",
                size: 9.0,
                gap: (32.0, 32.0),
                stroke_width: 1.0,
                size_range: 0.0,
                opacity_range: 0.0,
                shape: DotGridShape::Diamond,
            }
            .preset("Wallpaper"),
        ]
    }

    fn sizing(&self) -> &SizingParams {
        &self.sizing
    }

    fn sizing_mut(&mut self) -> &mut SizingParams {
        &mut self.sizing
    }

    fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "colorBack" => ParamValue::Color(self.color_back),
            "colorFill" => ParamValue::Color(self.color_fill),
            "colorStroke" => ParamValue::Color(self.color_stroke),
            "shape" => params::option(self.shape),
            "size" => ParamValue::Number(self.size),
            "gapX" => ParamValue::Number(self.gap_x),
            "gapY" => ParamValue::Number(self.gap_y),
            "strokeWidth" => ParamValue::Number(self.stroke_width),
            "sizeRange" => ParamValue::Number(self.size_range),
            "opacityRange" => ParamValue::Number(self.opacity_range),
            _ => return params::get_common(&self.sizing, None, name),
        })
    }

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match name {
            "colorBack" => self.color_back = params::color(name, value)?,
            "colorFill" => self.color_fill = params::color(name, value)?,
            "colorStroke" => self.color_stroke = params::color(name, value)?,
            "shape" => self.shape = params::choice(name, value)?,
            "size" => self.size = params::number(name, value)?,
            "gapX" => self.gap_x = params::number(name, value)?,
            "gapY" => self.gap_y = params::number(name, value)?,
            "strokeWidth" => self.stroke_width = params::number(name, value)?,
            "sizeRange" => self.size_range = params::number(name, value)?,
            "opacityRange" => self.opacity_range = params::number(name, value)?,
            _ => return params::set_common(Self::KIND, &mut self.sizing, None, name, value),
        }
        Ok(())
    }

    fn to_uniforms(&self) -> UniformBag {
        let mut bag = UniformBag::new();
        bag.color("u_colorBack", self.color_back);
        bag.color("u_colorFill", self.color_fill);
        bag.color("u_colorStroke", self.color_stroke);
        bag.float("u_dotSize", self.size);
        bag.float("u_gapX", self.gap_x);
        bag.float("u_gapY", self.gap_y);
        bag.float("u_strokeWidth", self.stroke_width);
        bag.float("u_sizeRange", self.size_range);
        bag.float("u_opacityRange", self.opacity_range);
        bag.option("u_shape", self.shape);
        bag.sizing(&self.sizing);
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::UniformValue;

    #[test]
    fn size_maps_to_dot_size() {
        let bag = DotGridParams::default().to_uniforms();
        assert_eq!(bag.get("u_dotSize"), Some(&UniformValue::Float(2.0)));
        assert!(!bag.contains("u_size"));
        assert_eq!(bag.get("u_shape"), Some(&UniformValue::Float(0.0)));
        assert_eq!(bag.len(), 10 + 9);
    }

    #[test]
    fn tree_line_preset() {
        let tree = crate::presets::find_preset::<DotGridParams>("TREE LINE").unwrap();
        let bag = tree.params.to_uniforms();
        assert_eq!(bag.get("u_gapY"), Some(&UniformValue::Float(90.0)));
        assert_eq!(bag.get("u_opacityRange"), Some(&UniformValue::Float(0.6)));
        assert_eq!(tree.params.motion(), None);
    }

    #[test]
    fn triangle_code() {
        assert_eq!(DotGridShape::Triangle.code(), 3);
        assert_eq!(DotGridShape::from_name("hexagon"), None);
    }
}
