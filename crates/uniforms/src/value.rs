use std::collections::BTreeMap;

use colors::Color;
use serde::Serialize;
use sizing::{SizingParams, SizingTransform};

use crate::params::ParamEnum;

/// A single value ready for upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Vec4Array(Vec<[f32; 4]>),
}

impl UniformValue {
    pub fn glsl_type(&self) -> &'static str {
        match self {
            UniformValue::Float(_) => "float",
            UniformValue::Int(_) => "int",
            UniformValue::Vec2(_) => "vec2",
            UniformValue::Vec4(_) | UniformValue::Vec4Array(_) => "vec4",
        }
    }
}

impl From<Color> for UniformValue {
    fn from(color: Color) -> Self {
        UniformValue::Vec4(color.to_array())
    }
}

/// Uniform name to value, ordered by name so two bags built from equal
/// parameters compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UniformBag {
    values: BTreeMap<&'static str, UniformValue>,
}

impl UniformBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: UniformValue) {
        self.values.insert(name, value);
    }

    pub fn float(&mut self, name: &'static str, value: f32) {
        self.insert(name, UniformValue::Float(value));
    }

    pub fn int(&mut self, name: &'static str, value: i32) {
        self.insert(name, UniformValue::Int(value));
    }

    pub fn color(&mut self, name: &'static str, color: Color) {
        self.insert(name, color.into());
    }

    /// Option codes go up as `float`, matching the shader declarations.
    pub fn option<E: ParamEnum>(&mut self, name: &'static str, value: E) {
        self.float(name, value.code() as f32);
    }

    /// Uploads `colors` as a `vec4` array plus a `float` `count_name` holding
    /// its length.
    pub fn color_list(&mut self, name: &'static str, count_name: &'static str, colors: &[Color]) {
        let values = colors.iter().map(|color| color.to_array()).collect();
        self.insert(name, UniformValue::Vec4Array(values));
        self.float(count_name, colors.len() as f32);
    }

    /// Raw sizing parameters; the vertex stage does the fitting.
    pub fn sizing(&mut self, sizing: &SizingParams) {
        self.option("u_fit", sizing.fit);
        self.float("u_scale", sizing.scale);
        self.float("u_rotation", sizing.rotation);
        self.float("u_originX", sizing.origin_x);
        self.float("u_originY", sizing.origin_y);
        self.float("u_offsetX", sizing.offset_x);
        self.float("u_offsetY", sizing.offset_y);
        self.float("u_worldWidth", sizing.world_width);
        self.float("u_worldHeight", sizing.world_height);
    }

    /// CPU-resolved sizing for mounts that skip the vertex-stage fitting.
    pub fn insert_sizing_transform(&mut self, transform: &SizingTransform) {
        self.insert("u_worldScale", UniformValue::Vec2(transform.world_scale));
        self.insert("u_boxOrigin", UniformValue::Vec2(transform.box_origin));
        self.insert("u_graphicOffset", UniformValue::Vec2(transform.offset));
        self.insert("u_rotationMatrix", UniformValue::Vec4(transform.rotation));
        self.float("u_patternZoom", transform.pattern_zoom);
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &UniformValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Names whose values differ from `previous`, including added and
    /// removed ones.
    pub fn changed_since(&self, previous: &UniformBag) -> Vec<&'static str> {
        let mut changed: Vec<&'static str> = self
            .iter()
            .filter(|(name, value)| previous.get(name) != Some(*value))
            .map(|(name, _)| name)
            .collect();
        changed.extend(
            previous
                .iter()
                .filter(|(name, _)| !self.contains(name))
                .map(|(name, _)| name),
        );
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizing::{resolve, Fit, SizingMode, SurfaceSize};

    #[test]
    fn sizing_uploads_every_field() {
        let mut bag = UniformBag::new();
        bag.sizing(&SizingParams {
            fit: Fit::Cover,
            rotation: 45.0,
            ..SizingParams::object_default()
        });
        assert_eq!(bag.len(), 9);
        assert_eq!(bag.get("u_fit"), Some(&UniformValue::Float(2.0)));
        assert_eq!(bag.get("u_rotation"), Some(&UniformValue::Float(45.0)));
        assert_eq!(bag.get("u_originY"), Some(&UniformValue::Float(0.5)));
    }

    #[test]
    fn color_lists_carry_count() {
        let mut bag = UniformBag::new();
        bag.color_list(
            "u_colors",
            "u_colorsCount",
            &[Color::rgb(1.0, 0.0, 0.0), Color::new(0.0, 0.0, 1.0, 0.5)],
        );
        assert_eq!(
            bag.get("u_colors"),
            Some(&UniformValue::Vec4Array(vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 0.5]
            ]))
        );
        assert_eq!(bag.get("u_colorsCount"), Some(&UniformValue::Float(2.0)));
    }

    #[test]
    fn sizing_transform_uniforms() {
        let transform = resolve(
            &SizingParams::object_default(),
            SizingMode::Object,
            SurfaceSize::new(1000.0, 500.0),
        );
        let mut bag = UniformBag::new();
        bag.insert_sizing_transform(&transform);
        assert_eq!(bag.get("u_worldScale"), Some(&UniformValue::Vec2([2.0, 1.0])));
        assert_eq!(bag.get("u_patternZoom"), Some(&UniformValue::Float(1.0)));
    }

    #[test]
    fn reports_changed_names() {
        let mut before = UniformBag::new();
        before.float("u_scale", 1.0);
        before.float("u_rotation", 0.0);
        let mut after = before.clone();
        after.float("u_scale", 2.0);
        after.float("u_fit", 1.0);
        let mut changed = after.changed_since(&before);
        changed.sort_unstable();
        assert_eq!(changed, vec!["u_fit", "u_scale"]);
        assert!(after.changed_since(&after).is_empty());
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut bag = UniformBag::new();
        bag.int("u_fit", 1);
        bag.insert("u_worldScale", UniformValue::Vec2([2.0, 1.0]));
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"u_fit":1,"u_worldScale":[2.0,1.0]}"#);
    }
}
