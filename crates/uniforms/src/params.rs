use std::collections::BTreeMap;
use std::fmt;

use colors::{normalize_color, Color};
use serde::Serialize;
use sizing::{Fit, SizingMode, SizingParams};

use crate::kinds::ShaderKind;
use crate::presets::Preset;
use crate::value::UniformBag;

/// Dynamic parameter value used where the concrete bag type is not known:
/// URL state, UI patches and command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f32),
    Numbers(Vec<f32>),
    Text(String),
    Choice(String),
    Color(Color),
    Colors(Vec<Color>),
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "a boolean",
            ParamValue::Number(_) => "a number",
            ParamValue::Numbers(_) => "a list of numbers",
            ParamValue::Text(_) => "text",
            ParamValue::Choice(_) => "an option name",
            ParamValue::Color(_) => "a color",
            ParamValue::Colors(_) => "a list of colors",
        }
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Color> for ParamValue {
    fn from(value: Color) -> Self {
        ParamValue::Color(value)
    }
}

impl From<Vec<Color>> for ParamValue {
    fn from(value: Vec<Color>) -> Self {
        ParamValue::Colors(value)
    }
}

/// Declared type of a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    Number,
    Numbers,
    Text,
    Color,
    Colors,
    /// One of a fixed set of option names.
    Choice(&'static [&'static str]),
}

impl ParamType {
    pub fn describe(self) -> &'static str {
        match self {
            ParamType::Bool => "a boolean",
            ParamType::Number => "a number",
            ParamType::Numbers => "a list of numbers",
            ParamType::Text => "text",
            ParamType::Color => "a color",
            ParamType::Colors => "a list of colors",
            ParamType::Choice(_) => "an option name",
        }
    }
}

/// One entry of a shader kind's parameter schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDef {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
    /// Slider range for numeric parameters; advisory only.
    pub range: Option<(f32, f32)>,
    /// Longest accepted color list.
    pub max_items: Option<usize>,
}

impl ParamDef {
    pub const fn new(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            range: None,
            max_items: None,
        }
    }

    pub const fn number(name: &'static str, description: &'static str, min: f32, max: f32) -> Self {
        Self {
            name,
            kind: ParamType::Number,
            description,
            range: Some((min, max)),
            max_items: None,
        }
    }

    pub const fn color(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Color, description)
    }

    /// List of 1 to `max_items` colors.
    pub const fn colors(name: &'static str, description: &'static str, max_items: usize) -> Self {
        Self {
            name,
            kind: ParamType::Colors,
            description,
            range: None,
            max_items: Some(max_items),
        }
    }
}

/// Deprecated parameter name kept working for old links and presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamAlias {
    pub alias: &'static str,
    pub canonical: &'static str,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("{kind} has no parameter named '{name}'")]
    UnknownParam { kind: &'static str, name: String },
    #[error("parameter '{name}' expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("'{value}' is not an option of '{name}' (expected one of: {options})")]
    UnknownOption {
        name: String,
        value: String,
        options: String,
    },
    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidValue { name: String, value: String },
    #[error("parameter '{name}' takes 1 to {max} colors, got {len}")]
    ListLength { name: String, len: usize, max: usize },
}

/// Partial, name-keyed update to a parameter bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamPatch {
    entries: BTreeMap<String, ParamValue>,
}

impl ParamPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.entries.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Entries of `other` win over entries already present.
    pub fn merge(&mut self, other: ParamPatch) {
        self.entries.extend(other.entries);
    }

    /// Renames deprecated keys to their canonical names. An alias is only
    /// honoured when the canonical key is absent; otherwise it is dropped.
    pub fn resolve_aliases(mut self, aliases: &[ParamAlias]) -> Self {
        for alias in aliases {
            if let Some(value) = self.entries.remove(alias.alias) {
                if self.entries.contains_key(alias.canonical) {
                    tracing::debug!(
                        alias = alias.alias,
                        canonical = alias.canonical,
                        "ignoring alias shadowed by canonical parameter"
                    );
                } else {
                    self.entries.insert(alias.canonical.to_string(), value);
                }
            }
        }
        self
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for ParamPatch {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// Animation state of kinds that move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionParams {
    /// Multiplier on elapsed milliseconds; 0 freezes, negative reverses.
    pub speed: f32,
    /// Animation time in milliseconds.
    pub frame: f32,
}

impl MotionParams {
    pub const fn new(speed: f32, frame: f32) -> Self {
        Self { speed, frame }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// Enum parameter whose options are selected by name and uploaded by code.
pub trait ParamEnum: Copy + PartialEq + fmt::Debug + 'static {
    const OPTIONS: &'static [Self];
    const NAMES: &'static [&'static str];

    fn name(self) -> &'static str;
    fn code(self) -> i32;

    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::OPTIONS
            .iter()
            .copied()
            .find(|option| option.name().eq_ignore_ascii_case(name))
    }
}

impl ParamEnum for Fit {
    const OPTIONS: &'static [Self] = &Fit::ALL;
    const NAMES: &'static [&'static str] = &["none", "contain", "cover"];

    fn name(self) -> &'static str {
        Fit::name(self)
    }

    fn code(self) -> i32 {
        Fit::code(self)
    }
}

/// Declares a parameter enum together with its option names and uniform
/// codes.
macro_rules! param_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = ($label:literal, $code:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::params::ParamEnum for $name {
            const OPTIONS: &'static [Self] = &[$($name::$variant),+];
            const NAMES: &'static [&'static str] = &[$($label),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::params::ParamEnum::name(*self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::params::ParamEnum::name(*self))
            }
        }
    };
}

pub(crate) use param_enum;

/// Typed parameter bag of one shader kind.
///
/// `Default` is the kind's default preset. `get`/`set` expose fields by their
/// schema name; `set` is only handed values that passed [`ShaderParams::apply`]
/// validation, but still reports mismatches as errors.
pub trait ShaderParams: Clone + PartialEq + fmt::Debug + Default + Serialize {
    const KIND: ShaderKind;

    /// Every parameter, in the order links and listings use.
    fn schema() -> &'static [ParamDef];

    fn aliases() -> &'static [ParamAlias] {
        &[]
    }

    /// Built-in presets; the first one is the default.
    fn presets() -> Vec<Preset<Self>>;

    fn sizing(&self) -> &SizingParams;

    fn sizing_mut(&mut self) -> &mut SizingParams;

    /// `None` for static kinds.
    fn motion(&self) -> Option<MotionParams> {
        None
    }

    fn get(&self, name: &str) -> Option<ParamValue>;

    fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError>;

    fn to_uniforms(&self) -> UniformBag;

    fn param(name: &str) -> Option<&'static ParamDef> {
        Self::schema().iter().find(|def| def.name == name)
    }

    /// Applies every entry of `patch` or none of them.
    fn apply(&mut self, patch: &ParamPatch) -> Result<(), ParamError> {
        let patch = patch.clone().resolve_aliases(Self::aliases());
        let mut next = self.clone();
        for (name, value) in patch.iter() {
            let def = Self::param(name).ok_or_else(|| ParamError::UnknownParam {
                kind: Self::KIND.name(),
                name: name.to_string(),
            })?;
            let value = coerce(def, value.clone())?;
            next.set(name, value)?;
        }
        *self = next;
        Ok(())
    }

    /// Default bag with `patch` layered on top.
    fn from_patch(patch: &ParamPatch) -> Result<Self, ParamError> {
        let mut params = Self::default();
        params.apply(patch)?;
        Ok(params)
    }

    /// Every schema field of `self` as a patch.
    fn to_patch(&self) -> ParamPatch {
        Self::schema()
            .iter()
            .filter_map(|def| self.get(def.name).map(|value| (def.name, value)))
            .collect()
    }
}

/// Checks `value` against `def` and converts the loose forms UI code sends
/// (color strings, single colors for lists, option names as text).
pub fn coerce(def: &ParamDef, value: ParamValue) -> Result<ParamValue, ParamError> {
    let mismatch = |value: &ParamValue| ParamError::TypeMismatch {
        name: def.name.to_string(),
        expected: def.kind.describe(),
        found: value.type_name(),
    };

    match (def.kind, value) {
        (ParamType::Bool, value @ ParamValue::Bool(_)) => Ok(value),
        (ParamType::Number, ParamValue::Number(number)) => {
            finite(def.name, number).map(ParamValue::Number)
        }
        (ParamType::Numbers, ParamValue::Number(number)) => {
            finite(def.name, number).map(|n| ParamValue::Numbers(vec![n]))
        }
        (ParamType::Numbers, ParamValue::Numbers(numbers)) => numbers
            .into_iter()
            .map(|n| finite(def.name, n))
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::Numbers),
        (ParamType::Text, ParamValue::Text(text) | ParamValue::Choice(text)) => {
            Ok(ParamValue::Text(text))
        }
        (ParamType::Color, value @ ParamValue::Color(_)) => Ok(value),
        (ParamType::Color, ParamValue::Text(text)) => Ok(ParamValue::Color(normalize_color(&text))),
        (ParamType::Colors, value @ ParamValue::Colors(_)) => Ok(value),
        (ParamType::Colors, ParamValue::Color(color)) => Ok(ParamValue::Colors(vec![color])),
        (ParamType::Choice(options), ParamValue::Choice(name) | ParamValue::Text(name)) => {
            match options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(name.trim()))
            {
                Some(option) => Ok(ParamValue::Choice((*option).to_string())),
                None => Err(ParamError::UnknownOption {
                    name: def.name.to_string(),
                    value: name,
                    options: options.join(", "),
                }),
            }
        }
        (_, value) => Err(mismatch(&value)),
    }
}

fn finite(name: &str, number: f32) -> Result<f32, ParamError> {
    if number.is_finite() {
        Ok(number)
    } else {
        Err(ParamError::InvalidValue {
            name: name.to_string(),
            value: number.to_string(),
        })
    }
}

pub(crate) fn number(name: &str, value: ParamValue) -> Result<f32, ParamError> {
    match value {
        ParamValue::Number(number) => finite(name, number),
        other => Err(ParamError::TypeMismatch {
            name: name.to_string(),
            expected: ParamType::Number.describe(),
            found: other.type_name(),
        }),
    }
}

pub(crate) fn color(name: &str, value: ParamValue) -> Result<Color, ParamError> {
    match value {
        ParamValue::Color(color) => Ok(color),
        ParamValue::Text(text) => Ok(normalize_color(&text)),
        other => Err(ParamError::TypeMismatch {
            name: name.to_string(),
            expected: ParamType::Color.describe(),
            found: other.type_name(),
        }),
    }
}

/// Color list of 1 to `max` entries.
pub(crate) fn color_list(name: &str, value: ParamValue, max: usize) -> Result<Vec<Color>, ParamError> {
    let colors = match value {
        ParamValue::Colors(colors) => colors,
        ParamValue::Color(color) => vec![color],
        other => {
            return Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: ParamType::Colors.describe(),
                found: other.type_name(),
            })
        }
    };
    if colors.is_empty() || colors.len() > max {
        return Err(ParamError::ListLength {
            name: name.to_string(),
            len: colors.len(),
            max,
        });
    }
    Ok(colors)
}

pub(crate) fn choice<E: ParamEnum>(name: &str, value: ParamValue) -> Result<E, ParamError> {
    match value {
        ParamValue::Choice(option) | ParamValue::Text(option) => {
            E::from_name(&option).ok_or_else(|| ParamError::UnknownOption {
                name: name.to_string(),
                value: option,
                options: E::NAMES.join(", "),
            })
        }
        other => Err(ParamError::TypeMismatch {
            name: name.to_string(),
            expected: "an option name",
            found: other.type_name(),
        }),
    }
}

pub(crate) fn option<E: ParamEnum>(value: E) -> ParamValue {
    ParamValue::Choice(value.name().to_string())
}

pub(crate) const SPEED: ParamDef =
    ParamDef::number("speed", "Animation speed multiplier, 0 pauses", -2.0, 20.0);
pub(crate) const FRAME: ParamDef =
    ParamDef::number("frame", "Animation time in milliseconds", 0.0, 100_000.0);
pub(crate) const SCALE: ParamDef = ParamDef::number("scale", "Overall zoom", 0.01, 4.0);
pub(crate) const ROTATION: ParamDef = ParamDef::number("rotation", "Rotation in degrees", 0.0, 360.0);
pub(crate) const OFFSET_X: ParamDef =
    ParamDef::number("offsetX", "Horizontal offset of the graphic", -1.0, 1.0);
pub(crate) const OFFSET_Y: ParamDef =
    ParamDef::number("offsetY", "Vertical offset of the graphic", -1.0, 1.0);
pub(crate) const FIT: ParamDef = ParamDef::new(
    "fit",
    ParamType::Choice(<Fit as ParamEnum>::NAMES),
    "How the world box fits the canvas",
);
pub(crate) const WORLD_WIDTH: ParamDef =
    ParamDef::number("worldWidth", "World box width in CSS pixels, 0 follows the canvas", 0.0, 5120.0);
pub(crate) const WORLD_HEIGHT: ParamDef =
    ParamDef::number("worldHeight", "World box height in CSS pixels, 0 follows the canvas", 0.0, 5120.0);
pub(crate) const ORIGIN_X: ParamDef =
    ParamDef::number("originX", "Horizontal anchor of the world box", 0.0, 1.0);
pub(crate) const ORIGIN_Y: ParamDef =
    ParamDef::number("originY", "Vertical anchor of the world box", 0.0, 1.0);

/// Reads the sizing and motion fields every kind shares.
pub(crate) fn get_common(
    sizing: &SizingParams,
    motion: Option<&MotionParams>,
    name: &str,
) -> Option<ParamValue> {
    let value = match name {
        "speed" => motion?.speed,
        "frame" => motion?.frame,
        "fit" => return Some(option(sizing.fit)),
        "scale" => sizing.scale,
        "rotation" => sizing.rotation,
        "offsetX" => sizing.offset_x,
        "offsetY" => sizing.offset_y,
        "originX" => sizing.origin_x,
        "originY" => sizing.origin_y,
        "worldWidth" => sizing.world_width,
        "worldHeight" => sizing.world_height,
        _ => return None,
    };
    Some(ParamValue::Number(value))
}

/// Writes one of the shared sizing/motion fields.
pub(crate) fn set_common(
    kind: ShaderKind,
    sizing: &mut SizingParams,
    motion: Option<&mut MotionParams>,
    name: &str,
    value: ParamValue,
) -> Result<(), ParamError> {
    let unknown = || ParamError::UnknownParam {
        kind: kind.name(),
        name: name.to_string(),
    };
    match name {
        "speed" => motion.ok_or_else(unknown)?.speed = number(name, value)?,
        "frame" => motion.ok_or_else(unknown)?.frame = number(name, value)?,
        "fit" => sizing.fit = choice(name, value)?,
        "scale" => sizing.scale = number(name, value)?,
        "rotation" => sizing.rotation = number(name, value)?,
        "offsetX" => sizing.offset_x = number(name, value)?,
        "offsetY" => sizing.offset_y = number(name, value)?,
        "originX" => sizing.origin_x = number(name, value)?,
        "originY" => sizing.origin_y = number(name, value)?,
        "worldWidth" => sizing.world_width = number(name, value)?,
        "worldHeight" => sizing.world_height = number(name, value)?,
        _ => return Err(unknown()),
    }
    Ok(())
}

/// Sizing defaults for a kind with the given preset overrides.
pub(crate) fn sizing_with(mode: SizingMode, scale: f32, rotation: f32) -> SizingParams {
    SizingParams {
        scale,
        rotation,
        ..SizingParams::default_for(mode)
    }
}
