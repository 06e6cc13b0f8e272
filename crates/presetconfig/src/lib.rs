//! User preset files.
//!
//! A preset file holds presets for one shader kind. Each preset lists only
//! the parameters it changes; everything else comes from the kind's default
//! preset.
//!
//! ```toml
//! version = 1
//! kind = "warp"
//!
//! [[presets]]
//! name = "Dusk"
//!
//! [presets.params]
//! colors = ["#1b1036", "hsl(280, 60%, 40%)", "#ff9966"]
//! speed = 0.5
//! shape = "stripes"
//! ```

use std::collections::HashSet;

use colors::parse_color;
use serde::Deserialize;
use thiserror::Error;
use uniforms::{AnyParams, ParamDef, ParamPatch, ParamType, ParamValue, Preset, ShaderKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse preset file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid preset file: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPresetFile {
    version: u32,
    kind: String,
    #[serde(default)]
    presets: Vec<RawPreset>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPreset {
    name: String,
    #[serde(default)]
    params: toml::Table,
}

/// Presets of one kind read from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetFile {
    pub version: u32,
    pub kind: ShaderKind,
    pub presets: Vec<Preset<AnyParams>>,
}

impl PresetFile {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawPresetFile = toml::from_str(input)?;

        if raw.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported preset file version {}; expected 1",
                raw.version
            )));
        }

        let kind = ShaderKind::from_name(&raw.kind).ok_or_else(|| {
            let known: Vec<_> = ShaderKind::ALL.iter().map(|kind| kind.name()).collect();
            ConfigError::Invalid(format!(
                "unknown shader kind '{}'; expected one of: {}",
                raw.kind,
                known.join(", ")
            ))
        })?;

        if raw.presets.is_empty() {
            return Err(ConfigError::Invalid(
                "preset file must define at least one preset".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut presets = Vec::with_capacity(raw.presets.len());
        for preset in raw.presets {
            let name = preset.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("preset name may not be empty".into()));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate preset name '{name}'"
                )));
            }

            let patch = table_to_patch(kind, name, &preset.params)?;
            let params = AnyParams::from_patch(kind, &patch)
                .map_err(|err| ConfigError::Invalid(format!("preset '{name}': {err}")))?;
            presets.push(Preset::new(name, params));
        }

        Ok(Self {
            version: raw.version,
            kind,
            presets,
        })
    }
}

/// Built-in presets of every kind plus those loaded from files.
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    user: Vec<Preset<AnyParams>>,
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: PresetFile) {
        for preset in file.presets {
            if let Some(builtin) = AnyParams::preset(file.kind, &preset.name) {
                if builtin != preset.params {
                    tracing::debug!(kind = %file.kind, preset = %preset.name, "user preset shadows built-in");
                }
            }
            self.user.push(preset);
        }
    }

    pub fn user_presets(&self, kind: ShaderKind) -> impl Iterator<Item = &Preset<AnyParams>> {
        self.user
            .iter()
            .filter(move |preset| preset.params.kind() == kind)
    }

    /// Built-in names first, then user presets in load order.
    pub fn names(&self, kind: ShaderKind) -> Vec<String> {
        let mut names = kind.preset_names();
        names.extend(self.user_presets(kind).map(|preset| preset.name.clone()));
        names
    }

    /// User presets win over built-ins with the same name.
    pub fn find(&self, kind: ShaderKind, name: &str) -> Option<AnyParams> {
        let name = name.trim();
        self.user_presets(kind)
            .filter(|preset| preset.name.eq_ignore_ascii_case(name))
            .last()
            .map(|preset| preset.params.clone())
            .or_else(|| AnyParams::preset(kind, name))
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_empty()
    }
}

fn table_to_patch(kind: ShaderKind, preset: &str, table: &toml::Table) -> Result<ParamPatch, ConfigError> {
    let mut patch = ParamPatch::new();
    for (key, value) in table {
        let canonical = kind
            .aliases()
            .iter()
            .find(|alias| alias.alias == key)
            .map_or(key.as_str(), |alias| alias.canonical);
        let def = kind
            .schema()
            .iter()
            .find(|def| def.name == canonical)
            .ok_or_else(|| {
                ConfigError::Invalid(format!("preset '{preset}': {kind} has no parameter named '{key}'"))
            })?;
        let value = toml_to_value(def, value)
            .map_err(|reason| ConfigError::Invalid(format!("preset '{preset}' parameter '{key}': {reason}")))?;
        patch.insert(key.as_str(), value);
    }
    Ok(patch.resolve_aliases(kind.aliases()))
}

fn toml_to_value(def: &ParamDef, value: &toml::Value) -> Result<ParamValue, String> {
    use toml::Value;

    let unexpected = || format!("expected {}, found {}", def.kind.describe(), value.type_str());

    match (def.kind, value) {
        (ParamType::Bool, Value::Boolean(flag)) => Ok(ParamValue::Bool(*flag)),
        (ParamType::Number, value) => number(value).map(ParamValue::Number).ok_or_else(unexpected),
        (ParamType::Numbers, Value::Array(items)) => items
            .iter()
            .map(number)
            .collect::<Option<Vec<_>>>()
            .map(ParamValue::Numbers)
            .ok_or_else(unexpected),
        (ParamType::Numbers, value) => number(value)
            .map(|n| ParamValue::Numbers(vec![n]))
            .ok_or_else(unexpected),
        (ParamType::Text, Value::String(text)) => Ok(ParamValue::Text(text.clone())),
        (ParamType::Choice(_), Value::String(name)) => Ok(ParamValue::Choice(name.clone())),
        (ParamType::Color, Value::String(raw)) => parse_color(raw)
            .map(ParamValue::Color)
            .map_err(|err| err.to_string()),
        (ParamType::Colors, Value::String(raw)) => parse_color(raw)
            .map(|color| ParamValue::Colors(vec![color]))
            .map_err(|err| err.to_string()),
        (ParamType::Colors, Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(raw) => parse_color(raw).map_err(|err| err.to_string()),
                other => Err(format!("expected color string, found {}", other.type_str())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::Colors),
        _ => Err(unexpected()),
    }
}

fn number(value: &toml::Value) -> Option<f32> {
    match value {
        toml::Value::Integer(int) => Some(*int as f32),
        toml::Value::Float(float) => Some(*float as f32),
        _ => None,
    }
}
