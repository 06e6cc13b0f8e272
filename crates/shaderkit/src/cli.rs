use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sizing::SurfaceSize;
use uniforms::ShaderKind;

#[derive(Parser, Debug)]
#[command(
    name = "shaderkit",
    author,
    version,
    about = "Shader parameter, preset and uniform toolkit"
)]
pub struct Cli {
    /// Directory holding user preset files (`*.toml`).
    #[arg(long, global = true, env = "SHADERKIT_PRESET_DIR", value_name = "DIR")]
    pub preset_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available shader kinds.
    Kinds,
    /// List built-in and user presets of a kind.
    Presets(KindArgs),
    /// Print the uniforms a parameter state maps to.
    Uniforms(UniformsArgs),
    /// Print the URL state of a parameter state.
    Encode(EncodeArgs),
    /// Read URL state (a query string or a full link) back into parameters.
    Decode(DecodeArgs),
    /// Normalize color strings.
    Color(ColorArgs),
    /// Print the std140 uniform block of a kind.
    Layout(KindArgs),
}

#[derive(Args, Debug)]
pub struct KindArgs {
    /// Shader kind, e.g. `warp` or `dot-grid`.
    #[arg(value_name = "KIND", value_parser = parse_kind)]
    pub kind: ShaderKind,
}

/// Where a parameter state comes from. Layers apply in order: preset, URL
/// state, then individual `--set` assignments.
#[derive(Args, Debug)]
pub struct StateArgs {
    #[arg(value_name = "KIND", value_parser = parse_kind)]
    pub kind: ShaderKind,

    /// Start from this preset instead of the default one.
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// URL state to layer on top (`key=value&...`).
    #[arg(long, value_name = "QUERY")]
    pub state: Option<String>,

    /// Set one parameter using the URL value syntax; repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct UniformsArgs {
    #[command(flatten)]
    pub state: StateArgs,

    /// Also resolve sizing transforms for a surface of this size.
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_surface)]
    pub surface: Option<SurfaceSize>,

    /// Device pixel ratio used with `--surface`.
    #[arg(long, value_name = "RATIO", default_value_t = 1.0)]
    pub pixel_ratio: f32,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub state: StateArgs,

    /// Print a full link with the state in its fragment.
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[arg(value_name = "KIND", value_parser = parse_kind)]
    pub kind: ShaderKind,

    /// Query string, fragment or full URL.
    #[arg(value_name = "QUERY|URL")]
    pub input: String,

    /// Print JSON instead of `key=value` lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ColorArgs {
    #[arg(value_name = "COLOR", required = true)]
    pub inputs: Vec<String>,

    /// Fail on unreadable colors instead of falling back to black.
    #[arg(long)]
    pub strict: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_kind(value: &str) -> Result<ShaderKind, String> {
    ShaderKind::from_name(value).ok_or_else(|| {
        let known: Vec<_> = ShaderKind::ALL.iter().map(|kind| kind.name()).collect();
        format!("unknown shader kind '{}'; expected one of: {}", value.trim(), known.join(", "))
    })
}

pub fn parse_assignment(value: &str) -> Result<(String, String), String> {
    let (key, raw) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{value}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("parameter name must not be empty".into());
    }
    Ok((key.to_string(), raw.to_string()))
}

pub fn parse_surface(value: &str) -> Result<SurfaceSize, String> {
    let (w, h) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<f32>()
        .map_err(|_| "invalid surface width".to_string())?;
    let height = h
        .trim()
        .parse::<f32>()
        .map_err(|_| "invalid surface height".to_string())?;
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err("surface dimensions must be greater than zero".into());
    }
    Ok(SurfaceSize::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kinds_loosely() {
        assert_eq!(parse_kind("static_mesh_gradient").unwrap(), ShaderKind::StaticMeshGradient);
        assert_eq!(parse_kind("Warp").unwrap(), ShaderKind::Warp);
        let err = parse_kind("plasma").unwrap_err();
        assert!(err.contains("dot-grid"), "{err}");
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_assignment("colors=ff0000,00ff00").unwrap(),
            ("colors".to_string(), "ff0000,00ff00".to_string())
        );
        assert_eq!(
            parse_assignment("label=a=b").unwrap(),
            ("label".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("speed").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn parses_surfaces() {
        assert_eq!(parse_surface("1280x720").unwrap(), SurfaceSize::new(1280.0, 720.0));
        assert_eq!(parse_surface(" 640X480 ").unwrap(), SurfaceSize::new(640.0, 480.0));
        assert!(parse_surface("1280").is_err());
        assert!(parse_surface("0x720").is_err());
        assert!(parse_surface("axb").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
