use anyhow::{anyhow, bail, Context, Result};
use presetconfig::PresetLibrary;
use tracing_subscriber::EnvFilter;
use uniforms::{AnyParams, ParamPatch, ShaderKind};
use urlstate::{decode_value, decode_values};

use crate::cli::StateArgs;

/// Used when `RUST_LOG` is unset: our crates at info, dependencies at warn.
const DEFAULT_FILTER: &str =
    "warn,shaderkit=info,presetconfig=info,urlstate=info,uniforms=info,sizing=info,colors=info";

pub fn initialise_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the parameter state described by `args`.
pub fn resolve_state(args: &StateArgs, library: &PresetLibrary) -> Result<AnyParams> {
    let kind = args.kind;
    let mut params = match &args.preset {
        Some(name) => library.find(kind, name).ok_or_else(|| {
            anyhow!(
                "{kind} has no preset named '{name}' (available: {})",
                library.names(kind).join(", ")
            )
        })?,
        None => AnyParams::default_for(kind),
    };

    if let Some(state) = &args.state {
        let defaults = AnyParams::default_for(kind).to_patch();
        let patch = decode_values(kind.schema(), kind.aliases(), &defaults, state);
        params
            .apply(&patch)
            .with_context(|| format!("failed to apply URL state to {kind}"))?;
    }

    if !args.assignments.is_empty() {
        let patch = assignments_patch(kind, &args.assignments)?;
        params
            .apply(&patch)
            .with_context(|| format!("failed to apply --set values to {kind}"))?;
    }

    tracing::debug!(%kind, preset = ?params.matching_preset(), "resolved parameter state");
    Ok(params)
}

fn assignments_patch(kind: ShaderKind, assignments: &[(String, String)]) -> Result<ParamPatch> {
    let mut patch = ParamPatch::new();
    for (key, raw) in assignments {
        let canonical = kind
            .aliases()
            .iter()
            .find(|alias| alias.alias == key)
            .map_or(key.as_str(), |alias| alias.canonical);
        let Some(def) = kind.schema().iter().find(|def| def.name == canonical) else {
            let known: Vec<_> = kind.schema().iter().map(|def| def.name).collect();
            bail!(
                "{kind} has no parameter named '{key}' (known: {})",
                known.join(", ")
            );
        };
        let value = decode_value(def, raw).with_context(|| format!("invalid value for '{key}'"))?;
        patch.insert(key.as_str(), value);
    }
    Ok(patch.resolve_aliases(kind.aliases()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colors::Color;
    use uniforms::ParamValue;

    fn state(kind: ShaderKind) -> StateArgs {
        StateArgs {
            kind,
            preset: None,
            state: None,
            assignments: Vec::new(),
        }
    }

    #[test]
    fn default_filter_names_workspace_crates() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        for krate in ["shaderkit", "presetconfig", "urlstate", "uniforms", "sizing", "colors"] {
            assert!(DEFAULT_FILTER.contains(&format!("{krate}=info")), "{krate}");
        }
    }

    #[test]
    fn layers_apply_in_order() {
        let mut args = state(ShaderKind::Dithering);
        args.preset = Some("ripple".into());
        args.state = Some("size=5&colorFront=ff0000".into());
        args.assignments = vec![("pxSize".into(), "7".into())];

        let params = resolve_state(&args, &PresetLibrary::new()).unwrap();
        assert_eq!(params.get("size"), Some(ParamValue::Number(7.0)));
        assert_eq!(
            params.get("colorFront"),
            Some(ParamValue::Color(Color::rgb(1.0, 0.0, 0.0)))
        );
        let ripple = AnyParams::preset(ShaderKind::Dithering, "Ripple").unwrap();
        assert_eq!(params.get("shape"), ripple.get("shape"));
    }

    #[test]
    fn unknown_preset_lists_alternatives() {
        let mut args = state(ShaderKind::Warp);
        args.preset = Some("nope".into());
        let err = resolve_state(&args, &PresetLibrary::new()).unwrap_err();
        assert!(err.to_string().contains("Cauldron Pot"), "{err}");
    }

    #[test]
    fn rejects_bad_assignments() {
        let mut args = state(ShaderKind::DotGrid);
        args.assignments = vec![("speed".into(), "1".into())];
        assert!(resolve_state(&args, &PresetLibrary::new()).is_err());

        args.assignments = vec![("shape".into(), "hexagon".into())];
        assert!(resolve_state(&args, &PresetLibrary::new()).is_err());
    }

    #[test]
    fn url_state_is_tolerant() {
        let mut args = state(ShaderKind::DotGrid);
        args.state = Some("shape=hexagon&bogus=1".into());
        let params = resolve_state(&args, &PresetLibrary::new()).unwrap();
        assert_eq!(params, AnyParams::default_for(ShaderKind::DotGrid));
    }
}
