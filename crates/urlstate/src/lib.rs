//! Shareable URL state for shader parameters.
//!
//! State is a `key=value&key=value` string in schema order: numbers with at
//! most four decimals, colors as hex without `#` (or a percent-encoded
//! `rgba()` when hex would round them), lists comma-joined, options by name
//! and free text percent-encoded.
//!
//! Decoding never fails. Unknown keys and pairs without `=` are skipped and
//! values that cannot be read fall back to the kind's default, so a stale or
//! hand-edited link still opens.

mod link;
mod value;

use uniforms::{AnyParams, ParamAlias, ParamDef, ParamPatch, ShaderKind, ShaderParams};

pub use link::{decode_link, link_state, link_with_state, share_link, LinkError};
pub use value::{decode_value, encode_value, format_number, ValueError};

/// Encodes every schema entry present in `values`, in schema order.
pub fn encode_values(schema: &[ParamDef], values: &ParamPatch) -> String {
    schema
        .iter()
        .filter_map(|def| {
            values
                .get(def.name)
                .map(|value| format!("{}={}", def.name, encode_value(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Reads `query` against `schema`.
///
/// Alias keys are accepted and renamed. Malformed values are replaced by the
/// entry of `defaults` for that key, when there is one.
pub fn decode_values(
    schema: &[ParamDef],
    aliases: &[ParamAlias],
    defaults: &ParamPatch,
    query: &str,
) -> ParamPatch {
    let query = query.trim().trim_start_matches(['?', '#']);
    let mut patch = ParamPatch::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let Some((key, raw)) = pair.split_once('=') else {
            tracing::debug!(pair, "skipping url pair without '='");
            continue;
        };
        let key = key.trim();
        let canonical = aliases
            .iter()
            .find(|alias| alias.alias == key)
            .map_or(key, |alias| alias.canonical);
        let Some(def) = schema.iter().find(|def| def.name == canonical) else {
            tracing::debug!(key, "skipping unknown url parameter");
            continue;
        };

        let form_decoded = raw.replace('+', " ");
        let decoded = urlencoding::decode(&form_decoded)
            .map(|text| text.into_owned())
            .unwrap_or(form_decoded);

        match decode_value(def, &decoded) {
            Ok(value) => {
                patch.insert(key, value);
            }
            Err(err) => match defaults.get(def.name) {
                Some(fallback) if key == def.name => {
                    tracing::debug!(key, %err, "malformed url value; using default");
                    patch.insert(key, fallback.clone());
                }
                _ => tracing::debug!(key, %err, "dropping malformed url value"),
            },
        }
    }

    patch.resolve_aliases(aliases)
}

/// URL state for every parameter of `params`.
pub fn encode<P: ShaderParams>(params: &P) -> String {
    encode_values(P::schema(), &params.to_patch())
}

/// Partial update described by `query`, ready for [`ShaderParams::apply`].
pub fn decode<P: ShaderParams>(query: &str) -> ParamPatch {
    decode_values(P::schema(), P::aliases(), &P::default().to_patch(), query)
}

/// Default parameters of `P` with the state in `query` layered on top.
pub fn decode_params<P: ShaderParams>(query: &str) -> P {
    let patch = decode::<P>(query);
    P::from_patch(&patch).unwrap_or_else(|err| {
        tracing::warn!(kind = %P::KIND, %err, "url state rejected; using defaults");
        P::default()
    })
}

/// [`encode`] for a kind chosen at runtime.
pub fn encode_any(params: &AnyParams) -> String {
    encode_values(params.kind().schema(), &params.to_patch())
}

/// [`decode_params`] for a kind chosen at runtime.
pub fn decode_any(kind: ShaderKind, query: &str) -> AnyParams {
    let defaults = AnyParams::default_for(kind);
    let patch = decode_values(kind.schema(), kind.aliases(), &defaults.to_patch(), query);
    AnyParams::from_patch(kind, &patch).unwrap_or_else(|err| {
        tracing::warn!(%kind, %err, "url state rejected; using defaults");
        defaults
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use colors::Color;
    use uniforms::{
        AnyParams, DitheringParams, DotGridParams, GrainGradientParams, NeuroNoiseParams, ParamType,
        ParamValue, ShaderKind, SimplexNoiseParams, SpiralParams, StaticMeshGradientParams,
        StaticRadialGradientParams, SwirlParams, WarpParams,
    };

    fn round_trips<P: ShaderParams>() {
        for preset in P::presets() {
            let encoded = encode(&preset.params);
            let decoded: P = decode_params(&encoded);
            assert_eq!(decoded, preset.params, "{} / {}: {encoded}", P::KIND, preset.name);
        }
    }

    #[test]
    fn every_preset_round_trips() {
        round_trips::<DitheringParams>();
        round_trips::<DotGridParams>();
        round_trips::<GrainGradientParams>();
        round_trips::<NeuroNoiseParams>();
        round_trips::<SimplexNoiseParams>();
        round_trips::<SpiralParams>();
        round_trips::<StaticMeshGradientParams>();
        round_trips::<StaticRadialGradientParams>();
        round_trips::<SwirlParams>();
        round_trips::<WarpParams>();
    }

    #[test]
    fn encodes_in_schema_order() {
        let encoded = encode(&DitheringParams::default());
        assert_eq!(
            encoded,
            "colorBack=000000&colorFront=00b2ff&shape=sphere&type=4x4&size=2&speed=1&frame=0\
             &scale=0.6&rotation=0&offsetX=0&offsetY=0&fit=none&worldWidth=0&worldHeight=0\
             &originX=0.5&originY=0.5"
        );
    }

    #[test]
    fn decode_is_tolerant() {
        let patch = decode::<DitheringParams>("size=abc&bogus=1&shape&type=8x8&colorFront=ff0000");
        assert_eq!(patch.get("size"), Some(&ParamValue::Number(2.0)));
        assert!(!patch.contains("bogus"));
        assert!(!patch.contains("shape"));
        assert_eq!(patch.get("type"), Some(&ParamValue::Choice("8x8".into())));
        assert_eq!(
            patch.get("colorFront"),
            Some(&ParamValue::Color(Color::rgb(1.0, 0.0, 0.0)))
        );

        let params: DitheringParams = decode_params("size=abc&shape=hexagon");
        assert_eq!(params, DitheringParams::default());
        assert!(decode::<WarpParams>("").is_empty());
        assert!(decode::<WarpParams>("&&=&").is_empty());
    }

    #[test]
    fn decodes_aliases_and_prefixes() {
        let patch = decode::<DitheringParams>("?pxSize=6");
        assert_eq!(patch.get("size"), Some(&ParamValue::Number(6.0)));
        let patch = decode::<DitheringParams>("#pxSize=6&size=3");
        assert_eq!(patch.get("size"), Some(&ParamValue::Number(3.0)));
        let patch = decode::<DitheringParams>("pxSize=oops");
        assert!(patch.is_empty());
    }

    #[test]
    fn percent_encoded_values() {
        let patch = decode::<GrainGradientParams>("colorBack=%23ff0000&colors=ff0000%2C00ff00");
        assert_eq!(
            patch.get("colorBack"),
            Some(&ParamValue::Color(Color::rgb(1.0, 0.0, 0.0)))
        );
        assert_eq!(
            patch.get("colors"),
            Some(&ParamValue::Colors(vec![
                Color::rgb(1.0, 0.0, 0.0),
                Color::rgb(0.0, 1.0, 0.0)
            ]))
        );
    }

    #[test]
    fn colors_beyond_eight_bits_round_trip() {
        let mut params = DitheringParams::default();
        params
            .apply(&ParamPatch::new().with("colorFront", ParamValue::Text("rgba(255,0,0,0.5)".into())))
            .unwrap();
        let decoded: DitheringParams = decode_params(&encode(&params));
        assert_eq!(decoded.color_front.a, 0.5);
        assert_eq!(decoded, params);

        params.color_back = colors::normalize_color("hsl(200, 37%, 41%)");
        let encoded = encode(&params);
        assert_eq!(decode_params::<DitheringParams>(&encoded), params, "{encoded}");
    }

    #[test]
    fn translucent_list_items_round_trip() {
        let mut params = WarpParams::default();
        params.colors = vec![Color::new(0.2, 0.4, 0.6, 0.5), Color::rgb(1.0, 1.0, 1.0)];
        let encoded = encode(&params);
        assert!(encoded.starts_with("colors=rgba%28"), "{encoded}");
        assert_eq!(decode_params::<WarpParams>(&encoded), params);
    }

    #[test]
    fn color_lists_outside_capacity_use_default() {
        let eleven = vec!["ff0000"; 11].join(",");
        let params = decode_any(
            ShaderKind::StaticMeshGradient,
            &format!("colors={eleven}&mixing=0.5"),
        );
        let defaults = StaticMeshGradientParams::default();
        assert_eq!(params.get("colors"), Some(ParamValue::Colors(defaults.colors.clone())));
        assert_eq!(params.get("mixing"), Some(ParamValue::Number(0.5)));

        let params: GrainGradientParams = decode_params("colors=&softness=0.1");
        assert_eq!(params.colors, GrainGradientParams::default().colors);
        assert_eq!(params.to_uniforms().get("u_colorsCount"), Some(&uniforms::UniformValue::Float(4.0)));
        assert_eq!(params.softness, 0.1);
    }

    #[test]
    fn custom_schema_with_flags_and_lists() {
        static SCHEMA: [ParamDef; 3] = [
            ParamDef::new("enabled", ParamType::Bool, ""),
            ParamDef::new("stops", ParamType::Numbers, ""),
            ParamDef::new("title", ParamType::Text, ""),
        ];
        let values = ParamPatch::new()
            .with("enabled", true)
            .with("stops", ParamValue::Numbers(vec![0.25, 0.5]))
            .with("title", ParamValue::Text("hello world+1".into()));
        let encoded = encode_values(&SCHEMA, &values);
        assert_eq!(encoded, "enabled=true&stops=0.25,0.5&title=hello%20world%2B1");
        assert_eq!(decode_values(&SCHEMA, &[], &ParamPatch::new(), &encoded), values);
    }

    #[test]
    fn works_through_any_params() {
        for kind in ShaderKind::ALL {
            for name in kind.preset_names() {
                let params = AnyParams::preset(kind, &name).unwrap();
                assert_eq!(decode_any(kind, &encode_any(&params)), params, "{kind} / {name}");
            }
        }
        assert_eq!(
            decode_any(ShaderKind::DotGrid, "shape=hexagon"),
            AnyParams::default_for(ShaderKind::DotGrid)
        );
    }
}
