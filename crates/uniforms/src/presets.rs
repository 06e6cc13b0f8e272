use serde::Serialize;

use crate::params::{ParamValue, ShaderParams};

/// Named parameter bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset<P> {
    pub name: String,
    pub params: P,
}

impl<P> Preset<P> {
    pub fn new(name: impl Into<String>, params: P) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Built-in preset of `P` called `name`, ignoring case.
pub fn find_preset<P: ShaderParams>(name: &str) -> Option<Preset<P>> {
    let name = name.trim();
    P::presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Looks `name` up in `presets` first, then among the built-ins.
pub fn find_in<P: ShaderParams>(presets: &[Preset<P>], name: &str) -> Option<Preset<P>> {
    let name = name.trim();
    presets
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
        .cloned()
        .or_else(|| find_preset(name))
}

/// Switches to `preset` while keeping the world size of `current`.
pub fn apply_preset<P: ShaderParams>(current: &P, preset: &Preset<P>) -> P {
    let mut next = preset.params.clone();
    let sizing = next.sizing_mut();
    sizing.world_width = current.sizing().world_width;
    sizing.world_height = current.sizing().world_height;
    tracing::debug!(kind = P::KIND.name(), preset = %preset.name, "applied preset");
    next
}

/// First preset whose params equal `current`, disregarding animation frame.
pub fn matching_preset<'a, P: ShaderParams>(current: &P, presets: &'a [Preset<P>]) -> Option<&'a Preset<P>> {
    presets.iter().find(|preset| {
        let mut candidate = preset.params.clone();
        if let Some(motion) = current.motion() {
            if candidate.set("frame", ParamValue::Number(motion.frame)).is_err() {
                return false;
            }
        }
        candidate == *current
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::dithering::DitheringParams;
    use crate::kinds::warp::WarpParams;
    use crate::params::ParamPatch;

    #[test]
    fn lookup_ignores_case() {
        let preset = find_preset::<DitheringParams>("sine wave").unwrap();
        assert_eq!(preset.name, "Sine Wave");
        assert!(find_preset::<DitheringParams>("Nope").is_none());
    }

    #[test]
    fn apply_keeps_world_size() {
        let mut current = DitheringParams::default();
        current.sizing_mut().world_width = 640.0;
        current.sizing_mut().world_height = 480.0;
        let warp = find_preset::<DitheringParams>("Warp").unwrap();
        let next = apply_preset(&current, &warp);
        assert_eq!(next.sizing().world_width, 640.0);
        assert_eq!(next.sizing().world_height, 480.0);
        assert_eq!(next.sizing().fit, warp.params.sizing().fit);
        assert_eq!(next.size, 2.5);
    }

    #[test]
    fn highlight_ignores_frame() {
        let presets = WarpParams::presets();
        let mut current = find_preset::<WarpParams>("Kelp").unwrap().params;
        current.apply(&ParamPatch::new().with("frame", 1234.0_f32)).unwrap();
        assert_eq!(matching_preset(&current, &presets).map(|p| p.name.as_str()), Some("Kelp"));

        current.apply(&ParamPatch::new().with("speed", 0.5_f32)).unwrap();
        assert!(matching_preset(&current, &presets).is_none());
    }

    #[test]
    fn user_presets_shadow_builtins() {
        let custom = vec![Preset::new(
            "Warp",
            DitheringParams {
                size: 7.0,
                ..DitheringParams::default()
            },
        )];
        assert_eq!(find_in(&custom, "warp").unwrap().params.size, 7.0);
        assert_eq!(find_in(&custom, "Bugs").unwrap().name, "Bugs");
    }
}
