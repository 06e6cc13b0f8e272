use anyhow::{anyhow, Context, Result};

use crate::layout::{assemble_fragment_shader, UniformLayout};
use crate::params::{MotionParams, ParamPatch, ShaderParams};
use crate::presets::{apply_preset, find_preset};
use crate::value::UniformBag;

/// Everything a renderer needs to start drawing a shader.
#[derive(Debug, Clone, PartialEq)]
pub struct MountRequest {
    /// Complete GLSL ES 3.0 fragment shader.
    pub fragment_shader: String,
    pub uniforms: UniformBag,
    pub speed: f32,
    pub frame: f32,
}

/// The rendering side of a shader session: compiles the program, owns the
/// animation loop and uploads uniforms.
pub trait RenderMount {
    fn mount(&mut self, request: &MountRequest) -> Result<()>;
    fn update_uniforms(&mut self, uniforms: &UniformBag) -> Result<()>;
    fn set_speed(&mut self, speed: f32);
    fn set_frame(&mut self, frame: f32);
}

/// Live parameters of one mounted shader.
///
/// Every change recomputes the uniform bag; the mount only hears about it
/// when the bag actually differs from the last upload.
#[derive(Debug)]
pub struct ShaderSession<P: ShaderParams, M: RenderMount> {
    params: P,
    uniforms: UniformBag,
    layout: UniformLayout,
    mount: M,
}

impl<P: ShaderParams, M: RenderMount> ShaderSession<P, M> {
    /// Wraps `fragment_body` with the uniform declarations of `P` and mounts
    /// it with `params`.
    pub fn start(mut mount: M, fragment_body: &str, params: P) -> Result<Self> {
        let layout = UniformLayout::from_bag(&P::default().to_uniforms(), P::KIND.color_capacity());
        let uniforms = params.to_uniforms();
        let motion = params.motion().unwrap_or(MotionParams::new(0.0, 0.0));
        let request = MountRequest {
            fragment_shader: assemble_fragment_shader(&layout, fragment_body),
            uniforms: uniforms.clone(),
            speed: motion.speed,
            frame: motion.frame,
        };
        mount
            .mount(&request)
            .with_context(|| format!("failed to mount {} shader", P::KIND))?;
        tracing::debug!(kind = %P::KIND, uniforms = uniforms.len(), "mounted shader");

        Ok(Self {
            params,
            uniforms,
            layout,
            mount,
        })
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn uniforms(&self) -> &UniformBag {
        &self.uniforms
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    /// Applies a partial update. Returns whether uniforms were re-uploaded.
    pub fn apply(&mut self, patch: &ParamPatch) -> Result<bool> {
        let mut next = self.params.clone();
        next.apply(patch)
            .with_context(|| format!("rejected {} parameter update", P::KIND))?;
        self.replace(next)
    }

    /// Switches to a built-in preset, keeping the current world size.
    pub fn switch_preset(&mut self, name: &str) -> Result<bool> {
        let preset = find_preset::<P>(name)
            .ok_or_else(|| anyhow!("{} has no preset named '{name}'", P::KIND))?;
        let next = apply_preset(&self.params, &preset);
        self.replace(next)
    }

    pub fn replace(&mut self, next: P) -> Result<bool> {
        if let (Some(before), Some(after)) = (self.params.motion(), next.motion()) {
            if before.speed != after.speed {
                self.mount.set_speed(after.speed);
            }
            if before.frame != after.frame {
                self.mount.set_frame(after.frame);
            }
        }
        self.params = next;

        let uniforms = self.params.to_uniforms();
        if uniforms == self.uniforms {
            tracing::trace!(kind = %P::KIND, "uniforms unchanged; skipping upload");
            return Ok(false);
        }
        let changed = uniforms.changed_since(&self.uniforms);
        tracing::debug!(kind = %P::KIND, ?changed, "uploading uniforms");
        self.mount.update_uniforms(&uniforms)?;
        self.uniforms = uniforms;
        Ok(true)
    }

    pub fn into_mount(self) -> M {
        self.mount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::dithering::DitheringParams;
    use crate::kinds::dot_grid::DotGridParams;
    use crate::value::UniformValue;

    #[derive(Debug, Default)]
    struct RecordingMount {
        mounted: Vec<MountRequest>,
        uploads: Vec<UniformBag>,
        speeds: Vec<f32>,
        frames: Vec<f32>,
        fail_mount: bool,
    }

    impl RenderMount for RecordingMount {
        fn mount(&mut self, request: &MountRequest) -> Result<()> {
            if self.fail_mount {
                anyhow::bail!("context lost");
            }
            self.mounted.push(request.clone());
            Ok(())
        }

        fn update_uniforms(&mut self, uniforms: &UniformBag) -> Result<()> {
            self.uploads.push(uniforms.clone());
            Ok(())
        }

        fn set_speed(&mut self, speed: f32) {
            self.speeds.push(speed);
        }

        fn set_frame(&mut self, frame: f32) {
            self.frames.push(frame);
        }
    }

    const BODY: &str = "out vec4 fragColor;\nvoid main() { fragColor = u_colorFront; }\n";

    #[test]
    fn mount_receives_assembled_shader() {
        let session =
            ShaderSession::start(RecordingMount::default(), BODY, DitheringParams::default()).unwrap();
        let request = &session.mount().mounted[0];
        assert!(request.fragment_shader.contains("vec4 u_colorFront;"));
        assert!(request.fragment_shader.contains("float u_shape;"));
        assert_eq!(request.speed, 1.0);
        assert_eq!(request.uniforms, DitheringParams::default().to_uniforms());
    }

    #[test]
    fn unchanged_uniforms_are_not_uploaded() {
        let mut session =
            ShaderSession::start(RecordingMount::default(), BODY, DitheringParams::default()).unwrap();
        assert!(!session.apply(&ParamPatch::new().with("size", 2.0_f32)).unwrap());
        assert!(!session.apply(&ParamPatch::new().with("frame", 900.0_f32)).unwrap());
        assert_eq!(session.mount().frames, vec![900.0]);
        assert!(session.mount().uploads.is_empty());

        assert!(session.apply(&ParamPatch::new().with("size", 4.0_f32)).unwrap());
        let upload = &session.mount().uploads[0];
        assert_eq!(upload.get("u_pxSize"), Some(&UniformValue::Float(4.0)));
    }

    #[test]
    fn speed_changes_reach_the_mount() {
        let mut session =
            ShaderSession::start(RecordingMount::default(), BODY, DitheringParams::default()).unwrap();
        session.apply(&ParamPatch::new().with("speed", 0.0_f32)).unwrap();
        assert_eq!(session.mount().speeds, vec![0.0]);
    }

    #[test]
    fn rejected_patch_leaves_session_untouched() {
        let mut session =
            ShaderSession::start(RecordingMount::default(), BODY, DotGridParams::default()).unwrap();
        assert!(session
            .apply(&ParamPatch::new().with("gapX", 10.0_f32).with("speed", 1.0_f32))
            .is_err());
        assert_eq!(session.params(), &DotGridParams::default());
        assert!(session.mount().uploads.is_empty());
    }

    #[test]
    fn oversized_color_list_never_reaches_the_mount() {
        use crate::kinds::static_mesh_gradient::StaticMeshGradientParams;
        let mut session = ShaderSession::start(
            RecordingMount::default(),
            BODY,
            StaticMeshGradientParams::default(),
        )
        .unwrap();
        let patch = ParamPatch::new().with("colors", vec![colors::Color::BLACK; 11]);
        assert!(session.apply(&patch).is_err());
        assert_eq!(session.params(), &StaticMeshGradientParams::default());
        assert!(session.mount().uploads.is_empty());
    }

    #[test]
    fn preset_switch_keeps_world_size() {
        let mut params = DitheringParams::default();
        params.sizing.world_width = 300.0;
        let mut session = ShaderSession::start(RecordingMount::default(), BODY, params).unwrap();
        assert!(session.switch_preset("ripple").unwrap());
        assert_eq!(session.params().sizing.world_width, 300.0);
        assert_eq!(session.params().size, 3.0);
        assert!(session.switch_preset("nonexistent").is_err());
    }

    #[test]
    fn mount_failures_carry_context() {
        let mount = RecordingMount {
            fail_mount: true,
            ..RecordingMount::default()
        };
        let err = ShaderSession::start(mount, BODY, DitheringParams::default()).unwrap_err();
        assert_eq!(err.to_string(), "failed to mount dithering shader");
        assert_eq!(err.root_cause().to_string(), "context lost");
    }
}
