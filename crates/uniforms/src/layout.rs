//! std140 packing of a [`UniformBag`] and the GLSL declarations that match it.

use std::fmt::Write as _;

use bytemuck::{Pod, Zeroable};
use sizing::RenderTarget;

use crate::value::{UniformBag, UniformValue};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("uniform '{0}' is missing from the bag")]
    Missing(&'static str),
    #[error("uniform '{name}' is declared as {expected} but the bag holds {found}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("uniform '{name}' holds {len} entries but the block reserves {max}")]
    ArrayOverflow {
        name: &'static str,
        len: usize,
        max: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    Float,
    Int,
    Vec2,
    Vec4,
    /// Fixed-capacity `vec4` array.
    Vec4Array(usize),
}

impl UniformType {
    fn of(value: &UniformValue, array_capacity: usize) -> Self {
        match value {
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Vec4Array(values) => UniformType::Vec4Array(array_capacity.max(values.len())),
        }
    }

    pub fn align(self) -> usize {
        match self {
            UniformType::Float | UniformType::Int => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec4 | UniformType::Vec4Array(_) => 16,
        }
    }

    pub fn size(self) -> usize {
        match self {
            UniformType::Float | UniformType::Int => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec4 => 16,
            UniformType::Vec4Array(len) => 16 * len,
        }
    }

    fn glsl(self) -> &'static str {
        match self {
            UniformType::Float => "float",
            UniformType::Int => "int",
            UniformType::Vec2 => "vec2",
            UniformType::Vec4 | UniformType::Vec4Array(_) => "vec4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformDecl {
    pub name: &'static str,
    pub ty: UniformType,
    /// Byte offset inside the block.
    pub offset: usize,
}

/// Member order, offsets and total size of a std140 uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformLayout {
    decls: Vec<UniformDecl>,
    size: usize,
}

impl UniformLayout {
    /// Lays out every uniform of `bag` in name order. Color arrays reserve
    /// `array_capacity` slots, or their current length if larger.
    pub fn from_bag(bag: &UniformBag, array_capacity: usize) -> Self {
        let mut decls = Vec::with_capacity(bag.len());
        let mut offset = 0;
        for (name, value) in bag.iter() {
            let ty = UniformType::of(value, array_capacity);
            offset = align_to(offset, ty.align());
            decls.push(UniformDecl { name, ty, offset });
            offset += ty.size();
        }
        Self {
            decls,
            size: align_to(offset, 16),
        }
    }

    pub fn decls(&self) -> &[UniformDecl] {
        &self.decls
    }

    /// Block size in bytes, padded to a multiple of 16.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn decl(&self, name: &str) -> Option<&UniformDecl> {
        self.decls.iter().find(|decl| decl.name == name)
    }

    /// `layout(std140) uniform <block_name> { ... };`
    pub fn glsl_block(&self, block_name: &str) -> String {
        let mut out = format!("layout(std140) uniform {block_name} {{\n");
        for decl in &self.decls {
            match decl.ty {
                UniformType::Vec4Array(len) => {
                    let _ = writeln!(out, "  {} {}[{}];", decl.ty.glsl(), decl.name, len);
                }
                ty => {
                    let _ = writeln!(out, "  {} {};", ty.glsl(), decl.name);
                }
            }
        }
        out.push_str("};\n");
        out
    }
}

impl UniformBag {
    /// Packs the bag into a buffer matching `layout`. Unused array slots stay
    /// zeroed.
    pub fn to_std140(&self, layout: &UniformLayout) -> Result<Vec<u8>, LayoutError> {
        let mut buffer = vec![0u8; layout.size()];
        for decl in layout.decls() {
            let value = self.get(decl.name).ok_or(LayoutError::Missing(decl.name))?;
            let start = decl.offset;
            match (decl.ty, value) {
                (UniformType::Float, UniformValue::Float(v)) => write(&mut buffer, start, v),
                (UniformType::Int, UniformValue::Int(v)) => write(&mut buffer, start, v),
                (UniformType::Vec2, UniformValue::Vec2(v)) => write(&mut buffer, start, v),
                (UniformType::Vec4, UniformValue::Vec4(v)) => write(&mut buffer, start, v),
                (UniformType::Vec4Array(max), UniformValue::Vec4Array(values)) => {
                    if values.len() > max {
                        tracing::warn!(uniform = decl.name, len = values.len(), max, "color list overflows block");
                        return Err(LayoutError::ArrayOverflow {
                            name: decl.name,
                            len: values.len(),
                            max,
                        });
                    }
                    let bytes: &[u8] = bytemuck::cast_slice(values.as_slice());
                    buffer[start..start + bytes.len()].copy_from_slice(bytes);
                }
                (ty, value) => {
                    return Err(LayoutError::TypeMismatch {
                        name: decl.name,
                        expected: ty.glsl(),
                        found: value.glsl_type(),
                    })
                }
            }
        }
        Ok(buffer)
    }
}

fn write<T: Pod>(buffer: &mut [u8], offset: usize, value: &T) {
    let bytes = bytemuck::bytes_of(value);
    buffer[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn align_to(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

/// Per-frame uniforms every fragment shader receives, std140 compatible.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub resolution: [f32; 2],
    /// Seconds, `frame * 0.001`.
    pub time: f32,
    pub pixel_ratio: f32,
}

impl FrameUniforms {
    pub fn new(target: RenderTarget, time: f32) -> Self {
        Self {
            resolution: [target.width as f32, target.height as f32],
            time,
            pixel_ratio: target.pixel_ratio,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

pub const FRAME_BLOCK: &str = "layout(std140) uniform FrameUniforms {
  vec2 u_resolution;
  float u_time;
  float u_pixelRatio;
};
";

/// Name of the parameter block in assembled shaders.
pub const PARAMS_BLOCK: &str = "ShaderParams";

/// Prepends the version line, precision, frame block and parameter block to
/// a GLSL fragment body. `#version` and `precision` lines already present in
/// `body` are dropped.
pub fn assemble_fragment_shader(layout: &UniformLayout, body: &str) -> String {
    let mut out = String::from("#version 300 es\nprecision mediump float;\n\n");
    out.push_str(FRAME_BLOCK);
    out.push('\n');
    out.push_str(&layout.glsl_block(PARAMS_BLOCK));
    out.push('\n');
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#version") || trimmed.starts_with("precision ") {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use colors::Color;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes(chunk.try_into().unwrap()))
            .collect()
    }

    fn sample_bag() -> UniformBag {
        let mut bag = UniformBag::new();
        bag.float("u_a", 1.5);
        bag.insert("u_b", UniformValue::Vec2([2.0, 3.0]));
        bag.color_list("u_colors", "u_colorsCount", &[Color::rgb(1.0, 0.0, 0.0)]);
        bag.color("u_d", Color::new(0.0, 1.0, 0.0, 0.5));
        bag
    }

    #[test]
    fn std140_offsets_follow_alignment() {
        let layout = UniformLayout::from_bag(&sample_bag(), 3);
        let offsets: Vec<(&str, usize)> = layout.decls().iter().map(|d| (d.name, d.offset)).collect();
        assert_eq!(
            offsets,
            vec![
                ("u_a", 0),
                ("u_b", 8),
                ("u_colors", 16),
                ("u_colorsCount", 64),
                ("u_d", 80),
            ]
        );
        assert_eq!(layout.size(), 96);
    }

    #[test]
    fn packs_values_and_zero_fills_unused_slots() {
        let layout = UniformLayout::from_bag(&sample_bag(), 3);
        let bytes = sample_bag().to_std140(&layout).unwrap();
        assert_eq!(bytes.len(), 96);
        let floats = floats(&bytes);
        assert_eq!(floats[0], 1.5);
        assert_eq!(&floats[2..4], &[2.0, 3.0]);
        assert_eq!(&floats[4..8], &[1.0, 0.0, 0.0, 1.0]);
        assert!(floats[8..16].iter().all(|v| *v == 0.0));
        assert_eq!(floats[16], 1.0);
        assert_eq!(&floats[20..24], &[0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn rejects_overflowing_arrays() {
        let layout = UniformLayout::from_bag(&sample_bag(), 1);
        let mut bag = sample_bag();
        bag.color_list("u_colors", "u_colorsCount", &[Color::BLACK, Color::BLACK]);
        assert_eq!(
            bag.to_std140(&layout),
            Err(LayoutError::ArrayOverflow {
                name: "u_colors",
                len: 2,
                max: 1,
            })
        );
    }

    #[test]
    fn reports_missing_and_mismatched_uniforms() {
        let layout = UniformLayout::from_bag(&sample_bag(), 3);
        let mut bag = sample_bag();
        bag.int("u_a", 1);
        assert!(matches!(
            bag.to_std140(&layout),
            Err(LayoutError::TypeMismatch { name: "u_a", .. })
        ));
        assert_eq!(
            UniformBag::new().to_std140(&layout),
            Err(LayoutError::Missing("u_a"))
        );
    }

    #[test]
    fn glsl_block_lists_members_in_order() {
        let layout = UniformLayout::from_bag(&sample_bag(), 3);
        assert_eq!(
            layout.glsl_block("Params"),
            "layout(std140) uniform Params {\n  float u_a;\n  vec2 u_b;\n  vec4 u_colors[3];\n  float u_colorsCount;\n  vec4 u_d;\n};\n"
        );
    }

    #[test]
    fn frame_uniforms_match_block_size() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        let frame = FrameUniforms::new(
            RenderTarget {
                width: 800,
                height: 600,
                pixel_ratio: 2.0,
            },
            1.5,
        );
        assert_eq!(floats(frame.as_bytes()), vec![800.0, 600.0, 1.5, 2.0]);
    }

    #[test]
    fn assembly_replaces_body_preamble() {
        let layout = UniformLayout::from_bag(&sample_bag(), 3);
        let body = "#version 100\nprecision highp float;\nout vec4 fragColor;\nvoid main() { fragColor = u_d; }\n";
        let shader = assemble_fragment_shader(&layout, body);
        assert!(shader.starts_with("#version 300 es\nprecision mediump float;\n"));
        assert_eq!(shader.matches("#version").count(), 1);
        assert_eq!(shader.matches("precision").count(), 1);
        assert!(shader.contains("uniform ShaderParams {"));
        assert!(shader.contains("float u_pixelRatio;"));
        assert!(shader.ends_with("void main() { fragColor = u_d; }\n"));
    }
}
