//! Displaced slab used as the live source scene.
//!
//! The slab is built face by face like a segmented box; every frame the
//! vertices on the upper side are lifted by two travelling sine terms and
//! normals are recomputed from the triangles.

use crate::constants::{
    WAVE_AMPLITUDE, WAVE_FREQUENCY, WAVE_PLANE_SIZE, WAVE_SEGMENTS, WAVE_SPEED,
    WAVE_SPEED_Z_RATIO, WAVE_THICKNESS, WAVE_TWIST,
};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
    pub twist: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: WAVE_AMPLITUDE,
            frequency: WAVE_FREQUENCY,
            speed: WAVE_SPEED,
            twist: WAVE_TWIST,
        }
    }
}

/// Height offset (before amplitude) at `(x, z)` and time `t`.
#[inline]
pub fn wave_term(x: f32, z: f32, t: f32, p: &WaveParams) -> f32 {
    let a = (x * p.frequency + t * p.speed).sin();
    let b = (z * p.frequency + t * p.speed * WAVE_SPEED_Z_RATIO).cos();
    a * (1.0 - p.twist) + b * p.twist
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlabSpec {
    pub width: f32,
    pub thickness: f32,
    pub depth: f32,
    pub segments: u32,
}

impl Default for SlabSpec {
    fn default() -> Self {
        Self {
            width: WAVE_PLANE_SIZE,
            thickness: WAVE_THICKNESS,
            depth: WAVE_PLANE_SIZE,
            segments: WAVE_SEGMENTS,
        }
    }
}

pub struct WaveMesh {
    base: Vec<Vec3>,
    pub vertices: Vec<WaveVertex>,
    pub indices: Vec<u32>,
}

// Axis indices into a Vec3
const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

struct Face {
    u: usize,
    v: usize,
    w: usize,
    udir: f32,
    vdir: f32,
    extent_u: f32,
    extent_v: f32,
    offset_w: f32,
    segs_u: u32,
    segs_v: u32,
}

impl WaveMesh {
    pub fn new(spec: &SlabSpec) -> Self {
        let segs = spec.segments.max(1);
        let (w, h, d) = (spec.width, spec.thickness, spec.depth);
        let faces = [
            face(Z, Y, X, -1.0, -1.0, d, h, w / 2.0, segs, 1),
            face(Z, Y, X, 1.0, -1.0, d, h, -w / 2.0, segs, 1),
            face(X, Z, Y, 1.0, 1.0, w, d, h / 2.0, segs, segs),
            face(X, Z, Y, 1.0, -1.0, w, d, -h / 2.0, segs, segs),
            face(X, Y, Z, 1.0, -1.0, w, h, d / 2.0, segs, 1),
            face(X, Y, Z, -1.0, -1.0, w, h, -d / 2.0, segs, 1),
        ];
        let mut base = Vec::new();
        let mut indices = Vec::new();
        for f in &faces {
            push_face(f, &mut base, &mut indices);
        }
        let vertices = base
            .iter()
            .map(|p| WaveVertex {
                position: p.to_array(),
                normal: [0.0; 3],
            })
            .collect();
        let mut mesh = Self {
            base,
            vertices,
            indices,
        };
        mesh.recompute_normals();
        mesh
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base
    }

    /// Lift the upper vertices for time `t`; lower vertices keep their base height.
    pub fn update(&mut self, t: f32, params: &WaveParams) {
        for (v, p) in self.vertices.iter_mut().zip(&self.base) {
            let y = if p.y > 0.0 {
                p.y + wave_term(p.x, p.z, t, params) * params.amplitude
            } else {
                p.y
            };
            v.position = [p.x, y, p.z];
        }
        self.recompute_normals();
    }

    fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let a = Vec3::from(self.vertices[ia].position);
            let b = Vec3::from(self.vertices[ib].position);
            let c = Vec3::from(self.vertices[ic].position);
            let n = (c - b).cross(a - b);
            acc[ia] += n;
            acc[ib] += n;
            acc[ic] += n;
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.normalize_or_zero().to_array();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn face(
    u: usize,
    v: usize,
    w: usize,
    udir: f32,
    vdir: f32,
    extent_u: f32,
    extent_v: f32,
    offset_w: f32,
    segs_u: u32,
    segs_v: u32,
) -> Face {
    Face {
        u,
        v,
        w,
        udir,
        vdir,
        extent_u,
        extent_v,
        offset_w,
        segs_u,
        segs_v,
    }
}

fn push_face(f: &Face, base: &mut Vec<Vec3>, indices: &mut Vec<u32>) {
    let start = base.len() as u32;
    let step_u = f.extent_u / f.segs_u as f32;
    let step_v = f.extent_v / f.segs_v as f32;
    for iy in 0..=f.segs_v {
        let y = iy as f32 * step_v - f.extent_v / 2.0;
        for ix in 0..=f.segs_u {
            let x = ix as f32 * step_u - f.extent_u / 2.0;
            let mut p = [0.0f32; 3];
            p[f.u] = x * f.udir;
            p[f.v] = y * f.vdir;
            p[f.w] = f.offset_w;
            base.push(Vec3::from(p));
        }
    }
    let row = f.segs_u + 1;
    for iy in 0..f.segs_v {
        for ix in 0..f.segs_u {
            let a = start + ix + row * iy;
            let b = start + ix + row * (iy + 1);
            let c = start + ix + 1 + row * (iy + 1);
            let d = start + ix + 1 + row * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}
