//! Instance grid: one quad per cell, each sampling its own point of the source.

use crate::constants::{GRID_MIN_COLUMNS, QUAD_SIZE};
use rand::prelude::*;

/// Per-instance vertex attributes, laid out for a `VertexStepMode::Instance` buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceAttrs {
    pub offset: [f32; 3],
    pub jitter: f32,
    pub pixel_uv: [f32; 2],
}

/// Quad corner: local position and glyph UV (v = 0 at the top edge).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub rows: u32,
    pub columns: u32,
    pub quad_size: f32,
}

impl GridSpec {
    /// Columns follow the viewport aspect: `floor(rows / aspect)`.
    pub fn for_aspect(rows: u32, aspect: f32, quad_size: f32) -> Self {
        let rows = rows.max(2);
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let columns = ((rows as f32 / aspect).floor() as u32).max(GRID_MIN_COLUMNS);
        Self {
            rows,
            columns,
            quad_size,
        }
    }

    #[inline]
    pub fn instance_count(&self) -> u32 {
        self.rows * self.columns
    }
}

/// Lay out `rows × columns` instances centred on the origin.
///
/// Jitter is `r²` with `r` uniform in `[0,1)`, biasing it towards zero.
pub fn build_instances(spec: &GridSpec, seed: u64) -> Vec<InstanceAttrs> {
    let mut rng = StdRng::seed_from_u64(seed);
    let size = spec.quad_size;
    let half_x = size * (spec.rows - 1) as f32 / 2.0;
    let half_y = size * (spec.columns - 1) as f32 / 2.0;
    let mut out = Vec::with_capacity(spec.instance_count() as usize);
    for i in 0..spec.rows {
        for j in 0..spec.columns {
            let r: f32 = rng.gen();
            out.push(InstanceAttrs {
                offset: [i as f32 * size - half_x, j as f32 * size - half_y, 0.0],
                jitter: r * r,
                pixel_uv: [
                    i as f32 / (spec.rows - 1) as f32,
                    j as f32 / (spec.columns - 1) as f32,
                ],
            });
        }
    }
    out
}

/// Two triangles forming one quad of side `size`, centred on the origin.
pub fn quad_vertices(size: f32) -> [QuadVertex; 6] {
    let h = size / 2.0;
    let v = |x: f32, y: f32, u: f32, w: f32| QuadVertex {
        position: [x, y],
        uv: [u, w],
    };
    [
        v(-h, -h, 0.0, 1.0),
        v(h, -h, 1.0, 1.0),
        v(h, h, 1.0, 0.0),
        v(-h, -h, 0.0, 1.0),
        v(h, h, 1.0, 0.0),
        v(-h, h, 0.0, 0.0),
    ]
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::for_aspect(crate::constants::GRID_ROWS, 1.0, QUAD_SIZE)
    }
}
