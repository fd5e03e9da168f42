//! CPU reference of the per-fragment ASCII composition.
//!
//! `shaders/ascii.wgsl` evaluates the same steps on the GPU; the functions here
//! exist so the quantization rules can be checked on the host.

use crate::atlas::AtlasImage;
use crate::constants::JITTER_WEIGHT;
use crate::palette::{band_index, Palette, Rgb};
use glam::Vec2;

/// Per-media letterbox scale: the media keeps its aspect inside the viewport.
///
/// Returns `(a/v, 1)` when the viewport is wider than the source and
/// `(1, v/a)` otherwise. Non-positive or non-finite aspects yield `(1, 1)`.
pub fn video_scale(source_aspect: f32, viewport_aspect: f32) -> Vec2 {
    let valid = |x: f32| x.is_finite() && x > 0.0;
    if !valid(source_aspect) || !valid(viewport_aspect) {
        return Vec2::ONE;
    }
    if viewport_aspect > source_aspect {
        Vec2::new(source_aspect / viewport_aspect, 1.0)
    } else {
        Vec2::new(1.0, viewport_aspect / source_aspect)
    }
}

/// Map a grid UV into source UV, rescaled about the centre.
#[inline]
pub fn video_uv(pixel_uv: Vec2, scale: Vec2) -> Vec2 {
    (pixel_uv - Vec2::splat(0.5)) / scale + Vec2::splat(0.5)
}

/// 1.0 when `uv` lies in `[0,1]²`, else 0.0 (inclusive edges, like `step`).
#[inline]
pub fn inside_mask(uv: Vec2) -> f32 {
    let inside = (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y);
    if inside {
        1.0
    } else {
        0.0
    }
}

#[inline]
pub fn gamma_curve(channel: f32, gamma: f32) -> f32 {
    channel.max(0.0).powf(gamma)
}

#[inline]
pub fn brightness(channel: f32, gamma: f32, jitter: f32, inside: f32) -> f32 {
    (gamma_curve(channel, gamma) + jitter * JITTER_WEIGHT).clamp(0.0, 1.0) * inside
}

/// Glyph column for `brightness`, clamped to the last cell.
#[inline]
pub fn bucket_index(brightness: f32, length: u32) -> u32 {
    let length = length.max(1);
    let raw = (brightness.max(0.0) * length as f32).floor() as u32;
    raw.min(length - 1)
}

/// Atlas UV for a quad-local `uv` drawn with glyph column `bucket`.
#[inline]
pub fn glyph_uv(quad_uv: Vec2, bucket: u32, length: u32) -> Vec2 {
    let n = length.max(1) as f32;
    Vec2::new(quad_uv.x / n + bucket as f32 / n, quad_uv.y)
}

/// Everything one fragment resolves to before the atlas lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub inside: f32,
    pub brightness: f32,
    pub bucket: u32,
    pub band: usize,
    pub color: Rgb,
    pub glyph_uv: Vec2,
}

/// Inputs shared by every fragment of one draw.
#[derive(Clone, Debug)]
pub struct ComposeParams<'a> {
    pub gamma: f32,
    pub length: u32,
    pub video_scale: Vec2,
    pub palette: &'a Palette,
}

/// Resolve a fragment given the source green channel already sampled at `video_uv`.
pub fn compose_fragment(
    params: &ComposeParams<'_>,
    pixel_uv: Vec2,
    quad_uv: Vec2,
    jitter: f32,
    sample_green: f32,
) -> Fragment {
    let uv = video_uv(pixel_uv, params.video_scale);
    let inside = inside_mask(uv);
    let b = brightness(sample_green, params.gamma, jitter, inside);
    let bucket = bucket_index(b, params.length);
    let band = band_index(b);
    Fragment {
        inside,
        brightness: b,
        bucket,
        band,
        color: params.palette.resolve(b),
        glyph_uv: glyph_uv(quad_uv, bucket, params.length),
    }
}

/// Final colour: atlas sample × palette colour × inside mask.
pub fn shade(fragment: &Fragment, atlas: &AtlasImage) -> [f32; 4] {
    let mask = atlas.sample(fragment.glyph_uv.to_array());
    let c = fragment.color.mul(fragment.inside);
    [mask[0] * c.r, mask[1] * c.g, mask[2] * c.b, mask[3] * fragment.inside]
}
