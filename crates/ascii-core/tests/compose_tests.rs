// Host-side tests for the brightness → glyph/colour quantization.

use ascii_core::compose::*;
use ascii_core::{band_index, AtlasImage, AtlasLayout, GlyphSet, Palette, Rgb, JITTER_WEIGHT};
use glam::Vec2;

#[test]
fn gamma_curve_is_monotone_in_channel() {
    for &g in &[0.5_f32, 0.8, 1.0, 2.3, 7.0] {
        let mut prev = gamma_curve(0.0, g);
        for i in 1..=200 {
            let c = i as f32 / 200.0;
            let cur = gamma_curve(c, g);
            assert!(cur >= prev, "gamma {g}: f({c}) = {cur} < {prev}");
            prev = cur;
        }
    }
}

#[test]
fn brightness_is_clamped_to_unit_range() {
    // full channel plus maximum jitter would exceed 1 without the clamp
    assert_eq!(brightness(1.0, 1.0, 1.0, 1.0), 1.0);
    assert_eq!(brightness(-0.5, 1.0, 0.0, 1.0), 0.0);
    assert!((brightness(0.5, 1.0, 1.0, 1.0) - (0.5 + JITTER_WEIGHT)).abs() < 1e-6);
}

#[test]
fn outside_the_media_is_black() {
    assert_eq!(brightness(1.0, 1.0, 0.5, 0.0), 0.0);
}

#[test]
fn band_index_matches_floor_formula_away_from_thresholds() {
    for i in 0..1000 {
        let b = (i as f32 + 0.5) / 1000.0;
        let expected = ((b.min(0.999) * 5.0).floor() as usize).min(4);
        assert_eq!(band_index(b), expected, "brightness {b}");
    }
}

#[test]
fn band_index_at_exact_thresholds() {
    assert_eq!(band_index(0.0), 0);
    assert_eq!(band_index(0.2), 1);
    assert_eq!(band_index(0.4), 2);
    assert_eq!(band_index(0.6), 3);
    assert_eq!(band_index(0.8), 4);
    assert_eq!(band_index(1.0), 4);
}

#[test]
fn bucket_index_never_reaches_length() {
    assert_eq!(bucket_index(0.0, 10), 0);
    assert_eq!(bucket_index(0.999, 10), 9);
    assert_eq!(bucket_index(1.0, 10), 9);
    assert_eq!(bucket_index(1.0, 1), 0);
}

#[test]
fn glyph_uv_selects_the_bucket_cell() {
    let uv = glyph_uv(Vec2::new(0.5, 0.25), 1, 4);
    assert!((uv.x - 0.375).abs() < 1e-6);
    assert_eq!(uv.y, 0.25);
    // quad edges stay inside the cell
    assert!((glyph_uv(Vec2::ZERO, 3, 4).x - 0.75).abs() < 1e-6);
    assert!((glyph_uv(Vec2::ONE, 3, 4).x - 1.0).abs() < 1e-6);
}

#[test]
fn video_scale_letterboxes_wide_viewports() {
    let s = video_scale(1.0, 2.0);
    assert!((s.x - 0.5).abs() < 1e-6);
    assert_eq!(s.y, 1.0);
}

#[test]
fn video_scale_pillarboxes_tall_viewports() {
    let s = video_scale(16.0 / 9.0, 1.0);
    assert_eq!(s.x, 1.0);
    assert!((s.y - 9.0 / 16.0).abs() < 1e-6);
}

#[test]
fn video_scale_stays_in_unit_interval() {
    for &a in &[0.1_f32, 0.5, 1.0, 1.33, 2.0, 10.0] {
        for &v in &[0.1_f32, 0.5, 1.0, 1.78, 3.0] {
            let s = video_scale(a, v);
            assert!(s.x > 0.0 && s.x <= 1.0, "a={a} v={v} -> {s:?}");
            assert!(s.y > 0.0 && s.y <= 1.0, "a={a} v={v} -> {s:?}");
            assert!(s.x == 1.0 || s.y == 1.0);
        }
    }
}

#[test]
fn video_scale_rejects_degenerate_aspects() {
    assert_eq!(video_scale(0.0, 1.0), Vec2::ONE);
    assert_eq!(video_scale(1.0, f32::NAN), Vec2::ONE);
    assert_eq!(video_scale(-2.0, 1.0), Vec2::ONE);
}

#[test]
fn letterboxed_cells_fall_outside() {
    let scale = video_scale(1.0, 2.0);
    assert_eq!(inside_mask(video_uv(Vec2::new(0.5, 0.5), scale)), 1.0);
    // grid edge maps beyond the media on the squeezed axis
    assert_eq!(inside_mask(video_uv(Vec2::new(0.0, 0.5), scale)), 0.0);
    assert_eq!(inside_mask(video_uv(Vec2::new(0.5, 0.0), scale)), 1.0);
}

#[test]
fn two_glyphs_at_half_brightness() {
    let glyphs = GlyphSet::new("AB");
    let layout = AtlasLayout::new(&glyphs, 4);
    let mut atlas = AtlasImage::blank(layout);
    atlas.fill_cell(0, [255, 0, 0, 255]);
    atlas.fill_cell(1, [0, 255, 0, 255]);

    let palette = Palette::default();
    let params = ComposeParams {
        gamma: 1.0,
        length: glyphs.len(),
        video_scale: Vec2::ONE,
        palette: &palette,
    };
    let frag = compose_fragment(&params, Vec2::splat(0.5), Vec2::splat(0.5), 0.0, 0.5);
    assert_eq!(frag.bucket, 1);
    assert_eq!(frag.band, 2);
    assert_eq!(glyphs.get(frag.bucket), Some('B'));

    let band_color = palette.get(2).unwrap_or(Rgb::BLACK);
    assert_eq!(frag.color, band_color);
    let out = shade(&frag, &atlas);
    assert_eq!(out[0], 0.0);
    assert!((out[1] - band_color.g).abs() < 1e-6);
    assert_eq!(out[2], 0.0);
}

#[test]
fn shade_outside_is_black() {
    let glyphs = GlyphSet::new("AB");
    let mut atlas = AtlasImage::blank(AtlasLayout::new(&glyphs, 4));
    atlas.fill_cell(0, [255, 255, 255, 255]);
    let palette = Palette::default();
    let params = ComposeParams {
        gamma: 1.0,
        length: 2,
        video_scale: Vec2::new(0.5, 1.0),
        palette: &palette,
    };
    let frag = compose_fragment(&params, Vec2::new(0.0, 0.5), Vec2::splat(0.5), 0.3, 0.9);
    assert_eq!(frag.inside, 0.0);
    assert_eq!(frag.bucket, 0);
    assert_eq!(shade(&frag, &atlas), [0.0; 4]);
}
