//! Rasterizes the glyph strip with a detached 2D canvas.

use anyhow::Context;
use ascii_core::{AtlasImage, AtlasLayout, GlyphSet};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn rasterize(
    document: &web::Document,
    glyphs: &GlyphSet,
    layout: AtlasLayout,
) -> anyhow::Result<AtlasImage> {
    let canvas: web::HtmlCanvasElement = crate::dom::create(document, "canvas")?;
    canvas.set_width(layout.width());
    canvas.set_height(layout.height());
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get_context(2d): {:?}", e))?
        .context("2d context unavailable")?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow::anyhow!("not a CanvasRenderingContext2d"))?;

    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, layout.width() as f64, layout.height() as f64);
    ctx.set_fill_style_str("#fff");
    ctx.set_font(&layout.css_font());
    ctx.set_text_align("center");
    ctx.set_text_baseline("alphabetic");
    let mut buf = [0u8; 4];
    for p in layout.placements(glyphs) {
        let s: &str = p.glyph.encode_utf8(&mut buf);
        ctx.fill_text(s, p.center_x as f64, p.baseline_y as f64)
            .map_err(|e| anyhow::anyhow!("fill_text({s:?}): {:?}", e))?;
    }

    let data = ctx
        .get_image_data(0.0, 0.0, layout.width() as f64, layout.height() as f64)
        .map_err(|e| anyhow::anyhow!("get_image_data: {:?}", e))?;
    let rgba = data.data().0;
    AtlasImage::from_rgba(layout, rgba).context("atlas pixel buffer size mismatch")
}

/// Rasterize `glyphs` into a strip no wider than `max_width`.
///
/// Returns the glyph set actually drawn, which is shorter than `glyphs` when
/// they do not all fit.
pub fn build(
    document: &web::Document,
    glyphs: &GlyphSet,
    max_width: u32,
) -> anyhow::Result<(GlyphSet, AtlasImage)> {
    let glyphs = glyphs.truncated(max_width);
    let layout = AtlasLayout::fitting(&glyphs, ascii_core::ATLAS_CELL_SIZE, max_width);
    let image = rasterize(document, &glyphs, layout)?;
    log::info!(
        "[atlas] rasterized {:?} into {}x{}",
        glyphs.as_string(),
        layout.width(),
        layout.height()
    );
    Ok((glyphs, image))
}
