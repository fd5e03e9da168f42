//! Glyph atlas layout: a horizontal strip of square cells, one per glyph.
//!
//! The glyph count doubles as the number of brightness buckets, so the layout
//! is the single source for both the texture size and the shader's `length`.

use crate::constants::{
    ATLAS_BASELINE_RATIO, ATLAS_CELL_SIZE, ATLAS_FONT_FAMILY, ATLAS_FONT_RATIO, FALLBACK_GLYPHS,
};

/// Non-empty, ordered glyph sequence (darkest first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: Vec<char>,
}

impl GlyphSet {
    /// Empty input falls back to [`FALLBACK_GLYPHS`].
    pub fn new(s: &str) -> Self {
        let glyphs: Vec<char> = s.chars().filter(|c| !c.is_control()).collect();
        if glyphs.is_empty() {
            log::warn!("[atlas] empty glyph string; using fallback {FALLBACK_GLYPHS:?}");
            return Self {
                glyphs: FALLBACK_GLYPHS.chars().collect(),
            };
        }
        Self { glyphs }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.glyphs.len() as u32
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<char> {
        self.glyphs.get(index as usize).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().copied()
    }

    pub fn as_string(&self) -> String {
        self.glyphs.iter().collect()
    }

    /// The first `max` glyphs (at least one); `self` unchanged when it already fits.
    pub fn truncated(&self, max: u32) -> Self {
        let max = max.max(1) as usize;
        if self.glyphs.len() <= max {
            return self.clone();
        }
        log::warn!(
            "[atlas] {} glyphs exceed the atlas limit; keeping the first {max}",
            self.glyphs.len()
        );
        Self {
            glyphs: self.glyphs[..max].to_vec(),
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_GLYPHS)
    }
}

/// One glyph placed in the strip, in atlas pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub glyph: char,
    pub center_x: f32,
    pub baseline_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    pub cell_size: u32,
    pub length: u32,
}

impl AtlasLayout {
    pub fn new(glyphs: &GlyphSet, cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            length: glyphs.len().max(1),
        }
    }

    pub fn with_default_cell(glyphs: &GlyphSet) -> Self {
        Self::new(glyphs, ATLAS_CELL_SIZE)
    }

    /// Shrink the cell so the strip stays within `max_width` texels.
    ///
    /// At most `max_width` glyphs get a cell; rasterize with
    /// [`GlyphSet::truncated`] to the same count.
    pub fn fitting(glyphs: &GlyphSet, cell_size: u32, max_width: u32) -> Self {
        let max_width = max_width.max(1);
        let length = glyphs.len().clamp(1, max_width);
        let cell = cell_size.min(max_width / length).max(1);
        if cell < cell_size {
            log::warn!("[atlas] {length} glyphs exceed {max_width}px; cell shrunk to {cell}px");
        }
        Self {
            cell_size: cell,
            length,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.cell_size * self.length
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.cell_size
    }

    pub fn font_px(&self) -> f32 {
        (self.cell_size as f32 * ATLAS_FONT_RATIO).round()
    }

    /// CSS font shorthand used by the 2D canvas rasterizer.
    pub fn css_font(&self) -> String {
        format!("bold {}px {}", self.font_px(), ATLAS_FONT_FAMILY)
    }

    pub fn cell_center_x(&self, index: u32) -> f32 {
        self.cell_size as f32 * (index as f32 + 0.5)
    }

    pub fn baseline_y(&self) -> f32 {
        self.cell_size as f32 * ATLAS_BASELINE_RATIO
    }

    pub fn placements<'a>(&'a self, glyphs: &'a GlyphSet) -> impl Iterator<Item = GlyphPlacement> + 'a {
        glyphs.iter().enumerate().map(move |(i, glyph)| GlyphPlacement {
            glyph,
            center_x: self.cell_center_x(i as u32),
            baseline_y: self.baseline_y(),
        })
    }

    /// Horizontal UV range `[u0, u1)` covered by cell `index`; the span
    /// [`crate::compose::glyph_uv`] lands in for that bucket.
    pub fn cell_u_range(&self, index: u32) -> (f32, f32) {
        let n = self.length as f32;
        let i = index.min(self.length - 1) as f32;
        (i / n, (i + 1.0) / n)
    }

    /// Bytes of a tightly packed RGBA8 image of this layout.
    pub fn rgba_len(&self) -> usize {
        self.width() as usize * self.height() as usize * 4
    }
}

/// CPU-side atlas pixels (RGBA8, row-major, top row first).
#[derive(Clone, Debug)]
pub struct AtlasImage {
    pub layout: AtlasLayout,
    pub rgba: Vec<u8>,
}

impl AtlasImage {
    /// Solid black image of the layout's size; the rasterizer paints glyphs on top.
    pub fn blank(layout: AtlasLayout) -> Self {
        let mut rgba = vec![0u8; layout.rgba_len()];
        for px in rgba.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self { layout, rgba }
    }

    pub fn from_rgba(layout: AtlasLayout, rgba: Vec<u8>) -> Option<Self> {
        (rgba.len() == layout.rgba_len()).then_some(Self { layout, rgba })
    }

    /// Flood one cell with a colour. Builds reference atlases for [`crate::compose::shade`].
    pub fn fill_cell(&mut self, index: u32, rgba: [u8; 4]) {
        let cell = self.layout.cell_size as usize;
        let row_px = self.layout.width() as usize;
        let x0 = index.min(self.layout.length - 1) as usize * cell;
        for y in 0..cell {
            let start = (y * row_px + x0) * 4;
            for px in self.rgba[start..start + cell * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.layout.width() - 1) as usize;
        let y = y.min(self.layout.height() - 1) as usize;
        let i = (y * self.layout.width() as usize + x) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    /// Nearest-texel lookup at `uv` (top-left origin, clamped to edge).
    pub fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        let w = self.layout.width() as f32;
        let h = self.layout.height() as f32;
        let x = (uv[0].clamp(0.0, 1.0) * w).floor().min(w - 1.0) as u32;
        let y = (uv[1].clamp(0.0, 1.0) * h).floor().min(h - 1.0) as u32;
        self.pixel(x, y).map(|c| c as f32 / 255.0)
    }
}
