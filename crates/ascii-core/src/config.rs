//! Immutable start-up configuration.
//!
//! Built from defaults, optionally overridden by the page query string
//! (`?glyphs=AB&rows=80&gamma=1.2&source=video&media=clip.mp4&seed=7&palette=#000,#111,#222,#333,#444`).

use crate::atlas::GlyphSet;
use crate::constants::{DEFAULT_GAMMA, DEFAULT_SEED, GRID_ROWS};
use crate::palette::{ColorParseError, Palette};
use crate::wave::WaveParams;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown source `{0}` (expected wave, video or image)")]
    UnknownSource(String),
    #[error("`{key}` = `{value}` is not a valid number")]
    BadNumber { key: &'static str, value: String },
    #[error("`{key}` = `{value}` is out of range")]
    OutOfRange { key: &'static str, value: String },
    #[error("bad palette: {0}")]
    Palette(#[from] ColorParseError),
}

/// Where the source texture comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    #[default]
    Wave,
    Video,
    Image,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Wave, SourceKind::Video, SourceKind::Image];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Wave => "wave",
            SourceKind::Video => "video",
            SourceKind::Image => "image",
        }
    }

    /// Guess the element type from a URL or file name; anything not a still image plays as video.
    pub fn for_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        let stem = lower.split(['?', '#']).next().unwrap_or("");
        const IMAGE_EXTS: [&str; 6] = [".png", ".jpg", ".jpeg", ".webp", ".gif", ".bmp"];
        if IMAGE_EXTS.iter().any(|ext| stem.ends_with(ext)) {
            SourceKind::Image
        } else {
            SourceKind::Video
        }
    }

    /// Element type for a picked file's MIME type.
    pub fn for_mime(mime: &str, file_name: &str) -> Self {
        if mime.starts_with("image/") {
            SourceKind::Image
        } else if mime.starts_with("video/") {
            SourceKind::Video
        } else {
            Self::for_path(file_name)
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wave" | "scene" => Ok(SourceKind::Wave),
            "video" => Ok(SourceKind::Video),
            "image" => Ok(SourceKind::Image),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub rows: u32,
    pub glyphs: GlyphSet,
    pub palette: Palette,
    pub gamma: f32,
    pub wave: WaveParams,
    pub source: SourceKind,
    pub media_url: Option<String>,
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            glyphs: GlyphSet::default(),
            palette: Palette::default(),
            gamma: DEFAULT_GAMMA,
            wave: WaveParams::default(),
            source: SourceKind::Wave,
            media_url: None,
            seed: DEFAULT_SEED,
        }
    }
}

const MAX_ROWS: u32 = 400;

fn parse_num<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::BadNumber {
        key,
        value: value.to_string(),
    })
}

impl AppConfig {
    /// Apply one `key=value` override. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "glyphs" => self.glyphs = GlyphSet::new(value),
            "rows" => {
                let rows: u32 = parse_num("rows", value)?;
                if !(2..=MAX_ROWS).contains(&rows) {
                    return Err(ConfigError::OutOfRange {
                        key: "rows",
                        value: value.to_string(),
                    });
                }
                self.rows = rows;
            }
            "gamma" => {
                let g: f32 = parse_num("gamma", value)?;
                if !(g.is_finite() && g > 0.0) {
                    return Err(ConfigError::OutOfRange {
                        key: "gamma",
                        value: value.to_string(),
                    });
                }
                self.gamma = g;
            }
            "source" => self.source = value.parse()?,
            "media" => {
                let url = value.trim();
                self.media_url = (!url.is_empty()).then(|| url.to_string());
            }
            "seed" => self.seed = parse_num("seed", value)?,
            "palette" => self.palette = Palette::parse_list(value)?,
            _ => log::debug!("[config] ignoring unknown key `{key}`"),
        }
        Ok(())
    }

    /// Defaults overridden by a URL query string (with or without leading `?`).
    ///
    /// Bad values are returned alongside the config; the defaults for those
    /// keys are kept.
    pub fn from_query(query: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if let Err(e) = config.set(&key, &value) {
                errors.push(e);
            }
        }
        if config.source != SourceKind::Wave && config.media_url.is_none() {
            log::warn!("[config] source={} without media; using wave", config.source);
            config.source = SourceKind::Wave;
        }
        (config, errors)
    }
}
