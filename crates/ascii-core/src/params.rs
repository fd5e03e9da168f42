//! Runtime parameter store and the events that mutate it.
//!
//! Controls never touch GPU state directly: they send [`ParamEvent`]s down a
//! one-way channel, and the frame loop applies them to its [`ParamStore`]
//! between frames. Each applied event reports a [`ParamEffect`] telling the
//! renderer whether uniforms are enough or a resource must be rebuilt.

use crate::atlas::GlyphSet;
use crate::compose::video_scale;
use crate::config::{AppConfig, SourceKind};
use crate::constants::{GAMMA_MAX, GAMMA_MIN, GAMMA_STEP, PALETTE_SIZE};
use crate::palette::{Palette, Rgb};
use crate::uniforms::AsciiUniforms;
use crate::wave::WaveParams;
use glam::{Mat4, Vec2};
use std::sync::mpsc;

/// Handle to a numeric entry of the parameter table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    Gamma,
    CharIndex,
    WaveAmplitude,
    WaveFrequency,
    WaveSpeed,
    WaveTwist,
}

/// Range and step of one numeric control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSpec {
    pub id: ParamId,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ControlSpec {
    /// Clamp into range and snap to the step grid anchored at `min`.
    pub fn quantize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        let v = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return v;
        }
        let snapped = self.min + ((v - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

const fn spec(id: ParamId, label: &'static str, min: f32, max: f32, step: f32) -> ControlSpec {
    ControlSpec {
        id,
        label,
        min,
        max,
        step,
    }
}

/// Numeric controls other than the glyph-dependent char index.
pub const GAMMA_CONTROL: ControlSpec = spec(ParamId::Gamma, "gamma", GAMMA_MIN, GAMMA_MAX, GAMMA_STEP);
pub const WAVE_CONTROLS: [ControlSpec; 4] = [
    spec(ParamId::WaveAmplitude, "waveAmplitude", 0.0, 1.2, 0.01),
    spec(ParamId::WaveFrequency, "waveFrequency", 0.2, 4.0, 0.05),
    spec(ParamId::WaveSpeed, "waveSpeed", 0.0, 4.0, 0.05),
    spec(ParamId::WaveTwist, "waveTwist", 0.0, 1.0, 0.01),
];

/// Char index range depends on the current glyph count.
pub fn char_index_control(length: u32) -> ControlSpec {
    spec(
        ParamId::CharIndex,
        "charIndex",
        0.0,
        length.saturating_sub(1) as f32,
        1.0,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamEvent {
    Set(ParamId, f32),
    Color(usize, Rgb),
    Glyphs(String),
    Source(SourceKind),
    /// A new media URL (object URL from the file picker or configured URL).
    Media { kind: SourceKind, url: String },
    /// Natural width/height ratio of the loaded media.
    SourceAspect(f32),
    Viewport { width: u32, height: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamEffect {
    None,
    Uniforms,
    /// Rasterize `glyphs`; `previous` is what the installed atlas holds.
    RebuildAtlas {
        glyphs: GlyphSet,
        previous: GlyphSet,
    },
    SwitchSource {
        kind: SourceKind,
        url: Option<String>,
    },
    /// A switch was refused; controls showing the source must fall back to this one.
    RestoreSource(SourceKind),
}

impl ParamEffect {
    /// Whether the hint line (source, glyph count, gamma) may have gone stale.
    pub fn refreshes_hint(&self) -> bool {
        !matches!(self, ParamEffect::None)
    }
}

pub type ParamSender = mpsc::Sender<ParamEvent>;
pub type ParamReceiver = mpsc::Receiver<ParamEvent>;

pub fn param_channel() -> (ParamSender, ParamReceiver) {
    mpsc::channel()
}

/// Mutable parameters owned by the frame loop.
#[derive(Clone, Debug)]
pub struct ParamStore {
    pub gamma: f32,
    pub char_index: u32,
    pub palette: Palette,
    pub wave: WaveParams,
    pub glyphs: GlyphSet,
    pub source: SourceKind,
    /// Last media URL and the kind of element that plays it.
    pub media: Option<(SourceKind, String)>,
    source_aspect: Option<f32>,
    viewport_aspect: f32,
}

impl ParamStore {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            gamma: GAMMA_CONTROL.quantize(config.gamma),
            char_index: 0,
            palette: config.palette.clone(),
            wave: config.wave,
            glyphs: config.glyphs.clone(),
            source: config.source,
            media: config
                .media_url
                .as_ref()
                .map(|url| (SourceKind::for_path(url), url.clone())),
            source_aspect: None,
            viewport_aspect: 1.0,
        }
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.glyphs.len()
    }

    /// Aspect-correction scale for the active source.
    ///
    /// The wave scene renders at viewport size, so it is never letterboxed.
    pub fn video_scale(&self) -> Vec2 {
        match (self.source, self.source_aspect) {
            (SourceKind::Wave, _) | (_, None) => Vec2::ONE,
            (_, Some(a)) => video_scale(a, self.viewport_aspect),
        }
    }

    pub fn media_url_for(&self, kind: SourceKind) -> Option<String> {
        match &self.media {
            Some((k, url)) if *k == kind => Some(url.clone()),
            _ => None,
        }
    }

    pub fn viewport_aspect(&self) -> f32 {
        self.viewport_aspect
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Gamma => self.gamma,
            ParamId::CharIndex => self.char_index as f32,
            ParamId::WaveAmplitude => self.wave.amplitude,
            ParamId::WaveFrequency => self.wave.frequency,
            ParamId::WaveSpeed => self.wave.speed,
            ParamId::WaveTwist => self.wave.twist,
        }
    }

    fn control(&self, id: ParamId) -> ControlSpec {
        match id {
            ParamId::Gamma => GAMMA_CONTROL,
            ParamId::CharIndex => char_index_control(self.length()),
            ParamId::WaveAmplitude => WAVE_CONTROLS[0],
            ParamId::WaveFrequency => WAVE_CONTROLS[1],
            ParamId::WaveSpeed => WAVE_CONTROLS[2],
            ParamId::WaveTwist => WAVE_CONTROLS[3],
        }
    }

    pub fn apply(&mut self, event: ParamEvent) -> ParamEffect {
        match event {
            ParamEvent::Set(id, raw) => {
                let v = self.control(id).quantize(raw);
                match id {
                    ParamId::Gamma => self.gamma = v,
                    ParamId::CharIndex => self.char_index = v as u32,
                    ParamId::WaveAmplitude => self.wave.amplitude = v,
                    ParamId::WaveFrequency => self.wave.frequency = v,
                    ParamId::WaveSpeed => self.wave.speed = v,
                    ParamId::WaveTwist => self.wave.twist = v,
                }
                ParamEffect::Uniforms
            }
            ParamEvent::Color(index, color) => {
                if self.palette.set(index, color) {
                    ParamEffect::Uniforms
                } else {
                    log::warn!("[params] palette index {index} out of range (0..{PALETTE_SIZE})");
                    ParamEffect::None
                }
            }
            ParamEvent::Glyphs(s) => {
                let next = GlyphSet::new(&s);
                if next == self.glyphs {
                    return ParamEffect::None;
                }
                let previous = std::mem::replace(&mut self.glyphs, next.clone());
                self.clamp_char_index();
                ParamEffect::RebuildAtlas {
                    glyphs: next,
                    previous,
                }
            }
            ParamEvent::Source(kind) => {
                if kind == self.source {
                    return ParamEffect::None;
                }
                let url = self.media_url_for(kind);
                if kind != SourceKind::Wave && url.is_none() {
                    log::warn!("[params] no {kind} media loaded; pick a file first");
                    return ParamEffect::RestoreSource(self.source);
                }
                self.source = kind;
                self.source_aspect = None;
                ParamEffect::SwitchSource { kind, url }
            }
            ParamEvent::Media { kind, url } => {
                if kind == SourceKind::Wave {
                    return ParamEffect::None;
                }
                self.source = kind;
                self.source_aspect = None;
                self.media = Some((kind, url.clone()));
                ParamEffect::SwitchSource {
                    kind,
                    url: Some(url),
                }
            }
            ParamEvent::SourceAspect(a) => {
                if a.is_finite() && a > 0.0 {
                    self.source_aspect = Some(a);
                    ParamEffect::Uniforms
                } else {
                    ParamEffect::None
                }
            }
            ParamEvent::Viewport { width, height } => {
                if width == 0 || height == 0 {
                    return ParamEffect::None;
                }
                self.viewport_aspect = width as f32 / height as f32;
                ParamEffect::Uniforms
            }
        }
    }

    /// Replace the glyph set with the one the installed atlas was built from.
    pub fn adopt_glyphs(&mut self, glyphs: GlyphSet) {
        if glyphs != self.glyphs {
            log::info!("[params] glyphs reset to {:?}", glyphs.as_string());
            self.glyphs = glyphs;
            self.clamp_char_index();
        }
    }

    fn clamp_char_index(&mut self) {
        self.char_index = self.char_index.min(self.length().saturating_sub(1));
    }

    /// Apply every queued event; returns the effects in arrival order.
    pub fn drain(&mut self, rx: &ParamReceiver) -> Vec<ParamEffect> {
        rx.try_iter()
            .map(|ev| self.apply(ev))
            .filter(|e| *e != ParamEffect::None)
            .collect()
    }

    pub fn ascii_uniforms(&self, view_proj: Mat4) -> AsciiUniforms {
        let mut palette = [[0.0; 4]; PALETTE_SIZE];
        for (slot, c) in palette.iter_mut().zip(self.palette.colors()) {
            *slot = c.to_linear().to_array4();
        }
        AsciiUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            palette,
            video_scale: self.video_scale().to_array(),
            gamma: self.gamma,
            length: self.length() as f32,
            char_index: self.char_index as f32,
            _pad: [0.0; 3],
        }
    }
}
