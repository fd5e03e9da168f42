// Host-side tests for the parameter store and its event channel.

use ascii_core::*;

fn store() -> ParamStore {
    ParamStore::from_config(&AppConfig::default())
}

#[test]
fn numeric_sets_are_quantized_uniform_updates() {
    let mut s = store();
    assert_eq!(s.apply(ParamEvent::Set(ParamId::Gamma, 100.0)), ParamEffect::Uniforms);
    assert_eq!(s.gamma, GAMMA_MAX);
    s.apply(ParamEvent::Set(ParamId::Gamma, 1.23));
    assert!((s.gamma - 1.2).abs() < 1e-5);
    s.apply(ParamEvent::Set(ParamId::WaveTwist, -1.0));
    assert_eq!(s.wave.twist, 0.0);
    assert_eq!(s.get(ParamId::WaveTwist), 0.0);
}

#[test]
fn char_index_stays_within_glyphs() {
    let mut s = store();
    let last = s.length() - 1;
    s.apply(ParamEvent::Set(ParamId::CharIndex, 1e6));
    assert_eq!(s.char_index, last);
    assert_eq!(char_index_control(s.length()).max, last as f32);
}

#[test]
fn glyph_change_rebuilds_and_clamps_char_index() {
    let mut s = store();
    s.apply(ParamEvent::Set(ParamId::CharIndex, 40.0));
    let effect = s.apply(ParamEvent::Glyphs("AB".into()));
    assert_eq!(
        effect,
        ParamEffect::RebuildAtlas {
            glyphs: GlyphSet::new("AB"),
            previous: GlyphSet::default(),
        }
    );
    assert_eq!(s.length(), 2);
    assert_eq!(s.char_index, 1);
    // same glyphs again: nothing to rebuild
    assert_eq!(s.apply(ParamEvent::Glyphs("AB".into())), ParamEffect::None);
}

#[test]
fn empty_glyphs_use_fallback() {
    let mut s = store();
    s.apply(ParamEvent::Glyphs(String::new()));
    assert_eq!(s.glyphs.as_string(), FALLBACK_GLYPHS);
}

#[test]
fn palette_colour_updates_one_slot() {
    let mut s = store();
    let effect = s.apply(ParamEvent::Color(3, Rgb::WHITE));
    assert_eq!(effect, ParamEffect::Uniforms);
    assert_eq!(s.palette.get(3), Some(Rgb::WHITE));
    assert_eq!(s.apply(ParamEvent::Color(7, Rgb::WHITE)), ParamEffect::None);
}

#[test]
fn media_source_needs_a_url() {
    let mut s = store();
    assert_eq!(
        s.apply(ParamEvent::Source(SourceKind::Video)),
        ParamEffect::RestoreSource(SourceKind::Wave)
    );
    assert_eq!(s.source, SourceKind::Wave);
}

#[test]
fn failed_rebuild_keeps_installed_length() {
    let mut s = store();
    let installed = s.glyphs.clone();
    let previous = match s.apply(ParamEvent::Glyphs("AB".into())) {
        ParamEffect::RebuildAtlas { previous, .. } => previous,
        other => panic!("expected a rebuild, got {other:?}"),
    };
    assert_eq!(previous, installed);
    // rasterizing failed, so the old atlas stays on the GPU
    s.adopt_glyphs(previous);
    let u = s.ascii_uniforms(glam::Mat4::IDENTITY);
    assert_eq!(u.length, installed.len() as f32);
    assert!(s.char_index < installed.len());
}

#[test]
fn truncated_atlas_shrinks_store() {
    let mut s = store();
    s.apply(ParamEvent::Set(ParamId::CharIndex, 40.0));
    s.apply(ParamEvent::Glyphs("x".repeat(100)));
    let drawn = s.glyphs.truncated(8);
    s.adopt_glyphs(drawn);
    assert_eq!(s.length(), 8);
    assert_eq!(s.ascii_uniforms(glam::Mat4::IDENTITY).length, 8.0);
    assert_eq!(s.char_index, 7);
}

#[test]
fn hint_follows_every_applied_change() {
    let mut s = store();
    assert!(s.apply(ParamEvent::Set(ParamId::Gamma, 2.0)).refreshes_hint());
    assert!(s
        .apply(ParamEvent::Source(SourceKind::Image))
        .refreshes_hint());
    assert!(!s.apply(ParamEvent::Color(9, Rgb::WHITE)).refreshes_hint());
}

#[test]
fn picked_media_switches_and_is_remembered() {
    let mut s = store();
    let url = "blob:clip".to_string();
    let effect = s.apply(ParamEvent::Media {
        kind: SourceKind::Video,
        url: url.clone(),
    });
    assert_eq!(
        effect,
        ParamEffect::SwitchSource {
            kind: SourceKind::Video,
            url: Some(url.clone()),
        }
    );
    assert_eq!(
        s.apply(ParamEvent::Source(SourceKind::Wave)),
        ParamEffect::SwitchSource {
            kind: SourceKind::Wave,
            url: None,
        }
    );
    assert_eq!(
        s.apply(ParamEvent::Source(SourceKind::Video)),
        ParamEffect::SwitchSource {
            kind: SourceKind::Video,
            url: Some(url),
        }
    );
    // a video URL is not reused for an image element
    s.apply(ParamEvent::Source(SourceKind::Wave));
    assert_eq!(s.apply(ParamEvent::Source(SourceKind::Image)), ParamEffect::None);
}

#[test]
fn wave_never_letterboxes() {
    let mut s = store();
    s.apply(ParamEvent::Viewport {
        width: 200,
        height: 100,
    });
    s.apply(ParamEvent::SourceAspect(1.0));
    assert_eq!(s.video_scale(), glam::Vec2::ONE);
}

#[test]
fn media_aspect_drives_scale() {
    let mut s = store();
    s.apply(ParamEvent::Viewport {
        width: 200,
        height: 100,
    });
    s.apply(ParamEvent::Media {
        kind: SourceKind::Image,
        url: "a.png".into(),
    });
    // unknown until the element reports its size
    assert_eq!(s.video_scale(), glam::Vec2::ONE);
    assert_eq!(s.apply(ParamEvent::SourceAspect(1.0)), ParamEffect::Uniforms);
    assert_eq!(s.video_scale(), glam::Vec2::new(0.5, 1.0));
    assert_eq!(s.apply(ParamEvent::SourceAspect(0.0)), ParamEffect::None);
    assert_eq!(
        s.apply(ParamEvent::Viewport {
            width: 0,
            height: 10
        }),
        ParamEffect::None
    );
}

#[test]
fn drain_applies_in_order_last_write_wins() {
    let mut s = store();
    let (tx, rx) = param_channel();
    tx.send(ParamEvent::Set(ParamId::Gamma, 2.0)).unwrap();
    tx.send(ParamEvent::Color(9, Rgb::BLACK)).unwrap();
    tx.send(ParamEvent::Set(ParamId::Gamma, 3.0)).unwrap();
    let effects = s.drain(&rx);
    assert_eq!(effects, vec![ParamEffect::Uniforms, ParamEffect::Uniforms]);
    assert!((s.gamma - 3.0).abs() < 1e-5);
    assert!(s.drain(&rx).is_empty());
}

#[test]
fn uniforms_pack_store_state() {
    let mut s = store();
    s.apply(ParamEvent::Glyphs("ABC".into()));
    s.apply(ParamEvent::Color(0, Rgb::new(0.5, 0.0, 1.0)));
    let u = s.ascii_uniforms(glam::Mat4::IDENTITY);
    assert_eq!(u.length, 3.0);
    assert_eq!(u.gamma, s.gamma);
    assert_eq!(u.video_scale, [1.0, 1.0]);
    assert!((u.palette[0][0] - Rgb::new(0.5, 0.0, 1.0).to_linear().r).abs() < 1e-6);
    assert_eq!(u.palette[0][3], 1.0);
    assert_eq!(std::mem::size_of::<AsciiUniforms>(), 176);
    assert_eq!(std::mem::size_of::<WaveUniforms>(), 96);
}

#[test]
fn configured_media_is_available_later() {
    let config = AppConfig {
        media_url: Some("clip.webm".into()),
        ..AppConfig::default()
    };
    let mut s = ParamStore::from_config(&config);
    assert_eq!(s.media_url_for(SourceKind::Video).as_deref(), Some("clip.webm"));
    assert_eq!(s.media_url_for(SourceKind::Image), None);
    assert!(matches!(
        s.apply(ParamEvent::Source(SourceKind::Video)),
        ParamEffect::SwitchSource { .. }
    ));
}
