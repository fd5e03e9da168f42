// Host-side tests for start-up configuration.

use ascii_core::*;

#[test]
fn defaults_match_constants() {
    let c = AppConfig::default();
    assert_eq!(c.rows, GRID_ROWS);
    assert_eq!(c.gamma, DEFAULT_GAMMA);
    assert_eq!(c.source, SourceKind::Wave);
    assert_eq!(c.glyphs, GlyphSet::default());
    assert_eq!(c.media_url, None);
}

#[test]
fn query_overrides_defaults() {
    let (c, errors) = AppConfig::from_query("?rows=80&gamma=1.5&glyphs=AB&seed=7");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(c.rows, 80);
    assert_eq!(c.gamma, 1.5);
    assert_eq!(c.glyphs.as_string(), "AB");
    assert_eq!(c.seed, 7);
}

#[test]
fn query_decodes_percent_escapes() {
    let (c, errors) =
        AppConfig::from_query("palette=%23000,%23111,%23222,%23333,%23444&glyphs=%20.%23");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(c.palette.get(4).map(Rgb::to_hex).as_deref(), Some("#444444"));
    assert_eq!(c.glyphs.as_string(), " .#");
}

#[test]
fn bad_values_keep_defaults() {
    let (c, errors) = AppConfig::from_query("rows=1&gamma=abc&source=tape&palette=%23fff");
    assert_eq!(c.rows, GRID_ROWS);
    assert_eq!(c.gamma, DEFAULT_GAMMA);
    assert_eq!(c.source, SourceKind::Wave);
    assert_eq!(c.palette, Palette::default());
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors[0], ConfigError::OutOfRange { key: "rows", .. }));
    assert!(matches!(errors[1], ConfigError::BadNumber { key: "gamma", .. }));
    assert!(matches!(errors[2], ConfigError::UnknownSource(_)));
    assert!(matches!(errors[3], ConfigError::Palette(_)));
}

#[test]
fn media_source_without_url_falls_back_to_wave() {
    let (c, _) = AppConfig::from_query("source=video");
    assert_eq!(c.source, SourceKind::Wave);
    let (c, _) = AppConfig::from_query("source=video&media=clips/a.mp4");
    assert_eq!(c.source, SourceKind::Video);
    assert_eq!(c.media_url.as_deref(), Some("clips/a.mp4"));
}

#[test]
fn unknown_keys_are_ignored() {
    let (c, errors) = AppConfig::from_query("foo=bar");
    assert!(errors.is_empty());
    assert_eq!(c, AppConfig::default());
}

#[test]
fn source_kind_guesses() {
    assert_eq!(SourceKind::for_path("photo.JPG"), SourceKind::Image);
    assert_eq!(SourceKind::for_path("a.png?v=2"), SourceKind::Image);
    assert_eq!(SourceKind::for_path("clip.mp4"), SourceKind::Video);
    assert_eq!(SourceKind::for_mime("image/webp", "x"), SourceKind::Image);
    assert_eq!(SourceKind::for_mime("video/webm", "x.png"), SourceKind::Video);
    assert_eq!(SourceKind::for_mime("", "x.gif"), SourceKind::Image);
    assert_eq!("Scene".parse::<SourceKind>(), Ok(SourceKind::Wave));
    assert_eq!(SourceKind::Image.to_string(), "image");
}
