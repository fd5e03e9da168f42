// Host-side tests for colour parsing and the palette.

use ascii_core::*;

#[test]
fn parses_short_and_long_hex() {
    assert_eq!(Rgb::from_hex("#fff"), Ok(Rgb::WHITE));
    let c = Rgb::from_hex("#ff2975").unwrap();
    assert_eq!(c.r, 1.0);
    assert!((c.g - 0x29 as f32 / 255.0).abs() < 1e-6);
    assert_eq!(c.to_hex(), "#ff2975");
}

#[test]
fn rejects_malformed_colours() {
    assert!(matches!(Rgb::from_hex("fff"), Err(ColorParseError::MissingHash(_))));
    assert!(matches!(Rgb::from_hex("#ffff"), Err(ColorParseError::BadLength(_))));
    assert!(matches!(Rgb::from_hex("#gg0000"), Err(ColorParseError::BadDigit(_))));
    assert!(matches!(Rgb::from_hex("#+10000"), Err(ColorParseError::BadDigit(_))));
}

#[test]
fn default_palette_matches_constants() {
    let p = Palette::default();
    for (i, hex) in DEFAULT_PALETTE.iter().enumerate() {
        assert_eq!(p.get(i).map(Rgb::to_hex).as_deref(), Some(*hex));
    }
}

#[test]
fn set_replaces_one_slot() {
    let mut p = Palette::default();
    assert!(p.set(4, Rgb::BLACK));
    assert_eq!(p.get(4), Some(Rgb::BLACK));
    assert!(!p.set(5, Rgb::BLACK));
    assert_eq!(p.colors().len(), PALETTE_SIZE);
}

#[test]
fn resolve_follows_bands() {
    let p = Palette::default();
    assert_eq!(p.resolve(0.0), p.get(0).unwrap());
    assert_eq!(p.resolve(0.5), p.get(2).unwrap());
    assert_eq!(p.resolve(1.0), p.get(4).unwrap());
}

#[test]
fn parse_list_needs_five_colours() {
    let p = Palette::parse_list("#000, #111,#222,#333,#444").unwrap();
    assert_eq!(p.get(1).map(Rgb::to_hex).as_deref(), Some("#111111"));
    assert_eq!(
        Palette::parse_list("#000,#111"),
        Err(ColorParseError::WrongCount {
            list: "#000,#111".into(),
            found: 2,
        })
    );
    let err = Palette::parse_list("#000,#111").unwrap_err().to_string();
    assert!(err.contains("expected 5"), "{err}");
}

#[test]
fn linear_conversion_keeps_endpoints() {
    assert_eq!(Rgb::BLACK.to_linear(), Rgb::BLACK);
    let w = Rgb::WHITE.to_linear();
    assert!((w.r - 1.0).abs() < 1e-6);
    // mid grey darkens when linearized
    assert!(Rgb::new(0.5, 0.5, 0.5).to_linear().r < 0.25);
}
