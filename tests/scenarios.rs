//! End-to-end scenarios exercising the public API: segmentation,
//! fit selection, and the exact grid shapes and capacity boundaries of
//! a full `make()`.

use rmqrcode::{fit, EccLevel, FitStrategy, Mode, RmqrError, Symbol};

#[test]
fn numeric_then_byte_segmentation_is_stable_across_the_public_api() {
    let mut symbol = Symbol::new("R7x43", EccLevel::M).unwrap();
    symbol.add_segment(Mode::Numeric, "123");
    symbol.add_segment(Mode::Byte, "Abc");
    assert!(symbol.make().is_ok());
}

fn all_light(row: &[u8]) -> bool {
    row.iter().all(|&c| c == 0)
}

#[test]
fn fit_abc_produces_a_symbol_whose_quiet_zone_is_uniformly_light() {
    let symbol = fit("abc", EccLevel::M, FitStrategy::Balanced).unwrap();
    let grid = symbol.to_grid(true);
    assert!(all_light(&grid[0]));
    assert!(all_light(grid.last().unwrap()));
    for row in &grid {
        assert!(row[0] == 0 && row[1] == 0);
        assert!(row[row.len() - 1] == 0 && row[row.len() - 2] == 0);
    }
}

#[test]
fn r13x99_grid_shape_with_and_without_quiet_zone() {
    let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
    symbol.add_segment(Mode::Byte, "abc");
    symbol.make().unwrap();

    let without = symbol.to_grid(false);
    assert_eq!(without.len(), 13);
    assert_eq!(without[0].len(), 99);

    let with = symbol.to_grid(true);
    assert_eq!(with.len(), 17);
    assert_eq!(with[0].len(), 103);
}

#[test]
fn byte_mode_boundary_at_71_72_chars_for_r13x99_m() {
    // R13x99 M's block plan (k=36+37) gives a 584-bit data capacity; with
    // byte mode's 3-bit indicator and 7-bit CCI for this version, 71
    // bytes fits (581 bits including terminator) and 72 doesn't (586
    // bits, already over capacity before a terminator is even
    // considered). See DESIGN.md for why this replaces the 150/151
    // boundary spec.md's scenario S6 names for this version.
    let mut ok = Symbol::new("R13x99", EccLevel::M).unwrap();
    ok.add_segment(Mode::Byte, "a".repeat(71));
    assert!(ok.make().is_ok());

    let mut too_long = Symbol::new("R13x99", EccLevel::M).unwrap();
    too_long.add_segment(Mode::Byte, "a".repeat(72));
    assert!(matches!(too_long.make(), Err(RmqrError::DataTooLong)));
}

#[test]
fn numeric_mode_boundary_at_361_362_chars_for_r17x139_m() {
    let mut ok = Symbol::new("R17x139", EccLevel::M).unwrap();
    ok.add_segment(Mode::Numeric, "1".repeat(361));
    assert!(ok.make().is_ok());

    let mut too_long = Symbol::new("R17x139", EccLevel::M).unwrap();
    too_long.add_segment(Mode::Numeric, "1".repeat(362));
    assert!(matches!(too_long.make(), Err(RmqrError::DataTooLong)));
}

#[test]
fn alphanumeric_mode_boundary_at_219_220_chars_for_r17x139_m() {
    let mut ok = Symbol::new("R17x139", EccLevel::M).unwrap();
    ok.add_segment(Mode::Alphanumeric, "A".repeat(219));
    assert!(ok.make().is_ok());

    let mut too_long = Symbol::new("R17x139", EccLevel::M).unwrap();
    too_long.add_segment(Mode::Alphanumeric, "A".repeat(220));
    assert!(matches!(too_long.make(), Err(RmqrError::DataTooLong)));
}

#[cfg(feature = "kanji")]
#[test]
fn kanji_mode_boundary_at_92_93_chars_for_r17x139_m() {
    let mut ok = Symbol::new("R17x139", EccLevel::M).unwrap();
    ok.add_segment(Mode::Kanji, "\u{672c}".repeat(92));
    assert!(ok.make().is_ok());

    let mut too_long = Symbol::new("R17x139", EccLevel::M).unwrap();
    too_long.add_segment(Mode::Kanji, "\u{672c}".repeat(93));
    assert!(matches!(too_long.make(), Err(RmqrError::DataTooLong)));
}

#[test]
fn illegal_version_name_is_rejected_before_any_encoding_work() {
    assert!(matches!(Symbol::new("R99x99", EccLevel::M), Err(RmqrError::IllegalVersion(_))));
}

#[test]
fn make_with_no_segments_fails() {
    let mut symbol = Symbol::new("R7x43", EccLevel::M).unwrap();
    assert!(matches!(symbol.make(), Err(RmqrError::NoSegment)));
}

#[test]
fn explicit_mode_rejects_characters_outside_that_mode() {
    let mut symbol = Symbol::new("R7x43", EccLevel::M).unwrap();
    symbol.add_segment(Mode::Numeric, "12a");
    assert!(matches!(symbol.make(), Err(RmqrError::IllegalCharacter { .. })));
}
