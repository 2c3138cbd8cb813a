// Integration tests for status-code translation.

use lzopack::lzo::{translate, LzoCode, LzoErrorKind};

#[test]
fn known_codes_map_to_their_category() {
    let table = [
        (-1, LzoErrorKind::Error, "error"),
        (-2, LzoErrorKind::OutOfMemory, "out of memory"),
        (-3, LzoErrorKind::NotCompressible, "not compressible"),
        (-4, LzoErrorKind::InputOverrun, "input overrun"),
        (-5, LzoErrorKind::OutputOverrun, "output overrun"),
        (-6, LzoErrorKind::LookbehindOverrun, "lookbehind overrun"),
        (-7, LzoErrorKind::EofNotFound, "eof not found"),
        (-8, LzoErrorKind::InputNotConsumed, "input not consumed"),
        (-9, LzoErrorKind::NotYetImplemented, "not yet implemented"),
        (-10, LzoErrorKind::InvalidArgument, "invalid argument"),
    ];
    for (code, kind, msg) in table {
        assert_eq!(translate(code), kind);
        assert_eq!(kind.to_string(), msg);
        assert_eq!(LzoCode(code).kind(), kind);
    }
}

#[test]
fn anything_else_is_unknown() {
    for code in [0, 1, -11, -100, i32::MIN, i32::MAX] {
        assert_eq!(translate(code), LzoErrorKind::Unknown, "{code}");
    }
}

#[test]
fn code_display_keeps_the_raw_number() {
    assert_eq!(LzoCode::INPUT_OVERRUN.to_string(), "err_code:(-4) input overrun");
    assert_eq!(LzoCode(-77).to_string(), "err_code:(-77) unknown");
}
