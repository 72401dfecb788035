// tests/hextobin_tests.rs
// Quoted hex digits expanded to nibble bit strings

use sds_tools::hextobin::{run_hextobin, HexToBin};
use std::io::Cursor;

fn convert(text: &str) -> String {
    let mut converter = HexToBin::new();
    String::from_utf8(converter.convert(text.as_bytes())).expect("utf-8 output")
}

#[cfg(test)]
mod hextobin_tests {
    use super::*;

    #[test]
    fn test_quoted_byte() {
        assert_eq!(convert("'0e'"), "'00001110 '");
    }

    #[test]
    fn test_digits_outside_quotes_untouched() {
        assert_eq!(convert("ab 12 'f'"), "ab 12 '1111'", "Odd nibble gets no separator");
    }

    #[test]
    fn test_space_after_every_full_byte() {
        assert_eq!(convert("'0e1'"), "'00001110 0001'");
        assert_eq!(convert("'ff00'"), "'11111111 00000000 '");
    }

    #[test]
    fn test_other_characters_break_pairing() {
        assert_eq!(convert("'0 e'"), "'0000 1110'");
        assert_eq!(convert("'0E'"), "'0000E'", "Uppercase digits pass through");
    }

    #[test]
    fn test_pairing_restarts_after_closing_quote() {
        assert_eq!(convert("'a' x 'bc'"), "'1010' x '10111100 '");
    }

    #[test]
    fn test_stream_keeps_quote_state_across_lines() {
        let mut out = Vec::new();
        run_hextobin(Cursor::new(&b"'0\ne'\nplain 7\n"[..]), &mut out).expect("filter succeeds");
        assert_eq!(String::from_utf8(out).unwrap(), "'0000\n1110'\nplain 7\n");
    }

    #[test]
    fn test_stream_empty_input() {
        let mut out = Vec::new();
        run_hextobin(Cursor::new(&b""[..]), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
