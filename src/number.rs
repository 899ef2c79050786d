use std::borrow::Cow;

pub fn is_digits(tok: &str) -> bool {
    !tok.is_empty() && tok.bytes().all(|b| b.is_ascii_digit())
}

fn parse_octal(tok: &str) -> Option<u32> {
    if !is_digits(tok) {
        return None;
    }
    u32::from_str_radix(tok, 8).ok()
}

/// Convert a PDP-11 octal literal to i8086 syntax: small values stay
/// decimal, everything else becomes `0x` hex. Non-numeric tokens (labels,
/// symbols) and malformed octal pass through unchanged.
pub fn octal_to_target(tok: &str) -> Cow<'_, str> {
    match parse_octal(tok) {
        Some(v) if v < 10 => Cow::Owned(v.to_string()),
        Some(v) => Cow::Owned(format!("{v:#x}")),
        None => Cow::Borrowed(tok),
    }
}

/// `.byte` item: at least two hex digits.
pub fn octal_byte(tok: &str) -> Option<String> {
    parse_octal(tok).map(|v| format!("0x{v:02x}"))
}
