//! Hex color parsing.

use crate::error::ColorError;

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `rrggbb`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lowercase `bbggrr`.
    pub fn to_hex_bgr(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.b, self.g, self.r)
    }
}

/// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb` (case-insensitive).
///
/// The short form expands by doubling each digit, so `abc` is `aabbcc`.
pub fn parse_hex_color(input: &str) -> Result<Rgb, ColorError> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    let invalid = || ColorError::InvalidColorFormat(input.to_string());

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
    Ok(Rgb {
        r: ((value >> 16) & 0xff) as u8,
        g: ((value >> 8) & 0xff) as u8,
        b: (value & 0xff) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_form_with_and_without_hash() {
        assert_eq!(parse_hex_color("#1a2B3c"), Ok(Rgb::new(0x1a, 0x2b, 0x3c)));
        assert_eq!(parse_hex_color("ff0080"), Ok(Rgb::new(0xff, 0x00, 0x80)));
    }

    #[test]
    fn short_form_doubles_each_digit() {
        assert_eq!(parse_hex_color("abc"), parse_hex_color("aabbcc"));
        assert_eq!(parse_hex_color("#000"), Ok(Rgb::new(0, 0, 0)));
        assert_eq!(parse_hex_color("#F0a"), Ok(Rgb::new(0xff, 0x00, 0xaa)));
    }

    #[test]
    fn rejects_bad_lengths_and_characters() {
        for raw in ["", "#", "#12", "1234", "#12345", "1234567", "#ggg", "12345z", "##123"] {
            assert_eq!(
                parse_hex_color(raw),
                Err(ColorError::InvalidColorFormat(raw.to_string())),
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_signs_that_from_str_radix_would_accept() {
        assert!(parse_hex_color("+12").is_err());
        assert!(parse_hex_color("+12345").is_err());
    }

    #[test]
    fn hex_renderings_are_lowercase() {
        let c = Rgb::new(0xAB, 0x01, 0xEF);
        assert_eq!(c.to_hex(), "ab01ef");
        assert_eq!(c.to_hex_bgr(), "ef01ab");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn short_form_equals_doubled_form(
                short in proptest::string::string_regex("[0-9a-fA-F]{3}").expect("regex")
            ) {
                let doubled: String = short.chars().flat_map(|c| [c, c]).collect();
                prop_assert_eq!(parse_hex_color(&short), parse_hex_color(&doubled));
                prop_assert_eq!(parse_hex_color(&format!("#{short}")), parse_hex_color(&doubled));
            }

            #[test]
            fn long_form_round_trips_through_to_hex(r: u8, g: u8, b: u8) {
                let c = Rgb::new(r, g, b);
                prop_assert_eq!(parse_hex_color(&c.to_hex()), Ok(c));
            }
        }
    }
}
