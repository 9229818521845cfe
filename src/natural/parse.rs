//! building a [`Natural`] from bytes and text
use std::str::FromStr;

use itertools::Itertools;

use super::{storage::MIN_CAPACITY, Natural};
use crate::error::{FromStrErr, RadixError};

/// the supported text bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
}
impl Radix {
    pub const fn value(self) -> u8 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }
    /// bits per digit, if whole digits fill a byte
    pub(super) const fn packed_bits(self) -> Option<u32> {
        match self {
            Self::Binary => Some(1),
            Self::Hex => Some(4),
            Self::Octal | Self::Decimal => None,
        }
    }
}
impl TryFrom<u32> for Radix {
    type Error = RadixError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            2 => Self::Binary,
            8 => Self::Octal,
            10 => Self::Decimal,
            16 => Self::Hex,
            _ => return Err(RadixError(value)),
        })
    }
}
impl From<Radix> for u32 {
    fn from(value: Radix) -> Self {
        Self::from(value.value())
    }
}

/// a single unit of text, like a `char`, an ascii byte or a wide character
pub trait TextUnit: Copy {
    fn to_char(self) -> Option<char>;
}
impl TextUnit for char {
    fn to_char(self) -> Option<char> {
        Some(self)
    }
}
impl TextUnit for u8 {
    fn to_char(self) -> Option<char> {
        self.is_ascii().then(|| char::from(self))
    }
}
impl TextUnit for u16 {
    fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self))
    }
}

enum StripRadix {
    UnknownRadix(char),
    OnlyZero,
}
fn strip_radix(s: &str) -> Result<(Option<Radix>, &str), StripRadix> {
    let mut chars = s.chars();

    if chars.next() == Some('0') {
        Ok((
            Some(match chars.next() {
                Some('x') => Radix::Hex,
                Some('b') => Radix::Binary,
                Some('d') => Radix::Decimal,
                Some('o') => Radix::Octal,
                Some(c) if c.is_ascii_digit() || c == '_' => return Ok((None, s)),
                Some(c) => return Err(StripRadix::UnknownRadix(c)),
                None => return Err(StripRadix::OnlyZero),
            }),
            &s[2..],
        ))
    } else {
        Ok((None, s))
    }
}

impl Natural {
    /// takes the big-endian bytes as is, the capacity is exactly `bytes.len()`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_buffer(bytes.to_vec())
    }

    /// builds from the digit values of `radix`, most significant first
    fn from_digits(digits: &[u8], radix: Radix) -> Self {
        if let Some(bits) = radix.packed_bits() {
            let per_byte = (u8::BITS / bits) as usize;
            let le_bytes = digits
                .rchunks(per_byte)
                .map(|chunk| chunk.iter().fold(0u8, |acc, &digit| acc << bits | digit))
                .collect_vec();
            let mut num = Self::with_capacity(le_bytes.len().max(MIN_CAPACITY));
            num.payload = le_bytes.len();
            for (place, byte) in num.le_bytes_mut().zip(le_bytes) {
                *place = byte;
            }
            num.normalize();
            num
        } else {
            let mut num = Self::new();
            for &digit in digits {
                num.mul_small(radix.value());
                num.add_small(digit);
            }
            num
        }
    }

    /// parses `text` in `radix`, every unit that isn't a digit of `radix` counts as `fallback`
    ///
    /// # Panics
    /// if `fallback` isn't a digit of `radix` itself
    pub fn from_radix_with_fallback<T: TextUnit>(
        text: impl IntoIterator<Item = T>,
        radix: Radix,
        fallback: u8,
    ) -> Self {
        assert!(
            fallback < radix.value(),
            "fallback {fallback} is no digit in base {}",
            radix.value()
        );
        let digits = text
            .into_iter()
            .map(|unit| {
                unit.to_char()
                    .and_then(|c| c.to_digit(radix.into()))
                    .map_or(fallback, |digit| digit as u8)
            })
            .collect_vec();
        Self::from_digits(&digits, radix)
    }
    /// parses `text` in `radix`, unknown digits count as zero
    pub fn from_radix(text: &str, radix: Radix) -> Self {
        Self::from_radix_with_fallback(text.chars(), radix, 0)
    }
    pub fn from_hex(text: &str) -> Self {
        Self::from_radix(text, Radix::Hex)
    }
    /// parses ascii bytes, anything beyond ascii counts as `0`
    pub fn from_ascii(text: &[u8], radix: Radix) -> Self {
        Self::from_radix_with_fallback(text.iter().copied(), radix, 0)
    }
    /// parses wide characters, anything that isn't a digit counts as `0`
    pub fn from_wide(text: &[u16], radix: Radix) -> Self {
        Self::from_radix_with_fallback(text.iter().copied(), radix, 0)
    }

    /// strict counterpart of [`Natural::from_radix`], `_` are skipped
    ///
    /// # Errors
    /// reports the first unit that isn't a digit of `radix` or if there are no digits at all
    pub fn try_from_radix(text: &str, radix: Radix) -> Result<Self, FromStrErr> {
        let mut digits = Vec::with_capacity(text.len());
        for (position, c) in text.chars().enumerate().filter(|(_, c)| *c != '_') {
            match c.to_digit(radix.into()) {
                Some(digit) => digits.push(digit as u8),
                None => return Err(FromStrErr::UnknownDigit { digit: c, position }),
            }
        }
        if digits.is_empty() {
            return Err(FromStrErr::Empty);
        }
        Ok(Self::from_digits(&digits, radix))
    }
}

impl FromStr for Natural {
    type Err = FromStrErr;

    /// accepts an optional `0x`, `0o`, `0d` or `0b` prefix, without one the text is decimal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (radix, rest) = match strip_radix(s) {
            Ok((radix, rest)) => (radix.unwrap_or(Radix::Decimal), rest),
            Err(StripRadix::UnknownRadix(c)) => return Err(FromStrErr::UnknownRadix(c)),
            Err(StripRadix::OnlyZero) => return Ok(Self::new()),
        };

        Self::try_from_radix(rest, radix).map_err(|mut err| {
            if let FromStrErr::UnknownDigit { position, .. } = &mut err {
                *position += s.chars().count() - rest.chars().count();
            }
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_keep_their_length() {
        let num = Natural::from_bytes(&[0, 0, 0x12, 0x34]);
        assert_eq!(num.capacity(), 4);
        assert_eq!(num.byte_len(), 2);
        assert_eq!(num, 0x1234u16);
        assert!(Natural::from_bytes(&[]).is_zero());
    }

    #[test]
    fn hex() {
        assert_eq!(Natural::from_hex("ff"), 255u8);
        assert_eq!(Natural::from_hex("fFf"), 0xfffu16);
        assert_eq!(
            Natural::from_hex("112233445566778899aabbccddeeff"),
            0x0011_2233_4455_6677_8899_aabb_ccdd_eeffu128
        );
        assert_eq!(Natural::from_hex("000001").byte_len(), 1);
        assert!(Natural::from_hex("").is_zero());
    }

    #[test]
    fn capacity_of_text() {
        assert_eq!(Natural::from_hex("1").capacity(), 8);
        assert_eq!(Natural::from_radix("1", Radix::Decimal).capacity(), 8);
        assert_eq!(Natural::from_hex(&"f".repeat(40)).capacity(), 20);
    }

    #[test]
    fn fallback_digits() {
        assert_eq!(Natural::from_hex("1g"), 0x10u8);
        assert_eq!(
            Natural::from_radix_with_fallback("1g".chars(), Radix::Hex, 0xf),
            0x1fu8
        );
        assert_eq!(
            Natural::from_radix_with_fallback("9x9".chars(), Radix::Decimal, 5),
            959u16
        );
    }

    #[test]
    #[should_panic = "fallback 10 is no digit in base 10"]
    fn fallback_has_to_be_a_digit() {
        let _ = Natural::from_radix_with_fallback("1".chars(), Radix::Decimal, 10);
    }

    #[test]
    fn other_bases() {
        assert_eq!(Natural::from_radix("1000", Radix::Decimal), 1000u16);
        assert_eq!(
            Natural::from_radix("340282366920938463463374607431768211455", Radix::Decimal),
            u128::MAX
        );
        assert_eq!(Natural::from_radix("777", Radix::Octal), 0o777u16);
        assert_eq!(Natural::from_radix("100000001", Radix::Binary), 0x101u16);
    }

    #[test]
    fn text_units() {
        assert_eq!(Natural::from_ascii(b"ff", Radix::Hex), 255u8);
        assert_eq!(Natural::from_ascii(&[b'1', 0xc3], Radix::Hex), 0x10u8);
        let wide = "12345".encode_utf16().collect_vec();
        assert_eq!(Natural::from_wide(&wide, Radix::Decimal), 12345u16);
    }

    #[test]
    fn radix_from_int() {
        assert_eq!(Radix::try_from(16u32), Ok(Radix::Hex));
        assert_eq!(Radix::try_from(3u32), Err(RadixError(3)));
        assert_eq!(u32::from(Radix::Octal), 8);
    }

    #[test]
    fn from_str() {
        assert_eq!("1_000".parse::<Natural>(), Ok(Natural::from(1000u16)));
        assert_eq!("0xff".parse::<Natural>(), Ok(Natural::from(255u8)));
        assert_eq!("0b101".parse::<Natural>(), Ok(Natural::from(5u8)));
        assert_eq!("0o17".parse::<Natural>(), Ok(Natural::from(15u8)));
        assert_eq!("0d19".parse::<Natural>(), Ok(Natural::from(19u8)));
        assert_eq!("0".parse::<Natural>(), Ok(Natural::new()));
        assert_eq!("007".parse::<Natural>(), Ok(Natural::from(7u8)));
    }

    #[test]
    fn from_str_errors() {
        assert_eq!("".parse::<Natural>(), Err(FromStrErr::Empty));
        assert_eq!("0x".parse::<Natural>(), Err(FromStrErr::Empty));
        assert_eq!("0x_".parse::<Natural>(), Err(FromStrErr::Empty));
        assert_eq!("0z12".parse::<Natural>(), Err(FromStrErr::UnknownRadix('z')));
        assert_eq!(
            "0x12g4".parse::<Natural>(),
            Err(FromStrErr::UnknownDigit {
                digit: 'g',
                position: 4
            })
        );
        assert_eq!(
            "12a".parse::<Natural>(),
            Err(FromStrErr::UnknownDigit {
                digit: 'a',
                position: 2
            })
        );
    }
}
