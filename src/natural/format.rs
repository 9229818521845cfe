use std::fmt::Write;

use itertools::Itertools;

use super::{bits::BitSource, math_algos, Natural};

/// the biggest power of ten that fits into a u64
const DECIMAL_CHUNK: u64 = 10u64.pow(DECIMAL_CHUNK_DIGITS as u32);
const DECIMAL_CHUNK_DIGITS: usize = 19;

impl Natural {
    /// copies the significant big-endian bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// two lowercase hex characters per byte, zero is `"00"`
    pub fn to_hexstring(&self) -> String {
        if self.is_zero() {
            return "00".to_owned();
        }
        self.as_bytes()
            .iter()
            .fold(String::with_capacity(self.payload * 2), |mut acc, byte| {
                write!(acc, "{byte:02x}").unwrap_or_else(|_| unreachable!("writing to a String"));
                acc
            })
    }

    /// the bits most significant first, left-padded to a multiple of `alignment`.
    /// Zero has one bit, an `alignment` of `0` adds no padding.
    pub fn to_binstring(&self, alignment: usize) -> String {
        let bits = self.bit_length().max(1);
        let width = if alignment == 0 {
            bits
        } else {
            bits.div_ceil(alignment) * alignment
        };
        (0..width)
            .rev()
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }

    /// digits for a radix of `2^bits`, most significant first
    fn power_of_two_digits(&self, bits: usize, upper: bool) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }
        let radix = 1 << bits;
        let digits = self
            .le_bits()
            .chunks(bits)
            .into_iter()
            .map(|chunk| {
                let digit = chunk.enumerate().fold(0, |acc, (i, bit)| acc | u32::from(bit) << i);
                char::from_digit(digit, radix)
                    .unwrap_or_else(|| unreachable!("{digit} is always smaller than {radix}"))
            })
            .collect_vec();
        digits
            .into_iter()
            .rev()
            .map(|c| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    /// the decimal digits, `_` between groups of three if `grouped`
    fn decimal_digits(&self, grouped: bool) -> String {
        let mut rest = self.clone();
        let mut chunks = Vec::new();
        while !rest.is_zero() {
            chunks.push(math_algos::div::short_u64(&mut rest, DECIMAL_CHUNK));
        }
        let mut digits = chunks.pop().map_or_else(|| "0".to_owned(), |it| it.to_string());
        for chunk in chunks.into_iter().rev() {
            write!(digits, "{chunk:0DECIMAL_CHUNK_DIGITS$}")
                .unwrap_or_else(|_| unreachable!("writing to a String"));
        }
        if !grouped {
            return digits;
        }
        let first = match digits.len() % 3 {
            0 => 3,
            it => it,
        };
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        out.push_str(&digits[..first]);
        for group in digits.as_bytes()[first..].chunks(3) {
            out.push('_');
            out.extend(group.iter().map(|&it| char::from(it)));
        }
        out
    }

    #[cfg(feature = "base64")]
    pub fn as_base64(&self, engine: &impl base64::Engine) -> String {
        engine.encode(self.as_bytes())
    }
    /// # Errors
    /// forwards the decode error of `engine`
    #[cfg(feature = "base64")]
    pub fn from_base64(
        data: impl AsRef<[u8]>,
        engine: &impl base64::Engine,
    ) -> Result<Self, base64::DecodeError> {
        engine.decode(data).map(Self::from_buffer)
    }
}

impl std::fmt::Display for Natural {
    /// `{:#}` separates groups of three digits with `_`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "", &self.decimal_digits(f.alternate()))
    }
}
impl std::fmt::LowerHex for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "0x", &self.power_of_two_digits(4, false))
    }
}
impl std::fmt::UpperHex for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "0X", &self.power_of_two_digits(4, true))
    }
}
impl std::fmt::Octal for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "0o", &self.power_of_two_digits(3, false))
    }
}
impl std::fmt::Binary for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "0b", &self.power_of_two_digits(1, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexstring() {
        assert_eq!(Natural::new().to_hexstring(), "00");
        assert_eq!(Natural::from(0xau8).to_hexstring(), "0a");
        assert_eq!(Natural::from(0x1_00ffu32).to_hexstring(), "0100ff");
    }

    #[test]
    fn binstring() {
        assert_eq!(Natural::new().to_binstring(0), "0");
        assert_eq!(Natural::new().to_binstring(8), "00000000");
        assert_eq!(Natural::from(5u8).to_binstring(0), "101");
        assert_eq!(Natural::from(5u8).to_binstring(4), "0101");
        assert_eq!(Natural::from(0x1ffu16).to_binstring(8), "0000000111111111");
    }

    #[test]
    fn to_bytes() {
        assert_eq!(Natural::from(0x1234u16).to_bytes(), [0x12, 0x34]);
        assert!(Natural::new().to_bytes().is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Natural::new().to_string(), "0");
        assert_eq!(Natural::from(1000u16).to_string(), "1000");
        assert_eq!(Natural::from(u128::MAX).to_string(), u128::MAX.to_string());
        assert_eq!(
            Natural::from(10u64.pow(19)).to_string(),
            format!("1{}", "0".repeat(19))
        );
        assert_eq!(format!("{:>6}", Natural::from(42u8)), "    42");
        assert_eq!(format!("{:06}", Natural::from(42u8)), "000042");
        assert_eq!(format!("{:#}", Natural::from(1_234_567u32)), "1_234_567");
        assert_eq!(format!("{:#}", Natural::from(123u8)), "123");
    }

    #[test]
    fn lower_hex() {
        assert_eq!(
            format!("{:x}", Natural::from(0x9988_7766_5544_3322_1100u128)),
            "99887766554433221100"
        );
        assert_eq!(
            format!("{:#x}", Natural::from(0x9988_7766_5544_3322_1100u128)),
            "0x99887766554433221100"
        );
        assert_eq!(
            format!("{:#032x}", Natural::from(0x9988_7766_5544_3322_1100u128)),
            "0x000000000099887766554433221100"
        );
        assert_eq!(format!("{:x}", Natural::new()), "0");
        assert_eq!(format!("{:x}", Natural::from(0xfu8)), "f");
    }

    #[test]
    fn upper_hex() {
        assert_eq!(
            format!("{:#032X}", Natural::from(0xeedd_ccbb_aa99_8877_6655_4433_2211u128)),
            "0X00EEDDCCBBAA998877665544332211"
        );
    }

    #[test]
    fn octal_and_binary() {
        assert_eq!(format!("{:o}", Natural::from(0o17_777u16)), "17777");
        assert_eq!(format!("{:#o}", Natural::from(8u8)), "0o10");
        assert_eq!(format!("{:b}", Natural::from(0b1_0110u8)), "10110");
        assert_eq!(format!("{:#010b}", Natural::from(5u8)), "0b00000101");
    }

    #[cfg(feature = "base64")]
    #[test]
    fn base64() {
        use base64::engine::general_purpose::STANDARD;
        let num = Natural::from(0x00ff_ee01u32);
        let encoded = num.as_base64(&STANDARD);
        assert_eq!(encoded, "/+4B");
        assert_eq!(Natural::from_base64(encoded, &STANDARD), Ok(num));
        assert!(Natural::from_base64("*", &STANDARD).is_err());
    }
}
