//! bit level access to a [`Natural`]
use super::Natural;

/// anything that can hand out its bits, least significant first.
///
/// This is what drives the square and multiply loop of [`Natural::expt`].
pub trait BitSource {
    fn le_bits(&self) -> impl Iterator<Item = bool> + '_;
}

impl BitSource for Natural {
    fn le_bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.le_bytes()
            .flat_map(|byte| (0..8).map(move |i| byte >> i & 1 == 1))
            .take(self.bit_length())
    }
}
impl BitSource for &Natural {
    fn le_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (**self).le_bits()
    }
}

macro_rules! fixnum_ref {
    ($($name:ident => $native:ty),+ $(,)?) => {$(
        #[doc = concat!("slot `slot` read as an `", stringify!($native), "`, a shorter most significant slot is zero-extended.")]
        #[doc = ""]
        #[doc = "`None` if there is no such slot."]
        pub fn $name(&self, slot: isize, offset: usize) -> Option<$native> {
            let window = self.slot_window(slot, offset, <$native>::BITS as usize / 8)?;
            Some(window.iter().fold(0, |acc, &byte| acc << 8 | <$native>::from(byte)))
        }
    )+};
}

impl Natural {
    /// the bytes of a `width` byte slot.
    ///
    /// The payload without its `offset` least significant bytes is cut into slots of `width` bytes,
    /// starting at the least significant end, so only the most significant slot can be shorter.
    /// A non-negative `slot` counts from that most significant slot, a negative one from the
    /// least significant end, so slot `-1` holds the lowest bytes above `offset`.
    fn slot_window(&self, slot: isize, offset: usize, width: usize) -> Option<&[u8]> {
        let bytes = self.as_bytes();
        let usable = bytes.len().checked_sub(offset)?;
        let slots = usable.div_ceil(width);
        let from_low = match usize::try_from(slot) {
            Ok(from_high) => slots.checked_sub(1)?.checked_sub(from_high)?,
            Err(_) => slot.unsigned_abs() - 1,
        };
        if from_low >= slots {
            return None;
        }
        let end = usable - from_low * width;
        Some(&bytes[end.saturating_sub(width)..end])
    }

    fixnum_ref!(fixnum16_ref => u16, fixnum32_ref => u32, fixnum64_ref => u64);

    /// bit `index`, counted from the least significant one
    pub fn bit(&self, index: usize) -> bool {
        self.le_bytes()
            .nth(index / 8)
            .is_some_and(|byte| byte >> (index % 8) & 1 == 1)
    }

    /// number of bits needed to write `self`, zero for zero
    pub fn bit_length(&self) -> usize {
        self.as_bytes().first().map_or(0, |top| {
            (self.payload - 1) * 8 + (u8::BITS - top.leading_zeros()) as usize
        })
    }

    /// the bits `start..end` as a new value
    pub fn bit_field(&self, start: usize, end: usize) -> Self {
        if start >= end || start >= self.bit_length() {
            return Self::new();
        }
        let mut field = self.clone();
        field >>= start;
        let width = end - start;
        let bytes = width.div_ceil(8);
        field.truncate_payload(bytes);
        let partial = width % 8;
        if partial != 0 && field.payload == bytes {
            field.as_bytes_mut()[0] &= (1 << partial) - 1;
            field.normalize();
        }
        field
    }

    /// the bits `start..end`, only the lowest 64 of them are kept
    pub fn bitfield(&self, start: usize, end: usize) -> u64 {
        let end = end.min(start.saturating_add(u64::BITS as usize));
        self.bit_field(start, end).to_u64().unwrap_or_default()
    }

    /// the bits `start..end` read as two's complement, the top bit of the field is the sign
    pub fn signed_bitfield(&self, start: usize, end: usize) -> i64 {
        let width = end.saturating_sub(start).min(u64::BITS as usize);
        if width == 0 {
            return 0;
        }
        let value = self.bitfield(start, start + width);
        if width < u64::BITS as usize && value >> (width - 1) & 1 == 1 {
            (value | !((1 << width) - 1)) as i64
        } else {
            value as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_of_natural() {
        let num = Natural::from(0x0105u16);
        assert_eq!(
            num.le_bits().collect::<Vec<_>>(),
            [true, false, true, false, false, false, false, false, true]
        );
        assert_eq!(Natural::new().le_bits().count(), 0);
        assert_eq!((&num).le_bits().count(), 9);
    }

    #[test]
    fn bit_length() {
        assert_eq!(Natural::new().bit_length(), 0);
        assert_eq!(Natural::from(1u8).bit_length(), 1);
        assert_eq!(Natural::from(0xffu8).bit_length(), 8);
        assert_eq!(Natural::from(0x100u16).bit_length(), 9);
        assert_eq!(Natural::from(u128::MAX).bit_length(), 128);
    }

    #[test]
    fn single_bits() {
        let num = Natural::from(0x8001u16);
        assert!(num.bit(0));
        assert!(!num.bit(1));
        assert!(num.bit(15));
        assert!(!num.bit(16));
        assert!(!num.bit(1000));
    }

    #[test]
    fn fixnum_from_front() {
        let num = Natural::from(0x0011_2233_4455_6677_8899u128);
        assert_eq!(num.fixnum16_ref(0, 0), Some(0x11));
        assert_eq!(num.fixnum16_ref(1, 0), Some(0x2233));
        assert_eq!(num.fixnum16_ref(4, 0), Some(0x8899));
        assert_eq!(num.fixnum16_ref(5, 0), None);
        assert_eq!(num.fixnum16_ref(0, 1), Some(0x1122));
        assert_eq!(num.fixnum32_ref(0, 0), Some(0x11));
        assert_eq!(num.fixnum32_ref(1, 0), Some(0x2233_4455));
        assert_eq!(num.fixnum32_ref(3, 0), None);
        assert_eq!(num.fixnum64_ref(1, 0), Some(0x2233_4455_6677_8899));
        assert_eq!(num.fixnum64_ref(0, 1), Some(0x1122_3344_5566_7788));
    }

    #[test]
    fn fixnum_from_back() {
        let num = Natural::from(0x0011_2233_4455_6677_8899u128);
        assert_eq!(num.fixnum16_ref(-1, 0), Some(0x8899));
        assert_eq!(num.fixnum16_ref(-2, 0), Some(0x6677));
        assert_eq!(num.fixnum16_ref(-5, 0), Some(0x11));
        assert_eq!(num.fixnum16_ref(-6, 0), None);
        assert_eq!(num.fixnum16_ref(-1, 1), Some(0x7788));
        assert_eq!(num.fixnum32_ref(-2, 0), Some(0x2233_4455));
        assert_eq!(num.fixnum32_ref(-3, 0), Some(0x11));
        assert_eq!(num.fixnum32_ref(-4, 0), None);
        assert_eq!(num.fixnum64_ref(-2, 0), Some(0x11));
    }

    #[test]
    fn fixnum_out_of_payload() {
        let num = Natural::from(0x1122u16);
        assert_eq!(num.fixnum32_ref(0, 2), None);
        assert_eq!(num.fixnum32_ref(-1, 3), None);
        assert_eq!(Natural::new().fixnum16_ref(0, 0), None);
        assert_eq!(Natural::new().fixnum16_ref(-1, 0), None);
        assert_eq!(num.fixnum64_ref(isize::MIN, 0), None);
    }

    #[test]
    fn fixnum_slots_cover_every_byte() {
        let value = 0x11_2233_4455_6677_8899u128;
        let num = Natural::from(value);
        assert_eq!(num.byte_len(), 9);

        let from_back = (1..)
            .map_while(|slot| num.fixnum32_ref(-slot, 0))
            .enumerate()
            .fold(0u128, |acc, (i, part)| acc | u128::from(part) << (32 * i));
        assert_eq!(from_back, value);

        let from_front = (0..)
            .map_while(|slot| num.fixnum32_ref(slot, 0))
            .fold(0u128, |acc, part| acc << 32 | u128::from(part));
        assert_eq!(from_front, value);
    }

    #[test]
    fn fields() {
        let num = Natural::from(0xabcd_ef01u32);
        assert_eq!(num.bit_field(8, 24), 0xcdefu16);
        assert_eq!(num.bit_field(4, 8), 0u8);
        assert_eq!(num.bit_field(0, 4), 1u8);
        assert_eq!(num.bit_field(28, 100), 0xau8);
        assert_eq!(num.bit_field(40, 100), 0u8);
        assert!(num.bit_field(10, 10).is_zero());
        assert!(num.bit_field(12, 10).is_zero());

        assert_eq!(num.bitfield(4, 20), 0xdef0);
        assert_eq!(num.bitfield(5, 20), 0x6f78);
        assert_eq!(num.bitfield(6, 26), 0xf_37bc);
        assert_eq!(Natural::from(u128::MAX).bitfield(0, 128), u64::MAX);
    }

    #[test]
    fn signed_fields() {
        let num = Natural::from(0xabcd_ef01u32);
        assert_eq!(num.signed_bitfield(0, 4), 1);
        assert_eq!(num.signed_bitfield(28, 32), -6);
        assert_eq!(num.signed_bitfield(24, 32), -0x55);
        assert_eq!(num.signed_bitfield(28, 33), 0xa);
        assert_eq!(num.signed_bitfield(5, 5), 0);
        assert_eq!(Natural::from(u64::MAX).signed_bitfield(0, 64), -1);
    }
}
