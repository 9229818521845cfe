use super::{bits::BitSource, storage::MIN_CAPACITY, Natural};

/// native unsigned integers a [`Natural`] can be build from and compared with
pub trait Primitive: Copy + Eq + Ord {
    const BYTES: usize;

    fn to_be_bytes(self) -> impl ExactSizeIterator<Item = u8> + DoubleEndedIterator;
    fn to_u64(self) -> Option<u64>;
    fn bit_length(self) -> u32;
    fn bit(self, i: u32) -> bool;
}

macro_rules! implPrim {
    ($($prim: ty),+) => {$(
        impl Primitive for $prim {
            const BYTES: usize = Self::BITS as usize / 8;

            fn to_be_bytes(self) -> impl ExactSizeIterator<Item = u8> + DoubleEndedIterator {
                self.to_be_bytes().into_iter()
            }
            fn to_u64(self) -> Option<u64> {
                u64::try_from(self).ok()
            }
            fn bit_length(self) -> u32 {
                Self::BITS - self.leading_zeros()
            }
            fn bit(self, i: u32) -> bool {
                self >> i & 1 == 1
            }
        }
    )+};
}
implPrim!(u8, u16, u32, u64, u128, usize);

impl<P: Primitive> From<P> for Natural {
    fn from(value: P) -> Self {
        let mut num = Self::with_capacity(P::BYTES.max(MIN_CAPACITY));
        num.payload = P::BYTES;
        for (place, byte) in num.as_bytes_mut().iter_mut().zip(value.to_be_bytes()) {
            *place = byte;
        }
        num.normalize();
        num
    }
}

impl<P: Primitive> BitSource for P {
    fn le_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_length()).map(move |i| self.bit(i))
    }
}

impl TryFrom<&Natural> for u64 {
    type Error = std::num::TryFromIntError;

    fn try_from(value: &Natural) -> Result<Self, Self::Error> {
        // reuse the std error, there is no public constructor for it
        value.to_u64().map_or_else(|| Self::try_from(u128::MAX), Ok)
    }
}
