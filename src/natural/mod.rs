//! The [`Natural`] value type.
//!
//! A `Natural` keeps its value as big-endian bytes right-aligned in an owned buffer.
//! The buffer length is the *capacity*, the trailing *payload* bytes are significant
//! and the first of them is never zero. A zero value has no payload at all.
use std::{
    cmp::Ordering,
    fmt::Debug,
    hash::{Hash, Hasher},
    ops::{Index, RangeInclusive},
};

use itertools::Itertools;
use rand::{Rng, RngCore};

pub mod bits;
pub mod expt;
mod format;
pub mod math_algos;
mod math_shortcuts;
mod ops;
pub mod parse;
mod primitive;
mod storage;

pub use primitive::Primitive;

#[derive(Default)]
pub struct Natural {
    /// big-endian bytes, the significant ones are the last `payload` bytes
    buffer: Vec<u8>,
    payload: usize,
}

impl Clone for Natural {
    /// the copy only allocates what is significant
    fn clone(&self) -> Self {
        Self {
            buffer: self.as_bytes().to_vec(),
            payload: self.payload,
        }
    }
}

impl Hash for Natural {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl Debug for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Natural {{ 0x[")?;
        for (pos, byte) in self.as_bytes().iter().with_position() {
            write!(f, "{byte:02x}")?;
            if matches!(
                pos,
                itertools::Position::First | itertools::Position::Middle
            ) {
                f.write_str(", ")?;
            }
        }
        write!(f, "] }}")
    }
}

impl Index<usize> for Natural {
    type Output = u8;

    /// byte `index` of the payload, `0` is the most significant one
    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index < self.payload,
            "tried to access byte {index} with payload: {}",
            self.payload
        );
        &self.as_bytes()[index]
    }
}

impl Eq for Natural {}
impl PartialEq for Natural {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl Ord for Natural {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
impl PartialOrd for Natural {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<P: Primitive> PartialEq<P> for Natural {
    fn eq(&self, other: &P) -> bool {
        self.compare_primitive(*other).is_eq()
    }
}
impl<P: Primitive> PartialOrd<P> for Natural {
    fn partial_cmp(&self, other: &P) -> Option<Ordering> {
        Some(self.compare_primitive(*other))
    }
}

impl Natural {
    /// the empty value, which is what is left behind by [`Natural::take`]
    pub const ZERO: Self = Self {
        buffer: Vec::new(),
        payload: 0,
    };

    /// zero with room for a 64-bit value
    pub fn new() -> Self {
        Self::with_capacity(storage::MIN_CAPACITY)
    }

    /// moves the value out and leaves the empty zero behind
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// generate a new random number with at least `bytes.start()` and at most `bytes.end()` significant bytes
    /// # Example
    /// `0x00_0100` <= `Natural::new_random(2..=3, _)` <= `0xff_ffff`,
    pub fn new_random(bytes: RangeInclusive<usize>, mut rng: impl RngCore) -> Self {
        let len = rng.gen_range(bytes);
        if len == 0 {
            return Self::new();
        }
        let mut num = Self::with_capacity(len.max(storage::MIN_CAPACITY));
        num.widen_payload(len);
        let top = rng.gen_range(1..=u8::MAX);
        let bytes = num.as_bytes_mut();
        bytes[0] = top;
        for (place, byte) in bytes[1..]
            .iter_mut()
            .zip(crate::util::rng::random_bytes(&mut rng))
        {
            *place = byte;
        }
        num.debug_check();
        num
    }

    // getter
    pub const fn is_zero(&self) -> bool {
        self.payload == 0
    }
    pub fn is_one(&self) -> bool {
        self.as_bytes() == [1]
    }
    pub fn is_even(&self) -> bool {
        self.as_bytes().last().map_or(true, |it| it % 2 == 0)
    }
    pub fn is_power_of_two(&self) -> bool {
        self.as_bytes().split_first().is_some_and(|(top, rest)| {
            top.is_power_of_two() && rest.iter().all(|&it| it == 0)
        })
    }

    /// number of significant bytes
    pub const fn byte_len(&self) -> usize {
        self.payload
    }
    /// number of allocated bytes
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// the significant big-endian bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[self.capacity() - self.payload..]
    }
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        let start = self.capacity() - self.payload;
        &mut self.buffer[start..]
    }
    /// the significant bytes, least significant first
    pub(crate) fn le_bytes(
        &self,
    ) -> impl ExactSizeIterator<Item = u8> + DoubleEndedIterator + '_ {
        self.as_bytes().iter().rev().copied()
    }
    pub(crate) fn le_bytes_mut(
        &mut self,
    ) -> impl ExactSizeIterator<Item = &mut u8> + DoubleEndedIterator + '_ {
        self.as_bytes_mut().iter_mut().rev()
    }

    /// byte `index` of the payload, `0` is the most significant one
    pub fn get(&self, index: usize) -> Option<u8> {
        self.as_bytes().get(index).copied()
    }

    pub fn to_u64(&self) -> Option<u64> {
        (self.payload <= 8).then(|| {
            self.as_bytes()
                .iter()
                .fold(0, |acc, &byte| acc << 8 | u64::from(byte))
        })
    }

    // comparison
    /// compares with a native value.
    ///
    /// Only values with at most 8 significant bytes are compared by value,
    /// everything longer is greater than any `u64`.
    pub fn compare_u64(&self, other: u64) -> Ordering {
        self.to_u64().map_or(Ordering::Greater, |it| it.cmp(&other))
    }
    fn compare_primitive<P: Primitive>(&self, other: P) -> Ordering {
        match other.to_u64() {
            Some(other) => self.compare_u64(other),
            None => self.compare(&Self::from(other)),
        }
    }
    /// a shorter payload is always smaller, equal payloads compare bytewise from the most significant
    pub fn compare(&self, other: &Self) -> Ordering {
        self.payload
            .cmp(&other.payload)
            .then_with(|| self.as_bytes().cmp(other.as_bytes()))
    }
}
