//! powers, with and without a modulus
use super::{bits::BitSource, math_algos, Natural};
use crate::error::DivisionByZero;

/// something to reduce by after every step of [`Natural::modular_expt`]
pub trait Modulus {
    fn is_zero(&self) -> bool;
    /// sets `value` to `value % self`
    fn reduce(&self, value: &mut Natural);
}
impl Modulus for u64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
    fn reduce(&self, value: &mut Natural) {
        let remainder = math_algos::div::short_u64(value, *self);
        value.set_u64(remainder);
    }
}
impl Modulus for Natural {
    fn is_zero(&self) -> bool {
        Self::is_zero(self)
    }
    fn reduce(&self, value: &mut Natural) {
        *value %= self;
    }
}
impl Modulus for &Natural {
    fn is_zero(&self) -> bool {
        Natural::is_zero(self)
    }
    fn reduce(&self, value: &mut Natural) {
        (**self).reduce(value);
    }
}

impl Natural {
    pub fn square(&self) -> Self {
        self * self
    }

    /// `self` to the power of `exponent`
    pub fn expt(&self, exponent: impl BitSource) -> Self {
        let mut bits = exponent.le_bits().peekable();
        if bits.peek().is_none() {
            return Self::from(1u8);
        }
        if self.is_zero() {
            return Self::new();
        }
        if self.is_power_of_two() {
            let l_pow = self.bit_length() - 1;
            if let Some(pow) = Self::small_exponent(exponent.le_bits()).and_then(|it| it.checked_mul(l_pow)) {
                return Self::from(1u8) << pow;
            }
        }

        let mut out = Self::from(1u8);
        let mut base = self.clone();
        while let Some(bit) = bits.next() {
            if bit {
                out *= &base;
            }
            if bits.peek().is_some() {
                base = base.square();
            }
        }
        out
    }

    /// `self` to the power of `exponent`, reduced by `modulus` after every step
    ///
    /// # Panics
    /// if `modulus` is zero
    pub fn modular_expt(&self, exponent: impl BitSource, modulus: impl Modulus) -> Self {
        assert!(!modulus.is_zero(), "can't divide by zero");
        let mut base = self.clone();
        modulus.reduce(&mut base);
        let mut out = Self::from(1u8);
        modulus.reduce(&mut out);

        let mut bits = exponent.le_bits().peekable();
        let mut steps = 0usize;
        while let Some(bit) = bits.next() {
            if bit {
                out *= &base;
                modulus.reduce(&mut out);
            }
            if bits.peek().is_some() {
                base = base.square();
                modulus.reduce(&mut base);
            }
            steps += 1;
        }
        log::trace!("modular power done after {steps} steps");
        out
    }
    /// like [`Natural::modular_expt`], but reports a zero modulus
    ///
    /// # Errors
    /// if `modulus` is zero
    pub fn checked_modular_expt(
        &self,
        exponent: impl BitSource,
        modulus: impl Modulus,
    ) -> Result<Self, DivisionByZero> {
        if modulus.is_zero() {
            return Err(DivisionByZero);
        }
        Ok(self.modular_expt(exponent, modulus))
    }

    /// the exponent as an `usize`, if it fits
    fn small_exponent(bits: impl Iterator<Item = bool>) -> Option<usize> {
        bits.enumerate().try_fold(0usize, |acc, (i, bit)| {
            if !bit {
                return Some(acc);
            }
            (i < usize::BITS as usize).then(|| acc | 1 << i)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_powers() {
        assert_eq!(Natural::from(3u8).expt(5u8), 243u8);
        assert_eq!(Natural::from(10u8).expt(20u32), 10u128.pow(20));
        assert_eq!(Natural::from(0xffu8).expt(2u8), 0xfe01u16);
    }

    #[test]
    fn edge_powers() {
        assert_eq!(Natural::new().expt(0u8), 1u8);
        assert_eq!(Natural::from(7u8).expt(0u64), 1u8);
        assert!(Natural::new().expt(5u8).is_zero());
        assert_eq!(Natural::from(1u8).expt(Natural::from(u128::MAX)), 1u8);
    }

    #[test]
    fn power_of_two_base() {
        assert_eq!(Natural::from(2u8).expt(100u8), 1u128 << 100);
        assert_eq!(Natural::from(4u8).expt(Natural::from(3u8)), 64u8);
    }

    #[test]
    fn square() {
        assert_eq!(Natural::from(0xffffu16).square(), 0xfffe_0001u32);
        assert!(Natural::new().square().is_zero());
    }

    #[test]
    fn modular_vectors() {
        assert_eq!(Natural::from(2u8).modular_expt(10u8, 1000u64), 24u8);
        assert_eq!(
            Natural::from(2u8).modular_expt(10u8, Natural::from(1000u16)),
            24u8
        );
        assert!(Natural::from(5u8).modular_expt(3u8, 1u64).is_zero());
        assert_eq!(Natural::from(5u8).modular_expt(0u8, 7u64), 1u8);
    }

    #[test]
    fn carmichael_all_combinations() {
        let base = Natural::from(7u8);
        let exponent = Natural::from(560u16);
        let modulus = Natural::from(561u16);

        assert_eq!(base.modular_expt(560u64, 561u64), 1u8);
        assert_eq!(base.modular_expt(560u64, &modulus), 1u8);
        assert_eq!(base.modular_expt(&exponent, 561u64), 1u8);
        assert_eq!(base.modular_expt(&exponent, &modulus), 1u8);
        assert_eq!(base.modular_expt(exponent, modulus), 1u8);
    }

    #[test]
    fn fermat_with_big_prime() {
        // 2^127 - 1 is prime
        let prime = Natural::from(u128::MAX >> 1);
        let exponent = Natural::from((u128::MAX >> 1) - 1);
        for base in [2u8, 3, 0xab] {
            assert_eq!(
                Natural::from(base).modular_expt(&exponent, &prime),
                1u8,
                "{base}^(p-1) mod p"
            );
        }
        assert_eq!(
            Natural::from(3u8).modular_expt(&prime, &prime),
            3u8,
            "3^p mod p"
        );
    }

    #[test]
    #[should_panic = "can't divide by zero"]
    fn zero_modulus() {
        let _ = Natural::from(2u8).modular_expt(3u8, 0u64);
    }

    #[test]
    fn checked_zero_modulus() {
        assert_eq!(
            Natural::from(2u8).checked_modular_expt(3u8, Natural::new()),
            Err(DivisionByZero)
        );
        assert_eq!(
            Natural::from(2u8).checked_modular_expt(3u8, 5u64),
            Ok(Natural::from(3u8))
        );
    }
}
