//! the operations on [`Natural`] and the operator traits build on them.
//!
//! Every binary operation takes both sides as [`Boo`] and returns a [`Moo`].
//! When one side is given as `&mut`, the result is written into it,
//! otherwise an owned result is returned, reusing an owned argument where possible.
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use super::{math_algos, math_shortcuts::MathShortcut, Natural};
use crate::{
    error::DivisionByZero,
    util::boo::{Boo, Moo},
};

trait TieBreaker {
    fn decide<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> (Natural, Boo<'b, Natural>);
}
struct TieSmaller;
impl TieBreaker for TieSmaller {
    fn decide<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> (Natural, Boo<'b, Natural>) {
        if *lhs <= *rhs {
            (lhs.cloned(), rhs)
        } else {
            (rhs.cloned(), lhs)
        }
    }
}
struct TieBigger;
impl TieBreaker for TieBigger {
    fn decide<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> (Natural, Boo<'b, Natural>) {
        if *lhs > *rhs {
            (lhs.cloned(), rhs)
        } else {
            (rhs.cloned(), lhs)
        }
    }
}

/// writes `value` into whichever side is the `&mut`, preferring `lhs`
#[cfg_attr(feature = "subAssert", allow(dead_code))]
fn write_result<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>, value: Natural) -> Moo<'b, Natural> {
    match (lhs, rhs) {
        (Boo::BorrowedMut(target), _) | (_, Boo::BorrowedMut(target)) => {
            *target = value;
            Moo::BorrowedMut(target)
        }
        _ => Moo::Owned(value),
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(feature = "subClamp", feature = "subAssert"))] {
        compile_error!("feature \"subClamp\" and feature \"subAssert\" cannot be enabled at the same time");
    } else if #[cfg(feature = "subAssert")] {
        fn underflow<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            panic!("result would be negative: {:?} - {:?}", *lhs, *rhs);
        }
    } else if #[cfg(feature = "subClamp")] {
        /// the difference would be negative, so it is clamped to zero
        fn underflow<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            log::trace!("clamping {:?} - {:?} to zero", *lhs, *rhs);
            write_result(lhs, rhs, Natural::new())
        }
    } else {
        /// without a policy feature, debug builds panic and release builds clamp to zero
        fn underflow<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            if cfg!(debug_assertions) {
                panic!("result would be negative: {:?} - {:?}", *lhs, *rhs);
            }
            write_result(lhs, rhs, Natural::new())
        }
    }
}

impl Natural {
    fn assert_pair_valid(lhs: &Boo<'_, Self>, rhs: &Boo<'_, Self>) {
        assert!(
            !lhs.is_mut() || !rhs.is_mut(),
            "can't have two &mut's as arguments"
        );
    }

    fn refer_direct<'b, T: TieBreaker>(
        lhs: Boo<'b, Self>,
        rhs: Boo<'b, Self>,
        func: impl FnOnce(&mut Self, &Self),
    ) -> Moo<'b, Self> {
        Self::assert_pair_valid(&lhs, &rhs);

        match (lhs, rhs) {
            (Boo::BorrowedMut(borrow_mut), borrow) | (borrow, Boo::BorrowedMut(borrow_mut)) => {
                func(borrow_mut, &borrow);
                Moo::BorrowedMut(borrow_mut)
            }
            (Boo::Borrowed(borrowed), Boo::Owned(mut owned))
            | (Boo::Owned(mut owned), Boo::Borrowed(borrowed)) => {
                func(&mut owned, borrowed);
                Moo::Owned(owned)
            }
            (lhs, rhs) => {
                let (mut owned, borrowed) = T::decide(lhs, rhs);
                func(&mut owned, &borrowed);
                Moo::Owned(owned)
            }
        }
    }

    // math
    pub fn bitor<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        Self::refer_direct::<TieBigger>(
            lhs.into(),
            rhs.into(),
            math_algos::bit_math::bit_or_assign,
        )
    }
    pub fn bitxor<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        Self::refer_direct::<TieBigger>(
            lhs.into(),
            rhs.into(),
            math_algos::bit_math::bit_xor_assign,
        )
    }
    pub fn bitand<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        Self::refer_direct::<TieSmaller>(
            lhs.into(),
            rhs.into(),
            math_algos::bit_math::bit_and_assign,
        )
    }

    pub fn shl<'b>(lhs: impl Into<Boo<'b, Self>>, bits: usize) -> Moo<'b, Self> {
        let mut lhs = Moo::from(lhs.into());
        math_algos::shift::shl_assign(&mut lhs, bits);
        lhs
    }
    pub fn shr<'b>(lhs: impl Into<Boo<'b, Self>>, bits: usize) -> Moo<'b, Self> {
        let mut lhs = Moo::from(lhs.into());
        math_algos::shift::shr_assign(&mut lhs, bits);
        lhs
    }

    pub fn add<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        super::math_shortcuts::try_all!(lhs, rhs, super::math_shortcuts::add::Zero,);

        Self::refer_direct::<TieBigger>(lhs, rhs, math_algos::add::assign)
    }
    /// `lhs` - `rhs`, a negative result is zero with the feature `subClamp`
    /// and panics with the feature `subAssert`.
    /// Without either, it only panics in debug builds.
    pub fn sub<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        if *lhs < *rhs {
            return underflow(lhs, rhs);
        }
        super::math_shortcuts::try_all!(lhs, rhs, right super::math_shortcuts::sub::Zero,);

        match (lhs, rhs) {
            (Boo::BorrowedMut(lhs), rhs) => {
                math_algos::sub::assign_smaller(lhs, &rhs);
                Moo::BorrowedMut(lhs)
            }
            (lhs, Boo::BorrowedMut(borrowed)) => {
                let old_rhs = std::mem::replace(borrowed, lhs.cloned()); // lhs -> rhs, rhs -> old_rhs
                math_algos::sub::assign_smaller(borrowed, &old_rhs);
                Moo::BorrowedMut(borrowed)
            }
            (lhs, rhs) => {
                // the algorithm can only subtract the smaller, so rhs can't hold the result
                let mut lhs = lhs.cloned();
                math_algos::sub::assign_smaller(&mut lhs, &rhs);
                Moo::Owned(lhs)
            }
        }
    }
    /// `lhs` - `rhs` or `None` if that would be negative
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        (*self >= *rhs).then(|| {
            let mut out = self.clone();
            math_algos::sub::assign_smaller(&mut out, rhs);
            out
        })
    }

    pub fn mul<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        super::math_shortcuts::try_all!(
            lhs,
            rhs,
            super::math_shortcuts::mul::ByZero,
            super::math_shortcuts::mul::ByOne,
            super::math_shortcuts::mul::ByPowerOfTwo,
        );

        match (lhs, rhs) {
            (Boo::BorrowedMut(borrow_mut), borrow) | (borrow, Boo::BorrowedMut(borrow_mut)) => {
                *borrow_mut = math_algos::mul::naive(borrow_mut, &borrow);
                Moo::BorrowedMut(borrow_mut)
            }
            (lhs, rhs) => Moo::Owned(math_algos::mul::naive(&lhs, &rhs)),
        }
    }
    /// `self` *= `factor` for a single byte
    pub fn mul_small(&mut self, factor: u8) {
        math_algos::mul::assign_small(self, factor);
    }
    /// `self` += `summand` for a single byte
    pub fn add_small(&mut self, summand: u8) {
        math_algos::add::assign_small(self, summand);
    }

    /// computes (`lhs` / `rhs`, `lhs` % `rhs`).
    ///
    /// Both sides may be `&mut`, then the quotient ends up in `lhs` and the remainder in `rhs`.
    ///
    /// # Panics
    /// if `rhs` is zero
    pub fn div_rem<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> (Moo<'b, Self>, Moo<'b, Self>) {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();

        assert!(!rhs.is_zero(), "can't divide by zero");

        super::math_shortcuts::try_all!(
            lhs,
            rhs,
            left super::math_shortcuts::div::Smaller,
            left super::math_shortcuts::div::Same,
            right super::math_shortcuts::div::ByPowerOfTwo,
        );

        let (n, lhs) = lhs.take_keep_ref();
        let (q, r) = math_algos::div::div_rem(n, &rhs);

        (Moo::from_with_value(lhs, q), Moo::from_with_value(rhs, r))
    }
    /// like [`Natural::div_rem`], but reports a zero divisor
    ///
    /// # Errors
    /// if `rhs` is zero
    pub fn checked_div_rem<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Result<(Moo<'b, Self>, Moo<'b, Self>), DivisionByZero> {
        let rhs: Boo<'_, Self> = rhs.into();
        if rhs.is_zero() {
            return Err(DivisionByZero);
        }
        Ok(Self::div_rem(lhs, rhs))
    }
    pub fn div<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        let rhs: Boo<'_, Self> = rhs.into();
        Self::div_rem(lhs, rhs.shared()).0
    }
    pub fn rem<'b>(
        lhs: impl Into<Boo<'b, Self>>,
        rhs: impl Into<Boo<'b, Self>>,
    ) -> Moo<'b, Self> {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        let (value, lhs) = lhs.take_keep_ref();
        let (_, remainder) = Self::div_rem(value, rhs.shared());
        Moo::from_with_value(lhs, remainder.cloned())
    }
}

impl Not for Natural {
    type Output = Self;

    /// flips the bits of the payload, the result is never longer than `self`
    fn not(mut self) -> Self::Output {
        math_algos::bit_math::not_assign(&mut self);
        self
    }
}
impl Not for &Natural {
    type Output = Natural;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}

macro_rules! implNaturalMath {
    ($assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident) => {
        impl $trait<Natural> for Natural {
            implNaturalMath!(body $func, Natural);
        }
        impl $trait<&Natural> for Natural {
            implNaturalMath!(body $func, &Natural);
        }
        impl $trait<Natural> for &Natural {
            implNaturalMath!(body $func, Natural);
        }
        impl $trait<&Natural> for &Natural {
            implNaturalMath!(body $func, &Natural);
        }
        impl $assign_trait<Natural> for Natural {
            fn $assign_func(&mut self, rhs: Natural) {
                Natural::$func(self, rhs).expect_mut("did give &mut, shouldn't get result");
            }
        }
        impl $assign_trait<&Natural> for Natural {
            fn $assign_func(&mut self, rhs: &Natural) {
                Natural::$func(self, rhs).expect_mut("did give &mut, shouldn't get result");
            }
        }
        implNaturalMath!(native $assign_trait, $assign_func, $trait, $func, u64);
    };
    (native $assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident, $native:ty) => {
        impl $trait<$native> for Natural {
            type Output = Natural;
            fn $func(self, rhs: $native) -> Self::Output {
                Natural::$func(self, Natural::from(rhs))
                    .expect_owned("didn't give &mut, should get result")
            }
        }
        impl $trait<$native> for &Natural {
            type Output = Natural;
            fn $func(self, rhs: $native) -> Self::Output {
                Natural::$func(self, Natural::from(rhs))
                    .expect_owned("didn't give &mut, should get result")
            }
        }
        impl $assign_trait<$native> for Natural {
            fn $assign_func(&mut self, rhs: $native) {
                Natural::$func(self, Natural::from(rhs))
                    .expect_mut("did give &mut, shouldn't get result");
            }
        }
    };
    (shift $assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident) => {
        impl $trait<usize> for Natural {
            implNaturalMath!(body $func, usize);
        }
        impl $trait<usize> for &Natural {
            implNaturalMath!(body $func, usize);
        }
        impl $assign_trait<usize> for Natural {
            fn $assign_func(&mut self, rhs: usize) {
                Natural::$func(self, rhs).expect_mut("did give &mut, shouldn't get result");
            }
        }
    };
    (body $func:ident, $rhs:ty) => {
        type Output = Natural;
        fn $func(self, rhs: $rhs) -> Self::Output {
            Natural::$func(self, rhs).expect_owned("didn't give &mut, should get result")
        }
    };
}
implNaturalMath!(BitOrAssign, bitor_assign, BitOr, bitor);
implNaturalMath!(BitXorAssign, bitxor_assign, BitXor, bitxor);
implNaturalMath!(BitAndAssign, bitand_assign, BitAnd, bitand);
implNaturalMath!(shift ShlAssign, shl_assign, Shl, shl);
implNaturalMath!(shift ShrAssign, shr_assign, Shr, shr);
implNaturalMath!(AddAssign, add_assign, Add, add);
implNaturalMath!(SubAssign, sub_assign, Sub, sub);
implNaturalMath!(MulAssign, mul_assign, Mul, mul);
implNaturalMath!(DivAssign, div_assign, Div, div);
implNaturalMath!(RemAssign, rem_assign, Rem, rem);
