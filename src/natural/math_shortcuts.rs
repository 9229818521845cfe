#![allow(clippy::wildcard_imports)]
use super::Natural;
use crate::util::boo::{Boo, Moo};

macro_rules! try_all {
    ($lhs:ident, $rhs:ident $(, )?) => {};
    ($lhs:ident, $rhs:ident, $($rule:tt)::*, $($tail:tt)*) => {
        if <$($rule)::* as MathShortcut<super::math_shortcuts::Left>>::can_shortcut(&$lhs, &$rhs) {
            return <$($rule)::* as MathShortcut<super::math_shortcuts::Left>>::do_shortcut($lhs, $rhs);
        }
        if <$($rule)::* as MathShortcut<super::math_shortcuts::Right>>::can_shortcut(&$lhs, &$rhs) {
            return <$($rule)::* as MathShortcut<super::math_shortcuts::Right>>::do_shortcut($lhs, $rhs);
        }
        super::math_shortcuts::try_all!($lhs, $rhs, $($tail)*);
    };
    ($lhs:ident, $rhs:ident, left $($rule:tt)::*, $($tail:tt)*) => {
        if <$($rule)::* as MathShortcut<super::math_shortcuts::Left>>::can_shortcut(&$lhs, &$rhs) {
            return <$($rule)::* as MathShortcut<super::math_shortcuts::Left>>::do_shortcut($lhs, $rhs);
        }
        super::math_shortcuts::try_all!($lhs, $rhs, $($tail)*);
    };
    ($lhs:ident, $rhs:ident, right $($rule:tt)::*, $($tail:tt)*) => {
        if <$($rule)::* as MathShortcut<super::math_shortcuts::Right>>::can_shortcut(&$lhs, &$rhs) {
            return <$($rule)::* as MathShortcut<super::math_shortcuts::Right>>::do_shortcut($lhs, $rhs);
        }
        super::math_shortcuts::try_all!($lhs, $rhs, $($tail)*);
    };
}
pub(crate) use try_all;

pub trait Side {}
pub struct Left;
impl Side for Left {}
pub struct Right;
impl Side for Right {}

pub trait MathShortcut<S: Side> {
    type RES<'b>;

    /// can the operation be made significantly easier by using special info about one side.
    /// For example 0 * x = 0
    fn can_shortcut(lhs: &Natural, rhs: &Natural) -> bool;
    /// apply the shortcut with the special side
    fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Self::RES<'b>;
}
/// refers its methods directly to the right side and with flipped parametes for the left side
pub trait MathShortcutFlip {
    /// can the operation be made significantly easier by using special info about `rhs`.
    fn can_shortcut(lhs: &Natural, rhs: &Natural) -> bool;
    /// apply the shortcut with the special `rhs`
    fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural>;
}
impl<Flip: MathShortcutFlip> MathShortcut<Right> for Flip {
    type RES<'b> = Moo<'b, Natural>;

    fn can_shortcut(lhs: &Natural, rhs: &Natural) -> bool {
        <Self as MathShortcutFlip>::can_shortcut(lhs, rhs)
    }
    fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
        <Self as MathShortcutFlip>::do_shortcut(lhs, rhs)
    }
}
impl<Flip: MathShortcutFlip> MathShortcut<Left> for Flip {
    type RES<'b> = Moo<'b, Natural>;

    fn can_shortcut(lhs: &Natural, rhs: &Natural) -> bool {
        <Self as MathShortcutFlip>::can_shortcut(rhs, lhs)
    }
    fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
        <Self as MathShortcutFlip>::do_shortcut(rhs, lhs)
    }
}

/// the result is `lhs`, written into `rhs` if that is the `&mut`
pub(super) fn get_lhs<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
    match (lhs, rhs) {
        (lhs, Boo::BorrowedMut(rhs)) => {
            *rhs = lhs.cloned();
            Moo::BorrowedMut(rhs)
        }
        (lhs, _) => Moo::from(lhs),
    }
}

pub mod add {
    use super::*;
    pub struct Zero;
    impl MathShortcutFlip for Zero {
        fn can_shortcut(_lhs: &Natural, rhs: &Natural) -> bool {
            rhs.is_zero()
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            super::get_lhs(lhs, rhs)
        }
    }
}

pub mod sub {
    use super::*;
    pub struct Zero;
    impl MathShortcut<Right> for Zero {
        type RES<'b> = Moo<'b, Natural>;

        fn can_shortcut(_: &Natural, rhs: &Natural) -> bool {
            rhs.is_zero()
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            super::get_lhs(lhs, rhs)
        }
    }
}

pub mod mul {
    use super::*;
    pub struct ByZero;
    impl MathShortcutFlip for ByZero {
        fn can_shortcut(_lhs: &Natural, rhs: &Natural) -> bool {
            rhs.is_zero()
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            match (lhs, rhs) {
                (Boo::BorrowedMut(lhs), _) => {
                    lhs.set_zero();
                    Moo::BorrowedMut(lhs)
                }
                (_, Boo::BorrowedMut(rhs)) => Moo::BorrowedMut(rhs),
                (_, rhs) => Moo::Owned(rhs.cloned()),
            }
        }
    }
    pub struct ByOne;
    impl MathShortcutFlip for ByOne {
        fn can_shortcut(_lhs: &Natural, rhs: &Natural) -> bool {
            rhs.is_one()
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            super::get_lhs(lhs, rhs)
        }
    }
    pub struct ByPowerOfTwo;
    impl MathShortcutFlip for ByPowerOfTwo {
        fn can_shortcut(_lhs: &Natural, rhs: &Natural) -> bool {
            rhs.is_power_of_two()
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Moo<'b, Natural> {
            let pow = rhs.bit_length() - 1;
            let mut either = super::get_lhs(lhs, rhs);
            *either <<= pow;
            either
        }
    }
}

pub mod div {
    use super::*;
    pub struct Smaller;
    impl MathShortcut<Left> for Smaller {
        type RES<'b> = (Moo<'b, Natural>, Moo<'b, Natural>);

        fn can_shortcut(lhs: &Natural, rhs: &Natural) -> bool {
            lhs < rhs
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Self::RES<'b> {
            let (a, lhs) = lhs.take_keep_ref();
            (
                Moo::from_with_value(lhs, Natural::new()),
                Moo::from_with_value(rhs, a),
            )
        }
    }
    pub struct Same;
    impl MathShortcut<Left> for Same {
        type RES<'b> = (Moo<'b, Natural>, Moo<'b, Natural>);

        fn can_shortcut(lhs: &Natural, rhs: &Natural) -> bool {
            lhs == rhs
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Self::RES<'b> {
            (
                Moo::from_with_value(lhs, Natural::from(1u8)),
                Moo::from_with_value(rhs, Natural::new()),
            )
        }
    }
    pub struct ByPowerOfTwo;
    impl MathShortcut<Right> for ByPowerOfTwo {
        type RES<'b> = (Moo<'b, Natural>, Moo<'b, Natural>);

        fn can_shortcut(_lhs: &Natural, rhs: &Natural) -> bool {
            rhs.is_power_of_two()
        }

        fn do_shortcut<'b>(lhs: Boo<'b, Natural>, rhs: Boo<'b, Natural>) -> Self::RES<'b> {
            let pow = rhs.bit_length() - 1;
            let remainder = lhs.bit_field(0, pow);
            let (mut quotient, lhs) = lhs.take_keep_ref();
            quotient >>= pow;
            (
                Moo::from_with_value(lhs, quotient),
                Moo::from_with_value(rhs, remainder),
            )
        }
    }
}
