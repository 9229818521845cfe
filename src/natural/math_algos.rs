#![allow(clippy::wildcard_imports)]
//! the algorithms behind the operators, all working in place on the first argument
use super::*;
use itertools::Itertools;

fn carrying_add(lhs: u8, rhs: u8, carry: bool) -> (u8, bool) {
    let (res, carry_1) = lhs.overflowing_add(rhs);
    let (res, carry_2) = res.overflowing_add(u8::from(carry));
    (res, carry_1 | carry_2)
}
fn borrowing_sub(lhs: u8, rhs: u8, borrow: bool) -> (u8, bool) {
    let (res, borrow_1) = lhs.overflowing_sub(rhs);
    let (res, borrow_2) = res.overflowing_sub(u8::from(borrow));
    (res, borrow_1 | borrow_2)
}

pub mod bit_math {
    use super::*;
    fn op_assign_zipped(lhs: &mut Natural, rhs: &Natural, op: impl Fn(&mut u8, u8)) {
        for (digit, rhs) in lhs.le_bytes_mut().zip(rhs.le_bytes()) {
            op(digit, rhs);
        }
    }

    pub fn bit_or_assign(lhs: &mut Natural, rhs: &Natural) {
        lhs.widen_payload(rhs.payload);
        op_assign_zipped(lhs, rhs, |digit, rhs| *digit |= rhs);
        lhs.debug_check();
    }
    pub fn bit_xor_assign(lhs: &mut Natural, rhs: &Natural) {
        lhs.widen_payload(rhs.payload);
        op_assign_zipped(lhs, rhs, |digit, rhs| *digit ^= rhs);
        lhs.normalize();
    }
    pub fn bit_and_assign(lhs: &mut Natural, rhs: &Natural) {
        op_assign_zipped(lhs, rhs, |digit, rhs| *digit &= rhs);
        lhs.truncate_payload(rhs.payload);
    }
    /// flips the bits of the current payload only, the result never gets longer
    pub fn not_assign(lhs: &mut Natural) {
        for digit in lhs.as_bytes_mut() {
            *digit = !*digit;
        }
        lhs.normalize();
    }
}

pub mod shift {
    use super::*;

    pub fn shl_assign(lhs: &mut Natural, bits: usize) {
        if lhs.is_zero() {
            return;
        }
        let (full, partial) = (bits / 8, bits % 8);
        if partial > 0 {
            // room for the bits shifted out of the top byte
            lhs.ensure_capacity(full + 1);
        }
        lhs.push_low_zeros(full);
        if partial > 0 {
            lhs.widen_payload(lhs.payload + 1);
            let mut carry = 0;
            for digit in lhs.le_bytes_mut().skip(full) {
                let wide = u16::from(*digit) << partial | u16::from(carry);
                (*digit, carry) = (wide as u8, (wide >> 8) as u8);
            }
            debug_assert_eq!(carry, 0, "top byte was zero");
            lhs.normalize();
        }
    }

    pub fn shr_assign(lhs: &mut Natural, bits: usize) {
        let (full, partial) = (bits / 8, bits % 8);
        lhs.drop_low_bytes(full);
        if partial > 0 {
            let mut carry = 0;
            for digit in lhs.as_bytes_mut() {
                (*digit, carry) = (*digit >> partial | carry, *digit << (8 - partial));
            }
            lhs.normalize();
        }
    }
}

pub mod add {
    use super::*;

    /// calculates `lhs` += `rhs`
    pub fn assign(lhs: &mut Natural, rhs: &Natural) {
        let orig_len = lhs.payload.max(rhs.payload);
        lhs.widen_payload(orig_len + 1);

        let mut carry = false;
        for elem in lhs.le_bytes_mut().zip_longest(rhs.le_bytes()) {
            use itertools::EitherOrBoth as E;
            let (lhs_digit, rhs_digit) = match elem {
                E::Right(_rhs) => unreachable!("lhs was widened"),
                E::Left(_digit) if !carry => {
                    break;
                }
                E::Left(digit) => (digit, 0),
                E::Both(digit, rhs) => (digit, rhs),
            };
            (*lhs_digit, carry) = carrying_add(*lhs_digit, rhs_digit, carry);
        }
        debug_assert!(!carry, "carry left the widened payload");
        lhs.normalize();
    }

    /// calculates `lhs` += `rhs` for a single byte
    pub fn assign_small(lhs: &mut Natural, rhs: u8) {
        if rhs == 0 {
            return;
        }
        lhs.widen_payload(lhs.payload + 1);
        let mut carry = rhs;
        for digit in lhs.le_bytes_mut() {
            if carry == 0 {
                break;
            }
            let overflow;
            (*digit, overflow) = digit.overflowing_add(carry);
            carry = u8::from(overflow);
        }
        lhs.normalize();
    }
}

pub mod sub {
    use super::*;

    /// calculates `lhs` -= `rhs`, `lhs` needs to be the bigger number
    pub fn assign_smaller(lhs: &mut Natural, rhs: &Natural) {
        debug_assert!(*lhs >= *rhs, "lhs is smaller than rhs");

        let mut borrow = false;
        for elem in lhs.le_bytes_mut().zip_longest(rhs.le_bytes()) {
            use itertools::EitherOrBoth as E;
            let (lhs_digit, rhs_digit) = match elem {
                E::Right(_rhs) => unreachable!("lhs is always bigger"),
                E::Left(_digit) if !borrow => {
                    break;
                }
                E::Left(digit) => (digit, 0),
                E::Both(digit, rhs) => (digit, rhs),
            };
            (*lhs_digit, borrow) = borrowing_sub(*lhs_digit, rhs_digit, borrow);
        }
        debug_assert!(!borrow, "lhs was smaller than rhs");
        lhs.normalize();
    }
}

pub mod mul {
    use super::*;

    /// schoolbook multiplication, the result has a fresh buffer of exactly `lhs.payload + rhs.payload` bytes
    pub fn naive(lhs: &Natural, rhs: &Natural) -> Natural {
        // try to minimize outer loops
        if lhs.payload < rhs.payload {
            return naive(rhs, lhs);
        }
        let len = lhs.payload + rhs.payload;
        let mut scratch = Natural::allocate(len);
        for (i, rhs_digit) in rhs.le_bytes().enumerate() {
            if rhs_digit == 0 {
                continue;
            }
            let mut carry = 0u16;
            for (j, lhs_digit) in lhs.le_bytes().enumerate() {
                let place = &mut scratch[len - 1 - (i + j)];
                // 255 + 255 * 255 + 255 still fits into an u16
                let acc = u16::from(*place) + u16::from(lhs_digit) * u16::from(rhs_digit) + carry;
                *place = acc as u8;
                carry = acc >> 8;
            }
            scratch[len - 1 - (i + lhs.payload)] = carry as u8;
        }
        Natural::from_buffer(scratch)
    }

    /// calculates `lhs` *= `rhs` for a single byte
    pub fn assign_small(lhs: &mut Natural, rhs: u8) {
        if rhs == 0 {
            lhs.set_zero();
            return;
        }
        lhs.widen_payload(lhs.payload + 1);
        let mut carry = 0u16;
        for digit in lhs.le_bytes_mut() {
            let acc = u16::from(*digit) * u16::from(rhs) + carry;
            *digit = acc as u8;
            carry = acc >> 8;
        }
        debug_assert_eq!(carry, 0, "top byte was zero");
        lhs.normalize();
    }
}

pub mod div {
    use super::*;

    /// computes (`lhs` / `rhs`, `lhs` % `rhs`), reusing the buffer of `lhs` for the quotient where it can
    ///
    /// expects `rhs` to be non-zero
    pub fn div_rem(mut lhs: Natural, rhs: &Natural) -> (Natural, Natural) {
        assert!(!rhs.is_zero(), "can't divide by zero");
        if lhs < *rhs {
            return (Natural::new(), lhs);
        }
        match rhs.payload {
            1 => {
                log::debug!("dividing {} bytes by a single byte", lhs.payload);
                let remainder = short(&mut lhs, rhs.as_bytes()[0]);
                (lhs, Natural::from(remainder))
            }
            2..=8 => {
                log::debug!("dividing {} bytes by a 64-bit value", lhs.payload);
                let divisor = rhs
                    .to_u64()
                    .unwrap_or_else(|| unreachable!("at most 8 bytes fit into a u64"));
                let remainder = short_u64(&mut lhs, divisor);
                (lhs, Natural::from(remainder))
            }
            _ => {
                log::debug!(
                    "dividing {} bytes by {} bytes with algorithm D",
                    lhs.payload,
                    rhs.payload
                );
                normalized_schoolbook(&lhs, rhs)
            }
        }
    }

    /// divides `lhs` by a single byte in place, returning the remainder
    pub fn short(lhs: &mut Natural, divisor: u8) -> u8 {
        assert_ne!(divisor, 0, "can't divide by zero");
        let divisor = u16::from(divisor);
        let mut remainder = 0u16;
        for digit in lhs.as_bytes_mut() {
            let current = remainder << 8 | u16::from(*digit);
            *digit = (current / divisor) as u8;
            remainder = current % divisor;
        }
        lhs.normalize();
        remainder as u8
    }

    /// divides `lhs` by a 64-bit value in place, returning the remainder.
    /// The remainder is carried along as a rolling 64-bit value.
    pub fn short_u64(lhs: &mut Natural, divisor: u64) -> u64 {
        assert_ne!(divisor, 0, "can't divide by zero");
        let divisor = u128::from(divisor);
        let mut remainder = 0u128;
        for digit in lhs.as_bytes_mut() {
            let current = remainder << 8 | u128::from(*digit);
            *digit = (current / divisor) as u8;
            remainder = current % divisor;
        }
        lhs.normalize();
        remainder as u64
    }

    /// Knuth's algorithm D with a radix of 256.
    ///
    /// computes (`lhs` / `rhs`, `lhs` % `rhs`), expects `rhs` to have at least two significant bytes
    #[allow(clippy::many_single_char_names)]
    pub fn normalized_schoolbook(lhs: &Natural, rhs: &Natural) -> (Natural, Natural) {
        const BASE: u32 = 1 << 8;
        let n = rhs.payload;
        assert!(n >= 2, "divisor {rhs:?} needs at least two bytes");
        if lhs < rhs {
            return (Natural::new(), lhs.clone());
        }
        let m = lhs.payload - n;

        // D1: normalize, so the top bit of the divisor is set
        let shifts = rhs.as_bytes()[0].leading_zeros() as usize;
        let v = (rhs << shifts).le_bytes().collect_vec();
        debug_assert_eq!(v.len(), n, "normalizing changed the length of the divisor");
        let mut u = (lhs << shifts).le_bytes().collect_vec();
        u.resize(m + n + 1, 0);
        log::trace!("normalized with {shifts} shifts, m = {m}, n = {n}");

        let (v_top, v_next) = (u32::from(v[n - 1]), u32::from(v[n - 2]));
        let mut q = vec![0u8; m + 1];
        for j in (0..=m).rev() {
            // D3: estimate q-hat from the top three bytes of the remainder
            let top = u32::from(u[j + n]) << 8 | u32::from(u[j + n - 1]);
            let mut q_hat = top / v_top;
            let mut r_hat = top % v_top;
            if q_hat >= BASE {
                q_hat = BASE - 1;
                r_hat = top - q_hat * v_top;
            }
            while r_hat < BASE && q_hat * v_next > (r_hat << 8 | u32::from(u[j + n - 2])) {
                q_hat -= 1;
                r_hat += v_top;
            }
            log::trace!("D3: q-hat for position {j} is {q_hat}");

            // D4: multiply and subtract
            let mut carry = 0u32;
            let mut borrow = false;
            for (i, &v_digit) in v.iter().enumerate() {
                let product = q_hat * u32::from(v_digit) + carry;
                carry = product >> 8;
                (u[i + j], borrow) = borrowing_sub(u[i + j], product as u8, borrow);
            }
            (u[j + n], borrow) = borrowing_sub(u[j + n], carry as u8, borrow);

            // D6: add back, q-hat was one too big
            if borrow {
                log::trace!("D6: add back at position {j}");
                q_hat -= 1;
                let mut carry = false;
                for (i, &v_digit) in v.iter().enumerate() {
                    (u[i + j], carry) = carrying_add(u[i + j], v_digit, carry);
                }
                u[j + n] = u[j + n].wrapping_add(u8::from(carry));
            }
            q[j] = q_hat as u8;
        }

        // D8: unnormalize the remainder
        u.truncate(n);
        let mut remainder = Natural::from_le_digits(u);
        remainder >>= shifts;
        (Natural::from_le_digits(q), remainder)
    }
}
