pub mod error;
pub mod natural;

pub use error::{DivisionByZero, FromStrErr, RadixError};
pub use natural::{
    bits::BitSource,
    expt::Modulus,
    parse::{Radix, TextUnit},
    Natural, Primitive,
};

mod util {
    pub mod boo;
    pub mod rng;
}
