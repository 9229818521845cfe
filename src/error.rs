use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("can't divide by zero")]
pub struct DivisionByZero;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FromStrErr {
    #[error("unknown digit {digit:?} at position {position}")]
    UnknownDigit { digit: char, position: usize },
    #[error("unknown radix prefix '0{0}'")]
    UnknownRadix(char),
    #[error("no digits to parse")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("radix {0} is not supported, only 2, 8, 10 and 16 are")]
pub struct RadixError(pub u32);
