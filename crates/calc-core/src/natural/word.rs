//! Fixed-width stand-in for the register model used by controller unit tests.

use std::fmt;

use super::{NaturalNumber, INT_LIMIT};
use crate::Fault;

/// `u64`-backed natural number; panics on overflow, which tests never reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordNatural(pub u64);

impl fmt::Display for WordNatural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NaturalNumber for WordNatural {
    fn from_u32(value: u32) -> Self {
        Self(u64::from(value))
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn add(&mut self, other: &Self) {
        self.0 = self.0.checked_add(other.0).expect("test value overflow");
    }

    fn subtract(&mut self, other: &Self) -> Result<(), Fault> {
        self.0 = self.0.checked_sub(other.0).ok_or(Fault::Underflow)?;
        Ok(())
    }

    fn multiply(&mut self, other: &Self) {
        self.0 = self.0.checked_mul(other.0).expect("test value overflow");
    }

    fn divide(&mut self, other: &Self) -> Result<Self, Fault> {
        if other.0 == 0 {
            return Err(Fault::DivideByZero);
        }
        let remainder = self.0 % other.0;
        self.0 /= other.0;
        Ok(Self(remainder))
    }

    fn power(&mut self, exponent: u32) {
        self.0 = self.0.checked_pow(exponent).expect("test value overflow");
    }

    fn root(&mut self, degree: u32) -> Result<(), Fault> {
        if degree < 2 {
            return Err(Fault::DegreeOutOfRange);
        }
        let mut root = 0u64;
        while (root + 1)
            .checked_pow(degree)
            .is_some_and(|candidate| candidate <= self.0)
        {
            root += 1;
        }
        self.0 = root;
        Ok(())
    }

    fn to_int(&self) -> Result<u32, Fault> {
        u32::try_from(self.0)
            .ok()
            .filter(|value| *value <= INT_LIMIT)
            .ok_or(Fault::IntegerOverflow)
    }

    fn multiply_by_10(&mut self, digit: u8) -> Result<(), Fault> {
        if digit > 9 {
            return Err(Fault::InvalidDigit);
        }
        self.0 = self.0 * 10 + u64::from(digit);
        Ok(())
    }
}
