use std::fmt;
use std::str::FromStr;

use num::{BigUint, Integer, ToPrimitive, Zero};
use thiserror::Error;

use super::{NaturalNumber, INT_LIMIT};
use crate::Fault;

/// Natural number of unbounded size.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigNatural(BigUint);

impl From<BigUint> for BigNatural {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for BigNatural {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for BigNatural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Error returned when a decimal literal is not a natural number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid natural number literal `{literal}`")]
pub struct ParseNaturalError {
    /// The rejected input text.
    pub literal: String,
}

impl FromStr for BigNatural {
    type Err = ParseNaturalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let reject = || ParseNaturalError {
            literal: s.to_string(),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(reject());
        }

        BigUint::parse_bytes(digits.as_bytes(), 10)
            .map(Self)
            .ok_or_else(reject)
    }
}

impl NaturalNumber for BigNatural {
    fn from_u32(value: u32) -> Self {
        Self(BigUint::from(value))
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&mut self, other: &Self) {
        self.0 += &other.0;
    }

    fn subtract(&mut self, other: &Self) -> Result<(), Fault> {
        if self.0 < other.0 {
            return Err(Fault::Underflow);
        }
        self.0 -= &other.0;
        Ok(())
    }

    fn multiply(&mut self, other: &Self) {
        self.0 *= &other.0;
    }

    fn divide(&mut self, other: &Self) -> Result<Self, Fault> {
        if other.0.is_zero() {
            return Err(Fault::DivideByZero);
        }
        let (quotient, remainder) = self.0.div_rem(&other.0);
        self.0 = quotient;
        Ok(Self(remainder))
    }

    fn power(&mut self, exponent: u32) {
        self.0 = self.0.pow(exponent);
    }

    fn root(&mut self, degree: u32) -> Result<(), Fault> {
        if degree < 2 {
            return Err(Fault::DegreeOutOfRange);
        }
        self.0 = self.0.nth_root(degree);
        Ok(())
    }

    fn to_int(&self) -> Result<u32, Fault> {
        self.0
            .to_u32()
            .filter(|value| *value <= INT_LIMIT)
            .ok_or(Fault::IntegerOverflow)
    }

    fn multiply_by_10(&mut self, digit: u8) -> Result<(), Fault> {
        if digit > 9 {
            return Err(Fault::InvalidDigit);
        }
        self.0 *= 10u32;
        self.0 += u32::from(digit);
        Ok(())
    }
}
