//! Register model contract and its arbitrary-precision implementation.

use std::fmt;

use crate::Fault;

/// Arbitrary-precision register value backed by `num::BigUint`.
pub mod big;
#[cfg(test)]
pub(crate) mod word;

pub use big::{BigNatural, ParseNaturalError};

/// Largest bounded integer accepted as an exponent or root degree (`i32::MAX`).
pub const INT_LIMIT: u32 = 0x7FFF_FFFF;

/// Natural-number value type consumed by the calculator controller.
///
/// Fallible operations must leave `self` untouched when they return a fault.
/// The controller relies on this to restore the registers after a failed
/// handler.
pub trait NaturalNumber: Default + Clone + Ord + fmt::Debug + fmt::Display {
    /// Creates a value from a bounded integer.
    fn from_u32(value: u32) -> Self;

    /// Returns `true` when the value is zero.
    fn is_zero(&self) -> bool;

    /// Resets the value to zero.
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replaces the value with a deep copy of `other`.
    fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Moves the value out of `other`, leaving `other` at zero.
    fn transfer_from(&mut self, other: &mut Self) {
        *self = std::mem::take(other);
    }

    /// Adds `other` in place.
    fn add(&mut self, other: &Self);

    /// Subtracts `other` in place.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Underflow`] when `other > self`.
    fn subtract(&mut self, other: &Self) -> Result<(), Fault>;

    /// Multiplies by `other` in place.
    fn multiply(&mut self, other: &Self);

    /// Divides by `other` in place, leaving the quotient in `self` and
    /// returning the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::DivideByZero`] when `other` is zero.
    fn divide(&mut self, other: &Self) -> Result<Self, Fault>;

    /// Raises the value to `exponent` in place.
    fn power(&mut self, exponent: u32);

    /// Replaces the value with its integer `degree`-th root (rounded down).
    ///
    /// # Errors
    ///
    /// Returns [`Fault::DegreeOutOfRange`] when `degree < 2`.
    fn root(&mut self, degree: u32) -> Result<(), Fault>;

    /// Converts the value to a bounded integer.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::IntegerOverflow`] when the value exceeds [`INT_LIMIT`].
    fn to_int(&self) -> Result<u32, Fault>;

    /// Appends a decimal digit (`self = self * 10 + digit`).
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidDigit`] when `digit > 9`.
    fn multiply_by_10(&mut self, digit: u8) -> Result<(), Fault>;
}
