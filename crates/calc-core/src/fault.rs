use thiserror::Error;

use crate::guard::Operation;

/// Fault classes used for reporting and exit-status policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Caller passed an argument outside the operation's domain.
    IllegalArgument,
    /// Register model could not complete the arithmetic.
    ArithmeticDomain,
    /// Strict-mode controller refused an operation its guard disallows.
    GuardRejected,
}

/// Stable fault taxonomy for calculator operations.
///
/// A handler that returns a fault leaves both registers holding the values
/// they had before the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Fault {
    /// Appended digit is outside `0..=9`.
    #[error("digit must be in 0..=9")]
    InvalidDigit = 0x01,
    /// Root degree is below 2.
    #[error("root degree must be at least 2")]
    DegreeOutOfRange = 0x02,
    /// Divisor is zero.
    #[error("division by zero")]
    DivideByZero = 0x03,
    /// Subtrahend is larger than the minuend.
    #[error("subtraction would underflow below zero")]
    Underflow = 0x04,
    /// Value does not fit the bounded integer range.
    #[error("value exceeds the bounded integer range")]
    IntegerOverflow = 0x05,
    /// Subtract attempted while `bottom > top`.
    #[error("subtract is not allowed in the current state")]
    SubtractDisallowed = 0x06,
    /// Divide attempted while `bottom == 0`.
    #[error("divide is not allowed in the current state")]
    DivideDisallowed = 0x07,
    /// Power attempted while `bottom` exceeds the exponent range.
    #[error("power is not allowed in the current state")]
    PowerDisallowed = 0x08,
    /// Root attempted while `bottom` is outside the degree range.
    #[error("root is not allowed in the current state")]
    RootDisallowed = 0x09,
}

impl Fault {
    /// Converts a fault to its stable one-byte code.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable one-byte code back into a fault.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::InvalidDigit),
            0x02 => Some(Self::DegreeOutOfRange),
            0x03 => Some(Self::DivideByZero),
            0x04 => Some(Self::Underflow),
            0x05 => Some(Self::IntegerOverflow),
            0x06 => Some(Self::SubtractDisallowed),
            0x07 => Some(Self::DivideDisallowed),
            0x08 => Some(Self::PowerDisallowed),
            0x09 => Some(Self::RootDisallowed),
            _ => None,
        }
    }

    /// Returns the class this fault is reported under.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::InvalidDigit | Self::DegreeOutOfRange => FaultClass::IllegalArgument,
            Self::DivideByZero | Self::Underflow | Self::IntegerOverflow => {
                FaultClass::ArithmeticDomain
            }
            Self::SubtractDisallowed
            | Self::DivideDisallowed
            | Self::PowerDisallowed
            | Self::RootDisallowed => FaultClass::GuardRejected,
        }
    }

    /// Strict-mode rejection fault for a guarded operation.
    #[must_use]
    pub const fn disallowed(op: Operation) -> Self {
        match op {
            Operation::Subtract => Self::SubtractDisallowed,
            Operation::Divide => Self::DivideDisallowed,
            Operation::Power => Self::PowerDisallowed,
            Operation::Root => Self::RootDisallowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Fault, FaultClass};
    use crate::guard::Operation;

    #[test]
    fn stable_code_roundtrip_is_bijective_for_defined_values() {
        for code in 0x01u8..=0x09 {
            let fault = Fault::from_u8(code).expect("defined taxonomy code");
            assert_eq!(fault.as_u8(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(Fault::from_u8(0x00).is_none());
        assert!(Fault::from_u8(0x0A).is_none());
        assert!(Fault::from_u8(0xFF).is_none());
    }

    #[test]
    fn class_mapping_matches_fault_taxonomy() {
        assert_eq!(Fault::InvalidDigit.class(), FaultClass::IllegalArgument);
        assert_eq!(Fault::DegreeOutOfRange.class(), FaultClass::IllegalArgument);
        assert_eq!(Fault::DivideByZero.class(), FaultClass::ArithmeticDomain);
        assert_eq!(Fault::Underflow.class(), FaultClass::ArithmeticDomain);
        assert_eq!(Fault::IntegerOverflow.class(), FaultClass::ArithmeticDomain);
        assert_eq!(Fault::RootDisallowed.class(), FaultClass::GuardRejected);
    }

    #[test]
    fn every_guarded_operation_has_a_rejection_fault() {
        for op in Operation::ALL {
            assert_eq!(Fault::disallowed(op).class(), FaultClass::GuardRejected);
        }
        assert_eq!(
            Fault::disallowed(Operation::Divide),
            Fault::DivideDisallowed
        );
    }

    #[test]
    fn messages_are_lowercase_and_terse() {
        assert_eq!(Fault::DivideByZero.to_string(), "division by zero");
        assert_eq!(
            Fault::PowerDisallowed.to_string(),
            "power is not allowed in the current state"
        );
    }
}
