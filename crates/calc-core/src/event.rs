//! User events accepted by the controller.

use std::fmt;

use crate::guard::Operation;

/// One button press, mapped 1:1 onto a controller handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CalcEvent {
    /// `bottom <- 0`.
    Clear,
    /// Exchange `top` and `bottom`.
    Swap,
    /// `top <- copy(bottom)`.
    Enter,
    /// `bottom <- top + bottom`, `top <- 0`.
    Add,
    /// `bottom <- top - bottom`, `top <- 0`.
    Subtract,
    /// `bottom <- top * bottom`, `top <- 0`.
    Multiply,
    /// `bottom <- top / bottom`, `top <- top % bottom`.
    Divide,
    /// `bottom <- top ^ bottom`, `top <- 0`.
    Power,
    /// `bottom <- root(top, bottom)`, `top <- 0`.
    Root,
    /// `bottom <- bottom * 10 + digit`.
    AppendDigit(u8),
}

impl CalcEvent {
    /// Guarded operation this event performs, if any.
    #[must_use]
    pub const fn guarded_operation(self) -> Option<Operation> {
        match self {
            Self::Subtract => Some(Operation::Subtract),
            Self::Divide => Some(Operation::Divide),
            Self::Power => Some(Operation::Power),
            Self::Root => Some(Operation::Root),
            Self::Clear
            | Self::Swap
            | Self::Enter
            | Self::Add
            | Self::Multiply
            | Self::AppendDigit(_) => None,
        }
    }

    /// Lowercase event name; digits render as `digit`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Swap => "swap",
            Self::Enter => "enter",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Root => "root",
            Self::AppendDigit(_) => "digit",
        }
    }
}

impl From<Operation> for CalcEvent {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Subtract => Self::Subtract,
            Operation::Divide => Self::Divide,
            Operation::Power => Self::Power,
            Operation::Root => Self::Root,
        }
    }
}

impl fmt::Display for CalcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppendDigit(digit) => write!(f, "digit {digit}"),
            other => f.write_str(other.name()),
        }
    }
}
