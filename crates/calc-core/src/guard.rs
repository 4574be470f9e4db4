//! Legality evaluation for guarded operations.
//!
//! The legality vector is advisory. The event source uses it to disable
//! controls; the controller only enforces it under
//! [`CalcConfig::strict_guards`](crate::CalcConfig::strict_guards).

use std::fmt;

use tracing::trace;

use crate::natural::{NaturalNumber, INT_LIMIT};

/// Operations whose legality depends on register state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Operation {
    /// `bottom <- top - bottom`; requires `bottom <= top`.
    Subtract,
    /// `bottom <- top / bottom`; requires `bottom != 0`.
    Divide,
    /// `bottom <- top ^ bottom`; requires `bottom <= INT_LIMIT`.
    Power,
    /// `bottom <- root(top, bottom)`; requires `2 <= bottom <= INT_LIMIT`.
    Root,
}

impl Operation {
    /// All guarded operations in display order.
    pub const ALL: [Self; 4] = [Self::Subtract, Self::Divide, Self::Power, Self::Root];

    /// Lowercase operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Subtract => "subtract",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Root => "root",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which guarded operations are currently advisable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct Legality {
    /// `bottom <= top`.
    pub subtract: bool,
    /// `bottom != 0`.
    pub divide: bool,
    /// `bottom <= INT_LIMIT`.
    pub power: bool,
    /// `2 <= bottom <= INT_LIMIT`.
    pub root: bool,
}

impl Legality {
    /// Returns the flag for `op`.
    #[must_use]
    pub const fn allows(self, op: Operation) -> bool {
        match op {
            Operation::Subtract => self.subtract,
            Operation::Divide => self.divide,
            Operation::Power => self.power,
            Operation::Root => self.root,
        }
    }
}

/// Computes the legality vector for a register pair.
#[must_use]
pub fn evaluate<N: NaturalNumber>(top: &N, bottom: &N) -> Legality {
    let two = N::from_u32(2);
    let int_limit = N::from_u32(INT_LIMIT);

    let legality = Legality {
        subtract: bottom <= top,
        divide: !bottom.is_zero(),
        power: *bottom <= int_limit,
        root: two <= *bottom && *bottom <= int_limit,
    };
    trace!(?legality, "evaluated guards");
    legality
}
