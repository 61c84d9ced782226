//! Options for `civil_rs` operations.
//!
//! Converting a wall-clock datetime into an instant may be ambiguous when the
//! host's local offset changes. The options here select how that is resolved.

use core::{fmt, str::FromStr};

// ==== Options enums and methods ====

/// Selects which instant a local wall-clock time resolves to when the local
/// offset changes around it.
///
/// During a fold (a backward transition) the same wall-clock time occurs
/// twice. During a gap (a forward transition) the wall-clock time never
/// occurs, and the two candidate instants come from interpreting it with
/// the offsets on either side of the transition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fold {
    /// In a fold, select the earlier instant. In a gap, use the offset in
    /// effect before the transition.
    #[default]
    Earlier,
    /// In a fold, select the later instant. In a gap, use the offset in
    /// effect after the transition.
    Later,
}

impl From<bool> for Fold {
    fn from(fold: bool) -> Self {
        if fold {
            Self::Later
        } else {
            Self::Earlier
        }
    }
}

/// A parsing error on `Fold` options.
#[derive(Debug, Clone, Copy)]
pub struct ParseFoldError;

impl fmt::Display for ParseFoldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid fold value")
    }
}

impl FromStr for Fold {
    type Err = ParseFoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earlier" => Ok(Self::Earlier),
            "later" => Ok(Self::Later),
            _ => Err(ParseFoldError),
        }
    }
}

impl fmt::Display for Fold {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Earlier => "earlier",
            Self::Later => "later",
        })
    }
}
