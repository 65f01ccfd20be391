// crates/dgb-economics/src/token.rs
//
// DGB token type and supply constants.
//
// The smallest unit of DGB is the "sat". 1 DGB = 10^8 sats. All internal
// accounting uses sats; there is no floating-point conversion anywhere in
// this module so that amounts render identically on every platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of sats in one DGB. 1 DGB = 10^8 sats.
pub const SATS_PER_DGB: u64 = 100_000_000;

/// Upper bound on any single amount: 21,000,000,000 DGB in sats.
pub const MAX_MONEY: u64 = 21_000_000_000 * SATS_PER_DGB;

/// Type alias for sats, the smallest unit of DGB.
pub type Sats = u64;

/// A DGB amount.
///
/// Wraps an amount in sats (the smallest denomination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dgb {
    /// Amount in sats (1 DGB = 10^8 sats).
    pub sats: Sats,
}

impl Dgb {
    /// Create an amount from a sats value.
    pub fn from_sats(sats: Sats) -> Self {
        Self { sats }
    }

    /// Create an amount from a whole number of DGB.
    ///
    /// Returns `None` if the result would not fit in a `u64`.
    ///
    /// # Example
    /// ```
    /// use dgb_economics::token::Dgb;
    /// let amount = Dgb::from_whole(72_000).unwrap();
    /// assert_eq!(amount.sats, 7_200_000_000_000);
    /// ```
    pub fn from_whole(dgb: u64) -> Option<Self> {
        dgb.checked_mul(SATS_PER_DGB).map(Self::from_sats)
    }

    /// Whole-DGB part of the amount.
    pub fn whole(&self) -> u64 {
        self.sats / SATS_PER_DGB
    }

    /// Sub-DGB remainder, in sats.
    pub fn fraction_sats(&self) -> u64 {
        self.sats % SATS_PER_DGB
    }

    /// Whether the amount is an exact number of whole DGB.
    pub fn is_whole(&self) -> bool {
        self.fraction_sats() == 0
    }

    /// Fixed-point decimal string without unit, e.g. `"0.5"` or `"72000"`.
    pub fn to_decimal_string(&self) -> String {
        let frac = self.fraction_sats();
        if frac == 0 {
            self.whole().to_string()
        } else {
            let frac_str = format!("{:08}", frac);
            format!("{}.{}", self.whole(), frac_str.trim_end_matches('0'))
        }
    }

    /// Fixed-point decimal string with all eight fractional digits,
    /// e.g. `"0.50000000"`.
    pub fn to_fixed_string(&self) -> String {
        format!("{}.{:08}", self.whole(), self.fraction_sats())
    }
}

impl fmt::Display for Dgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DGB", self.to_decimal_string())
    }
}
