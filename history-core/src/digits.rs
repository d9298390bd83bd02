//! Per-digit matching between a guess and the secret year.
//!
//! Matching is prefix-based: digits are compared left to right and the
//! comparison stops at the first mismatch. A correct trailing digit behind
//! a wrong leading digit earns no credit, so feedback only ever extends a
//! confirmed prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of digits in a year.
pub const DIGITS: usize = 4;

/// The place value of each digit in a 4-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitPlace {
    Millennium,
    Century,
    Decade,
    Year,
}

impl DigitPlace {
    /// All places, in digit order (index 0 first).
    pub const ALL: [DigitPlace; DIGITS] = [
        DigitPlace::Millennium,
        DigitPlace::Century,
        DigitPlace::Decade,
        DigitPlace::Year,
    ];

    /// Digit index of this place, 0 = leftmost.
    pub fn index(&self) -> usize {
        match self {
            DigitPlace::Millennium => 0,
            DigitPlace::Century => 1,
            DigitPlace::Decade => 2,
            DigitPlace::Year => 3,
        }
    }

    /// Display label, e.g. for a "Millennium is correct!" notification.
    pub fn label(&self) -> &'static str {
        match self {
            DigitPlace::Millennium => "Millennium",
            DigitPlace::Century => "Century",
            DigitPlace::Decade => "Decade",
            DigitPlace::Year => "Year",
        }
    }
}

impl fmt::Display for DigitPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-digit correctness confirmed to the player.
///
/// Monotonic within a game: `merge` only ever flips entries to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigitFeedback([bool; DIGITS]);

impl DigitFeedback {
    /// All-false feedback for a fresh game.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the digit at `index` has been confirmed.
    pub fn confirmed(&self, index: usize) -> bool {
        self.0[index]
    }

    /// Whether every digit has been confirmed.
    pub fn all_confirmed(&self) -> bool {
        self.0.iter().all(|&c| c)
    }

    /// Number of confirmed digits.
    pub fn confirmed_count(&self) -> usize {
        self.0.iter().filter(|&&c| c).count()
    }

    /// Merge another feedback in via index-wise OR, returning the places
    /// that were newly confirmed by this merge.
    pub fn merge(&mut self, other: DigitFeedback) -> Vec<DigitPlace> {
        let mut newly = Vec::new();
        for place in DigitPlace::ALL {
            let i = place.index();
            if other.0[i] && !self.0[i] {
                self.0[i] = true;
                newly.push(place);
            }
        }
        newly
    }

    /// The raw per-digit flags.
    pub fn as_array(&self) -> [bool; DIGITS] {
        self.0
    }
}

impl Index<usize> for DigitFeedback {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.0[index]
    }
}

impl From<[bool; DIGITS]> for DigitFeedback {
    fn from(flags: [bool; DIGITS]) -> Self {
        Self(flags)
    }
}

/// Left-pad a numeric string to 4 characters with `'0'`.
///
/// `"7"` becomes `"0007"`; a 4-character input is returned unchanged.
pub fn pad_year(raw: &str) -> String {
    format!("{raw:0>4}")
}

/// Compare a guess against the secret digit by digit.
///
/// Both inputs are normalized via [`pad_year`] first. Comparison runs left
/// to right and stops at the first mismatch; digits after the break are
/// never marked correct even when they coincide positionally.
pub fn match_digits(guess: &str, secret: &str) -> DigitFeedback {
    let guess = pad_year(guess);
    let secret = pad_year(secret);

    let mut flags = [false; DIGITS];
    for (i, (g, s)) in guess.chars().zip(secret.chars()).enumerate() {
        if g != s {
            break;
        }
        flags[i] = true;
    }
    DigitFeedback(flags)
}
