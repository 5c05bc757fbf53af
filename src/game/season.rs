//! The four seasons of a year.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// One of the four recurring phases of a year. One turn is played per season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    /// First season of the calendar.
    Spring,
    /// Second season.
    Summer,
    /// Third season.
    Autumn,
    /// Last season, wraps back to spring.
    Winter,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// The season after this one, wrapping after winter.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Position of the season in the calendar (spring is 0).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The season `turns` turns after this one.
    #[must_use]
    pub const fn advanced_by(self, turns: u32) -> Self {
        Self::ALL[(self.index() + (turns % 4) as usize) % 4]
    }

    /// Season name with a capital first letter, for display.
    #[must_use]
    pub const fn capitalized(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        };
        f.write_str(name)
    }
}

impl FromStr for Season {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownSeason(s.to_string()))
    }
}
