//! Satisfaction ratings offered by the kiosk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The value a visitor picks; sent to the rating endpoint unmodified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// Top rating.
    #[serde(rename = "muito_satisfeito")]
    VerySatisfied,
    /// Middle rating.
    #[serde(rename = "satisfeito")]
    Satisfied,
    /// Lowest rating.
    #[serde(rename = "insatisfeito")]
    Unsatisfied,
}

impl Rating {
    /// All ratings in display order.
    pub const ALL: [Rating; 3] = [Rating::VerySatisfied, Rating::Satisfied, Rating::Unsatisfied];

    /// Value understood by the rating endpoint.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::VerySatisfied => "muito_satisfeito",
            Self::Satisfied => "satisfeito",
            Self::Unsatisfied => "insatisfeito",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::VerySatisfied => "Very satisfied",
            Self::Satisfied => "Satisfied",
            Self::Unsatisfied => "Unsatisfied",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Returned when a string is not one of the known wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown rating: {0}")]
pub struct UnknownRating(pub String);

impl FromStr for Rating {
    type Err = UnknownRating;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Rating::ALL
            .into_iter()
            .find(|rating| rating.as_wire() == trimmed)
            .ok_or_else(|| UnknownRating(trimmed.to_string()))
    }
}
