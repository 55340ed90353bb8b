//! Core types shared by the optimizer and its operators.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the optimizer decides whether an offspring was successful.
///
/// Success is credited to both the offspring and its parent before their
/// step sizes are adapted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NotionOfSuccess {
    /// The offspring is selected and its rank is no worse than its parent's.
    #[default]
    IndividualBased,
    /// The offspring is selected, regardless of its parent's rank.
    PopulationBased,
}

impl NotionOfSuccess {
    /// The configuration name of this notion.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndividualBased => "IndividualBased",
            Self::PopulationBased => "PopulationBased",
        }
    }
}

impl fmt::Display for NotionOfSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotionOfSuccess {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IndividualBased" => Ok(Self::IndividualBased),
            "PopulationBased" => Ok(Self::PopulationBased),
            other => Err(Error::UnknownNotionOfSuccess(other.to_owned())),
        }
    }
}

/// One member of the Pareto-front approximation returned by each step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// The decision vector.
    pub point: Vec<f64>,
    /// The unpenalized objective values at `point`.
    pub value: Vec<f64>,
}
