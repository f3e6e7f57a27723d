use std::fmt;
use std::str::FromStr;

/// Which way a sentence is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ActiveToPassive,
    PassiveToActive,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid direction")]
pub struct InvalidDirection(pub String);

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::ActiveToPassive => "active_to_passive",
            Direction::PassiveToActive => "passive_to_active",
        }
    }

    /// Build the instruction sent to the completion API.
    pub fn prompt(self, text: &str) -> String {
        match self {
            Direction::ActiveToPassive => format!(
                "Convert this active voice sentence to passive voice. Only return the converted sentence, nothing else: {}",
                text
            ),
            Direction::PassiveToActive => format!(
                "Convert this passive voice sentence to active voice. Only return the converted sentence, nothing else: {}",
                text
            ),
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active_to_passive" => Ok(Direction::ActiveToPassive),
            "passive_to_active" => Ok(Direction::PassiveToActive),
            other => Err(InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
