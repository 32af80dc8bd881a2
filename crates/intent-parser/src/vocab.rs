//! Closed vocabularies recognised in an utterance

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands the operator can speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Pick,
    Place,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::Pick, Command::Place];

    /// Match a single lowercase token against the command vocabulary
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "pick" => Some(Command::Pick),
            "place" => Some(Command::Place),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Pick => "pick",
            Command::Place => "place",
        }
    }

    /// Stable slot used for per-command counters
    pub fn index(self) -> usize {
        match self {
            Command::Pick => 0,
            Command::Place => 1,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object and bin colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    /// Match a single lowercase token against the colour vocabulary
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }

    /// Stable slot used for per-colour counters
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_are_disjoint() {
        for cmd in Command::ALL {
            assert!(Color::from_token(cmd.as_str()).is_none());
            assert_eq!(Command::from_token(cmd.as_str()), Some(cmd));
        }
        for color in Color::ALL {
            assert!(Command::from_token(color.as_str()).is_none());
            assert_eq!(Color::from_token(color.as_str()), Some(color));
        }
    }

    #[test]
    fn test_matching_is_exact() {
        assert_eq!(Color::from_token("Red"), None);
        assert_eq!(Color::from_token("reddish"), None);
        assert_eq!(Command::from_token("picked"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Color::Green).unwrap();
        assert_eq!(json, "\"green\"");
        let cmd: Command = serde_json::from_str("\"place\"").unwrap();
        assert_eq!(cmd, Command::Place);
    }
}
