//! Intent Parser for Voice Commands
//!
//! This crate turns transcribed utterances into the two FIFO queues consumed by
//! the pick-and-place orchestrator: one of [`Command`]s and one of [`Color`]s.
//! Matching is plain keyword lookup over closed vocabularies; every other word
//! in the utterance is dropped without error.

mod extractor;
mod tokens;
mod vocab;

pub use extractor::{extract, Extraction};
pub use tokens::TokenStream;
pub use vocab::{Color, Command};

/// Initialize the intent parser system
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Initializing Intent Parser system");
    Ok(())
}

/// Normalise a raw transcript and extract its command and colour queues
pub fn parse_utterance(text: &str) -> Extraction {
    extract(&TokenStream::from_transcript(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_utterances() {
        let cases = vec![
            ("pick red place red", 2, 2),
            ("please pick the green box", 1, 1),
            ("Pick BLUE, then place it in blue.", 2, 2),
            ("hello robot", 0, 0),
            ("", 0, 0),
        ];

        for (text, commands, colors) in cases {
            let result = parse_utterance(text);
            assert_eq!(result.commands.len(), commands, "commands for '{}'", text);
            assert_eq!(result.colors.len(), colors, "colours for '{}'", text);
        }
    }
}
