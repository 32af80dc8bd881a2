//! Single-pass extraction of command and colour queues

use crate::{Color, Command, TokenStream};
use serde::Serialize;
use std::collections::VecDeque;

/// Queues and per-category counts produced from one utterance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Commands in the order they were spoken
    pub commands: VecDeque<Command>,
    /// Colours in the order they were spoken
    pub colors: VecDeque<Color>,
    command_counts: [usize; 2],
    color_counts: [usize; 3],
}

impl Extraction {
    pub fn command_count(&self, command: Command) -> usize {
        self.command_counts[command.index()]
    }

    pub fn color_count(&self, color: Color) -> usize {
        self.color_counts[color.index()]
    }

    pub fn total_commands(&self) -> usize {
        self.command_counts.iter().sum()
    }

    pub fn total_colors(&self) -> usize {
        self.color_counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.colors.is_empty()
    }

    /// Split into the two queues, dropping the counters
    pub fn into_queues(self) -> (VecDeque<Command>, VecDeque<Color>) {
        (self.commands, self.colors)
    }
}

/// Scan `tokens` once, left to right, appending every vocabulary hit to its queue.
///
/// Tokens outside both vocabularies are skipped. The scan never fails.
pub fn extract(tokens: &TokenStream) -> Extraction {
    let mut out = Extraction::default();

    for token in tokens.iter() {
        let mut matched = false;
        if let Some(color) = Color::from_token(token) {
            out.color_counts[color.index()] += 1;
            out.colors.push_back(color);
            matched = true;
        }
        if let Some(command) = Command::from_token(token) {
            out.command_counts[command.index()] += 1;
            out.commands.push_back(command);
            matched = true;
        }
        if !matched {
            tracing::trace!(token, "dropping token outside vocabulary");
        }
    }

    tracing::debug!(
        commands = out.commands.len(),
        colors = out.colors.len(),
        "extracted intents from {} tokens",
        tokens.len()
    );
    out
}
