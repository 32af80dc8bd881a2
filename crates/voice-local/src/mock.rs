use crate::{Result, Transcriber, Transcript, TranscriptionError};
use std::collections::VecDeque;

/// One scripted outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    Text(String),
    Unintelligible,
    Unavailable(String),
}

/// Replays a fixed list of replies, then reports the service as unavailable
#[derive(Debug, Default)]
pub struct ScriptedTranscriber {
    replies: VecDeque<ScriptedReply>,
}

impl ScriptedTranscriber {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = ScriptedReply>,
    {
        Self {
            replies: replies.into_iter().collect(),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new([ScriptedReply::Text(text.into())])
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Transcriber for ScriptedTranscriber {
    fn name(&self) -> &str {
        "scripted"
    }

    fn transcribe(&mut self) -> Result<Transcript> {
        match self.replies.pop_front() {
            Some(ScriptedReply::Text(text)) => {
                tracing::debug!(%text, "scripted transcript");
                Ok(Transcript::new(text))
            }
            Some(ScriptedReply::Unintelligible) => Err(TranscriptionError::Unintelligible),
            Some(ScriptedReply::Unavailable(reason)) => {
                Err(TranscriptionError::Unavailable(reason))
            }
            None => Err(TranscriptionError::Unavailable("script exhausted".into())),
        }
    }
}
