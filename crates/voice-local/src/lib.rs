//! voice-local: transcription backends that turn an utterance into text

mod error;
pub use error::{Result, TranscriptionError};

mod types;
pub use types::Transcript;

mod traits;
pub use traits::Transcriber;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{ScriptedReply, ScriptedTranscriber};

mod stdin;
pub use stdin::LineTranscriber;

pub mod plugin;
