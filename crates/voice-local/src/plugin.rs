#[cfg(feature = "mock")]
use crate::ScriptedTranscriber;
use crate::{LineTranscriber, Transcriber};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TranscriberKind {
    /// Fixed utterance, useful for demos and tests
    Scripted(String),
    Stdin,
}

pub fn new_transcriber(kind: TranscriberKind) -> Result<Box<dyn Transcriber + Send>, String> {
    match kind {
        TranscriberKind::Scripted(text) => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(ScriptedTranscriber::from_text(text)))
            }
            #[cfg(not(feature = "mock"))]
            {
                let _ = text;
                Err("mock feature not enabled".into())
            }
        }
        TranscriberKind::Stdin => Ok(Box::new(LineTranscriber::stdin())),
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_backend() {
        let mut t = new_transcriber(TranscriberKind::Scripted("pick green".into())).unwrap();
        assert_eq!(t.name(), "scripted");
        assert_eq!(t.transcribe().unwrap().text, "pick green");
    }
}
