use crate::{Result, Transcriber, Transcript, TranscriptionError};
use std::io::{BufRead, BufReader, Stdin};

/// Treats each input line as one utterance.
///
/// A blank line is unintelligible; end of input means the source is gone.
pub struct LineTranscriber<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineTranscriber<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl LineTranscriber<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead> Transcriber for LineTranscriber<R> {
    fn name(&self) -> &str {
        "stdin"
    }

    fn transcribe(&mut self) -> Result<Transcript> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        if n == 0 {
            return Err(TranscriptionError::Unavailable("end of input".into()));
        }
        let text = self.line.trim();
        if text.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }
        Ok(Transcript::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_lines_become_transcripts() -> anyhow::Result<()> {
        let mut t = LineTranscriber::new(Cursor::new("pick red place red\n\n  \nplace blue"));
        assert_eq!(t.transcribe()?.text, "pick red place red");
        assert!(matches!(
            t.transcribe(),
            Err(TranscriptionError::Unintelligible)
        ));
        assert!(matches!(
            t.transcribe(),
            Err(TranscriptionError::Unintelligible)
        ));
        assert_eq!(t.transcribe()?.text, "place blue");
        assert!(matches!(
            t.transcribe(),
            Err(TranscriptionError::Unavailable(_))
        ));
        Ok(())
    }
}
