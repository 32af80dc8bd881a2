use crate::{Result, Transcript};

/// Produces one transcript per call.
///
/// Implementations never retry on their own; `Unintelligible` and
/// `Unavailable` are returned to the caller as-is.
pub trait Transcriber {
    fn name(&self) -> &str;
    fn transcribe(&mut self) -> Result<Transcript>;
}

impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transcribe(&mut self) -> Result<Transcript> {
        (**self).transcribe()
    }
}
