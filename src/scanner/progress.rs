/// Receiver for human-readable progress messages ("file 2 of 9", patent
/// counts, per-file errors). Carries no structured data.
pub trait ProgressSink {
    fn report(&self, message: &str);

    /// Called once after each archive file, whether or not it succeeded.
    fn file_done(&self) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _message: &str) {}
}
