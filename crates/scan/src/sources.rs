//! Trait seams toward the UI layer.

/// Operator prompt for the line number of a separator-free scan.
pub trait LinePrompt {
    /// Ask for the line number belonging to `order_number`.
    ///
    /// `None` means the operator abandoned the prompt; the pending scan
    /// is dropped and no store mutation happens. The returned string may
    /// be empty.
    fn request_line_number(&mut self, order_number: &str) -> Option<String>;
}

/// Receives the found/not-found signal after each locate operation.
/// Audio or visual realization is the frontend's concern.
pub trait FeedbackSink {
    fn item_located(&mut self, found: bool);
}

/// Feedback sink that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn item_located(&mut self, _found: bool) {}
}

/// Adapter turning a closure into a [`LinePrompt`]; handy in tests and
/// one-off frontends.
#[derive(Debug)]
pub struct FnPrompt<F>(pub F);

impl<F: FnMut(&str) -> Option<String>> LinePrompt for FnPrompt<F> {
    fn request_line_number(&mut self, order_number: &str) -> Option<String> {
        (self.0)(order_number)
    }
}
