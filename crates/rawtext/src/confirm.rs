//! Confirmation outcomes awaited from the external dialog surface.

/// The three ways a user can answer a destructive-action prompt. The
/// external surface shows the dialog and hands the answer in; session
/// operations consume it as straight-line logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Carry the action out.
    Proceed,
    /// Skip the guarded step but let the follow-up action continue.
    DeclineWithDiscard,
    /// Abort entirely, leaving every piece of state untouched.
    DeclineWithCancel,
}
