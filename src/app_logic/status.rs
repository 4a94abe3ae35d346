/*
 * The seam through which the orchestrator talks back to the hosting player's
 * UI. Errors become blocking dialogs there; warnings are expected to surface
 * as non-blocking status lines so a failed settings write never interrupts
 * the user.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Information,
    Warning,
    Error,
}

pub trait StatusSinkOperations: Send + Sync {
    fn report(&self, severity: MessageSeverity, title: &str, message: &str);
}
