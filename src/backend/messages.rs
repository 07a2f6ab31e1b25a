use crate::normalize::VideoResult;

/// Commands sent from the consuming surface to the controller
#[derive(Debug, Clone)]
pub enum ControllerCommand {
    /// Track the live input value; no validation fires on keystrokes
    InputChanged(String),
    /// Explicit user submission, carrying the input element's raw value
    Submit { element_value: String },
    PasteFromClipboard,
    // System
    Shutdown,
}

/// Events sent from the controller back to the consuming surface
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// Tracked input changed on the controller's initiative (paste)
    InputUpdated(String),
    /// Validation failed; transient-notification text
    SubmissionRejected(String),

    // Resolution life-cycle
    ResolutionStarted,
    ResolutionCompleted(Result<VideoResult, String>),

    // System
    Error(String),
}

/// Outcome of the most recent accepted submission.
///
/// Exactly one outcome is live at a time; a new submission replaces it
/// wholesale.
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    Pending,
    Success(VideoResult),
    Failure(String),
}
