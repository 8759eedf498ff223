use strum_macros::Display;

/// Server wide actions, each a bare POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SystemAction {
    #[strum(serialize = "quietDown")]
    QuietDown,
    #[strum(serialize = "cancelQuietDown")]
    CancelQuietDown,
    /// restart right away, running builds are killed
    #[strum(serialize = "restart")]
    Restart,
    /// restart once running builds are done
    #[strum(serialize = "safeRestart")]
    SafeRestart,
    /// reload configuration from disk
    #[strum(serialize = "reload")]
    Reload,
}

impl jenkins_sdk::Endpoint for SystemAction {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        self.to_string()
    }
}
