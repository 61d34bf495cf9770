//! # Scan Workflow
//!
//! The camera itself lives outside this crate. What lives here is the small
//! state machine deciding *when* a scan is allowed to reach the ledger:
//!
//! ```text
//!                    granted
//! AwaitingPermission ───────► Idle ◄──────────────┐
//!         │                    │ start             │ consume / cancel
//!         │ denied             ▼                   │
//!         └──────► Denied    Scanning ─────────────┘
//! ```
//!
//! - Permission is asked once, at startup. `Denied` is terminal: scanning is
//!   gone for the session but manual adds keep working.
//! - A scan session delivers exactly one code. Consuming it returns to
//!   `Idle`, so a camera that keeps firing cannot add the same package twice.

use serde::Serialize;
use std::fmt;

use crate::error::{FreezerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    AwaitingPermission,
    Idle,
    Scanning,
    Denied,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanState::AwaitingPermission => "awaiting permission",
            ScanState::Idle => "idle",
            ScanState::Scanning => "scanning",
            ScanState::Denied => "denied",
        };
        f.write_str(label)
    }
}

/// Requests a presentation layer can make of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanAction {
    ResolvePermission,
    Start,
    Consume,
}

impl fmt::Display for ScanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanAction::ResolvePermission => "resolve permission",
            ScanAction::Start => "start a scan",
            ScanAction::Consume => "consume a scan",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct ScanSession {
    state: ScanState,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            state: ScanState::AwaitingPermission,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn can_scan(&self) -> bool {
        matches!(self.state, ScanState::Idle | ScanState::Scanning)
    }

    /// Applies the result of the one-time camera permission check.
    pub fn resolve_permission(&mut self, granted: bool) -> Result<ScanState> {
        if self.state != ScanState::AwaitingPermission {
            return Err(self.invalid(ScanAction::ResolvePermission));
        }
        self.state = if granted {
            ScanState::Idle
        } else {
            ScanState::Denied
        };
        Ok(self.state)
    }

    pub fn start(&mut self) -> Result<()> {
        match self.state {
            ScanState::Idle => {
                self.state = ScanState::Scanning;
                Ok(())
            }
            ScanState::Denied => Err(FreezerError::ScanUnavailable),
            _ => Err(self.invalid(ScanAction::Start)),
        }
    }

    /// Ends the session without producing a code. Returns whether a scan was
    /// actually in progress.
    pub fn cancel(&mut self) -> bool {
        if self.state == ScanState::Scanning {
            self.state = ScanState::Idle;
            true
        } else {
            false
        }
    }

    /// Accepts the single code a session is allowed to deliver.
    pub fn consume(&mut self, code: &str) -> Result<String> {
        if self.state != ScanState::Scanning {
            return Err(self.invalid(ScanAction::Consume));
        }
        self.state = ScanState::Idle;
        Ok(code.to_string())
    }

    fn invalid(&self, action: ScanAction) -> FreezerError {
        FreezerError::InvalidScanTransition {
            from: self.state,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> ScanSession {
        let mut session = ScanSession::new();
        session.resolve_permission(true).unwrap();
        session
    }

    #[test]
    fn starts_awaiting_permission() {
        let session = ScanSession::new();
        assert_eq!(session.state(), ScanState::AwaitingPermission);
        assert!(!session.can_scan());
    }

    #[test]
    fn granted_permission_goes_idle() {
        assert_eq!(idle().state(), ScanState::Idle);
    }

    #[test]
    fn denied_permission_is_terminal() {
        let mut session = ScanSession::new();
        assert_eq!(session.resolve_permission(false).unwrap(), ScanState::Denied);
        assert!(matches!(session.start(), Err(FreezerError::ScanUnavailable)));
        assert!(session.resolve_permission(true).is_err());
        assert_eq!(session.state(), ScanState::Denied);
    }

    #[test]
    fn cannot_start_before_permission() {
        let mut session = ScanSession::new();
        let err = session.start().unwrap_err();
        assert!(matches!(
            err,
            FreezerError::InvalidScanTransition {
                from: ScanState::AwaitingPermission,
                action: ScanAction::Start
            }
        ));
    }

    #[test]
    fn one_code_per_session() {
        let mut session = idle();
        session.start().unwrap();
        assert_eq!(session.consume("111").unwrap(), "111");
        assert_eq!(session.state(), ScanState::Idle);
        assert!(session.consume("111").is_err());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut session = idle();
        session.start().unwrap();
        assert!(session.cancel());
        assert_eq!(session.state(), ScanState::Idle);
        assert!(!session.cancel());
    }

    #[test]
    fn double_start_is_rejected() {
        let mut session = idle();
        session.start().unwrap();
        assert!(session.start().is_err());
        assert_eq!(session.state(), ScanState::Scanning);
    }

    #[test]
    fn transition_error_reads_well() {
        let mut session = idle();
        let err = session.consume("x").unwrap_err();
        assert_eq!(err.to_string(), "Cannot consume a scan while scanner is idle");
    }
}
