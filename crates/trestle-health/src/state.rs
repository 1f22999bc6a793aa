//! Component lifecycle states.

use std::fmt;

use serde::Serialize;

/// Canonical lifecycle state of a registered component.
///
/// Labels read from the registry are free-form text; [`classify`] folds
/// them into this enum. Anything unrecognized becomes [`Unknown`], which
/// is never ready: a component whose state cannot be interpreted must not
/// quietly pass a readiness probe.
///
/// [`classify`]: ComponentState::classify
/// [`Unknown`]: ComponentState::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentState {
    Stopped,
    Initialized,
    Started,
    Closed,
    /// A label no other variant matches.
    Unknown,
}

impl ComponentState {
    /// Fold a raw registry label into a canonical state.
    ///
    /// Matching is exact; labels are not trimmed or case-folded.
    pub fn classify(label: &str) -> Self {
        match label {
            "Stopped" => Self::Stopped,
            "Initialized" => Self::Initialized,
            "Started" => Self::Started,
            "Closed" => Self::Closed,
            _ => Self::Unknown,
        }
    }

    /// Whether a component in this state passes readiness. Only
    /// [`Started`](Self::Started) does.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Started)
    }

    /// The canonical label, as it appears in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Initialized => "Initialized",
            Self::Started => "Started",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_classify_to_their_state() {
        assert_eq!(ComponentState::classify("Stopped"), ComponentState::Stopped);
        assert_eq!(
            ComponentState::classify("Initialized"),
            ComponentState::Initialized
        );
        assert_eq!(ComponentState::classify("Started"), ComponentState::Started);
        assert_eq!(ComponentState::classify("Closed"), ComponentState::Closed);
    }

    #[test]
    fn unrecognized_labels_classify_to_unknown() {
        assert_eq!(ComponentState::classify("Paused"), ComponentState::Unknown);
        assert_eq!(ComponentState::classify(""), ComponentState::Unknown);
        // Exact matching: no case folding, no trimming.
        assert_eq!(ComponentState::classify("started"), ComponentState::Unknown);
        assert_eq!(
            ComponentState::classify(" Started "),
            ComponentState::Unknown
        );
    }

    #[test]
    fn only_started_is_ready() {
        assert!(ComponentState::Started.is_ready());
        assert!(!ComponentState::Stopped.is_ready());
        assert!(!ComponentState::Initialized.is_ready());
        assert!(!ComponentState::Closed.is_ready());
        assert!(!ComponentState::Unknown.is_ready());
    }

    #[test]
    fn display_matches_the_serialized_label() {
        for state in [
            ComponentState::Stopped,
            ComponentState::Initialized,
            ComponentState::Started,
            ComponentState::Closed,
            ComponentState::Unknown,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }
}
