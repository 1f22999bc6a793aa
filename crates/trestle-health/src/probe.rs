//! Probe routing.
//!
//! Which probe a request means is decided by where under the mount it
//! landed: paths ending in `/alive` are liveness, paths ending in
//! `/ready` are readiness, anything else is the full report.

use std::sync::LazyLock;

use regex::Regex;

/// The three probes a health endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Process-is-up check. Never touches the registry.
    Liveness,
    /// Everything-started check. The first failure wins.
    Readiness,
    /// Full component tree with per-component states.
    FullReport,
}

const LIVENESS_PATTERN: &str = r"^.*/alive$";
const READINESS_PATTERN: &str = r"^.*/ready$";
const REPORT_PATTERN: &str = r"^.*$";

/// Ordered route table. Liveness and readiness are checked before the
/// catch-all, so order is load-bearing.
static URL_PATTERNS: LazyLock<Vec<(Regex, ProbeKind)>> = LazyLock::new(|| {
    vec![
        (Regex::new(LIVENESS_PATTERN).unwrap(), ProbeKind::Liveness),
        (Regex::new(READINESS_PATTERN).unwrap(), ProbeKind::Readiness),
        (Regex::new(REPORT_PATTERN).unwrap(), ProbeKind::FullReport),
    ]
});

/// Decide which probe a request path addresses.
pub fn route(path: &str) -> ProbeKind {
    for (pattern, kind) in URL_PATTERNS.iter() {
        if pattern.is_match(path) {
            return *kind;
        }
    }
    // The catch-all above matches every path.
    ProbeKind::FullReport
}
