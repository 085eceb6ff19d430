//! Route guard decision.

use crate::session::SessionStatus;

/// What the router should do with a navigation attempt at a guarded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// First provider notification has not arrived: render a neutral
    /// placeholder, never redirect.
    Pending,
    /// Not signed in: send the user to the entry page. The requested path is
    /// discarded, not preserved as a return target.
    RedirectToEntry,
    /// Signed in: render the requested page.
    Render,
}

/// Decide whether a guarded navigation may proceed.
///
/// Pure function of the current status. No IO, no panics, no state.
pub fn decide(status: SessionStatus) -> RouteDecision {
    match status {
        SessionStatus::Initializing => RouteDecision::Pending,
        SessionStatus::Unauthenticated => RouteDecision::RedirectToEntry,
        SessionStatus::Authenticated => RouteDecision::Render,
    }
}
