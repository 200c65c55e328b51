//! # Navigation Commands
//!
//! The kiosk does not render pages, but it remembers which one the UI is
//! on so that `reset_all` can send it back to Home.

use tracing::debug;
use waffle_core::Page;

use super::checkout::PageResponse;
use crate::state::SessionState;

/// Moves to `page`.
pub fn navigate(session: &SessionState, page: Page) -> PageResponse {
    debug!(%page, "navigate command");

    session.with_session_mut(|s| {
        s.page = page;
        PageResponse { page }
    })
}

pub fn get_page(session: &SessionState) -> PageResponse {
    PageResponse {
        page: session.with_session(|s| s.page),
    }
}
