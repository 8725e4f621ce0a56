//! Site events emitted by the kernel to subscribers (admin UI, CLI, logs).

use serde::{Deserialize, Serialize};

use crate::PageId;

/// Events emitted by the layout kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SiteEvent {
    /// A page's section list was replaced in memory.
    LayoutChanged { page: PageId, version: u64 },

    /// A page snapshot reached the configuration sink.
    Persisted { page: PageId, version: u64 },

    /// Writing a page snapshot failed. The in-memory layout is kept.
    PersistFailed {
        page: PageId,
        version: u64,
        error: String,
    },
}

impl SiteEvent {
    pub fn page(&self) -> PageId {
        match self {
            SiteEvent::LayoutChanged { page, .. }
            | SiteEvent::Persisted { page, .. }
            | SiteEvent::PersistFailed { page, .. } => *page,
        }
    }

    /// The transient user-facing notification for this event, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            SiteEvent::LayoutChanged { .. } => None,
            SiteEvent::Persisted { page, .. } => Some(Notification {
                kind: NotificationKind::Success,
                message: format!("layout of {page} saved"),
            }),
            SiteEvent::PersistFailed { page, error, .. } => Some(Notification {
                kind: NotificationKind::Error,
                message: format!("saving layout of {page} failed: {error}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A short message shown to the editor and then dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}
