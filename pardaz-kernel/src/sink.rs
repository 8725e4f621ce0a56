//! Configuration sinks: where page layouts are persisted.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use pardaz_api::{PageId, Section};

use crate::error::SinkError;

/// Durable key/value surface for page layouts.
///
/// Writes are whole-page snapshots; the last write for a page wins.
pub trait ConfigSink: Send + Sync {
    /// Replace the stored list of `page`.
    fn save(&self, page: PageId, sections: &[Section]) -> Result<(), SinkError>;

    /// Every stored layout. Pages never saved are absent.
    fn load_all(&self) -> Result<BTreeMap<PageId, Vec<Section>>, SinkError>;
}

/// In-process sink, used for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemorySink {
    layouts: Mutex<BTreeMap<PageId, Vec<Section>>>,
    failing: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The stored list of one page.
    pub fn stored(&self, page: PageId) -> Option<Vec<Section>> {
        self.layouts
            .lock()
            .ok()
            .and_then(|layouts| layouts.get(&page).cloned())
    }
}

impl ConfigSink for MemorySink {
    fn save(&self, page: PageId, sections: &[Section]) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("memory sink switched off".to_string()));
        }
        let mut layouts = self
            .layouts
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink poisoned".to_string()))?;
        layouts.insert(page, sections.to_vec());
        Ok(())
    }

    fn load_all(&self) -> Result<BTreeMap<PageId, Vec<Section>>, SinkError> {
        let layouts = self
            .layouts
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink poisoned".to_string()))?;
        Ok(layouts.clone())
    }
}
