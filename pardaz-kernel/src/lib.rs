//! Pardaz Kernel - the page-layout engine.
//!
//! This crate contains everything behind the site's page layouts:
//! - Layout store (per-page ordered section lists)
//! - Component registry and built-in components
//! - Page renderer and wrapper resolution
//! - HTML emission
//! - Persistence (SQLite-backed site configuration)

pub mod catalog;
pub mod components;
pub mod config;
pub mod envelope;
pub mod html;
pub mod persistence;
pub mod persister;
pub mod render;
pub mod sink;
pub mod store;

mod error;

pub use components::{ComponentRegistry, SiteComponent};
pub use config::{ConfigOverrides, SiteConfig};
pub use envelope::{Envelope, Keyframe, Spacing, Transition, TransitionPreset, Width};
pub use error::{LayoutError, SinkError};
pub use persistence::{decode_layouts, SqliteSink};
pub use render::{PageRenderer, RenderReport, RenderedSection, SkipReason, SkippedSection};
pub use sink::{ConfigSink, MemorySink};
pub use store::LayoutStore;

use std::sync::Arc;

use anyhow::Context;
use pardaz_api::{PageId, SiteEvent};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// The site - owns the layout store, the component registry and the
/// persistence worker.
pub struct Site {
    store: LayoutStore,
    registry: ComponentRegistry,
    event_tx: broadcast::Sender<SiteEvent>,
    /// Background writer, present while persistence is attached.
    persister: Option<JoinHandle<()>>,
}

impl Site {
    /// Open the site described by `config`.
    ///
    /// A database that cannot be opened is not fatal: the site falls back to
    /// the default layouts and keeps changes in memory only.
    pub fn open(config: &SiteConfig) -> anyhow::Result<Self> {
        if !config.persist {
            tracing::info!("Persistence disabled, layouts are kept in memory");
            return Ok(Self::detached(config.event_capacity));
        }

        let path = config.resolved_db_path()?;
        match SqliteSink::open(&path) {
            Ok(sink) => {
                tracing::info!("Opened layout database at {:?}", path);
                Self::with_sink(Arc::new(sink), config.event_capacity)
            }
            Err(e) => {
                tracing::warn!("Failed to open layout database: {:#}", e);
                Ok(Self::detached(config.event_capacity))
            }
        }
    }

    /// A site with default layouts and no persistence.
    pub fn in_memory() -> Self {
        Self::detached(SiteConfig::default().event_capacity)
    }

    /// A site backed by `sink`. Stored layouts override the defaults page
    /// by page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_sink(sink: Arc<dyn ConfigSink>, event_capacity: usize) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .context("Persistence requires a tokio runtime")?;

        let stored = match sink.load_all() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to load stored layouts: {}", e);
                Default::default()
            }
        };

        let (event_tx, _) = broadcast::channel(event_capacity.max(1));
        let _guard = runtime.enter();
        let (handle, worker) = persister::spawn(sink, event_tx.clone());

        let store = LayoutStore::with_stored(stored)
            .with_persistence(handle)
            .with_events(event_tx.clone());

        Ok(Self {
            store,
            registry: ComponentRegistry::new(),
            event_tx,
            persister: Some(worker),
        })
    }

    fn detached(event_capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(event_capacity.max(1));
        Self {
            store: LayoutStore::with_defaults().with_events(event_tx.clone()),
            registry: ComponentRegistry::new(),
            event_tx,
            persister: None,
        }
    }

    /// Whether layout changes are being written to a sink.
    pub fn is_persistent(&self) -> bool {
        self.persister.is_some()
    }

    /// Get a reference to the layout store.
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Get a mutable reference to the layout store.
    pub fn store_mut(&mut self) -> &mut LayoutStore {
        &mut self.store
    }

    /// Get a reference to the component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Subscribe to site events.
    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.event_tx.subscribe()
    }

    /// Render one page.
    pub fn render(&self, page: PageId) -> RenderReport {
        PageRenderer::new(&self.registry).render_page(&self.store, page)
    }

    /// Render a page addressed by name; unknown names render nothing.
    pub fn render_named(&self, name: &str) -> RenderReport {
        PageRenderer::new(&self.registry).render_named(&self.store, name)
    }

    /// Render one page to HTML.
    pub fn render_html(&self, page: PageId) -> String {
        html::render_document(&self.render(page))
    }

    /// Stop accepting writes and wait until every queued write is done.
    pub async fn shutdown(mut self) {
        self.store.detach_persistence();
        if let Some(worker) = self.persister.take() {
            if let Err(e) = worker.await {
                tracing::error!("Persist worker failed: {}", e);
            }
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pardaz_api::{ComponentTag, SectionId};

    #[test]
    fn test_in_memory_site_has_defaults() {
        let site = Site::in_memory();
        assert!(!site.is_persistent());
        assert_eq!(site.store().sections(PageId::Home).len(), 7);
        assert_eq!(site.render(PageId::Home).len(), 7);
    }

    #[test]
    fn test_render_html_contains_sections() {
        let site = Site::in_memory();
        let html = site.render_html(PageId::Contact);
        assert_eq!(html, "<header data-component=\"ContactHero\"></header>");
    }

    #[test]
    fn test_with_sink_requires_runtime() {
        let sink = Arc::new(MemorySink::new());
        assert!(Site::with_sink(sink, 16).is_err());
    }

    #[test]
    fn test_ephemeral_config_opens_in_memory() {
        let site = Site::open(&SiteConfig::ephemeral()).unwrap();
        assert!(!site.is_persistent());
    }

    #[tokio::test]
    async fn test_shutdown_flushes_writes() {
        let sink = Arc::new(MemorySink::new());
        let mut site = Site::with_sink(sink.clone(), 16).unwrap();
        assert!(site.is_persistent());

        site.store_mut()
            .toggle_visibility(PageId::Home, &SectionId::from("h2"));
        site.shutdown().await;

        let stored = sink.stored(PageId::Home).unwrap();
        assert_eq!(stored[1].component, ComponentTag::Services);
        assert!(!stored[1].is_visible);
    }

    #[tokio::test]
    async fn test_events_reach_subscribers() {
        let sink = Arc::new(MemorySink::new());
        let mut site = Site::with_sink(sink, 16).unwrap();
        let mut rx = site.subscribe();

        site.store_mut().add_content_block(PageId::Blog, "<p>x</p>");

        assert_eq!(
            rx.recv().await.unwrap(),
            SiteEvent::LayoutChanged {
                page: PageId::Blog,
                version: 1
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            SiteEvent::Persisted {
                page: PageId::Blog,
                version: 1
            }
        );
        site.shutdown().await;
    }
}
