//! The layout store: page → ordered section list.
//!
//! Every mutation is a synchronous whole-list replace of one page, followed
//! by a best-effort persist of the new list and a `LayoutChanged` event.

use std::collections::{BTreeMap, HashSet};

use pardaz_api::{PageId, Props, Section, SectionId, SiteEvent, WrapperPatch};
use serde_json::Value as JsonValue;
use tokio::sync::broadcast;

use crate::catalog;
use crate::error::LayoutError;
use crate::persister::{PersistHandle, PersistJob};

/// One page's sections plus a counter bumped on every replace.
#[derive(Debug, Clone, Default)]
struct PageLayout {
    sections: Vec<Section>,
    version: u64,
}

/// Authoritative in-memory layouts for every page.
pub struct LayoutStore {
    pages: BTreeMap<PageId, PageLayout>,
    persist: Option<PersistHandle>,
    events: Option<broadcast::Sender<SiteEvent>>,
}

impl LayoutStore {
    /// A store with no seeded pages.
    pub fn empty() -> Self {
        Self {
            pages: BTreeMap::new(),
            persist: None,
            events: None,
        }
    }

    /// A store seeded with `layouts`.
    pub fn new(layouts: BTreeMap<PageId, Vec<Section>>) -> Self {
        let pages = layouts
            .into_iter()
            .map(|(page, sections)| (page, PageLayout { sections, version: 0 }))
            .collect();
        Self {
            pages,
            persist: None,
            events: None,
        }
    }

    /// A store seeded with the default catalog.
    pub fn with_defaults() -> Self {
        Self::new(catalog::default_layouts())
    }

    /// A store seeded with the default catalog, each page overridden by its
    /// stored list when one exists.
    pub fn with_stored(stored: BTreeMap<PageId, Vec<Section>>) -> Self {
        let mut layouts = catalog::default_layouts();
        layouts.extend(stored);
        Self::new(layouts)
    }

    /// Send every subsequent page replace to `handle`.
    pub fn with_persistence(mut self, handle: PersistHandle) -> Self {
        self.persist = Some(handle);
        self
    }

    /// Emit `LayoutChanged` on `events` after every page replace.
    pub fn with_events(mut self, events: broadcast::Sender<SiteEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Drop the persist handle so the persist worker can drain and exit.
    pub fn detach_persistence(&mut self) {
        self.persist = None;
    }

    /// The ordered section list of `page`; empty if the page has no layout.
    pub fn sections(&self, page: PageId) -> &[Section] {
        self.pages
            .get(&page)
            .map(|layout| layout.sections.as_slice())
            .unwrap_or(&[])
    }

    /// Like [`sections`](Self::sections) for a raw page name. Unknown names
    /// yield an empty list.
    pub fn sections_named(&self, name: &str) -> &[Section] {
        match name.parse::<PageId>() {
            Ok(page) => self.sections(page),
            Err(_) => &[],
        }
    }

    pub fn section(&self, page: PageId, id: &SectionId) -> Option<&Section> {
        self.sections(page).iter().find(|s| &s.id == id)
    }

    /// Number of replaces applied to `page` since the store was built.
    pub fn version(&self, page: PageId) -> u64 {
        self.pages.get(&page).map(|layout| layout.version).unwrap_or(0)
    }

    /// Copy of every page layout.
    pub fn snapshot(&self) -> BTreeMap<PageId, Vec<Section>> {
        self.pages
            .iter()
            .map(|(page, layout)| (*page, layout.sections.clone()))
            .collect()
    }

    /// Replace the whole list of `page`. Last write wins.
    pub fn set_sections(&mut self, page: PageId, sections: Vec<Section>) -> u64 {
        warn_duplicate_ids(page, &sections);

        let layout = self.pages.entry(page).or_default();
        layout.sections = sections;
        layout.version += 1;
        let version = layout.version;

        tracing::debug!(%page, version, count = layout.sections.len(), "layout replaced");

        // LayoutChanged for a version precedes its persist outcome.
        if let Some(events) = &self.events {
            let _ = events.send(SiteEvent::LayoutChanged { page, version });
        }
        if let Some(persist) = &self.persist {
            let job = PersistJob {
                page,
                version,
                sections: layout.sections.clone(),
            };
            if !persist.submit(job) {
                tracing::warn!(%page, version, "persist queue closed, change kept in memory only");
            }
        }

        version
    }

    /// Replace the whole list of `page` only if nobody replaced it since
    /// `expected` was read from [`version`](Self::version).
    pub fn set_sections_checked(
        &mut self,
        page: PageId,
        expected: u64,
        sections: Vec<Section>,
    ) -> Result<u64, LayoutError> {
        let actual = self.version(page);
        if actual != expected {
            return Err(LayoutError::Conflict {
                page,
                expected,
                actual,
            });
        }
        Ok(self.set_sections(page, sections))
    }

    /// Apply `edit` to the section `id` of `page` and replace the list.
    /// Returns `false` without touching anything if the section is missing.
    fn edit_section(
        &mut self,
        page: PageId,
        id: &SectionId,
        edit: impl FnOnce(&mut Section),
    ) -> bool {
        let mut sections = self.sections(page).to_vec();
        let Some(section) = sections.iter_mut().find(|s| &s.id == id) else {
            tracing::debug!(%page, %id, "section not found");
            return false;
        };
        edit(section);
        self.set_sections(page, sections);
        true
    }

    /// Flip the visibility of one section.
    pub fn toggle_visibility(&mut self, page: PageId, id: &SectionId) -> bool {
        self.edit_section(page, id, |section| section.is_visible = !section.is_visible)
    }

    /// Merge `{key: value}` into one section's props.
    pub fn update_section_props(
        &mut self,
        page: PageId,
        id: &SectionId,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> bool {
        let key = key.into();
        let value = value.into();
        self.edit_section(page, id, move |section| section.props.merge(key, value))
    }

    /// Merge several keys into one section's props.
    pub fn merge_section_props(&mut self, page: PageId, id: &SectionId, patch: Props) -> bool {
        self.edit_section(page, id, move |section| section.props.merge_all(patch))
    }

    /// Change the wrapper fields set in `patch`.
    pub fn update_section_wrapper(
        &mut self,
        page: PageId,
        id: &SectionId,
        patch: &WrapperPatch,
    ) -> bool {
        self.edit_section(page, id, |section| section.wrapper.apply(patch))
    }

    /// Append `section` to the end of `page`.
    pub fn add_section(&mut self, page: PageId, section: Section) {
        let mut sections = self.sections(page).to_vec();
        sections.push(section);
        self.set_sections(page, sections);
    }

    /// Append a new content block holding `content`; returns its id.
    pub fn add_content_block(&mut self, page: PageId, content: impl Into<String>) -> SectionId {
        let section = Section::content_block(content);
        let id = section.id.clone();
        self.add_section(page, section);
        id
    }

    /// Remove one section. Irreversible.
    pub fn remove_section(&mut self, page: PageId, id: &SectionId) -> bool {
        let sections = self.sections(page);
        if !sections.iter().any(|s| &s.id == id) {
            return false;
        }
        let remaining = sections.iter().filter(|s| &s.id != id).cloned().collect();
        self.set_sections(page, remaining);
        true
    }

    /// Move one section to `to_index` (clamped to the end of the list).
    pub fn move_section(&mut self, page: PageId, id: &SectionId, to_index: usize) -> bool {
        let mut sections = self.sections(page).to_vec();
        let Some(from) = sections.iter().position(|s| &s.id == id) else {
            return false;
        };
        let section = sections.remove(from);
        let to = to_index.min(sections.len());
        sections.insert(to, section);
        self.set_sections(page, sections);
        true
    }

    /// Restore the default catalog of one page.
    pub fn reset_page(&mut self, page: PageId) {
        self.set_sections(page, catalog::default_sections(page));
    }

    /// Restore the default catalog of every page.
    pub fn reset_all(&mut self) {
        for page in PageId::ALL {
            self.reset_page(page);
        }
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn warn_duplicate_ids(page: PageId, sections: &[Section]) {
    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(&section.id) {
            tracing::warn!(%page, id = %section.id, "duplicate section id in layout");
        }
    }
}
