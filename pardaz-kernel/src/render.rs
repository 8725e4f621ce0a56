//! Page rendering: turns a page's section list into the ordered sequence of
//! configured components, each paired with its envelope when wrapped.

use pardaz_api::{ComponentProps, ComponentTag, PageId, Placement, Section, SectionId};
use serde::Serialize;

use crate::components::ComponentRegistry;
use crate::envelope::Envelope;
use crate::store::LayoutStore;

/// One component ready for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub id: SectionId,
    pub tag: ComponentTag,
    pub placement: Placement,
    pub props: ComponentProps,
    /// Present for wrapped components only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<Envelope>,
    pub markup: String,
}

/// Why a section produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SkipReason {
    Hidden,
    Unregistered,
    InvalidProps { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSection {
    pub id: SectionId,
    pub tag: ComponentTag,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of rendering one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    pub sections: Vec<RenderedSection>,
    pub skipped: Vec<SkippedSection>,
}

impl RenderReport {
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Rendered tags, in output order.
    pub fn tags(&self) -> Vec<ComponentTag> {
        self.sections.iter().map(|s| s.tag).collect()
    }
}

/// Renders section lists against a component registry.
pub struct PageRenderer<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> PageRenderer<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Render a page from the store. Unseeded pages render nothing.
    pub fn render_page(&self, store: &LayoutStore, page: PageId) -> RenderReport {
        self.render(store.sections(page))
    }

    /// Render a page addressed by its raw name.
    pub fn render_named(&self, store: &LayoutStore, name: &str) -> RenderReport {
        self.render(store.sections_named(name))
    }

    /// Render a section list in order. A failing section never affects the
    /// others.
    pub fn render(&self, sections: &[Section]) -> RenderReport {
        let mut report = RenderReport::default();

        for section in sections {
            match self.render_section(section) {
                Ok(rendered) => report.sections.push(rendered),
                Err(reason) => {
                    match &reason {
                        SkipReason::Hidden => {
                            tracing::trace!(id = %section.id, "Skipping hidden section");
                        }
                        SkipReason::Unregistered => {
                            tracing::debug!(
                                id = %section.id,
                                tag = %section.component,
                                "No component registered, skipping section"
                            );
                        }
                        SkipReason::InvalidProps { error } => {
                            tracing::warn!(
                                id = %section.id,
                                tag = %section.component,
                                "Invalid props, skipping section: {}",
                                error
                            );
                        }
                    }
                    report.skipped.push(SkippedSection {
                        id: section.id.clone(),
                        tag: section.component,
                        reason,
                    });
                }
            }
        }

        report
    }

    fn render_section(&self, section: &Section) -> Result<RenderedSection, SkipReason> {
        if !section.is_visible {
            return Err(SkipReason::Hidden);
        }

        let component = self
            .registry
            .get(section.component)
            .ok_or(SkipReason::Unregistered)?;

        let props = component
            .configure(&section.props)
            .map_err(|e| SkipReason::InvalidProps {
                error: e.to_string(),
            })?;

        let placement = component.placement();
        let envelope = match placement {
            Placement::Wrapped => Some(Envelope::resolve(&section.wrapper)),
            Placement::Standalone => None,
        };
        let markup = component.markup(&props);

        Ok(RenderedSection {
            id: section.id.clone(),
            tag: section.component,
            placement,
            props,
            envelope,
            markup,
        })
    }
}
