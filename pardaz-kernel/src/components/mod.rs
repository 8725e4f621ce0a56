//! Site components: the renderable units sections are bound to.
//!
//! Each component owns the typed view of its props and produces the markup
//! for one section. The page renderer looks components up by tag in a
//! [`ComponentRegistry`].

mod content;
mod headers;
mod registry;
mod sections;

pub use content::ContentBlock;
pub use headers::PageHeader;
pub use registry::ComponentRegistry;
pub use sections::{ContactForm, HeadingSection, Hero, ProcessSection};

use pardaz_api::{ComponentProps, ComponentTag, Placement, Props};

/// Trait for components that can render a section.
pub trait SiteComponent: Send + Sync {
    /// The tag this component renders.
    fn tag(&self) -> ComponentTag;

    /// Whether the component is rendered inside a styling envelope.
    fn placement(&self) -> Placement {
        self.tag().placement()
    }

    /// Derive the typed props from a section's open bag.
    fn configure(&self, props: &Props) -> Result<ComponentProps, serde_json::Error>;

    /// Markup for one configured instance.
    fn markup(&self, props: &ComponentProps) -> String;
}
