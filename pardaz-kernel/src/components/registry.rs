//! Component registry for looking up the component bound to a tag.

use std::collections::HashMap;

use pardaz_api::ComponentTag;

use super::{ContactForm, ContentBlock, HeadingSection, Hero, PageHeader, ProcessSection};
use super::SiteComponent;

/// Registry of the components the renderer can dispatch to.
pub struct ComponentRegistry {
    components: HashMap<ComponentTag, Box<dyn SiteComponent>>,
}

impl ComponentRegistry {
    /// Create a new registry with all built-in components registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Home content sections
        registry.register(Hero);
        registry.register(HeadingSection::services());
        registry.register(ProcessSection);
        registry.register(HeadingSection::portfolio());
        registry.register(HeadingSection::testimonials());
        registry.register(HeadingSection::blog());
        registry.register(ContactForm);

        // Editor blocks
        registry.register(ContentBlock);

        // Page headers
        for header in PageHeader::all() {
            registry.register(header);
        }

        registry
    }

    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a component, replacing any previous one for its tag.
    pub fn register<C: SiteComponent + 'static>(&mut self, component: C) {
        self.components.insert(component.tag(), Box::new(component));
    }

    /// Look up the component for a tag.
    pub fn get(&self, tag: ComponentTag) -> Option<&dyn SiteComponent> {
        self.components.get(&tag).map(|c| c.as_ref())
    }

    /// Check if a tag has a component.
    pub fn contains(&self, tag: ComponentTag) -> bool {
        self.components.contains_key(&tag)
    }

    /// All registered tags, in catalog order.
    pub fn tags(&self) -> impl Iterator<Item = ComponentTag> + '_ {
        ComponentTag::ALL
            .into_iter()
            .filter(|tag| self.components.contains_key(tag))
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_new_registers_fourteen_components() {
        let registry = ComponentRegistry::new();
        assert_eq!(registry.tags().count(), 14);
    }

    #[test]
    fn test_registry_default_same_as_new() {
        assert_eq!(
            ComponentRegistry::new().tags().count(),
            ComponentRegistry::default().tags().count()
        );
    }

    #[test]
    fn test_registry_contains_content_sections() {
        let registry = ComponentRegistry::new();
        for tag in [
            ComponentTag::Hero,
            ComponentTag::Services,
            ComponentTag::Process,
            ComponentTag::Portfolio,
            ComponentTag::Testimonials,
            ComponentTag::Blog,
            ComponentTag::ContactForm,
            ComponentTag::ContentBlock,
        ] {
            assert!(registry.contains(tag), "missing {tag}");
        }
    }

    #[test]
    fn test_registry_leaves_page_bodies_unregistered() {
        let registry = ComponentRegistry::new();
        assert!(!registry.contains(ComponentTag::History));
        assert!(!registry.contains(ComponentTag::ServicesList));
        assert!(!registry.contains(ComponentTag::ContactFormPage));
    }

    #[test]
    fn test_registry_get_returns_component() {
        let registry = ComponentRegistry::new();
        let component = registry.get(ComponentTag::BlogHero).unwrap();
        assert_eq!(component.tag(), ComponentTag::BlogHero);
        assert!(ComponentRegistry::empty().get(ComponentTag::BlogHero).is_none());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ComponentRegistry::empty();
        registry.register(HeadingSection::blog());
        registry.register(HeadingSection::blog());
        assert_eq!(registry.tags().collect::<Vec<_>>(), [ComponentTag::Blog]);
    }
}
