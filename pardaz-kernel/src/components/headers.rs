//! Page-header variants.
//!
//! Each one stands for the whole static body of its page and manages its own
//! full-bleed layout, so it is never wrapped.

use pardaz_api::{ComponentProps, ComponentTag, Props};

use super::SiteComponent;

pub struct PageHeader {
    tag: ComponentTag,
}

impl PageHeader {
    /// The header component for `tag`, if `tag` is a page-header variant.
    pub fn new(tag: ComponentTag) -> Option<Self> {
        match tag {
            ComponentTag::AboutHero
            | ComponentTag::ServicesHero
            | ComponentTag::SolutionsHero
            | ComponentTag::PortfolioHero
            | ComponentTag::BlogHero
            | ComponentTag::ContactHero => Some(Self { tag }),
            _ => None,
        }
    }

    /// Every page-header variant.
    pub fn all() -> impl Iterator<Item = PageHeader> {
        ComponentTag::ALL.into_iter().filter_map(PageHeader::new)
    }
}

impl SiteComponent for PageHeader {
    fn tag(&self) -> ComponentTag {
        self.tag
    }

    fn configure(&self, _props: &Props) -> Result<ComponentProps, serde_json::Error> {
        Ok(ComponentProps::PageHeader)
    }

    fn markup(&self, _props: &ComponentProps) -> String {
        format!("<header data-component=\"{}\"></header>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pardaz_api::Placement;

    #[test]
    fn test_six_header_variants() {
        let tags: Vec<ComponentTag> = PageHeader::all().map(|h| h.tag()).collect();
        assert_eq!(tags.len(), 6);
        assert!(tags.contains(&ComponentTag::ContactHero));
        assert!(PageHeader::new(ComponentTag::Hero).is_none());
    }

    #[test]
    fn test_headers_are_standalone() {
        for header in PageHeader::all() {
            assert_eq!(header.placement(), Placement::Standalone);
        }
    }
}
