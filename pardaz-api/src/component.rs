//! Component tags and the typed props each component family accepts.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ParseError, Props};

/// The fixed catalog of components a section can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentTag {
    Hero,
    Services,
    Process,
    Portfolio,
    Testimonials,
    Blog,
    ContactForm,
    ContentBlock,
    AboutHero,
    History,
    Team,
    Values,
    #[serde(rename = "AboutCTA")]
    AboutCta,
    ServicesList,
    ServicesHero,
    SolutionsHero,
    SolutionsGrid,
    PortfolioHero,
    PortfolioGrid,
    BlogHero,
    ContactHero,
    ContactMap,
    ContactFormPage,
}

impl ComponentTag {
    pub const ALL: [ComponentTag; 23] = [
        ComponentTag::Hero,
        ComponentTag::Services,
        ComponentTag::Process,
        ComponentTag::Portfolio,
        ComponentTag::Testimonials,
        ComponentTag::Blog,
        ComponentTag::ContactForm,
        ComponentTag::ContentBlock,
        ComponentTag::AboutHero,
        ComponentTag::History,
        ComponentTag::Team,
        ComponentTag::Values,
        ComponentTag::AboutCta,
        ComponentTag::ServicesList,
        ComponentTag::ServicesHero,
        ComponentTag::SolutionsHero,
        ComponentTag::SolutionsGrid,
        ComponentTag::PortfolioHero,
        ComponentTag::PortfolioGrid,
        ComponentTag::BlogHero,
        ComponentTag::ContactHero,
        ComponentTag::ContactMap,
        ComponentTag::ContactFormPage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentTag::Hero => "Hero",
            ComponentTag::Services => "Services",
            ComponentTag::Process => "Process",
            ComponentTag::Portfolio => "Portfolio",
            ComponentTag::Testimonials => "Testimonials",
            ComponentTag::Blog => "Blog",
            ComponentTag::ContactForm => "ContactForm",
            ComponentTag::ContentBlock => "ContentBlock",
            ComponentTag::AboutHero => "AboutHero",
            ComponentTag::History => "History",
            ComponentTag::Team => "Team",
            ComponentTag::Values => "Values",
            ComponentTag::AboutCta => "AboutCTA",
            ComponentTag::ServicesList => "ServicesList",
            ComponentTag::ServicesHero => "ServicesHero",
            ComponentTag::SolutionsHero => "SolutionsHero",
            ComponentTag::SolutionsGrid => "SolutionsGrid",
            ComponentTag::PortfolioHero => "PortfolioHero",
            ComponentTag::PortfolioGrid => "PortfolioGrid",
            ComponentTag::BlogHero => "BlogHero",
            ComponentTag::ContactHero => "ContactHero",
            ComponentTag::ContactMap => "ContactMap",
            ComponentTag::ContactFormPage => "ContactFormPage",
        }
    }

    /// Whether sections with this tag are rendered inside a styling
    /// envelope. Page-header variants manage their own full-bleed layout.
    pub fn placement(self) -> Placement {
        match self {
            ComponentTag::Hero
            | ComponentTag::Services
            | ComponentTag::Process
            | ComponentTag::Portfolio
            | ComponentTag::Testimonials
            | ComponentTag::Blog
            | ComponentTag::ContactForm
            | ComponentTag::ContentBlock => Placement::Wrapped,
            _ => Placement::Standalone,
        }
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ParseError::UnknownComponent(s.to_string()))
    }
}

/// How a rendered component is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Rendered inside an envelope derived from the section wrapper.
    Wrapped,
    /// Rendered as-is.
    Standalone,
}

/// Optional heading overrides (Services, Portfolio, Testimonials, Blog).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Overrides accepted by the process-steps section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Overrides accepted by the home-page contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_desc: Option<String>,
}

/// A free-form block of raw markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlockProps {
    #[serde(default)]
    pub content: String,
}

/// Typed view of a section's props, one variant per component family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComponentProps {
    /// The home hero reads its content from site data; it takes no props.
    Hero,
    Heading(HeadingProps),
    Process(ProcessProps),
    ContactForm(ContactFormProps),
    ContentBlock(ContentBlockProps),
    /// Page-header variants take no props.
    PageHeader,
}

impl ComponentProps {
    /// Decode a typed props struct from the open bag. Unknown keys are
    /// ignored; a known key with the wrong JSON type is an error.
    pub fn decode<T: DeserializeOwned>(props: &Props) -> Result<T, serde_json::Error> {
        serde_json::from_value(props.to_json())
    }
}
