//! Sections: the renderable units of a page, and their styling wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ComponentTag, ParseError, Props};

/// Title given to content blocks created from the admin flow.
pub const NEW_CONTENT_BLOCK_TITLE: &str = "بلاک متن جدید";

/// Stable identifier of a section within its page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh identifier that is never handed out twice.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Content width of a wrapped section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    #[default]
    Boxed,
    Full,
}

/// Vertical spacing of a wrapped section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    None,
    Sm,
    Md,
    #[default]
    Lg,
}

/// Entrance animation of a wrapped section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    None,
    #[default]
    Fade,
    Slide,
    Zoom,
}

macro_rules! wrapper_value_from_str {
    ($ty:ident, $field:literal, { $($name:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(ParseError::InvalidWrapperValue {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wrapper_value_from_str!(Container, "container", { "boxed" => Boxed, "full" => Full });
wrapper_value_from_str!(Padding, "padding", { "none" => None, "sm" => Sm, "md" => Md, "lg" => Lg });
wrapper_value_from_str!(Animation, "animation", {
    "none" => None,
    "fade" => Fade,
    "slide" => Slide,
    "zoom" => Zoom,
});

/// Styling envelope settings of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wrapper {
    #[serde(default)]
    pub container: Container,
    #[serde(default)]
    pub padding: Padding,
    #[serde(
        default,
        alias = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub animation: Animation,
}

impl Default for Wrapper {
    fn default() -> Self {
        Self {
            container: Container::Boxed,
            padding: Padding::Lg,
            bg_color: None,
            animation: Animation::Fade,
        }
    }
}

impl Wrapper {
    pub fn new(container: Container, padding: Padding, animation: Animation) -> Self {
        Self {
            container,
            padding,
            bg_color: None,
            animation,
        }
    }

    pub fn with_bg(mut self, token: impl Into<String>) -> Self {
        self.bg_color = Some(token.into());
        self
    }

    /// Apply the fields set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &WrapperPatch) {
        if let Some(container) = patch.container {
            self.container = container;
        }
        if let Some(padding) = patch.padding {
            self.padding = padding;
        }
        if let Some(animation) = patch.animation {
            self.animation = animation;
        }
        if let Some(bg) = &patch.bg_color {
            self.bg_color = bg.clone();
        }
    }
}

/// Partial wrapper update. `bg_color: Some(None)` clears the background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperPatch {
    pub container: Option<Container>,
    pub padding: Option<Padding>,
    pub animation: Option<Animation>,
    pub bg_color: Option<Option<String>>,
}

impl WrapperPatch {
    pub fn is_empty(&self) -> bool {
        self == &WrapperPatch::default()
    }
}

fn default_visible() -> bool {
    true
}

/// One renderable unit within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    #[serde(alias = "componentTag")]
    pub component: ComponentTag,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(default)]
    pub wrapper: Wrapper,
}

impl Section {
    /// A visible section with empty props and the default wrapper.
    pub fn new(id: impl Into<SectionId>, component: ComponentTag, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component,
            title: title.into(),
            is_visible: true,
            props: Props::new(),
            wrapper: Wrapper::default(),
        }
    }

    /// A new content block as created from the admin panel.
    pub fn content_block(content: impl Into<String>) -> Self {
        let mut section = Self::new(
            SectionId::generate(),
            ComponentTag::ContentBlock,
            NEW_CONTENT_BLOCK_TITLE,
        )
        .with_wrapper(Wrapper::new(Container::Boxed, Padding::Md, Animation::Fade));
        section.props.merge("content", content.into());
        section
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = wrapper;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_wire_format() {
        let section = Section::new("h5", ComponentTag::Testimonials, "Testimonials").with_wrapper(
            Wrapper::new(Container::Full, Padding::None, Animation::Fade),
        );
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "h5",
                "component": "Testimonials",
                "title": "Testimonials",
                "isVisible": true,
                "wrapper": {"container": "full", "padding": "none", "animation": "fade"}
            })
        );
    }

    #[test]
    fn test_section_accepts_aliases_and_defaults() {
        let section: Section = serde_json::from_value(json!({
            "id": "x",
            "componentTag": "ContentBlock",
            "props": {"content": "<p>x</p>"},
            "wrapper": {"backgroundColor": "bg-secondary"}
        }))
        .unwrap();

        assert_eq!(section.component, ComponentTag::ContentBlock);
        assert!(section.is_visible);
        assert_eq!(section.props.get_str("content"), Some("<p>x</p>"));
        assert_eq!(section.wrapper.bg_color.as_deref(), Some("bg-secondary"));
        assert_eq!(section.wrapper.padding, Padding::Lg);
    }

    #[test]
    fn test_section_rejects_unknown_component() {
        let result: Result<Section, _> =
            serde_json::from_value(json!({"id": "x", "component": "Marquee"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_content_block_defaults() {
        let section = Section::content_block("<p>x</p>");
        assert_eq!(section.component, ComponentTag::ContentBlock);
        assert_eq!(section.title, NEW_CONTENT_BLOCK_TITLE);
        assert_eq!(section.wrapper.padding, Padding::Md);
        assert_eq!(section.wrapper.container, Container::Boxed);
        assert_eq!(section.wrapper.animation, Animation::Fade);
        assert_eq!(section.props.get_str("content"), Some("<p>x</p>"));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(SectionId::generate(), SectionId::generate());
    }

    #[test]
    fn test_wrapper_patch_applies_only_set_fields() {
        let mut wrapper = Wrapper::default().with_bg("bg-secondary");
        wrapper.apply(&WrapperPatch {
            animation: Some(Animation::Zoom),
            ..Default::default()
        });
        assert_eq!(wrapper.animation, Animation::Zoom);
        assert_eq!(wrapper.padding, Padding::Lg);
        assert_eq!(wrapper.bg_color.as_deref(), Some("bg-secondary"));

        wrapper.apply(&WrapperPatch {
            bg_color: Some(None),
            ..Default::default()
        });
        assert_eq!(wrapper.bg_color, None);
    }

    #[test]
    fn test_wrapper_values_parse() {
        assert_eq!("full".parse::<Container>().unwrap(), Container::Full);
        assert_eq!("sm".parse::<Padding>().unwrap(), Padding::Sm);
        assert_eq!("slide".parse::<Animation>().unwrap(), Animation::Slide);
        assert_eq!(
            "xl".parse::<Padding>(),
            Err(ParseError::InvalidWrapperValue {
                field: "padding",
                value: "xl".to_string()
            })
        );
    }
}
