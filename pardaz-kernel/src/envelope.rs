//! Resolution of a section wrapper into a concrete styling envelope.

use pardaz_api::{Animation, Container, Padding, Wrapper};
use serde::Serialize;

/// Vertical spacing around a wrapped section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    None,
    Small,
    Medium,
    Large,
}

impl Spacing {
    pub fn class(self) -> &'static str {
        match self {
            Spacing::None => "",
            Spacing::Small => "py-8",
            Spacing::Medium => "py-16",
            Spacing::Large => "py-24",
        }
    }
}

impl From<Padding> for Spacing {
    fn from(padding: Padding) -> Self {
        match padding {
            Padding::None => Spacing::None,
            Padding::Sm => Spacing::Small,
            Padding::Md => Spacing::Medium,
            Padding::Lg => Spacing::Large,
        }
    }
}

/// Horizontal extent of a wrapped section's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// Fills the viewport.
    Viewport,
    /// Centered, capped at the container max width.
    Centered,
}

impl Width {
    pub fn class(self) -> &'static str {
        match self {
            Width::Viewport => "w-full",
            Width::Centered => "container mx-auto px-6",
        }
    }
}

impl From<Container> for Width {
    fn from(container: Container) -> Self {
        match container {
            Container::Full => Width::Viewport,
            Container::Boxed => Width::Centered,
        }
    }
}

/// Visual state at one end of an entrance transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    pub opacity: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Keyframe {
    const REST: Keyframe = Keyframe {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPreset {
    None,
    Fade,
    SlideUp,
    ZoomIn,
}

impl TransitionPreset {
    pub fn name(self) -> &'static str {
        match self {
            TransitionPreset::None => "none",
            TransitionPreset::Fade => "fade",
            TransitionPreset::SlideUp => "slide-up",
            TransitionPreset::ZoomIn => "zoom-in",
        }
    }
}

impl From<Animation> for TransitionPreset {
    fn from(animation: Animation) -> Self {
        match animation {
            Animation::None => TransitionPreset::None,
            Animation::Fade => TransitionPreset::Fade,
            Animation::Slide => TransitionPreset::SlideUp,
            Animation::Zoom => TransitionPreset::ZoomIn,
        }
    }
}

/// Entrance transition, played when the section first enters the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub preset: TransitionPreset,
    /// Never replayed when scrolling back.
    pub once: bool,
}

impl Transition {
    pub fn new(preset: TransitionPreset) -> Self {
        Self { preset, once: true }
    }

    /// Starting state, or `None` when nothing animates.
    pub fn initial(&self) -> Option<Keyframe> {
        match self.preset {
            TransitionPreset::None => None,
            TransitionPreset::Fade => Some(Keyframe {
                opacity: 0.0,
                ..Keyframe::REST
            }),
            TransitionPreset::SlideUp => Some(Keyframe {
                opacity: 0.0,
                offset_y: 50.0,
                scale: 1.0,
            }),
            TransitionPreset::ZoomIn => Some(Keyframe {
                opacity: 0.0,
                offset_y: 0.0,
                scale: 0.95,
            }),
        }
    }
}

/// The styling wrapped components are rendered inside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub spacing: Spacing,
    pub width: Width,
    pub transition: Transition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Envelope {
    pub fn resolve(wrapper: &Wrapper) -> Self {
        Self {
            spacing: wrapper.padding.into(),
            width: wrapper.container.into(),
            transition: Transition::new(wrapper.animation.into()),
            background: wrapper.bg_color.clone(),
        }
    }

    /// Classes of the outer `<section>` element.
    pub fn section_class(&self) -> String {
        let background = self.background.as_deref().unwrap_or("");
        format!("{} {}", background, self.spacing.class())
            .trim()
            .to_string()
    }
}
