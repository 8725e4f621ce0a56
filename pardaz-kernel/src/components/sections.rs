//! Home-page content sections.

use pardaz_api::{
    ComponentProps, ComponentTag, ContactFormProps, HeadingProps, ProcessProps, Props,
};

use super::SiteComponent;
use crate::html::escape;

fn heading_markup(anchor: &str, tag: ComponentTag, title: &str, subtitle: &str) -> String {
    format!(
        "<div id=\"{anchor}\" data-component=\"{tag}\"><h2>{}</h2><h3>{}</h3></div>",
        escape(title),
        escape(subtitle),
    )
}

// ============================================================================
// Hero - the home banner
// ============================================================================

pub struct Hero;

impl SiteComponent for Hero {
    fn tag(&self) -> ComponentTag {
        ComponentTag::Hero
    }

    fn configure(&self, _props: &Props) -> Result<ComponentProps, serde_json::Error> {
        Ok(ComponentProps::Hero)
    }

    fn markup(&self, _props: &ComponentProps) -> String {
        "<div id=\"hero\" data-component=\"Hero\"></div>".to_string()
    }
}

// ============================================================================
// Heading sections - Services, Portfolio, Testimonials, Blog
// ============================================================================

/// A listing section whose only props are a title/subtitle override.
pub struct HeadingSection {
    tag: ComponentTag,
    anchor: &'static str,
    title: &'static str,
    subtitle: &'static str,
}

impl HeadingSection {
    pub fn services() -> Self {
        Self {
            tag: ComponentTag::Services,
            anchor: "services",
            title: "خدمات ما",
            subtitle: "راهکارهای جامع دیجیتال",
        }
    }

    pub fn portfolio() -> Self {
        Self {
            tag: ComponentTag::Portfolio,
            anchor: "portfolio",
            title: "نمونه کارها",
            subtitle: "پروژه‌های منتخب",
        }
    }

    pub fn testimonials() -> Self {
        Self {
            tag: ComponentTag::Testimonials,
            anchor: "testimonials",
            title: "نظرات مشتریان ما",
            subtitle: "آنچه دیگران درباره تجربه همکاری با ما می‌گویند",
        }
    }

    pub fn blog() -> Self {
        Self {
            tag: ComponentTag::Blog,
            anchor: "blog",
            title: "وبلاگ",
            subtitle: "آخرین مقالات آموزشی",
        }
    }
}

impl SiteComponent for HeadingSection {
    fn tag(&self) -> ComponentTag {
        self.tag
    }

    fn configure(&self, props: &Props) -> Result<ComponentProps, serde_json::Error> {
        Ok(ComponentProps::Heading(ComponentProps::decode(props)?))
    }

    fn markup(&self, props: &ComponentProps) -> String {
        let default = HeadingProps::default();
        let heading = match props {
            ComponentProps::Heading(heading) => heading,
            _ => &default,
        };
        heading_markup(
            self.anchor,
            self.tag,
            heading.title.as_deref().unwrap_or(self.title),
            heading.subtitle.as_deref().unwrap_or(self.subtitle),
        )
    }
}

// ============================================================================
// Process - work steps
// ============================================================================

pub struct ProcessSection;

const PROCESS_TITLE: &str = "مراحل کار";
const PROCESS_SUBTITLE: &str = "مسیر موفقیت پروژه شما";

impl SiteComponent for ProcessSection {
    fn tag(&self) -> ComponentTag {
        ComponentTag::Process
    }

    fn configure(&self, props: &Props) -> Result<ComponentProps, serde_json::Error> {
        Ok(ComponentProps::Process(ComponentProps::decode(props)?))
    }

    fn markup(&self, props: &ComponentProps) -> String {
        let default = ProcessProps::default();
        let process = match props {
            ComponentProps::Process(process) => process,
            _ => &default,
        };
        let description = process
            .description
            .as_deref()
            .map(|d| format!("<p>{}</p>", escape(d)))
            .unwrap_or_default();
        format!(
            "<div id=\"process\" data-component=\"Process\"><h2>{}</h2><h3>{}</h3>{description}</div>",
            escape(process.title.as_deref().unwrap_or(PROCESS_TITLE)),
            escape(process.subtitle.as_deref().unwrap_or(PROCESS_SUBTITLE)),
        )
    }
}

// ============================================================================
// ContactForm - home-page contact form with sidebar
// ============================================================================

pub struct ContactForm;

const SIDEBAR_TITLE: &str = "اطلاعات تماس";
const SIDEBAR_DESC: &str = "برای مشاوره رایگان و دریافت دمو محصولات، با ما در ارتباط باشید.";
const FORM_TITLE: &str = "درخواست دمو";
const FORM_DESC: &str = "فرم زیر را پر کنید، کارشناسان ما در کمتر از ۲۴ ساعت با شما تماس می‌گیرند.";

impl SiteComponent for ContactForm {
    fn tag(&self) -> ComponentTag {
        ComponentTag::ContactForm
    }

    fn configure(&self, props: &Props) -> Result<ComponentProps, serde_json::Error> {
        Ok(ComponentProps::ContactForm(ComponentProps::decode(props)?))
    }

    fn markup(&self, props: &ComponentProps) -> String {
        let default = ContactFormProps::default();
        let form = match props {
            ComponentProps::ContactForm(form) => form,
            _ => &default,
        };
        format!(
            "<div id=\"contact\" data-component=\"ContactForm\">\
             <aside><h3>{}</h3><p>{}</p></aside>\
             <form><h3>{}</h3><p>{}</p></form></div>",
            escape(form.sidebar_title.as_deref().unwrap_or(SIDEBAR_TITLE)),
            escape(form.sidebar_desc.as_deref().unwrap_or(SIDEBAR_DESC)),
            escape(form.form_title.as_deref().unwrap_or(FORM_TITLE)),
            escape(form.form_desc.as_deref().unwrap_or(FORM_DESC)),
        )
    }
}
