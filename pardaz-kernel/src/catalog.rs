//! The default layout every page is seeded with.

use std::collections::BTreeMap;

use pardaz_api::{Animation, ComponentTag, Container, PageId, Padding, Section, Wrapper};

const SECONDARY_BG: &str = "bg-secondary";

fn boxed() -> Wrapper {
    Wrapper::default()
}

fn shaded() -> Wrapper {
    Wrapper::default().with_bg(SECONDARY_BG)
}

fn full_bleed() -> Wrapper {
    Wrapper::new(Container::Full, Padding::None, Animation::Fade)
}

fn section(id: &str, tag: ComponentTag, title: &str, wrapper: Wrapper) -> Section {
    Section::new(id, tag, title).with_wrapper(wrapper)
}

/// The seeded section list for `page`.
pub fn default_sections(page: PageId) -> Vec<Section> {
    use ComponentTag::*;

    match page {
        PageId::Home => vec![
            section("h1", Hero, "هیرو (بنر اصلی)", full_bleed()),
            section("h2", Services, "خدمات ما", boxed()),
            section("h3", Process, "مراحل کار", shaded()),
            section("h4", Portfolio, "نمونه کارها", boxed()),
            section("h5", Testimonials, "نظرات مشتریان", full_bleed()),
            section("h6", Blog, "آخرین مقالات", shaded()),
            section("h7", ContactForm, "فرم تماس", boxed()),
        ],
        PageId::About => vec![
            section("a1", AboutHero, "معرفی", boxed()),
            section("a2", History, "تاریخچه", shaded()),
            section("a3", Team, "تیم ما", boxed()),
            section("a4", Values, "ارزش‌ها", shaded()),
            section("a5", AboutCta, "دعوت به همکاری", full_bleed()),
        ],
        PageId::Services => vec![
            section("s1", ServicesHero, "هیرو خدمات", boxed()),
            section("s2", ServicesList, "لیست خدمات", boxed()),
        ],
        PageId::Solutions => vec![
            section("sol1", SolutionsHero, "هیرو راهکارها", boxed()),
            section("sol2", SolutionsGrid, "لیست محصولات", boxed()),
        ],
        PageId::Portfolio => vec![
            section("p1", PortfolioHero, "هیرو نمونه‌کار", boxed()),
            section("p2", PortfolioGrid, "لیست پروژه‌ها", boxed()),
        ],
        PageId::Blog => vec![section("b1", BlogHero, "هیرو وبلاگ", boxed())],
        PageId::Contact => vec![
            section("c1", ContactHero, "هیرو تماس", boxed()),
            section("c2", ContactMap, "نقشه و اطلاعات", boxed()),
            section("c3", ContactFormPage, "فرم ارسال پیام", boxed()),
        ],
    }
}

/// Default layouts for every page.
pub fn default_layouts() -> BTreeMap<PageId, Vec<Section>> {
    PageId::ALL
        .into_iter()
        .map(|page| (page, default_sections(page)))
        .collect()
}
