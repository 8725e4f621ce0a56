//! HTML emission for rendered pages.

use crate::render::{RenderReport, RenderedSection};

/// Escape text for use inside element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for one rendered section, inside its envelope when it has one.
pub fn render_section(section: &RenderedSection) -> String {
    let Some(envelope) = &section.envelope else {
        return section.markup.clone();
    };

    let mut inner_attrs = format!("class=\"{}\"", envelope.width.class());
    if envelope.transition.initial().is_some() {
        inner_attrs.push_str(&format!(
            " data-animate=\"{}\" data-animate-once=\"{}\"",
            envelope.transition.preset.name(),
            envelope.transition.once,
        ));
    }

    format!(
        "<section class=\"{}\"><div {}>{}</div></section>",
        escape(&envelope.section_class()),
        inner_attrs,
        section.markup,
    )
}

/// The body markup of a whole page, one section per line.
pub fn render_document(report: &RenderReport) -> String {
    report
        .sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentRegistry;
    use crate::render::PageRenderer;
    use pardaz_api::{Animation, ComponentTag, Container, Padding, Props, Section, Wrapper};

    fn render(sections: &[Section]) -> String {
        let registry = ComponentRegistry::new();
        render_document(&PageRenderer::new(&registry).render(sections))
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("سلام"), "سلام");
    }

    #[test]
    fn test_wrapped_section_markup() {
        let sections = [Section::new("h3", ComponentTag::Process, "Process")
            .with_wrapper(Wrapper::default().with_bg("bg-secondary"))];
        let html = render(&sections);
        assert!(html.starts_with(
            "<section class=\"bg-secondary py-24\"><div class=\"container mx-auto px-6\" \
             data-animate=\"fade\" data-animate-once=\"true\"><div id=\"process\""
        ));
        assert!(html.ends_with("</div></div></section>"));
    }

    #[test]
    fn test_no_animation_attributes_when_disabled() {
        let sections = [Section::new("h1", ComponentTag::Hero, "Hero").with_wrapper(
            Wrapper::new(Container::Full, Padding::None, Animation::None),
        )];
        assert_eq!(
            render(&sections),
            "<section class=\"\"><div class=\"w-full\">\
             <div id=\"hero\" data-component=\"Hero\"></div></div></section>"
        );
    }

    #[test]
    fn test_standalone_sections_are_bare() {
        let sections = [Section::new("b1", ComponentTag::BlogHero, "Blog hero")];
        assert_eq!(
            render(&sections),
            "<header data-component=\"BlogHero\"></header>"
        );
    }

    #[test]
    fn test_document_escapes_overrides_and_keeps_raw_content() {
        let sections = [
            Section::new("h6", ComponentTag::Blog, "Blog")
                .with_props(Props::from_pairs([("title", "<script>")])),
            Section::content_block("<em>raw</em>"),
        ];
        let html = render(&sections);
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("<h2>&lt;script&gt;</h2>"));
        assert!(lines[1].contains("<em>raw</em>"));
        assert!(lines[1].starts_with("<section class=\"py-16\">"));
    }
}
