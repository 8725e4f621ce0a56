//! Execution of admin commands against an open site.

use std::io::Write;

use anyhow::{bail, Context, Result};
use pardaz_api::{PageId, Section, SectionId};
use pardaz_kernel::{decode_layouts, html, Site, SiteConfig};
use serde_json::Value as JsonValue;

use crate::cli::{Command, Format};

/// Run one command, writing its output to `out`.
pub fn run(site: &mut Site, config: &SiteConfig, command: Command, out: &mut impl Write) -> Result<()> {
    if command.mutates() && config.persist && !site.is_persistent() {
        bail!("layout database is unavailable, refusing to edit (use --ephemeral to edit in memory)");
    }

    let patch = command.wrapper_patch();

    match command {
        Command::Pages => {
            for page in PageId::ALL {
                let sections = site.store().sections(page);
                let hidden = sections.iter().filter(|s| !s.is_visible).count();
                writeln!(
                    out,
                    "{:<10} {:>2} sections ({} hidden)",
                    page.as_str(),
                    sections.len(),
                    hidden
                )?;
            }
        }

        Command::List { page, json } => {
            let sections = site.store().sections_named(&page);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(sections)?)?;
            } else {
                if sections.is_empty() {
                    tracing::warn!(%page, "page has no sections");
                }
                for (index, section) in sections.iter().enumerate() {
                    write_section_line(out, index, section)?;
                }
            }
        }

        Command::Toggle { page, id } => {
            let id = SectionId::from(id);
            if !site.store_mut().toggle_visibility(page, &id) {
                bail!(not_found(page, &id));
            }
            let visible = site
                .store()
                .section(page, &id)
                .map(|s| s.is_visible)
                .unwrap_or_default();
            writeln!(out, "{} is now {}", id, if visible { "shown" } else { "hidden" })?;
        }

        Command::Add { page, content } => {
            let id = site.store_mut().add_content_block(page, content);
            writeln!(out, "{id}")?;
        }

        Command::Remove { page, id } => {
            let id = SectionId::from(id);
            if !site.store_mut().remove_section(page, &id) {
                bail!(not_found(page, &id));
            }
        }

        Command::Move { page, id, index } => {
            let id = SectionId::from(id);
            if !site.store_mut().move_section(page, &id, index) {
                bail!(not_found(page, &id));
            }
        }

        Command::SetProp {
            page,
            id,
            key,
            value,
        } => {
            let id = SectionId::from(id);
            let value = serde_json::from_str(&value).unwrap_or(JsonValue::String(value));
            if !site.store_mut().update_section_props(page, &id, key, value) {
                bail!(not_found(page, &id));
            }
        }

        Command::Wrapper { page, id, .. } => {
            let id = SectionId::from(id);
            let patch = patch.unwrap_or_default();
            if patch.is_empty() {
                bail!("nothing to change: pass --container, --padding, --animation, --bg or --clear-bg");
            }
            if !site.store_mut().update_section_wrapper(page, &id, &patch) {
                bail!(not_found(page, &id));
            }
        }

        Command::Render { page, format } => {
            let report = site.render_named(&page);
            for skipped in &report.skipped {
                tracing::info!(id = %skipped.id, tag = %skipped.tag, "not rendered: {:?}", skipped.reason);
            }
            match format {
                Format::Html => writeln!(out, "{}", html::render_document(&report))?,
                Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
            }
        }

        Command::Reset { page } => match page {
            Some(page) => site.store_mut().reset_page(page),
            None => site.store_mut().reset_all(),
        },

        Command::Export => {
            let snapshot = site.store().snapshot();
            writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
        }

        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let JsonValue::Object(map) = serde_json::from_str::<JsonValue>(&text)
                .with_context(|| format!("Invalid layout file {:?}", file))?
            else {
                bail!("layout file {:?} must hold an object of page names", file);
            };
            for (page, sections) in decode_layouts(map) {
                let count = sections.len();
                site.store_mut().set_sections(page, sections);
                writeln!(out, "{page}: {count} sections")?;
            }
        }

        Command::Config => {
            writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
        }
    }

    Ok(())
}

fn write_section_line(out: &mut impl Write, index: usize, section: &Section) -> std::io::Result<()> {
    let w = &section.wrapper;
    writeln!(
        out,
        "{:>2}  {:<32} {:<16} {:<6} {:?}/{:?}/{:?}{}  {}",
        index,
        section.id.as_str(),
        section.component.as_str(),
        if section.is_visible { "shown" } else { "hidden" },
        w.container,
        w.padding,
        w.animation,
        w.bg_color.as_deref().map(|bg| format!(" {bg}")).unwrap_or_default(),
        section.title,
    )
}

fn not_found(page: PageId, id: &SectionId) -> String {
    format!("no section {id} on page {page}")
}
