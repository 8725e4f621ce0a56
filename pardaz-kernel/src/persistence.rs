//! SQLite-backed configuration sink.
//!
//! Layouts live in a key/value `site_config` table under the
//! `page_layouts` key, as one JSON object mapping page names to section
//! lists. Saving a page rewrites only that page's entry.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use chrono::Utc;
use pardaz_api::{PageId, Section};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value as JsonValue};

use crate::error::SinkError;
use crate::sink::ConfigSink;

/// Current database schema version.
const SCHEMA_VERSION: i32 = 1;

/// Config key holding every page layout.
pub const PAGE_LAYOUTS_KEY: &str = "page_layouts";

/// The configuration sink backed by SQLite.
pub struct SqliteSink {
    conn: Mutex<Connection>,
}

impl SqliteSink {
    /// Open or create the database at a specific path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;

        let sink = Self {
            conn: Mutex::new(conn),
        };
        sink.initialize()?;
        Ok(sink)
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let sink = Self {
            conn: Mutex::new(conn),
        };
        sink.initialize()?;
        Ok(sink)
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SinkError> {
        self.conn
            .lock()
            .map_err(|_| SinkError::Unavailable("connection lock poisoned".to_string()))
    }

    /// Initialize the database schema.
    fn initialize(&self) -> anyhow::Result<()> {
        let conn = self.connection()?;
        let version = schema_version(&conn)?;

        if version == 0 {
            create_schema(&conn)?;
        } else if version > SCHEMA_VERSION {
            anyhow::bail!(
                "site database schema v{} is newer than supported v{}",
                version,
                SCHEMA_VERSION
            );
        }

        Ok(())
    }

    /// Raw JSON stored under `key`, if any.
    pub fn get_config(&self, key: &str) -> Result<Option<JsonValue>, SinkError> {
        let conn = self.connection()?;
        read_config(&conn, key)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn put_config(&self, key: &str, value: &JsonValue) -> Result<(), SinkError> {
        let conn = self.connection()?;
        write_config(&conn, key, value)
    }
}

impl ConfigSink for SqliteSink {
    fn save(&self, page: PageId, sections: &[Section]) -> Result<(), SinkError> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;

        let mut layouts = stored_layouts(&tx)?;
        layouts.insert(page.to_string(), serde_json::to_value(sections)?);

        write_config(&tx, PAGE_LAYOUTS_KEY, &JsonValue::Object(layouts))?;
        tx.commit()?;
        Ok(())
    }

    fn load_all(&self) -> Result<BTreeMap<PageId, Vec<Section>>, SinkError> {
        let conn = self.connection()?;
        Ok(decode_layouts(stored_layouts(&conn)?))
    }
}

/// The raw page map stored under `page_layouts`. A blob that is not a JSON
/// object is treated as empty so the next save replaces it.
fn stored_layouts(conn: &Connection) -> Result<Map<String, JsonValue>, SinkError> {
    match read_config(conn, PAGE_LAYOUTS_KEY) {
        Ok(Some(JsonValue::Object(map))) => Ok(map),
        Ok(Some(other)) => {
            tracing::warn!(kind = %json_kind(&other), "page_layouts is not an object, ignoring it");
            Ok(Map::new())
        }
        Ok(None) => Ok(Map::new()),
        Err(SinkError::Json(e)) => {
            tracing::warn!("page_layouts is not valid JSON, ignoring it: {}", e);
            Ok(Map::new())
        }
        Err(e) => Err(e),
    }
}

/// Decode a page-name → section-list map.
///
/// Unknown page names and sections that fail to decode (unknown component
/// tag, wrong field types) are dropped with a warning; the rest of the page
/// is kept.
pub fn decode_layouts(map: Map<String, JsonValue>) -> BTreeMap<PageId, Vec<Section>> {
    let mut layouts = BTreeMap::new();

    for (name, value) in map {
        let page: PageId = match name.parse() {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(page = %name, "dropping stored layout: {}", e);
                continue;
            }
        };

        let JsonValue::Array(items) = value else {
            tracing::warn!(%page, "dropping stored layout: not a list");
            continue;
        };

        let sections = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Section>(item) {
                Ok(section) => Some(section),
                Err(e) => {
                    tracing::warn!(%page, index, "dropping stored section: {}", e);
                    None
                }
            })
            .collect();

        layouts.insert(page, sections);
    }

    layouts
}

fn schema_version(conn: &Connection) -> anyhow::Result<i32> {
    let exists: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |_| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !exists {
        return Ok(0);
    }

    let version: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(version.and_then(|v| v.parse().ok()).unwrap_or(0))
}

fn create_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        r#"
        -- Metadata table for schema versioning
        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Site configuration blobs (JSON text per key)
        CREATE TABLE IF NOT EXISTS site_config (
            config_key TEXT PRIMARY KEY,
            config_value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', '1');
        "#,
    )?;
    Ok(())
}

fn read_config(conn: &Connection, key: &str) -> Result<Option<JsonValue>, SinkError> {
    let text: Option<String> = conn
        .query_row(
            "SELECT config_value FROM site_config WHERE config_key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    match text {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

fn write_config(conn: &Connection, key: &str, value: &JsonValue) -> Result<(), SinkError> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO site_config (config_key, config_value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(config_key) DO UPDATE SET config_value = excluded.config_value,
                                               updated_at = excluded.updated_at",
        params![key, serde_json::to_string(value)?, now],
    )?;
    Ok(())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pardaz_api::ComponentTag;
    use serde_json::json;

    #[test]
    fn test_save_and_load() {
        let sink = SqliteSink::open_in_memory().unwrap();
        let blog = vec![Section::new("b1", ComponentTag::BlogHero, "Blog")];
        let services = vec![
            Section::new("s1", ComponentTag::ServicesHero, "Hero"),
            Section::content_block("<p>x</p>"),
        ];

        sink.save(PageId::Blog, &blog).unwrap();
        sink.save(PageId::Services, &services).unwrap();

        let all = sink.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[&PageId::Blog], blog);
        assert_eq!(all[&PageId::Services], services);
    }

    #[test]
    fn test_save_replaces_only_one_page() {
        let sink = SqliteSink::open_in_memory().unwrap();
        let blog = vec![Section::new("b1", ComponentTag::BlogHero, "Blog")];
        sink.save(PageId::Blog, &blog).unwrap();
        sink.save(PageId::Contact, &[]).unwrap();
        sink.save(PageId::Contact, &[Section::new("c1", ComponentTag::ContactHero, "C")])
            .unwrap();

        let all = sink.load_all().unwrap();
        assert_eq!(all[&PageId::Blog], blog);
        assert_eq!(all[&PageId::Contact].len(), 1);
    }

    #[test]
    fn test_empty_database_loads_nothing() {
        let sink = SqliteSink::open_in_memory().unwrap();
        assert!(sink.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_layouts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("site.db");
        {
            let sink = SqliteSink::open(&path).unwrap();
            sink.save(PageId::Home, &[Section::new("h1", ComponentTag::Hero, "Hero")])
                .unwrap();
        }

        let sink = SqliteSink::open(&path).unwrap();
        let all = sink.load_all().unwrap();
        assert_eq!(all[&PageId::Home][0].id.as_str(), "h1");
        assert_eq!(schema_version(&sink.connection().unwrap()).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.db");
        drop(SqliteSink::open(&path).unwrap());

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "UPDATE meta SET value = '2' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();
        drop(conn);

        assert!(SqliteSink::open(&path).is_err());
    }

    #[test]
    fn test_unparseable_layouts_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.db");
        let sink = SqliteSink::open(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO site_config (config_key, config_value, updated_at)
             VALUES (?1, '{truncated', '2024-01-01T00:00:00Z')",
            params![PAGE_LAYOUTS_KEY],
        )
        .unwrap();
        drop(conn);

        assert!(sink.load_all().unwrap().is_empty());

        sink.save(PageId::Home, &[Section::new("h1", ComponentTag::Hero, "Hero")])
            .unwrap();
        let all = sink.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[&PageId::Home][0].id.as_str(), "h1");
    }

    #[test]
    fn test_undecodable_entries_are_dropped() {
        let sink = SqliteSink::open_in_memory().unwrap();
        sink.put_config(
            PAGE_LAYOUTS_KEY,
            &json!({
                "home": [
                    {"id": "h1", "component": "Hero", "title": "Hero", "isVisible": true,
                     "wrapper": {"container": "full", "padding": "none", "animation": "fade"}},
                    {"id": "bad", "component": "Marquee", "title": "?", "isVisible": true},
                    {"id": "h2", "component": "Services", "title": "Services", "isVisible": false,
                     "wrapper": {"container": "boxed", "padding": "lg", "animation": "slide"}}
                ],
                "admin": [],
                "blog": "nope"
            }),
        )
        .unwrap();

        let all = sink.load_all().unwrap();
        assert_eq!(all.len(), 1);
        let ids: Vec<&str> = all[&PageId::Home].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["h1", "h2"]);
        assert!(!all[&PageId::Home][1].is_visible);
    }

    #[test]
    fn test_malformed_root_is_ignored_then_replaced() {
        let sink = SqliteSink::open_in_memory().unwrap();
        sink.put_config(PAGE_LAYOUTS_KEY, &json!([1, 2, 3])).unwrap();
        assert!(sink.load_all().unwrap().is_empty());

        sink.save(PageId::Blog, &[]).unwrap();
        let stored = sink.get_config(PAGE_LAYOUTS_KEY).unwrap().unwrap();
        assert_eq!(stored, json!({"blog": []}));
    }
}
