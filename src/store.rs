// src/store.rs
use std::{fmt, fs, io, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CatalogError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Weapon,
    Tome,
    Character,
}

impl EntityKind {
    /// Processing order of a full run.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Item,
        EntityKind::Weapon,
        EntityKind::Character,
        EntityKind::Tome,
    ];

    /// Plural key: catalog file stem, catalog list key and asset subdirectory.
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Weapon => "weapons",
            EntityKind::Tome => "tomes",
            EntityKind::Character => "characters",
        }
    }

    /// Accepts singular or plural, any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" | "items" => Some(EntityKind::Item),
            "weapon" | "weapons" => Some(EntityKind::Weapon),
            "tome" | "tomes" => Some(EntityKind::Tome),
            "character" | "characters" => Some(EntityKind::Character),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const NAME_KEY: &str = "name";
const NAME_ALIAS: &str = "displayName";
const IMAGE_KEY: &str = "image";
const IMAGE_ALIAS: &str = "imageRef";

/// One catalog record. Fields this crate does not own ride along in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "name", alias = "displayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "image", alias = "imageRef", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self { id: id.to_string(), display_name: display_name.to_string(), ..Self::default() }
    }
}

/// A loaded `<types>.json` file.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub kind: EntityKind,
    pub path: PathBuf,
    pub entries: Vec<CatalogEntry>,
    /// The whole document; the entry list is spliced back in on save.
    doc: Map<String, Value>,
    /// Entry objects as read. Save keeps their key spelling and key order.
    originals: Vec<Map<String, Value>>,
    /// Spellings the file uses, for entries that did not carry the key yet.
    name_key: &'static str,
    image_key: &'static str,
}

impl Catalog {
    pub fn path_for(data_dir: &Path, kind: EntityKind) -> PathBuf {
        data_dir.join(format!("{}.json", kind.key()))
    }

    /// On-disk object for `entries[i]`: the original object with its values
    /// refreshed in place, new keys appended, and a cleared image dropped.
    fn entry_object(&self, i: usize, entry: &CatalogEntry) -> Result<Value, serde_json::Error> {
        let Value::Object(fresh) = serde_json::to_value(entry)? else {
            return Ok(Value::Object(Map::new()));
        };
        let original = self
            .originals
            .get(i)
            .filter(|o| o.get("id").and_then(Value::as_str).unwrap_or("") == entry.id);

        let name_key = spelling(original, NAME_KEY, NAME_ALIAS, self.name_key);
        let image_key = spelling(original, IMAGE_KEY, IMAGE_ALIAS, self.image_key);
        let mut renamed = Map::new();
        for (k, v) in fresh {
            let k = match k.as_str() {
                NAME_KEY => name_key.to_string(),
                IMAGE_KEY => image_key.to_string(),
                _ => k,
            };
            renamed.insert(k, v);
        }

        let mut out = Map::new();
        if let Some(orig) = original {
            for (k, v) in orig {
                match renamed.get(k) {
                    Some(new) => { out.insert(k.clone(), new.clone()); }
                    // blank id/name are not serialized; keep whatever was there
                    None if k != image_key => { out.insert(k.clone(), v.clone()); }
                    None => {}
                }
            }
        }
        for (k, v) in renamed {
            if !out.contains_key(&k) { out.insert(k, v); }
        }
        Ok(Value::Object(out))
    }
}

/// Key spelling for one entry: its own if it had one, else the file's.
fn spelling(
    original: Option<&Map<String, Value>>,
    key: &'static str,
    alias: &'static str,
    file_default: &'static str,
) -> &'static str {
    match original {
        Some(o) if o.contains_key(alias) => alias,
        Some(o) if o.contains_key(key) => key,
        _ => file_default,
    }
}

/// The spelling of the first entry that has either form; `key` when none do.
fn file_spelling(objects: &[Map<String, Value>], key: &'static str, alias: &'static str) -> &'static str {
    objects
        .iter()
        .find_map(|o| {
            if o.contains_key(alias) { Some(alias) } else if o.contains_key(key) { Some(key) } else { None }
        })
        .unwrap_or(key)
}

/// Load one catalog. `Ok(None)` when the file does not exist.
pub fn load_catalog(data_dir: &Path, kind: EntityKind) -> Result<Option<Catalog>, CatalogError> {
    let path = Catalog::path_for(data_dir, kind);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(CatalogError::Read { path, source }),
    };
    parse_catalog(kind, path, &text).map(Some)
}

pub fn parse_catalog(kind: EntityKind, path: PathBuf, text: &str) -> Result<Catalog, CatalogError> {
    let mut doc: Map<String, Value> = match serde_json::from_str(text) {
        Ok(d) => d,
        Err(source) => return Err(CatalogError::Parse { path, source }),
    };
    let list = match doc.get_mut(kind.key()) {
        Some(v) if v.is_array() => v.take(),
        _ => return Err(CatalogError::Shape { path, key: kind.key() }),
    };
    let originals: Vec<Map<String, Value>> = list
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_object().cloned()).collect())
        .unwrap_or_default();
    let entries: Vec<CatalogEntry> = match serde_json::from_value(list) {
        Ok(e) => e,
        Err(source) => return Err(CatalogError::Parse { path, source }),
    };

    let mut seen = std::collections::HashSet::new();
    for e in &entries {
        if !e.id.is_empty() && !seen.insert(e.id.as_str()) {
            log::warn!("{}: duplicate id `{}`", path.display(), e.id);
        }
    }

    let name_key = file_spelling(&originals, NAME_KEY, NAME_ALIAS);
    let image_key = file_spelling(&originals, IMAGE_KEY, IMAGE_ALIAS);
    Ok(Catalog { kind, path, entries, doc, originals, name_key, image_key })
}

/// Write back with two-space indentation. Keys this crate does not own, their
/// order and the file's own field spellings are kept.
pub fn save_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    let write_err = |source| CatalogError::Write { path: catalog.path.clone(), source };

    let mut doc = catalog.doc.clone();
    let list = catalog
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| catalog.entry_object(i, e))
        .collect::<Result<Vec<Value>, _>>()
        .map_err(|e| write_err(io::Error::other(e)))?;
    doc.insert(catalog.kind.key().to_string(), Value::Array(list));

    let mut text = serde_json::to_string_pretty(&Value::Object(doc))
        .map_err(|e| write_err(io::Error::other(e)))?;
    text.push('\n');

    if let Some(parent) = catalog.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(&catalog.path, text).map_err(write_err)
}
