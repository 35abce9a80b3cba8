// src/config/options.rs
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::ConfigError;
use crate::specs::SourceKind;
use crate::store::EntityKind;

/// Everything a run needs, passed explicitly into the pipeline.
///
/// Every field has a default, so a TOML file only lists what it overrides.
/// A section that is present replaces the default section as a whole
/// (e.g. an `[aliases.items]` table drops the bundled item aliases).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub data_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Prepended to `<types>/<file>` when writing image references.
    pub ref_prefix: String,
    /// Tried in this order, for listing pages and for fallback guesses.
    pub sources: Vec<SourceKind>,
    /// Accepted asset extensions, in preference order.
    pub extensions: Vec<String>,
    /// Extensions for `File:` namespace guesses, in order.
    pub file_extensions: Vec<String>,
    pub net: NetOptions,
    pub validation: ValidationOptions,
    pub extract: ExtractOptions,
    pub upscale: UpscaleOptions,
    /// `<types>` → `<id>` → known page titles.
    pub aliases: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            images_dir: PathBuf::from(IMAGES_DIR),
            ref_prefix: String::new(),
            sources: vec![SourceKind::MegabonkWiki, SourceKind::Fandom],
            extensions: strings(EXTENSIONS),
            file_extensions: strings(FILE_GUESS_EXTENSIONS),
            net: NetOptions::default(),
            validation: ValidationOptions::default(),
            extract: ExtractOptions::default(),
            upscale: UpscaleOptions::default(),
            aliases: default_aliases(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetOptions {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Pause after every request, successful or not.
    pub delay_ms: u64,
    /// Pause between entity kinds.
    pub kind_pause_ms: u64,
    pub max_bytes: u64,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout_secs: TIMEOUT_SECS,
            delay_ms: REQUEST_PAUSE_MS,
            kind_pause_ms: KIND_PAUSE_MS,
            max_bytes: MAX_BYTES,
        }
    }
}

impl NetOptions {
    pub fn delay(&self) -> Duration { Duration::from_millis(self.delay_ms) }
    pub fn kind_pause(&self) -> Duration { Duration::from_millis(self.kind_pause_ms) }
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub min_bytes: usize,
    /// Exact payload lengths of known non-content images (site logo, "missing" art).
    pub placeholder_sizes: Vec<usize>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { min_bytes: MIN_BYTES, placeholder_sizes: vec![WIKI_LOGO_BYTES] }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Case-insensitive substrings that disqualify an image URL.
    pub denylist: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { denylist: strings(DENYLIST) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpscaleOptions {
    pub kind: EntityKind,
    pub size: u32,
    pub webp: bool,
}

impl Default for UpscaleOptions {
    fn default() -> Self {
        Self { kind: EntityKind::Item, size: UPSCALE_SIZE, webp: true }
    }
}

impl Options {
    /// `path` if given; otherwise `./mb_scrape.toml` when it exists; otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(CONFIG_FILE);
                if !p.exists() { return Ok(Self::default()); }
                p
            }
        };
        let text = fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Known page titles for one entry, empty when none are configured.
    pub fn aliases_for(&self, kind: EntityKind, id: &str) -> &[String] {
        self.aliases
            .get(kind.key())
            .and_then(|m| m.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

fn default_aliases() -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
    match toml::from_str(DEFAULT_ALIASES) {
        Ok(a) => a,
        Err(e) => {
            log::error!("bundled alias table is malformed: {e}");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_aliases_parse() {
        let opts = Options::default();
        assert_eq!(opts.aliases_for(EntityKind::Item, "anvil")[0], "Anvil");
        assert_eq!(opts.aliases_for(EntityKind::Tome, "hp").len(), 4);
        assert!(opts.aliases_for(EntityKind::Character, "fox").is_empty());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let opts: Options = toml::from_str(
            r#"
            images_dir = "public/images"
            sources = ["fandom"]

            [net]
            delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(opts.images_dir, PathBuf::from("public/images"));
        assert_eq!(opts.sources, vec![SourceKind::Fandom]);
        assert_eq!(opts.net.delay_ms, 0);
        assert_eq!(opts.net.timeout_secs, TIMEOUT_SECS);
        assert_eq!(opts.validation.placeholder_sizes, vec![WIKI_LOGO_BYTES]);
        assert!(!opts.aliases.is_empty());
    }
}
