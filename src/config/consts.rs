// src/config/consts.rs

// Local layout
pub const DATA_DIR: &str = "data";
pub const IMAGES_DIR: &str = "src/images";
pub const CONFIG_FILE: &str = "mb_scrape.toml";

// Net
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) MegaBonkGuide/1.0";
pub const TIMEOUT_SECS: u64 = 30;
pub const REQUEST_PAUSE_MS: u64 = 300; // be polite
pub const KIND_PAUSE_MS: u64 = 1_000;
pub const MAX_BYTES: u64 = 20 * 1024 * 1024;

// Download validation
pub const MIN_BYTES: usize = 500;
pub const WIKI_LOGO_BYTES: usize = 5_320;

// Extensions, in preference order
pub const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
pub const FILE_GUESS_EXTENSIONS: &[&str] = &["png", "jpg"];

// Skip UI chrome on listing pages
pub const DENYLIST: &[&str] = &["logo", "icon-", "ui_", "stat_", "rarity"];

// Upscale
pub const UPSCALE_SIZE: u32 = 64;

pub const DEFAULT_ALIASES: &str = include_str!("aliases.toml");
