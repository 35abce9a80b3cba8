// src/scrape/fallback.rs
//! Per-entry guessing for whatever the listing pages did not cover.
//!
//! For each configured source, in order, the guesses are:
//! 1. page titles: the alias table's titles, then the id title-cased
//!    (`joes_dagger` → `Joes_Dagger`) unless an alias already spelled it;
//! 2. `File:` pages: `Joes_Dagger` then `JoesDagger`, each with every guess
//!    extension in order.
//!
//! A page guess downloads the first qualifying image on the page; a file guess
//! only one whose URL carries the stem. Every failure is logged at debug and
//! the walk moves on. The first validated download ends it.

use std::{fmt, path::PathBuf};

use super::Context;
use crate::config::Options;
use crate::core::sanitize::title_case_id;
use crate::error::FetchError;
use crate::specs::{ImageCandidate, Source};
use crate::store::{CatalogEntry, EntityKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guess {
    Page { title: String },
    File { stem: String, ext: String },
}

impl Guess {
    pub fn url(&self, source: &dyn Source) -> String {
        match self {
            Guess::Page { title } => source.page_url(title),
            Guess::File { stem, ext } => source.file_url(stem, ext),
        }
    }

    /// Does `cand` answer this guess?
    fn accepts(&self, cand: &ImageCandidate) -> bool {
        let url = cand.source_url.to_ascii_lowercase();
        match self {
            // skip 32px icon thumbnails sitting next to the real picture
            Guess::Page { .. } => !(url.contains("icon") && url.contains("32")),
            Guess::File { stem, .. } => url.contains(&stem.to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guess::Page { title } => write!(f, "page {title}"),
            Guess::File { stem, ext } => write!(f, "File:{stem}.{ext}"),
        }
    }
}

/// Terminal state of one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Resolved { path: PathBuf, via: String },
    Exhausted { attempts: usize },
}

/// Ordered guesses for one entry, independent of source.
pub fn guesses(kind: EntityKind, entry: &CatalogEntry, opts: &Options) -> Vec<Guess> {
    let mut out = Vec::new();
    if entry.id.is_empty() { return out; }

    let aliases = opts.aliases_for(kind, &entry.id);
    for title in aliases {
        out.push(Guess::Page { title: title.clone() });
    }
    let titled = title_case_id(&entry.id);
    if !titled.is_empty() && !aliases.iter().any(|a| a.eq_ignore_ascii_case(&titled)) {
        out.push(Guess::Page { title: urlencoding::encode(&titled).into_owned() });
    }

    let mut stems = vec![titled.clone()];
    let joined = titled.replace('_', "");
    if joined != titled { stems.push(joined); }

    for stem in stems.iter().filter(|s| !s.is_empty()) {
        let stem = urlencoding::encode(stem).into_owned();
        for ext in &opts.file_extensions {
            out.push(Guess::File { stem: stem.clone(), ext: ext.clone() });
        }
    }
    out
}

/// Walk every source's guesses until one download validates.
pub fn run(ctx: &Context, kind: EntityKind, entry: &CatalogEntry) -> Outcome {
    let list = guesses(kind, entry, ctx.opts);
    let mut attempts = 0;

    for source in ctx.sources {
        for guess in &list {
            attempts += 1;
            match try_guess(ctx, source.as_ref(), kind, &entry.id, guess) {
                Ok(path) => {
                    return Outcome::Resolved { path, via: format!("{} {guess}", source.name()) };
                }
                Err(e) => log::debug!("{kind}/{}: {guess} on {}: {e}", entry.id, source.name()),
            }
        }
    }

    log::warn!("{kind}/{}: exhausted after {attempts} guesses", entry.id);
    Outcome::Exhausted { attempts }
}

fn try_guess(
    ctx: &Context,
    source: &dyn Source,
    kind: EntityKind,
    id: &str,
    guess: &Guess,
) -> Result<PathBuf, FetchError> {
    let url = guess.url(source);
    let page = ctx.fetch.get(&url)?;
    let cand = ctx
        .extractor(source)
        .extract(&page)
        .into_iter()
        .find(|c| guess.accepts(c))
        .ok_or(FetchError::NoCandidate { url })?;
    ctx.download(kind, id, &cand.source_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn aliases_then_id_title_then_files() {
        let mut opts = Options::default();
        opts.aliases = BTreeMap::from([(
            "weapons".to_string(),
            BTreeMap::from([("joes_dagger".to_string(), vec!["Joe%27s_Dagger".to_string()])]),
        )]);
        let entry = CatalogEntry::new("joes_dagger", "Joe's Dagger");
        let got = guesses(EntityKind::Weapon, &entry, &opts);

        let shown: Vec<String> = got.iter().map(|g| g.to_string()).collect();
        assert_eq!(shown, vec![
            "page Joe%27s_Dagger",
            "page Joes_Dagger",
            "File:Joes_Dagger.png",
            "File:Joes_Dagger.jpg",
            "File:JoesDagger.png",
            "File:JoesDagger.jpg",
        ]);
    }

    #[test]
    fn listed_title_is_not_repeated() {
        let opts = Options::default();
        let entry = CatalogEntry::new("anvil", "Anvil");
        let got = guesses(EntityKind::Item, &entry, &opts);
        let pages = got.iter().filter(|g| matches!(g, Guess::Page { .. })).count();
        assert_eq!(pages, opts.aliases_for(EntityKind::Item, "anvil").len());
        // single-word ids have one stem
        assert_eq!(got.len(), pages + opts.file_extensions.len());
    }

    #[test]
    fn guess_filters() {
        let file = Guess::File { stem: "Joes_Dagger".into(), ext: "png".into() };
        let page = Guess::Page { title: "Joes_Dagger".into() };
        let c = |u: &str| ImageCandidate { raw_name: "x".into(), source_url: u.into() };

        assert!(file.accepts(&c("https://x/images/a/ab/joes_dagger.png")));
        assert!(!file.accepts(&c("https://x/images/a/ab/Other.png")));
        assert!(!page.accepts(&c("https://x/images/thumb/Icon_32px.png")));
        assert!(page.accepts(&c("https://x/images/Icon_Dagger.png")));
    }
}
