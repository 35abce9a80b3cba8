// src/core/html.rs
use scraper::{Html, Selector};

/// The attributes of one `<img>` that matter for asset extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImgRef {
    pub src: String,
    pub data_src: String,
    pub alt: String,
}

impl ImgRef {
    /// Lazy-loaded pages put the real URL in `data-src` and a data: URI in `src`.
    pub fn best_url(&self) -> &str {
        if self.data_src.is_empty() { &self.src } else { &self.data_src }
    }
}

/// All `<img>` tags of a page in document order.
///
/// Bytes are decoded lossily; the HTML5 parser never rejects markup, so a broken
/// page simply yields fewer (or zero) images.
pub fn img_refs(page: &[u8]) -> Vec<ImgRef> {
    let text = String::from_utf8_lossy(page);
    let doc = Html::parse_document(&text);
    let sel = match Selector::parse("img") {
        Ok(sel) => sel,
        Err(e) => {
            log::error!("img selector rejected: {e}");
            return Vec::new();
        }
    };

    doc.select(&sel)
        .map(|el| {
            let attr = |name: &str| el.value().attr(name).unwrap_or("").trim().to_string();
            ImgRef { src: attr("src"), data_src: attr("data-src"), alt: attr("alt") }
        })
        .collect()
}

/// First accepted extension that appears in `url` as `.<ext>` followed by a
/// non-alphanumeric character (or the end). Lowercased.
pub fn url_extension(url: &str, accepted: &[String]) -> Option<String> {
    let lc = url.to_ascii_lowercase();
    let bytes = lc.as_bytes();
    for (dot, _) in lc.match_indices('.') {
        let rest = &lc[dot + 1..];
        for ext in accepted {
            if !rest.starts_with(ext.as_str()) { continue; }
            let end = dot + 1 + ext.len();
            if bytes.get(end).is_none_or(|b| !b.is_ascii_alphanumeric()) {
                return Some(ext.clone());
            }
        }
    }
    None
}

/// Path segments of a URL (scheme, host, query and fragment removed).
pub fn path_segments(url: &str) -> Vec<&str> {
    let no_query = url.split(['?', '#']).next().unwrap_or("");
    let path = match no_query.find("://") {
        Some(p) => {
            let after = &no_query[p + 3..];
            after.find('/').map(|s| &after[s..]).unwrap_or("")
        }
        None => no_query,
    };
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// `Name.png` → `Name` when the extension is one of `accepted` (case-insensitive).
pub fn file_stem<'a>(segment: &'a str, accepted: &[String]) -> Option<&'a str> {
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() { return None; }
    accepted.iter().any(|a| a.eq_ignore_ascii_case(ext)).then_some(stem)
}

/// Turn a URL file stem into a display-ish name: percent-decoding, `_`/`-` → space.
pub fn name_from_stem(stem: &str) -> String {
    let decoded = urlencoding::decode(stem)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| stem.to_string());
    decoded.replace(['_', '-'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        ["png", "jpg", "jpeg", "gif", "webp"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extension_is_found_mid_url() {
        let u = "https://static.wikia.nocookie.net/megabonk/images/a/ab/Anvil.PNG/revision/latest";
        assert_eq!(url_extension(u, &exts()).as_deref(), Some("png"));
        assert_eq!(url_extension("https://x.org/a/Ice.jpeg", &exts()).as_deref(), Some("jpeg"));
        assert_eq!(url_extension("https://x.org/a/file.pngx", &exts()), None);
    }

    #[test]
    fn segments_drop_host_and_query() {
        assert_eq!(
            path_segments("https://megabonk.wiki/images/thumb/a/ab/Item_Anvil.png/64px-Item_Anvil.png?x=1"),
            vec!["images", "thumb", "a", "ab", "Item_Anvil.png", "64px-Item_Anvil.png"]
        );
        assert_eq!(path_segments("/images/a/b.png"), vec!["images", "a", "b.png"]);
    }

    #[test]
    fn stems_are_decoded() {
        assert_eq!(file_stem("Joe%27s_Dagger.png", &exts()), Some("Joe%27s_Dagger"));
        assert_eq!(name_from_stem("Joe%27s_Dagger"), "Joe's Dagger");
        assert_eq!(file_stem("logo.svg", &exts()), None);
    }

    #[test]
    fn img_tags_in_document_order() {
        let page = br#"<div><img src="a.png" alt="A &amp; B"><p><img data-src="b.png" src="data:x"></p></div>"#;
        let imgs = img_refs(page);
        assert_eq!(imgs.len(), 2);
        assert_eq!(imgs[0].alt, "A & B");
        assert_eq!(imgs[1].best_url(), "b.png");
    }
}
