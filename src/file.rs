// src/file.rs

use std::{
    collections::HashSet,
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::store::EntityKind;

/// The asset tree: `<root>/<types>/<id>.<ext>`.
///
/// File presence is the only record of "already resolved". Only files whose
/// extension is in `extensions` count; the list order is the preference when
/// one id has several files.
#[derive(Clone, Debug)]
pub struct AssetDir {
    root: PathBuf,
    extensions: Vec<String>,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            root: root.into(),
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
        }
    }

    pub fn kind_dir(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.key())
    }

    fn accepted(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|a| a.eq_ignore_ascii_case(e)))
    }

    /// Stems of every accepted asset file for `kind`. Missing directory → empty.
    pub fn existing_ids(&self, kind: EntityKind) -> io::Result<HashSet<String>> {
        let mut out = HashSet::new();
        for path in self.asset_files(kind)? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                out.insert(stem.to_string());
            }
        }
        Ok(out)
    }

    /// File name of the asset for `id`, picking by extension preference.
    pub fn find(&self, kind: EntityKind, id: &str) -> Option<String> {
        let dir = self.kind_dir(kind);
        self.extensions
            .iter()
            .map(|ext| format!("{id}.{ext}"))
            .find(|name| dir.join(name).is_file())
    }

    /// Whole-file write of `<id>.<ext>` via a temp file and rename.
    pub fn write_asset(&self, kind: EntityKind, id: &str, ext: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let dir = self.kind_dir(kind);
        ensure_directory(&dir)?;
        let path = dir.join(format!("{id}.{ext}"));
        let tmp = dir.join(format!("{id}.{ext}.tmp"));

        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(path)
    }

    pub fn asset_files(&self, kind: EntityKind) -> io::Result<Vec<PathBuf>> {
        let dir = self.kind_dir(kind);
        if !dir.exists() { return Ok(Vec::new()); }
        let mut out = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && self.accepted(&path) {
                out.push(path);
            }
        }
        out.sort();
        Ok(out)
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
