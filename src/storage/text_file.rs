use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::RecordStore;

const TMP_SUFFIX: &str = "tmp";

/// Plain text file holding one persisted record per line.
#[derive(Debug, Clone)]
pub struct TextFileStore {
    path: PathBuf,
}

impl TextFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for TextFileStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Stages the contents next to the target and renames over it, so a failed
    /// write leaves the previous file in place.
    fn write(&self, contents: &str) -> io::Result<()> {
        ensure_parent(&self.path)?;
        let tmp = tmp_path(&self.path);
        let staged = write_file(&tmp, contents).and_then(|()| fs::rename(&tmp, &self.path));
        if staged.is_err() && tmp.is_file() {
            let _ = fs::remove_file(&tmp);
        }
        staged
    }

    fn create(&self) -> io::Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        ensure_parent(&self.path)?;
        File::create(&self.path).map(|_| ())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// `~/.transactions` stages as `~/.transactions.tmp`, `a.txt` as `a.txt.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn write_file(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()
}
