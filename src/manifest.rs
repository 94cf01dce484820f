use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::naming::MANIFEST_NAME;
use crate::AppError;

/// `Contents.json` held as raw lines. Terminators stay attached to their line so
/// writing the lines back reproduces the file byte for byte.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    lines: Vec<String>,
    dirty: bool,
}

impl Manifest {
    pub fn load(set_dir: &Path) -> Result<Self, AppError> {
        let path = set_dir.join(MANIFEST_NAME);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AppError::MissingManifest {
                    set: set_dir.to_path_buf(),
                })
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        Ok(Self::from_text(path, &text))
    }

    pub fn from_text(path: PathBuf, text: &str) -> Self {
        Self {
            path,
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn text(&self) -> String {
        self.lines.concat()
    }

    /// Replaces every literal occurrence of `old` with `new` on every line and
    /// returns how many occurrences were replaced.
    pub fn replace_all(&mut self, old: &str, new: &str) -> usize {
        if old.is_empty() {
            return 0;
        }
        let mut count = 0;
        for line in self.lines.iter_mut() {
            let hits = line.matches(old).count();
            if hits > 0 {
                *line = line.replace(old, new);
                count += hits;
            }
        }
        if count > 0 {
            self.dirty = true;
        }
        count
    }

    /// Overwrites the manifest on disk, keeping the file's permissions.
    pub fn save(&self) -> Result<(), AppError> {
        let orig_permissions = fs::metadata(&self.path)?.permissions();
        {
            let mut dst = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            for line in &self.lines {
                dst.write_all(line.as_bytes())?;
            }
            dst.sync_all()?;
        }
        fs::set_permissions(&self.path, orig_permissions)?;
        Ok(())
    }
}
