use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use walkdir::WalkDir;

pub mod manifest;
pub mod naming;

pub use manifest::Manifest;
pub use naming::{density_qualified_name, set_name};

use naming::{is_image_name, IMAGESET_SUFFIX};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory listing error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Progress template error: {0}")]
    Template(#[from] indicatif::style::TemplateError),
    #[error("Missing Contents.json in {}", set.display())]
    MissingManifest { set: PathBuf },
    #[error("Cannot rename {} to {}: target already exists", from.display(), to.display())]
    RenameConflict { from: PathBuf, to: PathBuf },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Draw a progress bar per image set on stderr.
    pub progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub set: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub image_sets: usize,
    pub images: usize,
    pub renames: Vec<Rename>,
    pub manifests_rewritten: usize,
}

impl RunSummary {
    pub fn renamed(&self) -> usize {
        self.renames.len()
    }
}

/// Renames every unsuffixed `<base>.png` in the `.imageset` folders directly under
/// `root` to `<base>@1x.png` and patches each set's `Contents.json` to match.
///
/// A set whose `@1x` targets already exist is rejected before any of its files
/// are touched. `Contents.json` is only rewritten when at least one of its
/// images was renamed, so sets with nothing to do never write to disk.
pub fn run(root: &Path, options: RunOptions) -> Result<RunSummary, AppError> {
    let set_dirs = list_entries(root, |path, name| {
        path.is_dir() && name.ends_with(IMAGESET_SUFFIX)
    })?;
    log::info!("Found {} image sets in {}", set_dirs.len(), root.display());

    let mut summary = RunSummary::default();
    for dir in &set_dirs {
        process_image_set(dir, options, &mut summary)?;
        summary.image_sets += 1;
    }
    Ok(summary)
}

fn process_image_set(
    dir: &Path,
    options: RunOptions,
    summary: &mut RunSummary,
) -> Result<(), AppError> {
    let dir_name = file_name_of(dir);
    let label = set_name(&dir_name).unwrap_or(dir_name.as_str()).to_string();

    let images = list_entries(dir, |path, name| path.is_file() && is_image_name(name))?;
    let mut manifest = Manifest::load(dir)?;
    let plan = plan_renames(dir, &images)?;
    summary.images += images.len();

    let bar = if options.progress {
        let b = ProgressBar::new(images.len() as u64);
        b.set_style(
            ProgressStyle::with_template("{prefix} [{wide_bar}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        b.set_prefix(label.clone());
        Some(b)
    } else {
        None
    };

    for (path, planned) in images.iter().zip(&plan) {
        let old_name = file_name_of(path);
        if let Some((new_name, new_path)) = planned {
            fs::rename(path, new_path)?;
            let hits = manifest.replace_all(&old_name, new_name);
            log::debug!("{label}: {old_name} -> {new_name} ({hits} manifest references)");
            if let Some(ref b) = bar {
                b.set_message(new_name.clone());
            }
            summary.renames.push(Rename {
                set: label.clone(),
                from: old_name,
                to: new_name.clone(),
            });
        } else {
            log::debug!("{label}: skipping {old_name}");
        }
        if let Some(ref b) = bar {
            b.inc(1);
        }
    }

    if manifest.is_dirty() {
        manifest.save()?;
        summary.manifests_rewritten += 1;
        log::info!("{label}: rewrote {}", manifest.path().display());
    }

    if let Some(b) = bar {
        b.finish_and_clear();
    }
    Ok(())
}

/// New name and path for each image, `None` where the image keeps its name.
/// Fails if any target already exists, before anything is renamed.
fn plan_renames(
    dir: &Path,
    images: &[PathBuf],
) -> Result<Vec<Option<(String, PathBuf)>>, AppError> {
    let mut plan = Vec::with_capacity(images.len());
    for path in images {
        let planned = match density_qualified_name(&file_name_of(path)) {
            Some(new_name) => {
                let new_path = dir.join(&new_name);
                match new_path.symlink_metadata() {
                    Ok(_) => {
                        return Err(AppError::RenameConflict {
                            from: path.clone(),
                            to: new_path,
                        })
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(AppError::Io(e)),
                }
                Some((new_name, new_path))
            }
            None => None,
        };
        plan.push(planned);
    }
    Ok(plan)
}

/// Immediate children of `dir` accepted by `keep`, sorted by file name.
/// `keep` sees the entry's path, so symlinks are judged by their target.
/// Entries whose names are not valid UTF-8 are skipped.
fn list_entries<F>(dir: &Path, keep: F) -> Result<Vec<PathBuf>, AppError>
where
    F: Fn(&Path, &str) -> bool,
{
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str() else {
            log::debug!("skipping non UTF-8 entry {}", entry.path().display());
            continue;
        };
        if keep(entry.path(), name) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
