use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::services::excel::ResultFile;
use crate::services::registry::RunRegistry;

/// Document formats skipped without being opened.
pub const UNSUPPORTED_FILE_TYPES: [&str; 3] = ["pdf", "doc", "docx"];

pub fn is_unsupported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| UNSUPPORTED_FILE_TYPES.contains(&ext.as_str()))
}

pub fn sha256_file(path: &Path) -> Result<String, AppError> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Regular files in `dir`, ordered by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        } else {
            tracing::debug!("Skipping non-file entry {}", entry.path().display());
        }
    }
    files.sort();
    Ok(files)
}

/// Filters a path by extension and content hash, then opens it.
pub fn load_result_file(path: &Path, registry: &mut RunRegistry) -> Result<ResultFile, AppError> {
    if is_unsupported(path) {
        return Err(AppError::UnsupportedFormat(path.to_path_buf()));
    }

    let hash = sha256_file(path).map_err(|e| AppError::open_failure(path, e))?;
    if !registry.insert_hash(hash) {
        return Err(AppError::DuplicateContent(path.to_path_buf()));
    }

    ResultFile::open(path)
}

/// Runs one file through the registry. Never fails: every outcome is counted.
pub fn process_file(path: &Path, registry: &mut RunRegistry, html_dir: Option<&Path>) {
    registry.record_file_seen();

    let file = match load_result_file(path, registry) {
        Ok(file) => file,
        Err(AppError::UnsupportedFormat(path)) => {
            tracing::debug!("Unsupported file type: {}", path.display());
            registry.record_unsupported(path);
            return;
        }
        Err(AppError::DuplicateContent(path)) => {
            tracing::debug!("Duplicate file: {}", path.display());
            registry.record_duplicate(path);
            return;
        }
        Err(e) => {
            tracing::warn!("{}", e);
            registry.record_exception(path.to_path_buf());
            return;
        }
    };

    registry.record_file(&file);

    let html = match file.build_html() {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Rendering {} abandoned: {}", path.display(), e);
            registry.record_date_issue();
            return;
        }
    };

    if let Some(dir) = html_dir {
        if let Err(e) = write_html(dir, path, &html) {
            tracing::error!("Failed to write HTML for {}: {}", path.display(), e);
        }
    }
}

fn write_html(dir: &Path, source: &Path, html: &str) -> Result<PathBuf, AppError> {
    let stem = source
        .file_stem()
        .ok_or_else(|| AppError::InvalidInput(format!("No file name in {}", source.display())))?;
    fs::create_dir_all(dir)?;
    let mut file_name = stem.to_os_string();
    file_name.push(".html");
    let target = dir.join(file_name);
    fs::write(&target, html)?;
    tracing::debug!("Wrote {}", target.display());
    Ok(target)
}

/// Processes every file in `dir` and returns the filled registry.
pub fn process_directory(dir: &Path, html_dir: Option<&Path>) -> Result<RunRegistry, AppError> {
    let start = std::time::Instant::now();
    let files = list_files(dir)?;
    tracing::info!("Processing {} files in {}", files.len(), dir.display());

    let mut registry = RunRegistry::new();
    for path in &files {
        process_file(path, &mut registry, html_dir);
    }

    tracing::info!("Processed {} files in {:?}", files.len(), start.elapsed());
    Ok(registry)
}
