// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Normalize a free-text value for file system usage
pub fn normalize_file_stem(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name for a cover letter when the service did not name it
pub fn cover_letter_file_name(applicant: &str, company: &str, role: &str) -> String {
    let parts: Vec<String> = [applicant, company, role]
        .iter()
        .map(|part| normalize_file_stem(part))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        "cover_letter.pdf".to_string()
    } else {
        format!("cover_letter_{}.pdf", parts.join("_"))
    }
}

/// Get file extension in lowercase
/// Reduce a server-supplied file name to a bare, normalized name with no
/// directory part. Returns `None` when nothing usable is left.
pub fn safe_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    let path = Path::new(last);
    let stem = normalize_file_stem(path.file_stem()?.to_str()?);
    if stem.trim_matches('_').is_empty() {
        return None;
    }

    match get_file_extension(last) {
        Some(ext) if ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Some(format!("{}.{}", stem, ext))
        }
        _ => Some(format!("{}.pdf", stem)),
    }
}

pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// Content type for a resume upload, if the format is one the service accepts
pub fn resume_content_type(file_name: &str) -> Option<&'static str> {
    match get_file_extension(file_name).as_deref() {
        Some("pdf") => Some("application/pdf"),
        Some("doc") => Some("application/msword"),
        Some("docx") => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

/// Resolve a possibly relative path against the current directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

pub async fn read_file_safe(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write bytes, creating the parent directory first
pub async fn write_file_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
