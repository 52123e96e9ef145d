//! pn-project: case file format and validation.
//!
//! A case file captures one pumping duty: fluid, flow, geometric head,
//! equipment data, the series/parallel/series pipe layout and an optional
//! sweep range. Files are read and written as YAML or JSON and are
//! validated in both directions.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_case};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<CaseFile> {
    let content = std::fs::read_to_string(path)?;
    let case: CaseFile = serde_yaml::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &std::path::Path, case: &CaseFile) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<CaseFile> {
    let content = std::fs::read_to_string(path)?;
    let case: CaseFile = serde_json::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_json(path: &std::path::Path, case: &CaseFile) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a case file, picking the format from the extension (`.json`, else YAML).
pub fn load_case(path: &std::path::Path) -> ProjectResult<CaseFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Save a case file, picking the format from the extension (`.json`, else YAML).
pub fn save_case(path: &std::path::Path, case: &CaseFile) -> ProjectResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => save_json(path, case),
        _ => save_yaml(path, case),
    }
}
