//! Case loading, saving, validation and introspection.

use pn_project::schema::CaseFile;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Summary of a case for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSummary {
    pub name: String,
    pub fluid: String,
    pub flow_m3h: f64,
    pub pre_segments: usize,
    pub branch_count: usize,
    pub branch_segments: usize,
    pub post_segments: usize,
    pub has_sweep: bool,
}

/// Load a case from YAML or JSON (chosen by extension) and validate it.
pub fn load_case(path: &Path) -> AppResult<CaseFile> {
    if !path.exists() {
        return Err(AppError::CaseFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(pn_project::load_case(path)?)
}

/// Validate and save a case; the format follows the extension.
pub fn save_case(path: &Path, case: &CaseFile) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AppError::CaseFileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(pn_project::save_case(path, case)?)
}

pub fn validate_case(case: &CaseFile) -> AppResult<()> {
    Ok(pn_project::validate_case(case)?)
}

pub fn summarize_case(case: &CaseFile) -> CaseSummary {
    CaseSummary {
        name: case.name.clone(),
        fluid: case.fluid.clone(),
        flow_m3h: case.operating.flow_m3h,
        pre_segments: case.pre.len(),
        branch_count: case.branches.len(),
        branch_segments: case.branches.iter().map(|b| b.segments.len()).sum(),
        post_segments: case.post.len(),
        has_sweep: case.sweep.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here.yaml");
        match load_case(path) {
            Err(AppError::CaseFileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn summary_counts_segments() {
        let summary = summarize_case(&CaseFile::example());
        assert_eq!(summary.branch_count, 2);
        assert_eq!(summary.branch_segments, 2);
        assert_eq!(summary.pre_segments, 0);
        assert!(summary.has_sweep);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("pn_app_case_service");
        let path = dir.join("example.yaml");
        save_case(&path, &CaseFile::example()).unwrap();
        assert_eq!(load_case(&path).unwrap(), CaseFile::example());
    }
}
