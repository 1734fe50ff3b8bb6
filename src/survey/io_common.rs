use std::path::{Path, PathBuf};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Resolves a path from a configuration file against the directory of that file.
pub fn resolve_path(root: Option<&Path>, file_path: &str) -> String {
    let p = Path::new(file_path);
    match root {
        Some(root) if p.is_relative() => {
            let full: PathBuf = [root, p].iter().collect();
            full.as_path().display().to_string()
        }
        _ => file_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("exports/fall/responses.csv"), "responses.csv");
        assert_eq!(simplify_file_name("responses.csv"), "responses.csv");
    }

    #[test]
    fn relative_paths_follow_the_config() {
        let root = Path::new("configs");
        assert_eq!(
            resolve_path(Some(root), "responses.csv"),
            Path::new("configs").join("responses.csv").display().to_string()
        );
        assert_eq!(resolve_path(None, "responses.csv"), "responses.csv");
    }
}
