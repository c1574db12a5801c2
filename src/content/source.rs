use std::path::{Path, PathBuf};
use std::{fs, io};

use walkdir::WalkDir;

/// Filesystem seam for the content store. Going through a trait keeps the
/// store testable and lets tests count how often the disk is touched.
pub trait ContentSource: Send + Sync {
    /// Recursively lists the `.md` files under `dir`, sorted by path so the
    /// enumeration order is stable across platforms. A missing directory is
    /// an empty content kind, not an error.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

pub struct DiskSource;

impl ContentSource for DiskSource {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(vec![]);
        }

        let mut files = vec![];
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if file_name.ends_with(".md") {
                    files.push(entry.into_path());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_list_files_recursive_and_sorted() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("2024/january"))?;
        fs::write(root.join("zebra.md"), "z")?;
        fs::write(root.join("2024/january/first.md"), "f")?;
        fs::write(root.join("notes.txt"), "ignored")?;
        fs::write(root.join("2024/image.png"), "ignored")?;

        let source = DiskSource;
        let files = source.list_files(root)?;
        assert_eq!(
            files,
            vec![
                root.join("2024/january/first.md"),
                root.join("zebra.md"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let source = DiskSource;
        let files = source.list_files(Path::new("/does/not/exist")).unwrap();
        assert!(files.is_empty());
    }
}
