//! Blueprint tree copying

use std::fs;
use std::io;
use std::path::Path;

/// Recursively copy `src` into `dest`, excluding version-control metadata.
///
/// `dest` and missing parents are created. Entries that are neither files
/// nor directories (sockets, dangling symlinks) are skipped.
pub fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        if name == ".git" {
            continue;
        }

        let dest_path = dest.join(&name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            copy_tree(&entry.path(), &dest_path)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &dest_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn copies_nested_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        write(&src.join("README.md"), "readme");
        write(&src.join("app/main.py"), "entry");
        write(&src.join("app/routes/users.py"), "routes");

        copy_tree(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("README.md")).unwrap(), "readme");
        assert_eq!(
            fs::read_to_string(dest.join("app/routes/users.py")).unwrap(),
            "routes"
        );
    }

    #[test]
    fn excludes_git_metadata() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        write(&src.join(".git/HEAD"), "ref: refs/heads/main");
        write(&src.join("main.py"), "entry");

        copy_tree(&src, &dest).unwrap();

        assert!(!dest.join(".git").exists());
        assert!(dest.join("main.py").exists());
    }

    #[test]
    fn missing_source_errors() {
        let temp = TempDir::new().unwrap();
        let result = copy_tree(&temp.path().join("absent"), &temp.path().join("dest"));
        assert!(result.is_err());
    }
}
