//! `kiln init` — create a project manifest.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{KilnManifest, MANIFEST_FILE};

/// Write a template `kiln.toml` into `dir`, named after the directory.
pub fn run(dir: &Path) -> Result<()> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project")
        .to_string();
    create_project(dir, &name)?;
    println!("Created {} for project '{name}'", dir.join(MANIFEST_FILE).display());
    Ok(())
}

/// Create `dir` if needed and write the manifest template.
pub fn create_project(dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    std::fs::write(&path, KilnManifest::template(name))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("game");
        create_project(&project, "game").unwrap();
        let (manifest, _) = KilnManifest::find_and_load(&project).unwrap().unwrap();
        assert_eq!(manifest.project.name, "game");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), "first").unwrap();
        assert!(create_project(dir.path(), "second").is_err());
    }
}
