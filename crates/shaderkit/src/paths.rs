//! Locates and loads user preset files.
//!
//! The directory comes from `--preset-dir`/`SHADERKIT_PRESET_DIR` when set,
//! otherwise `<config dir>/presets` as reported by `directories-next`. A
//! missing directory simply means there are no user presets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories_next::ProjectDirs;
use presetconfig::{PresetFile, PresetLibrary};

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "shaderkit";
const APPLICATION: &str = "shaderkit";

pub fn preset_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit.filter(|dir| !dir.as_os_str().is_empty()) {
        return Ok(dir.to_path_buf());
    }
    let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
        .ok_or_else(|| anyhow!("failed to determine user directories"))?;
    Ok(project_dirs.config_dir().join("presets"))
}

/// Reads every `*.toml` file in `dir`, in file name order.
pub fn load_presets(dir: &Path) -> Result<PresetLibrary> {
    let mut library = PresetLibrary::new();
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "no user preset directory");
        return Ok(library);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read preset directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("failed to read preset directory {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
            files.push(path);
        }
    }
    files.sort();

    for path in files {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read preset file {}", path.display()))?;
        let file = PresetFile::from_toml_str(&contents)
            .with_context(|| format!("failed to load preset file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            kind = %file.kind,
            presets = file.presets.len(),
            "loaded user presets"
        );
        library.add_file(file);
    }

    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uniforms::ShaderKind;

    #[test]
    fn explicit_dir_wins() {
        let root = TempDir::new().unwrap();
        assert_eq!(preset_dir(Some(root.path())).unwrap(), root.path());
    }

    #[test]
    fn missing_dir_is_empty() {
        let root = TempDir::new().unwrap();
        let library = load_presets(&root.path().join("absent")).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn loads_toml_files_in_name_order() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join("b.toml"),
            "version = 1\nkind = \"warp\"\n[[presets]]\nname = \"Second\"\n",
        )
        .unwrap();
        fs::write(
            root.path().join("a.toml"),
            "version = 1\nkind = \"warp\"\n[[presets]]\nname = \"First\"\n",
        )
        .unwrap();
        fs::write(root.path().join("notes.txt"), "ignored").unwrap();

        let library = load_presets(root.path()).unwrap();
        let names = library.names(ShaderKind::Warp);
        assert_eq!(&names[names.len() - 2..], ["First", "Second"]);
    }

    #[test]
    fn broken_file_names_the_path() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("bad.toml"), "version = 3\nkind = \"warp\"\n").unwrap();
        let err = load_presets(root.path()).unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"), "{err:#}");
    }
}
