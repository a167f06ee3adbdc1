use anyhow::{Context, Result};
use std::path::Path;

use super::catalog::Catalog;
use super::types::Mission;

pub fn load_mission(path: &Path) -> Result<Mission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading mission file {}", path.display()))?;
    let mission: Mission = toml::from_str(&content)
        .with_context(|| format!("parsing mission file {}", path.display()))?;
    Ok(mission)
}

pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let pattern = dir.join("mission_*.toml");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("non UTF-8 catalog path {}", dir.display()))?;

    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;

    // mission_01, mission_02, ... sort into unlock order
    paths.sort();

    let mut missions = Vec::with_capacity(paths.len());
    for path in paths {
        missions.push(load_mission(&path)?);
    }

    let catalog = Catalog::new(missions)?;
    log::info!("[CATALOG] loaded {} missions from {}", catalog.len(), dir.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn copy_builtin(dir: &Path) {
        for (i, source) in crate::mission::catalog::BUILTIN_SOURCES.iter().enumerate() {
            fs::write(dir.join(format!("mission_{:02}.toml", i + 1)), source).unwrap();
        }
    }

    #[test]
    fn loads_catalog_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        copy_builtin(dir.path());
        fs::write(dir.path().join("notes.txt"), "not a mission").unwrap();

        let catalog = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get(4).unwrap().challenge.answer, "Stella Maris");
    }

    #[test]
    fn rejects_incomplete_directory() {
        let dir = tempfile::tempdir().unwrap();
        copy_builtin(dir.path());
        fs::remove_file(dir.path().join("mission_05.toml")).unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(err.to_string().contains("expected 5 missions"));
    }

    #[test]
    fn reports_the_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mission_01.toml");
        fs::write(&path, "[meta]\nid = \"one\"\n").unwrap();

        let err = load_mission(&path).unwrap_err();
        assert!(format!("{err:#}").contains("mission_01.toml"));
    }
}
