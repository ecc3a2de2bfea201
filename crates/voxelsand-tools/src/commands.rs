use std::path::{Path, PathBuf};

use voxelsand_core::error::ConfigError;
use voxelsand_core::WorldConfig;
use voxelsand_persist::{export_json, import_voxel_list, PersistError};
use voxelsand_world::TerrainGenerator;

use crate::report::{GridReport, TerrainReport};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, ToolError> {
    std::fs::read(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), ToolError> {
    let io_err = |source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}

/// Defaults, overridden by a RON file when given.
pub fn load_config(path: Option<&Path>) -> Result<WorldConfig, ToolError> {
    match path {
        None => Ok(WorldConfig::default()),
        Some(path) => {
            let bytes = read_file(path)?;
            let text = String::from_utf8_lossy(&bytes);
            Ok(WorldConfig::from_ron_str(&text)?)
        }
    }
}

/// Generate terrain; returns the report and the exported voxel list.
pub fn generate(config: &WorldConfig) -> Result<(TerrainReport, String), ToolError> {
    let generator = TerrainGenerator::new(config);
    let (grid, summary) = generator.generate(config);
    let json = export_json(&grid)?;
    Ok((TerrainReport::new(config.seed, &summary), json))
}

/// Import a voxel list and summarize it.
pub fn inspect(bytes: &[u8], config: &WorldConfig) -> Result<GridReport, ToolError> {
    let grid = import_voxel_list(bytes, config.builder_transform())?;
    Ok(GridReport::from_grid(&grid))
}

/// Import a voxel list and re-export it in canonical order.
pub fn normalize(bytes: &[u8], config: &WorldConfig) -> Result<String, ToolError> {
    let grid = import_voxel_list(bytes, config.builder_transform())?;
    Ok(export_json(&grid)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> WorldConfig {
        WorldConfig {
            exec_axis_voxel_count: 30,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn test_normalize_sorts_and_pretty_prints() {
        let input = br#"[{"gridX":1,"gridY":1,"gridZ":0,"materialKey":"M2"},{"gridX":0,"gridY":0,"gridZ":0,"materialKey":"M1"}]"#;
        let out = normalize(input, &small()).expect("normalize");
        let first = out.find("\"M1\"").expect("M1");
        let second = out.find("\"M2\"").expect("M2");
        assert!(first < second);
        assert!(out.starts_with("[\n  {"));
        // Normalizing is idempotent.
        assert_eq!(normalize(out.as_bytes(), &small()).expect("again"), out);
    }

    #[test]
    fn test_inspect_rejects_malformed() {
        let result = inspect(br#"[{"gridX": 0}]"#, &small());
        assert!(matches!(
            result,
            Err(ToolError::Persist(PersistError::MalformedRecord { index: 0, .. }))
        ));
    }

    #[test]
    fn test_generate_exports_every_voxel() {
        let (report, json) = generate(&small()).expect("generate");
        let records = voxelsand_persist::parse_voxel_list(json.as_bytes()).expect("parse");
        assert_eq!(records.len(), report.voxels);
        assert_eq!(report.seed, small().seed);
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_config(Some(Path::new("/nonexistent/voxelsand/world.ron")));
        assert!(matches!(result, Err(ToolError::Io { .. })));
        assert_eq!(load_config(None).expect("defaults"), WorldConfig::default());
    }
}
