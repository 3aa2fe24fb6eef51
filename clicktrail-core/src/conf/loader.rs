use crate::conf::error::ConfigError;
use crate::conf::types::ClicktrailConfig;
use crate::normalization::UrlAliases;

use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_EXTENSION: &str = "hcl";

pub fn load_config(path: &Path) -> Result<ClicktrailConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let mut cfg: ClicktrailConfig = hcl::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

    if let Some(preset) = cfg.log.preset {
        preset.apply(&mut cfg.log);
    }

    // Relative paths are relative to the config file.
    if let Some(base) = path.parent() {
        rebase(base, &mut cfg.log.path);
        rebase(base, &mut cfg.cleaning.url_alias_file);
        rebase(base, &mut cfg.reports.output_dir);
    }

    Ok(cfg)
}

fn rebase(base: &Path, path: &mut Option<PathBuf>) {
    if let Some(p) = path {
        if p.is_relative() && p.as_path() != Path::new("-") {
            *p = base.join(&*p);
        }
    }
}

/// Loads the alias table, starting from the built-in entries so the file can
/// override them.
pub fn load_url_aliases(path: Option<&Path>) -> Result<UrlAliases, ConfigError> {
    let mut aliases = UrlAliases::new();

    if let Some(path) = path {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadAliasFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        aliases.extend_from_tsv(&raw);
    }

    Ok(aliases)
}

pub fn render_config(cfg: &ClicktrailConfig) -> Result<String, ConfigError> {
    hcl::to_string(cfg).map_err(ConfigError::Serialize)
}

/// Writes `cfg` as HCL, forcing the `.hcl` extension. Returns the final path.
pub fn write_config(cfg: &ClicktrailConfig, path: &Path) -> Result<PathBuf, ConfigError> {
    let path = with_config_extension(path);
    let rendered = render_config(cfg)?;

    fs::write(&path, rendered).map_err(|e| ConfigError::WriteFile {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

fn with_config_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == CONFIG_EXTENSION => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(CONFIG_EXTENSION);
            PathBuf::from(name)
        }
    }
}
