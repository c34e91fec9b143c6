use anyhow::{Context, Result};
use royalty_core::{DistributorKind, DistributorProfile, TaxRate, DEFAULT_LABELS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::default_config_path;

/// Contents of `config.toml`. Every section is optional; missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub labels: LabelsSection,
    pub tax_rates: TaxRatesSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsSection {
    /// Label names kept by FUGA and Altafonte statements.
    pub allowed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRatesSection {
    pub fuga: f64,
    pub altafonte: f64,
    pub onerpm: f64,
    pub onerpm_share_in: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Where processed CSVs are written.
    pub dir: PathBuf,
    /// Rows shown in the terminal preview.
    pub preview_rows: usize,
}

impl Default for LabelsSection {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for TaxRatesSection {
    fn default() -> Self {
        Self {
            fuga: DistributorKind::Fuga.default_tax_rate_percent(),
            altafonte: DistributorKind::Altafonte.default_tax_rate_percent(),
            onerpm: DistributorKind::Onerpm.default_tax_rate_percent(),
            onerpm_share_in: DistributorKind::OnerpmShareIn.default_tax_rate_percent(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            preview_rows: 10,
        }
    }
}

impl TaxRatesSection {
    pub fn for_kind(&self, kind: DistributorKind) -> f64 {
        match kind {
            DistributorKind::Fuga => self.fuga,
            DistributorKind::Altafonte => self.altafonte,
            DistributorKind::Onerpm => self.onerpm,
            DistributorKind::OnerpmShareIn => self.onerpm_share_in,
        }
    }
}

impl Config {
    /// Profile for `kind` with configured labels and default tax rate.
    pub fn profile(&self, kind: DistributorKind) -> Result<DistributorProfile> {
        let rate = TaxRate::new(self.tax_rates.for_kind(kind))
            .with_context(|| format!("tax_rates.{} in config", kind.id()))?;
        Ok(DistributorProfile::with_labels(kind, self.labels.allowed.clone())
            .with_default_tax_rate(rate))
    }

    pub fn profiles(&self) -> Result<Vec<DistributorProfile>> {
        DistributorKind::ALL.iter().map(|k| self.profile(*k)).collect()
    }
}

pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load the config at `path`; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use royalty_core::RowFilter;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.tax_rates.altafonte, 28.5);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[labels]\nallowed = [\"Acme\"]\n\n[tax_rates]\nfuga = 10.0\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.labels.allowed, vec!["Acme"]);
        assert_eq!(cfg.tax_rates.fuga, 10.0);
        assert_eq!(cfg.tax_rates.onerpm, 18.5);
        assert_eq!(cfg.output.preview_rows, 10);

        let fuga = cfg.profile(DistributorKind::Fuga).unwrap();
        assert_eq!(fuga.row_filter, RowFilter::LabelIn(vec!["Acme".into()]));
        assert_eq!(fuga.default_tax_rate.percent(), 10.0);
    }

    #[test]
    fn test_out_of_range_rate_is_rejected() {
        let cfg = Config {
            tax_rates: TaxRatesSection {
                altafonte: 140.0,
                ..TaxRatesSection::default()
            },
            ..Config::default()
        };
        assert!(cfg.profile(DistributorKind::Altafonte).is_err());
        assert!(cfg.profile(DistributorKind::Fuga).is_ok());
    }

    #[test]
    fn test_init_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}
