use crate::error::{LocvizError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix joined with a commit id to build its link.
    pub commit_url_base: Option<String>,
    pub plot: PlotConfig,
    pub projects: ProjectsConfig,
}

/// Coordinate system of the commit scatter plot. Selection regions are
/// expressed in these units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub radius_min: f64,
    pub radius_max: f64,
}

impl PlotConfig {
    /// Canvas extent including the margins around the plot area, as
    /// `(x_bounds, y_bounds)` with y growing upward from the bottom margin.
    pub fn outer_bounds(&self) -> ([f64; 2], [f64; 2]) {
        (
            [-self.margin_left, self.width + self.margin_right],
            [-self.margin_bottom, self.height + self.margin_top],
        )
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin_top: 40.0,
            margin_right: 40.0,
            margin_bottom: 60.0,
            margin_left: 80.0,
            radius_min: 2.0,
            radius_max: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    pub latest: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self { latest: 3 }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("locviz").join("config.toml"))
    }

    /// Load from an explicit path (which must exist) or from the default
    /// location (which may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            LocvizError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let plot = &self.plot;
        if !(plot.width > 0.0 && plot.height > 0.0) {
            return Err(LocvizError::Config(
                "plot width and height must be positive".to_string(),
            ));
        }
        let margins = [plot.margin_top, plot.margin_right, plot.margin_bottom, plot.margin_left];
        if margins.iter().any(|m| !(*m >= 0.0)) {
            return Err(LocvizError::Config("plot margins must be non-negative".to_string()));
        }
        if plot.radius_min < 0.0 || plot.radius_max < plot.radius_min {
            return Err(LocvizError::Config(
                "plot radius range must satisfy 0 <= radius_min <= radius_max".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "commit_url_base = \"https://example.com/c/\"\n[plot]\nwidth = 800.0").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.commit_url_base.as_deref(), Some("https://example.com/c/"));
        assert_eq!(config.plot.width, 800.0);
        assert_eq!(config.plot.height, 600.0);
        assert_eq!(config.projects.latest, 3);
    }

    #[test]
    fn invalid_plot_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[plot]\nheight = 0.0").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(LocvizError::Config(_))));
    }

    #[test]
    fn margins_surround_the_plot_area() {
        let plot = PlotConfig::default();
        assert_eq!(plot.outer_bounds(), ([-80.0, 1040.0], [-60.0, 640.0]));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[plot]\nmargin_left = -1.0").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(LocvizError::Config(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }
}
