use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::bessel::BesselSolver;
use crate::core::special::SpecialFunctions;
use crate::core::timebase::Timebase;
use crate::membrane::{InvalidArgument, Mode, ModeSet};
use crate::output::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembraneConfig {
    #[serde(default = "MembraneConfig::default_radius")]
    pub radius: f64,
    /// `[order, index]` pairs.
    #[serde(default = "MembraneConfig::default_modes")]
    pub modes: Vec<[i64; 2]>,
}

impl MembraneConfig {
    fn default_radius() -> f64 {
        3.0
    }
    fn default_modes() -> Vec<[i64; 2]> {
        vec![[0, 1], [0, 2]]
    }
}

impl Default for MembraneConfig {
    fn default() -> Self {
        Self {
            radius: Self::default_radius(),
            modes: Self::default_modes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "SamplingConfig::default_radial")]
    pub radial: usize,
    #[serde(default = "SamplingConfig::default_angular")]
    pub angular: usize,
    #[serde(default = "SamplingConfig::default_cartesian")]
    pub cartesian: bool,
}

impl SamplingConfig {
    fn default_radial() -> usize {
        32
    }
    fn default_angular() -> usize {
        64
    }
    fn default_cartesian() -> bool {
        false
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            radial: Self::default_radial(),
            angular: Self::default_angular(),
            cartesian: Self::default_cartesian(),
        }
    }
}

/// Where J_n values come from. Zero search is shared by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SolverBackend {
    /// In-crate trapezoid rule.
    #[default]
    Trapezoid,
    /// `scirs2-special`; needs the `scirs2` feature.
    Scirs2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default)]
    pub backend: SolverBackend,
    #[serde(default = "SolverConfig::default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "SolverConfig::default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "SolverConfig::default_max_argument")]
    pub max_argument: f64,
}

impl SolverConfig {
    fn default_tolerance() -> f64 {
        BesselSolver::default().tolerance
    }
    fn default_max_iterations() -> u32 {
        BesselSolver::default().max_iterations
    }
    fn default_max_argument() -> f64 {
        BesselSolver::default().max_argument
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::default(),
            tolerance: Self::default_tolerance(),
            max_iterations: Self::default_max_iterations(),
            max_argument: Self::default_max_argument(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "AnimationConfig::default_fps")]
    pub fps: f64,
    #[serde(default = "AnimationConfig::default_duration_s")]
    pub duration_s: f64,
}

impl AnimationConfig {
    fn default_fps() -> f64 {
        30.0
    }
    fn default_duration_s() -> f64 {
        5.0
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: Self::default_fps(),
            duration_s: Self::default_duration_s(),
        }
    }
}

/// Radial profile plot: J_n(ω x) for n in `0..orders` at a fixed index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvesConfig {
    #[serde(default = "CurvesConfig::default_orders")]
    pub orders: u32,
    #[serde(default = "CurvesConfig::default_index")]
    pub index: u32,
    #[serde(default = "CurvesConfig::default_x_max")]
    pub x_max: f64,
    #[serde(default = "CurvesConfig::default_points")]
    pub points: usize,
}

impl CurvesConfig {
    fn default_orders() -> u32 {
        5
    }
    fn default_index() -> u32 {
        2
    }
    fn default_x_max() -> f64 {
        10.0
    }
    fn default_points() -> usize {
        1000
    }
}

impl Default for CurvesConfig {
    fn default() -> Self {
        Self {
            orders: Self::default_orders(),
            index: Self::default_index(),
            x_max: Self::default_x_max(),
            points: Self::default_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub membrane: MembraneConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub curves: CurvesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults, commented out, and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let mut commented = String::new();
                for line in text.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || is_table_header(trimmed) {
                        commented.push_str(line);
                    } else {
                        commented.push_str("# ");
                        commented.push_str(line);
                    }
                    commented.push('\n');
                }
                match fs::write(path_obj, commented) {
                    Ok(()) => info!("Wrote default config to {path}"),
                    Err(err) => warn!("Failed to write default config to {path}: {err}"),
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}; continuing with defaults"),
        }
        default_cfg
    }

    /// Configured modes, validated.
    pub fn mode_set(&self) -> Result<ModeSet, InvalidArgument> {
        self.membrane
            .modes
            .iter()
            .map(|&[order, index]| Mode::try_from((order, index)))
            .collect()
    }

    pub fn to_solver(&self) -> BesselSolver {
        BesselSolver {
            tolerance: self.solver.tolerance,
            max_iterations: self.solver.max_iterations,
            max_argument: self.solver.max_argument,
        }
    }

    /// Provider for the configured backend, with the `[solver]` scan limits.
    pub fn to_provider(&self) -> Result<Arc<dyn SpecialFunctions>, String> {
        let solver = self.to_solver();
        match self.solver.backend {
            SolverBackend::Trapezoid => Ok(Arc::new(solver)),
            #[cfg(feature = "scirs2")]
            SolverBackend::Scirs2 => Ok(Arc::new(crate::core::scirs::ScirsBessel { scan: solver })),
            #[cfg(not(feature = "scirs2"))]
            SolverBackend::Scirs2 => Err("solver.backend = \"scirs2\" needs the `scirs2` feature".to_string()),
        }
    }

    pub fn timebase(&self) -> Timebase {
        Timebase {
            fps: self.animation.fps,
        }
    }
}

/// `[section]` lines stay live so the commented file still parses.
fn is_table_header(line: &str) -> bool {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|name| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        })
}
