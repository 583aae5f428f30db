use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::geometry::precision::MAX_DECIMALS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance must be a finite, non-negative number (got {0})")]
    InvalidTolerance(f64),
    #[error("coordinate precision {0} exceeds the maximum of 15 decimal places")]
    PrecisionTooHigh(u32),
    #[error("minimum ring vertices must be at least 1")]
    ZeroMinimum,
    #[error("proportional minimum divisor must be at least 1")]
    ZeroDivisor,
    #[error("polygon retention limit must be at least 1 (use \"unbounded\" to keep all)")]
    ZeroRetention,
    #[error("{0} fallback size must be at least 1")]
    ZeroFallback(&'static str),
    #[error("invalid polygon limit {0:?}: expected a positive integer or \"unbounded\"")]
    InvalidLimit(String),
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Aggressiveness presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Gentle reduction, ~55m tolerance
    Light,
    /// Keeps coverage while cutting most of the size, ~200m tolerance
    #[default]
    Balanced,
    /// Smallest output, ~2km tolerance, at most 5 polygons per feature
    Ultra,
}

impl Profile {
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Light => "light",
            Profile::Balanced => "balanced",
            Profile::Ultra => "ultra",
        }
    }

    pub fn config(&self) -> SimplificationConfig {
        match self {
            Profile::Light => SimplificationConfig {
                tolerance: 0.0005,
                coordinate_precision: 4,
                ..SimplificationConfig::default()
            },
            Profile::Balanced => SimplificationConfig::default(),
            Profile::Ultra => SimplificationConfig {
                tolerance: 0.02,
                coordinate_precision: 3,
                min_ring_vertices: MinRingVertices::Fixed(4),
                max_polygons_retained: PolygonLimit::Top(5),
                outer_fallback_vertices: 20,
                multi_fallback_vertices: 10,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Floor below which the coverage guard replaces the reduced ring
///
/// In TOML either a plain integer (`min_ring_vertices = 6`) or a table
/// (`min_ring_vertices = { floor = 8, divisor = 50 }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MinRingVertices {
    Fixed(usize),
    /// `max(floor, original_len / divisor)`
    Proportional { floor: usize, divisor: usize },
}

impl MinRingVertices {
    pub fn resolve(&self, original_len: usize) -> usize {
        match *self {
            MinRingVertices::Fixed(n) => n,
            MinRingVertices::Proportional { floor, divisor } => {
                floor.max(original_len / divisor.max(1))
            }
        }
    }
}

/// How many polygons of a multi-polygon survive the size ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LimitRepr")]
pub enum PolygonLimit {
    Unbounded,
    Top(usize),
}

impl PolygonLimit {
    pub fn count(&self) -> Option<usize> {
        match *self {
            PolygonLimit::Unbounded => None,
            PolygonLimit::Top(n) => Some(n),
        }
    }
}

impl FromStr for PolygonLimit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" | "all" => Ok(PolygonLimit::Unbounded),
            other => other
                .parse()
                .map(PolygonLimit::Top)
                .map_err(|_| ConfigError::InvalidLimit(s.to_string())),
        }
    }
}

impl fmt::Display for PolygonLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonLimit::Unbounded => f.write_str("unbounded"),
            PolygonLimit::Top(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<LimitRepr> for PolygonLimit {
    type Error = ConfigError;

    fn try_from(repr: LimitRepr) -> Result<Self, Self::Error> {
        match repr {
            LimitRepr::Count(n) => Ok(PolygonLimit::Top(n)),
            LimitRepr::Keyword(s) => s.parse(),
        }
    }
}

/// Parameters of the simplification engine
#[derive(Debug, Clone, PartialEq)]
pub struct SimplificationConfig {
    /// Maximum perpendicular deviation, in coordinate units, for a dropped vertex
    pub tolerance: f64,
    /// Decimal places kept per coordinate
    pub coordinate_precision: u32,
    pub min_ring_vertices: MinRingVertices,
    pub max_polygons_retained: PolygonLimit,
    /// Target vertex count of the last-resort ring for a lost polygon
    pub outer_fallback_vertices: usize,
    /// Target vertex count of the last-resort ring for an emptied multi-polygon
    pub multi_fallback_vertices: usize,
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.002,
            coordinate_precision: 4,
            min_ring_vertices: MinRingVertices::Proportional {
                floor: 8,
                divisor: 50,
            },
            max_polygons_retained: PolygonLimit::Unbounded,
            outer_fallback_vertices: 100,
            multi_fallback_vertices: 10,
        }
    }
}

impl SimplificationConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_precision(mut self, decimals: u32) -> Self {
        self.coordinate_precision = decimals;
        self
    }

    pub fn with_min_ring_vertices(mut self, minimum: MinRingVertices) -> Self {
        self.min_ring_vertices = minimum;
        self
    }

    pub fn with_max_polygons(mut self, limit: PolygonLimit) -> Self {
        self.max_polygons_retained = limit;
        self
    }

    /// Layer command-line and file overrides on top of a profile
    ///
    /// Precedence: `cli` > `file` > profile defaults. The profile itself is
    /// picked the same way, falling back to [`Profile::Balanced`].
    pub fn resolve(cli: &Overrides, file: Option<&Overrides>) -> (Profile, Self) {
        let empty = Overrides::default();
        let file = file.unwrap_or(&empty);

        let profile = cli.profile.or(file.profile).unwrap_or_default();
        let base = profile.config();

        let config = Self {
            tolerance: cli.tolerance.or(file.tolerance).unwrap_or(base.tolerance),
            coordinate_precision: cli
                .precision
                .or(file.precision)
                .unwrap_or(base.coordinate_precision),
            min_ring_vertices: cli
                .min_ring_vertices
                .or(file.min_ring_vertices)
                .unwrap_or(base.min_ring_vertices),
            max_polygons_retained: cli
                .max_polygons
                .or(file.max_polygons)
                .unwrap_or(base.max_polygons_retained),
            outer_fallback_vertices: cli
                .outer_fallback_vertices
                .or(file.outer_fallback_vertices)
                .unwrap_or(base.outer_fallback_vertices),
            multi_fallback_vertices: cli
                .multi_fallback_vertices
                .or(file.multi_fallback_vertices)
                .unwrap_or(base.multi_fallback_vertices),
        };

        (profile, config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.coordinate_precision > MAX_DECIMALS {
            return Err(ConfigError::PrecisionTooHigh(self.coordinate_precision));
        }
        match self.min_ring_vertices {
            MinRingVertices::Fixed(0) => return Err(ConfigError::ZeroMinimum),
            MinRingVertices::Proportional { floor: 0, .. } => {
                return Err(ConfigError::ZeroMinimum);
            }
            MinRingVertices::Proportional { divisor: 0, .. } => {
                return Err(ConfigError::ZeroDivisor);
            }
            _ => {}
        }
        if self.max_polygons_retained == PolygonLimit::Top(0) {
            return Err(ConfigError::ZeroRetention);
        }
        if self.outer_fallback_vertices == 0 {
            return Err(ConfigError::ZeroFallback("outer ring"));
        }
        if self.multi_fallback_vertices == 0 {
            return Err(ConfigError::ZeroFallback("multi-polygon"));
        }
        Ok(())
    }
}

/// Optional settings shared by the config file and the command line
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Overrides {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub min_ring_vertices: Option<MinRingVertices>,
    #[serde(default)]
    pub max_polygons: Option<PolygonLimit>,
    #[serde(default)]
    pub outer_fallback_vertices: Option<usize>,
    #[serde(default)]
    pub multi_fallback_vertices: Option<usize>,
}

fn default_pretty() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(flatten)]
    pub simplification: Overrides,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    /// Read an explicitly requested config file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search the usual locations; the first file that parses wins
    pub fn load() -> Option<Self> {
        config_candidates()
            .into_iter()
            .filter(|path| path.is_file())
            .find_map(|path| match Self::read(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    match std::error::Error::source(&e) {
                        Some(cause) => eprintln!("Warning: {}: {}", e, cause),
                        None => eprintln!("Warning: {}", e),
                    }
                    None
                }
            })
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let local = ["geoslim.toml", ".geoslim.toml"].map(PathBuf::from);
    let config_dir = dirs::config_dir()
        .into_iter()
        .flat_map(|dir| [dir.join("geoslim").join("config.toml"), dir.join("geoslim.toml")]);
    let home = dirs::home_dir()
        .into_iter()
        .flat_map(|home| [home.join(".geoslim.toml"), home.join(".config/geoslim/config.toml")]);

    local.into_iter().chain(config_dir).chain(home).collect()
}
