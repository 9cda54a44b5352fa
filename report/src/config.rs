use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, fs, path::Path, str::FromStr};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("Config is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Config contains invalid colors: {}", .0.join(", "))]
    InvalidColors(Vec<String>),
    #[error("Plot size must be non-zero, got {width}x{height}")]
    InvalidPlotSize { width: u32, height: u32 },
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    // dbType -> "#RRGGBB", merged over the built-in palette
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
    // color for databases without a palette entry
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
    #[serde(default)]
    pub plot: PlotConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    // switch to a logarithmic y-axis once a bar exceeds this value
    #[serde(default = "default_log_threshold")]
    pub log_threshold_ms: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            palette: BTreeMap::new(),
            fallback_color: default_fallback_color(),
            plot: PlotConfig::default(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            log_threshold_ms: default_log_threshold(),
        }
    }
}

impl ReportConfig {
    /// load the config file if one was given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigErrors> {
        match path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::from_yaml(&fs::read_to_string(path)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigErrors> {
        let config: Self = serde_yaml::from_str(source)?;

        if config.plot.width == 0 || config.plot.height == 0 {
            return Err(ConfigErrors::InvalidPlotSize {
                width: config.plot.width,
                height: config.plot.height,
            });
        }

        Ok(config)
    }

    /// Resolve the configured colors into a palette.
    ///
    /// Every invalid entry is reported before failing, so a broken config can be
    /// fixed in one go.
    pub fn palette(&self) -> Result<Palette, ConfigErrors> {
        let mut invalid = Vec::new();
        let Palette { mut colors, .. } = Palette::default();

        for (name, value) in self.palette.iter() {
            match value.parse::<Rgb>() {
                Ok(color) => {
                    colors.insert(name.clone(), color);
                }
                Err(_) => {
                    error!("palette.{name} ({value}) must be a color of the form #RRGGBB");
                    invalid.push(format!("palette.{name}"));
                }
            }
        }

        let fallback = match self.fallback_color.parse::<Rgb>() {
            Ok(color) => color,
            Err(_) => {
                error!(
                    "fallback_color ({}) must be a color of the form #RRGGBB",
                    self.fallback_color
                );
                invalid.push("fallback_color".to_string());
                FALLBACK_COLOR
            }
        };

        if invalid.is_empty() {
            Ok(Palette { colors, fallback })
        } else {
            Err(ConfigErrors::InvalidColors(invalid))
        }
    }
}

/// 24 bit color as written in the config, `#RRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor;

impl FromStr for Rgb {
    type Err = InvalidColor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value.strip_prefix('#').ok_or(InvalidColor)?;

        if hex.len() != 6 || !hex.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(InvalidColor);
        }

        let channel =
            |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| InvalidColor);

        Ok(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// per database bar colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: BTreeMap<String, Rgb>,
    fallback: Rgb,
}

impl Palette {
    pub fn color(&self, db_type: &str) -> Rgb {
        self.colors.get(db_type).copied().unwrap_or(self.fallback)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
            fallback: FALLBACK_COLOR,
        }
    }
}

pub const FALLBACK_COLOR: Rgb = Rgb(0x88, 0x88, 0x88);

pub static DEFAULT_PALETTE: Lazy<BTreeMap<&'static str, Rgb>> = Lazy::new(|| {
    BTreeMap::from([
        ("postgres", Rgb(0x33, 0x67, 0x91)),
        ("questdb", Rgb(0xFF, 0x6B, 0x35)),
        ("timescaledb", Rgb(0xFD, 0xB4, 0x62)),
        ("influxdb", Rgb(0x22, 0x57, 0x7A)),
        ("clickhouse", Rgb(0xFF, 0x9F, 0x1C)),
        ("cratedb", Rgb(0x2E, 0x8B, 0x57)),
    ])
});

fn default_fallback_color() -> String {
    FALLBACK_COLOR.to_string()
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    600
}

fn default_log_threshold() -> f64 {
    1000.0
}
