// Configuration for the console
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/logdeck/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Query defaults applied to freshly opened panes
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Lookback window in minutes for a new pane
    pub lookback_minutes: i64,

    /// Rows per page
    pub page_size: u64,

    /// Request timeout for platform API calls (seconds)
    pub request_timeout_secs: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            lookback_minutes: 15,
            page_size: 100,
            request_timeout_secs: 10,
        }
    }
}

/// Feature flags for optional panels (opt-out: default enabled)
#[derive(Debug, Clone)]
pub struct Features {
    /// Histogram panel above the log rows
    pub charts: bool,

    /// Table-views modal for raw tables
    pub views: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            charts: true,
            views: true,
        }
    }
}

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to the TUI buffer)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "logdeck" -> "logdeck.2024-01-15.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "logdeck".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the platform API
    pub api_url: String,

    /// Platform instance whose databases to browse
    pub instance_id: i64,

    /// Database to select on startup (first known database if unset)
    pub database: Option<String>,

    /// Base URL of the web console, for share links
    pub console_url: String,

    /// Demo mode: serve mock libraries and rows instead of a real platform
    pub demo_mode: bool,

    /// Theme name: "dark", "light", "monokai", "dracula", "nord", "solarized"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Query defaults
    pub query: QueryConfig,

    /// Feature flags for optional panels
    pub features: Features,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Query settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileQuery {
    lookback_minutes: Option<i64>,
    page_size: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Feature flags as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileFeatures {
    charts: Option<bool>,
    views: Option<bool>,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_rotation: Option<String>,
    file_prefix: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    instance_id: Option<i64>,
    database: Option<String>,
    console_url: Option<String>,
    theme: Option<String>,
    use_theme_background: Option<bool>,

    /// Optional [query] section
    query: Option<FileQuery>,

    /// Optional [features] section
    features: Option<FileFeatures>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/logdeck/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("logdeck").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# logdeck configuration
# Uncomment and modify options as needed

# Platform API base URL (default: http://localhost:19001)
# api_url = "http://localhost:19001"

# Instance whose databases to browse (default: 1)
# instance_id = 1

# Database to select on startup (default: first known database)
# database = "default"

# Web console base URL, used to build share links (default: api_url)
# console_url = "http://localhost:19001"

# Theme: dark, light, monokai, dracula, nord, solarized
# theme = "dracula"

# Use theme's background color (true) or terminal's default (false)
# Set to false if you want the TUI to inherit your terminal's background
# use_theme_background = true

# Query defaults for freshly opened panes
# [query]
# lookback_minutes = 15      # Initial window reaches back this far
# page_size = 100            # Rows per page
# request_timeout_secs = 10  # Platform API timeout

# Feature flags (default: all enabled)
# [features]
# charts = true  # Histogram panel above the log rows
# views = true   # Table-views modal for raw tables

# Logging configuration
# [logging]
# level = "info"        # trace, debug, info, warn, error (RUST_LOG env var overrides this)
# file_enabled = false  # Also write logs to rotating files
# file_dir = "./logs"
# file_rotation = "daily"  # hourly, daily, never
# file_prefix = "logdeck"
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# logdeck configuration

# Platform API base URL
api_url = "{api_url}"

# Instance whose databases to browse
instance_id = {instance_id}
{database}
# Web console base URL, used to build share links
console_url = "{console_url}"

# Theme: dark, light, monokai, dracula, nord, solarized
theme = "{theme}"

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Query defaults for freshly opened panes
[query]
lookback_minutes = {lookback}
page_size = {page_size}
request_timeout_secs = {timeout}

# Feature flags
[features]
charts = {charts}
views = {views}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"
"#,
            api_url = self.api_url,
            instance_id = self.instance_id,
            database = match &self.database {
                Some(db) => format!("\n# Database to select on startup\ndatabase = \"{}\"\n", db),
                None => String::new(),
            },
            console_url = self.console_url,
            theme = self.theme,
            use_bg = self.use_theme_background,
            lookback = self.query.lookback_minutes,
            page_size = self.query.page_size,
            timeout = self.query.request_timeout_secs,
            charts = self.features.charts,
            views = self.features.views,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // API URL: env > file > default
        let api_url = std::env::var("LOGDECK_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| "http://localhost:19001".to_string());

        // Instance id: env > file > default
        let instance_id = std::env::var("LOGDECK_INSTANCE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.instance_id)
            .unwrap_or(1);

        // Database: env > file > unset (first known database wins)
        let database = std::env::var("LOGDECK_DATABASE").ok().or(file.database);

        // Console URL: env > file > api_url
        let console_url = std::env::var("LOGDECK_CONSOLE_URL")
            .ok()
            .or(file.console_url)
            .unwrap_or_else(|| api_url.clone());

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("LOGDECK_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        // Theme: env > file > default
        let theme = std::env::var("LOGDECK_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "dracula".to_string());

        // Use theme background: file > default (true = use theme's bg color)
        let use_theme_background = file.use_theme_background.unwrap_or(true);

        // Query defaults: file config only, clamped to sane minimums
        let file_query = file.query.unwrap_or_default();
        let query = QueryConfig {
            lookback_minutes: file_query.lookback_minutes.unwrap_or(15).max(1),
            page_size: file_query.page_size.unwrap_or(100).max(1),
            request_timeout_secs: file_query.request_timeout_secs.unwrap_or(10).max(1),
        };

        // Feature flags: file config only (env vars would be verbose)
        // Default: enabled (opt-out pattern)
        let file_features = file.features.unwrap_or_default();
        let features = Features {
            charts: file_features.charts.unwrap_or(true),
            views: file_features.views.unwrap_or(true),
        };

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file_logging
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file_logging.file_prefix.unwrap_or(defaults.file_prefix),
        };

        Self {
            api_url,
            instance_id,
            database,
            console_url,
            demo_mode,
            theme,
            use_theme_background,
            query,
            features,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:19001".to_string(),
            instance_id: 1,
            database: None,
            console_url: "http://localhost:19001".to_string(),
            demo_mode: false,
            theme: "dracula".to_string(),
            use_theme_background: true,
            query: QueryConfig::default(),
            features: Features::default(),
            logging: LoggingConfig::default(),
        }
    }
}
