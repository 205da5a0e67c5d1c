use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub survey: SurveyConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let catalog_path = env::var("APP_CATALOG_PATH").ok().map(PathBuf::from);
        let locales_path = env::var("APP_LOCALES_PATH").ok().map(PathBuf::from);

        let offset_price = match env::var("APP_OFFSET_PRICE") {
            Ok(raw) => {
                let price: f64 = raw.parse().map_err(|_| ConfigError::InvalidOffsetPrice)?;
                if !price.is_finite() || price <= 0.0 {
                    return Err(ConfigError::InvalidOffsetPrice);
                }
                Some(price)
            }
            Err(_) => None,
        };

        let survey_year = match env::var("APP_SURVEY_YEAR") {
            Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidSurveyYear)?),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            survey: SurveyConfig {
                catalog_path,
                locales_path,
                offset_price,
                survey_year,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Survey engine settings: optional file-backed catalog and locale
/// tables, an offset price override, and a pinned survey year.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    pub catalog_path: Option<PathBuf>,
    pub locales_path: Option<PathBuf>,
    pub offset_price: Option<f64>,
    pub survey_year: Option<i32>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidOffsetPrice,
    InvalidSurveyYear,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidOffsetPrice => {
                write!(f, "APP_OFFSET_PRICE must be a positive number")
            }
            ConfigError::InvalidSurveyYear => {
                write!(f, "APP_SURVEY_YEAR must be a four digit year")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
