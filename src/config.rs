use std::env;
use std::path::PathBuf;

use crate::services::recommendations::RecommendationRules;

/// Windows and rule tables used when deriving budget insights.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Trailing window, in days, that budget status spend is summed over.
    pub status_window_days: i64,
    /// Months of history the recommendation engine looks back over.
    pub history_months: u32,
    /// Months shown in the analysis spending trend.
    pub trend_months: u32,
    pub rules: RecommendationRules,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            status_window_days: 30,
            history_months: 6,
            trend_months: 6,
            rules: RecommendationRules::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub migrations_path: PathBuf,
    pub insights: InsightConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = InsightConfig::default();
        let insights = InsightConfig {
            status_window_days: env_parse("TALLY_STATUS_WINDOW_DAYS")
                .filter(|d: &i64| *d > 0)
                .unwrap_or(defaults.status_window_days),
            history_months: env_parse("TALLY_HISTORY_MONTHS")
                .filter(|m: &u32| *m > 0)
                .unwrap_or(defaults.history_months),
            trend_months: env_parse("TALLY_TREND_MONTHS")
                .filter(|m: &u32| *m > 0)
                .unwrap_or(defaults.trend_months),
            rules: defaults.rules,
        };

        Self {
            host: env::var("TALLY_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("TALLY_PORT").unwrap_or(7070),
            database_path: env::var("TALLY_DATABASE_URL")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or_else(|_| PathBuf::from("data/tally.db")),
            migrations_path: env::var("TALLY_MIGRATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("migrations")),
            insights,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
