use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub analysis: AnalysisConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Settings for the trailing-window trade analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Trades with a trade date inside the last `window_days` are analyzed.
    pub window_days: u32,
    /// Failed trades above this value-at-risk are flagged as high risk.
    pub high_risk_var_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub default_count: u32,
    pub batch_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/trading_db".to_string(),
                max_connections: 10,
            },
            analysis: AnalysisConfig {
                window_days: 90,
                high_risk_var_threshold: 1000.0,
            },
            generator: GeneratorConfig {
                default_count: 1000,
                batch_size: 100,
            },
        }
    }
}
