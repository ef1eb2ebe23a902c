//! Host bootstrap configuration.

use compute_bridge::BridgeConfig;

/// Window and logging settings plus the bridge's own configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub bridge: BridgeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "GL Compute demo".to_string(),
            window_size: [800.0, 600.0],
            log_filter: "info".to_string(),
            bridge: BridgeConfig::default(),
        }
    }
}
