//! Dashboard configuration.

/// Endpoints and UI timings.
///
/// The defaults match the extraction backend's routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub upload_path: String,
    pub cancel_path: String,
    /// Push channel path, the task id is appended.
    pub push_path_prefix: String,
    /// Shown in the log when the output directory is blank.
    pub default_output_dir: String,
    pub alert_dismiss_ms: u32,
    /// Delay between fading an alert and removing it.
    pub alert_fade_ms: u32,
    pub help_modal_delay_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upload_path: "/api/upload".to_string(),
            cancel_path: "/api/cancel".to_string(),
            push_path_prefix: "/ws/".to_string(),
            default_output_dir: "./output".to_string(),
            alert_dismiss_ms: 5000,
            alert_fade_ms: 150,
            help_modal_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let config = DashboardConfig::default();
        assert_eq!(config.upload_path, "/api/upload");
        assert_eq!(config.cancel_path, "/api/cancel");
        assert_eq!(config.push_path_prefix, "/ws/");
        assert_eq!(config.alert_dismiss_ms, 5000);
    }
}
