//! Push channel addressing.

use crate::config::DashboardConfig;

/// WebSocket URL for a task's push channel.
///
/// `protocol` is the page's `location.protocol` (`"https:"` or `"http:"`),
/// `host` its `location.host`.
pub fn push_channel_url(config: &DashboardConfig, protocol: &str, host: &str, task_id: &str) -> String {
    let scheme = if protocol == "https:" { "wss:" } else { "ws:" };
    format!("{}//{}{}{}", scheme, host, config.push_path_prefix, task_id)
}
