//! Output directory helpers.
//!
//! Browsers never reveal the full path of a directory picked through
//! `showDirectoryPicker`, only its name, so the picked name is merged into
//! whatever the user already typed. Browsers without a picker get a
//! platform-flavoured suggestion instead.

/// Operating system family, as far as `navigator.platform` tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Other,
}

impl Platform {
    pub fn detect(navigator_platform: &str) -> Self {
        if navigator_platform.contains("Win") {
            Platform::Windows
        } else if navigator_platform.contains("Mac") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

pub fn suggested_output_dir(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => r"C:\Users\YourUsername\Documents\tasdeed_output",
        Platform::Mac => "/Users/YourUsername/Documents/tasdeed_output",
        Platform::Other => "/home/YourUsername/tasdeed_output",
    }
}

pub fn example_placeholder(platform: Platform) -> String {
    format!("Example: {}", suggested_output_dir(platform))
}

pub fn is_firefox(user_agent: &str) -> bool {
    user_agent.to_lowercase().contains("firefox")
}

/// Combine the typed output path with the name of a picked directory.
///
/// - blank path: `./<picked>`
/// - path ending in a separator: `<path><picked>`
/// - otherwise the last component is replaced and `/` joins the parts
pub fn merge_picked_directory(current: &str, picked: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        return format!("./{}", picked);
    }
    if current.ends_with('/') || current.ends_with('\\') {
        return format!("{}{}", current, picked);
    }

    let mut parts: Vec<&str> = current.split(['/', '\\']).collect();
    parts.pop();
    parts.push(picked);
    parts.join("/")
}
