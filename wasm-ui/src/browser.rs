//! Browser capabilities and small window helpers.

use js_sys::{Date, Function, Promise, Reflect};
use tasdeed_dashboard::{format_time_of_day, is_firefox};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Local wall-clock time as `HH:MM:SS`.
pub fn time_of_day() -> String {
    let now = Date::new_0();
    format_time_of_day(now.get_hours(), now.get_minutes(), now.get_seconds())
}

/// `location.protocol` and `location.host` of the page.
pub fn location() -> (String, String) {
    let location = gloo::utils::window().location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_default();
    (protocol, host)
}

pub fn confirm(message: &str) -> bool {
    gloo::dialogs::confirm(message)
}

/// What the browser tells us about itself.
#[derive(Clone, PartialEq, Debug)]
pub struct BrowserInfo {
    pub user_agent: String,
    pub platform: String,
    /// `showDirectoryPicker` (File System Access API) is available.
    pub supports_directory_picker: bool,
}

impl BrowserInfo {
    pub fn detect() -> Self {
        let window = gloo::utils::window();
        let navigator = window.navigator();
        let supports_directory_picker =
            Reflect::has(&window, &JsValue::from_str("showDirectoryPicker")).unwrap_or(false);
        Self {
            user_agent: navigator.user_agent().unwrap_or_default(),
            platform: navigator.platform().unwrap_or_default(),
            supports_directory_picker,
        }
    }

    pub fn is_firefox(&self) -> bool {
        is_firefox(&self.user_agent)
    }
}

/// Why a directory could not be picked.
#[derive(Clone, PartialEq, Debug)]
pub enum PickError {
    /// The user closed the picker.
    Aborted,
    Unsupported,
    Failed(String),
}

/// Ask the user for a directory and return its name.
pub async fn pick_directory() -> Result<String, PickError> {
    let window = gloo::utils::window();
    let picker: Function = Reflect::get(&window, &JsValue::from_str("showDirectoryPicker"))
        .ok()
        .and_then(|f| f.dyn_into().ok())
        .ok_or(PickError::Unsupported)?;

    let promise: Promise = picker
        .call0(&window)
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| PickError::Failed("directory picker did not return a promise".to_string()))?;

    let handle = JsFuture::from(promise).await.map_err(describe)?;
    Reflect::get(&handle, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .ok_or_else(|| PickError::Failed("selected directory has no name".to_string()))
}

fn describe(err: JsValue) -> PickError {
    let field = |key: &str| {
        Reflect::get(&err, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    };
    if field("name").as_deref() == Some("AbortError") {
        return PickError::Aborted;
    }
    PickError::Failed(
        field("message")
            .or_else(|| err.as_string())
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}
