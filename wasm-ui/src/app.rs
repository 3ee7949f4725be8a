//! Main application component.

use gloo::console;
use gloo::timers::callback::Timeout;
use tasdeed_dashboard::{
    DashboardConfig, Event, Page, Platform, PushMessage, UploadForm, example_placeholder,
    merge_picked_directory, push_channel_url, suggested_output_dir,
};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::alerts::{AlertAction, AlertKind, AlertStore};
use crate::api;
use crate::browser::{self, BrowserInfo, PickError};
use crate::components::{AlertHost, Footer, HelpModal, ProcessingPage, UploadPage};
use crate::push::{self, ChannelSlot, PushChannel, PushHandlers};
use crate::store::DashboardStore;

const DEFAULT_PLACEHOLDER: &str = "Enter the directory results should be saved to";
const CANCEL_PROMPT: &str = "Are you sure you want to cancel the current process?";
const SUGGESTED_PATH_NOTICE: &str = "A default output path has been suggested. \
    Please replace \"YourUsername\" with your actual username or enter a different path.";
const FIREFOX_PICKER_HINT: &str = "Firefox doesn't support directory browsing for security reasons. \
    We've suggested a path below, but you'll need to customize it for your system. \
    Make sure the directory exists or will be created automatically.";
const GENERIC_PICKER_HINT: &str = "Your browser doesn't support directory browsing. \
    Please enter the output directory path manually. Use an absolute path for best results.";

/// Open the push channel for `task_id`, replacing any previous one.
fn connect_push(
    config: &DashboardConfig,
    task_id: &str,
    store: &UseReducerDispatcher<DashboardStore>,
    slot: &ChannelSlot,
) {
    if let Some(previous) = push::release(slot) {
        console::log!(format!("replacing push channel for task {}", previous));
    }

    let (protocol, host) = browser::location();
    let url = push_channel_url(config, &protocol, &host, task_id);

    let handlers = PushHandlers {
        on_open: {
            let store = store.clone();
            Callback::from(move |_| {
                console::log!("WebSocket connected");
                store.dispatch(Event::ChannelOpened);
            })
        },
        on_message: {
            let store = store.clone();
            Callback::from(move |text: String| match PushMessage::decode(&text) {
                Ok(message) => store.dispatch(Event::Push(message)),
                Err(err) => console::warn!(format!("dropping push frame: {}", err)),
            })
        },
        on_error: {
            let store = store.clone();
            Callback::from(move |_| {
                console::error!("WebSocket error");
                store.dispatch(Event::ChannelError);
            })
        },
        on_close: {
            let store = store.clone();
            Callback::from(move |_| {
                console::log!("WebSocket disconnected");
                store.dispatch(Event::ChannelClosed);
            })
        },
    };

    match PushChannel::connect(&url, task_id, handlers) {
        Ok(channel) => push::install(slot, channel),
        Err(err) => {
            console::error!("failed to open push channel", err);
            store.dispatch(Event::ChannelError);
        }
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| DashboardConfig::default());
    let store = use_reducer(DashboardStore::default);
    let alerts = use_reducer(AlertStore::default);
    let channel: ChannelSlot = use_mut_ref(|| None);

    let output_dir = use_state(String::new);
    let placeholder = use_state(|| DEFAULT_PLACEHOLDER.to_string());
    let manual_entry = use_state(|| false);
    let help_open = use_state(|| false);
    let file_input = use_node_ref();
    let output_input = use_node_ref();

    // Browser compatibility: browsers without a directory picker get a
    // suggested path and the path-help dialog.
    {
        let config = config.clone();
        let alerts = alerts.dispatcher();
        let output_dir = output_dir.clone();
        let placeholder = placeholder.clone();
        let manual_entry = manual_entry.clone();
        let help_open = help_open.clone();
        let output_input = output_input.clone();

        use_effect_with((), move |_| {
            let info = BrowserInfo::detect();
            let mut help_timer = None;

            if info.is_firefox() && !info.supports_directory_picker {
                manual_entry.set(true);

                let input = output_input.cast::<HtmlInputElement>();
                let current = input.as_ref().map(|i| i.value()).unwrap_or_default();
                if current.trim().is_empty() {
                    let platform = Platform::detect(&info.platform);
                    let suggestion = suggested_output_dir(platform).to_string();
                    placeholder.set(example_placeholder(platform));
                    alerts.dispatch(AlertAction::Show(
                        AlertKind::Info,
                        SUGGESTED_PATH_NOTICE.to_string(),
                    ));
                    if let Some(input) = input {
                        input.set_value(&suggestion);
                        input.select();
                    }
                    output_dir.set(suggestion);
                }

                help_timer = Some(Timeout::new(config.help_modal_delay_ms, move || {
                    help_open.set(true)
                }));
            }

            move || {
                if let Some(timer) = help_timer {
                    timer.cancel();
                }
            }
        });
    }

    // The push channel has no further use once the job has finished.
    {
        let channel = channel.clone();
        use_effect_with(store.dashboard.wants_channel_closed(), move |closed| {
            if *closed && let Some(task_id) = push::release(&channel) {
                console::log!(format!("closed push channel for task {}", task_id));
            }
            || ()
        });
    }

    let on_output_change = {
        let output_dir = output_dir.clone();
        Callback::from(move |value: String| output_dir.set(value))
    };

    let on_submit = {
        let config = config.clone();
        let store = store.clone();
        let alerts = alerts.clone();
        let channel = channel.clone();
        let file_input = file_input.clone();
        let output_dir = output_dir.clone();
        Callback::from(move |_: ()| {
            let file = file_input
                .cast::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let valid = match UploadForm::new(file, (*output_dir).clone()).validate() {
                Ok(valid) => valid,
                Err(err) => {
                    alerts.dispatch(AlertAction::Show(AlertKind::Warning, err.to_string()));
                    return;
                }
            };

            store.dispatch(Event::Started);

            let config = config.clone();
            let store = store.dispatcher();
            let channel = channel.clone();
            spawn_local(async move {
                match api::upload(&config, &valid.file, &valid.output_dir).await {
                    Ok(response) => {
                        let task_id = response.task_id.clone();
                        // Logged before connecting, so a socket that fails to
                        // open reports its error after the start lines.
                        store.dispatch(Event::UploadAccepted {
                            response,
                            file_name: valid.file.name(),
                            output_dir: valid.output_dir,
                        });
                        connect_push(&config, &task_id, &store, &channel);
                    }
                    Err(err) => {
                        console::error!(format!("upload failed: {}", err));
                        store.dispatch(Event::UploadFailed(err.to_string()));
                    }
                }
            });
        })
    };

    let on_cancel = {
        let config = config.clone();
        let store = store.clone();
        Callback::from(move |_: ()| {
            if !store.dashboard.can_cancel() {
                return;
            }
            if !browser::confirm(CANCEL_PROMPT) {
                return;
            }

            let task_id = store.dashboard.task_id().map(str::to_string);
            let config = config.clone();
            let store = store.dispatcher();
            spawn_local(async move {
                match api::cancel(&config, task_id).await {
                    Ok(_) => store.dispatch(Event::CancelAcknowledged),
                    Err(err) => {
                        console::error!(format!("cancel failed: {}", err));
                        store.dispatch(Event::CancelFailed(err.to_string()));
                    }
                }
            });
        })
    };

    let on_finish = {
        let store = store.clone();
        Callback::from(move |_: ()| store.dispatch(Event::Acknowledged))
    };

    let on_browse = {
        let alerts = alerts.clone();
        let output_dir = output_dir.clone();
        let output_input = output_input.clone();
        Callback::from(move |_: ()| {
            let info = BrowserInfo::detect();
            if !info.supports_directory_picker {
                let hint = if info.is_firefox() {
                    FIREFOX_PICKER_HINT
                } else {
                    GENERIC_PICKER_HINT
                };
                alerts.dispatch(AlertAction::Show(AlertKind::Info, hint.to_string()));
                if let Some(input) = output_input.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
                return;
            }

            let alerts = alerts.dispatcher();
            let output_dir = output_dir.clone();
            let output_input = output_input.clone();
            spawn_local(async move {
                match browser::pick_directory().await {
                    Ok(name) => {
                        let current = output_input
                            .cast::<HtmlInputElement>()
                            .map(|input| input.value())
                            .unwrap_or_default();
                        let merged = merge_picked_directory(&current, &name);
                        alerts.dispatch(AlertAction::Show(
                            AlertKind::Success,
                            format!(
                                "Directory selected: {}. Path set to: {}. You can edit this path if needed.",
                                name, merged
                            ),
                        ));
                        output_dir.set(merged);
                    }
                    Err(PickError::Aborted) => {}
                    Err(PickError::Unsupported) => {
                        alerts.dispatch(AlertAction::Show(
                            AlertKind::Info,
                            GENERIC_PICKER_HINT.to_string(),
                        ));
                    }
                    Err(PickError::Failed(message)) => {
                        console::error!(format!("error selecting directory: {}", message));
                        alerts.dispatch(AlertAction::Show(
                            AlertKind::Error,
                            format!("Error selecting directory: {}", message),
                        ));
                    }
                }
            });
        })
    };

    let on_help = {
        let help_open = help_open.clone();
        Callback::from(move |_: ()| help_open.set(true))
    };

    let on_help_close = {
        let help_open = help_open.clone();
        Callback::from(move |_: ()| help_open.set(false))
    };

    let on_alert = {
        let alerts = alerts.clone();
        Callback::from(move |action: AlertAction| alerts.dispatch(action))
    };

    let page = store.dashboard.page();

    html! {
        <div class="app">
            <AlertHost
                alerts={alerts.alerts().to_vec()}
                dismiss_ms={config.alert_dismiss_ms}
                fade_ms={config.alert_fade_ms}
                on_action={on_alert}
            />

            <header class="header">
                <h1>{ "Tasdeed Extraction Dashboard" }</h1>
                <p class="subtitle">{ "Upload an accounts file and follow the extraction live" }</p>
            </header>

            <main class="main">
                // Both pages stay mounted so the selected file survives a round trip.
                <div id="upload-page" class={classes!("page", (page == Page::Upload).then_some("active"))}>
                    <UploadPage
                        output_dir={(*output_dir).clone()}
                        placeholder={(*placeholder).clone()}
                        manual_entry={*manual_entry}
                        file_input={file_input}
                        output_input={output_input}
                        on_output_change={on_output_change}
                        on_browse={on_browse}
                        on_submit={on_submit}
                        on_help={on_help}
                    />
                </div>
                <div id="processing-page" class={classes!("page", (page == Page::Processing).then_some("active"))}>
                    <ProcessingPage
                        dashboard={store.dashboard.clone()}
                        on_cancel={on_cancel}
                        on_finish={on_finish}
                    />
                </div>
            </main>

            if *help_open {
                <HelpModal on_close={on_help_close} />
            }

            <Footer />
        </div>
    }
}
