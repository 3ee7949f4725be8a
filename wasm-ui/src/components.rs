//! UI components for the extraction dashboard.

use gloo::timers::callback::Timeout;
use tasdeed_dashboard::{Dashboard, LogEntry, Progress, Stats};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::alerts::{Alert, AlertAction};

/// Upload form: spreadsheet and output directory.
#[derive(Properties, PartialEq)]
pub struct UploadPageProps {
    pub output_dir: String,
    pub placeholder: String,
    /// Show the "Manual Entry Required" badge next to the directory label.
    #[prop_or(false)]
    pub manual_entry: bool,
    pub file_input: NodeRef,
    pub output_input: NodeRef,
    pub on_output_change: Callback<String>,
    pub on_browse: Callback<()>,
    pub on_submit: Callback<()>,
    pub on_help: Callback<()>,
}

#[function_component(UploadPage)]
pub fn upload_page(props: &UploadPageProps) -> Html {
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_input = {
        let on_change = props.on_output_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    let on_browse = props.on_browse.reform(|_: MouseEvent| ());
    let on_help = props.on_help.reform(|_: MouseEvent| ());

    html! {
        <div class="card upload-card">
            <div class="card-header">
                <h2>{ "Start Extraction" }</h2>
            </div>
            <div class="card-body">
                <form id="upload-form" onsubmit={on_submit}>
                    <div class="mb-3">
                        <label for="file-upload" class="form-label">{ "Accounts file" }</label>
                        <input
                            type="file"
                            id="file-upload"
                            class="form-control"
                            accept=".xlsx,.csv"
                            ref={props.file_input.clone()}
                        />
                        <div class="form-text">
                            { "Excel or CSV with ACCOUNTNO and SUBTYPE columns" }
                        </div>
                    </div>
                    <div class="mb-3">
                        <label for="output-dir" class="form-label">
                            { "Output directory" }
                            if props.manual_entry {
                                { " " }
                                <span class="badge bg-info">{ "Manual Entry Required" }</span>
                            }
                        </label>
                        <div class="input-group">
                            <input
                                type="text"
                                id="output-dir"
                                class="form-control"
                                placeholder={props.placeholder.clone()}
                                value={props.output_dir.clone()}
                                oninput={on_input}
                                ref={props.output_input.clone()}
                            />
                            <button type="button" id="output-dir-btn" class="btn btn-outline-secondary" onclick={on_browse}>
                                { "Browse" }
                            </button>
                            <button type="button" class="btn btn-outline-info" onclick={on_help}>
                                { "?" }
                            </button>
                        </div>
                    </div>
                    <button type="submit" id="start-btn" class="btn btn-primary">
                        { "Start Processing" }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressPanelProps {
    pub progress: Progress,
}

#[function_component(ProgressPanel)]
pub fn progress_panel(props: &ProgressPanelProps) -> Html {
    let pct = props.progress.percentage();
    html! {
        <div class="progress-panel">
            <div class="progress-header">
                <span id="progress-text">{ props.progress.label() }</span>
                <span id="progress-percentage">{ format!("{}%", pct) }</span>
            </div>
            <div class="progress">
                <div
                    id="progress-bar"
                    class="progress-bar progress-bar-striped progress-bar-animated"
                    role="progressbar"
                    style={format!("width: {}", props.progress.bar_width())}
                    aria-valuenow={pct.to_string()}
                    aria-valuemin="0"
                    aria-valuemax="100"
                />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
    pub stats: Stats,
}

#[function_component(StatsPanel)]
pub fn stats_panel(props: &StatsPanelProps) -> Html {
    let counter = |id: &'static str, label: &'static str, class: &'static str, value: u64| {
        html! {
            <div class={classes!("stat", class)}>
                <span class="stat-value" id={id}>{ value }</span>
                <span class="stat-label">{ label }</span>
            </div>
        }
    };

    html! {
        <div class="stats-panel">
            { counter("success-count", "Success", "stat-success", props.stats.success) }
            { counter("failed-count", "Failed", "stat-failed", props.stats.failed) }
            { counter("total-count", "Total", "stat-total", props.stats.total) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LogPanelProps {
    pub entries: Vec<LogEntry>,
}

/// Activity log, kept scrolled to the newest line.
#[function_component(LogPanel)]
pub fn log_panel(props: &LogPanelProps) -> Html {
    let container = use_node_ref();

    {
        let container = container.clone();
        use_effect_with(props.entries.len(), move |_| {
            if let Some(el) = container.cast::<web_sys::Element>() {
                el.set_scroll_top(el.scroll_height());
            }
            || ()
        });
    }

    html! {
        <div id="log-container" class="log-container" ref={container}>
            { for props.entries.iter().map(|entry| html! {
                <div class={entry.css_class()}>{ entry.text() }</div>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProcessingPageProps {
    pub dashboard: Dashboard,
    pub on_cancel: Callback<()>,
    pub on_finish: Callback<()>,
}

#[function_component(ProcessingPage)]
pub fn processing_page(props: &ProcessingPageProps) -> Html {
    let dash = &props.dashboard;
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    let on_finish = props.on_finish.reform(|_: MouseEvent| ());

    html! {
        <div class="card processing-card">
            <div class="card-header">
                <h2>{ "Processing" }</h2>
            </div>
            <div class="card-body">
                <ProgressPanel progress={dash.progress()} />
                <StatsPanel stats={dash.stats()} />
                <LogPanel entries={dash.log().entries().to_vec()} />
                <div class="button-row">
                    if dash.cancel_visible() {
                        <button id="cancel-btn" class="btn btn-danger" onclick={on_cancel}>
                            { "Cancel" }
                        </button>
                    }
                    if dash.finish_visible() {
                        <button id="finish-btn" class="btn btn-success" onclick={on_finish}>
                            { "Finish" }
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AlertItemProps {
    alert: Alert,
    dismiss_ms: u32,
    fade_ms: u32,
    on_action: Callback<AlertAction>,
}

/// One alert; schedules its own fade-out and removal.
#[function_component(AlertItem)]
fn alert_item(props: &AlertItemProps) -> Html {
    {
        let id = props.alert.id;
        let on_action = props.on_action.clone();
        let dismiss_ms = props.dismiss_ms;
        let fade_ms = props.fade_ms;
        use_effect_with(id, move |id| {
            let id = *id;
            let fade = {
                let on_action = on_action.clone();
                Timeout::new(dismiss_ms, move || on_action.emit(AlertAction::Fade(id)))
            };
            let remove = Timeout::new(dismiss_ms.saturating_add(fade_ms), move || {
                on_action.emit(AlertAction::Remove(id))
            });
            move || {
                fade.cancel();
                remove.cancel();
            }
        });
    }

    let on_close = {
        let id = props.alert.id;
        props.on_action.reform(move |_: MouseEvent| AlertAction::Remove(id))
    };

    html! {
        <div class="container mt-3">
            <div class={props.alert.class()} role="alert">
                { &props.alert.message }
                <button type="button" class="btn-close" aria-label="Close" onclick={on_close} />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertHostProps {
    pub alerts: Vec<Alert>,
    pub dismiss_ms: u32,
    pub fade_ms: u32,
    pub on_action: Callback<AlertAction>,
}

#[function_component(AlertHost)]
pub fn alert_host(props: &AlertHostProps) -> Html {
    html! {
        <div class="alert-host">
            { for props.alerts.iter().map(|alert| html! {
                <AlertItem
                    key={alert.id}
                    alert={alert.clone()}
                    dismiss_ms={props.dismiss_ms}
                    fade_ms={props.fade_ms}
                    on_action={props.on_action.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HelpModalProps {
    pub on_close: Callback<()>,
}

/// Guidance for typing an output path by hand.
#[function_component(HelpModal)]
pub fn help_modal(props: &HelpModalProps) -> Html {
    let on_overlay = props.on_close.reform(|_: MouseEvent| ());
    let on_button = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-overlay" onclick={on_overlay}>
            <div class="modal-dialog" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <h3 class="modal-title">{ "Entering the output directory" }</h3>
                <div class="modal-content">
                    <p>{ "Your browser cannot browse for folders, so type the full path where results should be saved." }</p>
                    <ul>
                        <li>{ r"Windows: C:\Users\YourUsername\Documents\tasdeed_output" }</li>
                        <li>{ "macOS: /Users/YourUsername/Documents/tasdeed_output" }</li>
                        <li>{ "Linux: /home/YourUsername/tasdeed_output" }</li>
                    </ul>
                    <p>{ "Relative paths are resolved on the server. The directory is created if it does not exist." }</p>
                </div>
                <div class="modal-buttons">
                    <button class="modal-button next" onclick={on_button}>{ "Got it" }</button>
                </div>
            </div>
        </div>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <span>{ "Tasdeed Extraction Dashboard" }</span>
            <span class="footer-build">
                { format!("Build: {}@{} {}", env!("BUILD_HOST"), env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
            </span>
        </footer>
    }
}
