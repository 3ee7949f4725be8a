//! Requests to the extraction backend.

use gloo_net::http::{Request, Response};
use tasdeed_dashboard::{
    CancelAck, CancelRequest, DashboardConfig, DashboardError, UploadResponse, error_reason,
};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

fn transport(err: impl std::fmt::Display) -> DashboardError {
    DashboardError::Transport(err.to_string())
}

fn js_transport(err: JsValue) -> DashboardError {
    DashboardError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Status and backend-provided reason of a non-2xx response.
async fn rejection(response: Response) -> (u16, Option<String>) {
    let status = response.status();
    let reason = response.text().await.ok().and_then(|body| error_reason(&body));
    (status, reason)
}

/// Upload the spreadsheet and start the extraction job.
///
/// The file is sent under its own name so the backend can tell `.xlsx`
/// from `.csv`.
pub async fn upload(
    config: &DashboardConfig,
    file: &File,
    output_dir: &str,
) -> Result<UploadResponse, DashboardError> {
    let form = FormData::new().map_err(js_transport)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_transport)?;
    form.append_with_str("output_dir", output_dir)
        .map_err(js_transport)?;

    let response = Request::post(&config.upload_path)
        .body(form)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;

    if !response.ok() {
        let (status, reason) = rejection(response).await;
        return Err(DashboardError::UploadRejected { status, reason });
    }

    response.json::<UploadResponse>().await.map_err(transport)
}

/// Ask the backend to stop a running job.
pub async fn cancel(
    config: &DashboardConfig,
    task_id: Option<String>,
) -> Result<CancelAck, DashboardError> {
    let response = Request::post(&config.cancel_path)
        .json(&CancelRequest { task_id })
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;

    if !response.ok() {
        let (status, reason) = rejection(response).await;
        return Err(DashboardError::CancelRejected { status, reason });
    }

    response.json::<CancelAck>().await.map_err(transport)
}
