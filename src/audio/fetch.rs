use spinwave_core::catalog::TRACK_LIST_PATH;
use spinwave_core::{TrackCatalog, VisualizerConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Optional override document for the visualizer constants.
pub const CONFIG_PATH: &str = "visualizer.json";

async fn fetch_ok(url: &str) -> Result<web_sys::Response, String> {
    let window = web_sys::window().ok_or("No window")?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| "Response cast failed".to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(resp)
}

pub async fn fetch_text(url: &str) -> Result<String, String> {
    let resp = fetch_ok(url).await?;
    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("text: {e:?}"))?;
    text.as_string().ok_or("Not a string".to_string())
}

/// Fetch `url` and wrap the body in an object URL. The caller owns the
/// returned URL and must revoke it.
pub async fn fetch_blob_url(url: &str) -> Result<String, String> {
    let resp = fetch_ok(url).await?;
    let blob_value = JsFuture::from(resp.blob().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("blob: {e:?}"))?;
    let blob: web_sys::Blob = blob_value
        .dyn_into()
        .map_err(|_| "Blob cast failed".to_string())?;
    web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("createObjectURL: {e:?}"))
}

pub async fn fetch_catalog() -> Result<TrackCatalog, String> {
    let text = fetch_text(TRACK_LIST_PATH).await?;
    TrackCatalog::from_json(&text)
}

pub async fn fetch_config() -> Result<VisualizerConfig, String> {
    let text = fetch_text(CONFIG_PATH).await?;
    VisualizerConfig::from_json(&text)
}
