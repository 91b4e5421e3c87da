use anyhow::{anyhow, bail};
use heart_core::{decode_mesh, HeartError, TriMesh};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| anyhow!("request {}: {:?}", url, e))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        bail!("GET {} failed: HTTP {}", url, resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow!("body {}: {:?}", url, e))?;
    let buf = JsFuture::from(body)
        .await
        .map_err(|e| anyhow!("body {}: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch the heart model and decode it by extension (OBJ or GLB).
pub async fn load_heart_mesh(url: &str) -> anyhow::Result<TriMesh> {
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| HeartError::AssetLoad(format!("{url}: {e:#}")))?;
    let mesh = decode_mesh(url, &bytes)?;
    log::info!(
        "[asset] {} bytes={} vertices={} triangles={}",
        url,
        bytes.len(),
        mesh.positions.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
