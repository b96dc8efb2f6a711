use gloo::file::{
  Blob,
  ObjectUrl
};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;

// Browsers read the object URL after the
// click handler returns.
const REVOKE_DELAY_MS: u32 = 1_000;

/// Offers `contents` as a file download
/// through a temporary anchor element.
pub fn download_text(
  file_name: &str,
  mime_type: &str,
  contents: &str
) -> Result<(), String> {
  let document = web_sys::window()
    .and_then(|window| window.document())
    .ok_or_else(|| {
      "no document available".to_string()
    })?;

  let blob = Blob::new_with_options(
    contents,
    Some(mime_type)
  );
  let url = ObjectUrl::from(blob);

  let anchor = document
    .create_element("a")
    .map_err(|e| {
      format!("failed to create anchor: {e:?}")
    })?;
  anchor
    .set_attribute("href", &url)
    .map_err(|e| format!("failed to set href: {e:?}"))?;
  anchor
    .set_attribute("download", file_name)
    .map_err(|e| {
      format!("failed to set download name: {e:?}")
    })?;

  let anchor = anchor
    .dyn_into::<web_sys::HtmlElement>()
    .map_err(|_| {
      "anchor is not an html element"
        .to_string()
    })?;
  anchor.click();

  Timeout::new(REVOKE_DELAY_MS, move || {
    drop(url)
  })
  .forget();

  tracing::info!(
    file = file_name,
    bytes = contents.len(),
    "offered download"
  );
  Ok(())
}
