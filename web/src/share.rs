use anyhow::{Context, anyhow, bail};
use gloo::dialogs::{alert, prompt};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

async fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let navigator = gloo::utils::window().navigator();

    // absent outside secure contexts
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|err| anyhow!("{:?}", err))
        .context("reading navigator.clipboard")?;
    if clipboard.is_undefined() || clipboard.is_null() {
        bail!("clipboard API unavailable");
    }

    let clipboard: web_sys::Clipboard = clipboard.unchecked_into();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|err| anyhow!("{:?}", err))
        .context("writing to clipboard")?;
    Ok(())
}

/// Copies `text` to the clipboard, or hands it to the player in a prompt
/// when that is not possible.
pub(crate) fn share(text: String) {
    wasm_bindgen_futures::spawn_local(async move {
        match copy_to_clipboard(&text).await {
            Ok(()) => {
                log::debug!("share text copied");
                alert("Copied to clipboard!");
            }
            Err(err) => {
                log::info!("clipboard copy failed, falling back to prompt: {:#}", err);
                prompt("Copy this:", Some(&text));
            }
        }
    });
}
