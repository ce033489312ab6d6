use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("element `{0}` is missing from the page")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Browser(String),
    #[error("network request failed: {0}")]
    Network(String),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("content data is malformed: {0}")]
    Content(#[from] serde_json::Error),
    #[error("share failed: {0}")]
    Share(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Browser(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_net::Error> for SiteError {
    fn from(value: gloo_net::Error) -> Self {
        Self::Network(value.to_string())
    }
}
