use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::page::PageError;
use crate::services::{Clipboard, Timers};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = hljs, js_name = highlightAll)]
    fn hljs_highlight_all() -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Highlight every code block with highlight.js, if the page loaded it.
pub fn highlight_all() {
    if let Err(err) = hljs_highlight_all() {
        log::debug!("highlight.js unavailable: {:?}", err);
    }
}

/// `navigator.clipboard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PageError>> {
        let promise = clipboard_write_text(text);
        async move {
            let promise = promise.map_err(PageError::from_js)?;
            JsFuture::from(promise).await.map_err(PageError::from_js)?;
            Ok(())
        }
        .boxed_local()
    }
}

/// `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        // Timers outlive the handler that scheduled them.
        Timeout::new(delay_ms, callback).forget();
    }
}
