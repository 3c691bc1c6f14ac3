//! `window.fetch` as a [`DataSource`].

use crate::domain::error::{BlogfrontError, Result};
use crate::fetch::{DataSource, HttpResponse};
use futures_util::future::LocalBoxFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

#[derive(Debug, Clone)]
pub struct BrowserFetch {
    window: Window,
}

impl BrowserFetch {
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

fn network(e: &wasm_bindgen::JsValue) -> BlogfrontError {
    BlogfrontError::Network(super::js_error_message(e))
}

impl DataSource for BrowserFetch {
    fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse>> {
        Box::pin(async move {
            let value = JsFuture::from(self.window.fetch_with_str(url))
                .await
                .map_err(|e| network(&e))?;
            let response: Response = value.dyn_into().map_err(|e| network(&e))?;

            let status = response.status();
            let text = JsFuture::from(response.text().map_err(|e| network(&e))?)
                .await
                .map_err(|e| network(&e))?;

            Ok(HttpResponse::new(status, text.as_string().unwrap_or_default()))
        })
    }
}
