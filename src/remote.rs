//! Shared global counter on Supabase (PostgREST).
//!
//! Two calls: a read of the single `global_clicks.count` row on mount, and the
//! `increment_clicks` RPC per click. Neither is retried; callers log failures
//! and keep their last known value.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub enum RemoteError {
    #[error("remote counter not configured")]
    NotConfigured,
    #[error("fetch error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected payload: {0}")]
    Payload(String),
}

#[derive(Debug, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct CountRow {
    count: i64,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn non_negative(n: i64) -> Result<u64, RemoteError> {
    u64::try_from(n).map_err(|_| RemoteError::Payload(format!("negative count {n}")))
}

/// Parse the `select=count` response. PostgREST returns an array of rows.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn parse_count_rows(text: &str) -> Result<u64, RemoteError> {
    let rows: Vec<CountRow> =
        serde_json::from_str(text).map_err(|e| RemoteError::Payload(format!("parse rows: {e}")))?;
    let row = rows
        .first()
        .ok_or_else(|| RemoteError::Payload("no global count row".to_string()))?;
    non_negative(row.count)
}

/// Parse the RPC response: a bare integer.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn parse_rpc_count(text: &str) -> Result<u64, RemoteError> {
    let n: i64 =
        serde_json::from_str(text).map_err(|e| RemoteError::Payload(format!("parse rpc: {e}")))?;
    non_negative(n)
}

#[cfg(target_arch = "wasm32")]
pub use client::SupabaseCounter;

/// Host builds have no `fetch`; every call reports the counter as unavailable.
#[cfg(not(target_arch = "wasm32"))]
pub struct SupabaseCounter;

#[cfg(not(target_arch = "wasm32"))]
impl SupabaseCounter {
    pub fn new(_config: crate::config::RemoteConfig) -> Self {
        Self
    }

    pub async fn fetch_count(&self) -> Result<u64, RemoteError> {
        Err(RemoteError::NotConfigured)
    }

    pub async fn increment_and_get(&self) -> Result<u64, RemoteError> {
        Err(RemoteError::NotConfigured)
    }
}

#[cfg(target_arch = "wasm32")]
mod client {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    use super::{parse_count_rows, parse_rpc_count, RemoteError};
    use crate::config::{RemoteConfig, GLOBAL_TABLE, INCREMENT_RPC};

    pub struct SupabaseCounter {
        config: RemoteConfig,
    }

    impl SupabaseCounter {
        pub fn new(config: RemoteConfig) -> Self {
            Self { config }
        }

        /// Current global count, read-only.
        pub async fn fetch_count(&self) -> Result<u64, RemoteError> {
            let url = format!(
                "{}?select=count&limit=1",
                self.config.rest_url(GLOBAL_TABLE)
            );
            let text = self.send("GET", &url, None).await?;
            parse_count_rows(&text)
        }

        /// Atomically increment and return the new global count.
        pub async fn increment_and_get(&self) -> Result<u64, RemoteError> {
            let url = self.config.rest_url(&format!("rpc/{INCREMENT_RPC}"));
            let text = self.send("POST", &url, Some("{}")).await?;
            parse_rpc_count(&text)
        }

        fn headers(&self) -> Result<Headers, JsValue> {
            let headers = Headers::new()?;
            headers.set("apikey", &self.config.anon_key)?;
            headers.set("Authorization", &format!("Bearer {}", self.config.anon_key))?;
            headers.set("Content-Type", "application/json")?;
            Ok(headers)
        }

        async fn send(
            &self,
            method: &str,
            url: &str,
            body: Option<&str>,
        ) -> Result<String, RemoteError> {
            if !self.config.is_enabled() {
                return Err(RemoteError::NotConfigured);
            }
            let js_err = |e: JsValue| RemoteError::Network(format!("{e:?}"));

            let headers = self.headers().map_err(js_err)?;
            let opts = RequestInit::new();
            opts.set_method(method);
            opts.set_headers(&headers.into());
            opts.set_mode(RequestMode::Cors);
            if let Some(body) = body {
                opts.set_body(&JsValue::from_str(body));
            }

            let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
            let window =
                web_sys::window().ok_or_else(|| RemoteError::Network("no window".to_string()))?;
            let resp_val = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(js_err)?;
            let resp: Response = resp_val
                .dyn_into()
                .map_err(|_| RemoteError::Network("not a Response".to_string()))?;

            let text = Self::text(&resp).await?;
            if !resp.ok() {
                return Err(RemoteError::Status {
                    status: resp.status(),
                    body: text,
                });
            }
            Ok(text)
        }

        async fn text(resp: &Response) -> Result<String, RemoteError> {
            let js_err = |e: JsValue| RemoteError::Network(format!("{e:?}"));
            let text = JsFuture::from(resp.text().map_err(js_err)?)
                .await
                .map_err(js_err)?;
            text.as_string()
                .ok_or_else(|| RemoteError::Payload("body is not a string".to_string()))
        }
    }
}
