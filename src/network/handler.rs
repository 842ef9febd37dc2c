//! Request Handler
//!
//! Maps HTTP method + path + body to a response. Independent of the HTTP
//! server so routes can be exercised directly.

use std::fs;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tiny_http::Method;

use crate::controller::{Action, Controller, TargetOverrides};
use crate::error::PanelError;
use crate::transport::Transport;
use super::api::{ErrorResponse, PanelCfg, PingResponse, PresetRequest, RawRequest, SendResponse};
use super::assets;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JS: &str = "application/javascript; charset=utf-8";
pub const CONTENT_TYPE_PDF: &str = "application/pdf";

/// A fully built HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<S: Serialize>(status: u16, value: &S) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: Some(CONTENT_TYPE_JSON),
                headers: Vec::new(),
                body,
            },
            Err(e) => {
                tracing::error!("failed to serialize response: {}", e);
                Self::error(500, "internal error")
            }
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        let body = serde_json::to_vec(&ErrorResponse::new(message)).unwrap_or_default();
        Self {
            status,
            content_type: Some(CONTENT_TYPE_JSON),
            headers: Vec::new(),
            body,
        }
    }

    pub fn text(status: u16, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some(content_type),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            content_type: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Parse the body as JSON, for tests and clients
    pub fn body_json<D: DeserializeOwned>(&self) -> serde_json::Result<D> {
        serde_json::from_slice(&self.body)
    }
}

/// Routes panel requests to the controller
pub struct Handler<T> {
    controller: Arc<Controller<T>>,
}

impl<T: Transport> Handler<T> {
    pub fn new(controller: Arc<Controller<T>>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &Controller<T> {
        &self.controller
    }

    /// Handle one request
    pub fn handle(&self, method: &Method, url: &str, body: &[u8]) -> ApiResponse {
        let path = url.split('?').next().unwrap_or(url);
        tracing::debug!("{:?} {}", method, path);

        match (method, path) {
            (Method::Get, "/") | (Method::Get, "/index.html") => ApiResponse::text(
                200,
                CONTENT_TYPE_HTML,
                assets::render_index(self.controller.config()),
            ),
            (Method::Get, "/static/js/app.js") => {
                ApiResponse::text(200, CONTENT_TYPE_JS, assets::APP_JS)
            }
            (Method::Post, "/api/preset") => self.preset(body),
            (Method::Post, "/api/raw") => self.raw(body),
            (Method::Get, "/api/ping") => ApiResponse::json(200, &PingResponse { ok: true }),
            (Method::Get, "/favicon.ico") => ApiResponse::no_content(),
            (Method::Get, "/manual.pdf") => self.manual(),
            (_, "/" | "/index.html" | "/static/js/app.js" | "/api/preset" | "/api/raw"
                | "/api/ping" | "/favicon.ico" | "/manual.pdf") => {
                ApiResponse::error(405, "method not allowed")
            }
            _ => ApiResponse::error(404, "not found"),
        }
    }

    fn preset(&self, body: &[u8]) -> ApiResponse {
        let req: PresetRequest = match parse_body(body) {
            Ok(req) => req,
            Err(resp) => return resp,
        };
        let action = Action::Preset(req.key.unwrap_or_default());
        self.dispatch(&action, req.cfg.as_ref())
    }

    fn raw(&self, body: &[u8]) -> ApiResponse {
        let req: RawRequest = match parse_body(body) {
            Ok(req) => req,
            Err(resp) => return resp,
        };
        let action = match req.cmd {
            Some(cmd) if !cmd.is_empty() => Action::Raw(cmd),
            _ => return client_error(&PanelError::MissingCommand),
        };
        self.dispatch(&action, req.cfg.as_ref())
    }

    fn dispatch(&self, action: &Action, cfg: Option<&PanelCfg>) -> ApiResponse {
        let overrides = match cfg.map(PanelCfg::overrides).transpose() {
            Ok(overrides) => overrides.unwrap_or_else(TargetOverrides::default),
            Err(e) => return client_error(&e),
        };

        match self.controller.execute(action, &overrides) {
            Ok(exchange) => {
                let status = if exchange.result.is_ok() { 200 } else { 502 };
                ApiResponse::json(status, &SendResponse::from(&exchange))
            }
            Err(e) if e.is_client_error() => client_error(&e),
            Err(e) => ApiResponse::error(500, e.to_string()),
        }
    }

    fn manual(&self) -> ApiResponse {
        let Some(path) = self.controller.config().manual_path.as_ref() else {
            tracing::info!("manual requested but no manual path configured");
            return ApiResponse::error(404, "manual not found on server");
        };

        match fs::read(path) {
            Ok(data) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().replace('"', ""))
                    .unwrap_or_else(|| "manual.pdf".to_string());
                let mut resp = ApiResponse::text(200, CONTENT_TYPE_PDF, data);
                resp.headers.push((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ));
                resp
            }
            Err(e) => {
                tracing::info!("manual not readable at {}: {}", path.display(), e);
                ApiResponse::error(404, "manual not found on server")
            }
        }
    }
}

fn parse_body<D: DeserializeOwned + Default>(body: &[u8]) -> Result<D, ApiResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(D::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| client_error(&PanelError::BadRequest(e.to_string())))
}

fn client_error(e: &PanelError) -> ApiResponse {
    tracing::info!("client error: {}", e);
    ApiResponse::error(400, e.to_string())
}
