//! Handler Tests
//!
//! Route-level tests against a recording transport, no sockets involved.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::RecordingTransport;
use projector_panel::config::Config;
use projector_panel::controller::Controller;
use projector_panel::network::api::{ErrorResponse, SendResponse};
use projector_panel::network::{ApiResponse, Handler, Method};
use projector_panel::protocol::CommandTable;
use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn handler_with(config: Config, transport: RecordingTransport) -> Handler<RecordingTransport> {
    let controller = Controller::with_transport(config, CommandTable::builtin(), transport);
    Handler::new(Arc::new(controller))
}

fn setup(transport: RecordingTransport) -> Handler<RecordingTransport> {
    let config = Config::builder()
        .projector_host("10.1.1.1")
        .projector_port(8000)
        .build();
    handler_with(config, transport)
}

fn post(handler: &Handler<RecordingTransport>, path: &str, body: &str) -> ApiResponse {
    handler.handle(&Method::Post, path, body.as_bytes())
}

fn get(handler: &Handler<RecordingTransport>, path: &str) -> ApiResponse {
    handler.handle(&Method::Get, path, b"")
}

fn error_of(resp: &ApiResponse) -> String {
    resp.body_json::<ErrorResponse>().unwrap().error
}

// =============================================================================
// Preset Route
// =============================================================================

#[test]
fn test_preset_success() {
    let handler = setup(RecordingTransport::replying("*POW=ON#"));
    let resp = post(&handler, "/api/preset", r#"{"key": "pow_on"}"#);

    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, Some("application/json"));
    let body: SendResponse = resp.body_json().unwrap();
    assert_eq!(body.sent, "*pow=on#");
    assert_eq!(body.response.as_deref(), Some("*POW=ON#"));
    assert_eq!(body.error, None);
}

#[test]
fn test_preset_empty_reply_is_success() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/preset", r#"{"key": "menu_on"}"#);

    assert_eq!(resp.status, 200);
    let body: Value = resp.body_json().unwrap();
    assert_eq!(body["response"], "");
}

#[test]
fn test_preset_unknown_key() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/preset", r#"{"key": "nope"}"#);

    assert_eq!(resp.status, 400);
    assert!(error_of(&resp).starts_with("unknown preset key"));
    assert_eq!(handler.controller().transport().calls(), 0);
}

#[test]
fn test_preset_missing_key() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/preset", "{}");

    assert_eq!(resp.status, 400);
    assert!(error_of(&resp).starts_with("unknown preset key"));
    assert_eq!(handler.controller().transport().calls(), 0);
}

#[test]
fn test_preset_cfg_overrides_target() {
    let handler = setup(RecordingTransport::replying(""));
    let body = r#"{"key": "pow_off", "cfg": {"ip": "192.168.7.7", "port": "4661", "wrapcr": true}}"#;
    let resp = post(&handler, "/api/preset", body);

    assert_eq!(resp.status, 200);
    let (target, _) = handler.controller().transport().last().unwrap();
    assert_eq!(target.host, "192.168.7.7");
    assert_eq!(target.port, 4661);
    assert!(target.wrap_cr);
}

#[test]
fn test_preset_blank_cfg_uses_defaults() {
    let handler = setup(RecordingTransport::replying(""));
    let body = r#"{"key": "pow_off", "cfg": {"ip": "", "port": null, "wrapcr": false}}"#;
    let resp = post(&handler, "/api/preset", body);

    assert_eq!(resp.status, 200);
    let (target, _) = handler.controller().transport().last().unwrap();
    assert_eq!(target.host, "10.1.1.1");
    assert_eq!(target.port, 8000);
    assert!(!target.wrap_cr);
}

#[test]
fn test_preset_invalid_port() {
    let handler = setup(RecordingTransport::replying(""));
    let body = r#"{"key": "pow_off", "cfg": {"port": "eighty"}}"#;
    let resp = post(&handler, "/api/preset", body);

    assert_eq!(resp.status, 400);
    assert!(error_of(&resp).contains("invalid port"));
    assert_eq!(handler.controller().transport().calls(), 0);
}

#[test]
fn test_preset_port_out_of_range() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/preset", r#"{"key": "up", "cfg": {"port": 70000}}"#);
    assert_eq!(resp.status, 400);
}

#[test]
fn test_transport_failure_is_bad_gateway() {
    let handler = setup(RecordingTransport::refusing());
    let resp = post(&handler, "/api/preset", r#"{"key": "pow_on"}"#);

    assert_eq!(resp.status, 502);
    let body: SendResponse = resp.body_json().unwrap();
    assert_eq!(body.sent, "*pow=on#");
    assert_eq!(body.response, None);
    assert!(body.error.unwrap().contains("connection refused"));
}

// =============================================================================
// Raw Route
// =============================================================================

#[test]
fn test_raw_success() {
    let handler = setup(RecordingTransport::replying("*SOUR=HDMI#"));
    let resp = post(&handler, "/api/raw", r#"{"cmd": "*sour=?"}"#);

    assert_eq!(resp.status, 200);
    let body: SendResponse = resp.body_json().unwrap();
    assert_eq!(body.sent, "*sour=?#");
    assert_eq!(body.response.as_deref(), Some("*SOUR=HDMI#"));
}

#[test]
fn test_raw_strips_cr_tokens() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/raw", r#"{"cmd": "<CR>*pow=?#<CR>"}"#);

    let body: SendResponse = resp.body_json().unwrap();
    assert_eq!(body.sent, "*pow=?#");
}

#[test]
fn test_raw_sent_matches_wire_command() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/raw", r#"{"cmd": "<CR>*pow=on<CR>"}"#);

    let body: SendResponse = resp.body_json().unwrap();
    let (_, command) = handler.controller().transport().last().unwrap();
    assert_eq!(body.sent, "*pow=on#");
    assert_eq!(body.sent, command.as_str());
}

#[test]
fn test_raw_missing_command() {
    let handler = setup(RecordingTransport::replying(""));
    for body in [r#"{}"#, r#"{"cmd": ""}"#, r#"{"cmd": null}"#] {
        let resp = post(&handler, "/api/raw", body);
        assert_eq!(resp.status, 400, "body {}", body);
        assert_eq!(error_of(&resp), "no command provided");
    }
    assert_eq!(handler.controller().transport().calls(), 0);
}

#[test]
fn test_raw_non_ascii_rejected() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/raw", r#"{"cmd": "*pow=ön"}"#);

    assert_eq!(resp.status, 400);
    assert!(error_of(&resp).starts_with("invalid command"));
    assert_eq!(handler.controller().transport().calls(), 0);
}

#[test]
fn test_malformed_json() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = post(&handler, "/api/raw", "{cmd: ");

    assert_eq!(resp.status, 400);
    assert!(error_of(&resp).starts_with("invalid JSON body"));
}

// =============================================================================
// Static Routes
// =============================================================================

#[test]
fn test_index_embeds_defaults() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = get(&handler, "/");

    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, Some("text/html; charset=utf-8"));
    let html = String::from_utf8(resp.body).unwrap();
    assert!(html.contains(r#""ip":"10.1.1.1""#));
    assert!(html.contains(r#""port":8000"#));
    assert!(!html.contains("{{DEFAULTS}}"));
}

#[test]
fn test_app_js() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = get(&handler, "/static/js/app.js");

    assert_eq!(resp.status, 200);
    assert!(String::from_utf8(resp.body).unwrap().contains("sendPreset"));
}

#[test]
fn test_ping() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = get(&handler, "/api/ping");

    assert_eq!(resp.status, 200);
    let body: Value = resp.body_json().unwrap();
    assert_eq!(body["ok"], true);
}

#[test]
fn test_query_string_ignored() {
    let handler = setup(RecordingTransport::replying(""));
    assert_eq!(get(&handler, "/api/ping?t=123").status, 200);
}

#[test]
fn test_favicon_no_content() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = get(&handler, "/favicon.ico");

    assert_eq!(resp.status, 204);
    assert!(resp.body.is_empty());
}

#[test]
fn test_unknown_path() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = get(&handler, "/api/launch");

    assert_eq!(resp.status, 404);
    assert_eq!(error_of(&resp), "not found");
}

#[test]
fn test_wrong_method() {
    let handler = setup(RecordingTransport::replying(""));
    assert_eq!(get(&handler, "/api/preset").status, 405);
    assert_eq!(post(&handler, "/api/ping", "").status, 405);
}

// =============================================================================
// Manual Route
// =============================================================================

#[test]
fn test_manual_not_configured() {
    let handler = setup(RecordingTransport::replying(""));
    let resp = get(&handler, "/manual.pdf");

    assert_eq!(resp.status, 404);
    assert_eq!(error_of(&resp), "manual not found on server");
}

#[test]
fn test_manual_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .manual_path(temp_dir.path().join("missing.pdf"))
        .build();
    let handler = handler_with(config, RecordingTransport::replying(""));

    assert_eq!(get(&handler, "/manual.pdf").status, 404);
}

#[test]
fn test_manual_served_as_attachment() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("RS232 Control Guide.pdf");
    std::fs::write(&path, b"%PDF-1.4 fake").unwrap();

    let config = Config::builder().manual_path(&path).build();
    let handler = handler_with(config, RecordingTransport::replying(""));
    let resp = get(&handler, "/manual.pdf");

    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, Some("application/pdf"));
    assert_eq!(resp.body, b"%PDF-1.4 fake");
    let (name, value) = &resp.headers[0];
    assert_eq!(*name, "Content-Disposition");
    assert_eq!(value, "attachment; filename=\"RS232 Control Guide.pdf\"");
}
