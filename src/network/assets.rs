//! Embedded UI assets

use serde_json::json;

use crate::config::Config;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Page script served at `/static/js/app.js`
pub const APP_JS: &str = include_str!("../../assets/app.js");

/// Placeholder in the page replaced by the default connection settings
const DEFAULTS_PLACEHOLDER: &str = "{{DEFAULTS}}";

/// Render the control page with the configured default target embedded
pub fn render_index(config: &Config) -> String {
    let defaults = json!({
        "ip": config.projector_host,
        "port": config.projector_port,
    })
    .to_string()
    // keep the JSON from closing the surrounding <script> element
    .replace("</", "<\\/");

    INDEX_HTML.replace(DEFAULTS_PLACEHOLDER, &defaults)
}
