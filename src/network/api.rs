//! HTTP API bodies
//!
//! JSON shapes exchanged with the browser UI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::controller::{Exchange, TargetOverrides};
use crate::error::{PanelError, Result};

/// Connection settings the UI sends along with every command
///
/// The page posts whatever its form fields hold, so `port` may arrive as a
/// number, a numeric string or `null`, and `wrapcr` as any JSON value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelCfg {
    #[serde(default)]
    pub ip: Option<String>,

    #[serde(default)]
    pub port: Option<Value>,

    #[serde(default)]
    pub wrapcr: Option<Value>,
}

impl PanelCfg {
    /// Convert to controller overrides
    pub fn overrides(&self) -> Result<TargetOverrides> {
        Ok(TargetOverrides {
            host: self.ip.clone(),
            port: parse_port(self.port.as_ref())?,
            wrap_cr: self.wrapcr.as_ref().map(truthy),
        })
    }
}

/// Body of `POST /api/preset`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetRequest {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub cfg: Option<PanelCfg>,
}

/// Body of `POST /api/raw`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRequest {
    #[serde(default)]
    pub cmd: Option<String>,

    #[serde(default)]
    pub cfg: Option<PanelCfg>,
}

/// Reply to a dispatched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    /// Command as put on the wire (without CR wrapping)
    pub sent: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Exchange> for SendResponse {
    fn from(exchange: &Exchange) -> Self {
        let (response, error) = match &exchange.result {
            Ok(reply) => (Some(reply.text.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            sent: exchange.command.to_string(),
            response,
            error,
        }
    }
}

/// Body of every client or server error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// `GET /api/ping`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub ok: bool,
}

/// Parse a port given as number, numeric string, or nothing
///
/// `null`, `""` and `0` mean "use the default".
fn parse_port(value: Option<&Value>) -> Result<Option<u16>> {
    let invalid = |v: &Value| PanelError::InvalidTarget(format!("invalid port: {}", v));

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let port = n
                .as_u64()
                .and_then(|p| u16::try_from(p).ok())
                .ok_or_else(|| invalid(&Value::Number(n.clone())))?;
            Ok(Some(port).filter(|p| *p != 0))
        }
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v @ Value::String(s)) => {
            let port: u16 = s.trim().parse().map_err(|_| invalid(v))?;
            Ok(Some(port).filter(|p| *p != 0))
        }
        Some(v) => Err(invalid(v)),
    }
}

/// JSON truthiness, matching how the page's checkbox value is interpreted
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
