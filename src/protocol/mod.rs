//! Protocol Module
//!
//! Defines the projector's text control protocol.
//!
//! ## Protocol Format
//!
//! One request, one reply, one TCP connection:
//!
//! ```text
//! client ──  [CR] *<name>=<value># [CR]  ──▶ projector
//! client ◀──        *<name>=<value>#<...> ── projector
//! ```
//!
//! ### Commands
//! - `*pow=on#`   - Power on
//! - `*pow=?#`    - Power status query
//! - `*sour=hdmi#` - Select input source
//! - `*up#`, `*enter#`, ... - Menu navigation
//!
//! The reply is unframed; it ends when the peer goes quiet.

mod command;
mod table;
mod codec;

pub use command::{Command, CR_TOKEN, TERMINATOR};
pub use table::CommandTable;
pub use codec::{decode_reply, encode_frame, CR, REPLACEMENT};
