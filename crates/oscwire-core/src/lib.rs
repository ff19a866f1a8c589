//! Core codec library for OSC datagrams.
//!
//! This crate implements the Open Sound Control wire format used by the
//! `oscwire` CLI: byte-exact encoding of value trees into message and
//! bundle datagrams, and decoding of such datagrams back into value trees
//! (layout/reader/writer feed the encoder and parser). The codec is
//! byte-oriented and side-effect free; it knows nothing about sockets or
//! processes, and the report layer here is its only consumer-facing
//! aggregation.
//!
//! Invariants:
//! - Every encoded string/blob field is zero-padded to a 4-byte boundary.
//! - Decoding never reads out of bounds; truncation is an explicit error.
//! - Recursion into nested blobs and bundles is depth-capped.
//!
//! # Examples
//! ```
//! use oscwire_core::{Value, decode_message, encode_message};
//!
//! let datagram = encode_message("/s_new", &[Value::from("default"), Value::Int32(1000)])?;
//! let message = decode_message(&datagram)?;
//! assert_eq!(message.address.to_string(), "/s_new");
//! # Ok::<(), oscwire_core::OscError>(())
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

mod osc;

pub use osc::error::OscError;
pub use osc::value::{Address, OscBundle, OscMessage, OscPacket, ToDatagram, Value};
pub use osc::{
    decode_bundle, decode_datagram, decode_message, encode_bundle, encode_message,
    encode_message_with_int_address,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// JSON-facing description of one decoded datagram.
///
/// # Examples
/// ```
/// use oscwire_core::{describe_datagram, encode_message};
///
/// let datagram = encode_message("/status", &[])?;
/// let report = describe_datagram(&datagram)?;
/// assert_eq!(report.kind, "message");
/// assert_eq!(report.bytes, 12);
/// # Ok::<(), oscwire_core::OscError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatagramReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Input datagram size in bytes.
    pub bytes: u64,
    /// Top-level packet kind: `"message"` or `"bundle"`.
    pub kind: String,
    /// The decoded packet.
    pub packet: OscPacket,
    /// RFC3339 rendering of the outer bundle time tag, when concrete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Decode a datagram and wrap it in a [`DatagramReport`].
pub fn describe_datagram(datagram: &[u8]) -> Result<DatagramReport, OscError> {
    let packet = decode_datagram(datagram)?;
    let (kind, scheduled_at) = match &packet {
        OscPacket::Message(_) => ("message", None),
        OscPacket::Bundle(bundle) => ("bundle", bundle.timestamp.and_then(format_unix_seconds)),
    };
    Ok(DatagramReport {
        report_version: REPORT_VERSION,
        bytes: datagram.len() as u64,
        kind: kind.to_string(),
        packet,
        scheduled_at,
    })
}

fn format_unix_seconds(seconds: f64) -> Option<String> {
    let nanos = (seconds * 1e9) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|datetime| datetime.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_report_has_no_schedule() {
        let datagram = encode_message("/status", &[]).expect("encode");
        let report = describe_datagram(&datagram).expect("report");
        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.kind, "message");

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("scheduled_at").is_none());
    }

    #[test]
    fn bundle_report_renders_rfc3339_schedule() {
        let datagram = encode_bundle(Some(488_430_762.0), &[]).expect("encode");
        let report = describe_datagram(&datagram).expect("report");
        assert_eq!(report.kind, "bundle");
        assert_eq!(report.scheduled_at.as_deref(), Some("1985-06-24T03:12:42Z"));
    }

    #[test]
    fn immediate_bundle_report_has_no_schedule() {
        let datagram = encode_bundle(None, &[]).expect("encode");
        let report = describe_datagram(&datagram).expect("report");
        assert_eq!(report.kind, "bundle");
        assert!(report.scheduled_at.is_none());
    }
}
