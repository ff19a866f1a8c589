use serde::{Deserialize, Serialize};

use super::encoder;
use super::error::OscError;

/// Message address: a UTF-8 address pattern, or the non-standard integer
/// form some servers accept for low-overhead addressing. Decoding always
/// yields `Pattern`; the wire gives no way to recognize an integer address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Pattern(String),
    Index(i32),
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::Pattern(value.to_string())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address::Pattern(value)
    }
}

impl From<i32> for Address {
    fn from(value: i32) -> Self {
        Address::Index(value)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::Pattern(pattern) => write!(f, "{pattern}"),
            Address::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One OSC argument. Arrays nest arbitrarily; `Message` and `Bundle` arise
/// from blobs whose bytes parse as a complete datagram, and encode back as
/// blobs carrying their own serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int32(i32),
    Float(f32),
    Double(f64),
    String(String),
    Blob(Vec<u8>),
    True,
    False,
    Nil,
    Array(Vec<Value>),
    Message(OscMessage),
    Bundle(OscBundle),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { Value::True } else { Value::False }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl From<OscMessage> for Value {
    fn from(value: OscMessage) -> Self {
        Value::Message(value)
    }
}

impl From<OscBundle> for Value {
    fn from(value: OscBundle) -> Self {
        Value::Bundle(value)
    }
}

impl TryFrom<i64> for Value {
    type Error = OscError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i32::try_from(value)
            .map(Value::Int32)
            .map_err(|_| OscError::IntOutOfRange { value })
    }
}

impl Value {
    /// Embed any packet-like object as a blob argument carrying its own
    /// serialization. Decoders that sniff blob contents will recover it.
    pub fn embedded(packet: &impl ToDatagram) -> Result<Self, OscError> {
        Ok(Value::Blob(packet.to_datagram()?))
    }
}

/// Anything that can produce its own complete datagram. Externally-defined
/// packet-like types implement this to become embeddable via
/// [`Value::embedded`].
pub trait ToDatagram {
    fn to_datagram(&self) -> Result<Vec<u8>, OscError>;
}

/// An address plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscMessage {
    pub address: Address,
    pub contents: Vec<Value>,
}

impl OscMessage {
    pub fn new(address: impl Into<Address>, contents: Vec<Value>) -> Self {
        Self {
            address: address.into(),
            contents,
        }
    }
}

impl ToDatagram for OscMessage {
    fn to_datagram(&self) -> Result<Vec<u8>, OscError> {
        match &self.address {
            Address::Pattern(pattern) => encoder::encode_message(pattern, &self.contents),
            Address::Index(index) => {
                encoder::encode_message_with_int_address(*index, &self.contents)
            }
        }
    }
}

/// A time-tagged container of messages and nested bundles. `timestamp` is
/// seconds since the Unix epoch; `None` means "execute immediately".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub contents: Vec<OscPacket>,
}

impl OscBundle {
    pub fn new(timestamp: Option<f64>, contents: Vec<OscPacket>) -> Self {
        Self {
            timestamp,
            contents,
        }
    }
}

impl ToDatagram for OscBundle {
    fn to_datagram(&self) -> Result<Vec<u8>, OscError> {
        encoder::encode_bundle(self.timestamp, &self.contents)
    }
}

/// Either top-level datagram kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OscPacket {
    Message(OscMessage),
    Bundle(OscBundle),
}

impl ToDatagram for OscPacket {
    fn to_datagram(&self) -> Result<Vec<u8>, OscError> {
        match self {
            OscPacket::Message(message) => message.to_datagram(),
            OscPacket::Bundle(bundle) => bundle.to_datagram(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Address, Value};
    use crate::osc::error::OscError;

    #[test]
    fn address_from_str_and_int() {
        assert_eq!(Address::from("/s_new"), Address::Pattern("/s_new".into()));
        assert_eq!(Address::from(9), Address::Index(9));
    }

    #[test]
    fn value_try_from_i64_checks_range() {
        assert_eq!(Value::try_from(1000i64).unwrap(), Value::Int32(1000));
        let err = Value::try_from(i64::from(i32::MAX) + 1).unwrap_err();
        assert!(matches!(err, OscError::IntOutOfRange { .. }));
    }

    #[test]
    fn bool_converts_to_tag_variants() {
        assert_eq!(Value::from(true), Value::True);
        assert_eq!(Value::from(false), Value::False);
    }
}
