use super::error::OscError;
use super::layout;
use super::reader::OscReader;
use super::timetag;
use super::value::{OscBundle, OscMessage, OscPacket, Value};

/// Decode a whole datagram, dispatching on the bundle magic.
pub fn decode_datagram(datagram: &[u8]) -> Result<OscPacket, OscError> {
    if starts_with_bundle(datagram) {
        decode_bundle_at(datagram, 0).map(OscPacket::Bundle)
    } else {
        decode_message_at(datagram, 0).map(OscPacket::Message)
    }
}

/// Decode a message datagram into its address and contents.
pub fn decode_message(datagram: &[u8]) -> Result<OscMessage, OscError> {
    decode_message_at(datagram, 0)
}

/// Decode a bundle datagram into its time tag and elements.
pub fn decode_bundle(datagram: &[u8]) -> Result<OscBundle, OscError> {
    decode_bundle_at(datagram, 0)
}

fn starts_with_bundle(data: &[u8]) -> bool {
    data.get(..layout::BUNDLE_ID.len()) == Some(layout::BUNDLE_ID.as_slice())
}

fn check_depth(depth: usize) -> Result<(), OscError> {
    if depth >= layout::MAX_DEPTH {
        return Err(OscError::DepthExceeded {
            max: layout::MAX_DEPTH,
        });
    }
    Ok(())
}

fn decode_message_at(datagram: &[u8], depth: usize) -> Result<OscMessage, OscError> {
    check_depth(depth)?;
    let mut reader = OscReader::new(datagram);
    let address = reader.read_str()?;
    let type_tags = reader.read_str()?;

    // The leading ',' carries no value; tag characters after it drive the
    // iteration. Arrays build up on an explicit stack so malformed bracket
    // nesting degrades instead of erroring.
    let mut current: Vec<Value> = Vec::new();
    let mut stack: Vec<Vec<Value>> = Vec::new();

    for tag in type_tags.chars().skip(1) {
        match tag {
            'i' => current.push(Value::Int32(reader.read_i32()?)),
            'f' => current.push(Value::Float(reader.read_f32()?)),
            'd' => current.push(Value::Double(reader.read_f64()?)),
            's' => current.push(Value::String(reader.read_str()?)),
            'b' => {
                let blob = reader.read_blob()?;
                current.push(decode_blob_value(blob, depth));
            }
            'T' => current.push(Value::True),
            'F' => current.push(Value::False),
            'N' => current.push(Value::Nil),
            '[' => {
                stack.push(std::mem::take(&mut current));
            }
            ']' => {
                // Excess ']' with nothing open is tolerated.
                if let Some(mut parent) = stack.pop() {
                    parent.push(Value::Array(std::mem::take(&mut current)));
                    current = parent;
                }
            }
            other => return Err(OscError::UnknownTypeTag { tag: other }),
        }
    }

    // Unterminated '[' is tolerated: close whatever is still open.
    while let Some(mut parent) = stack.pop() {
        parent.push(Value::Array(std::mem::take(&mut current)));
        current = parent;
    }

    Ok(OscMessage::new(address, current))
}

/// Speculatively reinterpret a blob: a nested bundle if the magic matches
/// and parses, else a nested message if those bytes parse as one, else the
/// raw bytes. Failed attempts are isolated and never surface.
fn decode_blob_value(blob: &[u8], depth: usize) -> Value {
    if starts_with_bundle(blob) {
        if let Ok(bundle) = decode_bundle_at(blob, depth + 1) {
            return Value::Bundle(bundle);
        }
    }
    if let Ok(message) = decode_message_at(blob, depth + 1) {
        return Value::Message(message);
    }
    Value::Blob(blob.to_vec())
}

fn decode_bundle_at(datagram: &[u8], depth: usize) -> Result<OscBundle, OscError> {
    check_depth(depth)?;
    if !starts_with_bundle(datagram) {
        return Err(OscError::NotABundle);
    }

    let mut reader = OscReader::new(datagram);
    reader.read_bytes(layout::BUNDLE_ID.len())?;
    let timestamp = timetag::seconds_from_ntp(reader.read_u64()?);

    let mut contents = Vec::new();
    while !reader.is_empty() {
        let declared = reader.read_i32()?;
        // A negative prefix can never match the remaining byte count; the
        // saturated conversion turns it into a length error.
        let count = usize::try_from(declared).unwrap_or(usize::MAX);
        let element = reader.read_bytes(count)?;
        let packet = if starts_with_bundle(element) {
            OscPacket::Bundle(decode_bundle_at(element, depth + 1)?)
        } else {
            OscPacket::Message(decode_message_at(element, depth + 1)?)
        };
        contents.push(packet);
    }

    Ok(OscBundle::new(timestamp, contents))
}
