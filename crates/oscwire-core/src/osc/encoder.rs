use super::error::OscError;
use super::layout;
use super::timetag;
use super::value::{OscPacket, ToDatagram, Value};
use super::writer::OscWriter;

/// Encode a message with a string address. Every component is independently
/// 4-byte aligned, so the output length is always a multiple of 4.
pub fn encode_message(address: &str, contents: &[Value]) -> Result<Vec<u8>, OscError> {
    let mut writer = OscWriter::new();
    writer.put_str(address);
    finish_message(writer, contents)
}

/// Encode a message addressed by a raw big-endian int32 instead of a
/// padded string.
pub fn encode_message_with_int_address(
    address: i32,
    contents: &[Value],
) -> Result<Vec<u8>, OscError> {
    let mut writer = OscWriter::new();
    writer.put_i32(address);
    finish_message(writer, contents)
}

fn finish_message(mut writer: OscWriter, contents: &[Value]) -> Result<Vec<u8>, OscError> {
    let mut type_tags = String::from(",");
    let mut payload = OscWriter::new();
    for value in contents {
        encode_value(value, &mut type_tags, &mut payload)?;
    }
    writer.put_str(&type_tags);
    writer.put_raw(payload.as_bytes());
    Ok(writer.into_bytes())
}

/// Append one type-tag character (a matched `[`..`]` pair for arrays) and
/// the corresponding payload bytes.
fn encode_value(
    value: &Value,
    type_tags: &mut String,
    payload: &mut OscWriter,
) -> Result<(), OscError> {
    match value {
        Value::True => type_tags.push('T'),
        Value::False => type_tags.push('F'),
        Value::Nil => type_tags.push('N'),
        Value::Int32(int) => {
            type_tags.push('i');
            payload.put_i32(*int);
        }
        Value::Float(float) => {
            type_tags.push('f');
            payload.put_f32(*float);
        }
        Value::Double(double) => {
            type_tags.push('d');
            payload.put_f64(*double);
        }
        Value::String(string) => {
            type_tags.push('s');
            payload.put_str(string);
        }
        Value::Blob(bytes) => {
            type_tags.push('b');
            payload.put_blob(bytes)?;
        }
        Value::Message(message) => {
            type_tags.push('b');
            payload.put_blob(&message.to_datagram()?)?;
        }
        Value::Bundle(bundle) => {
            type_tags.push('b');
            payload.put_blob(&bundle.to_datagram()?)?;
        }
        Value::Array(items) => {
            type_tags.push('[');
            for item in items {
                encode_value(item, type_tags, payload)?;
            }
            type_tags.push(']');
        }
    }
    Ok(())
}

/// Encode a bundle: magic, time tag, then each element prefixed with its
/// own datagram length.
pub fn encode_bundle(
    timestamp: Option<f64>,
    elements: &[OscPacket],
) -> Result<Vec<u8>, OscError> {
    let mut writer = OscWriter::new();
    writer.put_raw(layout::BUNDLE_ID);
    writer.put_u64(timetag::ntp_from_seconds(timestamp));
    for element in elements {
        let datagram = element.to_datagram()?;
        let declared = i32::try_from(datagram.len()).map_err(|_| OscError::ElementTooLarge {
            len: datagram.len(),
        })?;
        writer.put_i32(declared);
        writer.put_raw(&datagram);
    }
    Ok(writer.into_bytes())
}
