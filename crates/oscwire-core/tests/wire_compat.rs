use oscwire_core::{
    Address, OscBundle, OscError, OscMessage, OscPacket, ToDatagram, Value, decode_bundle,
    decode_datagram, decode_message, encode_bundle, encode_message,
    encode_message_with_int_address,
};

#[test]
fn s_new_matches_canonical_encoding() {
    let contents = [
        Value::from("default"),
        Value::Int32(1000),
        Value::Int32(0),
        Value::Int32(0),
    ];
    let datagram = encode_message("/s_new", &contents).expect("encode");

    let mut expected = Vec::new();
    expected.extend_from_slice(b"/s_new\0\0");
    expected.extend_from_slice(b",siii\0\0\0");
    expected.extend_from_slice(b"default\0");
    expected.extend_from_slice(&[0x00, 0x00, 0x03, 0xE8]);
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    assert_eq!(datagram, expected);
}

#[test]
fn empty_immediate_bundle_matches_canonical_encoding() {
    let datagram = encode_bundle(None, &[]).expect("encode");
    let mut expected = b"#bundle\0".to_vec();
    expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(datagram, expected);
}

#[test]
fn ntp_time_tag_decodes_per_reference_formula() {
    let mut datagram = b"#bundle\0".to_vec();
    datagram.extend_from_slice(&0xA0C6_5B2A_0000_0000u64.to_be_bytes());
    let bundle = decode_bundle(&datagram).expect("decode");
    // raw / 2^32 - 2208988800
    assert_eq!(bundle.timestamp, Some(488_430_762.0));
}

#[test]
fn sentinel_time_tag_decodes_as_immediate() {
    let mut datagram = b"#bundle\0".to_vec();
    datagram.extend_from_slice(&1u64.to_be_bytes());
    let bundle = decode_bundle(&datagram).expect("decode");
    assert_eq!(bundle.timestamp, None);
}

#[test]
fn message_round_trip_preserves_value_trees() {
    let contents = vec![
        Value::Int32(-1),
        Value::Float(440.0),
        Value::Double(0.25),
        Value::from("default"),
        Value::Blob(vec![0xDE, 0xAD]),
        Value::True,
        Value::False,
        Value::Nil,
        Value::Array(vec![Value::Int32(1), Value::Array(vec![Value::from("x")])]),
    ];
    let datagram = encode_message("/g_queryTree", &contents).expect("encode");
    let message = decode_message(&datagram).expect("decode");
    assert_eq!(message.address, Address::Pattern("/g_queryTree".into()));
    assert_eq!(message.contents, contents);

    let reencoded = message.to_datagram().expect("re-encode");
    assert_eq!(reencoded, datagram);
}

#[test]
fn array_tags_bracket_exactly_the_nested_values() {
    let contents = vec![
        Value::Int32(1),
        Value::Array(vec![Value::from("a"), Value::from("b")]),
        Value::Int32(2),
    ];
    let datagram = encode_message("/p", &contents).expect("encode");
    assert_eq!(&datagram[4..12], b",i[ss]i\0");

    let message = decode_message(&datagram).expect("decode");
    assert_eq!(message.contents, contents);
}

#[test]
fn encoded_fields_are_always_aligned() {
    for text in ["", "a", "ab", "abc", "abcd", "abcde"] {
        let datagram = encode_message("/pad", &[Value::from(text)]).expect("encode");
        assert_eq!(datagram.len() % 4, 0, "string {text:?}");
    }
    for len in 0..9 {
        let datagram =
            encode_message("/pad", &[Value::Blob(vec![0xFF; len])]).expect("encode");
        assert_eq!(datagram.len() % 4, 0, "blob of {len}");
    }
}

#[test]
fn blob_content_sniffing_distinguishes_all_three_kinds() {
    let message = OscMessage::new("/n_set", vec![Value::Int32(1000), Value::from("freq")]);
    let bundle = OscBundle::new(None, vec![OscPacket::Message(message.clone())]);

    let as_message = encode_message("/outer", &[Value::Message(message.clone())]).expect("encode");
    let as_bundle = encode_message("/outer", &[Value::Bundle(bundle.clone())]).expect("encode");
    let as_raw = encode_message("/outer", &[Value::Blob(vec![9, 9, 9])]).expect("encode");

    assert_eq!(
        decode_message(&as_message).expect("decode").contents,
        vec![Value::Message(message)]
    );
    assert_eq!(
        decode_message(&as_bundle).expect("decode").contents,
        vec![Value::Bundle(bundle)]
    );
    assert_eq!(
        decode_message(&as_raw).expect("decode").contents,
        vec![Value::Blob(vec![9, 9, 9])]
    );
}

#[test]
fn embedded_packets_become_blob_arguments() {
    let message = OscMessage::new("/n_free", vec![Value::Int32(1000)]);
    let value = Value::embedded(&message).expect("embed");
    assert_eq!(value, Value::Blob(message.to_datagram().expect("encode")));

    let datagram = encode_message("/outer", &[value]).expect("encode");
    let decoded = decode_message(&datagram).expect("decode");
    assert_eq!(decoded.contents, vec![Value::Message(message)]);
}

#[test]
fn nested_bundles_round_trip() {
    let leaf = OscMessage::new("/s_new", vec![Value::from("default"), Value::Int32(1001)]);
    let inner = OscBundle::new(Some(488_430_762.5), vec![OscPacket::Message(leaf)]);
    let outer = OscBundle::new(None, vec![OscPacket::Bundle(inner)]);

    let datagram = outer.to_datagram().expect("encode");
    let decoded = decode_bundle(&datagram).expect("decode");
    assert_eq!(decoded, outer);
}

#[test]
fn int_address_messages_reach_the_wire_unpadded() {
    let datagram = encode_message_with_int_address(9, &[Value::Int32(1)]).expect("encode");
    assert_eq!(&datagram[..4], &[0, 0, 0, 9]);
    assert_eq!(&datagram[4..8], b",i\0\0");
}

#[test]
fn datagram_dispatch_follows_the_magic() {
    let message = encode_message("/status", &[]).expect("encode");
    let bundle = encode_bundle(None, &[]).expect("encode");
    assert!(matches!(
        decode_datagram(&message).expect("decode"),
        OscPacket::Message(_)
    ));
    assert!(matches!(
        decode_datagram(&bundle).expect("decode"),
        OscPacket::Bundle(_)
    ));
}

#[test]
fn truncated_inputs_fail_without_reading_out_of_bounds() {
    // A valid message, sliced one byte shorter than each field requires.
    let datagram = encode_message(
        "/cut",
        &[Value::Int32(7), Value::from("tail"), Value::Blob(vec![1, 2, 3])],
    )
    .expect("encode");

    for len in 0..datagram.len() {
        let err = decode_message(&datagram[..len])
            .expect_err(&format!("decoded truncated prefix of {len} bytes"));
        assert!(
            matches!(
                err,
                OscError::TooShort { .. } | OscError::UnterminatedString { .. }
            ),
            "unexpected error at {len}: {err}"
        );
    }
}

#[test]
fn truncated_bundle_fails_with_length_errors() {
    let leaf = OscMessage::new("/a", vec![Value::Int32(1)]);
    let datagram = encode_bundle(None, &[OscPacket::Message(leaf)]).expect("encode");
    for len in 1..datagram.len() {
        match decode_bundle(&datagram[..len]) {
            // Cutting exactly after the 16-byte envelope leaves a valid
            // empty bundle; every other prefix must fail.
            Ok(bundle) => {
                assert_eq!(len, 16, "decoded truncated bundle at {len}");
                assert!(bundle.contents.is_empty());
            }
            Err(_) => {}
        }
    }
}
