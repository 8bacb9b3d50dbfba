//! Generated checks for round-tripping and truncated input.

use proptest::{
    collection::{btree_map, vec},
    prelude::{Strategy, any},
    prop_assert,
    prop_assert_eq,
    string::string_regex,
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner},
};
use rstest::rstest;

use crate::{
    codec::{BinaryCodec, CodecError, MessageCodec},
    error::MessageError,
    limits::MessageLimits,
    message::Message,
};

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

fn message_strategy(limits: MessageLimits) -> impl Strategy<Value = Message> {
    let key = string_regex(&format!("[ -~]{{1,{}}}", limits.max_header_key_bytes))
        .expect("key pattern is valid");
    let value = string_regex(&format!("[ -~]{{0,{}}}", limits.max_header_value_bytes))
        .expect("value pattern is valid");
    (
        btree_map(key, value, 0..=limits.max_headers),
        vec(any::<u8>(), 0..=limits.max_payload_bytes),
    )
        .prop_map(|(headers, payload)| Message::from_parts(headers, payload))
}

#[rstest]
#[case(MessageLimits::default().max_payload_bytes(64).max_headers(4).max_header_key_bytes(16).max_header_value_bytes(32), 128)]
#[case(MessageLimits::default().max_payload_bytes(4096), 32)]
fn generated_messages_round_trip(#[case] limits: MessageLimits, #[case] cases: u32) {
    let mut runner = deterministic_runner(cases);
    let codec = MessageCodec::new(limits).expect("test limits are valid");

    runner
        .run(&message_strategy(limits), |msg| {
            let encoded = codec
                .encode(&msg)
                .map_err(|err| TestCaseError::fail(format!("encode failed: {err}")))?;
            prop_assert_eq!(encoded.len(), MessageCodec::encoded_len(&msg));
            let decoded = codec
                .decode(&encoded)
                .map_err(|err| TestCaseError::fail(format!("decode failed: {err}")))?;
            prop_assert_eq!(decoded.headers(), msg.headers());
            prop_assert_eq!(decoded.payload(), msg.payload());
            Ok(())
        })
        .expect("generated messages should round-trip");
}

#[rstest]
#[case(64)]
fn generated_truncations_are_structural_failures(#[case] cases: u32) {
    let limits = MessageLimits::default()
        .max_payload_bytes(32)
        .max_headers(3)
        .max_header_key_bytes(8)
        .max_header_value_bytes(8);
    let mut runner = deterministic_runner(cases);
    let codec = MessageCodec::new(limits).expect("test limits are valid");

    runner
        .run(&message_strategy(limits), |msg| {
            let encoded = codec
                .encode(&msg)
                .map_err(|err| TestCaseError::fail(format!("encode failed: {err}")))?;
            for cut in 1..=encoded.len() {
                let prefix = encoded.get(..encoded.len() - cut).unwrap_or_default();
                match codec.decode(prefix) {
                    Err(MessageError::Codec(CodecError::Decode(err))) => {
                        prop_assert!(err.is_truncation(), "unexpected cause {err:?}");
                    }
                    other => {
                        return Err(TestCaseError::fail(format!(
                            "cutting {cut} bytes should fail structurally, got {other:?}"
                        )));
                    }
                }
            }
            Ok(())
        })
        .expect("every truncated encoding should be rejected");
}
