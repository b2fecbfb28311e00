use plutostate_pack::{Codec, CodecConfig, Timestamp, TypedArray, Value};
use plutostate_tools::request::{notebook_hash, state_request_path, StateRequest};
use plutostate_tools::ToolsError;

fn sample_patch() -> Value {
    [("a", Value::from(1)), ("b", Value::Array(vec![Value::from(1), Value::from(2)]))]
        .into_iter()
        .collect()
}

#[test]
fn request_targets_hashed_notebook_and_packs_patch() {
    let codec = Codec::default();
    let notebook = "### A Pluto.jl notebook ###\n# v0.19.36\n";
    let request = StateRequest::new(&codec, notebook, &sample_patch()).expect("request");

    let hash = notebook_hash(notebook);
    assert!(request.path.starts_with("/staterequest/"));
    assert!(request.path.ends_with('/'));
    assert!(!request.path[14..request.path.len() - 1].contains(&['+', '/', '='][..]));
    assert_eq!(hash.len(), 44);
    assert_eq!(request.path, state_request_path(&hash));
    assert_eq!(request.body, vec![0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x92, 0x01, 0x02]);
}

#[test]
fn response_frames_unpack_with_extensions() {
    let codec = Codec::default();
    let response: Value = [
        ("ok", Value::from(true)),
        ("values", Value::TypedArray(TypedArray::Float64(vec![0.25, 0.5]))),
        ("at", Value::Date(Timestamp::Millis(1_700_000_000_000))),
    ]
    .into_iter()
    .collect();
    let bytes = codec.pack(&response).expect("pack");

    let decoded = StateRequest::decode_response(&codec, &bytes).expect("decode");
    assert_eq!(decoded, response);
}

#[test]
fn date_patch_fails_without_int64_support() {
    let codec = Codec::new(CodecConfig::without_int64());
    let patch: Value = [("at", Value::Date(Timestamp::Millis(0)))].into_iter().collect();
    let err = StateRequest::new(&codec, "", &patch).unwrap_err();
    assert!(matches!(err, ToolsError::Codec(_)));
}
