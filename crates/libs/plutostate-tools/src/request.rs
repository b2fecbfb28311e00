use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use plutostate_pack::{Codec, Value};
use sha2::{Digest, Sha256};

use crate::ToolsError;

const STATE_REQUEST_PREFIX: &str = "/staterequest/";

/// Content hash identifying a notebook: SHA-256, standard padded base64.
pub fn notebook_hash(notebook_text: &str) -> String {
    BASE64_STANDARD.encode(Sha256::digest(notebook_text.as_bytes()))
}

pub fn state_request_path(hash: &str) -> String {
    format!("{STATE_REQUEST_PREFIX}{}/", encode_uri_component(hash))
}

// Same escaping as `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// A state patch addressed to the notebook it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRequest {
    pub path: String,
    pub body: Vec<u8>,
}

impl StateRequest {
    pub fn new(codec: &Codec, notebook_text: &str, patch: &Value) -> Result<Self, ToolsError> {
        let path = state_request_path(&notebook_hash(notebook_text));
        let body = codec.pack(patch)?;
        log::debug!("state request {path} with {} byte body", body.len());
        Ok(Self { path, body })
    }

    pub fn decode_response(codec: &Codec, response: &[u8]) -> Result<Value, ToolsError> {
        Ok(codec.unpack(response)?)
    }
}
