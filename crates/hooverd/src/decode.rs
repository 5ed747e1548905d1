//! Request decoding.
//!
//! The request path selects one of three formats:
//!
//! | Path            | Format          | Payload                 | Tags                          |
//! |-----------------|-----------------|-------------------------|-------------------------------|
//! | `/`, `/json`    | JSON shorthand  | `data`                  | `[{"<name>": "<value>"}]`     |
//! | `/tx`           | JSON explicit   | `data`                  | `[{"name": .., "value": ..}]` |
//! | `/raw`          | raw body        | the whole body          | `x-tag-<name>` headers        |
//!
//! Any other path is rejected. Decoding never touches the network.

use axum::http::HeaderMap;
use hooverd_tx::Tag;
use hooverd_types::constants::{ENCRYPT_FOR_HEADER, ENCRYPT_WITH_HEADER};
use serde::Deserialize;

use crate::error::{HooverError, HooverResult};

/// One shorthand tag object: exactly one `name: value` entry.
pub type ShorthandTag = serde_json::Map<String, serde_json::Value>;

/// An explicit `{name, value}` tag object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplicitTag {
    pub name: String,
    pub value: String,
}

/// JSON `data`: a string (its UTF-8 bytes) or an array of byte values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShorthandBody {
    data: Option<Payload>,
    tags: Option<Vec<ShorthandTag>>,
}

#[derive(Debug, Deserialize)]
struct ExplicitBody {
    data: Option<Payload>,
    tags: Option<Vec<ExplicitTag>>,
}

/// A decoded request, one variant per wire format.
#[derive(Debug)]
pub enum RequestFormat {
    JsonShorthand {
        data: Vec<u8>,
        tags: Vec<ShorthandTag>,
    },
    JsonExplicit {
        data: Vec<u8>,
        tags: Vec<ExplicitTag>,
    },
    RawHeaders {
        data: Vec<u8>,
        headers: HeaderMap,
        /// Symmetric key from `x-encrypt-with`.
        encrypt_with: Option<String>,
    },
}

impl RequestFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JsonShorthand { .. } => "json-shorthand",
            Self::JsonExplicit { .. } => "json-explicit",
            Self::RawHeaders { .. } => "raw",
        }
    }

    /// Payload bytes and the encryption key, if one was requested.
    pub fn into_payload(self) -> (Vec<u8>, Option<String>) {
        match self {
            Self::JsonShorthand { data, .. } | Self::JsonExplicit { data, .. } => (data, None),
            Self::RawHeaders {
                data, encrypt_with, ..
            } => (data, encrypt_with),
        }
    }
}

/// Payload and ordered tags, ready for the transaction builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub data: Vec<u8>,
    pub tags: Vec<Tag>,
}

/// Decode a complete request body according to its path.
pub fn decode_request(path: &str, headers: &HeaderMap, body: &[u8]) -> HooverResult<RequestFormat> {
    match path {
        "/" | "/json" => {
            let request: ShorthandBody = parse_json(body)?;
            Ok(RequestFormat::JsonShorthand {
                data: require_data(request.data)?,
                tags: request.tags.unwrap_or_default(),
            })
        }
        "/tx" => {
            let request: ExplicitBody = parse_json(body)?;
            Ok(RequestFormat::JsonExplicit {
                data: require_data(request.data)?,
                tags: request.tags.unwrap_or_default(),
            })
        }
        "/raw" => decode_raw(headers, body),
        other => Err(HooverError::UnsupportedPath(other.to_string())),
    }
}

fn parse_json<'a, T: Deserialize<'a>>(body: &'a [u8]) -> HooverResult<T> {
    serde_json::from_slice(body).map_err(|e| HooverError::Decode(format!("malformed JSON: {}", e)))
}

fn require_data(data: Option<Payload>) -> HooverResult<Vec<u8>> {
    data.map(Payload::into_bytes)
        .ok_or_else(|| HooverError::Decode("missing `data` field".into()))
}

fn decode_raw(headers: &HeaderMap, body: &[u8]) -> HooverResult<RequestFormat> {
    if headers.contains_key(ENCRYPT_FOR_HEADER) {
        log::warn!(
            "rejecting raw request with {}: encryption for a recipient key is not implemented",
            ENCRYPT_FOR_HEADER
        );
        return Err(HooverError::UnsupportedFeature(format!(
            "{} (encryption for a recipient key)",
            ENCRYPT_FOR_HEADER
        )));
    }

    let encrypt_with = match headers.get(ENCRYPT_WITH_HEADER) {
        Some(value) => {
            let key = value.to_str().map_err(|_| {
                HooverError::Decode(format!("{} is not valid UTF-8", ENCRYPT_WITH_HEADER))
            })?;
            if key.is_empty() {
                return Err(HooverError::Decode(format!("{} is empty", ENCRYPT_WITH_HEADER)));
            }
            Some(key.to_string())
        }
        None => None,
    };

    Ok(RequestFormat::RawHeaders {
        data: body.to_vec(),
        headers: headers.clone(),
        encrypt_with,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    fn decode(path: &str, body: &str) -> HooverResult<RequestFormat> {
        decode_request(path, &HeaderMap::new(), body.as_bytes())
    }

    #[test]
    fn test_shorthand_paths() {
        for path in ["/", "/json"] {
            let request = decode(path, r#"{"data":"hello","tags":[{"App":"Demo"}]}"#).unwrap();
            match request {
                RequestFormat::JsonShorthand { data, tags } => {
                    assert_eq!(data, b"hello");
                    assert_eq!(tags.len(), 1);
                    assert_eq!(tags[0]["App"], "Demo");
                }
                other => panic!("unexpected format {}", other.name()),
            }
        }
    }

    #[test]
    fn test_explicit_path() {
        let request = decode("/tx", r#"{"data":"hello","tags":[{"name":"App","value":"Demo"}]}"#)
            .unwrap();
        match request {
            RequestFormat::JsonExplicit { data, tags } => {
                assert_eq!(data, b"hello");
                assert_eq!(
                    tags,
                    vec![ExplicitTag {
                        name: "App".into(),
                        value: "Demo".into()
                    }]
                );
            }
            other => panic!("unexpected format {}", other.name()),
        }
    }

    #[test]
    fn test_data_as_byte_array() {
        let request = decode("/json", r#"{"data":[104,105]}"#).unwrap();
        assert_eq!(request.into_payload(), (b"hi".to_vec(), None));
    }

    #[test]
    fn test_missing_tags_is_empty() {
        for body in [r#"{"data":""}"#, r#"{"data":"","tags":null}"#] {
            match decode("/tx", body).unwrap() {
                RequestFormat::JsonExplicit { data, tags } => {
                    assert!(data.is_empty());
                    assert!(tags.is_empty());
                }
                other => panic!("unexpected format {}", other.name()),
            }
        }
    }

    #[test]
    fn test_malformed_bodies_rejected() {
        assert!(matches!(decode("/json", "{not json"), Err(HooverError::Decode(_))));
        assert!(matches!(decode("/json", r#"{"tags":[]}"#), Err(HooverError::Decode(_))));
        assert!(matches!(decode("/json", r#"{"data":[300]}"#), Err(HooverError::Decode(_))));
        assert!(matches!(
            decode("/tx", r#"{"data":"x","tags":[{"name":"a"}]}"#),
            Err(HooverError::Decode(_))
        ));
        assert!(matches!(decode("/tx", ""), Err(HooverError::Decode(_))));
    }

    #[test]
    fn test_unsupported_path() {
        match decode("/unknown", "{}") {
            Err(HooverError::UnsupportedPath(path)) => assert_eq!(path, "/unknown"),
            other => panic!("expected UnsupportedPath, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_takes_body_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert("x-tag-app", HeaderValue::from_static("Demo"));
        let request = decode_request("/raw", &headers, b"{not json either").unwrap();
        assert_eq!(request.name(), "raw");
        assert_eq!(request.into_payload(), (b"{not json either".to_vec(), None));
    }

    #[test]
    fn test_raw_encrypt_with_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-encrypt-with", HeaderValue::from_static("secret"));
        let request = decode_request("/raw", &headers, b"hello").unwrap();
        assert_eq!(request.into_payload(), (b"hello".to_vec(), Some("secret".to_string())));

        headers.insert("x-encrypt-with", HeaderValue::from_static(""));
        assert!(matches!(
            decode_request("/raw", &headers, b"hello"),
            Err(HooverError::Decode(_))
        ));
    }

    #[test]
    fn test_raw_encrypt_for_unsupported() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-Encrypt-For").unwrap(),
            HeaderValue::from_static("some-key"),
        );
        assert!(matches!(
            decode_request("/raw", &headers, b"hello"),
            Err(HooverError::UnsupportedFeature(_))
        ));
    }
}
