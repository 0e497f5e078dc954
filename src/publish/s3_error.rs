//! S3 error documents.
//!
//! A failed S3 request answers with `<Error><Code>..</Code><Message>..</Message></Error>`.
//! The code is what operators search for, so it becomes the status text.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;

use crate::errors::RemoteStatus;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename = "Error")]
pub struct S3ErrorBody {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

pub fn parse_error_body(body: &[u8]) -> Option<S3ErrorBody> {
    let text = std::str::from_utf8(body).ok()?;
    from_xml_str(text.trim()).ok()
}

/// Status for a non-2xx S3 answer: the XML error code if the body has one,
/// otherwise the HTTP reason phrase.
pub fn remote_status(code: u16, body: &[u8]) -> RemoteStatus {
    match parse_error_body(body) {
        Some(doc) => {
            let text = match doc.message {
                Some(msg) if !msg.is_empty() => format!("{}: {}", doc.code, msg),
                _ => doc.code,
            };
            RemoteStatus::new(code, text)
        }
        None => {
            let reason = reqwest::StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown");
            RemoteStatus::new(code, reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_and_message() {
        let body = br#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><Key>win/RELEASES</Key><RequestId>4442587FB7D0A2F9</RequestId></Error>"#;
        let doc = parse_error_body(body).unwrap();
        assert_eq!(doc.code, "NoSuchKey");
        let status = remote_status(404, body);
        assert_eq!(status.code, 404);
        assert_eq!(status.text, "NoSuchKey: The specified key does not exist.");
    }

    #[test]
    fn falls_back_to_reason_phrase() {
        let status = remote_status(403, b"");
        assert_eq!(status.text, "Forbidden");
        let status = remote_status(500, b"not xml at all");
        assert_eq!(status.text, "Internal Server Error");
    }
}
