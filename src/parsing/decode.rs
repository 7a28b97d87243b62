//! Dual-format response decoding.
//!
//! MyJVN answers every method in one of two parallel dialects: XML (the default)
//! or JSON (`ft=json`). The format is never sniffed from the body or the
//! `Content-Type` header; it is whatever the caller asked the server for.
//!
//! XML decoding is lenient. Elements and attributes are matched by local name,
//! so namespace prefixes (`sec:`, `status:`, `mjstat:`) are ignored; unknown
//! elements and attributes are dropped; stray `&` characters are escaped first.
//! A body that ends before any content (empty, or XML with only a declaration
//! or comments) decodes to the record's default value.

use super::utils::{escape_bare_ampersands, has_root_element};
use crate::error::{MyJvnError, Result};
use crate::options::Format;
use serde::de::DeserializeOwned;

/// Decoder for one response format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder {
    format: Format,
}

impl ResponseDecoder {
    /// An absent format decodes XML.
    pub fn new(format: Option<Format>) -> Self {
        Self {
            format: format.unwrap_or_default(),
        }
    }

    /// Builds a decoder from a raw selector string (`"xml"`, `"json"`, empty or absent).
    pub fn from_selector(selector: Option<&str>) -> Result<Self> {
        Ok(Self::new(Format::from_selector(selector)?))
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Decodes `body` into a fresh `T`.
    ///
    /// # Errors
    ///
    /// * `MyJvnError::Utf8Error` - the body is not UTF-8
    /// * `MyJvnError::XmlError` / `MyJvnError::JsonError` - the body is malformed
    pub fn decode<T>(&self, body: &[u8]) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let content = String::from_utf8(body.to_vec())?;
        self.decode_str(&content)
    }

    /// Same as [`decode`](Self::decode) for a body that is already text.
    pub fn decode_str<T>(&self, content: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.decode_content(content)?.unwrap_or_default())
    }

    /// Returns `None` when the body ends before any content: empty or
    /// whitespace for both formats, or XML with no root element.
    fn decode_content<T>(&self, content: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        if content.trim().is_empty() {
            tracing::debug!("Empty {} response body, using default value", self.format);
            return Ok(None);
        }

        match self.format {
            Format::Xml => {
                let content = escape_bare_ampersands(content);
                if !has_root_element(&content) {
                    tracing::debug!("XML response body has no root element, using default value");
                    return Ok(None);
                }
                Ok(Some(quick_xml::de::from_str(&content)?))
            }
            Format::Json => Ok(Some(serde_json::from_str(content)?)),
        }
    }
}

/// Decodes `body` into `target` using the format named by `selector`.
///
/// The target is checked first, then the selector; neither check looks at the
/// body. When the body holds no content (empty, or XML without a root
/// element) `target` is left untouched.
///
/// ```rust
/// use myjvn::parsing::decode_into;
/// use myjvn::Status;
///
/// let mut status = Status::default();
/// decode_into(br#"<Status retCd="0" feed="hnd"/>"#, None, Some(&mut status))?;
/// assert_eq!(status.feed, "hnd");
///
/// let missing: Option<&mut Status> = None;
/// assert!(decode_into(b"", Some("json"), missing).is_err());
/// # Ok::<(), myjvn::MyJvnError>(())
/// ```
pub fn decode_into<T>(body: &[u8], selector: Option<&str>, target: Option<&mut T>) -> Result<()>
where
    T: DeserializeOwned + Default,
{
    let target = target.ok_or(MyJvnError::NullTarget)?;
    let decoder = ResponseDecoder::from_selector(selector)?;

    let content = String::from_utf8(body.to_vec())?;
    if let Some(value) = decoder.decode_content(&content)? {
        *target = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::Status;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(rename = "@a", alias = "a")]
        a: String,
        #[serde(rename = "b")]
        b: String,
        #[serde(rename = "item")]
        items: Vec<String>,
    }

    #[test]
    fn test_empty_body_is_default() {
        let decoder = ResponseDecoder::new(None);
        let sample: Sample = decoder.decode(b"").unwrap();
        assert_eq!(sample, Sample::default());

        let decoder = ResponseDecoder::new(Some(Format::Json));
        let sample: Sample = decoder.decode(b"  \n").unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_xml_without_root_is_default() {
        let decoder = ResponseDecoder::new(None);
        let declaration: Sample = decoder
            .decode(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")
            .unwrap();
        assert_eq!(declaration, Sample::default());

        let comment: Sample = decoder.decode(b"<!-- nothing -->").unwrap();
        assert_eq!(comment, Sample::default());

        let status: Status = decoder.decode(b"<?xml version=\"1.0\"?>\n<!-- a -->\n").unwrap();
        assert_eq!(status, Status::default());
    }

    #[test]
    fn test_decode_into_prolog_leaves_target() {
        let mut sample = Sample {
            a: "kept".to_string(),
            ..Sample::default()
        };
        decode_into(b"<?xml version=\"1.0\"?><!-- empty -->", None, Some(&mut sample)).unwrap();
        assert_eq!(sample.a, "kept");
    }

    #[test]
    fn test_xml_cdata_is_literal() {
        let decoder = ResponseDecoder::default();
        let sample: Sample = decoder
            .decode(b"<root><b><![CDATA[a & b]]></b></root>")
            .unwrap();
        assert_eq!(sample.b, "a & b");
    }

    #[test]
    fn test_json_decode() {
        let decoder = ResponseDecoder::new(Some(Format::Json));
        let sample: Sample = decoder.decode(br#"{"a":"a", "b":"b"}"#).unwrap();
        assert_eq!(sample.a, "a");
        assert_eq!(sample.b, "b");
    }

    #[test]
    fn test_xml_ignores_unknown_content() {
        let decoder = ResponseDecoder::new(Some(Format::Xml));
        let body = br#"<x:root a="1" unknown="2" xmlns:x="urn:x"><x:b>text</x:b><other><deep/></other><item>1</item><item>2</item></x:root>"#;
        let sample: Sample = decoder.decode(body).unwrap();
        assert_eq!(sample.a, "1");
        assert_eq!(sample.b, "text");
        assert_eq!(sample.items, vec!["1", "2"]);
    }

    #[test]
    fn test_xml_bare_ampersand() {
        let decoder = ResponseDecoder::default();
        let sample: Sample = decoder.decode(br#"<root a="Shopping & Travel"/>"#).unwrap();
        assert_eq!(sample.a, "Shopping & Travel");
    }

    #[test]
    fn test_malformed_bodies() {
        let xml = ResponseDecoder::new(Some(Format::Xml));
        assert!(matches!(
            xml.decode::<Sample>(b"<root><b>unclosed</root>"),
            Err(MyJvnError::XmlError(_))
        ));

        let json = ResponseDecoder::new(Some(Format::Json));
        assert!(matches!(
            json.decode::<Sample>(b"{not valid json}"),
            Err(MyJvnError::JsonError(_))
        ));

        assert!(matches!(
            xml.decode::<Sample>(&[0xff, 0xfe, 0x00]),
            Err(MyJvnError::Utf8Error(_))
        ));
    }

    #[test]
    fn test_decode_into_null_target() {
        let result = decode_into::<Sample>(br#"{"a":"a"}"#, Some("json"), None);
        assert!(matches!(result, Err(MyJvnError::NullTarget)));
    }

    #[test]
    fn test_decode_into_unsupported_format() {
        let mut sample = Sample::default();
        let result = decode_into(br#"{"a":"a"}"#, Some("yaml"), Some(&mut sample));
        assert!(matches!(result, Err(MyJvnError::UnsupportedFormat(_))));
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_decode_into_empty_leaves_target() {
        let mut sample = Sample::default();
        decode_into(b"", Some("xml"), Some(&mut sample)).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_decode_twice_is_equal() {
        let body = br#"<root a="x"><b>y</b><item>1</item></root>"#;
        let mut first = Sample::default();
        let mut second = Sample::default();
        decode_into(body, None, Some(&mut first)).unwrap();
        decode_into(body, None, Some(&mut second)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.items, vec!["1"]);
    }
}
