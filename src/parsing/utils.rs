use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserializer;
use serde::de::{self, Visitor};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Deserializes an unsigned number that may arrive as a JSON number, a numeric
/// string, or an empty string/attribute (read as zero).
pub fn deserialize_lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64> + Default,
    <T as FromStr>::Err: fmt::Display,
{
    struct LenientNumberVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for LenientNumberVisitor<T>
    where
        T: FromStr + TryFrom<u64> + Default,
        <T as FromStr>::Err: fmt::Display,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an unsigned integer or a string containing one")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::try_from(value).map_err(|_| E::custom(format!("number {} out of range", value)))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let value = u64::try_from(value).map_err(E::custom)?;
            self.visit_u64(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let value = value.trim();
            if value.is_empty() {
                return Ok(T::default());
            }
            value.parse().map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(T::default())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(T::default())
        }
    }

    deserializer.deserialize_any(LenientNumberVisitor(PhantomData))
}

/// Escapes `&` characters that do not start a predefined XML entity or a
/// character reference. The service emits raw ampersands in attribute values,
/// which a conforming parser rejects. CDATA sections and comments are copied
/// as they are.
pub fn escape_bare_ampersands(content: &str) -> Cow<'_, str> {
    if !content.contains('&') {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len() + 16);
    let mut rest = content;
    while let Some(pos) = rest.find(['&', '<']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with('<') {
            let len = literal_section_len(tail).unwrap_or(1);
            out.push_str(&tail[..len]);
            rest = &tail[len..];
            continue;
        }
        if starts_with_reference(tail) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Length of the CDATA section or comment opening `tail`, terminator included.
/// An unterminated section runs to the end of the input.
fn literal_section_len(tail: &str) -> Option<usize> {
    let (open, close) = if tail.starts_with("<![CDATA[") {
        ("<![CDATA[", "]]>")
    } else if tail.starts_with("<!--") {
        ("<!--", "-->")
    } else {
        return None;
    };
    let len = tail[open.len()..]
        .find(close)
        .map_or(tail.len(), |end| open.len() + end + close.len());
    Some(len)
}

/// Reports whether an XML document holds a root element. A body made only of
/// a declaration, comments or whitespace has none. Malformed markup counts as
/// content so the deserializer can report it.
pub fn has_root_element(content: &str) -> bool {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(_) | Event::Empty(_)) | Err(_) => return true,
            Ok(Event::Eof) => return false,
            Ok(_) => {}
        }
    }
}

fn starts_with_reference(tail: &str) -> bool {
    let Some(end) = tail.find(';') else {
        return false;
    };
    let name = &tail[1..end];
    match name {
        "amp" | "lt" | "gt" | "quot" | "apos" => true,
        _ => {
            if let Some(hex) = name.strip_prefix("#x") {
                !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
            } else if let Some(dec) = name.strip_prefix('#') {
                !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Counts {
        #[serde(deserialize_with = "deserialize_lenient_number", default)]
        ret_cd: u32,
        #[serde(deserialize_with = "deserialize_lenient_number", default)]
        month: u8,
    }

    #[test]
    fn test_lenient_number_from_json() {
        let counts: Counts = serde_json::from_str(r#"{"ret_cd": 0, "month": "12"}"#).unwrap();
        assert_eq!(counts.ret_cd, 0);
        assert_eq!(counts.month, 12);

        let counts: Counts = serde_json::from_str(r#"{"ret_cd": "", "month": null}"#).unwrap();
        assert_eq!(counts.ret_cd, 0);
        assert_eq!(counts.month, 0);
    }

    #[test]
    fn test_lenient_number_rejects_garbage() {
        assert!(serde_json::from_str::<Counts>(r#"{"ret_cd": "n/a"}"#).is_err());
        assert!(serde_json::from_str::<Counts>(r#"{"month": 300}"#).is_err());
    }

    #[test]
    fn test_lenient_number_from_xml_attribute() {
        #[derive(Debug, Deserialize)]
        struct Status {
            #[serde(rename = "@retCd", deserialize_with = "deserialize_lenient_number", default)]
            ret_cd: u32,
        }
        let status: Status = quick_xml::de::from_str(r#"<Status retCd="1"/>"#).unwrap();
        assert_eq!(status.ret_cd, 1);
    }

    #[test]
    fn test_escape_bare_ampersands() {
        assert_eq!(
            escape_bare_ampersands(r#"<P pname="Shopping & Travel"/>"#),
            r#"<P pname="Shopping &amp; Travel"/>"#
        );
        assert_eq!(escape_bare_ampersands("a &amp; b &#38; c &#x26;"), "a &amp; b &#38; c &#x26;");
        assert_eq!(escape_bare_ampersands("&nbsp;"), "&amp;nbsp;");
        assert_eq!(escape_bare_ampersands("tail &"), "tail &amp;");
        assert!(matches!(escape_bare_ampersands("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_skips_cdata_and_comments() {
        let xml = "<r><!-- Q&A --><d><![CDATA[a & b]]></d></r>";
        assert_eq!(escape_bare_ampersands(xml), xml);

        assert_eq!(
            escape_bare_ampersands(r#"<![CDATA[x & y]]><a t="1 & 2"/>"#),
            r#"<![CDATA[x & y]]><a t="1 &amp; 2"/>"#
        );
        assert_eq!(
            escape_bare_ampersands("<a>1 & 2 <b/></a>"),
            "<a>1 &amp; 2 <b/></a>"
        );
        assert_eq!(escape_bare_ampersands("<![CDATA[open & "), "<![CDATA[open & ");
    }

    #[test]
    fn test_has_root_element() {
        assert!(has_root_element("<Result/>"));
        assert!(has_root_element("<?xml version=\"1.0\"?>\n<Result></Result>"));
        assert!(!has_root_element("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(!has_root_element("<!-- nothing -->"));
        assert!(!has_root_element(" \n\t"));
    }
}
