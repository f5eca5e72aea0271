//! Support for the `.resx` resource document format.
//!
//! Only the parts the generator consumes are modelled: the `<root>` element and
//! its `<data name="..."><value>...</value></data>` children. Schema headers,
//! `<resheader>`, `<metadata>`, `<assembly>` and per-entry `<comment>` elements
//! are skipped.

use quick_xml::{
    Reader, Writer,
    escape::{escape, unescape},
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::{
    borrow::Cow,
    collections::HashSet,
    io::{BufRead, Read, Write},
    path::Path,
};

use crate::{
    error::Error,
    traits::{Parser, open_input},
};

/// One `<data>` element: a resource key and its raw, unescaped-XML value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub key: String,
    pub raw_value: String,
}

impl ResourceEntry {
    pub fn new(key: impl Into<String>, raw_value: impl Into<String>) -> Self {
        ResourceEntry {
            key: key.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// A parsed resource document, entries kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResxDocument {
    pub entries: Vec<ResourceEntry>,
}

impl ResxDocument {
    /// Returns an iterator over the entries in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose key already appeared earlier in the document.
    ///
    /// These are the entries the emitter drops, since the first occurrence of
    /// a key wins.
    pub fn duplicates(&self) -> Vec<&ResourceEntry> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|entry| !seen.insert(entry.key.as_str()))
            .collect()
    }
}

impl IntoIterator for ResxDocument {
    type Item = ResourceEntry;
    type IntoIter = std::vec::IntoIter<ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResxDocument {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ResourceEntry> for ResxDocument {
    fn from_iter<I: IntoIterator<Item = ResourceEntry>>(iter: I) -> Self {
        ResxDocument {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Parser for ResxDocument {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut entries = Vec::new();
        let mut seen_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    check_root(e, seen_root)?;
                    seen_root = true;
                    read_root_children(&mut xml_reader, &mut entries)?;
                }
                Event::Empty(ref e) => {
                    check_root(e, seen_root)?;
                    seen_root = true;
                }
                Event::Text(ref e) if !is_xml_whitespace(e) => {
                    return Err(Error::malformed("text outside the root element"));
                }
                Event::CData(_) => {
                    return Err(Error::malformed("text outside the root element"));
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::malformed("missing root element"));
        }
        Ok(ResxDocument { entries })
    }

    /// Write a minimal document holding only the `<data>` entries.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::Start(BytesStart::new("root")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for entry in &self.entries {
            let mut data = BytesStart::new("data");
            data.push_attribute(("name", entry.key.as_str()));
            data.push_attribute(("xml:space", "preserve"));

            xml_writer.write_event(Event::Text(BytesText::new("  ")))?;
            xml_writer.write_event(Event::Start(data))?;
            xml_writer.write_event(Event::Start(BytesStart::new("value")))?;
            // Carriage returns survive a read-back only as character references.
            let escaped = escape(&entry.raw_value).replace('\r', "&#13;");
            xml_writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
            xml_writer.write_event(Event::End(BytesEnd::new("value")))?;
            xml_writer.write_event(Event::End(BytesEnd::new("data")))?;
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("root")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }

    /// Override default file reading to support BOM-aware decoding (UTF-16 .resx files)
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = open_input(path.as_ref())?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(decoded.strip_prefix('\u{feff}').unwrap_or(&decoded))
    }
}

fn check_root(e: &BytesStart, seen_root: bool) -> Result<(), Error> {
    if seen_root {
        return Err(Error::malformed("multiple root elements"));
    }
    if e.name().as_ref() != b"root" {
        return Err(Error::malformed(format!(
            "root element is `{}`, expected `root`",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }
    Ok(())
}

/// Reads the children of `<root>` up to and including its end tag.
fn read_root_children<R: BufRead>(
    xml_reader: &mut Reader<R>,
    entries: &mut Vec<ResourceEntry>,
) -> Result<(), Error> {
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"data" => {
                entries.push(parse_data(e, xml_reader)?);
            }
            Event::Start(ref e) => skip_element(e, xml_reader)?,
            Event::Empty(ref e) if e.name().as_ref() == b"data" => {
                return Err(missing_value(&data_name(e)?));
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(Error::malformed("unexpected end of document inside <root>"));
            }
            _ => {}
        }
        buf.clear();
    }
}

fn parse_data<R: BufRead>(
    start: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<ResourceEntry, Error> {
    let key = data_name(start)?;
    let mut value = None;

    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"value" && value.is_none() => {
                value = Some(read_text_content(xml_reader)?);
            }
            Event::Start(ref e) => skip_element(e, xml_reader)?,
            Event::Empty(ref e) if e.name().as_ref() == b"value" && value.is_none() => {
                value = Some(String::new());
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::malformed(format!(
                    "unexpected end of document inside <data name=\"{}\">",
                    key
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    let raw_value = value.ok_or_else(|| missing_value(&key))?;
    Ok(ResourceEntry { key, raw_value })
}

fn data_name(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::malformed(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::malformed("data element missing 'name' attribute"))
}

fn missing_value(key: &str) -> Error {
    Error::malformed(format!("data element `{}` missing <value>", key))
}

/// Concatenated text of everything inside the current element, whitespace kept.
fn read_text_content<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut text = String::new();
    let mut depth = 0usize;

    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => {
                let raw = normalize_line_endings(utf8(&e)?);
                let unescaped = unescape(&raw).map_err(|e| Error::malformed(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(e) => text.push_str(&normalize_line_endings(utf8(&e)?)),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(Error::malformed("unexpected end of document inside <value>"));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| Error::malformed(e.to_string()))
}

/// XML end-of-line handling: `\r\n` and lone `\r` become `\n`.
///
/// Applied to raw text before entity expansion, so `&#13;` still yields `\r`.
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn is_xml_whitespace(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

fn skip_element<R: BufRead>(start: &BytesStart, xml_reader: &mut Reader<R>) -> Result<(), Error> {
    let end = start.to_end().into_owned();
    let mut buf = Vec::new();
    xml_reader.read_to_end_into(end.name(), &mut buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    #[test]
    fn test_parse_basic_resx() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
        <root>
            <data name="Hello" xml:space="preserve">
                <value>World</value>
            </data>
            <data name="Quoted" xml:space="preserve">
                <value>a"b</value>
                <comment>used by the parser</comment>
            </data>
        </root>
        "#;
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(
            document.entries,
            vec![
                ResourceEntry::new("Hello", "World"),
                ResourceEntry::new("Quoted", "a\"b"),
            ]
        );
    }

    #[test]
    fn test_headers_and_schema_are_skipped() {
        let xml = r#"<root>
          <xsd:schema id="root" xmlns="" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
            <xsd:element name="root"><xsd:complexType /></xsd:element>
          </xsd:schema>
          <resheader name="resmimetype">
            <value>text/microsoft-resx</value>
          </resheader>
          <data name="Only"><value>one</value></data>
          <metadata name="ignored"><value>x</value></metadata>
        </root>"#;
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(document.entries, vec![ResourceEntry::new("Only", "one")]);
    }

    #[test]
    fn test_value_whitespace_and_entities_preserved() {
        let xml = "<root><data name=\"Multi\"><value>  line one\n\tline two &amp; &lt;three&gt; \\n  </value></data></root>";
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(
            document.entries[0].raw_value,
            "  line one\n\tline two & <three> \\n  "
        );
    }

    #[test]
    fn test_crlf_line_endings_normalized() {
        let xml = "<root>\r\n<data name=\"Multi\"><value>line one\r\nline two\rline three</value></data>\r\n</root>\r\n";
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(document.entries[0].raw_value, "line one\nline two\nline three");
    }

    #[test]
    fn test_carriage_return_reference_kept() {
        let xml = "<root><data name=\"Cr\"><value>a&#13;&#10;b<![CDATA[c\r\nd]]></value></data></root>";
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(document.entries[0].raw_value, "a\r\nbc\nd");
    }

    #[test]
    fn test_text_outside_root() {
        let err = ResxDocument::from_str("junk<root><data name=\"a\"><value>b</value></data></root>")
            .unwrap_err();
        assert!(err.to_string().contains("text outside the root element"));

        let err = ResxDocument::from_str("<root><data name=\"a\"><value>b</value></data></root>trailing")
            .unwrap_err();
        assert!(err.to_string().contains("text outside the root element"));

        let document = ResxDocument::from_str("\r\n <root/>\n\t ").unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_value_cdata_and_nested_text() {
        let xml = "<root><data name=\"Mixed\"><value>a<![CDATA[<b>]]>c<i>d</i>e</value></data></root>";
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(document.entries[0].raw_value, "a<b>cde");
    }

    #[test]
    fn test_empty_value_element() {
        let xml = r#"<root><data name="Blank"><value/></data><data name="Open"><value></value></data></root>"#;
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(document.entries[0].raw_value, "");
        assert_eq!(document.entries[1].raw_value, "");
    }

    #[test]
    fn test_duplicates_are_kept_in_document_order() {
        let xml = r#"<root>
            <data name="Hello"><value>World</value></data>
            <data name="Other"><value>x</value></data>
            <data name="Hello"><value>Dup</value></data>
        </root>"#;
        let document = ResxDocument::from_str(xml).unwrap();
        assert_eq!(document.len(), 3);
        assert_eq!(document.duplicates(), vec![&ResourceEntry::new("Hello", "Dup")]);
    }

    #[test]
    fn test_empty_root() {
        assert!(ResxDocument::from_str("<root/>").unwrap().is_empty());
        assert!(ResxDocument::from_str("<root></root>").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_element() {
        let err = ResxDocument::from_str("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(err.to_string().contains("missing root element"));
    }

    #[test]
    fn test_wrong_root_element() {
        let err = ResxDocument::from_str("<resources><data name=\"a\"><value>b</value></data></resources>")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("expected `root`"));
    }

    #[test]
    fn test_data_missing_value() {
        let err = ResxDocument::from_str(
            "<root><data name=\"NoValue\"><comment>c</comment></data></root>",
        )
        .unwrap_err();
        assert!(err.to_string().contains("`NoValue` missing <value>"));

        let err = ResxDocument::from_str("<root><data name=\"Empty\"/></root>").unwrap_err();
        assert!(err.to_string().contains("`Empty` missing <value>"));
    }

    #[test]
    fn test_data_missing_name() {
        let err = ResxDocument::from_str("<root><data><value>v</value></data></root>").unwrap_err();
        assert!(err.to_string().contains("missing 'name'"));
    }

    #[test]
    fn test_unterminated_document() {
        let result = ResxDocument::from_str("<root><data name=\"a\"><value>b</value></data>");
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_end_tag() {
        let result = ResxDocument::from_str("<root><data name=\"a\"><value>b</data></root>");
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_serialization() {
        let document: ResxDocument = vec![
            ResourceEntry::new("Greeting", "Hello, \"friend\" & <co>"),
            ResourceEntry::new("Padded", "  spaced\nout  "),
            ResourceEntry::new("Empty", ""),
            ResourceEntry::new("Windows", "one\r\ntwo"),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        document.to_writer(&mut out).unwrap();
        let out_str = String::from_utf8(out).unwrap();
        assert!(out_str.contains("<data name=\"Greeting\" xml:space=\"preserve\">"));
        assert!(out_str.contains("<value>one&#13;\ntwo</value>"));

        let reparsed = ResxDocument::from_str(&out_str).unwrap();
        assert_eq!(document, reparsed);
    }
}
