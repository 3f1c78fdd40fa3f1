//! Structures de l'enveloppe SOAP et sérialisation

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};
use serde::Serialize;

use crate::errors::SoapError;

/// Namespace de l'enveloppe SOAP 1.1
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace XML Schema instance, déclaré sur l'enveloppe pour `xsi:type`
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

const ENVELOPE: &str = "soap:Envelope";
const HEADER: &str = "soap:Header";
const BODY: &str = "soap:Body";

/// A record that knows the XML element it is written under.
///
/// `element_name` may carry a prefix (`wsse:Security`) when the record
/// declares its own namespace bindings as attributes. When `namespace`
/// returns a value it is declared as the default namespace of the element.
pub trait SoapElement {
    fn element_name(&self) -> &str;

    fn namespace(&self) -> Option<&str> {
        None
    }
}

/// A header record attached to the outgoing envelope.
///
/// Implemented for every serializable [`SoapElement`], so any typed record
/// can be attached to a client.
pub trait HeaderElement: fmt::Debug + Send + Sync {
    fn header_name(&self) -> &str;

    fn header_namespace(&self) -> Option<&str>;

    fn write_xml(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), SoapError>;
}

impl<T> HeaderElement for T
where
    T: SoapElement + Serialize + fmt::Debug + Send + Sync,
{
    fn header_name(&self) -> &str {
        self.element_name()
    }

    fn header_namespace(&self) -> Option<&str> {
        self.namespace()
    }

    fn write_xml(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), SoapError> {
        write_element(writer, self)
    }
}

/// Ordered list of header records.
///
/// Duplicates are kept; records are written in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Header {
    pub items: Vec<Arc<dyn HeaderElement>>,
}

impl Header {
    pub fn new(items: Vec<Arc<dyn HeaderElement>>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Outgoing envelope: optional header plus exactly one body payload.
#[derive(Debug)]
pub struct RequestEnvelope<'a, B> {
    pub header: Option<Header>,
    pub body: &'a B,
}

impl<'a, B> RequestEnvelope<'a, B>
where
    B: SoapElement + Serialize,
{
    /// Builds an envelope; an empty header list leaves `header` unset.
    pub fn new(headers: Vec<Arc<dyn HeaderElement>>, body: &'a B) -> Self {
        let header = if headers.is_empty() {
            None
        } else {
            Some(Header::new(headers))
        };
        Self { header, body }
    }

    /// Serializes the envelope as a complete XML document.
    pub fn to_xml(&self) -> Result<Vec<u8>, SoapError> {
        let mut writer = Writer::new(Vec::new());

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new(ENVELOPE)
                .with_attributes([("xmlns:soap", SOAP_ENV_NS), ("xmlns:xsi", XSI_NS)]),
        ))?;

        if let Some(header) = self.header.as_ref().filter(|h| !h.is_empty()) {
            writer.write_event(Event::Start(BytesStart::new(HEADER)))?;
            for item in &header.items {
                item.write_xml(&mut writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(HEADER)))?;
        }

        writer.write_event(Event::Start(BytesStart::new(BODY)))?;
        write_element(&mut writer, self.body)?;
        writer.write_event(Event::End(BytesEnd::new(BODY)))?;

        writer.write_event(Event::End(BytesEnd::new(ENVELOPE)))?;

        Ok(writer.into_inner())
    }
}

/// Serializes `{Header: headers, Body: body}` into an XML document.
pub fn encode_envelope<B>(headers: &[Arc<dyn HeaderElement>], body: &B) -> Result<Vec<u8>, SoapError>
where
    B: SoapElement + Serialize,
{
    RequestEnvelope::new(headers.to_vec(), body).to_xml()
}

/// Writes one record under its own element name.
///
/// The record is rendered with serde, then its events are replayed into
/// `writer` so the namespace declaration lands on the record's root element.
pub(crate) fn write_element<T, W>(writer: &mut Writer<W>, value: &T) -> Result<(), SoapError>
where
    T: SoapElement + Serialize + ?Sized,
    W: Write,
{
    let fragment = quick_xml::se::to_string_with_root(value.element_name(), value)?;
    replay_fragment(writer, &fragment, value.namespace())
}

/// Copies the events of `fragment` into `writer`, declaring `namespace` on
/// the first element.
fn replay_fragment<W: Write>(
    writer: &mut Writer<W>,
    fragment: &str,
    namespace: Option<&str>,
) -> Result<(), SoapError> {
    let mut reader = Reader::from_str(fragment);
    let mut at_root = true;
    loop {
        let event = reader.read_event().map_err(SoapError::Replay)?;
        match event {
            Event::Start(start) if at_root => {
                at_root = false;
                writer.write_event(Event::Start(declare_namespace(start, namespace)))?;
            }
            Event::Empty(start) if at_root => {
                at_root = false;
                writer.write_event(Event::Empty(declare_namespace(start, namespace)))?;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    Ok(())
}

fn declare_namespace<'a>(mut start: BytesStart<'a>, namespace: Option<&str>) -> BytesStart<'a> {
    if let Some(ns) = namespace {
        start.push_attribute(("xmlns", ns));
    }
    start
}
