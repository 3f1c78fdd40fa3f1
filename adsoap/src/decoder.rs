//! Décodage des réponses SOAP
//!
//! The body must hold exactly one element: either the expected payload or a
//! `soap:Fault`. Anything else is rejected as a WS-I violation.

use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::envelope::SOAP_ENV_NS;
use crate::errors::SoapError;
use crate::fault::Fault;

/// Incoming envelope bound to a caller-owned response target.
///
/// `header`, when bound, receives the first child of `<soap:Header>`; the
/// other header children are skipped.
#[derive(Debug)]
pub struct ResponseEnvelope<'a, T, H = ()> {
    pub header: Option<&'a mut H>,
    pub body: ResponseBody<'a, T>,
}

/// Incoming body: the fault when one was returned, otherwise the payload
/// decoded into `content`.
#[derive(Debug)]
pub struct ResponseBody<'a, T> {
    pub fault: Option<Fault>,
    pub content: Option<&'a mut T>,
}

impl<'a, T: DeserializeOwned> ResponseEnvelope<'a, T> {
    pub fn new(content: &'a mut T) -> Self {
        Self {
            header: None,
            body: ResponseBody {
                fault: None,
                content: Some(content),
            },
        }
    }

    /// Binds a target for the response header record.
    pub fn with_header<H: DeserializeOwned>(self, header: &'a mut H) -> ResponseEnvelope<'a, T, H> {
        ResponseEnvelope {
            header: Some(header),
            body: self.body,
        }
    }
}

impl<'a, T: DeserializeOwned, H: DeserializeOwned> ResponseEnvelope<'a, T, H> {
    /// Decodes a raw SOAP document into this envelope.
    pub fn decode(&mut self, xml: &[u8]) -> Result<(), SoapError> {
        let mut reader = NsReader::from_reader(xml);

        let envelope = loop {
            let (ns, event) = reader.read_resolved_event()?;
            let in_soap_ns = is_soap_env(&ns);
            match event {
                Event::Start(start) if in_soap_ns && start.local_name().as_ref() == b"Envelope" => {
                    break start;
                }
                Event::Empty(start) if in_soap_ns && start.local_name().as_ref() == b"Envelope" => {
                    warn!("SOAP envelope without body");
                    return Ok(());
                }
                Event::Start(start) | Event::Empty(start) => {
                    return Err(SoapError::envelope(format!(
                        "expected element <Envelope> but have <{}>",
                        String::from_utf8_lossy(start.name().as_ref())
                    )));
                }
                Event::Eof => return Err(SoapError::envelope("no root element")),
                _ => {}
            }
        };

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let in_soap_ns = is_soap_env(&ns);
            match event {
                Event::Start(start) if in_soap_ns && start.local_name().as_ref() == b"Body" => {
                    self.body.decode(&mut reader, xml)?;
                }
                Event::Empty(start) if in_soap_ns && start.local_name().as_ref() == b"Body" => {
                    self.body.ensure_bound()?;
                }
                Event::Start(start)
                    if in_soap_ns
                        && start.local_name().as_ref() == b"Header"
                        && self.header.is_some() =>
                {
                    self.decode_header(&mut reader, xml)?;
                }
                Event::Start(start) => {
                    reader.read_to_end(start.name())?;
                }
                Event::End(end) if end.name() == envelope.name() => return Ok(()),
                Event::Eof => {
                    return Err(SoapError::envelope("unexpected end of document"));
                }
                _ => {}
            }
        }
    }

    /// Reads the children of `<Header>` up to its end tag.
    fn decode_header(&mut self, reader: &mut NsReader<&[u8]>, xml: &[u8]) -> Result<(), SoapError> {
        let mut target = self.header.take();
        loop {
            let position = markup_start(xml, reader.buffer_position() as usize);
            match reader.read_event()? {
                Event::Start(start) => {
                    reader.read_to_end(start.name())?;
                    if let Some(header) = target.take() {
                        let end = reader.buffer_position() as usize;
                        *header = quick_xml::de::from_reader(&xml[position..end])?;
                    }
                }
                Event::Empty(_) => {
                    if let Some(header) = target.take() {
                        let end = reader.buffer_position() as usize;
                        *header = quick_xml::de::from_reader(&xml[position..end])?;
                    }
                }
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(SoapError::envelope("unexpected end of document inside Header"));
                }
                _ => {}
            }
        }
    }
}

impl<'a, T: DeserializeOwned> ResponseBody<'a, T> {
    fn ensure_bound(&self) -> Result<(), SoapError> {
        if self.content.is_none() {
            return Err(SoapError::Misuse);
        }
        Ok(())
    }

    /// Reads the children of `<Body>` up to its end tag.
    fn decode(&mut self, reader: &mut NsReader<&[u8]>, xml: &[u8]) -> Result<(), SoapError> {
        self.ensure_bound()?;

        let mut consumed = false;
        loop {
            let position = markup_start(xml, reader.buffer_position() as usize);
            let (ns, event) = reader.read_resolved_event()?;
            let in_soap_ns = is_soap_env(&ns);
            match event {
                Event::Start(start) => {
                    if consumed {
                        return Err(SoapError::Protocol);
                    }
                    consumed = true;
                    if in_soap_ns && start.local_name().as_ref() == b"Fault" {
                        self.content = None;
                        self.fault = Some(decode_fault(reader, xml)?);
                    } else {
                        reader.read_to_end(start.name())?;
                        let end = reader.buffer_position() as usize;
                        self.decode_content(&xml[position..end])?;
                    }
                }
                Event::Empty(start) => {
                    if consumed {
                        return Err(SoapError::Protocol);
                    }
                    consumed = true;
                    if in_soap_ns && start.local_name().as_ref() == b"Fault" {
                        self.content = None;
                        self.fault = Some(Fault::default());
                    } else {
                        let end = reader.buffer_position() as usize;
                        self.decode_content(&xml[position..end])?;
                    }
                }
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(SoapError::envelope("unexpected end of document inside Body"));
                }
                _ => {}
            }
        }
    }

    fn decode_content(&mut self, fragment: &[u8]) -> Result<(), SoapError> {
        if let Some(target) = self.content.as_deref_mut() {
            *target = quick_xml::de::from_reader(fragment)?;
        }
        Ok(())
    }
}

/// Decodes `{Body: {Fault?, Content: content}}` from `xml`.
///
/// Returns the fault when the body carried one; `content` is then left as
/// it was. A `None` target is a misuse and fails before any payload is read.
pub fn decode_envelope<T: DeserializeOwned>(
    xml: &[u8],
    content: Option<&mut T>,
) -> Result<Option<Fault>, SoapError> {
    decode_envelope_with_header::<(), T>(xml, None, content)
}

/// Same as [`decode_envelope`], also binding the first header child to
/// `header` when the envelope has a `<Header>`.
pub fn decode_envelope_with_header<H, T>(
    xml: &[u8],
    header: Option<&mut H>,
    content: Option<&mut T>,
) -> Result<Option<Fault>, SoapError>
where
    H: DeserializeOwned,
    T: DeserializeOwned,
{
    let mut envelope = ResponseEnvelope {
        header,
        body: ResponseBody {
            fault: None,
            content,
        },
    };
    envelope.decode(xml)?;
    Ok(envelope.body.fault)
}

/// Offset of the `<` opening the markup the reader is about to return.
fn markup_start(xml: &[u8], position: usize) -> usize {
    let mut at = position;
    while xml.get(at).is_some_and(u8::is_ascii_whitespace) {
        at += 1;
    }
    if xml.get(at) == Some(&b'<') {
        return at;
    }
    xml[..position.min(xml.len())]
        .iter()
        .rposition(|b| *b == b'<')
        .unwrap_or(position)
}

fn is_soap_env(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SOAP_ENV_NS.as_bytes())
}

/// Reads the children of `<Fault>` up to its end tag.
fn decode_fault(reader: &mut NsReader<&[u8]>, xml: &[u8]) -> Result<Fault, SoapError> {
    let mut fault = Fault::default();
    loop {
        match reader.read_event()? {
            Event::Start(start) => match start.local_name().as_ref() {
                b"faultcode" => fault.fault_code = read_text(reader, &start)?,
                b"faultstring" => fault.fault_string = read_text(reader, &start)?,
                b"faultactor" => fault.fault_actor = read_text(reader, &start)?,
                b"detail" => {
                    let span = reader.read_to_end(start.name())?;
                    let raw = &xml[span.start as usize..span.end as usize];
                    fault.detail = String::from_utf8_lossy(raw).trim().to_string();
                }
                _ => {
                    reader.read_to_end(start.name())?;
                }
            },
            Event::End(_) => return Ok(fault),
            Event::Eof => {
                return Err(SoapError::envelope("unexpected end of document inside Fault"));
            }
            _ => {}
        }
    }
}

fn read_text(reader: &mut NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<String, SoapError> {
    let raw = reader.read_text(start.name())?;
    let text = quick_xml::escape::unescape(&raw).map_err(quick_xml::Error::from)?;
    Ok(text.trim().to_string())
}
