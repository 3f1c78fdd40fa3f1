//! `MediaService`: images, audio and video attached to ads.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::cm::{CM_NAMESPACE, Selector};

soap_service! {
    /// Facade of `MediaService`.
    pub struct MediaService {
        path: "api/adwords/cm/v201809/MediaService",
        namespace: CM_NAMESPACE,
    }

    /// Returns a page of media matching the selector.
    fn get(Get) -> GetResponse, with_header: get_with_header;

    /// Returns a page of media matching an AWQL query.
    fn query(Query) -> QueryResponse, with_header: query_with_header;

    /// Uploads new media; the stored records are returned in order.
    fn upload(Upload) -> UploadResponse, with_header: upload_with_header;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Get {
    pub service_selector: Selector,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GetResponse {
    pub rval: Option<MediaPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    pub query: String,
}

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    pub rval: Option<MediaPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Upload {
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub rval: Vec<Media>,
}

soap_elements!(CM_NAMESPACE;
    Get => "get",
    Query => "query",
    Upload => "upload",
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaPage {
    pub total_num_entries: Option<i32>,
    #[serde(rename = "Page.Type")]
    pub page_type: Option<String>,
    pub entries: Vec<Media>,
}

/// A media record.
///
/// `xsi_type` names the concrete subtype (`Image`, `Video`, `Audio`,
/// `MediaBundle`) and is written as the `xsi:type` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    #[serde(
        rename(serialize = "@xsi:type", deserialize = "@type"),
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<i64>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<MediaSizeDimensionsMapEntry>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<MediaSizeStringMapEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,

    /// Base64 payload of `Image` and `MediaBundle` records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Media {
    /// An `Image` record carrying `bytes` for upload.
    pub fn image(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            xsi_type: Some("Image".to_string()),
            media_type: Some(MediaType::Image),
            name: Some(name.into()),
            data: Some(BASE64.encode(bytes)),
            ..Self::default()
        }
    }

    /// Decoded `data` payload, if any.
    pub fn decoded_data(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        self.data
            .as_deref()
            .map(|data| BASE64.decode(data.trim()))
            .transpose()
    }

    pub fn url(&self, size: MediaSize) -> Option<&str> {
        self.urls
            .iter()
            .find(|entry| entry.key == Some(size))
            .and_then(|entry| entry.value.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Audio,
    DynamicImage,
    Icon,
    Image,
    StandardIcon,
    Video,
    MediaBundle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MimeType {
    ImageJpeg,
    ImageGif,
    ImagePng,
    Flash,
    TextHtml,
    Pdf,
    Msword,
    Msexcel,
    Rtf,
    AudioWav,
    AudioMp3,
    Html5AdZip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSize {
    Full,
    Shrunken,
    Preview,
    VideoThumbnail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSizeDimensionsMapEntry {
    pub key: Option<MediaSize>,
    pub value: Option<Dimensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSizeStringMapEntry {
    pub key: Option<MediaSize>,
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsoap::{decode_envelope, encode_envelope};

    #[test]
    fn test_upload_request_shape() {
        let request = Upload {
            media: vec![Media::image("logo", b"\x89PNG")],
        };
        let xml = String::from_utf8(encode_envelope(&[], &request).unwrap()).unwrap();

        assert!(xml.contains(
            r#"<upload xmlns="https://adwords.google.com/api/adwords/cm/v201809"><media xsi:type="Image"><type>IMAGE</type><name>logo</name><data>iVBORw==</data></media></upload>"#
        ));
    }

    #[test]
    fn test_decode_query_response() {
        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <queryResponse xmlns="https://adwords.google.com/api/adwords/cm/v201809">
      <rval>
        <totalNumEntries>1</totalNumEntries>
        <Page.Type>MediaPage</Page.Type>
        <entries xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="Image">
          <mediaId>42</mediaId>
          <type>IMAGE</type>
          <dimensions><key>FULL</key><value><width>300</width><height>250</height></value></dimensions>
          <urls><key>FULL</key><value>https://example.com/full.png</value></urls>
          <urls><key>PREVIEW</key><value>https://example.com/preview.png</value></urls>
          <mimeType>IMAGE_PNG</mimeType>
          <name>logo</name>
          <fileSize>4</fileSize>
          <data>iVBORw==</data>
        </entries>
      </rval>
    </queryResponse>
  </soap:Body>
</soap:Envelope>"#;

        let mut response = QueryResponse::default();
        decode_envelope(xml.as_bytes(), Some(&mut response)).unwrap();

        let page = response.rval.unwrap();
        assert_eq!(page.total_num_entries, Some(1));
        let media = &page.entries[0];
        assert_eq!(media.xsi_type.as_deref(), Some("Image"));
        assert_eq!(media.media_id, Some(42));
        assert_eq!(media.mime_type, Some(MimeType::ImagePng));
        assert_eq!(media.url(MediaSize::Preview), Some("https://example.com/preview.png"));
        assert_eq!(media.dimensions[0].value.as_ref().unwrap().width, Some(300));
        assert_eq!(media.decoded_data().unwrap().unwrap(), b"\x89PNG");
    }
}
