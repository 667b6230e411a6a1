use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ExtractorError;

/// The parts of a DAPI `<posts>` answer the partitioner cares about.
///
/// `count` is the total number of posts matching the search, regardless of `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GelbooruPostsPage {
    pub count: u64,
    pub ids: Vec<u64>,
}

impl GelbooruPostsPage {
    /// Reads a DAPI XML response.
    ///
    /// Post ids can come either as an `id` attribute (`<post id="1"/>`, Gelbooru 0.2.0 sites) or as
    /// an `<id>` child element (gelbooru.com).
    pub fn from_xml(xml: &str) -> Result<Self, ExtractorError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut count = None;
        let mut ids = Vec::new();
        let mut in_post = false;
        let mut in_id = false;

        loop {
            let event = reader.read_event()?;
            match &event {
                Event::Start(e) | Event::Empty(e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    match e.name().as_ref() {
                        b"posts" => count = attr_value(e, b"count")?,
                        b"post" => {
                            if let Some(id) = attr_value(e, b"id")? {
                                ids.push(id);
                            } else if !is_empty {
                                in_post = true;
                            }
                        }
                        b"id" if in_post && !is_empty => in_id = true,
                        b"response" => return Err(rejection(e)?),
                        _ => {}
                    }
                }
                Event::Text(text) if in_id => {
                    let raw = text.unescape()?;
                    ids.push(parse_id(&raw)?);
                }
                Event::End(e) => match e.name().as_ref() {
                    b"post" => in_post = false,
                    b"id" => in_id = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        let count = count.ok_or(ExtractorError::InvalidServerResponse)?;
        Ok(Self { count, ids })
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<u64>, ExtractorError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            let raw = attr.unescape_value()?;
            return parse_id(&raw).map(Some);
        }
    }
    Ok(None)
}

fn parse_id(raw: &str) -> Result<u64, ExtractorError> {
    raw.trim()
        .parse()
        .map_err(|_| ExtractorError::InvalidServerResponse)
}

/// DAPI answers refused requests with `<response success="false" reason="..."/>`.
fn rejection(e: &BytesStart<'_>) -> Result<ExtractorError, ExtractorError> {
    let mut reason = String::from("unknown reason");
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"reason" {
            reason = attr.unescape_value()?.into_owned();
        }
    }
    Ok(ExtractorError::ServerRejected { reason })
}
