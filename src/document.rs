// Channel document processing: walks the XML tree, extracts one logical
// Channel per <channel> element, and drives resolve -> encode -> write over
// the memory image. Channels are handled strictly in document order; a bad
// field never aborts the run, it just falls back and logs.

use crate::codec::encode_channel;
use crate::core::channel::{leading_digits, parse_mhz, Channel};
use crate::core::constants::{
    band_index, dcs_index, mode_index, power_index, scan_index, sql_index, tone_index,
    DEFAULT_TONE_INDEX,
};
use crate::image::{Image, ImageError};
use crate::layout::{resolve, SlotCounter};
use roxmltree::{Document, Node};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Namespace the channel schema lives in. A document may omit namespaces
/// entirely, but a different namespace on the root means it is not for us.
pub const SCHEMA_NS_URI: &str = "urn:ftm400:channels";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to parse document: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Parse the channel document and write every resolvable channel into the
/// image. Returns the number of channels written.
///
/// Duplicate (region, slot) placements overwrite silently, matching the
/// document's order; a channel whose slot exceeds its bank is dropped with a
/// diagnostic and processing continues.
pub fn import_channels(xml: &str, image: &mut Image) -> Result<usize> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let ns = root.tag_name().namespace();
    if let Some(uri) = ns {
        if uri != SCHEMA_NS_URI {
            warn!("bad namespace URI: {}", uri);
            return Ok(0);
        }
    }

    if root.tag_name().name() != "channels" {
        warn!("bad root element: {}", root.tag_name().name());
        return Ok(0);
    }

    let mut counter = SlotCounter::new();
    let mut written = 0;

    for node in root.children().filter(Node::is_element) {
        if node.tag_name().namespace() != ns {
            warn!(
                "skipping {} ns={}",
                node.tag_name().name(),
                node.tag_name().namespace().unwrap_or("<empty>")
            );
            continue;
        }
        if node.tag_name().name() != "channel" {
            warn!("skipping {}", node.tag_name().name());
            continue;
        }

        let chan = extract_channel(&node, ns);

        let dest = match resolve(&chan, &mut counter) {
            Some(dest) => dest,
            None => continue,
        };

        let (fields, tag) = encode_channel(Some(&chan));
        image.write_record(dest.field_offset(), &fields)?;
        image.write_record(dest.tag_offset(), &tag)?;
        written += 1;
    }

    Ok(written)
}

/// Populate a Channel from one <channel> element. Unrecognized enum values
/// log and fall back to their defaults; nothing here is fatal.
fn extract_channel(node: &Node, ns: Option<&str>) -> Channel {
    let mut chan = Channel::default();

    if let Some(name) = node.attribute("name") {
        chan.memname = name.to_string();
        info!("channel: {}", chan.memname);
    } else {
        // leading digits only, so trailing junk degrades like strtol would
        if let Some(bank) = node.attribute("bank") {
            chan.bank = leading_digits(bank.trim());
        }
        if let Some(slot) = node.attribute("slot") {
            chan.slot = leading_digits(slot.trim());
        }
        info!("channel: {}/{}", chan.bank, chan.slot);
    }

    for child in node.children().filter(Node::is_element) {
        if child.tag_name().namespace() != ns {
            warn!(
                "skipping {} ns={}",
                child.tag_name().name(),
                child.tag_name().namespace().unwrap_or("<empty>")
            );
            continue;
        }

        let text = child.text().unwrap_or("").trim();
        debug!("{} = {}", child.tag_name().name(), text);

        match child.tag_name().name() {
            "band" => {
                if let Some(i) = band_index(text) {
                    chan.band = i;
                }
            }
            "frequency" => {
                chan.rx = parse_mhz(text);
            }
            "txFrequency" => {
                chan.tx = parse_mhz(text);
            }
            "offset" => parse_offset(text, &mut chan),
            "sql" => match sql_index(text) {
                Some(i) => chan.sql = i,
                None => warn!("bad sql: {}", text),
            },
            "tone" => {
                // tones are matched on the truncated integer Hz value
                let hz = text.split('.').next().unwrap_or("").parse().unwrap_or(0);
                match tone_index(hz) {
                    Some(i) => chan.tone = i,
                    None => {
                        warn!("bad tone: {}", text);
                        chan.tone = DEFAULT_TONE_INDEX;
                    }
                }
            }
            "dcs" => match dcs_index(text) {
                Some(i) => chan.dcs = i,
                None => warn!("bad dcs: {}", text),
            },
            "mode" => {
                if let Some(i) = mode_index(text) {
                    chan.mode = i;
                }
            }
            "power" => {
                if let Some(i) = power_index(text) {
                    chan.power = i;
                }
            }
            "name" => {
                if chan.tag.is_empty() {
                    chan.set_tag(text);
                } else {
                    debug!("name ignored (have tag)");
                }
            }
            "tag" => chan.set_tag(text),
            "scan" => match scan_index(text) {
                Some(i) => chan.scan = i,
                None => warn!("bad scan: {}", text),
            },
            other => debug!("ignoring element {}", other),
        }
    }

    chan.default_offset();
    chan
}

/// An offset element is either a bare shift direction ("+" or "-") or a
/// signed magnitude in MHz ("-0.600"); the latter sets both the direction
/// and the offset.
fn parse_offset(text: &str, chan: &mut Channel) {
    match text {
        "+" => chan.duplex = 1,
        "-" => chan.duplex = -1,
        _ => {
            chan.duplex = 1;
            let magnitude = if let Some(rest) = text.strip_prefix('-') {
                chan.duplex = -1;
                rest
            } else if let Some(rest) = text.strip_prefix('+') {
                rest
            } else {
                text
            };
            chan.offset = parse_mhz(magnitude);
        }
    }
}
