// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4

use crate::error::{EncodingError, Error, Result};
use std::collections::HashSet;
use std::io::Cursor;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

// top two bits of a length byte
const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER: u8 = 0xC0;
const POINTER_OFFSET_MASK: u8 = 0x3F;

/// Encodes a dotted domain name into length-prefixed labels ending with the
/// root label. Never emits compression pointers.
pub fn domain_to_qname(domain: &str) -> Result<Vec<u8>> {
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);

    let mut qname: Vec<u8> = Vec::with_capacity(trimmed.len() + 2);
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(EncodingError::EmptyLabel {
                    domain: domain.to_string(),
                }
                .into());
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodingError::LabelTooLong {
                    label: label.to_string(),
                    length: label.len(),
                }
                .into());
            }

            qname.push(label.len() as u8);
            qname.extend_from_slice(label.as_bytes());
        }
    }
    qname.push(0);

    if qname.len() > MAX_NAME_LEN {
        return Err(EncodingError::NameTooLong {
            domain: domain.to_string(),
            length: qname.len(),
        }
        .into());
    }

    Ok(qname)
}

/// Decodes a standalone label sequence. There is no message to resolve
/// pointers against, so any pointer is an error.
pub fn qname_to_domain(qname: &[u8]) -> Result<String> {
    decode_labels(qname, 0, false).map(|decoded| decoded.domain)
}

/// Decodes the name starting at `start` in `message`, following compression
/// pointers anywhere earlier in the message.
///
/// Returns the dotted name and the number of bytes the name occupies at
/// `start`. When the name ends in a pointer the count stops after the two
/// pointer bytes; the bytes jumped to are not counted.
pub fn decode_name(message: &[u8], start: usize) -> Result<(String, usize)> {
    decode_labels(message, start, true).map(|decoded| (decoded.domain, decoded.consumed))
}

/// Reads a name at the cursor position, treating the whole underlying
/// buffer as the message, and advances past the name's wire bytes.
pub fn read_name(rdr: &mut Cursor<&[u8]>) -> Result<String> {
    read_qname(rdr).map(|(domain, _)| domain)
}

/// Like [`read_name`], also returning the name's uncompressed wire form.
pub fn read_qname(rdr: &mut Cursor<&[u8]>) -> Result<(String, Vec<u8>)> {
    let message: &[u8] = *rdr.get_ref();
    let start = rdr.position() as usize;

    let decoded = decode_labels(message, start, true)?;
    rdr.set_position((start + decoded.consumed) as u64);

    Ok((decoded.domain, decoded.qname))
}

struct Decoded {
    domain: String,
    // labels as read, pointers expanded
    qname: Vec<u8>,
    consumed: usize,
}

fn decode_labels(data: &[u8], start: usize, follow_pointers: bool) -> Result<Decoded> {
    let mut labels: Vec<String> = Vec::new();
    let mut qname: Vec<u8> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut consumed: Option<usize> = None;
    let mut index = start;

    loop {
        let length = *data.get(index).ok_or(Error::TruncatedName { offset: index })?;

        match length & LABEL_TYPE_MASK {
            0 if length == 0 => {
                qname.push(0);
                index += 1;
                break;
            }
            0 => {
                let label_begin_index = index + 1;
                let next_index = label_begin_index + length as usize;

                let label_bytes = data
                    .get(label_begin_index..next_index)
                    .ok_or(Error::TruncatedName { offset: data.len() })?;
                labels.push(String::from_utf8_lossy(label_bytes).to_string());
                qname.push(length);
                qname.extend_from_slice(label_bytes);

                index = next_index;
            }
            POINTER => {
                if !follow_pointers {
                    return Err(Error::InvalidCompressionPointer {
                        offset: index,
                        target: None,
                    });
                }

                let low = *data.get(index + 1).ok_or(Error::TruncatedName { offset: index + 1 })?;
                let target = usize::from(length & POINTER_OFFSET_MASK) << 8 | usize::from(low);

                // pointers must point backwards
                if target >= index || !visited.insert(target) {
                    return Err(Error::InvalidCompressionPointer {
                        offset: index,
                        target: Some(target),
                    });
                }
                log::trace!("following name pointer at {} to {}", index, target);

                consumed.get_or_insert_with(|| index + 2 - start);
                index = target;
            }
            _ => {
                return Err(Error::UnsupportedLabelType {
                    offset: index,
                    label: length,
                })
            }
        }
    }

    Ok(Decoded {
        domain: labels.join("."),
        qname,
        consumed: consumed.unwrap_or_else(|| index - start),
    })
}
