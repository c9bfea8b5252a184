// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
//
//                                     1  1  1  1  1  1
//       0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     /                     QNAME                     /
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                     QTYPE                     |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                     QCLASS                    |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

use crate::error::{Error, Result};
use crate::name::{domain_to_qname, read_qname};
use crate::utils::remaining;
use byteorder::{ReadBytesExt, BE};
use bytes::{BufMut, BytesMut};
use domain_name_query_types::{NameQuery, QType, CLASS_IN};
use std::io::Cursor;

// qtype + qclass
const FIXED_LEN: usize = 4;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Question {
    domain: String,
    // wire form of `domain`, never compressed
    qname: Vec<u8>,
    qtype: QType,
    qclass: u16,
}

impl Question {
    pub fn new(domain: &str, qtype: QType) -> Result<Self> {
        Self::with_class(domain, qtype, CLASS_IN)
    }

    pub fn with_class(domain: &str, qtype: QType, qclass: u16) -> Result<Self> {
        let qname = domain_to_qname(domain)?;

        Ok(Self {
            domain: domain.to_string(),
            qname,
            qtype,
            qclass,
        })
    }

    pub fn from_name_query(name_query: &NameQuery) -> Result<Self> {
        Self::new(&name_query.name, name_query.q_type)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn qname(&self) -> &[u8] {
        &self.qname
    }

    pub fn qtype(&self) -> QType {
        self.qtype
    }

    pub fn qclass(&self) -> u16 {
        self.qclass
    }

    pub fn to_bytes(&self, bytes: &mut BytesMut) {
        bytes.put_slice(&self.qname);
        bytes.put_u16(self.qtype.into());
        bytes.put_u16(self.qclass);
    }

    /// Reads one question at the cursor. The cursor's buffer must be the
    /// whole message so that a compressed QNAME resolves.
    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self> {
        let offset = rdr.position() as usize;
        let (domain, qname) = read_qname(rdr).map_err(|e| e.in_question(offset, remaining(rdr)))?;

        let available = remaining(rdr);
        let truncated = || Error::TruncatedQuestion {
            offset,
            expected: FIXED_LEN,
            available,
        };
        if available < FIXED_LEN {
            return Err(truncated());
        }

        let qtype = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let qclass = rdr.read_u16::<BE>().map_err(|_| truncated())?;

        let q = Self {
            domain,
            qname,
            qtype: QType::from(qtype),
            qclass,
        };

        Ok(q)
    }
}
