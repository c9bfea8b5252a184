// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3
//
//                                     1  1  1  1  1  1
//       0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     /                      NAME                     /
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                      TYPE                     |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                     CLASS                     |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                      TTL                      |
//     |                                               |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                   RDLENGTH                    |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
//     /                     RDATA                     /
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

use crate::error::{Error, Result};
use crate::name::{decode_name, read_name};
use crate::utils::remaining;
use byteorder::{ReadBytesExt, BE};
use bytes::Bytes;
use domain_name_query_types::{class_name, QType};
use std::fmt;
use std::io::Cursor;
use std::net::{Ipv4Addr, Ipv6Addr};

// type + class + ttl + rdlength
const FIXED_LEN: usize = 10;

/// RDATA interpreted according to the record type.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(String),
    NS(String),
    MX { preference: u16, exchange: String },
    /// Any other type, or an address record of the wrong length.
    Opaque(Bytes),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::AAAA(addr) => write!(f, "{}", addr),
            RecordData::CNAME(name) | RecordData::NS(name) => write!(f, "{}", name),
            RecordData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Opaque(bytes) => write!(f, "{}", hex::encode(bytes)),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResourceRecord {
    domain: String,
    rtype: QType,
    rclass: u16,
    ttl: u32,
    rdlength: u16,
    rdata: Bytes,
    data: RecordData,
}

impl ResourceRecord {
    /// Reads one record at the cursor.
    ///
    /// `message` must hold the same bytes the cursor reads from; RDATA is
    /// sliced out of it without copying, and names inside RDATA are
    /// resolved against it.
    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>, message: &Bytes) -> Result<Self> {
        let offset = rdr.position() as usize;
        let domain = read_name(rdr).map_err(|e| e.in_record(offset, remaining(rdr)))?;

        let fixed_offset = rdr.position() as usize;
        let available = remaining(rdr);
        let truncated = || Error::TruncatedRecord {
            offset: fixed_offset,
            expected: FIXED_LEN,
            available,
        };
        if available < FIXED_LEN {
            return Err(truncated());
        }

        let rtype = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let rclass = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let ttl = rdr.read_u32::<BE>().map_err(|_| truncated())?;
        let rdlength = rdr.read_u16::<BE>().map_err(|_| truncated())?;

        let rdata_begin = rdr.position() as usize;
        let rdata_end = rdata_begin + rdlength as usize;
        let available = remaining(rdr);
        if available < rdlength as usize || rdata_end > message.len() {
            return Err(Error::TruncatedRecord {
                offset: rdata_begin,
                expected: rdlength as usize,
                available,
            });
        }
        let rdata = message.slice(rdata_begin..rdata_end);
        rdr.set_position(rdata_end as u64);

        let rtype = QType::from(rtype);
        let data = parse_rdata(rtype, message, rdata_begin, &rdata)?;

        let record = Self {
            domain,
            rtype,
            rclass,
            ttl,
            rdlength,
            rdata,
            data,
        };

        Ok(record)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn rtype(&self) -> QType {
        self.rtype
    }

    pub fn rclass(&self) -> u16 {
        self.rclass
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn rdlength(&self) -> u16 {
        self.rdlength
    }

    /// Raw RDATA, a view into the received datagram.
    pub fn rdata(&self) -> &Bytes {
        &self.rdata
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let domain = if self.domain.is_empty() {
            "."
        } else {
            self.domain.as_str()
        };

        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            domain,
            self.ttl,
            class_name(self.rclass),
            self.rtype,
            self.data
        )
    }
}

fn parse_rdata(rtype: QType, message: &[u8], begin: usize, rdata: &Bytes) -> Result<RecordData> {
    let end = begin + rdata.len();

    let data = match rtype {
        QType::A if rdata.len() == 4 => {
            let octets: [u8; 4] = [rdata[0], rdata[1], rdata[2], rdata[3]];
            RecordData::A(Ipv4Addr::from(octets))
        }
        QType::AAAA if rdata.len() == 16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(rdata);
            RecordData::AAAA(Ipv6Addr::from(octets))
        }
        QType::CNAME => RecordData::CNAME(rdata_name(message, begin, end)?),
        QType::NS => RecordData::NS(rdata_name(message, begin, end)?),
        QType::MX if rdata.len() >= 2 => {
            let preference = u16::from_be_bytes([rdata[0], rdata[1]]);
            let exchange = rdata_name(message, begin + 2, end)?;
            RecordData::MX {
                preference,
                exchange,
            }
        }
        _ => RecordData::Opaque(rdata.clone()),
    };

    Ok(data)
}

// a name embedded in RDATA, which must not run past RDLENGTH
fn rdata_name(message: &[u8], start: usize, end: usize) -> Result<String> {
    let available = end.saturating_sub(start);

    let (domain, consumed) = decode_name(&message[..end], start).map_err(|e| e.in_record(start, available))?;
    if consumed > available {
        return Err(Error::TruncatedRecord {
            offset: start,
            expected: consumed,
            available,
        });
    }

    Ok(domain)
}
