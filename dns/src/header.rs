// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
//
//                                     1  1  1  1  1  1
//       0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                      ID                       |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                    QDCOUNT                    |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                    ANCOUNT                    |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                    NSCOUNT                    |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//     |                    ARCOUNT                    |
//     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

use crate::error::{Error, Result};
use crate::utils::remaining;
use byteorder::{ReadBytesExt, BE};
use bytes::{BufMut, BytesMut};
use std::io::Cursor;

pub const HEADER_LEN: usize = 12;

const QR_BIT: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F;
const AA_BIT: u16 = 0x0400;
const TC_BIT: u16 = 0x0200;
const RD_BIT: u16 = 0x0100;
const RA_BIT: u16 = 0x0080;
const Z_SHIFT: u16 = 4;
const Z_MASK: u16 = 0x07;
const RCODE_MASK: u16 = 0x0F;

// 12 bytes
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    /// true for a response
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Standard query with recursion desired and a single question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            rd: true,
            qdcount: 1,
            ..Default::default()
        }
    }

    /// The flags word. Opcode, Z and RCODE are masked to their field widths.
    pub fn flags(&self) -> u16 {
        let mut flags = 0u16;
        if self.qr {
            flags |= QR_BIT;
        }
        flags |= (u16::from(self.opcode) & OPCODE_MASK) << OPCODE_SHIFT;
        if self.aa {
            flags |= AA_BIT;
        }
        if self.tc {
            flags |= TC_BIT;
        }
        if self.rd {
            flags |= RD_BIT;
        }
        if self.ra {
            flags |= RA_BIT;
        }
        flags |= (u16::from(self.z) & Z_MASK) << Z_SHIFT;
        flags |= u16::from(self.rcode) & RCODE_MASK;

        flags
    }

    fn set_flags(&mut self, flags: u16) {
        self.qr = flags & QR_BIT != 0;
        self.opcode = ((flags >> OPCODE_SHIFT) & OPCODE_MASK) as u8;
        self.aa = flags & AA_BIT != 0;
        self.tc = flags & TC_BIT != 0;
        self.rd = flags & RD_BIT != 0;
        self.ra = flags & RA_BIT != 0;
        self.z = ((flags >> Z_SHIFT) & Z_MASK) as u8;
        self.rcode = (flags & RCODE_MASK) as u8;
    }

    pub fn to_bytes(&self, bytes: &mut BytesMut) {
        bytes.put_u16(self.id);
        bytes.put_u16(self.flags());
        bytes.put_u16(self.qdcount);
        bytes.put_u16(self.ancount);
        bytes.put_u16(self.nscount);
        bytes.put_u16(self.arcount);
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self> {
        let available = remaining(rdr);
        let truncated = || Error::TruncatedHeader {
            expected: HEADER_LEN,
            available,
        };
        if available < HEADER_LEN {
            return Err(truncated());
        }

        let id = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let flags = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let qdcount = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let ancount = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let nscount = rdr.read_u16::<BE>().map_err(|_| truncated())?;
        let arcount = rdr.read_u16::<BE>().map_err(|_| truncated())?;

        let mut h = Self {
            id,
            qdcount,
            ancount,
            nscount,
            arcount,
            ..Default::default()
        };
        h.set_flags(flags);

        Ok(h)
    }

    /// Mnemonic of the response code, e.g. `NXDOMAIN`.
    pub fn rcode_name(&self) -> String {
        match self.rcode {
            0 => "NOERROR".to_string(),
            1 => "FORMERR".to_string(),
            2 => "SERVFAIL".to_string(),
            3 => "NXDOMAIN".to_string(),
            4 => "NOTIMP".to_string(),
            5 => "REFUSED".to_string(),
            n => format!("RCODE{}", n),
        }
    }
}
