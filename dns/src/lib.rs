// https://datatracker.ietf.org/doc/html/rfc1035#section-4

mod error;
mod header;
mod message;
pub mod name;
mod question;
mod resource_record;
mod utils;

pub use domain_name_query_types::{NameQuery, QType};
pub use error::{EncodingError, Error, Result};
pub use header::{Header, HEADER_LEN};
pub use message::Message;
pub use question::Question;
pub use resource_record::{RecordData, ResourceRecord};

use bytes::Bytes;

pub fn encode_query(id: u16, name_query: &NameQuery) -> Result<Bytes> {
    Message::query(id, name_query)?.to_bytes()
}

pub fn decode_response(response_bytes: Bytes) -> Result<Message> {
    Message::parse(response_bytes)
}
