// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1
//
//     +---------------------+
//     |        Header       |
//     +---------------------+
//     |       Question      | the question for the name server
//     +---------------------+
//     |        Answer       | RRs answering the question
//     +---------------------+
//     |      Authority      | RRs pointing toward an authority
//     +---------------------+
//     |      Additional     | RRs holding additional information
//     +---------------------+

use crate::error::{EncodingError, Error, Result};
use crate::header::{Header, HEADER_LEN};
use crate::question::Question;
use crate::resource_record::ResourceRecord;
use crate::utils::remaining;
use bytes::{Bytes, BytesMut};
use domain_name_query_types::NameQuery;
use std::io::Cursor;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    authority: Vec<ResourceRecord>,
    additional: Vec<ResourceRecord>,
}

impl Message {
    /// An outbound message. Record sections stay empty; they are only ever
    /// filled by decoding.
    pub fn new(header: Header, questions: Vec<Question>) -> Self {
        Self {
            header,
            questions,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Standard recursive query for one name.
    pub fn query(id: u16, name_query: &NameQuery) -> Result<Self> {
        let question = Question::from_name_query(name_query)?;
        Ok(Self::new(Header::query(id), vec![question]))
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn authority(&self) -> &[ResourceRecord] {
        &self.authority
    }

    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    /// Header followed by the questions. The counts written are the ones
    /// that match what is serialized: QDCOUNT from the question list, zero
    /// for the record sections.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let qdcount = u16::try_from(self.questions.len()).map_err(|_| EncodingError::TooManyQuestions {
            count: self.questions.len(),
        })?;
        let header = Header {
            qdcount,
            ancount: 0,
            nscount: 0,
            arcount: 0,
            ..self.header
        };

        let size = HEADER_LEN + self.questions.iter().map(|q| q.qname().len() + 4).sum::<usize>();
        let mut bytes = BytesMut::with_capacity(size);
        header.to_bytes(&mut bytes);
        for q in self.questions.iter() {
            q.to_bytes(&mut bytes);
        }

        Ok(bytes.freeze())
    }

    /// Decodes a whole datagram. Every section is read with the complete
    /// datagram as the compression reference; the first failure aborts the
    /// decode.
    pub fn parse(response: Bytes) -> Result<Self> {
        if response.len() < HEADER_LEN {
            return Err(Error::TruncatedMessage {
                expected: HEADER_LEN,
                available: response.len(),
            });
        }

        let mut reader = Cursor::new(&response[..]);

        let header = Header::parse_from_reader(&mut reader)?;

        let mut questions: Vec<Question> = Vec::new();
        for _ in 0..header.qdcount {
            questions.push(Question::parse_from_reader(&mut reader)?);
        }

        let answers = parse_records(&mut reader, &response, header.ancount)?;
        let authority = parse_records(&mut reader, &response, header.nscount)?;
        let additional = parse_records(&mut reader, &response, header.arcount)?;

        let trailing = remaining(&reader);
        if trailing > 0 {
            log::debug!("ignoring {} trailing bytes after the last record", trailing);
        }

        let msg = Self {
            header,
            questions,
            answers,
            authority,
            additional,
        };

        Ok(msg)
    }

    /// Like [`Message::parse`], copying the datagram first.
    pub fn parse_response(response: &[u8]) -> Result<Self> {
        Self::parse(Bytes::copy_from_slice(response))
    }
}

fn parse_records(
    reader: &mut Cursor<&[u8]>,
    message: &Bytes,
    count: u16,
) -> Result<Vec<ResourceRecord>> {
    let mut records: Vec<ResourceRecord> = Vec::new();
    for _ in 0..count {
        records.push(ResourceRecord::parse_from_reader(reader, message)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_record::RecordData;
    use domain_name_query_types::QType;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn to_bytes_test() {
        let msg = Message::query(0, &NameQuery::a_record("example.com")).unwrap();
        let bytes = msg.to_bytes().unwrap();

        let expected = [
            0x00, 0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // header
            0x07, 0x65, 0x78, 0x61, 0x6D, 0x70, 0x6C, 0x65, 0x03, 0x63, 0x6F, 0x6D, 0x00, // qname
            0x00, 0x01, 0x00, 0x01, // qtype, qclass
        ];
        assert_eq!(&expected[..], &bytes[..]);
    }

    #[test]
    fn counts_follow_the_serialized_sections() {
        let header = Header {
            id: 7,
            qdcount: 9,
            ancount: 3,
            ..Header::query(7)
        };
        let questions = vec![
            Question::new("a.example", QType::A).unwrap(),
            Question::new("b.example", QType::AAAA).unwrap(),
        ];
        let bytes = Message::new(header, questions).to_bytes().unwrap();

        let decoded = Message::parse(bytes).unwrap();
        assert_eq!(2, decoded.header().qdcount);
        assert_eq!(0, decoded.header().ancount);
        assert_eq!("b.example", decoded.questions()[1].domain());
    }

    #[test]
    fn question_only_message_re_encodes_identically() {
        let msg = Message::query(5578, &NameQuery::new("www.rust-lang.org", QType::AAAA)).unwrap();
        let bytes = msg.to_bytes().unwrap();

        let decoded = Message::parse(bytes.clone()).unwrap();
        assert_eq!(msg, decoded);
        assert_eq!(bytes, decoded.to_bytes().unwrap());
    }

    fn push_record(buf: &mut Vec<u8>, name: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) {
        buf.extend_from_slice(name);
        buf.extend_from_slice(&rtype.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&ttl.to_be_bytes());
        buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        buf.extend_from_slice(rdata);
    }

    // www.example.com CNAME example.com, two addresses, one NS, one glue
    // record, names compressed the way servers do
    fn compressed_response() -> Vec<u8> {
        let mut buf = vec![
            0x15, 0xCA, 0x81, 0x80, 0x00, 0x01, 0x00, 0x03, 0x00, 0x01, 0x00, 0x01,
        ];
        // question at 12: www(12) example(16) com(24)
        buf.extend_from_slice(&[3, b'w', b'w', b'w', 7]);
        buf.extend_from_slice(b"example");
        buf.extend_from_slice(&[3, b'c', b'o', b'm', 0, 0, 1, 0, 1]);
        assert_eq!(33, buf.len());

        push_record(&mut buf, &[0xC0, 0x0C], 5, 60, &[0xC0, 0x10]);
        push_record(&mut buf, &[0xC0, 0x10], 1, 300, &[93, 184, 216, 34]);
        let v6: Ipv6Addr = "2606:2800:220:1:248:1893:25c8:1946".parse().unwrap();
        push_record(&mut buf, &[0xC0, 0x10], 28, 300, &v6.octets());
        assert_eq!(91, buf.len());

        // NS rdata at 103: a.gtld-servers + pointer to com
        let mut ns = vec![1, b'a', 12];
        ns.extend_from_slice(b"gtld-servers");
        ns.extend_from_slice(&[0xC0, 0x18]);
        push_record(&mut buf, &[0xC0, 0x18], 2, 172800, &ns);
        assert_eq!(120, buf.len());

        push_record(&mut buf, &[0xC0, 0x67], 1, 172800, &[192, 5, 6, 30]);
        buf
    }

    #[test]
    fn parse_compressed_response() {
        let msg = Message::parse(Bytes::from(compressed_response())).unwrap();

        let header = msg.header();
        assert_eq!(5578, header.id);
        assert!(header.qr && header.rd && header.ra);
        assert_eq!((1, 3, 1, 1), (header.qdcount, header.ancount, header.nscount, header.arcount));

        assert_eq!("www.example.com", msg.questions()[0].domain());
        assert_eq!(QType::A, msg.questions()[0].qtype());

        let answers = msg.answers();
        assert_eq!(3, answers.len());
        assert_eq!("www.example.com", answers[0].domain());
        assert_eq!(&RecordData::CNAME("example.com".to_string()), answers[0].data());
        assert_eq!("example.com", answers[1].domain());
        assert_eq!(&RecordData::A(Ipv4Addr::new(93, 184, 216, 34)), answers[1].data());
        assert_eq!("2606:2800:220:1:248:1893:25c8:1946", answers[2].data().to_string());

        assert_eq!("com", msg.authority()[0].domain());
        assert_eq!(&RecordData::NS("a.gtld-servers.com".to_string()), msg.authority()[0].data());

        let glue = &msg.additional()[0];
        assert_eq!("a.gtld-servers.com", glue.domain());
        assert_eq!("192.5.6.30", glue.data().to_string());
        assert_eq!(172800, glue.ttl());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut buf = compressed_response();
        buf.extend_from_slice(&[0, 0, 0]);
        let msg = Message::parse_response(&buf).unwrap();
        assert_eq!(1, msg.additional().len());
    }

    #[test]
    fn short_buffer_fails() {
        let bytes = Bytes::from_static(&[0u8; 11]);
        assert_eq!(
            Err(Error::TruncatedMessage {
                expected: 12,
                available: 11,
            }),
            Message::parse(bytes)
        );
    }

    #[test]
    fn missing_answer_fails() {
        let query = Message::query(1, &NameQuery::a_record("example.com")).unwrap();
        let mut buf = query.to_bytes().unwrap().to_vec();
        // ANCOUNT = 1 with nothing after the question
        buf[7] = 1;
        let end = buf.len();

        assert_eq!(
            Err(Error::TruncatedRecord {
                offset: end,
                expected: 1,
                available: 0,
            }),
            Message::parse_response(&buf)
        );
    }

    #[test]
    fn any_section_failure_aborts() {
        let mut buf = compressed_response();
        // the glue record now points at itself
        let glue = buf.len() - 16;
        buf[glue + 1] = 120;

        assert_eq!(
            Err(Error::InvalidCompressionPointer {
                offset: 120,
                target: Some(120),
            }),
            Message::parse_response(&buf)
        );
    }

    #[test]
    fn missing_question_fails() {
        let mut buf = vec![0u8; 12];
        buf[5] = 1;
        assert!(matches!(
            Message::parse_response(&buf),
            Err(Error::TruncatedQuestion { offset: 12, .. })
        ));
    }
}
