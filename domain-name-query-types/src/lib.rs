use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Internet class, the only one queries are sent with.
pub const CLASS_IN: u16 = 1;

// https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum QType {
    A,
    NS,
    CNAME,
    SOA,
    MX,
    AAAA,
    Unknown(u16),
}

impl From<u16> for QType {
    fn from(code: u16) -> Self {
        match code {
            1 => QType::A,
            2 => QType::NS,
            5 => QType::CNAME,
            6 => QType::SOA,
            15 => QType::MX,
            28 => QType::AAAA,
            n => QType::Unknown(n),
        }
    }
}

impl From<QType> for u16 {
    fn from(q_type: QType) -> Self {
        match q_type {
            QType::A => 1,
            QType::NS => 2,
            QType::CNAME => 5,
            QType::SOA => 6,
            QType::MX => 15,
            QType::AAAA => 28,
            QType::Unknown(n) => n,
        }
    }
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            QType::A => "A",
            QType::NS => "NS",
            QType::CNAME => "CNAME",
            QType::SOA => "SOA",
            QType::MX => "MX",
            QType::AAAA => "AAAA",
            QType::Unknown(n) => return write!(f, "Unknown Type ({})", n),
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseQTypeError(String);

impl fmt::Display for ParseQTypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown record type '{}'", self.0)
    }
}

impl Error for ParseQTypeError {}

impl FromStr for QType {
    type Err = ParseQTypeError;

    /// Accepts a mnemonic in any case, or a decimal type code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let q_type = match s.to_ascii_uppercase().as_str() {
            "A" => QType::A,
            "NS" => QType::NS,
            "CNAME" => QType::CNAME,
            "SOA" => QType::SOA,
            "MX" => QType::MX,
            "AAAA" => QType::AAAA,
            other => match other.parse::<u16>() {
                Ok(code) => QType::from(code),
                Err(_) => return Err(ParseQTypeError(s.to_string())),
            },
        };
        Ok(q_type)
    }
}

/// Class mnemonic as printed next to a record.
pub fn class_name(class: u16) -> String {
    match class {
        CLASS_IN => "IN".to_string(),
        3 => "CH".to_string(),
        4 => "HS".to_string(),
        n => format!("CLASS{}", n),
    }
}

pub type Name = String;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NameQuery {
    pub name: Name,
    pub q_type: QType,
}

impl NameQuery {
    pub fn new(name_str: &str, q_type: QType) -> Self {
        Self {
            name: Name::from(name_str),
            q_type,
        }
    }

    pub fn a_record(name_str: &str) -> Self {
        Self::new(name_str, QType::A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_named_variants() {
        for code in [1u16, 2, 5, 6, 15, 28] {
            let q_type = QType::from(code);
            assert!(!matches!(q_type, QType::Unknown(_)));
            assert_eq!(code, u16::from(q_type));
        }
        assert_eq!(QType::Unknown(16), QType::from(16));
    }

    #[test]
    fn display_test() {
        assert_eq!("AAAA", QType::AAAA.to_string());
        assert_eq!("Unknown Type (99)", QType::from(99).to_string());
    }

    #[test]
    fn from_str_test() {
        assert_eq!(Ok(QType::AAAA), "aaaa".parse());
        assert_eq!(Ok(QType::MX), "Mx".parse());
        assert_eq!(Ok(QType::CNAME), "5".parse());
        assert_eq!(Ok(QType::Unknown(16)), "16".parse());
        assert!("TXTX".parse::<QType>().is_err());
    }

    #[test]
    fn class_name_test() {
        assert_eq!("IN", class_name(1));
        assert_eq!("CLASS254", class_name(254));
    }

    #[test]
    fn a_record_test() {
        let q = NameQuery::a_record("z.cn");
        assert_eq!("z.cn", q.name);
        assert_eq!(QType::A, q.q_type);
    }
}
