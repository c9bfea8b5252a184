use argh::FromArgs;
use dns::QType;
use std::net::SocketAddr;
use std::path::PathBuf;

// same id on every run unless --id is given
pub const DEFAULT_QUERY_ID: u16 = 5578;

fn default_config_path() -> PathBuf {
    PathBuf::from("./lookup.toml")
}

fn default_query_type() -> QType {
    QType::A
}

#[derive(Debug, FromArgs)]
#[argh(description = "send one DNS query over UDP and print the answer records")]
pub struct CliArgs {
    #[argh(positional, description = "domain name to look up")]
    pub domain: String,

    #[argh(switch, description = "print the whole decoded response instead of the answer lines")]
    pub raw: bool,

    #[argh(
        option,
        short = 't',
        long = "type",
        description = "record type as a mnemonic or a number, default: A",
        default = "default_query_type()"
    )]
    pub query_type: QType,

    #[argh(option, description = "server address, overrides the config file")]
    pub server: Option<SocketAddr>,

    #[argh(option, description = "read timeout in milliseconds, overrides the config file")]
    pub timeout_ms: Option<u64>,

    #[argh(
        option,
        description = "config file path, default: './lookup.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,

    #[argh(option, description = "query id, default: 5578", default = "DEFAULT_QUERY_ID")]
    pub id: u16,
}
