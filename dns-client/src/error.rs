use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Which socket operation failed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stage {
    Bind,
    Connect,
    Send,
    Receive,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Stage::Bind => "binding the local socket",
            Stage::Connect => "connecting to the server",
            Stage::Send => "sending the query",
            Stage::Receive => "reading the response",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport failure while {stage}: {source}")]
    TransportFailure { stage: Stage, source: io::Error },

    #[error("no response within {after:?}")]
    Timeout { after: Duration },

    #[error(transparent)]
    Codec(#[from] dns::Error),
}

impl ExchangeError {
    pub(crate) fn transport(stage: Stage) -> impl FnOnce(io::Error) -> Self {
        move |source| ExchangeError::TransportFailure { stage, source }
    }
}
