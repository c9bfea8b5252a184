mod error;
mod exchange;

pub use error::{ExchangeError, Stage};
pub use exchange::{Client, MAX_RESPONSE_SIZE};
