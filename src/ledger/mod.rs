mod clock;
mod error;
mod service;

pub use clock::{Clock, SystemClock};
pub use error::LedgerError;
pub use service::LeaveLedger;
