//! Cash flow statement assembly (indirect method).

pub mod period;
pub mod service;
pub mod types;


pub use period::{period_from_dates, strip_account_number};
pub use service::StatementAssembler;
pub use types::{CashFlowItem, CashFlowStatement, ItemKind};
