mod financial;
mod quote;
mod resource_line;
mod summary_block;

pub use financial::{FinancialSummary, InvoiceFinancialInput};
pub use quote::{DeliveryWindow, InvoiceQuote, QuoteRequest};
pub use resource_line::ResourceLine;
pub use summary_block::{SummaryBlock, SummaryRow, SummaryRowKind};
