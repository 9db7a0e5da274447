pub mod aggregate;
pub mod request;
pub mod response;

pub use aggregate::{MonthEntry, SalesRecord, SalesSeries};
pub use request::CreateSalesRecordDto;
pub use response::{ErrorResponse, SalesResponse};
