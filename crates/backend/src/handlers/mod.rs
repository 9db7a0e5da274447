pub mod a030_sales_record;
pub mod d410_sales_insights;
pub mod error;

pub use error::ApiError;
