pub mod error;
pub mod table;

pub use error::ConvertError;
pub use table::{convert, DataRow, COLUMN_COUNT, HEADER};
