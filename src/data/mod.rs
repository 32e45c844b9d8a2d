//! Data module - spreadsheet loading, column roles and processing

mod loader;
mod processor;
mod roles;

pub use loader::{DataLoader, LoaderError, SourceFormat};
pub use processor::{
    date_to_days, days_to_date, has_column, is_date_column, DataProcessor, ProcessorError,
    ShiftFilter, DATE_COLUMN, GRANT_FLAG_COLUMN,
};
pub use roles::{ColumnRoles, Role};
