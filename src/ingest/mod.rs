pub mod cleaner;
pub mod table;

pub use cleaner::{
    parse_decimal_comma, SeriesCleaner, DEFAULT_DATE_COLUMN, DEFAULT_DATE_FORMAT,
    DEFAULT_VALUE_COLUMN,
};
pub use table::{RawRow, RawTable, DEFAULT_HEADER_ROW};
