pub mod measurement;
pub mod week;

pub use measurement::{Measurement, Series};
pub use week::{Week, DAYS_PER_WEEK};
