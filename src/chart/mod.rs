pub mod config;
pub mod pgf;
pub mod plot;
pub mod renderer;

pub use config::ChartConfig;
pub use pgf::{ChartBackend, PgfPlotsBackend};
pub use plot::WeekChart;
pub use renderer::{Artifact, ChartRenderer, DEFAULT_FIGURES_DIR};
