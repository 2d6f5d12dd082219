pub mod assembler;
pub mod latex;
pub mod typesetter;

pub use assembler::{source_path, write_source, Report, ReportAssembler};
pub use typesetter::{PdfLatex, ToolOutput, Typesetter, DEFAULT_TYPESETTER};
