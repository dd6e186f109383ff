mod csv_tables;
mod html;
mod json;
mod markdown;
mod recommendations;
mod report_error;
mod report_format;
mod report_section;
mod report_writer;
mod sections;

pub use html::render_html;
pub use json::render_json;
pub use markdown::render_markdown;
pub use recommendations::recommendations;
pub use report_error::ReportError;
pub use report_format::ReportFormat;
pub use report_section::{ReportSection, ReportTable};
pub use report_writer::ReportWriter;
pub use sections::report_sections;
