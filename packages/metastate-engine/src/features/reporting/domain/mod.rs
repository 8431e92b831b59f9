/*
 * Reporting Domain Models
 */

mod export;
mod record_info;
mod report;
mod summary;

pub use export::{export_rows, ExportFilter, ExportRow};
pub use record_info::{RecordFilter, RecordInfo};
pub use report::RecordReport;
pub use summary::{StateCounts, StateSummary};
