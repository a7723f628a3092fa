pub mod report_service;
pub mod types;

pub use report_service::ReportService;
pub use types::FetchParams;
