// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    ScanArgs, expand_output_path, homepage_key, init_tracing, run_scanner, write_output,
};

// Re-export scan functionality from siteindex-core
pub use siteindex_core::scan::{ScanOptions, ScanProgressCallback, execute_scan, extract_url_path};
