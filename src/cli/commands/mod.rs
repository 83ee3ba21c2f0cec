//! CLI command implementations.

mod scan;

pub use scan::{cmd_scan, ScanArgs};
