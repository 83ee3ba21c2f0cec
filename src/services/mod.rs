//! Service layer for docuscan business logic.
//!
//! This module contains domain logic separated from transport concerns.
//! Services can be used by the CLI, a host bridge, or other interfaces.

pub mod scan;

pub use scan::{CallReply, MethodCall, ScanService};
