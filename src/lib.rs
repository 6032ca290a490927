pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod tree;
pub mod util;

pub use error::{Result, SnapError};
pub use snapshot::{SnapshotInfo, SnapshotService};
