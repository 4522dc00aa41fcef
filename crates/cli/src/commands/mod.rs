//! CLI command implementations.

pub mod generate;
pub mod init_db;
pub mod predict;
pub mod report;

pub use generate::{run_generate, GenerateArgs};
pub use init_db::{run_init_db, InitDbArgs};
pub use predict::{run_predict, PredictArgs};
pub use report::{run_report, ReportArgs};
