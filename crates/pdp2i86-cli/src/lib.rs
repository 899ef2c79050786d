pub mod report;

pub use report::{load_config, Report};
