pub mod advisory;
pub mod merge;
pub mod project_ops;
pub mod sync;
