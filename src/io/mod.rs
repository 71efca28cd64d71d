pub mod advisor;
pub mod config_io;
pub mod context;
pub mod local_store;
pub mod logging;
pub mod remote;
