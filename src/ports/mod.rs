//! Port traits (interfaces) between the domain and the outside world.

pub mod config_port;
pub mod operation_port;
pub mod report_port;
