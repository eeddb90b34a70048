//! Configuration sources, lowest precedence first.

pub mod dotenv;
pub mod environment;
pub mod global_file;
pub mod local_file;
