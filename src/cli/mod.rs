pub mod help;
pub mod output;
pub mod session;
mod shell;

pub use session::{Reply, Session};
pub use shell::run_cli;
