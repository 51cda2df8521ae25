//! deploykeys-exec: Local command execution abstraction
//!
//! Provides the executor trait used to drive `ssh-keygen` and `git`, and a
//! `tokio::process` implementation of it.

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalExecutor;
pub use result::CommandResult;
pub use traits::CommandExecutor;
