//! In-process entry point: one [`Session`] owns every store, and
//! [`Session::execute`] dispatches parsed [`Command`]s to it.

pub mod command;
pub mod error;
pub mod session;

pub use command::{Command, CommandName, Outcome};
pub use error::SessionError;
pub use session::Session;
