//! An interactive shell front-end with a fixed set of builtin commands.
//!
//! Each cycle of a [`Session`] renders a prompt showing user, host and
//! working directory, reads one line through a [`LineSource`] (a rustyline
//! editor completing builtin names in production), and hands the line to the
//! [`Interpreter`], which runs the builtin its first word names. Interrupt and
//! suspend signals are caught by a [`signals::SignalGuard`] and only print a
//! notice; the session ends through `myquit`.

mod builtin;
pub mod command;
pub mod completion;
pub mod config;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod line_source;
pub mod prompt;
mod session;
pub mod signals;

pub use interpreter::{Interpreter, Outcome};
pub use line_source::LineSource;
pub use session::{Session, State};
