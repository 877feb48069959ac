//! Front ends of netlens: the command line, the terminal renderer and the
//! HTTP server.

pub mod commands;
pub mod server;
pub mod terminal;
