//! CLI subcommand implementations.

pub mod add;
pub mod clients;
pub mod discard;
pub mod save;
pub mod start;
pub mod status;
pub mod stop;
pub mod util;
