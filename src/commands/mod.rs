/// Result structs for command output. Commands return these instead of
/// printing directly — main.rs formats them as human-readable or JSON based
/// on --json.
mod create;
mod install;
mod regenerate;

pub use create::*;
pub use install::*;
pub use regenerate::*;
