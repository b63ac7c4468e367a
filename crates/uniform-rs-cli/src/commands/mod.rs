//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait.

pub mod check;
pub mod message;
pub mod validate;

pub use check::CheckCommand;
pub use message::MessageCommand;
pub use validate::ValidateCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(ValidateCommand));
    registry.register(Box::new(MessageCommand));
}
