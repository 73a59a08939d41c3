//! Editor Commands
//!
//! Commands run against a [`Context`]. Each one reports whether it can
//! run right now and then executes synchronously to completion.

pub mod clear_cel;
pub mod context;
pub mod eligibility;

pub use clear_cel::{clear_cels, ClearCelCommand, ClearReport, CLEAR_CEL_LABEL, LOCKED_LAYERS_TIP};
pub use context::{Context, ContextFlags, ContextWriter};
pub use eligibility::Eligibility;

use log::info;

use crate::error::{CelEditError, Result};

/// Static properties of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandFlags(u8);

impl CommandFlags {
    pub const NONE: Self = Self(0);
    /// Can be recorded into and replayed from macros.
    pub const RECORDABLE: Self = Self(1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Base trait for all editor commands.
pub trait Command {
    /// Stable identifier, e.g. "ClearCel".
    fn id(&self) -> &'static str;

    /// Human-readable name for menus and the undo history.
    fn label(&self) -> &'static str;

    fn flags(&self) -> CommandFlags {
        CommandFlags::NONE
    }

    /// Whether the command can run in `context`.
    fn is_enabled(&self, context: &Context) -> bool;

    /// Run the command. Callers check [`Command::is_enabled`] first.
    fn execute(&self, context: &mut Context) -> Result<()>;
}

/// Check availability, then execute.
pub fn run_command(command: &dyn Command, context: &mut Context) -> Result<()> {
    if !command.is_enabled(context) {
        return Err(CelEditError::CommandDisabled {
            command: command.id(),
        });
    }
    info!("Executing command '{}'", command.label());
    command.execute(context)
}
