// Context menu handlers for Windows Explorer
// One IExplorerCommand per TargetSpec, activated by the target's CLSID.

mod explorer_command;
mod factory;

pub use explorer_command::EditCommandHandler;
pub use factory::EditCommandFactory;
