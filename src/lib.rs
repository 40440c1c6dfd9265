//! Explorer context-menu extension adding "Edit with Notepad" and
//! "Edit with MS Paint" for selected files.
//!
//! The command behaviour is platform-neutral and sits behind
//! [`icon::IconEnvironment`], [`selection::SelectionSource`] and
//! [`launcher::ProcessLauncher`]. The COM objects and DLL exports that
//! wire it to Explorer are only built for Windows.

pub mod boundary;
pub mod command;
pub mod config;
pub mod error;
pub mod icon;
pub mod launcher;
pub mod logging;
pub mod module;
pub mod selection;
pub mod target;

#[cfg(windows)]
mod dll;
#[cfg(windows)]
pub mod shellext;

pub use command::EditCommand;
pub use error::{Result, ShellError};
pub use target::{NOTEPAD, PAINT, TargetSpec};
