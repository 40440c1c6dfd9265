// Behaviour shared by the "Edit with ..." context-menu entries.
// The COM wrapper in shellext::context_menu only translates types.
use crate::boundary::guard;
use crate::error::Result;
use crate::icon::{IconEnvironment, icon_reference};
use crate::launcher::{ProcessLauncher, launch_application};
use crate::selection::{SelectionSource, first_selected_path};
use crate::target::TargetSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFlags {
    Default,
}

#[derive(Debug, Clone, Copy)]
pub struct EditCommand {
    target: &'static TargetSpec,
}

impl EditCommand {
    pub fn new(target: &'static TargetSpec) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'static TargetSpec {
        self.target
    }

    pub fn title(&self) -> &'static str {
        self.target.title
    }

    pub fn icon(&self, env: &dyn IconEnvironment) -> Result<String> {
        guard("icon", || icon_reference(env, self.target.executable))
    }

    /// Always enabled, whatever the selection holds.
    pub fn state(&self, _selection: Option<&dyn SelectionSource>) -> CommandState {
        CommandState::Enabled
    }

    pub fn flags(&self) -> CommandFlags {
        CommandFlags::Default
    }

    /// Open the first selected item with the target executable.
    pub fn invoke(
        &self,
        selection: Option<&dyn SelectionSource>,
        launcher: &dyn ProcessLauncher,
    ) -> Result<()> {
        guard("invoke", || {
            let path = first_selected_path(selection)?;
            tracing::debug!(target: "shellext::context_menu", command = self.target.title, path = %path.display(), "Command invoked");
            launch_application(
                launcher,
                self.target.executable,
                self.target.parameters,
                &path,
            )
        })
    }
}
