use crate::command::{CommandFlags, CommandState, EditCommand};
use crate::module::ObjectToken;
use crate::selection::SelectionSource;
use crate::shellext::win32::{ShellExecuteLauncher, ShellItemSelection, Win32Environment};
use crate::shellext::{co_task_string, com_result};
use crate::target::TargetSpec;
use std::ffi::c_void;
use std::sync::Mutex;
use windows::{
    Win32::{
        Foundation::*,
        System::Com::*,
        System::Ole::{IObjectWithSite, IObjectWithSite_Impl},
        UI::Shell::*,
    },
    core::*,
};

#[implement(IExplorerCommand, IObjectWithSite)]
pub struct EditCommandHandler {
    command: EditCommand,
    site: Mutex<Option<IUnknown>>,
    _token: ObjectToken,
}

impl EditCommandHandler {
    pub fn new(target: &'static TargetSpec) -> Self {
        Self {
            command: EditCommand::new(target),
            site: Mutex::new(None),
            _token: ObjectToken::acquire(),
        }
    }
}

impl IExplorerCommand_Impl for EditCommandHandler_Impl {
    fn GetTitle(&self, _items: Option<&IShellItemArray>) -> Result<PWSTR> {
        com_result(co_task_string(self.command.title()))
    }

    fn GetIcon(&self, _items: Option<&IShellItemArray>) -> Result<PWSTR> {
        let icon = com_result(self.command.icon(&Win32Environment))?;
        tracing::trace!(target: "shellext::context_menu", icon = %icon, "GetIcon");
        com_result(co_task_string(&icon))
    }

    fn GetToolTip(&self, _items: Option<&IShellItemArray>) -> Result<PWSTR> {
        Err(Error::from(E_NOTIMPL))
    }

    fn GetCanonicalName(&self) -> Result<GUID> {
        Ok(GUID::zeroed())
    }

    fn GetState(&self, items: Option<&IShellItemArray>, _oktobeslow: BOOL) -> Result<u32> {
        let selection = items.map(ShellItemSelection);
        let state = self
            .command
            .state(selection.as_ref().map(|s| s as &dyn SelectionSource));
        match state {
            CommandState::Enabled => Ok(ECS_ENABLED.0 as u32),
        }
    }

    fn Invoke(
        &self,
        selection: Option<&IShellItemArray>,
        _bindctx: Option<&IBindCtx>,
    ) -> Result<()> {
        tracing::debug!(target: "shellext::context_menu", command = self.command.title(), "Context menu command invoked");

        let selection = selection.map(ShellItemSelection);
        com_result(self.command.invoke(
            selection.as_ref().map(|s| s as &dyn SelectionSource),
            &ShellExecuteLauncher,
        ))
    }

    fn GetFlags(&self) -> Result<u32> {
        match self.command.flags() {
            CommandFlags::Default => Ok(ECF_DEFAULT.0 as u32),
        }
    }

    fn EnumSubCommands(&self) -> Result<IEnumExplorerCommand> {
        Err(Error::from(E_NOTIMPL))
    }
}

impl IObjectWithSite_Impl for EditCommandHandler_Impl {
    fn SetSite(&self, site: Option<&IUnknown>) -> Result<()> {
        let mut current = self.site.lock().map_err(|_| Error::from(E_FAIL))?;
        *current = site.cloned();
        Ok(())
    }

    fn GetSite(&self, riid: *const GUID, site: *mut *mut c_void) -> Result<()> {
        if site.is_null() {
            return Err(Error::from(E_POINTER));
        }
        unsafe { *site = std::ptr::null_mut() };

        let current = self.site.lock().map_err(|_| Error::from(E_FAIL))?;
        match current.as_ref() {
            Some(unknown) => unsafe { unknown.query(riid, site).ok() },
            None => Err(Error::from(E_FAIL)),
        }
    }
}
