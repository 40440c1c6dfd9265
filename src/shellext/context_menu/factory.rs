use super::EditCommandHandler;
use crate::module;
use crate::target::TargetSpec;
use windows::{
    Win32::{Foundation::*, System::Com::*},
    core::*,
};

// Class factory for creating instances of one "Edit with ..." command
#[implement(IClassFactory)]
pub struct EditCommandFactory {
    target: &'static TargetSpec,
}

impl EditCommandFactory {
    pub fn new(target: &'static TargetSpec) -> Self {
        Self { target }
    }
}

impl IClassFactory_Impl for EditCommandFactory_Impl {
    fn CreateInstance(
        &self,
        outer: Option<&IUnknown>,
        iid: *const GUID,
        result: *mut *mut core::ffi::c_void,
    ) -> Result<()> {
        if outer.is_some() {
            return Err(Error::from(CLASS_E_NOAGGREGATION));
        }

        tracing::trace!(target: "shellext::factory", command = self.target.title, "CreateInstance");
        let handler = EditCommandHandler::new(self.target);
        let handler: IUnknown = handler.into();

        unsafe { handler.query(iid, result).ok() }
    }

    fn LockServer(&self, lock: BOOL) -> Result<()> {
        module::lock_server(lock.as_bool());
        Ok(())
    }
}
