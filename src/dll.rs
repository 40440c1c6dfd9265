// ---- DLL exports ----
use std::ffi::c_void;
use std::ptr::null_mut;

use windows::Win32::Foundation::{
    BOOL, CLASS_E_CLASSNOTAVAILABLE, E_POINTER, HINSTANCE, S_FALSE, S_OK, TRUE,
};
use windows::Win32::System::Com::IClassFactory;
use windows::core::{GUID, HRESULT, Interface};

use crate::logging;
use crate::module;
use crate::shellext::context_menu::EditCommandFactory;
use crate::target::find_target;

const DLL_PROCESS_ATTACH: u32 = 1;

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DllMain(instance: HINSTANCE, reason: u32, _reserved: *mut c_void) -> BOOL {
    if reason == DLL_PROCESS_ATTACH {
        module::set_module_handle(instance.0 as usize);
    }
    TRUE
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DllGetClassObject(
    rclsid: *const GUID,
    riid: *const GUID,
    ppv: *mut *mut c_void,
) -> HRESULT {
    if ppv.is_null() {
        return E_POINTER;
    }
    unsafe {
        *ppv = null_mut();
    }
    if rclsid.is_null() || riid.is_null() {
        return E_POINTER;
    }

    logging::init_once();

    let clsid = unsafe { *rclsid };
    let Some(target) = find_target(clsid.to_u128()) else {
        tracing::debug!(target: "shellext::module", clsid = ?clsid, "Unknown class requested");
        return CLASS_E_CLASSNOTAVAILABLE;
    };

    let factory: IClassFactory = EditCommandFactory::new(target).into();
    unsafe { factory.query(riid, ppv) }
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn DllCanUnloadNow() -> HRESULT {
    if module::can_unload_now() { S_OK } else { S_FALSE }
}
