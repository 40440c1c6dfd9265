// Explorer-facing COM objects. Everything here only adapts types; the
// behaviour lives in the platform-neutral modules.

pub mod context_menu;
pub mod win32;

use windows::{
    Win32::UI::Shell::SHStrDupW,
    core::{HSTRING, PWSTR},
};

use crate::error::{Result as ShellResult, ShellError};

/// Convert a command result into what the COM vtable returns.
pub fn com_result<T>(result: ShellResult<T>) -> windows::core::Result<T> {
    result.map_err(windows::core::Error::from)
}

/// Copy `value` into CoTaskMem memory owned by the caller.
pub fn co_task_string(value: &str) -> ShellResult<PWSTR> {
    let hstring = HSTRING::from(value);
    unsafe { SHStrDupW(&hstring) }.map_err(|_| ShellError::OutOfMemory)
}
