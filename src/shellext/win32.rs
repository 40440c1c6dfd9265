// Win32 backends for the icon resolver, the launcher and the selection view.
use std::ffi::c_void;

use widestring::{U16CStr, U16CString, U16Str, U16String};
use windows::{
    Win32::{
        Foundation::HMODULE,
        Storage::FileSystem::{GetFileAttributesW, INVALID_FILE_ATTRIBUTES, SearchPathW},
        System::{Com::CoTaskMemFree, LibraryLoader::GetModuleFileNameW},
        UI::{
            Shell::{
                IShellItemArray, SEE_MASK_DEFAULT, SHELLEXECUTEINFOW, SIGDN_FILESYSPATH,
                ShellExecuteExW,
            },
            WindowsAndMessaging::SW_SHOWNORMAL,
        },
    },
    core::PCWSTR,
};

use crate::error::{Result, ShellError};
use crate::icon::{IconEnvironment, MAX_PATH};
use crate::launcher::{LaunchRequest, ProcessLauncher, ShowCommand};
use crate::module::module_handle;
use crate::selection::SelectionSource;

fn wide(s: &str) -> Result<U16CString> {
    U16CString::from_str(s).map_err(|_| ShellError::InvalidArgument("string contains a nul"))
}

/// Reads a filled prefix of a MAX_PATH buffer. `len == buffer.len()` means
/// the OS truncated the result. A path that is not valid Unicode cannot be
/// named in an icon location, so it counts as missing rather than being
/// replaced lossily.
fn read_buffer(buffer: &[u16], len: u32) -> Option<String> {
    let len = len as usize;
    if len == 0 || len >= buffer.len() {
        return None;
    }
    U16Str::from_slice(&buffer[..len]).to_string().ok()
}

pub struct Win32Environment;

impl IconEnvironment for Win32Environment {
    fn path_exists(&self, path: &str) -> bool {
        let Ok(path) = wide(path) else {
            return false;
        };
        unsafe { GetFileAttributesW(PCWSTR(path.as_ptr())) != INVALID_FILE_ATTRIBUTES }
    }

    fn search_path(&self, file_name: &str) -> Option<String> {
        let file_name = wide(file_name).ok()?;
        let mut buffer = [0u16; MAX_PATH];
        let len = unsafe {
            SearchPathW(
                PCWSTR::null(),
                PCWSTR(file_name.as_ptr()),
                PCWSTR::null(),
                Some(&mut buffer),
                None,
            )
        };
        read_buffer(&buffer, len)
    }

    fn module_path(&self) -> Option<String> {
        let handle = module_handle()?;
        let mut buffer = [0u16; MAX_PATH];
        let len = unsafe { GetModuleFileNameW(HMODULE(handle as *mut c_void), &mut buffer) };
        read_buffer(&buffer, len)
    }
}

fn show_command(show: ShowCommand) -> i32 {
    match show {
        ShowCommand::Normal => SW_SHOWNORMAL.0,
    }
}

/// Launches through `ShellExecuteExW` and returns as soon as the shell
/// accepted the request.
pub struct ShellExecuteLauncher;

impl ProcessLauncher for ShellExecuteLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()> {
        let verb = wide(request.verb)?;
        let file = wide(&request.file)?;
        let parameters = U16CString::from_ustr(&request.parameters)
            .map_err(|_| ShellError::InvalidArgument("parameters contain a nul"))?;

        let mut info = SHELLEXECUTEINFOW {
            cbSize: std::mem::size_of::<SHELLEXECUTEINFOW>() as u32,
            fMask: SEE_MASK_DEFAULT,
            lpVerb: PCWSTR(verb.as_ptr()),
            lpFile: PCWSTR(file.as_ptr()),
            lpParameters: PCWSTR(parameters.as_ptr()),
            nShow: show_command(request.show),
            ..Default::default()
        };

        unsafe { ShellExecuteExW(&mut info) }
            .map_err(|err| ShellError::Launch { code: err.code().0 })
    }
}

/// Selection backed by the `IShellItemArray` Explorer passes in.
pub struct ShellItemSelection<'a>(pub &'a IShellItemArray);

impl SelectionSource for ShellItemSelection<'_> {
    fn count(&self) -> Result<u32> {
        Ok(unsafe { self.0.GetCount() }?)
    }

    fn file_system_path(&self, index: u32) -> Result<U16String> {
        unsafe {
            let item = self.0.GetItemAt(index)?;
            let name = item.GetDisplayName(SIGDN_FILESYSPATH)?;
            let path = U16CStr::from_ptr_str(name.0).to_ustring();
            CoTaskMemFree(Some(name.0 as *const c_void));
            Ok(path)
        }
    }
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;
    use crate::icon::DEFAULT_ICON_RESOURCE;
    use windows::Win32::{
        Foundation::HINSTANCE, System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::LoadIconW,
    };

    fn buffer_with(path: &[u16]) -> ([u16; MAX_PATH], u32) {
        let mut buffer = [0u16; MAX_PATH];
        buffer[..path.len()].copy_from_slice(path);
        (buffer, path.len() as u32)
    }

    #[test]
    fn test_read_buffer_accepts_regular_path() {
        let path: Vec<u16> = r"C:\Windows\notepad.exe".encode_utf16().collect();
        let (buffer, len) = buffer_with(&path);
        assert_eq!(read_buffer(&buffer, len).as_deref(), Some(r"C:\Windows\notepad.exe"));
    }

    #[test]
    fn test_read_buffer_rejects_lone_surrogate() {
        let path: Vec<u16> = r"C:\x\".encode_utf16().chain([0xD800]).chain(".exe".encode_utf16()).collect();
        let (buffer, len) = buffer_with(&path);
        assert_eq!(read_buffer(&buffer, len), None);
    }

    #[test]
    fn test_read_buffer_rejects_truncation() {
        let buffer = [b'a' as u16; MAX_PATH];
        assert_eq!(read_buffer(&buffer, MAX_PATH as u32), None);
        assert_eq!(read_buffer(&buffer, 0), None);
    }

    #[test]
    fn test_fallback_icon_resource_is_linked() {
        // build.rs links the resource script into every artifact, this test binary included
        unsafe {
            let module = GetModuleHandleW(PCWSTR::null()).unwrap();
            let icon = LoadIconW(
                HINSTANCE(module.0),
                PCWSTR(DEFAULT_ICON_RESOURCE as usize as *const u16),
            );
            assert!(icon.is_ok());
        }
    }
}
