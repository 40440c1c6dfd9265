//! Icon lookup for the context-menu entries.
//!
//! Explorer takes an icon location of the form `<file>,<index>`. A negative
//! index names a resource id rather than a position.

use crate::error::{Result, ShellError};

pub const MAX_PATH: usize = 260;

/// Capacity of the `<path>,<index>` buffer.
pub const MAX_ICON_REFERENCE: usize = MAX_PATH + 16;

/// Resource id of the icon embedded in this DLL (see `resources/custom_shell.rc`).
pub const DEFAULT_ICON_RESOURCE: u32 = 101;

/// OS queries the resolver depends on.
pub trait IconEnvironment {
    /// Whether the filesystem has attributes for `path`.
    fn path_exists(&self, path: &str) -> bool;

    /// Search the current directory, then PATH, for `file_name`.
    fn search_path(&self, file_name: &str) -> Option<String>;

    /// Full path of the module carrying the fallback icon.
    fn module_path(&self) -> Option<String>;
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn has_exe_suffix(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".exe"))
}

/// Locate the executable named by `identifier`.
pub fn resolve_executable(env: &dyn IconEnvironment, identifier: &str) -> Result<String> {
    if identifier.is_empty() {
        return Err(ShellError::InvalidArgument("empty executable name"));
    }
    if utf16_len(identifier) >= MAX_PATH {
        return Err(ShellError::NameTooLong { limit: MAX_PATH - 1 });
    }

    if identifier.contains(['\\', '/']) {
        return if env.path_exists(identifier) {
            Ok(identifier.to_string())
        } else {
            Err(ShellError::NotFound(identifier.to_string()))
        };
    }

    let file_name = if has_exe_suffix(identifier) {
        identifier.to_string()
    } else {
        format!("{identifier}.exe")
    };
    if utf16_len(&file_name) >= MAX_PATH {
        return Err(ShellError::NameTooLong { limit: MAX_PATH - 1 });
    }

    match env.search_path(&file_name) {
        // A hit that does not fit MAX_PATH would have been truncated
        Some(path) if !path.is_empty() && utf16_len(&path) < MAX_PATH => Ok(path),
        _ => Err(ShellError::NotFound(file_name)),
    }
}

fn bounded_reference(path: &str, index: i64) -> Result<String> {
    let reference = format!("{path},{index}");
    let needed = utf16_len(&reference) + 1;
    if needed > MAX_ICON_REFERENCE {
        return Err(ShellError::FormattingOverflow {
            needed,
            capacity: MAX_ICON_REFERENCE,
        });
    }
    Ok(reference)
}

/// Reference into this module's embedded icon.
pub fn fallback_icon_reference(env: &dyn IconEnvironment) -> Result<String> {
    let module = env
        .module_path()
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ShellError::NotFound("module path".to_string()))?;
    bounded_reference(&module, -i64::from(DEFAULT_ICON_RESOURCE))
}

/// Icon location for `identifier`, falling back to the embedded icon when
/// no executable can be found.
pub fn icon_reference(env: &dyn IconEnvironment, identifier: &str) -> Result<String> {
    match resolve_executable(env, identifier) {
        Ok(path) => bounded_reference(&path, 0),
        Err(ShellError::NotFound(name)) => {
            tracing::debug!(target: "icon", name = %name, "Executable not found, using embedded icon");
            fallback_icon_reference(env)
        }
        Err(err) => Err(err),
    }
}
