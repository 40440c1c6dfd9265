use widestring::U16String;

use crate::error::{Result, ShellError};

/// Read-only view of the items Explorer hands to a command.
///
/// Paths stay UTF-16: NTFS names need not be valid Unicode.
pub trait SelectionSource {
    fn count(&self) -> Result<u32>;

    /// Filesystem path of the item at `index`, not its display name.
    fn file_system_path(&self, index: u32) -> Result<U16String>;
}

/// Path of the first selected item. Further items are ignored.
pub fn first_selected_path(selection: Option<&dyn SelectionSource>) -> Result<U16String> {
    let selection = selection.ok_or(ShellError::InvalidArgument("no selection"))?;
    if selection.count()? == 0 {
        return Err(ShellError::InvalidArgument("empty selection"));
    }
    selection.file_system_path(0)
}

/// Paths of every selected item, in selection order.
pub fn selected_paths(selection: Option<&dyn SelectionSource>) -> Result<Vec<U16String>> {
    let Some(selection) = selection else {
        return Ok(Vec::new());
    };
    (0..selection.count()?)
        .map(|index| selection.file_system_path(index))
        .collect()
}
