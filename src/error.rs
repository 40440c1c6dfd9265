use thiserror::Error;

pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
pub const E_OUTOFMEMORY: i32 = 0x8007_000E_u32 as i32;
pub const STRSAFE_E_INSUFFICIENT_BUFFER: i32 = 0x8007_007A_u32 as i32;

const ERROR_FILE_NOT_FOUND: u32 = 2;
const ERROR_FILENAME_EXCED_RANGE: u32 = 206;

/// Equivalent of the `HRESULT_FROM_WIN32` macro.
pub const fn hresult_from_win32(code: u32) -> i32 {
    if code as i32 <= 0 {
        code as i32
    } else {
        ((code & 0x0000_FFFF) | (7 << 16) | 0x8000_0000) as i32
    }
}

/// Failure raised by any of the command operations.
///
/// Each variant maps onto exactly one HRESULT so the COM layer can report it
/// to Explorer unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Missing or empty selection, or a malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No executable could be located for the identifier.
    #[error("executable not found: {0}")]
    NotFound(String),

    /// Identifier does not fit a MAX_PATH buffer.
    #[error("name exceeds {limit} characters")]
    NameTooLong { limit: usize },

    #[error("out of memory")]
    OutOfMemory,

    /// Formatted string does not fit its fixed buffer.
    #[error("formatted string needs {needed} characters, buffer holds {capacity}")]
    FormattingOverflow { needed: usize, capacity: usize },

    /// The OS refused to start the process.
    #[error("launch failed (0x{code:08X})")]
    Launch { code: i32 },

    /// An error reported by a host interface, passed through as is.
    #[error("host call failed (0x{code:08X})")]
    Host { code: i32 },

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ShellError {
    pub fn hresult(&self) -> i32 {
        match self {
            ShellError::InvalidArgument(_) => E_INVALIDARG,
            ShellError::NotFound(_) => hresult_from_win32(ERROR_FILE_NOT_FOUND),
            ShellError::NameTooLong { .. } => hresult_from_win32(ERROR_FILENAME_EXCED_RANGE),
            ShellError::OutOfMemory => E_OUTOFMEMORY,
            ShellError::FormattingOverflow { .. } => STRSAFE_E_INSUFFICIENT_BUFFER,
            ShellError::Launch { code } | ShellError::Host { code } => *code,
            ShellError::Unexpected(_) => E_FAIL,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(windows)]
impl From<windows::core::Error> for ShellError {
    fn from(err: windows::core::Error) -> Self {
        ShellError::Host { code: err.code().0 }
    }
}

#[cfg(windows)]
impl From<ShellError> for windows::core::Error {
    fn from(err: ShellError) -> Self {
        windows::core::Error::from(windows::core::HRESULT(err.hresult()))
    }
}
