//! Starting the target executable for a selected file.

use widestring::{U16Str, U16String};

use crate::error::{Result, ShellError};

/// Capacity, in UTF-16 units including the terminator, of the parameter buffer.
pub const MAX_PARAMETER_LEN: usize = 4096;

pub const DEFAULT_VERB: &str = "open";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    /// Visible, activated, restored to its normal size.
    Normal,
}

/// A request to start a process through the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub verb: &'static str,
    pub file: String,
    /// Kept as UTF-16 so a selected path reaches the OS unaltered.
    pub parameters: U16String,
    pub show: ShowCommand,
}

/// Starts processes without waiting on them.
pub trait ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()>;
}

/// Expand the single `%s` in `template` with `path`. `%%` yields a literal `%`.
pub fn format_parameters(template: &str, path: &U16Str) -> Result<U16String> {
    let mut out = U16String::with_capacity(template.len() + path.len());
    let mut placeholders = 0;
    let mut chars = template.chars();
    let mut unit = [0u16; 2];

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push_slice(c.encode_utf16(&mut unit));
            continue;
        }
        match chars.next() {
            Some('s') => {
                placeholders += 1;
                out.push_slice(path.as_slice());
            }
            Some('%') => out.push_slice(['%' as u16]),
            _ => return Err(ShellError::InvalidArgument("unsupported format directive")),
        }
    }

    if placeholders != 1 {
        return Err(ShellError::InvalidArgument(
            "template needs exactly one placeholder",
        ));
    }

    let needed = out.len() + 1;
    if needed > MAX_PARAMETER_LEN {
        return Err(ShellError::FormattingOverflow {
            needed,
            capacity: MAX_PARAMETER_LEN,
        });
    }
    Ok(out)
}

/// Open `executable` with the selected `path` substituted into `template`.
pub fn launch_application(
    launcher: &dyn ProcessLauncher,
    executable: &str,
    template: &str,
    path: &U16Str,
) -> Result<()> {
    let parameters = format_parameters(template, path)?;
    let request = LaunchRequest {
        verb: DEFAULT_VERB,
        file: executable.to_string(),
        parameters,
        show: ShowCommand::Normal,
    };

    tracing::debug!(target: "launcher", file = %request.file, parameters = %request.parameters.display(), "Launching");
    launcher.launch(&request).inspect_err(|err| {
        tracing::warn!(target: "launcher", file = %request.file, error = %err, "Launch failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn wide(s: &str) -> U16String {
        U16String::from_str(s)
    }

    #[derive(Default)]
    struct RecordingLauncher {
        requests: RefCell<Vec<LaunchRequest>>,
        fail_with: Option<i32>,
    }

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&self, request: &LaunchRequest) -> Result<()> {
            self.requests.borrow_mut().push(request.clone());
            match self.fail_with {
                Some(code) => Err(ShellError::Launch { code }),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_quoted_template() {
        assert_eq!(
            format_parameters("\"%s\"", &wide(r"C:\a\b.txt")).unwrap(),
            wide(r#""C:\a\b.txt""#)
        );
    }

    #[test]
    fn test_percent_escape() {
        assert_eq!(format_parameters("%s 100%%", &wide("x")).unwrap(), wide("x 100%"));
    }

    #[test]
    fn test_template_must_have_one_placeholder() {
        assert!(matches!(
            format_parameters("--open", &wide("x")),
            Err(ShellError::InvalidArgument(_))
        ));
        assert!(matches!(
            format_parameters("%s %s", &wide("x")),
            Err(ShellError::InvalidArgument(_))
        ));
        assert!(matches!(
            format_parameters("%d", &wide("x")),
            Err(ShellError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unpaired_surrogate_survives_formatting() {
        let path = U16String::from_vec(vec!['C' as u16, ':' as u16, '\\' as u16, 0xDC00]);
        let formatted = format_parameters("\"%s\"", &path).unwrap();
        assert_eq!(
            formatted.as_slice(),
            ['"' as u16, 'C' as u16, ':' as u16, '\\' as u16, 0xDC00, '"' as u16]
        );
    }

    #[test]
    fn test_overflow_boundary() {
        // Two quotes plus the terminator leave room for 4093 characters
        let fits = wide(&"a".repeat(MAX_PARAMETER_LEN - 3));
        assert!(format_parameters("\"%s\"", &fits).is_ok());

        let too_long = wide(&"a".repeat(MAX_PARAMETER_LEN - 2));
        assert_eq!(
            format_parameters("\"%s\"", &too_long),
            Err(ShellError::FormattingOverflow {
                needed: MAX_PARAMETER_LEN + 1,
                capacity: MAX_PARAMETER_LEN,
            })
        );
    }

    #[test]
    fn test_overflow_never_reaches_launcher() {
        let launcher = RecordingLauncher::default();
        let path = wide(&"b".repeat(MAX_PARAMETER_LEN));
        let result = launch_application(&launcher, "notepad.exe", "\"%s\"", &path);
        assert!(matches!(result, Err(ShellError::FormattingOverflow { .. })));
        assert!(launcher.requests.borrow().is_empty());
    }

    #[test]
    fn test_request_shape() {
        let launcher = RecordingLauncher::default();
        launch_application(&launcher, "notepad.exe", "\"%s\"", &wide(r"C:\a\b.txt")).unwrap();
        assert_eq!(
            launcher.requests.borrow().as_slice(),
            [LaunchRequest {
                verb: "open",
                file: "notepad.exe".to_string(),
                parameters: wide(r#""C:\a\b.txt""#),
                show: ShowCommand::Normal,
            }]
        );
    }

    #[test]
    fn test_launch_error_is_reported() {
        let launcher = RecordingLauncher {
            fail_with: Some(0x8007_0002_u32 as i32),
            ..Default::default()
        };
        assert_eq!(
            launch_application(&launcher, "missing.exe", "%s", &wide("x")),
            Err(ShellError::Launch { code: 0x8007_0002_u32 as i32 })
        );
    }
}
