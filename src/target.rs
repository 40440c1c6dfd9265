/// Executable a context-menu command opens the selected file with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    /// Class identifier Explorer activates the command with.
    pub clsid: u128,
    pub title: &'static str,
    /// Bare name searched on PATH, or a full path.
    pub executable: &'static str,
    /// Parameter template with a single `%s` for the selected path.
    pub parameters: &'static str,
}

pub const NOTEPAD: TargetSpec = TargetSpec {
    clsid: 0xe3b9f2a4_5c1d_4e7a_9f0b_8d2c1a7e5f9b,
    title: "Edit with Notepad",
    executable: "notepad.exe",
    parameters: "\"%s\"",
};

pub const PAINT: TargetSpec = TargetSpec {
    clsid: 0xe3b9f2a4_5c1d_4e7a_9f0b_8d2c1a7e5f8b,
    title: "Edit with MS Paint",
    executable: "mspaint.exe",
    parameters: "\"%s\"",
};

pub static TARGETS: [&TargetSpec; 2] = [&NOTEPAD, &PAINT];

pub fn find_target(clsid: u128) -> Option<&'static TargetSpec> {
    TARGETS.iter().copied().find(|target| target.clsid == clsid)
}
