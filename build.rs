//! Embeds the fallback menu icon (resource id 101) into the DLL.

fn main() {
    println!("cargo:rerun-if-changed=resources/custom_shell.rc");
    println!("cargo:rerun-if-changed=resources/custom_shell.ico");

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // Nothing references the icon, so it is passed as a link argument
        // rather than a library the linker may skip. Tests get it too.
        embed_resource::compile_for_everything("resources/custom_shell.rc", embed_resource::NONE)
            .manifest_optional()
            .unwrap();
    }
}
