use std::process::Command;

fn git_output(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap();

    // REMOTE_BUILD_VERSION: includes the short hash for dev builds, used by `--version`.
    let display_version = if std::env::var("REMOTE_BUILD_RELEASE").is_ok() {
        pkg_version
    } else {
        match git_output(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) => format!("{pkg_version} (dev {hash})"),
            None => pkg_version,
        }
    };

    println!("cargo:rustc-env=REMOTE_BUILD_VERSION={display_version}");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=REMOTE_BUILD_RELEASE");
}
