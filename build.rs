use std::process::Command;
use vergen::EmitBuilder;

fn main() {
    let in_git_checkout = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    // Source tarballs have no git metadata; the version endpoint reports "unknown" then.
    let emitted = if in_git_checkout {
        EmitBuilder::builder().build_timestamp().git_sha(true).emit()
    } else {
        EmitBuilder::builder().build_timestamp().emit()
    };

    emitted.expect("Unable to emit build metadata");
}
