use std::process::Command;

use anyhow::{Context, Result};

fn run_blobdock(args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_blobdock"))
        .args(args)
        .output()
        .with_context(|| format!("run blobdock {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "blobdock {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_blobdock(&["--help"])?;
    assert!(help.contains("Usage: blobdock"));
    assert!(help.contains("[COMMAND]"));
    assert!(help.contains("init"));
    assert!(help.contains("login"));
    assert!(help.contains("list"));
    assert!(help.contains("upload"));
    assert!(help.contains("import"));
    assert!(help.contains("delete"));

    let settings_help = run_blobdock(&["settings", "--help"])?;
    assert!(settings_help.contains("Usage: blobdock settings <COMMAND>"));
    assert!(settings_help.contains("show"));
    assert!(settings_help.contains("set"));

    Ok(())
}
