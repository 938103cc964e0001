// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Simulator that prints 0.5 for seed 1 and 1.25 for seed 2, whatever the grid size.
pub const SEED_TIMER: &str = r#"#!/bin/sh
case "$5" in
  1) echo 0.5 ;;
  2) echo 1.25 ;;
  *) echo "$5.0" ;;
esac
"#;

/// Simulator that prints garbage on its third invocation of a 2x2 grid-size sweep
/// (axis value "2000", seed 1).
pub const GARBAGE_ON_THIRD: &str = r#"#!/bin/sh
if [ "$1" = "2000" ] && [ "$5" = "1" ]; then
  echo "Segmentation fault?"
else
  echo 0.5
fi
"#;

/// Simulator that prints a valid number but exits with status 3.
pub const FAILING_EXIT: &str = r#"#!/bin/sh
echo 0.5
echo "out of memory" >&2
exit 3
"#;

/// Simulator that never finishes in time.
pub const SLEEPER: &str = r#"#!/bin/sh
sleep 5
echo 0.5
"#;

/// Writes an executable shell script into `dir` and returns its absolute path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write script");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to make script executable");
    path
}

/// Simulator that appends its arguments to `log` and prints 1.0.
#[cfg(unix)]
pub fn write_recording_script(dir: &Path, log: &Path) -> PathBuf {
    let body = format!(
        "#!/bin/sh\necho \"$@\" >> \"{}\"\necho 1.0\n",
        log.display()
    );
    write_script(dir, "recorder.sh", &body)
}

/// Writes a grid-size sweep configuration running `executable`.
pub fn write_grid_config(
    temp_dir: &TempDir,
    executable: &Path,
    values: &[&str],
    repetitions: usize,
) -> PathBuf {
    let values = values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let content = format!(
        r#"language = "en"
executable = "{}"
output = "{}"
repetitions = {repetitions}

[sweep]
axis = "grid-size"
values = [{values}]
"#,
        executable.display(),
        output_path(temp_dir).display()
    );
    write_config(temp_dir, &content)
}

/// Writes an arbitrary configuration file and returns its path.
pub fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("Sweep.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// Where the helper configurations put the result matrix.
pub fn output_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("test_result.txt")
}
