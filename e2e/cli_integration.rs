// e2e/cli_integration.rs: CLI integration tests
//
// Drives the `lzopack` binary as a black box with std::process::Command:
// argument parsing, mode selection, output naming, exit codes, list mode and
// the alias binaries.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `lzopack` binary produced by Cargo.
fn lzopack_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_lzopack") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lzopack");
    p
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(lzopack_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("LZOPACK_DISPLAY_LEVEL")
        .output()
        .expect("failed to run lzopack")
}

/// A TempDir holding `input.txt` with ~4 KB of text.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "Hello, LZO!\n".repeat(341)).unwrap();
    (dir, input)
}

// ── 1. Round trips ───────────────────────────────────────────────────────────

#[test]
fn explicit_input_and_output_round_trip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run_in(dir.path(), &["-z", "input.txt", "packed.lzo"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let out = run_in(dir.path(), &["-d", "packed.lzo", "restored.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(fs::read(dir.path().join("restored.txt")).unwrap(), original);
}

#[test]
fn auto_mode_names_outputs() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    assert!(run_in(dir.path(), &["input.txt"]).status.success());
    let container = dir.path().join("input.txt.lzo");
    assert!(container.exists());

    fs::remove_file(&input).unwrap();
    assert!(run_in(dir.path(), &["input.txt.lzo"]).status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

#[test]
fn compress_reports_sizes_at_default_level() {
    let (dir, _) = make_temp_input();
    let out = run_in(dir.path(), &["input.txt"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Compressed 4092 bytes into"), "{stderr}");
}

#[test]
fn quiet_suppresses_messages() {
    let (dir, _) = make_temp_input();
    let out = run_in(dir.path(), &["-qq", "input.txt"]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn env_display_level_is_honoured() {
    let (dir, _) = make_temp_input();
    let out = Command::new(lzopack_bin())
        .args(["input.txt"])
        .current_dir(dir.path())
        .env("LZOPACK_DISPLAY_LEVEL", "0")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stderr.is_empty());
}

// ── 2. Overwrite policy ──────────────────────────────────────────────────────

#[test]
fn existing_output_needs_force() {
    let (dir, _) = make_temp_input();
    fs::write(dir.path().join("input.txt.lzo"), b"keep me").unwrap();

    let out = run_in(dir.path(), &["input.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("input.txt.lzo")).unwrap(), b"keep me");

    let out = run_in(dir.path(), &["-f", "input.txt"]);
    assert!(out.status.success());
    assert_ne!(fs::read(dir.path().join("input.txt.lzo")).unwrap(), b"keep me");
}

#[test]
fn atomic_flag_round_trips() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    assert!(run_in(dir.path(), &["--atomic", "input.txt"]).status.success());
    assert!(run_in(dir.path(), &["--atomic", "-d", "input.txt.lzo", "back.txt"]).status.success());
    assert_eq!(fs::read(dir.path().join("back.txt")).unwrap(), original);
}

// ── 3. Multiple inputs ───────────────────────────────────────────────────────

#[test]
fn multiple_inputs_compress_and_decompress() {
    let dir = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(dir.path().join(name), name.repeat(300)).unwrap();
    }

    let out = run_in(dir.path(), &["-m", "a.txt", "b.txt", "c.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for name in ["a.txt", "b.txt", "c.txt"] {
        assert!(dir.path().join(format!("{name}.lzo")).exists());
        fs::remove_file(dir.path().join(name)).unwrap();
    }

    let out = run_in(dir.path(), &["-d", "-m", "a.txt.lzo", "b.txt.lzo", "c.txt.lzo"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for name in ["a.txt", "b.txt", "c.txt"] {
        assert_eq!(fs::read(dir.path().join(name)).unwrap(), name.repeat(300).as_bytes());
    }
}

#[test]
fn multiple_inputs_fail_if_any_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), b"aaaa").unwrap();
    let out = run_in(dir.path(), &["-m", "a.txt", "missing.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(dir.path().join("a.txt.lzo").exists());
}

#[test]
fn too_many_names_without_m() {
    let (dir, _) = make_temp_input();
    let out = run_in(dir.path(), &["input.txt", "x", "y"]);
    assert_eq!(out.status.code(), Some(1));
}

// ── 4. Decompression naming ──────────────────────────────────────────────────

#[test]
fn decompress_without_extension_or_output_is_an_error() {
    let (dir, _) = make_temp_input();
    assert!(run_in(dir.path(), &["input.txt", "blob"]).status.success());

    let out = run_in(dir.path(), &["-d", "blob"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot determine an output filename"), "{stderr}");

    let out = run_in(dir.path(), &["-d", "blob", "restored"]);
    assert!(out.status.success());
}

// ── 5. List mode ─────────────────────────────────────────────────────────────

#[test]
fn list_prints_a_row_per_container() {
    let (dir, _) = make_temp_input();
    assert!(run_in(dir.path(), &["input.txt"]).status.success());

    let out = run_in(dir.path(), &["-l", "input.txt.lzo"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Uncompressed"), "{stdout}");
    assert!(stdout.contains("input.txt.lzo"), "{stdout}");
}

#[test]
fn list_fails_for_non_containers() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tiny"), [1u8, 2]).unwrap();
    let out = run_in(dir.path(), &["-l", "tiny"]);
    assert_eq!(out.status.code(), Some(1));
}

// ── 6. Help, version and bad usage ───────────────────────────────────────────

#[test]
fn help_and_version_exit_zero() {
    let dir = TempDir::new().unwrap();
    let out = run_in(dir.path(), &["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage"));
    assert!(run_in(dir.path(), &["--version"]).status.success());
}

#[test]
fn unknown_flag_exits_one() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_in(dir.path(), &["--bogus", "x"]).status.code(), Some(1));
}

#[test]
fn conflicting_modes_exit_one() {
    let (dir, _) = make_temp_input();
    assert_eq!(run_in(dir.path(), &["-z", "-d", "input.txt"]).status.code(), Some(1));
}

// ── 7. Alias binaries ────────────────────────────────────────────────────────

#[cfg(unix)]
/// A symlink named `name` pointing at the real binary; argv[0] keeps the
/// link name.
fn alias(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::os::unix::fs::symlink(lzopack_bin(), &path).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn unlzo_and_lzode_decompress_by_default() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    assert!(run_in(dir.path(), &["-z", "input.txt", "x.lzo"]).status.success());

    let bin_dir = TempDir::new().unwrap();
    for name in ["unlzo", "lzode"] {
        let out = Command::new(alias(bin_dir.path(), name))
            .args(["-f", "x.lzo", "y.txt"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert!(out.status.success(), "{name}: {}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(fs::read(dir.path().join("y.txt")).unwrap(), original, "{name}");
    }
}

#[cfg(unix)]
#[test]
fn lzo_alias_compresses_even_lzo_named_input() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("odd.lzo"), b"not really a container").unwrap();

    let bin_dir = TempDir::new().unwrap();
    let out = Command::new(alias(bin_dir.path(), "lzo"))
        .args(["odd.lzo"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("odd.lzo.lzo").exists());
}
