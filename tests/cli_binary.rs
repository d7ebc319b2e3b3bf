use assert_cmd::cargo;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Binary with an empty config file so the host's own config never leaks in.
fn copier(cfg_dir: &std::path::Path) -> Command {
    let cfg = cfg_dir.join("config.xml");
    fs::write(&cfg, "<config></config>").unwrap();
    let mut cmd = Command::new(cargo::cargo_bin!("photo_copier"));
    cmd.env("PHOTO_COPIER_CONFIG", cfg);
    cmd
}

#[test]
fn print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = copier(td.path()).arg("--print-config").output().expect("spawn binary");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("config.xml"));
}

#[test]
fn copies_tree_and_reports_count() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dst = td.path().join("out");
    fs::create_dir_all(src.join("sub")).unwrap();
    for name in ["photo.jpg", "sub/other.jpg"] {
        let p = src.join(name);
        fs::write(&p, name).unwrap();
        set_file_mtime(&p, FileTime::from_unix_time(1_625_400_000, 0)).unwrap();
    }

    let out = copier(td.path())
        .arg(&src)
        .arg(&dst)
        .arg("--overwrite")
        .output()
        .expect("spawn binary");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "stdout: {stdout}\nstderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout.contains("Copied 2 file(s)"), "stdout: {stdout}");
    assert_eq!(fs::read_to_string(dst.join("2021/July/photo.jpg")).unwrap(), "photo.jpg");
    assert_eq!(fs::read_to_string(dst.join("2021/July/other.jpg")).unwrap(), "sub/other.jpg");
}

#[test]
fn existing_file_is_kept_without_a_terminal() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dst = td.path().join("out");
    fs::create_dir_all(&src).unwrap();
    let p = src.join("photo.jpg");
    fs::write(&p, "new").unwrap();
    set_file_mtime(&p, FileTime::from_unix_time(1_625_400_000, 0)).unwrap();
    fs::create_dir_all(dst.join("2021/July")).unwrap();
    fs::write(dst.join("2021/July/photo.jpg"), "old").unwrap();

    let out = copier(td.path())
        .arg(&src)
        .arg(&dst)
        .stdin(std::process::Stdio::null())
        .output()
        .expect("spawn binary");

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Copied 0 file(s) (1 skipped"));
    assert_eq!(fs::read_to_string(dst.join("2021/July/photo.jpg")).unwrap(), "old");
}

#[test]
fn missing_source_root_fails() {
    let td = tempdir().unwrap();
    let out = copier(td.path())
        .arg(td.path().join("nope"))
        .arg(td.path().join("out"))
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Source root"));
}
