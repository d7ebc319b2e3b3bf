use std::io;
use std::path::Path;

use photo_copier::fs_ops::{describe_io_error, io_error_with_help, io_error_with_help_io};

#[test]
fn notfound_hint_includes_op_and_path() {
    let p = Path::new("/nonexistent/2021/July/photo.jpg");
    let err = io_error_with_help("open source", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("open source"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"), "{msg}");
}

#[test]
fn io_variant_keeps_kind() {
    let p = Path::new("/dst/2021/July");
    let err = io_error_with_help_io("create temporary file", p)(io::Error::from(
        io::ErrorKind::PermissionDenied,
    ));
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    assert!(err.to_string().contains("create temporary file"));
}

#[cfg(unix)]
#[test]
fn space_and_readonly_hints() {
    let p = Path::new("/dst");
    let m1 = describe_io_error("write", p, &io::Error::from_raw_os_error(libc::ENOSPC));
    let m2 = describe_io_error("write", p, &io::Error::from_raw_os_error(libc::EROFS));
    assert!(m1.contains("insufficient space"), "{m1}");
    assert!(m1.contains("os code"), "{m1}");
    assert!(m2.contains("read-only filesystem"), "{m2}");
}

#[cfg(unix)]
#[test]
fn not_a_directory_hint() {
    let msg = describe_io_error(
        "create bucket directory",
        Path::new("/dst/2021"),
        &io::Error::from_raw_os_error(libc::ENOTDIR),
    );
    assert!(msg.contains("not a directory"), "{msg}");
}
