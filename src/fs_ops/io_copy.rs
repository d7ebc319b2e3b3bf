//! Buffered streaming copy into a freshly created file.
//!
//! The destination is opened with `create_new`, so this never clobbers; the copy
//! engine points it at a unique temp sibling and renames afterwards. Both handles
//! are dropped before returning, on success and on error.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::helpers::io_error_with_help_io;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` into the new file `dst` and fsync it. Returns bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src).map_err(io_error_with_help_io("open source", src))?;
    let dst_f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(io_error_with_help_io("create temporary file", dst))?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer).map_err(io_error_with_help_io("write temporary file", dst))?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

/// Hidden, process-unique temp path inside `dir`.
pub(super) fn unique_temp_path(dir: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.join(format!(".photo_copier.{}.{}.tmp", std::process::id(), nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copies_bytes_across_buffer_boundaries() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.raw");
        let dst = dir.path().join("big.out");
        let data: Vec<u8> = (0..2 * BUF_SIZE + 123).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_streaming(&src, &dst).unwrap();
        assert_eq!(n as usize, data.len());
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[test]
    fn empty_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        let dst = dir.path().join("out");
        File::create(&src).unwrap();
        assert_eq!(copy_streaming(&src, &dst).unwrap(), 0);
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[test]
    fn refuses_existing_target() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::write(&src, b"data").unwrap();
        fs::write(&dst, b"x").unwrap();
        let err = copy_streaming(&src, &dst).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst).unwrap(), b"x");
    }

    #[test]
    fn temp_path_is_hidden_and_inside_dir() {
        let dir = tempdir().unwrap();
        let p = unique_temp_path(dir.path());
        assert_eq!(p.parent(), Some(dir.path()));
        assert!(p.file_name().unwrap().to_string_lossy().starts_with(".photo_copier."));
    }
}
