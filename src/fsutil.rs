use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Write `contents` to `dest` atomically via a temp file in the same directory + persist.
/// Missing parent directories are created.
///
/// # Errors
/// Returns an error if the directory or temp file cannot be created or the persist fails.
pub fn write_atomic(dest: &Path, contents: &str) -> io::Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    // Windows can refuse the rename while another handle is open; retry briefly.
    let mut last_err: Option<io::Error> = None;
    for attempt in 0..5 {
        match tmp.persist(dest) {
            Ok(_) => return Ok(()),
            Err(pe) => {
                last_err = Some(pe.error);
                tmp = pe.file;
                thread::sleep(Duration::from_millis(10 + attempt * 5));
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other("failed to persist report file")))
}
