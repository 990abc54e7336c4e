use camino::Utf8Path;
use std::fs;
use std::io::{self, Write};

/// Write `contents` to a sibling `.tmp` file, fsync it, then rename it over
/// `path`. Readers never observe a half-written file.
pub fn atomic_write(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let tmp_path = {
        let mut name = path.as_str().to_owned();
        name.push_str(".tmp");
        camino::Utf8PathBuf::from(name)
    };

    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)?;
        }
        Err(e) => {
            fs::remove_file(&tmp_path).ok();
            return Err(e);
        }
    }

    if let Some(parent) = path.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
