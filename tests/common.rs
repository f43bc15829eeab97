use std::{env, fs, io, path::PathBuf};

/// Returns an empty scratch directory unique to `name`.
pub fn working_prefix(name: &str) -> io::Result<PathBuf> {
    let prefix = env::temp_dir().join(format!("ferry-{name}"));

    if prefix.exists() {
        fs::remove_dir_all(&prefix)?;
    }

    fs::create_dir_all(&prefix)?;

    Ok(prefix)
}
