use std::io::Write;
use std::path::Path;

use super::{ConfigError, KioskConfig};

const TEMP_ATTEMPTS: usize = 5;

/// Load, normalize and validate the configuration at `path`.
pub fn load_from_path(path: &Path) -> Result<KioskConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: KioskConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    let config = config.normalized();
    config.validate()?;
    Ok(config)
}

/// Save configuration to `path`, creating parent directories as needed.
pub fn save_to_path(config: &KioskConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

/// Write through a uniquely named sibling and rename it over `path`.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let write_error = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(write_error(std::io::Error::other(
            "config path has no parent directory or file name",
        )));
    };

    for _ in 0..TEMP_ATTEMPTS {
        let tmp_path = dir.join(format!(
            "{}.tmp-{}",
            file_name.to_string_lossy(),
            temp_suffix().map_err(write_error)?
        ));
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(write_error(err)),
        };
        let written = file
            .write_all(data)
            .and_then(|()| file.sync_all())
            .and_then(|()| {
                drop(file);
                std::fs::rename(&tmp_path, path)
            });
        if let Err(err) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_error(err));
        }
        return Ok(());
    }

    Err(write_error(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        "failed to create a unique temporary file",
    )))
}

fn temp_suffix() -> Result<String, std::io::Error> {
    use rand::TryRngCore;
    let mut bytes = [0u8; 6];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| std::io::Error::other(format!("failed to generate temp suffix: {err}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
