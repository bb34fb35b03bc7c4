use crate::error::{PotListError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one entry per line, replacing any previous content of `path`.
///
/// The parent directory must already exist. A failure partway through can
/// leave a truncated file behind.
pub fn write_manifest<P, I>(path: P, entries: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let path = path.as_ref();
    let write_error = |source: std::io::Error| PotListError::ManifestWrite {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    for entry in entries {
        writeln!(writer, "{}", entry.as_ref()).map_err(write_error)?;
    }

    writer.flush().map_err(write_error)?;
    Ok(())
}

/// Manifest content as written to disk.
pub fn render_manifest<I>(entries: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut content = String::new();
    for entry in entries {
        content.push_str(entry.as_ref());
        content.push('\n');
    }
    content
}
