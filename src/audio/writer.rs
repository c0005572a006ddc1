//! WAV output writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write WAV bytes to `path`, overwriting any existing file.
///
/// The handle is flushed before it drops, so an interrupt arriving between
/// utterances never leaves buffered data behind.
pub fn write_wav(path: &Path, wav: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(wav)?;
    file.flush()?;
    Ok(())
}
