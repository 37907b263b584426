// crates/districts-core/src/loader/common_io.rs
use crate::error::{DistrictError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// ends in `.gz`. The caller never sees the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DistrictError::NotFound(format!("Input not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(DistrictError::InvalidData(format!(
                "{} is gzip-compressed but the 'compact' feature is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// Reads a whole (possibly gzipped) text file.
pub fn read_text(path: &Path) -> Result<String> {
    let mut stream = open_stream(path)?;
    let mut text = String::new();
    stream.read_to_string(&mut text)?;
    // Spreadsheet exports from Windows tools often start with a BOM.
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
