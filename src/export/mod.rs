//! File renderers for a [`Frame`](crate::viewer::Frame): SVG for viewing,
//! JSON and CSV for analysis.

pub mod csv;
pub mod json;
pub mod svg;

pub use self::csv::write_segments;
pub use self::json::write_frame;
pub use self::svg::{render_svg, write_svg};

use crate::error::ExportError;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write through a temporary sibling file and rename it into place, so an
/// interrupted export never leaves a truncated file behind.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<std::fs::File>) -> std::io::Result<()>,
{
    let io_err = |source: std::io::Error| ExportError::Io { path: path.to_path_buf(), source };
    let tmp_path = path.with_extension({
        let mut os = path.extension().map(|e| e.to_os_string()).unwrap_or_default();
        os.push(".tmp");
        os
    });
    {
        let file = std::fs::File::create(&tmp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write(&mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    }
    std::fs::rename(&tmp_path, path).map_err(io_err)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
