use super::write_atomic;
use crate::error::ExportError;
use crate::viewer::Frame;
use std::path::Path;

pub fn frame_to_json(frame: &Frame) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(frame)?)
}

pub fn write_frame<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), ExportError> {
    write_atomic(path.as_ref(), |writer| {
        serde_json::to_writer(writer, frame).map_err(std::io::Error::from)
    })
}
