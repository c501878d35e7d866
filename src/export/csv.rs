/// Export frame segments to CSV for spreadsheet analysis
use super::write_atomic;
use crate::error::ExportError;
use crate::geometry::Segment;
use crate::viewer::Frame;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: &str = "kind,line,charge,ray,x1,y1,x2,y2";

fn write_row<W: Write>(
    out: &mut W,
    kind: &str,
    index: usize,
    charge: Option<usize>,
    ray: Option<usize>,
    seg: &Segment,
) -> std::io::Result<()> {
    let opt = |v: Option<usize>| v.map(|v| v.to_string()).unwrap_or_default();
    writeln!(
        out,
        "{},{},{},{},{},{},{},{}",
        kind,
        index,
        opt(charge),
        opt(ray),
        seg.start.x,
        seg.start.y,
        seg.end.x,
        seg.end.y
    )
}

/// One row per segment. Field line rows carry their line, charge and ray
/// indices; vector and probe rows only their own index.
pub fn write_csv<W: Write>(frame: &Frame, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for (i, line) in frame.lines.iter().enumerate() {
        for seg in &line.segments {
            write_row(out, "line", i, Some(line.charge_index), Some(line.ray_index), seg)?;
        }
    }
    for (i, seg) in frame.vectors.iter().enumerate() {
        write_row(out, "vector", i, None, None, seg)?;
    }
    for (i, seg) in frame.probes.iter().enumerate() {
        write_row(out, "probe", i, None, None, seg)?;
    }
    Ok(())
}

pub fn write_segments<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), ExportError> {
    write_atomic(path.as_ref(), |writer| write_csv(frame, writer))
}
