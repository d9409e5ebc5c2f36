//! URL manifest (`urls.csv`) writer.

use crate::scraper::fetch::LinkFetcher;
use geoid::GeoId;
use std::io::{self, Write};

pub const HEADER: [&str; 3] = ["geoid", "url_energy_snapshot", "url_data_viewer"];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes a single comma-separated row.
pub fn write_row<W: Write>(mut w: W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Writes the header and one row per identifier. Returns the number of data
/// rows written.
pub fn write_manifest<W, I>(mut w: W, ids: I, links: &LinkFetcher) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = GeoId>,
{
    write_row(&mut w, &HEADER)?;
    let mut rows = 0;
    for id in ids {
        let geoid = id.to_string();
        let snapshot = links.energy_snapshot_url(id);
        let viewer = links.data_viewer_url(id);
        write_row(&mut w, &[&geoid, &snapshot, &viewer])?;
        rows += 1;
    }
    w.flush()?;
    Ok(rows)
}
