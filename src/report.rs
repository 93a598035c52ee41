use std::io::Write;

use crate::error::Result;
use crate::videos::VideoDetails;

pub const HEADERS: [&str; 3] = ["Views", "Title", "URL"];

/// Write the header and one row per video, in the order given, then flush.
pub fn write_csv<W: Write>(writer: W, videos: &[VideoDetails]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    for video in videos {
        csv.write_record([
            video.view_count.to_string(),
            video.title.clone(),
            video.url(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
