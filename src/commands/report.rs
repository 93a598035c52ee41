use std::io::Write;

use crate::config::ProgramInputs;
use crate::error::Result;
use crate::report::write_csv;
use crate::videos::{list_channel_videos, sort_by_views, update_view_counts};
use crate::youtube::VideoApi;

/// List the channel, fill in view counts, and write the CSV report to `out`.
pub async fn run<W: Write>(api: &impl VideoApi, inputs: &ProgramInputs, out: W) -> Result<()> {
    let mut videos = list_channel_videos(api, inputs).await?;
    update_view_counts(api, &mut videos).await?;

    if inputs.sort_by_views {
        sort_by_views(&mut videos);
    }

    write_csv(out, &videos)
}
