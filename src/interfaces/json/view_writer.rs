use crate::application::view::DashboardView;
use crate::error::Result;
use std::io::Write;

/// Writes the dashboard view model as a JSON document.
///
/// The document is the whole interface to the rendering surface: one
/// object per run, pretty-printed so it doubles as a human-readable
/// report.
pub struct ViewWriter<W: Write> {
    writer: W,
}

impl<W: Write> ViewWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_view(&mut self, view: &DashboardView) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, view)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
