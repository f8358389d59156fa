use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::output_formatter::{Accent, Palette};
use crate::utils::error::KcResult;

/// Indian Standard Time, UTC+05:30
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub const FORMAT_24H: &str = "%Y-%m-%d %H:%M:%S%.3f";
pub const FORMAT_12H: &str = "%Y-%m-%d %I:%M:%S%.3f %p";

pub const HEADING_24H: &str = "24-hour format";
pub const HEADING_12H: &str = "12-hour format";

/// Cursor home followed by erase display
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";
pub const FAREWELL_MESSAGE: &str = "\nExiting...";

pub fn ist_offset() -> Option<FixedOffset> {
    FixedOffset::east_opt(IST_OFFSET_SECS)
}

/// One instant seen from IST, UTC and the host zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSnapshot {
    ist: Option<DateTime<FixedOffset>>,
    utc: DateTime<Utc>,
    local: DateTime<FixedOffset>,
}

impl TimeSnapshot {
    pub fn at(instant: DateTime<Utc>, local_offset: FixedOffset) -> Self {
        Self::with_reference(instant, local_offset, ist_offset())
    }

    /// Build with an explicit IST offset; `None` drops the IST lines
    pub fn with_reference(
        instant: DateTime<Utc>,
        local_offset: FixedOffset,
        ist: Option<FixedOffset>,
    ) -> Self {
        Self {
            ist: ist.map(|offset| instant.with_timezone(&offset)),
            utc: instant,
            local: instant.with_timezone(&local_offset),
        }
    }

    pub fn now() -> Self {
        let local = Local::now();
        Self::at(local.with_timezone(&Utc), local.offset().fix())
    }

    pub fn ist(&self) -> Option<&DateTime<FixedOffset>> {
        self.ist.as_ref()
    }

    pub fn utc(&self) -> &DateTime<Utc> {
        &self.utc
    }

    pub fn local(&self) -> &DateTime<FixedOffset> {
        &self.local
    }

    /// The local line is redundant when it reads the same wall clock as IST.
    ///
    /// All three views share one instant, so comparing instants would always
    /// match; the wall-clock reading is what differs between zones.
    pub fn shows_local(&self) -> bool {
        match &self.ist {
            Some(ist) => ist.naive_local() != self.local.naive_local(),
            None => true,
        }
    }

    /// Labelled readings for one block, in display order
    pub fn readings(&self, format: &str) -> Vec<(&'static str, String)> {
        let mut readings = Vec::with_capacity(3);

        if let Some(ist) = &self.ist {
            readings.push(("IST", ist.format(format).to_string()));
        }
        readings.push(("UTC", self.utc.format(format).to_string()));
        if self.shows_local() {
            readings.push(("Local", self.local.format(format).to_string()));
        }

        readings
    }
}

/// Render both the 24-hour and the 12-hour block for `snapshot`
pub fn render_block(snapshot: &TimeSnapshot, palette: Palette) -> String {
    let mut output = String::new();

    for (heading, format) in [(HEADING_24H, FORMAT_24H), (HEADING_12H, FORMAT_12H)] {
        output.push_str(&format!("{}:\n\n", palette.decorate(heading, Accent::Heading)));
        for (label, value) in snapshot.readings(format) {
            output.push_str(&format!("{:<6}: {}\n", label, palette.decorate(&value, Accent::Value)));
        }
        output.push('\n');
    }

    output
}

/// Prints the current time, once or until cancelled
#[derive(Debug, Clone, Copy)]
pub struct TimeReporter {
    palette: Palette,
    interval: Duration,
}

impl TimeReporter {
    pub fn new(palette: Palette, interval: Duration) -> Self {
        Self { palette, interval }
    }

    pub fn print_once<W: Write>(&self, out: &mut W) -> KcResult<()> {
        self.print_snapshot(out, &TimeSnapshot::now())
    }

    pub fn print_snapshot<W: Write>(&self, out: &mut W, snapshot: &TimeSnapshot) -> KcResult<()> {
        write!(out, "{}", render_block(snapshot, self.palette))?;
        out.flush()?;
        Ok(())
    }

    /// Redraw every `interval` until `token` is cancelled.
    ///
    /// The token is only checked between redraws, so cancellation takes
    /// effect within one interval. The farewell line is the last thing
    /// written.
    pub async fn run_continuous<W: Write>(&self, out: &mut W, token: &CancellationToken) -> KcResult<()> {
        let mut frames: u64 = 0;

        loop {
            if token.is_cancelled() {
                debug!(frames, "refresh loop cancelled");
                writeln!(out, "{}", FAREWELL_MESSAGE)?;
                out.flush()?;
                return Ok(());
            }

            write!(out, "{}", CLEAR_SCREEN)?;
            self.print_once(out)?;
            frames += 1;

            tokio::time::sleep(self.interval).await;
        }
    }
}
