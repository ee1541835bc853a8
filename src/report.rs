use crate::{
    config::OutputMode,
    snapshot::Snapshot,
};
use chrono::NaiveDateTime;
use std::io::{
    self,
    Write,
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a collected snapshot. Results go to `out`, diagnostics to `diag`.
///
/// A missing snapshot (the console could not be queried) renders like an empty one.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    snapshot: Option<&'a Snapshot>,
    timestamp: Option<NaiveDateTime>,
}

impl<'a> Report<'a> {
    pub fn new(snapshot: Option<&'a Snapshot>) -> Self {
        Self {
            snapshot,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn render(&self, mode: &OutputMode, out: &mut impl Write, diag: &mut impl Write) -> io::Result<()> {
        if let Some(timestamp) = self.timestamp {
            writeln!(out, "{}", timestamp.format(TIMESTAMP_FORMAT))?;
        }

        match mode {
            OutputMode::List => self.list(out),
            OutputMode::All => self.all(out),
            OutputMode::Instance(name) => self.instance(name, out, diag),
            OutputMode::Json => self.json(out),
        }
    }

    fn list(&self, out: &mut impl Write) -> io::Result<()> {
        for instance in self.snapshot.into_iter().flat_map(Snapshot::instances) {
            writeln!(out, "{instance}")?;
        }
        Ok(())
    }

    fn all(&self, out: &mut impl Write) -> io::Result<()> {
        for (instance, users) in self.snapshot.into_iter().flat_map(Snapshot::iter) {
            writeln!(out, "{instance}\t{users}")?;
        }
        Ok(())
    }

    fn instance(&self, name: &str, out: &mut impl Write, diag: &mut impl Write) -> io::Result<()> {
        let Some(snapshot) = self.snapshot else {
            debug!(instance = name, "no metrics available, instance not looked up");
            return Ok(());
        };
        match snapshot.users(name) {
            Some(users) => writeln!(out, "{users}"),
            None => {
                debug!(instance = name, "instance not found in snapshot");
                writeln!(diag, "The instance specified does not exist: {name}")
            }
        }
    }

    fn json(&self, out: &mut impl Write) -> io::Result<()> {
        let empty = Snapshot::default();
        serde_json::to_writer(&mut *out, self.snapshot.unwrap_or(&empty))?;
        writeln!(out)
    }
}
