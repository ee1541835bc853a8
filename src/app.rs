use crate::{
    args::Args,
    config::Config,
    report::Report,
    session,
    snapshot::Snapshot,
};
use chrono::Local;
use color_eyre::Result;
use eyre::Context as _;
use std::io::{
    self,
    Write,
};

pub struct App {
    config: Config,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        Ok(Self {
            config: Config::new(args),
        })
    }

    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_with(&mut stdout.lock(), &mut stderr.lock())
    }

    /// Collects the snapshot and prints the selected report.
    ///
    /// A console that cannot be reached or refuses the login is reported on `diag` and rendered as an absent
    /// snapshot. A page that cannot be parsed is an error.
    pub fn run_with(&self, out: &mut impl Write, diag: &mut impl Write) -> Result<()> {
        let snapshot = self.collect(diag)?;

        let mut report = Report::new(snapshot.as_ref());
        if self.config.timestamp {
            report = report.with_timestamp(Local::now().naive_local());
        }
        report
            .render(&self.config.mode, out, diag)
            .context("Failed to write report")?;
        out.flush().context("Failed to write report")
    }

    fn collect(&self, diag: &mut impl Write) -> Result<Option<Snapshot>> {
        let console_url = &self.config.console_url;
        info!(%console_url, username = self.config.credentials.username(), "collecting online users");

        let page = match session::fetch_metrics_page(console_url, &self.config.credentials) {
            Ok(page) => page,
            Err(error) => {
                warn!(%error, "no metrics available");
                writeln!(diag, "Failed during connection!\n{error}")?;
                return Ok(None);
            }
        };

        let snapshot = Snapshot::from_html(&page)
            .with_context(|| format!("Failed to read the web instance table from {console_url}"))?;
        info!(
            instances = snapshot.len(),
            users = snapshot.total_users(),
            "collected online users"
        );
        Ok(Some(snapshot))
    }
}
