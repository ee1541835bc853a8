//! # JDE Server Manager User Metrics
//!
//! A small probe that logs into a JD Edwards Server Manager console, scrapes the
//! "Disable Logins" page and reports the number of online users per web instance.
//! Cluster members share an instance name and are summed into a single entry.
//!
//! It is meant to be run periodically by a monitoring system such as Zabbix, or by
//! hand from a terminal.
//!
//! ## Architecture
//!
//! - **`args`**: Command line surface
//! - **`config`**: Validated settings built from the arguments
//! - **`session`**: Cookie-scoped login → fetch → logout sequence against the console
//! - **`extract`**: Parses the `webInstances` table into a [`Snapshot`]
//! - **`snapshot`**: Ordered instance name → online user count mapping
//! - **`report`**: Renders a snapshot in one of the output modes
//!
//! ## Usage
//!
//! ```bash
//! # All instances as `name<TAB>count` lines (default)
//! jde-user-metrics https://sm.example.com/manage jde_admin secret
//!
//! # One instance, prefixed with the current time
//! jde-user-metrics https://sm.example.com/manage jde_admin secret -t -i JDEWEB_PROD
//! ```

#[macro_use]
extern crate tracing;

mod app;
pub mod args;
pub mod config;
pub mod extract;
pub mod logging;
pub mod report;
pub mod session;
pub mod snapshot;

pub use app::App;
pub use args::Args;
pub use config::Config;
pub use logging::init_logging;
pub use snapshot::Snapshot;

pub fn init_errors() -> eyre::Result<()> {
    color_eyre::install()
}
