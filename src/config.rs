//! # Configuration Module
//!
//! Turns the parsed command line into the settings the probe runs with.
//!
//! ## Configuration Fields
//!
//! - **Console URL**: Base of the Server Manager console, normalised without a trailing slash
//! - **Credentials**: Username and password for the form based login
//! - **Output mode**: Which report is printed
//! - **Timestamp**: Whether the current time is printed first

use crate::args::Args;
use std::fmt;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub console_url: Url,
    pub credentials: Credentials,
    pub mode: OutputMode,
    pub timestamp: bool,
}

impl Config {
    pub fn new(args: Args) -> Self {
        let Args {
            url,
            username,
            password,
            timestamp,
            list,
            instance,
            json,
            ..
        } = args;

        let mode = match (instance, list, json) {
            (Some(instance), _, _) => OutputMode::Instance(instance),
            (None, true, _) => OutputMode::List,
            (None, false, true) => OutputMode::Json,
            (None, false, false) => OutputMode::All,
        };

        Self {
            console_url: Self::normalize_console_url(url),
            credentials: Credentials::new(username, password),
            mode,
            timestamp,
        }
    }

    /// Strips trailing slashes so `https://host/manage/` and `https://host/manage` address the same endpoints.
    fn normalize_console_url(mut url: Url) -> Url {
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

/// Which report is printed for the collected snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `name<TAB>count` for every instance.
    #[default]
    All,
    /// Instance names only.
    List,
    /// The count of a single instance.
    Instance(String),
    /// The whole snapshot as a JSON object.
    Json,
}

/// Form login credentials. The password never shows up in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl ToString, password: impl ToString) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
