use crate::config::Credentials;
use reqwest::{
    blocking::{
        Client,
        RequestBuilder,
        Response,
    },
    StatusCode,
};
use scraper::{
    Html,
    Selector,
};
use url::Url;

const HOME_PATH: &str = "home";
const LOGIN_PATH: &str = "j_security_check";
const DISABLE_LOGINS_PATH: &str = "target?targetType=webserver&action=disableLogins";
const LOGOUT_PATH: &str = "logon?action=logout";

lazy_static::lazy_static! {
    static ref PASSWORD_INPUT: Selector = Selector::parse(r#"input[name="j_password"]"#).expect("static selector is valid");
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    #[error("the console rejected the login of user '{username}'")]
    Authentication { username: String },
}

/// Downloads the "Disable Logins" page, which lists the web instances with their online users.
///
/// Logs in, fetches the page and logs out again. The session is logged out even if fetching the page fails.
pub fn fetch_metrics_page(console_url: &Url, credentials: &Credentials) -> Result<String, FetchError> {
    let session = ConsoleSession::login(console_url, credentials)?;
    let page = session.disable_logins_page()?;
    session.logout()?;
    Ok(page)
}

/// An authenticated, cookie-scoped session against the Server Manager console.
///
/// Dropping the session without calling [`ConsoleSession::logout`] still logs out, errors are only logged then.
#[derive(Debug)]
pub struct ConsoleSession {
    client: Client,
    base_url: String,
    logged_out: bool,
}

impl ConsoleSession {
    pub fn login(console_url: &Url, credentials: &Credentials) -> Result<Self, FetchError> {
        let client = Client::builder().cookie_store(true).build().map_err(FetchError::Client)?;
        let mut session = Self {
            client,
            base_url: console_url.as_str().trim_end_matches('/').to_string(),
            logged_out: true,
        };

        // Fetching the home page hands out the session cookie that the login is bound to.
        session.get(HOME_PATH)?;

        debug!(username = credentials.username(), "logging in");
        session.logged_out = false;
        let url = session.endpoint(LOGIN_PATH);
        let response = session.send(
            session.client.post(&url).form(&[
                ("j_username", credentials.username()),
                ("j_password", credentials.password()),
            ]),
            &url,
        )?;
        let body = response.text().map_err(|source| FetchError::Request { url, source })?;

        if is_login_form(&body) {
            return Err(FetchError::Authentication {
                username: credentials.username().to_string(),
            });
        }

        Ok(session)
    }

    pub fn disable_logins_page(&self) -> Result<String, FetchError> {
        let url = self.endpoint(DISABLE_LOGINS_PATH);
        self.send(self.client.get(&url), &url)?
            .text()
            .map_err(|source| FetchError::Request { url, source })
    }

    pub fn logout(mut self) -> Result<(), FetchError> {
        self.logged_out = true;
        self.get(LOGOUT_PATH)?;
        debug!("logged out");
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Response, FetchError> {
        let url = self.endpoint(path);
        self.send(self.client.get(&url), &url)
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, FetchError> {
        let response = request.send().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        trace!(url, %status, "console responded");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        if self.logged_out {
            return;
        }
        self.logged_out = true;
        if let Err(error) = self.get(LOGOUT_PATH) {
            warn!(%error, "failed to log out of the console");
        }
    }
}

/// The console answers a rejected login with the login form instead of redirecting to the home page.
fn is_login_form(body: &str) -> bool {
    Html::parse_document(body).select(&PASSWORD_INPUT).next().is_some()
}
