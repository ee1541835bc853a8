use clap::{
    ArgGroup,
    Parser,
};
use url::Url;

/// Grab the current online user count from a Server Manager console.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["list", "all", "instance", "json"])))]
pub struct Args {
    /// Url for the Server Manager console. Ends with "/manage".
    #[arg(value_parser = parse_console_url)]
    pub url: Url,

    /// Server Manager console username. Usually "jde_admin".
    pub username: String,

    /// Password of the console user.
    pub password: String,

    /// Print the current timestamp.
    #[arg(short, long)]
    pub timestamp: bool,

    /// List all available instances.
    #[arg(short, long)]
    pub list: bool,

    /// List all instances and user counts as a table (default if no mode is given).
    #[arg(short, long)]
    pub all: bool,

    /// Instance that should be queried.
    #[arg(short, long, value_name = "NAME")]
    pub instance: Option<String>,

    /// Print all instances and user counts as a JSON object.
    #[arg(short, long)]
    pub json: bool,

    /// Enable verbose logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_console_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid console url '{value}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("unsupported scheme '{scheme}', expected http or https")),
    }
}
