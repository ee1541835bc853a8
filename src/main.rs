use clap::Parser;
use color_eyre::Result;
use jde_user_metrics::{
    init_errors,
    init_logging,
    App,
    Args,
};

fn main() -> Result<()> {
    let args = Args::parse();
    init_errors()?;
    init_logging(args.verbose)?;
    App::new(args)?.run()
}
