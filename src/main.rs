mod startup;

use clap::{CommandFactory, Parser};
use googler::cli::Cli;
use googler::error::Error;
use googler::prompts::InquirePrompter;
use tracing::{error, info};

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    let cli = Cli::parse();
    let Some(action) = cli.action() else {
        Cli::command().print_help().map_err(Error::from)?;
        return Ok(());
    };

    info!("Starting googler");

    let config = startup::load_config()?;
    let actions = startup::build_actions(&config)?;

    // A failed prompt ends the action, not the process
    let mut stdout = std::io::stdout();
    if let Err(e) = actions.run(action, &mut InquirePrompter, &mut stdout).await {
        error!("Action {:?} failed: {}", action, e);
        eprintln!("{:?}", miette::Report::new(e));
    }

    Ok(())
}
