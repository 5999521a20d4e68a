use std::io;

use bank::{cli::Session, config::Config, domain::registry::Registry, error::Result, logging};
use clap::Parser;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init("warn");
    tracing::debug!(?config, "starting session");

    let registry = Registry::new(config.policy());
    let mut session = Session::new(io::stdin().lock(), io::stdout(), registry, config.auditor());
    session.run()
}
