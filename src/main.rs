use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod catalog;
mod cli;
mod config;
mod console;
mod history;
mod receipt;
mod schema;
mod session;
mod store;
mod workflow;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::RootArgs::parse();
    let config = config::load(&args)?;
    let store = store::Store::new(config.data_dir.clone());
    session::ensure_admin(&store);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    let mut console = console::Console::new(&mut input, &mut output);
    app::run(&store, &config, &mut console)
}
