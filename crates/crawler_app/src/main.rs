mod terminal;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = terminal::Args::parse();
    terminal::run_app(args)
}
