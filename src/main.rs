use clap::Parser;
use clap::Subcommand;
use commands::branches::Branches;
use commands::component::Component;
use commands::merge::Merge;

mod cancel;
mod commands;
mod config;
mod errors;
mod git;
mod merge;
mod scaffold;
mod store;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "branchkit")]
#[command(
    about = "Merge a feature branch through the integration branches and scaffold components",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge a branch into every integration branch, pushing each one
    Merge(Merge),
    /// Show the current branch and every known branch
    Branches(Branches),
    /// Create a component folder from templates
    Component(Component),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let result = match args.command {
        Commands::Merge(merge) => merge.execute(),
        Commands::Branches(branches) => branches.execute(),
        Commands::Component(component) => component.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
