use clap::Parser;
use sectorcap::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
