use auth_forms::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::SignIn(args) => cli::submit::run_sign_in(args, cli.base_url).await,
        Command::Register(args) => cli::submit::run_register(args, cli.base_url).await,
        Command::ResetPassword(args) => cli::submit::run_reset_password(args, cli.base_url).await,
        Command::Link(args) => cli::link::run(args, cli.base_url).await,
    }
}
