use clap::Parser;
use deacon::cli::commands::Cli;
use deacon::cli::handlers;
use deacon::io::context::Context;
use deacon::io::logging;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI
            launch_tui(&cli)
        }
        Some(_) => {
            logging::init_cli();
            handlers::dispatch(cli)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn launch_tui(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(&handlers::overrides_from(cli))?;
    logging::init_tui(&ctx.log_path());
    deacon::tui::run(&ctx)
}
