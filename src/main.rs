use colored::Colorize;
use json_fit::cli::CommandLineInterface;
use tracing_subscriber::EnvFilter;

fn main() {
    let command_line_interface = CommandLineInterface::load();

    let default_directive = if command_line_interface.verbose() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
