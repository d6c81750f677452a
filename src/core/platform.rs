//! Process-level helpers: argument parsing and fatal error reporting.

/// Handle application errors by printing to stderr and exiting with code 1
pub fn handle_error(error: anyhow::Error) {
    eprintln!();
    eprintln!("Error starting the glyph projector:");
    eprintln!("{error}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse command line arguments
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    crate::core::cli::CliArgs::parse()
}
