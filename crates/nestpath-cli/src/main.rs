use clap::Parser;
use nestpath_cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    nestpath_cli::logging::init();
    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    match nestpath_cli::run(cli, stdin.lock(), &mut stdout) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
