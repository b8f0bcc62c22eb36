use std::process;

use clap::Parser;

use dupescan::cli::Cli;
use dupescan::error::{ExitCode, StructuredError};
use dupescan::run_app;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    match run_app(cli) {
        Ok(code) => process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string(&structured) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("[{}] Error: {err:#}", exit_code.code_prefix()),
                }
            } else {
                eprintln!("[{}] Error: {err:#}", exit_code.code_prefix());
            }
            process::exit(exit_code.as_i32());
        }
    }
}
