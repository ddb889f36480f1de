//! Rolodex console entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the customer database.
//! - Wire repository, service and console session, then run the menu loop.

mod config;
mod console;

use config::AppConfig;
use console::Session;
use log::{error, info};
use rolodex_core::{init_logging, open_db, CustomerService, SqliteCustomerRepository};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = AppConfig::from_env();

    // Logging is diagnostic only; the console still works without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "failed to open customer database `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteCustomerRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("customer database is not usable: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = CustomerService::new(repo);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match Session::new(stdin.lock(), stdout.lock(), &service).run() {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error_code=console_io_failed error={err}");
            eprintln!("console error: {err}");
            ExitCode::FAILURE
        }
    }
}
