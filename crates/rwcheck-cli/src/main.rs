use clap::Parser;
use clap::error::ErrorKind;
use rwcheck_cli::{Args, config::version_line, logging, run_check};
use rwcheck_driver_mysql::MySqlDriver;
use rwcheck_monitor::Report;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        // clap's own exit code 2 would read as CRITICAL to the scheduler
        Err(err) => {
            let rendered = err.to_string();
            let first_line = rendered.lines().next().unwrap_or("invalid arguments");
            return finish(Report::unknown(first_line));
        }
    };

    if args.version {
        println!("{}", version_line());
        return ExitCode::SUCCESS;
    }

    let logging_config = if args.debug {
        logging::LoggingConfig::debug()
    } else {
        logging::LoggingConfig::default()
    };
    if let Err(err) = logging::init(logging_config) {
        eprintln!("failed to initialize logging: {err}");
    }

    let report = match args.into_config() {
        Ok(config) => match run_check(&MySqlDriver::new(), &config).await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(error = ?err, "check failed");
                Report::unknown(format!("{:#}", err))
            }
        },
        Err(err) => Report::unknown(format!("{:#}", err)),
    };

    finish(report)
}

fn finish(report: Report) -> ExitCode {
    println!("{}", report);
    ExitCode::from(report.exit_code() as u8)
}
