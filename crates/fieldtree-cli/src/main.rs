mod cli;
mod commands;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{
    CheckParams, ConfigParams, DumpParams, InferParams, PathsParams, ValidateParams, build_cli,
    verbosity,
};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(verbosity(&matches));

    match matches.subcommand() {
        Some(("infer", m)) => {
            let params = InferParams::from_matches(m);
            commands::infer::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("paths", m)) => {
            let params = PathsParams::from_matches(m);
            commands::paths::run(params.into());
        }
        Some(("config", m)) => {
            let params = ConfigParams::from_matches(m);
            commands::config::run(params.into());
        }
        Some(("validate", m)) => {
            let params = ValidateParams::from_matches(m);
            commands::validate::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
