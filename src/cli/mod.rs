pub mod config;
pub mod dates;
pub mod log_day;
pub mod report;
pub mod stats;

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{Config, DEFAULT_TABLE};
use log_day::{process_log_command, LogCommand};
use stats::{process_stats_command, StatsCommand};
use tracing::debug;

use crate::{
    store::json_lines::JsonLinesStore,
    utils::{clock::DefaultClock, logging::enable_logging},
};

#[derive(Parser, Debug)]
#[command(name = "screentime", version, long_about = None)]
#[command(about = "Track daily screen time and see how it adds up", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        env = "SCREENTIME_DIR",
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, env = "SCREENTIME_TABLE", default_value = DEFAULT_TABLE, help = "Table the days are saved into")]
    table: String,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Save screen time of a day. Saving a day twice overwrites it")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Show averages, goal adherence, streak and weekday pattern for a range")]
    Stats {
        #[command(flatten)]
        command: StatsCommand,
    },
}

pub async fn run_cli(args: Args) -> Result<()> {
    let config = Config::resolve(args.dir, args.table)?;
    enable_logging(&config.data_dir, args.log)?;
    debug!("Using {config:?}");

    let store = JsonLinesStore::new(config.records_dir(), &config.table, Box::new(DefaultClock))?;
    let mut stdout = io::stdout().lock();

    match args.commands {
        Commands::Log { command } => {
            process_log_command(&store, &DefaultClock, command, &mut stdout).await
        }
        Commands::Stats { command } => {
            let color = io::stdout().is_terminal();
            process_stats_command(&store, &DefaultClock, command, color, &mut stdout).await
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, Commands};

    #[test]
    fn parses_global_options_and_commands() {
        let args = Args::try_parse_from([
            "screentime",
            "--table",
            "phone",
            "--dir",
            "/tmp/screentime",
            "log",
            "120",
        ])
        .unwrap();
        assert_eq!(args.table, "phone");
        assert!(matches!(args.commands, Commands::Log { .. }));

        let args = Args::try_parse_from(["screentime", "--log", "stats", "--json"]).unwrap();
        assert!(args.log);
        assert!(matches!(args.commands, Commands::Stats { .. }));
    }
}
