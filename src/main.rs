// SPDX-License-Identifier: MPL-2.0
use iced_calendar::app::{self, paths, Flags};
use iced_calendar::domain::calendar::CalendarMonth;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Iced Calendar

USAGE:
  iced_calendar [OPTIONS]

OPTIONS:
  -h, --help               Print this help
  --month YYYY-MM          Month shown on startup
  --config-dir PATH        Directory holding settings.toml
  --data-dir PATH          Directory holding the zoom state file

ENVIRONMENT:
  ICED_CALENDAR_CONFIG_DIR, ICED_CALENDAR_DATA_DIR, RUST_LOG
";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        month: args.opt_value_from_str::<_, CalendarMonth>("--month")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }
    Ok(flags)
}

fn main() -> iced::Result {
    init_logging();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(error) => {
            eprintln!("error: {error}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}
