use anyhow::Result;

use hostwatch::commands;
use hostwatch::core::config::parse_debug_flag;

fn main() -> Result<()> {
    // A missing .env is fine; the environment and flags still apply
    let _ = dotenvy::dotenv();

    let matches = commands::build_cli().get_matches();

    let verbose = matches
        .subcommand()
        .and_then(|(_, sub)| sub.try_get_one::<String>("debug").ok().flatten())
        .map(|value| parse_debug_flag(value).unwrap_or(false))
        .unwrap_or(false);
    hostwatch::init_logging(verbose);

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("check", sub_matches)) => commands::check(sub_matches)?,
        Some(("watch", sub_matches)) => commands::watch(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        _ => {
            println!("Welcome to hostwatch!");
            println!("Use 'hostwatch --help' for more information.");
        }
    }

    Ok(())
}
