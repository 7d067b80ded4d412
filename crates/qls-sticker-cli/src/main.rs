mod apply_cmd;
mod cli;
mod extract_cmd;
mod run_cmd;
mod settings;
mod settings_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use settings::SettingsStore;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose, cli.quiet);

    let store = SettingsStore::new(
        cli.settings_file
            .clone()
            .unwrap_or_else(SettingsStore::default_path),
    );

    let result = match cli.command {
        cli::Commands::Run {
            ref base,
            ref paths,
            strict_paths,
            strategy,
            save,
            format,
        } => run_cmd::run(
            &run_cmd::RunOptions {
                base: base.as_deref(),
                paths,
                strict_paths,
                strategy,
                save,
                format,
            },
            &store,
        ),
        cli::Commands::Extract {
            ref file,
            strategy,
            format,
        } => extract_cmd::run(file, strategy, format),
        cli::Commands::Apply {
            ref paths,
            save,
            format,
        } => apply_cmd::run(paths, save, format, &store),
        cli::Commands::Settings { action } => settings_cmd::run(action, &store),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
