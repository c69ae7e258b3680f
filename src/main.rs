use clap::Parser;
use terminal_todo::cli::commands::Cli;
use terminal_todo::cli::handlers;
use terminal_todo::io::state::read_ui_state;

fn main() {
    let cli = Cli::parse();

    let mut session = match handlers::open_session(&cli) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI
            let state_path = session.paths.state_file();
            let saved = read_ui_state(&state_path);
            terminal_todo::tui::run(session.store, &session.config.ui, saved, state_path)
        }
        Some(command) => handlers::dispatch(command, cli.json, &mut session.store),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
