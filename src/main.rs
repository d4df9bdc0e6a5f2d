use std::io::{self, Write};

use clap::{Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;
use zet::{
    cli::{self, Cli, Command, EditArgs, NewArgs, SearchArgs},
    config::Config,
    edit::EditFlow,
    editor::{ExternalEditor, Launcher},
    error,
    note::{self, NoteStamp},
    search,
    sync::Git,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("ZET_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let args = cli::normalize_args(std::env::args_os());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            if let Err(e) = cli::print_help() {
                eprintln!("zet: {e}");
                std::process::exit(1);
            }
            return;
        }
        Err(e) => e.exit(),
    };
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("zet: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let command = match cli.command {
        None | Some(Command::Help) => {
            cli::print_help()?;
            return Ok(());
        }
        Some(Command::Completions(args)) => {
            args.generate();
            return Ok(());
        }
        Some(command) => command,
    };

    let config = Config::resolve(cli.zetdir.as_deref())?;

    match command {
        Command::New(args) => cmd_new(&config, &args),
        Command::Search(args) => cmd_search(&config, &args),
        Command::Edit(args) => cmd_edit(&config, &args),
        Command::Help | Command::Completions(_) => Ok(()),
    }
}

fn cmd_new(config: &Config, args: &NewArgs) -> error::Result<()> {
    let editor = ExternalEditor::new(config.editor()?);
    let path = note::create_note(config, &args.title(), &NoteStamp::now())?;

    if let Err(e) = editor.open(&path) {
        eprintln!("{e}");
    }
    Ok(())
}

fn cmd_search(config: &Config, args: &SearchArgs) -> error::Result<()> {
    let params = args.params();
    let outcome = search::execute_search(&config.notes_dir(), &params)?;

    let mut stdout = io::stdout().lock();
    search::format_outcome(&outcome, &params.terms, args.json, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_edit(config: &Config, args: &EditArgs) -> error::Result<()> {
    let editor = ExternalEditor::new(config.editor()?);
    let vcs = Git::new(config.root());
    let flow = EditFlow {
        editor: &editor,
        vcs: &vcs,
        repo_root: config.root(),
        out_of_range: args.out_of_range,
    };

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    flow.run(&config.notes_dir(), &args.params(), &mut stdin, &mut stdout)?;
    Ok(())
}
