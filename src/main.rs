//! Terminal front-end for the Game of Life board

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_board::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_states, Direction},
    session::{Confirmation, FixedAnswer, Prompter, Session, TerminalPrompter},
    utils::{BoardFormatter, ColorOutput},
    LoadOutcome,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_board")]
#[command(about = "Conway's Game of Life on a bounded square board")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration and example state files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Run a simulation without interaction
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// State file to start from
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Board side (overrides config)
        #[arg(long)]
        side: Option<usize>,

        /// Number of single steps to take
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Auto-play on the configured interval instead of single steps
        #[arg(long)]
        play: bool,

        /// Maximum number of auto-play ticks
        #[arg(long, default_value_t = 100)]
        max_ticks: usize,

        /// Auto-play interval in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Answer given to every confirmation while loading
        #[arg(long, value_enum, default_value_t = Answer::Yes)]
        assume: Answer,

        /// Save the final state to this file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Drive a board with typed commands
    Interactive {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Answer {
    Yes,
    No,
    Cancel,
}

impl From<Answer> for Confirmation {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Yes => Confirmation::Yes,
            Answer::No => Confirmation::No,
            Answer::Cancel => Confirmation::Cancel,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Run {
            config,
            state,
            side,
            generations,
            play,
            max_ticks,
            interval_ms,
            assume,
            save,
            format,
        } => {
            let overrides = CliOverrides {
                side,
                interval_ms,
                format,
            };
            let options = RunOptions {
                state,
                generations,
                play,
                max_ticks,
                assume,
                save,
            };
            run_command(config, overrides, options)
        }
        Commands::Interactive { config } => interactive_command(config),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "life_board=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::from_file_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up board files..."));

    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let states_dir = directory.join("states");
    create_example_states(&states_dir).context("Failed to create example states")?;
    println!("Created example states in: {}", states_dir.display());

    println!("{}", ColorOutput::success("Setup complete!"));
    Ok(())
}

struct RunOptions {
    state: Option<PathBuf>,
    generations: usize,
    play: bool,
    max_ticks: usize,
    assume: Answer,
    save: Option<PathBuf>,
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, options: RunOptions) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let mut session = Session::with_settings(FixedAnswer(options.assume.into()), &settings);

    if let Some(state) = &options.state {
        let path = state.to_string_lossy();
        let outcome = session
            .load_state(&path)
            .with_context(|| format!("Failed to load state from {}", path))?;
        match outcome {
            LoadOutcome::Aborted => {
                println!("{}", ColorOutput::warning("Load cancelled"));
                return Ok(());
            }
            LoadOutcome::Loaded { rows, .. } => {
                println!("{}", ColorOutput::info(&format!("Loaded {} rows from {}", rows, path)));
            }
            LoadOutcome::Skipped => {}
        }
    }

    if options.play {
        session.toggle_play();
        let mut ticks = 0;
        while session.board().is_playing() && ticks < options.max_ticks {
            if session.wait_for_tick().is_none() {
                break;
            }
            ticks += 1;
        }
        if session.board().is_playing() {
            session.toggle_play();
        }
    } else {
        for _ in 0..options.generations {
            session.step();
        }
    }

    let rendered = BoardFormatter::render(
        session.board(),
        settings.output.format,
        settings.output.style,
    )?;
    print!("{}", rendered);
    if settings.output.format == OutputFormat::Json {
        println!();
    }

    if let Some(save) = &options.save {
        session
            .save_state(&save.to_string_lossy())
            .with_context(|| format!("Failed to save state to {}", save.display()))?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", save.display())));
    }

    Ok(())
}

/// Commands understood by the interactive front-end
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Create(String),
    Toggle(usize, usize),
    Step(usize),
    Play,
    Tick(usize),
    Clear,
    Save(String),
    Load(String),
    Shift(Direction),
    Show,
    Help,
    Quit,
}

const REPL_HELP: &str = "\
commands:
  create <side>        new empty board
  toggle <row> <col>   flip one cell
  step [n]             advance n generations (default 1)
  play                 start or pause auto-play
  tick [n]             wait for up to n auto-play ticks (default 1)
  clear                kill every cell
  save <file>          save the board
  load <file>          load a saved board
  shift <direction>    pan by one cell: up, down, left, right
  show                 print the board
  quit                 leave";

fn parse_count(arg: Option<&str>) -> Result<usize, String> {
    match arg {
        None => Ok(1),
        Some(text) => text
            .parse()
            .map_err(|_| format!("'{}' is not a number", text)),
    }
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| "empty command".to_string())?;
        let rest: Vec<&str> = words.collect();
        let path = || rest.join(" ");

        let command = match (name.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("create", [side]) => ReplCommand::Create(side.to_string()),
            ("toggle", [row, col]) => {
                let row = row.parse().map_err(|_| format!("bad row '{}'", row))?;
                let col = col.parse().map_err(|_| format!("bad column '{}'", col))?;
                ReplCommand::Toggle(row, col)
            }
            ("step", [] | [_]) => ReplCommand::Step(parse_count(rest.first().copied())?),
            ("tick", [] | [_]) => ReplCommand::Tick(parse_count(rest.first().copied())?),
            ("play", []) => ReplCommand::Play,
            ("clear", []) => ReplCommand::Clear,
            ("save", [_, ..]) => ReplCommand::Save(path()),
            ("load", [_, ..]) => ReplCommand::Load(path()),
            ("shift", [direction]) => ReplCommand::Shift(direction.parse()?),
            ("show", []) => ReplCommand::Show,
            ("help" | "?", []) => ReplCommand::Help,
            ("quit" | "exit", []) => ReplCommand::Quit,
            _ => return Err(format!("cannot understand '{}', type 'help'", line.trim())),
        };
        Ok(command)
    }
}

type Repl<R, W> = Session<TerminalPrompter<R, W>>;

fn show<R: BufRead, W: Write>(session: &mut Repl<R, W>, settings: &Settings) -> Result<()> {
    let rendered =
        BoardFormatter::render(session.board(), OutputFormat::Text, settings.output.style)?;
    session.prompter_mut().say(rendered.trim_end())?;
    Ok(())
}

/// Execute one command. Returns `false` when the user asked to leave.
fn execute<R: BufRead, W: Write>(
    session: &mut Repl<R, W>,
    settings: &Settings,
    command: ReplCommand,
) -> Result<bool> {
    // Failures are already shown to the user by the session
    match command {
        ReplCommand::Create(side) => {
            if session.create_grid(&side).is_ok() {
                show(session, settings)?;
            }
        }
        ReplCommand::Toggle(row, col) => {
            if session.toggle_cell(row, col).is_ok() {
                show(session, settings)?;
            }
        }
        ReplCommand::Step(count) => {
            for _ in 0..count {
                session.step();
            }
            show(session, settings)?;
        }
        ReplCommand::Play => {
            session.toggle_play();
            show(session, settings)?;
        }
        ReplCommand::Tick(count) => {
            for _ in 0..count {
                match session.wait_for_tick() {
                    Some(true) => show(session, settings)?,
                    Some(false) => {}
                    None => break,
                }
                if !session.board().is_playing() {
                    break;
                }
            }
            if !session.board().is_playing() {
                session.prompter_mut().say("auto-play is off")?;
            }
        }
        ReplCommand::Clear => {
            session.clear();
            show(session, settings)?;
        }
        ReplCommand::Save(path) => {
            if session.save_state(&path).is_ok() {
                session.prompter_mut().say(&format!("saved to {}", path))?;
            }
        }
        ReplCommand::Load(path) => match session.load_state(&path) {
            Ok(LoadOutcome::Loaded { .. }) => show(session, settings)?,
            Ok(LoadOutcome::Aborted) => session.prompter_mut().say("load cancelled")?,
            Ok(LoadOutcome::Skipped) | Err(_) => {}
        },
        ReplCommand::Shift(direction) => {
            session.shift(direction);
            show(session, settings)?;
        }
        ReplCommand::Show => show(session, settings)?,
        ReplCommand::Help => session.prompter_mut().say(REPL_HELP)?,
        ReplCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn repl<R: BufRead, W: Write>(session: &mut Repl<R, W>, settings: &Settings) -> Result<()> {
    show(session, settings)?;
    while let Some(line) = session.prompter_mut().prompt_line("life> ")? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ReplCommand>() {
            Ok(command) => {
                if !execute(session, settings, command)? {
                    break;
                }
            }
            Err(message) => session.prompter_mut().show_error("Unknown command", &message),
        }
    }
    Ok(())
}

fn interactive_command(config_path: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path, &CliOverrides::default())?;
    let prompter = TerminalPrompter::new(std::io::stdin().lock(), std::io::stdout());
    let mut session = Session::with_settings(prompter, &settings);
    println!("{}", ColorOutput::info("Type 'help' for commands"));
    repl(&mut session, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_board::BoardError;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_board",
            "run",
            "--config", "test.yaml",
            "--generations", "5",
            "--assume", "no",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("states/glider.txt").exists());
    }

    #[test]
    fn test_repl_command_parsing() {
        assert_eq!("create 12".parse::<ReplCommand>(), Ok(ReplCommand::Create("12".to_string())));
        assert_eq!("toggle 1 2".parse::<ReplCommand>(), Ok(ReplCommand::Toggle(1, 2)));
        assert_eq!("step".parse::<ReplCommand>(), Ok(ReplCommand::Step(1)));
        assert_eq!("STEP 4".parse::<ReplCommand>(), Ok(ReplCommand::Step(4)));
        assert_eq!("shift left".parse::<ReplCommand>(), Ok(ReplCommand::Shift(Direction::Left)));
        assert_eq!(
            "save my board.txt".parse::<ReplCommand>(),
            Ok(ReplCommand::Save("my board.txt".to_string()))
        );
        assert!("toggle x 1".parse::<ReplCommand>().is_err());
        assert!("shift sideways".parse::<ReplCommand>().is_err());
        assert!("dance".parse::<ReplCommand>().is_err());
    }

    #[test]
    fn test_repl_session() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.txt");
        let script = format!(
            "create 5\ntoggle 2 1\ntoggle 2 2\ntoggle 2 3\nstep\nsave {}\nclear\n\
             load {}\nshift down\nbogus\nquit\nstep\n",
            path.display(),
            path.display()
        );

        let mut settings = Settings::default();
        settings.board.default_side = 3;
        let prompter = TerminalPrompter::new(Cursor::new(script.into_bytes()), Vec::new());
        let mut session = Session::with_settings(prompter, &settings);
        repl(&mut session, &settings).unwrap();

        assert_eq!(session.board().side(), 5);
        assert_eq!(session.board().generation(), 0);
        assert_eq!(session.board().alive_cells(), vec![(2, 2), (3, 2), (4, 2)]);
        assert!(path.exists());
    }

    fn run_options(state: Option<PathBuf>, save: Option<PathBuf>) -> RunOptions {
        RunOptions {
            state,
            generations: 1,
            play: false,
            max_ticks: 0,
            assume: Answer::Yes,
            save,
        }
    }

    #[test]
    fn test_run_reports_missing_state_once() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let err = run_command(
            temp_dir.path().join("none.yaml"),
            CliOverrides::default(),
            run_options(Some(missing.clone()), None),
        )
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to load state from"));
        assert!(message.contains(&missing.display().to_string()));
        assert!(err.downcast_ref::<BoardError>().is_some());
    }

    #[test]
    fn test_run_reports_save_failure() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("no/such/dir/out.txt");

        let err = run_command(
            temp_dir.path().join("none.yaml"),
            CliOverrides::default(),
            run_options(None, Some(target.clone())),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).starts_with("Failed to save state to"));
        assert!(!target.exists());
    }
}
