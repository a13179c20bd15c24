//! Console front end for the potion maker.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use battle_core::{
    BattleEvent, ConfigError, EventSink, GameConfig, GameSession, PlayerAction, Purchase,
    SessionError, Target,
};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_CONFIG: &str = "potionmaker.toml";

#[derive(Parser)]
#[command(name = "potionmaker")]
#[command(about = "Brew potions, throw them at fiends, survive the stages")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible run (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
    /// Player name (overrides the config)
    #[arg(long)]
    name: Option<String>,
    /// Write every event as a JSON line to this file
    #[arg(long)]
    transcript: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "potionmaker stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let mut config = if path.exists() {
        GameConfig::load(&path)?
    } else {
        if cli.config.is_some() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
        }
        GameConfig::default()
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(name) = &cli.name {
        config.player.name = name.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let mut narrator = Narrator::new(cli.transcript.as_deref())?;
    let mut console = Console::new();

    let mut session = GameSession::new(&config)?;
    if let Some(seed) = session.seed() {
        println!("(seed {})", seed);
    }
    println!("Welcome, {}. Your satchel holds a few ingredients.", session.player().name());

    while !session.is_over() {
        println!();
        println!(
            "== Stage {} == {} | Gold: {:.2}",
            session.stage(),
            session.player().entity.pretty(),
            session.player().gold()
        );
        let Some(choice) = console.choose("What now?", &["Fight", "Shop", "Inventory", "Quit"])?
        else {
            break;
        };
        let keep_going = match choice {
            0 => fight(&mut session, &mut console, &mut narrator)?,
            1 => shop(&mut session, &mut console)?,
            2 => {
                print_inventory(&session);
                true
            }
            _ => false,
        };
        if !keep_going {
            break;
        }
    }

    println!("You reached stage {}. Farewell.", session.stage());
    narrator.flush()?;
    Ok(())
}

/// Returns `false` when input ran out.
fn fight(
    session: &mut GameSession,
    console: &mut Console,
    narrator: &mut Narrator,
) -> Result<bool, CliError> {
    let mut encounter = session.start_battle(narrator)?;

    while !encounter.is_over() {
        println!();
        println!("You: {}", encounter.player().entity.pretty());
        for (index, enemy) in encounter.battle().roster().iter().enumerate() {
            println!("  [{}] {}", index + 1, enemy.entity.pretty());
        }

        let Some(choice) = console.choose(
            "Your move",
            &["Throw a potion", "Basic attack", "Inspect", "Surrender"],
        )?
        else {
            return Ok(false);
        };

        let enemies: Vec<_> = encounter
            .battle()
            .roster()
            .iter()
            .map(|e| (e.entity.id, e.to_string()))
            .collect();
        let enemy_labels: Vec<&str> = enemies.iter().map(|(_, label)| label.as_str()).collect();

        let action = match choice {
            0 => {
                let Some(ingredients) = select_ingredients(console, encounter.player())? else {
                    return Ok(false);
                };
                let mut labels = vec!["Yourself"];
                labels.extend(enemy_labels.iter().copied());
                let Some(pick) = console.choose("Throw it at", &labels)? else {
                    return Ok(false);
                };
                let target = match pick {
                    0 => Target::Player,
                    n => Target::Enemy(enemies[n - 1].0),
                };
                PlayerAction::Potion {
                    ingredients,
                    target,
                }
            }
            1 => {
                let Some(pick) = console.choose("Attack whom?", &enemy_labels)? else {
                    return Ok(false);
                };
                PlayerAction::Attack {
                    target: enemies[pick].0,
                }
            }
            2 => {
                let mut labels = vec!["Yourself"];
                labels.extend(enemy_labels.iter().copied());
                let Some(pick) = console.choose("Inspect whom?", &labels)? else {
                    return Ok(false);
                };
                let text = match pick {
                    0 => encounter.player().entity.inspection(),
                    n => encounter.battle().roster()[n - 1].entity.inspection(),
                };
                println!("{}", text);
                continue;
            }
            _ => PlayerAction::Surrender,
        };

        encounter.play_round(action, narrator)?;
    }
    Ok(true)
}

/// Multi-select from the satchel. `Some(vec![])` is an empty flask.
fn select_ingredients(
    console: &mut Console,
    player: &potion_rules::Player,
) -> io::Result<Option<Vec<usize>>> {
    let mut chosen: Vec<usize> = Vec::new();
    loop {
        let remaining: Vec<usize> = (0..player.ingredients().len())
            .filter(|i| !chosen.contains(i))
            .collect();
        let mut labels: Vec<String> = vec!["Done brewing".to_string()];
        labels.extend(
            remaining
                .iter()
                .map(|&i| player.ingredients()[i].to_string()),
        );
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

        let Some(pick) = console.choose("Add an ingredient", &labels)? else {
            return Ok(None);
        };
        if pick == 0 {
            return Ok(Some(chosen));
        }
        chosen.push(remaining[pick - 1]);
    }
}

fn shop(session: &mut GameSession, console: &mut Console) -> Result<bool, CliError> {
    loop {
        println!();
        println!("Gold: {:.2}", session.player().gold());
        let mut labels = vec!["Leave".to_string()];
        labels.extend(session.shop().items().iter().map(|item| item.to_string()));
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

        let Some(pick) = console.choose("The shopkeeper waits", &labels)? else {
            return Ok(false);
        };
        if pick == 0 {
            return Ok(true);
        }
        match session.buy(pick - 1)? {
            Purchase::Bought { name, price } => {
                println!("You bought {} for {:.2} gold.", name, price)
            }
            Purchase::NotEnoughGold { price, gold } => {
                println!("That costs {:.2} gold, you have {:.2}.", price, gold)
            }
        }
    }
}

fn print_inventory(session: &GameSession) {
    let player = session.player();
    println!("{}", player.entity.inspection());
    if player.ingredients().is_empty() {
        println!("Your satchel is empty.");
    }
    for ingredient in player.ingredients() {
        println!("{}", ingredient.describe());
    }
}

/// Prints narration and optionally records it.
struct Narrator {
    transcript: Option<BufWriter<File>>,
}

impl Narrator {
    fn new(path: Option<&Path>) -> io::Result<Self> {
        let transcript = match path {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };
        Ok(Self { transcript })
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(out) = &mut self.transcript {
            out.flush()?;
        }
        Ok(())
    }
}

impl EventSink for Narrator {
    fn emit(&mut self, event: BattleEvent) {
        println!("{}", event);
        if let Some(out) = &mut self.transcript {
            let written = serde_json::to_string(&event)
                .map_err(io::Error::from)
                .and_then(|line| writeln!(out, "{}", line));
            if let Err(err) = written {
                tracing::warn!(%err, "transcript write failed");
            }
        }
    }
}

/// Line-based menu input, validated into range before the engine sees it.
struct Console {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    /// Ask until a valid option number arrives. `None` on end of input.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> io::Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        loop {
            println!("{}", prompt);
            for (index, option) in options.iter().enumerate() {
                println!("  {}) {}", index + 1, option);
            }
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = self.lines.next().transpose()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => println!("Pick a number from 1 to {}.", options.len()),
            }
        }
    }
}
