//! Plays simulated games with the deduction engine and reports how far
//! certainty alone carries them.

use clap::Parser;
use minesweeper_core::sim::{Game, GameStatus};
use minesweeper_core::{Action, Position, Solver};
use rand::Rng;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(
    name = "minesweeper",
    about = "Play simulated minesweeper games using only proven moves"
)]
struct Args {
    /// Board height.
    #[arg(long, default_value_t = 16)]
    height: usize,
    /// Board width.
    #[arg(long, default_value_t = 30)]
    width: usize,
    /// Number of mines.
    #[arg(long, default_value_t = 99)]
    mines: usize,
    /// Number of games to play.
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Base RNG seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Won,
    /// No certain move left; finishing would require a guess.
    Stalled,
    /// Only reachable if a snapshot turns out contradictory.
    Aborted,
}

fn play_one(args: &Args, seed: u64) -> (Outcome, usize) {
    let mut game = Game::from_seed(args.height, args.width, args.mines, seed);
    let solver = Solver::new();
    let mut opened_actions = 0usize;

    let start = Position::new(args.height / 2, args.width / 2);
    let mut status = game.open(start);

    while status == GameStatus::InProgress {
        let actions = match solver.solve(game.board()) {
            Ok(actions) => actions,
            Err(err) => {
                error!(%err, seed, "solver rejected a simulated snapshot");
                return (Outcome::Aborted, opened_actions);
            }
        };
        if actions.is_empty() {
            return (Outcome::Stalled, opened_actions);
        }
        for action in actions {
            match action {
                Action::Open(pos) => {
                    opened_actions += 1;
                    status = game.open(pos);
                }
                Action::Flag(pos) => game.flag(pos),
            }
            if status != GameStatus::InProgress {
                break;
            }
        }
    }

    match status {
        GameStatus::Won => (Outcome::Won, opened_actions),
        // The solver only opens proven-safe cells, so a loss would be a
        // soundness bug; surface it loudly.
        GameStatus::Lost => {
            error!(seed, "solver opened a mine");
            (Outcome::Aborted, opened_actions)
        }
        GameStatus::InProgress => unreachable!(),
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let base_seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        height = args.height,
        width = args.width,
        mines = args.mines,
        games = args.games,
        base_seed,
        "starting simulation run"
    );

    let mut won = 0usize;
    let mut stalled = 0usize;
    let mut aborted = 0usize;
    let mut total_opens = 0usize;
    for i in 0..args.games {
        let (outcome, opens) = play_one(&args, base_seed.wrapping_add(i as u64));
        debug!(game = i, ?outcome, opens, "game finished");
        total_opens += opens;
        match outcome {
            Outcome::Won => won += 1,
            Outcome::Stalled => stalled += 1,
            Outcome::Aborted => aborted += 1,
        }
    }

    let played = args.games.max(1);
    println!("games:   {}", args.games);
    println!("won:     {won}");
    println!("stalled: {stalled}");
    if aborted > 0 {
        println!("aborted: {aborted}");
    }
    println!("avg proven opens per game: {:.1}", total_opens as f64 / played as f64);
}
