use std::thread;
use std::time::Duration;

use clap::Parser;
use minesweeper_ai::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Autonomous minesweeper bot: plays proven-safe cells first, guesses otherwise.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of rows.
    #[arg(long, default_value_t = GameConfig::default().height)]
    height: usize,
    /// Number of columns.
    #[arg(long, default_value_t = GameConfig::default().width)]
    width: usize,
    /// Number of mines.
    #[arg(long, default_value_t = GameConfig::default().mines)]
    mines: usize,
    /// Seed for mine placement and guesses.
    #[arg(long)]
    seed: Option<u64>,
    /// Pause between moves, to make the game watchable.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
    /// Stop after this many moves.
    #[arg(long)]
    max_moves: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // --- 1. Initialization ---
    let config = GameConfig::new(args.height, args.width, args.mines);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new(config, &mut rng)?;
    let delay = Duration::from_millis(args.delay_ms);

    println!("--- Knowledge-Based Minesweeper Bot ---");
    println!("Strategy: Play cells proven safe, guess randomly otherwise.");
    println!("Initial Board:");
    print_board(&game);

    // --- 2. Game Loop ---
    let mut move_count = 0;
    while game.game_state == GameState::Playing {
        if args.max_moves.is_some_and(|max| move_count >= max) {
            println!("Reached the move limit.");
            break;
        }
        move_count += 1;
        println!("\n--- Move #{} ---", move_count);

        let safe = game.agent().make_safe_move().is_some();
        match game.step(&mut rng)? {
            Some(cell) => {
                if safe {
                    println!("Knowledge base proved {} safe.", cell);
                } else {
                    println!("No safe move known. Guessed {}.", cell);
                }
                print_board(&game);
            }
            None => {
                println!("No moves left for the bot to make.");
                break;
            }
        }

        thread::sleep(delay);
    }

    // --- 3. Final Result ---
    println!("\n--- Game Over ---");
    println!(
        "Known mines: {}, known safes: {}, sentences: {}",
        game.agent().mines().len(),
        game.agent().safes().len(),
        game.agent().sentences().len()
    );

    match game.game_state {
        GameState::Won => println!("Result: The bot won!"),
        GameState::Lost => println!("Result: The bot hit a mine and lost."),
        GameState::Playing => println!("Result: The game ended unexpectedly."),
    }

    Ok(())
}

fn print_board(game: &Game) {
    // Print header
    print!("   ");
    for col in 0..game.config.width {
        print!("{:^3}", col);
    }
    println!("\n  +{}", "---".repeat(game.config.width));

    // Print rows
    for (row, tiles) in game.tiles().iter().enumerate() {
        print!("{:^2}|", row);
        for (col, tile) in tiles.iter().enumerate() {
            let display = match tile {
                Tile::Hidden if game.is_flagged(Cell::new(row, col)) => " F ".to_string(),
                Tile::Hidden => " ■ ".to_string(),
                Tile::Revealed(n) => format!(" {} ", n),
            };
            print!("{}", display);
        }
        println!();
    }
    println!();
}
