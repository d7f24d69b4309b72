use anyhow::Context;
use clap::Parser;
use minefill::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::Read;
use std::path::PathBuf;

/// Fills in mines so that every numbered tile sees the right count.
///
/// Reads a board (one row per line: digits are clues, `X` is a known mine,
/// anything else is open) and prints the completed board followed by its
/// remaining error.
#[derive(Parser, Debug)]
struct Cli {
    /// Board file to read. Reads stdin when omitted.
    input: Option<PathBuf>,
    /// Seed for the random generator; OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Iterations granted per cell of the board.
    #[arg(long, default_value_t = SolveOptions::ITERATIONS_PER_CELL)]
    iterations_per_cell: usize,
    /// Score history length as a fraction of the iteration budget.
    #[arg(long, default_value_t = SolveOptions::MEMORY_FRACTION)]
    memory_fraction: f64,
    /// Fixed iteration budget, overriding the per-cell scaling.
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Fixed score history length, overriding the fraction.
    #[arg(long)]
    memory_size: Option<usize>,
    /// Solve a freshly generated WIDTHxHEIGHT puzzle instead of reading one.
    #[arg(long, value_parser = parse_size, conflicts_with = "input")]
    random: Option<(usize, usize)>,
    /// Mine probability per tile for --random.
    #[arg(long, default_value_t = 0.1, value_parser = parse_density)]
    density: f64,
}

fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let w = w.trim().parse().map_err(|e| format!("width: {}", e))?;
    let h = h.trim().parse().map_err(|e| format!("height: {}", e))?;
    Ok((w, h))
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.trim().parse().map_err(|e| format!("density: {}", e))?;
    if !(0.0..=1.0).contains(&density) {
        return Err(format!("density must be within 0..=1, got {}", s));
    }
    Ok(density)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    // --- 1. Read the board ---
    let board = match cli.random {
        Some((width, height)) => {
            let puzzle = random_puzzle(width, height, cli.density, &mut rng);
            eprintln!(
                "Generated {}x{} puzzle with {} mines.",
                width,
                height,
                puzzle.mine_count()
            );
            eprint!("{}", puzzle.board);
            puzzle.board
        }
        None => {
            let text = match &cli.input {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    std::io::stdin()
                        .read_to_string(&mut text)
                        .context("reading stdin")?;
                    text
                }
            };
            Board::parse(&text)?
        }
    };

    // --- 2. Build the constraint graph and pick a budget ---
    let mut graph = Graph::from_board(&board);
    let scaled = SolveOptions::scaled(
        graph.cells.len(),
        cli.iterations_per_cell,
        cli.memory_fraction,
    );
    let options = SolveOptions {
        max_iterations: cli.max_iterations.unwrap_or(scaled.max_iterations),
        score_memory_size: cli.memory_size.unwrap_or(scaled.score_memory_size),
    };

    eprintln!(
        "Board {}x{}: {} clues, {} cells.",
        graph.width,
        graph.height,
        graph.clues.len(),
        graph.cells.len()
    );
    eprintln!(
        "Budget: {} iterations, score memory {}.",
        options.max_iterations, options.score_memory_size
    );

    // --- 3. Search ---
    let report = solve(&mut graph, options, &mut rng)?;
    eprintln!(
        "Initial score {}, stopped after {} iterations: {:?}.",
        report.initial_score, report.iterations, report.termination
    );

    // --- 4. Result ---
    print!("{}", graph);
    println!("---");
    println!("LAHC score: {}", graph.error_score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("30x20"), Ok((30, 20)));
        assert_eq!(parse_size("4X5"), Ok((4, 5)));
        assert!(parse_size("30").is_err());
        assert!(parse_size("ax3").is_err());
    }

    #[test]
    fn test_parse_density() {
        assert_eq!(parse_density("0.25"), Ok(0.25));
        assert_eq!(parse_density("1"), Ok(1.0));
        assert!(parse_density("nan").is_err());
        assert!(parse_density("inf").is_err());
        assert!(parse_density("-0.1").is_err());
        assert!(parse_density("1.5").is_err());
        assert!(parse_density("lots").is_err());

        assert!(Cli::try_parse_from(["minefill", "--random", "4x4", "--density", "NaN"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["minefill", "--seed", "3", "--random", "10x8"]);
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.random, Some((10, 8)));
        assert_eq!(cli.iterations_per_cell, 50);
        assert!(cli.input.is_none());
    }
}
