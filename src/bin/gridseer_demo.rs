//! Demo driver: generates a random scenario and runs one session to
//! win, loss, or the turn cap, rendering each step.
//!
//! ```text
//! cargo run --features demo --bin gridseer-demo [seed]
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use gridseer::{Board, Outcome, ScenarioConfig, SeerResult, Session};

fn main() -> SeerResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = ScenarioConfig::default();
    let mut board = Board::generate(config, &mut rng)?;
    let mut session = Session::new(board.dims());
    let turn_cap = (board.dims().cell_count() * 4) as u64;

    println!("session {}", session.id());
    print!("{board}");

    loop {
        let position = board.agent_position();
        let percepts = board.current_percepts();
        let mv = session.next_move(position, percepts)?;
        let outcome = board.apply(mv)?;
        println!(
            "turn {:>3}: {} {} -> {}",
            session.turns(),
            position,
            mv,
            outcome
        );
        match outcome {
            Outcome::Continue => {}
            Outcome::Win => {
                println!("reached the goal in {} turns", session.turns());
                break;
            }
            Outcome::Loss => {
                println!("stepped onto a hazard after {} turns", session.turns());
                break;
            }
        }
        if session.turns() >= turn_cap {
            println!("turn cap of {turn_cap} reached, giving up");
            break;
        }
    }

    println!("knowledge at session end:");
    print!("{}", session.report());
    Ok(())
}
