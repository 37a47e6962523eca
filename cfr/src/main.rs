use clap::{
    Parser,
    ValueEnum,
};
use log::{
    info,
    warn,
};

use cfr::{
    games::{
        self,
        dudo::Dudo,
        kuhn::Kuhn,
    },
    report,
    Trainer,
    TrainingArgs,
};

#[derive(Parser)]
struct AppArgs {
    #[clap(long, short, value_enum)]
    game: Game,

    /// Number of cards in the Kuhn poker deck.
    #[clap(long, value_parser, default_value_t = 3)]
    cards: u8,

    /// Number of faces on a Dudo die.
    #[clap(long, value_parser, default_value_t = 6)]
    sides: u8,

    #[clap(flatten)]
    training_args: TrainingArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Game {
    Kuhn,
    Dudo,
}

fn run<G: games::Game>(game: G, args: &TrainingArgs) -> anyhow::Result<()> {
    let mut trainer = Trainer::new(game, args.seed);
    trainer.train(args.iterations)?;

    let profile = trainer.average_strategy();
    match &args.output {
        Some(path) => match report::save_report(trainer.game(), &profile, path) {
            Ok(()) => info!("Saved {} strategies to {:?}", profile.len(), path),
            Err(err) => warn!("Could not save strategies: {:#}", err),
        },
        None => {
            info!("Strategies [");
            for line in report::render(trainer.game(), &profile).lines() {
                info!("    {}", line);
            }
            info!("]");
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize env_logger with a default log level of INFO.
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args = AppArgs::parse();
    match args.game {
        Game::Kuhn => run(Kuhn::new(args.cards)?, &args.training_args),
        Game::Dudo => run(Dudo::new(args.sides)?, &args.training_args),
    }
}
