use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::Path,
};

use anyhow::Context;
use itertools::Itertools;

use crate::{
    games::Game,
    profile::StrategyProfile,
};

/// Actions played less often than this are left out of the report.
pub const PROBABILITY_THRESHOLD: f64 = 0.001;

/// Renders one block per information set:
///
/// ```text
/// Roll: 3 | History: 1*2,1*4
///     Strategy: 1x6: 12.50%, Dudo: 87.50%
///
/// ```
pub fn render<G: Game>(game: &G, profile: &StrategyProfile<G>) -> String {
    let mut out = String::new();
    for entry in profile.entries() {
        let strategy = entry
            .actions
            .iter()
            .zip(&entry.probabilities)
            .filter(|(_, prob)| **prob > PROBABILITY_THRESHOLD)
            .map(|(act, prob)| format!("{}: {:.2}%", act, prob * 100.0))
            .join(", ");
        out.push_str(&game.describe_info_set(&entry.key));
        out.push('\n');
        out.push_str("    Strategy: ");
        out.push_str(&strategy);
        out.push_str("\n\n");
    }
    out
}

pub fn write_report<G: Game, W: Write>(
    game: &G,
    profile: &StrategyProfile<G>,
    writer: &mut W,
) -> std::io::Result<()> {
    writer.write_all(render(game, profile).as_bytes())?;
    writer.flush()
}

pub fn save_report<G: Game>(
    game: &G,
    profile: &StrategyProfile<G>,
    path: &Path,
) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut w = BufWriter::new(f);
    write_report(game, profile, &mut w).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        games::{
            dudo::Dudo,
            kuhn::Kuhn,
        },
        Trainer,
    };

    #[test]
    fn test_render_format() {
        let game = Kuhn::default();
        let mut trainer = Trainer::new(game, 0);
        trainer.train(1).unwrap();
        let text = render(trainer.game(), &trainer.average_strategy());

        let blocks: Vec<&str> = text.split_terminator("\n\n").collect();
        assert_eq!(trainer.nodes().len(), blocks.len());
        for block in blocks {
            let lines: Vec<&str> = block.lines().collect();
            assert_eq!(2, lines.len());
            assert!(lines[0].starts_with("Card: "), "{}", block);
            assert!(lines[1].starts_with("    Strategy: "), "{}", block);
        }
        // A single walk plays uniformly everywhere.
        assert!(text.starts_with("Card: "));
        assert!(text.contains("    Strategy: Pass: 50.00%, Bet: 50.00%\n\n"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_render_skips_unlikely_actions() {
        let game = Dudo::default();
        let mut trainer = Trainer::new(game, 0);
        trainer.train(3).unwrap();
        let profile = trainer.average_strategy();
        let text = render(trainer.game(), &profile);

        assert!(text.contains("| History: (Start)\n"));
        let shown = text
            .lines()
            .filter(|l| l.starts_with("    Strategy: "))
            .map(|l| l.matches('%').count());
        for (count, entry) in shown.zip(profile.entries()) {
            let expected =
                entry.probabilities.iter().filter(|&&p| p > PROBABILITY_THRESHOLD).count();
            assert_eq!(expected, count);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let mut trainer = Trainer::new(Dudo::new(3).unwrap(), 9);
        trainer.train(200).unwrap();
        let first = render(trainer.game(), &trainer.average_strategy());
        let second = render(trainer.game(), &trainer.average_strategy());
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_report() {
        let mut trainer = Trainer::new(Kuhn::default(), 0);
        trainer.train(10).unwrap();
        let profile = trainer.average_strategy();

        let mut buf = vec![];
        write_report(trainer.game(), &profile, &mut buf).unwrap();
        assert_eq!(render(trainer.game(), &profile).into_bytes(), buf);
    }

    #[test]
    fn test_save_report_to_missing_directory_fails() {
        let trainer = Trainer::new(Kuhn::default(), 0);
        let path = Path::new("/nonexistent-directory/strategies.txt");
        assert!(save_report(trainer.game(), &trainer.average_strategy(), path).is_err());
    }
}
