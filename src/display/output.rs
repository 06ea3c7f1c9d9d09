use crate::analysis::champion_stats::ParticipantStat;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    result: String,
    #[tabled(rename = "K/D/A")]
    kda: String,
}

// Status lines go to stderr; stdout only ever carries the report.
pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

pub fn match_history_table(history: &[ParticipantStat]) -> String {
    let rows: Vec<MatchRow> = history
        .iter()
        .enumerate()
        .map(|(idx, game)| MatchRow {
            number: format!("{}", idx + 1),
            champion: game.champion_name.clone(),
            result: if game.win {
                "WIN".green().to_string()
            } else {
                "LOSS".red().to_string()
            },
            kda: format!("{}/{}/{}", game.kills, game.deaths, game.assists),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn display_match_history(history: &[ParticipantStat]) {
    let wins = history.iter().filter(|g| g.win).count();

    println!(
        "\n{}",
        format!("📊 MATCH HISTORY (Last {} Games)", history.len())
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "{} {} W / {} L\n",
        "📈 Overall:".bold(),
        wins.to_string().green(),
        (history.len() - wins).to_string().red()
    );
    println!("{}\n", match_history_table(history));
}
