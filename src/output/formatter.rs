use std::io::IsTerminal;
use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::allocation::Allocation;
use crate::model::{QualificationStatus, Team};
use crate::scoring::{DomainRanking, RankedTeam, ScoringProgress};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an average to two decimals, or "-" for a team nobody has scored
pub fn format_score(average: f64, scores_received: usize) -> String {
    if scores_received == 0 {
        "-".to_string()
    } else {
        format!("{:.2}", average)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked teams as a table with columns: Rank, Score, Judges, Team, Domain
/// Rank column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 7 chars wide (fits "9999.99")
pub fn format_ranked_table(entries: &[RankedTeam<'_>], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No scored teams.".to_string();
    }

    let term_width = get_terminal_width();
    let score_width = 7;
    let separator = "  ";

    entries
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>2}.", entry.rank);
            let score_str = format_score(entry.average_score, entry.scores_received);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let judges_str = format!("({})", entry.scores_received);

            let fixed_width = rank_str.len()
                + 1
                + score_width
                + separator.len() * 3
                + judges_str.len()
                + entry.team.domain.chars().count();

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&entry.team.team_name, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&entry.team.team_name, 20),
                // No terminal (pipe), don't truncate
                None => entry.team.team_name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    rank_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    judges_str.dimmed(),
                    separator,
                    name,
                    separator,
                    entry.team.domain.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    rank_str,
                    score_padded,
                    separator,
                    judges_str,
                    separator,
                    name,
                    separator,
                    entry.team.domain
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format per-domain rankings, one block per domain
pub fn format_domain_rankings(rankings: &[DomainRanking<'_>], use_colors: bool) -> String {
    if rankings.is_empty() {
        return "No teams found.".to_string();
    }

    rankings
        .iter()
        .map(|ranking| {
            let header = if use_colors {
                ranking.domain.bold().to_string()
            } else {
                ranking.domain.clone()
            };
            let body = format_ranked_table(&ranking.entries, use_colors)
                .lines()
                .map(|line| format!("  {}", line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", header, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a cohort as one line per team: "{index}. {name} | {domain} | {id}"
pub fn format_cohort(teams: &[&Team], use_colors: bool) -> String {
    if teams.is_empty() {
        return "No teams qualify yet.".to_string();
    }

    teams
        .iter()
        .enumerate()
        .map(|(idx, team)| {
            if use_colors {
                format!(
                    "{:>2}. {} | {} | {}",
                    idx + 1,
                    team.team_name.bold(),
                    team.domain.cyan(),
                    team.id.dimmed()
                )
            } else {
                format!("{:>2}. {} | {} | {}", idx + 1, team.team_name, team.domain, team.id)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format qualification statuses: "{name}: {status}"
pub fn format_statuses(statuses: &[(&Team, QualificationStatus)], use_colors: bool) -> String {
    statuses
        .iter()
        .map(|(team, status)| {
            let status_str = format!("{:?}", status);
            if use_colors {
                let colored = match status {
                    QualificationStatus::Winner => status_str.yellow().bold().to_string(),
                    QualificationStatus::Qualified => status_str.green().to_string(),
                    QualificationStatus::Eliminated => status_str.red().to_string(),
                    QualificationStatus::Pending => status_str.dimmed().to_string(),
                };
                format!("{}: {}", team.team_name, colored)
            } else {
                format!("{}: {}", team.team_name, status_str)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format an allocation per judge: "{judge}: {team}, {team} ({n})"
///
/// Team ids are shown as names when the team is found in `teams`.
pub fn format_allocation(allocation: &Allocation, teams: &[Team], use_colors: bool) -> String {
    let header = format!("{} ({:?})", allocation.round, allocation.mode);
    let name_of = |id: &str| {
        teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.team_name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let lines = allocation
        .judge_load()
        .into_iter()
        .map(|(judge_id, load)| {
            let names = allocation
                .teams_for(judge_id)
                .into_iter()
                .map(&name_of)
                .collect::<Vec<_>>()
                .join(", ");
            if use_colors {
                format!("  {}: {} ({})", judge_id.bold(), names, load.dimmed())
            } else {
                format!("  {}: {} ({})", judge_id, names, load)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", header, lines)
}

/// Format scoring progress: "Round 1: 8/10 teams scored (waiting on: a, b)"
pub fn format_progress(progress: &ScoringProgress) -> String {
    let base = format!(
        "{}: {}/{} teams scored",
        progress.round, progress.scored_teams, progress.total_teams
    );
    if progress.is_complete() {
        base
    } else {
        format!("{} (waiting on: {})", base, progress.unscored.join(", "))
    }
}

/// Format ranked teams as tab-separated values for scripting
/// Columns: rank, score, scores received, team id, team name, domain (no headers, no colors)
pub fn format_tsv(entries: &[RankedTeam<'_>]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{:.2}\t{}\t{}\t{}\t{}",
                entry.rank,
                entry.average_score,
                entry.scores_received,
                entry.team.id,
                entry.team.team_name,
                entry.team.domain
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use crate::model::Round;
    use crate::test_support::team;

    fn entry(
        team: &Team,
        rank: usize,
        average_score: f64,
        scores_received: usize,
    ) -> RankedTeam<'_> {
        RankedTeam {
            team,
            average_score,
            scores_received,
            rank,
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(92.5, 3), "92.50");
        assert_eq!(format_score(0.0, 1), "0.00");
        assert_eq!(format_score(0.0, 0), "-");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("This is a very long name", 15), "This is a ve...");
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_ranked_table_empty() {
        assert_eq!(format_ranked_table(&[], false), "No scored teams.");
    }

    #[test]
    fn test_format_ranked_table_rows() {
        let a = team("a", "Fintech");
        let b = team("b", "Fintech");
        let entries = vec![entry(&b, 1, 92.5, 3), entry(&a, 2, 88.0, 2)];
        let result = format_ranked_table(&entries, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("  92.50"));
        assert!(lines[0].contains("(3)"));
        assert!(lines[0].contains("Team b"));
        assert!(lines[1].contains("88.00"));
    }

    #[test]
    fn test_format_domain_rankings_blocks() {
        let a = team("a", "Fintech");
        let rankings = vec![
            DomainRanking {
                domain: "Fintech".to_string(),
                entries: vec![entry(&a, 1, 70.0, 1)],
            },
            DomainRanking {
                domain: "Health".to_string(),
                entries: vec![],
            },
        ];
        let result = format_domain_rankings(&rankings, false);
        assert!(result.starts_with("Fintech\n   1."));
        assert!(result.contains("Health\n  No scored teams."));
    }

    #[test]
    fn test_format_cohort() {
        let a = team("a", "Fintech");
        let b = team("b", "Health");
        let result = format_cohort(&[&a, &b], false);
        assert_eq!(result, " 1. Team a | Fintech | a\n 2. Team b | Health | b");
        assert_eq!(format_cohort(&[], false), "No teams qualify yet.");
    }

    #[test]
    fn test_format_statuses() {
        let a = team("a", "Fintech");
        let result = format_statuses(&[(&a, QualificationStatus::Winner)], false);
        assert_eq!(result, "Team a: Winner");
    }

    #[test]
    fn test_format_allocation_by_judge() {
        let teams: Vec<Team> = (1..=3).map(|i| team(&format!("T{}", i), "Fintech")).collect();
        let judges = vec!["J1".to_string(), "J2".to_string()];
        let allocation = allocate(&teams, &judges, Round::One).unwrap();

        let result = format_allocation(&allocation, &teams, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "Round 1 (RoundRobin)");
        assert_eq!(lines[1], "  J1: Team T1, Team T3 (2)");
        assert_eq!(lines[2], "  J2: Team T2 (1)");
    }

    #[test]
    fn test_format_progress() {
        let progress = ScoringProgress {
            round: Round::One,
            total_teams: 3,
            scored_teams: 1,
            unscored: vec!["b".to_string(), "c".to_string()],
        };
        assert_eq!(
            format_progress(&progress),
            "Round 1: 1/3 teams scored (waiting on: b, c)"
        );
    }

    #[test]
    fn test_format_tsv() {
        let a = team("a", "Fintech");
        let result = format_tsv(&[entry(&a, 1, 85.5, 2)]);
        assert_eq!(result, "1\t85.50\t2\ta\tTeam a\tFintech");
        assert_eq!(result.split('\t').count(), 6);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::hours(3)), "3h");
        assert_eq!(format_age(Duration::days(2)), "2d");
        assert_eq!(format_age(Duration::weeks(2)), "2w");
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }
}
