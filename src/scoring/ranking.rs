use tracing::debug;

use super::aggregate::aggregate_detail;
use crate::model::{Score, Team};

/// Teams taken from each domain unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// A team with its aggregated score, before ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredTeam<'a> {
    pub team: &'a Team,
    pub average_score: f64,
    /// Finalized scores counted in the average (0 = not scored yet)
    pub scores_received: usize,
}

impl ScoredTeam<'_> {
    pub fn is_scored(&self) -> bool {
        self.scores_received > 0
    }
}

/// A team with its position on a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTeam<'a> {
    pub team: &'a Team,
    pub average_score: f64,
    pub scores_received: usize,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainRanking<'a> {
    pub domain: String,
    pub entries: Vec<RankedTeam<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    pub top_n: usize,
    /// Rank teams without finalized scores too, at 0.0
    pub show_unscored: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            show_unscored: false,
        }
    }
}

/// Aggregate every team, keeping input order. Unscored teams are included
/// with `scores_received == 0`.
pub fn score_teams<'a, I>(teams: I, scores: &[Score]) -> Vec<ScoredTeam<'a>>
where
    I: IntoIterator<Item = &'a Team>,
{
    teams
        .into_iter()
        .map(|team| match aggregate_detail(&team.id, scores) {
            Some(agg) => ScoredTeam {
                team,
                average_score: agg.average,
                scores_received: agg.count,
            },
            None => ScoredTeam {
                team,
                average_score: 0.0,
                scores_received: 0,
            },
        })
        .collect()
}

/// Assign sequential ranks 1..K, highest average first.
///
/// Equal averages keep their input order and still get distinct ranks
/// (1, 2, 3 rather than 1, 1, 3). A team that scored 0 ranks above an
/// unscored one.
pub fn rank<'a>(scored: Vec<ScoredTeam<'a>>) -> Vec<RankedTeam<'a>> {
    let mut indexed: Vec<(usize, ScoredTeam<'a>)> = scored.into_iter().enumerate().collect();

    indexed.sort_by(|(ia, a), (ib, b)| {
        b.average_score
            .total_cmp(&a.average_score)
            .then_with(|| b.is_scored().cmp(&a.is_scored()))
            .then_with(|| ia.cmp(ib))
    });

    indexed
        .into_iter()
        .enumerate()
        .map(|(pos, (_, s))| RankedTeam {
            team: s.team,
            average_score: s.average_score,
            scores_received: s.scores_received,
            rank: pos + 1,
        })
        .collect()
}

/// Rank a set of teams against each other regardless of domain.
pub fn leaderboard<'a, I>(teams: I, scores: &[Score], include_unscored: bool) -> Vec<RankedTeam<'a>>
where
    I: IntoIterator<Item = &'a Team>,
{
    let scored = score_teams(teams, scores)
        .into_iter()
        .filter(|s| include_unscored || s.is_scored())
        .collect();
    rank(scored)
}

/// Per-domain top-N rankings, domains in first-encountered order.
pub fn domain_rankings<'a, I>(
    teams: I,
    scores: &[Score],
    options: &RankingOptions,
) -> Vec<DomainRanking<'a>>
where
    I: IntoIterator<Item = &'a Team>,
{
    let mut groups: Vec<(String, Vec<&'a Team>)> = Vec::new();
    for team in teams {
        match groups.iter_mut().find(|(domain, _)| *domain == team.domain) {
            Some((_, members)) => members.push(team),
            None => groups.push((team.domain.clone(), vec![team])),
        }
    }

    groups
        .into_iter()
        .map(|(domain, members)| {
            let mut entries = leaderboard(members, scores, options.show_unscored);
            entries.truncate(options.top_n);
            debug!(
                domain = %domain,
                ranked = entries.len(),
                "computed domain ranking"
            );
            DomainRanking { domain, entries }
        })
        .collect()
}

/// Flattened top-`n` of every domain, ranked 1..n within each domain.
pub fn top_n_per_domain<'a, I>(teams: I, scores: &[Score], n: usize) -> Vec<RankedTeam<'a>>
where
    I: IntoIterator<Item = &'a Team>,
{
    top_n_per_domain_with(
        teams,
        scores,
        &RankingOptions {
            top_n: n,
            show_unscored: false,
        },
    )
}

pub fn top_n_per_domain_with<'a, I>(
    teams: I,
    scores: &[Score],
    options: &RankingOptions,
) -> Vec<RankedTeam<'a>>
where
    I: IntoIterator<Item = &'a Team>,
{
    domain_rankings(teams, scores, options)
        .into_iter()
        .flat_map(|r| r.entries)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{score, team};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn summary(entries: &[RankedTeam<'_>]) -> Vec<(String, usize)> {
        entries.iter().map(|e| (e.team.id.clone(), e.rank)).collect()
    }

    #[test]
    fn test_zero_score_ranks_above_unscored() {
        let teams = vec![team("idle", "Fintech"), team("zero", "Fintech"), team("top", "Fintech")];
        let scores = vec![score("zero", "j1", 0.0), score("top", "j1", 40.0)];

        let board = leaderboard(&teams, &scores, true);
        assert_eq!(
            summary(&board),
            vec![("top".to_string(), 1), ("zero".to_string(), 2), ("idle".to_string(), 3)]
        );
        assert_eq!(board[2].scores_received, 0);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let teams = vec![team("A", "Fintech"), team("B", "Fintech"), team("C", "Fintech")];
        let scores = vec![score("A", "j1", 88.0), score("B", "j1", 92.5), score("C", "j1", 92.5)];

        let top = top_n_per_domain(&teams, &scores, 3);
        assert_eq!(
            summary(&top),
            vec![("B".to_string(), 1), ("C".to_string(), 2), ("A".to_string(), 3)]
        );
        assert_eq!(top[0].average_score, 92.5);
    }

    #[test]
    fn test_truncates_each_domain() {
        let teams = vec![
            team("f1", "Fintech"),
            team("h1", "Health"),
            team("f2", "Fintech"),
            team("f3", "Fintech"),
            team("f4", "Fintech"),
            team("h2", "Health"),
        ];
        let scores = vec![
            score("f1", "j1", 10.0),
            score("f2", "j1", 40.0),
            score("f3", "j1", 30.0),
            score("f4", "j1", 20.0),
            score("h1", "j2", 5.0),
            score("h2", "j2", 50.0),
        ];

        let top = top_n_per_domain(&teams, &scores, 3);
        // Fintech seen first, so its slice comes first
        assert_eq!(
            summary(&top),
            vec![
                ("f2".to_string(), 1),
                ("f3".to_string(), 2),
                ("f4".to_string(), 3),
                ("h2".to_string(), 1),
                ("h1".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_unscored_teams_take_no_slot() {
        let teams = vec![team("a", "Edtech"), team("b", "Edtech"), team("c", "Edtech")];
        let scores = vec![score("a", "j1", 0.0), score("c", "j1", 12.0)];

        let top = top_n_per_domain(&teams, &scores, 3);
        assert_eq!(summary(&top), vec![("c".to_string(), 1), ("a".to_string(), 2)]);
        assert_eq!(top[1].average_score, 0.0);
        assert_eq!(top[1].scores_received, 1);
    }

    #[test]
    fn test_show_unscored_includes_unscored_teams() {
        let teams = vec![team("a", "Edtech"), team("b", "Edtech"), team("c", "Edtech")];
        let scores = vec![score("b", "j1", 0.0)];
        let options = RankingOptions {
            top_n: 3,
            show_unscored: true,
        };

        let top = top_n_per_domain_with(&teams, &scores, &options);
        assert_eq!(
            summary(&top),
            vec![("b".to_string(), 1), ("a".to_string(), 2), ("c".to_string(), 3)]
        );
        assert_eq!(top[0].scores_received, 1);
        assert_eq!(top[1].scores_received, 0);
    }

    #[test]
    fn test_domain_with_no_scores_is_empty() {
        let teams = vec![team("a", "Edtech"), team("b", "Agritech")];
        let scores = vec![score("a", "j1", 50.0)];

        let rankings = domain_rankings(&teams, &scores, &RankingOptions::default());
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[1].domain, "Agritech");
        assert!(rankings[1].entries.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let teams: Vec<Team> = vec![];
        assert!(top_n_per_domain(&teams, &[], 3).is_empty());
        assert!(rank(vec![]).is_empty());
    }

    #[test]
    fn test_rank_is_sequential_on_ties() {
        let teams = vec![team("a", "X"), team("b", "Y"), team("c", "Z"), team("d", "X")];
        let scores = vec![
            score("a", "j1", 70.0),
            score("b", "j1", 90.0),
            score("c", "j1", 90.0),
            score("d", "j1", 60.0),
        ];

        let ranked = rank(score_teams(&teams, &scores));
        assert_eq!(
            summary(&ranked),
            vec![
                ("b".to_string(), 1),
                ("c".to_string(), 2),
                ("a".to_string(), 3),
                ("d".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_top_n_is_idempotent() {
        let teams = vec![team("a", "X"), team("b", "X"), team("c", "Y"), team("d", "X")];
        let scores = vec![score("a", "j1", 5.0), score("b", "j1", 5.0), score("c", "j1", 7.0)];
        let first = top_n_per_domain(&teams, &scores, 2);
        let second = top_n_per_domain(&teams, &scores, 2);
        assert_eq!(first, second);
    }

    proptest! {
        /// Property: ranks are exactly 1..=K and scores never increase down the list.
        #[test]
        fn rank_is_total_and_ordered(totals in prop::collection::vec(0u32..100, 0..40)) {
            let teams: Vec<Team> = (0..totals.len())
                .map(|i| team(&format!("t{}", i), "Any"))
                .collect();
            let scores: Vec<Score> = totals
                .iter()
                .enumerate()
                .map(|(i, t)| score(&format!("t{}", i), "j1", *t as f64))
                .collect();

            let ranked = rank(score_teams(&teams, &scores));
            let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
            let expected: Vec<usize> = (1..=teams.len()).collect();
            prop_assert_eq!(ranks, expected);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].average_score >= pair[1].average_score);
            }
        }
    }
}
