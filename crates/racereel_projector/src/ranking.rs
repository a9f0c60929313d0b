//! Leaderboard ranking keys.
//!
//! A ranking key orders the competitors of one frame. Each frame is ranked
//! on its own snapshots, so overtakes between frames show up immediately.
//! Ties always fall back to competitor id order, which keeps every frame's
//! leaderboard deterministic.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use racereel_foundation::{CompetitorId, ConfigIssue, Error, RaceTime, Result, Standing};

use crate::frame::CompetitorSnapshot;

/// Comparator used by [`RankingKey::Custom`]. `Less` ranks ahead.
pub type Comparator = dyn Fn(&CompetitorSnapshot, &CompetitorSnapshot) -> Ordering + Send + Sync;

/// Rule ordering competitors on the leaderboard.
#[derive(Clone, Default)]
pub enum RankingKey {
    /// Most laps first, then furthest along the track.
    #[default]
    Distance,
    /// Smallest position value first, for sources that record rank as the
    /// position itself.
    Rank,
    /// Recorded standings, forward-filled to each frame.
    Standings,
    /// A caller-supplied comparator.
    Custom {
        /// Name shown in logs.
        name: String,
        /// The comparison.
        compare: Arc<Comparator>,
    },
}

impl RankingKey {
    /// Looks up a built-in key by name: `distance`, `rank`, or `standings`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "distance" | "progress" => Ok(Self::Distance),
            "rank" | "position" => Ok(Self::Rank),
            "standings" | "leaderboard" => Ok(Self::Standings),
            _ => Err(Error::configuration(ConfigIssue::UnknownRankingKey(
                name.to_string(),
            ))),
        }
    }

    /// Creates a custom key.
    #[must_use]
    pub fn custom(
        name: impl Into<String>,
        compare: impl Fn(&CompetitorSnapshot, &CompetitorSnapshot) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self::Custom {
            name: name.into(),
            compare: Arc::new(compare),
        }
    }

    /// Returns the key's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Distance => "distance",
            Self::Rank => "rank",
            Self::Standings => "standings",
            Self::Custom { name, .. } => name,
        }
    }

    /// Assigns ranks to `snapshots` in place.
    ///
    /// Competitors without a position stay unranked, as do competitors
    /// without a recorded standing under [`RankingKey::Standings`].
    pub(crate) fn assign(
        &self,
        snapshots: &mut [CompetitorSnapshot],
        time: RaceTime,
        standings: &StandingsBoard,
    ) {
        let recorded: HashMap<CompetitorId, u32> = match self {
            Self::Standings => snapshots
                .iter()
                .filter_map(|s| {
                    let rank = standings.rank_at(&s.competitor, time)?;
                    Some((s.competitor.clone(), rank))
                })
                .collect(),
            _ => HashMap::new(),
        };

        let mut order: Vec<usize> = (0..snapshots.len())
            .filter(|&i| {
                let s = &snapshots[i];
                s.position.is_some()
                    && (!matches!(self, Self::Standings) || recorded.contains_key(&s.competitor))
            })
            .collect();

        order.sort_by(|&a, &b| {
            let (sa, sb) = (&snapshots[a], &snapshots[b]);
            let primary = match self {
                Self::Distance => by_distance(sa, sb),
                Self::Rank => by_position_value(sa, sb),
                Self::Standings => recorded[&sa.competitor].cmp(&recorded[&sb.competitor]),
                Self::Custom { compare, .. } => compare(sa, sb),
            };
            primary.then_with(|| sa.competitor.cmp(&sb.competitor))
        });

        for snapshot in snapshots.iter_mut() {
            snapshot.rank = None;
        }
        for (i, rank) in order.into_iter().zip(1u32..) {
            snapshots[i].rank = Some(rank);
        }
    }
}

impl fmt::Debug for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { name, .. } => write!(f, "Custom({name})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

fn by_distance(a: &CompetitorSnapshot, b: &CompetitorSnapshot) -> Ordering {
    let laps = b.lap.cmp(&a.lap);
    laps.then_with(|| match (a.progress, b.progress) {
        (Some(pa), Some(pb)) => pb.total_cmp(&pa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

fn by_position_value(a: &CompetitorSnapshot, b: &CompetitorSnapshot) -> Ordering {
    match (a.position, b.position) {
        (Some(pa), Some(pb)) => pa.x().total_cmp(&pb.x()),
        _ => Ordering::Equal,
    }
}

/// Recorded standings, queryable at any time.
#[derive(Clone, Debug, Default)]
pub struct StandingsBoard {
    ranks: HashMap<CompetitorId, Vec<(RaceTime, u32)>>,
}

impl StandingsBoard {
    /// Indexes standings by competitor.
    #[must_use]
    pub fn new(standings: impl IntoIterator<Item = Standing>) -> Self {
        let mut ranks: HashMap<CompetitorId, Vec<(RaceTime, u32)>> = HashMap::new();
        for standing in standings {
            ranks
                .entry(standing.competitor)
                .or_default()
                .push((standing.time, standing.rank));
        }
        for history in ranks.values_mut() {
            history.sort_by_key(|(time, _)| *time);
        }
        Self { ranks }
    }

    /// Returns whether no standings were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Returns the latest recorded rank at or before `time`.
    #[must_use]
    pub fn rank_at(&self, competitor: &CompetitorId, time: RaceTime) -> Option<u32> {
        let history = self.ranks.get(competitor)?;
        let upto = history.partition_point(|(t, _)| *t <= time);
        upto.checked_sub(1).map(|i| history[i].1)
    }
}
