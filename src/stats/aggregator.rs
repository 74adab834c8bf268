use std::collections::BTreeMap;

use super::models::{PlayerAggregate, PlayerStatLine};
use crate::event::{GameEvent, PlayerRef};

/// Folds an event log into per-player totals.
///
/// Nothing is cached: every call walks the whole log, which stays small for
/// a single game. All counters are sums, so the result does not depend on
/// event order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, log: &[GameEvent]) -> BTreeMap<PlayerRef, PlayerAggregate> {
        log.iter().fold(BTreeMap::new(), |mut totals, event| {
            totals
                .entry(event.player.clone())
                .or_insert_with(PlayerAggregate::default)
                .apply(&event.action);
            totals
        })
    }

    pub fn team_totals(&self, log: &[GameEvent]) -> PlayerAggregate {
        self.aggregate(log)
            .into_values()
            .fold(PlayerAggregate::default(), |mut team, line| {
                team += line;
                team
            })
    }

    /// Rows for the live table, highest scorer first, ties by name.
    pub fn stat_lines(&self, log: &[GameEvent]) -> Vec<PlayerStatLine> {
        let mut lines: Vec<PlayerStatLine> = self
            .aggregate(log)
            .into_iter()
            .map(|(player, totals)| PlayerStatLine::new(player, totals))
            .collect();

        lines.sort_by(|a, b| {
            b.totals
                .points
                .cmp(&a.totals.points)
                .then_with(|| a.player.display_name.cmp(&b.player.display_name))
        });
        lines
    }
}
