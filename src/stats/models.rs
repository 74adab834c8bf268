use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::event::{ActionKind, PlayerRef};

/// Box-score line for one player, folded from the event log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub points: u32,
    pub assists: u32,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
}

impl PlayerAggregate {
    pub fn apply(&mut self, action: &ActionKind) {
        self.points += action.point_value();

        match action {
            ActionKind::MadeShot => {
                self.field_goals_made += 1;
                self.field_goals_attempted += 1;
            }
            ActionKind::MissedShot => self.field_goals_attempted += 1,
            ActionKind::Assist => self.assists += 1,
            ActionKind::OffensiveRebound => {
                self.rebounds += 1;
                self.offensive_rebounds += 1;
            }
            ActionKind::DefensiveRebound => {
                self.rebounds += 1;
                self.defensive_rebounds += 1;
            }
            ActionKind::Steal => self.steals += 1,
            ActionKind::Block => self.blocks += 1,
            ActionKind::Turnover => self.turnovers += 1,
            ActionKind::Custom(_) => {}
        }
    }

    /// Field-goal percentage rounded to one decimal, `None` without attempts.
    pub fn field_goal_pct(&self) -> Option<f64> {
        if self.field_goals_attempted == 0 {
            return None;
        }
        let pct = self.field_goals_made as f64 / self.field_goals_attempted as f64 * 100.0;
        Some((pct * 10.0).round() / 10.0)
    }
}

impl AddAssign for PlayerAggregate {
    fn add_assign(&mut self, other: Self) {
        self.points += other.points;
        self.assists += other.assists;
        self.rebounds += other.rebounds;
        self.offensive_rebounds += other.offensive_rebounds;
        self.defensive_rebounds += other.defensive_rebounds;
        self.steals += other.steals;
        self.blocks += other.blocks;
        self.turnovers += other.turnovers;
        self.field_goals_made += other.field_goals_made;
        self.field_goals_attempted += other.field_goals_attempted;
    }
}

/// Display row for the live stats table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player: PlayerRef,
    #[serde(flatten)]
    pub totals: PlayerAggregate,
    pub field_goal_pct: Option<f64>,
}

impl PlayerStatLine {
    pub fn new(player: PlayerRef, totals: PlayerAggregate) -> Self {
        Self {
            field_goal_pct: totals.field_goal_pct(),
            player,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebounds_count_both_kinds() {
        let mut line = PlayerAggregate::default();
        line.apply(&ActionKind::OffensiveRebound);
        line.apply(&ActionKind::DefensiveRebound);
        line.apply(&ActionKind::DefensiveRebound);

        assert_eq!(line.rebounds, 3);
        assert_eq!(line.offensive_rebounds, 1);
        assert_eq!(line.defensive_rebounds, 2);
    }

    #[test]
    fn field_goal_pct_rounds_to_one_decimal() {
        let mut line = PlayerAggregate::default();
        assert_eq!(line.field_goal_pct(), None);

        line.apply(&ActionKind::MadeShot);
        line.apply(&ActionKind::MissedShot);
        line.apply(&ActionKind::MissedShot);

        assert_eq!(line.points, 2);
        assert_eq!(line.field_goal_pct(), Some(33.3));
    }

    #[test]
    fn custom_actions_change_nothing() {
        let mut line = PlayerAggregate::default();
        line.apply(&ActionKind::Custom("hustle".into()));
        assert_eq!(line, PlayerAggregate::default());
    }
}
