//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use super::actions::Reply;

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Checks one player's line in a `/session/stats` body.
pub struct StatLineAssertion<'a> {
    name: &'a str,
    line: &'a Value,
}

impl<'a> StatLineAssertion<'a> {
    pub fn for_player(stats: &'a Value, name: &'a str) -> Self {
        let line = stats["players"]
            .as_array()
            .and_then(|players| {
                players
                    .iter()
                    .find(|line| line["player"]["display_name"] == name)
            })
            .unwrap_or_else(|| panic!("{name} has no stat line in {stats}"));
        Self { name, line }
    }

    fn counter(self, field: &str, expected: u64) -> Self {
        assert_eq!(
            self.line[field].as_u64(),
            Some(expected),
            "{} has wrong {}",
            self.name,
            field
        );
        self
    }

    pub fn points(self, expected: u64) -> Self {
        self.counter("points", expected)
    }

    pub fn steals(self, expected: u64) -> Self {
        self.counter("steals", expected)
    }

    pub fn rebounds(self, expected: u64) -> Self {
        self.counter("rebounds", expected)
    }

    pub fn field_goals(self, made: u64, attempted: u64) -> Self {
        self.counter("field_goals_made", made)
            .counter("field_goals_attempted", attempted)
    }

    /// All remaining counters are zero.
    pub fn nothing_else(self, except: &[&str]) -> Self {
        for field in [
            "points",
            "rebounds",
            "offensive_rebounds",
            "defensive_rebounds",
            "assists",
            "steals",
            "blocks",
            "turnovers",
            "field_goals_made",
            "field_goals_attempted",
        ] {
            if !except.contains(&field) {
                assert_eq!(
                    self.line[field].as_u64(),
                    Some(0),
                    "{} should have no {}",
                    self.name,
                    field
                );
            }
        }
        self
    }
}

pub trait ReplyAssertion {
    fn expect_status(&self, status: u16) -> &Self;
    fn expect_error_containing(&self, text: &str) -> &Self;
}

impl ReplyAssertion for Reply {
    fn expect_status(&self, status: u16) -> &Self {
        assert_eq!(
            self.status.as_u16(),
            status,
            "unexpected status, body: {}",
            self.body
        );
        self
    }

    fn expect_error_containing(&self, text: &str) -> &Self {
        let error = self.body["error"].as_str().unwrap_or_default();
        assert!(error.contains(text), "error {error:?} should mention {text:?}");
        self
    }
}
