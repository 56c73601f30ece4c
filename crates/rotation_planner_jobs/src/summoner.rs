// SPDX-License-Identifier: MIT OR Apache-2.0
//! Summoner action catalog.

use crate::Job;
use rotation_planner_core::Action;

/// Build the Summoner job catalog
pub fn summoner() -> Job {
    const ABBR: &str = "SMN";
    Job {
        name: "Summoner".to_string(),
        abbr: ABBR.to_string(),
        actions: vec![
            Action::new(ABBR, "Summon Bahamut")
                .with_next_gcd(2500)
                .with_cooldown(60_000),
            Action::new(ABBR, "Ruin III")
                .with_potency(310)
                .with_cast_time(1500)
                .with_next_gcd(2500)
                .with_cooldown(2500)
                .with_mp_cost(300),
            Action::new(ABBR, "Fester").with_potency(300),
        ],
    }
}
