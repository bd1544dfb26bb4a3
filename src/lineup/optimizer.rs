// Greedy optimal-lineup computation.
//
// Fills starting slots one at a time in the league's canonical slot order,
// always taking the highest-scoring players still available for the slot.
// Because later slots draw from whatever remains after earlier slots, the
// slot order determines the final allocation: a player eligible for an
// early flex slot and a later dedicated slot can be consumed by the flex
// slot even when a weaker player would have covered it. The comparison
// tables downstream are built against exactly this allocation; a global
// assignment solver would produce different (sometimes higher-scoring)
// lineups and break comparability.

use std::cmp::Ordering;

use crate::model::{RosterEntry, SlotCounts};
use crate::slot::Slot;

/// One slot assignment in an optimal lineup.
#[derive(Debug, Clone)]
pub struct SlotAssignment {
    pub slot: Slot,
    pub player: RosterEntry,
}

/// The highest-scoring legal lineup reachable by the greedy fill, with its
/// aggregate score.
#[derive(Debug, Clone, Default)]
pub struct OptimalLineup {
    pub assignments: Vec<SlotAssignment>,
    pub score: f64,
}

impl OptimalLineup {
    /// Number of players assigned to `slot`.
    pub fn count_for(&self, slot: Slot) -> usize {
        self.assignments.iter().filter(|a| a.slot == slot).count()
    }
}

/// Compute the optimal lineup for one team-week.
///
/// `roster` is an owned working copy; assigned players are consumed from it
/// so later slots cannot reuse them. The caller's data is never touched.
///
/// Per slot, candidates are sorted by points descending with a stable sort,
/// so ties keep original roster order; no secondary ranking criterion.
/// A slot with fewer eligible players than its required count is filled
/// with however many exist; that is not an error.
pub fn optimize(slot_counts: &SlotCounts, mut roster: Vec<RosterEntry>) -> OptimalLineup {
    let mut assignments = Vec::new();
    let mut score = 0.0;

    for (slot, count) in slot_counts.iter() {
        // Never allocate starters to the bench or IR.
        if slot.is_bench_or_ir() {
            continue;
        }
        if count == 0 {
            continue;
        }

        // Indices of the remaining players eligible for this slot, best first.
        let mut eligible: Vec<usize> = (0..roster.len())
            .filter(|&i| roster[i].eligible_slots.contains(&slot))
            .collect();
        eligible.sort_by(|&a, &b| {
            roster[b]
                .points
                .partial_cmp(&roster[a].points)
                .unwrap_or(Ordering::Equal)
        });
        eligible.truncate(count as usize);

        for &i in &eligible {
            score += roster[i].points;
            assignments.push(SlotAssignment {
                slot,
                player: roster[i].clone(),
            });
        }

        // Remove assigned players from the working roster, highest index
        // first so earlier indices stay valid.
        eligible.sort_unstable_by(|a, b| b.cmp(a));
        for i in eligible {
            roster.remove(i);
        }
    }

    OptimalLineup { assignments, score }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
