// Draft board assembly.
//
// Joins each season's draft picks against the league-wide player directory
// to resolve a primary playing position per pick.

use serde::Serialize;
use std::collections::HashMap;

use crate::model::{DirectoryPlayer, DraftSelection};
use crate::slot::Slot;

/// One draft-board cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftBoardRow {
    pub round: u32,
    pub pick: u32,
    pub player: String,
    pub manager: String,
    pub year: u16,
    /// Display label, e.g. "Star Back (1.3)".
    pub label: String,
    /// Primary playing position, when the directory knows the player.
    pub position: Option<Slot>,
}

/// Resolve a player's primary position: the first eligible slot that is not
/// a multi-position combo. Defense units are the exception: their slot tag
/// (D/ST) carries a slash, but so do their names ("Bears D/ST"), which is
/// what lets them through.
pub fn primary_position(player: &DirectoryPlayer) -> Option<Slot> {
    player
        .eligible_slots
        .iter()
        .copied()
        .find(|slot| !slot.is_combo() || player.name.contains('/'))
}

/// Build the draft board for one season.
///
/// Directory lookups keep the first entry per player name; duplicate names
/// (common for defenses across data pulls) resolve to their first listing.
pub fn build_draft_board(
    year: u16,
    picks: &[DraftSelection],
    directory: &[DirectoryPlayer],
) -> Vec<DraftBoardRow> {
    let mut positions: HashMap<&str, Option<Slot>> = HashMap::new();
    for player in directory {
        positions
            .entry(player.name.as_str())
            .or_insert_with(|| primary_position(player));
    }

    picks
        .iter()
        .map(|pick| DraftBoardRow {
            round: pick.round,
            pick: pick.round_pick,
            player: pick.player.clone(),
            manager: pick.manager.clone(),
            year,
            label: format!("{} ({}.{})", pick.player, pick.round, pick.round_pick),
            position: positions.get(pick.player.as_str()).copied().flatten(),
        })
        .collect()
}

/// The first-round order of managers, which is the draft order.
pub fn draft_order(board: &[DraftBoardRow]) -> Vec<String> {
    let mut first_round: Vec<&DraftBoardRow> = board.iter().filter(|r| r.round == 1).collect();
    first_round.sort_by_key(|r| r.pick);
    first_round.iter().map(|r| r.manager.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_player(name: &str, tags: &[&str]) -> DirectoryPlayer {
        DirectoryPlayer {
            name: name.into(),
            eligible_slots: tags.iter().filter_map(|t| Slot::from_tag(t)).collect(),
        }
    }

    fn pick(round: u32, pick: u32, player: &str, manager: &str) -> DraftSelection {
        DraftSelection {
            round,
            round_pick: pick,
            player: player.into(),
            manager: manager.into(),
        }
    }

    #[test]
    fn primary_position_skips_combo_slots() {
        let player = directory_player("Star Back", &["RB/WR/TE", "RB/WR", "RB", "BE"]);
        assert_eq!(primary_position(&player), Some(Slot::RunningBack));
    }

    #[test]
    fn primary_position_allows_defense_through() {
        let defense = directory_player("Bears D/ST", &["D/ST", "BE"]);
        assert_eq!(primary_position(&defense), Some(Slot::Defense));
    }

    #[test]
    fn primary_position_none_when_only_combos() {
        let player = directory_player("Mystery", &["RB/WR/TE"]);
        assert_eq!(primary_position(&player), None);
    }

    #[test]
    fn board_labels_and_positions() {
        let picks = vec![
            pick(1, 1, "Star Back", "Alex"),
            pick(1, 2, "Ace Quarterback", "Bo"),
            pick(2, 1, "Unknown Guy", "Bo"),
        ];
        let directory = vec![
            directory_player("Star Back", &["RB/WR/TE", "RB", "BE"]),
            directory_player("Ace Quarterback", &["QB", "OP", "BE"]),
        ];
        let board = build_draft_board(2022, &picks, &directory);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].label, "Star Back (1.1)");
        assert_eq!(board[0].position, Some(Slot::RunningBack));
        assert_eq!(board[1].position, Some(Slot::Quarterback));
        assert_eq!(board[2].position, None);
        assert_eq!(board[0].year, 2022);
    }

    #[test]
    fn duplicate_directory_entries_keep_first() {
        let directory = vec![
            directory_player("Star Back", &["RB", "BE"]),
            directory_player("Star Back", &["WR", "BE"]),
        ];
        let board = build_draft_board(2022, &[pick(1, 1, "Star Back", "Alex")], &directory);
        assert_eq!(board[0].position, Some(Slot::RunningBack));
    }

    #[test]
    fn draft_order_from_first_round() {
        let picks = vec![
            pick(1, 2, "Second Pick", "Bo"),
            pick(1, 1, "First Pick", "Alex"),
            pick(2, 1, "Later Pick", "Bo"),
        ];
        let board = build_draft_board(2022, &picks, &[]);
        assert_eq!(draft_order(&board), vec!["Alex".to_string(), "Bo".to_string()]);
    }
}
