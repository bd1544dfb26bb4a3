// Lineup slot vocabulary and ESPN slot ID mapping.

use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// ESPN slot ID constants (from ESPN Fantasy API v3)
// ---------------------------------------------------------------------------

pub const ESPN_SLOT_QB: u16 = 0;
pub const ESPN_SLOT_RB: u16 = 2;
pub const ESPN_SLOT_RB_WR: u16 = 3;
pub const ESPN_SLOT_WR: u16 = 4;
pub const ESPN_SLOT_WR_TE: u16 = 5;
pub const ESPN_SLOT_TE: u16 = 6;
pub const ESPN_SLOT_OP: u16 = 7; // Offensive player (superflex)
pub const ESPN_SLOT_DST: u16 = 16;
pub const ESPN_SLOT_K: u16 = 17;
pub const ESPN_SLOT_BE: u16 = 20;
pub const ESPN_SLOT_IR: u16 = 21;
pub const ESPN_SLOT_FLEX: u16 = 23; // RB/WR/TE

/// A lineup slot a player can occupy for a given week.
///
/// Covers the concrete positions plus the flex combinations ESPN leagues
/// actually configure. Bench and injured reserve are slots too: every
/// rostered player sits in exactly one slot each week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    RunningBackWideReceiver,
    WideReceiverTightEnd,
    Flex,
    OffensivePlayer,
    Defense,
    Kicker,
    Bench,
    InjuredReserve,
}

impl Slot {
    /// Parse a slot tag string into a Slot.
    ///
    /// Handles ESPN-style tags:
    /// - "QB", "RB", "WR", "TE", "K"
    /// - Combo tags with slashes: "RB/WR", "WR/TE", "RB/WR/TE", "D/ST"
    /// - "FLEX" as an alias for "RB/WR/TE"
    /// - "BE"/"BN" -> Bench, "IR" -> InjuredReserve
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Slot::Quarterback),
            "RB" => Some(Slot::RunningBack),
            "WR" => Some(Slot::WideReceiver),
            "TE" => Some(Slot::TightEnd),
            "RB/WR" => Some(Slot::RunningBackWideReceiver),
            "WR/TE" => Some(Slot::WideReceiverTightEnd),
            "RB/WR/TE" | "FLEX" => Some(Slot::Flex),
            "OP" => Some(Slot::OffensivePlayer),
            "D/ST" | "DST" => Some(Slot::Defense),
            "K" => Some(Slot::Kicker),
            "BE" | "BN" => Some(Slot::Bench),
            "IR" => Some(Slot::InjuredReserve),
            _ => None,
        }
    }

    /// Return the display tag for this slot.
    pub fn tag(&self) -> &'static str {
        match self {
            Slot::Quarterback => "QB",
            Slot::RunningBack => "RB",
            Slot::WideReceiver => "WR",
            Slot::TightEnd => "TE",
            Slot::RunningBackWideReceiver => "RB/WR",
            Slot::WideReceiverTightEnd => "WR/TE",
            Slot::Flex => "RB/WR/TE",
            Slot::OffensivePlayer => "OP",
            Slot::Defense => "D/ST",
            Slot::Kicker => "K",
            Slot::Bench => "BE",
            Slot::InjuredReserve => "IR",
        }
    }

    /// Whether this slot never counts as "starting" (excluded from all
    /// scoring and optimization).
    pub fn is_bench_or_ir(&self) -> bool {
        matches!(self, Slot::Bench | Slot::InjuredReserve)
    }

    /// Whether this slot is a multi-position combination (its tag carries a
    /// slash). Note that D/ST carries a slash but is a real unit, not a
    /// combo; callers resolving primary positions handle that case (defense
    /// player names also carry a slash).
    pub fn is_combo(&self) -> bool {
        self.tag().contains('/')
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// CSV output wants the tag, not the variant name.
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// ESPN slot ID mapping functions
// ---------------------------------------------------------------------------

/// Map an ESPN slot ID to a Slot. Returns `None` for slot IDs this crate
/// does not model (IDP positions, team QB, head coach).
pub fn slot_from_espn_id(slot_id: u16) -> Option<Slot> {
    match slot_id {
        ESPN_SLOT_QB => Some(Slot::Quarterback),
        ESPN_SLOT_RB => Some(Slot::RunningBack),
        ESPN_SLOT_RB_WR => Some(Slot::RunningBackWideReceiver),
        ESPN_SLOT_WR => Some(Slot::WideReceiver),
        ESPN_SLOT_WR_TE => Some(Slot::WideReceiverTightEnd),
        ESPN_SLOT_TE => Some(Slot::TightEnd),
        ESPN_SLOT_OP => Some(Slot::OffensivePlayer),
        ESPN_SLOT_DST => Some(Slot::Defense),
        ESPN_SLOT_K => Some(Slot::Kicker),
        ESPN_SLOT_BE => Some(Slot::Bench),
        ESPN_SLOT_IR => Some(Slot::InjuredReserve),
        ESPN_SLOT_FLEX => Some(Slot::Flex),
        _ => None,
    }
}

/// Map a Slot to its primary ESPN slot ID.
pub fn espn_id_from_slot(slot: Slot) -> u16 {
    match slot {
        Slot::Quarterback => ESPN_SLOT_QB,
        Slot::RunningBack => ESPN_SLOT_RB,
        Slot::RunningBackWideReceiver => ESPN_SLOT_RB_WR,
        Slot::WideReceiver => ESPN_SLOT_WR,
        Slot::WideReceiverTightEnd => ESPN_SLOT_WR_TE,
        Slot::TightEnd => ESPN_SLOT_TE,
        Slot::OffensivePlayer => ESPN_SLOT_OP,
        Slot::Defense => ESPN_SLOT_DST,
        Slot::Kicker => ESPN_SLOT_K,
        Slot::Bench => ESPN_SLOT_BE,
        Slot::InjuredReserve => ESPN_SLOT_IR,
        Slot::Flex => ESPN_SLOT_FLEX,
    }
}
