//! # Aggregation
//!
//! Per-player and per-match rollups over point-level action rows. Everything here is a
//! pure function of the rows passed in: callers fetch, this module counts.

use std::{
    collections::{BTreeMap, HashMap},
    ops::AddAssign,
};

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::{
    action::ActionKind,
    mark::{round1, Mark, MarkCounts, Rating},
};

/// Zone label used for actions without a recorded zone.
pub const NO_ZONE: &str = "no zone";

/// One scouted action, already decoded from its stored representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub id:        i32,
    pub match_id:  i32,
    pub player_id: i32,
    pub set_no:    i32,
    pub kind:      ActionKind,
    pub mark:      Option<Mark>,
    pub zone:      Option<String>,
    pub rotation:  Option<i32>,
}

impl ActionRecord {
    /// A record in set 1 without zone or rotation.
    pub fn new(id: i32, match_id: i32, player_id: i32, kind: ActionKind, mark: Option<Mark>) -> Self {
        Self {
            id,
            match_id,
            player_id,
            set_no: 1,
            kind,
            mark,
            zone: None,
            rotation: None,
        }
    }

    /// Set number the action was played in.
    pub fn with_set(mut self, set_no: i32) -> Self {
        self.set_no = set_no;
        self
    }

    /// Court zone of the action.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Rotation the team was in.
    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = Some(rotation);
        self
    }
}

/// A player expected in a report even when they logged nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub player_id: i32,
    pub name:      String,
    pub number:    Option<i32>,
}

impl RosterEntry {
    pub fn new(player_id: i32, name: impl Into<String>, number: Option<i32>) -> Self {
        Self {
            player_id,
            name: name.into(),
            number,
        }
    }

    /// Placeholder for a player that only shows up through their actions.
    pub fn unknown(player_id: i32) -> Self { Self::new(player_id, format!("Player {}", player_id), None) }
}

/// Direct points split by the skill that won them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointSplit {
    pub attack: u32,
    pub serve:  u32,
    pub block:  u32,
    pub total:  u32,
}

impl PointSplit {
    pub fn record(&mut self, kind: &ActionKind, mark: Option<Mark>) {
        if mark != Some(Mark::Point) {
            return;
        }
        match kind {
            ActionKind::Attack => self.attack += 1,
            ActionKind::Serve => self.serve += 1,
            ActionKind::Block => self.block += 1,
            _ => return,
        }
        self.total += 1;
    }
}

impl AddAssign for PointSplit {
    fn add_assign(&mut self, rhs: Self) {
        self.attack += rhs.attack;
        self.serve += rhs.serve;
        self.block += rhs.block;
        self.total += rhs.total;
    }
}

/// Counts for one action kind with the derived percentages the tables display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLine {
    pub kind:           ActionKind,
    pub label:          String,
    #[serde(flatten)]
    pub counts:         MarkCounts,
    pub efficacy_pct:   f64,
    pub efficiency_pct: f64,
    pub rating:         Rating,
}

impl ActionLine {
    pub fn new(kind: ActionKind, counts: MarkCounts) -> Self {
        let efficacy_pct = counts.efficacy_pct();
        Self {
            label: kind.label().to_string(),
            kind,
            counts,
            efficacy_pct,
            efficiency_pct: counts.efficiency_pct(),
            rating: Rating::from_pct(efficacy_pct),
        }
    }
}

fn serialize_lines<S: Serializer>(actions: &BTreeMap<ActionKind, MarkCounts>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        actions
            .iter()
            .map(|(kind, counts)| ActionLine::new(kind.clone(), *counts)),
    )
}

/// Everything one player did within the rows considered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerLine {
    pub player_id: i32,
    pub name:      String,
    pub number:    Option<i32>,
    #[serde(serialize_with = "serialize_lines")]
    pub actions:   BTreeMap<ActionKind, MarkCounts>,
    pub overall:   MarkCounts,
    pub points:    PointSplit,
}

impl PlayerLine {
    /// An all-zero line for a roster entry.
    pub fn new(entry: &RosterEntry) -> Self {
        Self {
            player_id: entry.player_id,
            name:      entry.name.clone(),
            number:    entry.number,
            actions:   BTreeMap::new(),
            overall:   MarkCounts::default(),
            points:    PointSplit::default(),
        }
    }

    /// Build a line from the player's rows; rows of other players are ignored.
    pub fn from_actions(entry: &RosterEntry, actions: &[ActionRecord]) -> Self {
        let mut line = Self::new(entry);
        for action in actions.iter().filter(|a| a.player_id == entry.player_id) {
            line.record(action);
        }
        line
    }

    /// Add one action to the line.
    pub fn record(&mut self, action: &ActionRecord) {
        self.actions
            .entry(action.kind.clone())
            .or_default()
            .record(action.mark);
        self.overall.record(action.mark);
        self.points.record(&action.kind, action.mark);
    }

    /// Total attempts across every kind.
    pub fn attempts(&self) -> u32 { self.overall.total }

    /// Counts for one kind, zero when the player never performed it.
    pub fn counts(&self, kind: &ActionKind) -> MarkCounts { self.actions.get(kind).copied().unwrap_or_default() }

    /// One line per kind, in canonical order.
    pub fn lines(&self) -> Vec<ActionLine> {
        self.actions
            .iter()
            .map(|(kind, counts)| ActionLine::new(kind.clone(), *counts))
            .collect()
    }
}

/// Share of a zone among a set of actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneShare {
    pub zone:      String,
    pub count:     u32,
    pub share_pct: f64,
}

/// Outcome counts for one rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationLine {
    pub rotation:       Option<i32>,
    #[serde(flatten)]
    pub counts:         MarkCounts,
    pub share_pct:      f64,
    pub efficiency_pct: f64,
}

/// Rally phase an attack belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackPhase {
    /// First attack after receiving serve.
    SideOut,
    /// Any other attack, typically after a dig.
    CounterAttack,
}

impl AttackPhase {
    pub fn label(self) -> &'static str {
        match self {
            AttackPhase::SideOut => "Side-out",
            AttackPhase::CounterAttack => "Counter-attack",
        }
    }
}

/// Attack outcome counts for one rally phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseLine {
    pub phase:          AttackPhase,
    pub label:          &'static str,
    #[serde(flatten)]
    pub counts:         MarkCounts,
    pub efficacy_pct:   f64,
    pub efficiency_pct: f64,
}

/// Full rollup of one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchAggregate {
    pub match_id:            i32,
    pub players:             Vec<PlayerLine>,
    #[serde(serialize_with = "serialize_lines")]
    pub actions:             BTreeMap<ActionKind, MarkCounts>,
    pub overall:             MarkCounts,
    pub points:              PointSplit,
    pub attack_zones:        Vec<ZoneShare>,
    pub rotations:           Vec<RotationLine>,
    pub side_out:            Vec<PhaseLine>,
    pub setter_distribution: Vec<ZoneShare>,
}

impl MatchAggregate {
    /// Line of one player, if they are in the match.
    pub fn player(&self, player_id: i32) -> Option<&PlayerLine> { self.players.iter().find(|p| p.player_id == player_id) }

    /// Match totals for one kind, zero when nobody performed it.
    pub fn counts(&self, kind: &ActionKind) -> MarkCounts { self.actions.get(kind).copied().unwrap_or_default() }

    /// One line per kind, in canonical order.
    pub fn lines(&self) -> Vec<ActionLine> {
        self.actions
            .iter()
            .map(|(kind, counts)| ActionLine::new(kind.clone(), *counts))
            .collect()
    }
}

/// Aggregate one match.
///
/// # Arguments
///
/// * `match_id` - Match to aggregate; rows of other matches are ignored
/// * `roster` - Players that must appear even with zero actions
/// * `actions` - Action rows, in any order
///
/// Players with actions but missing from the roster are added under a placeholder name.
/// Player lines are ordered by name, then id.
pub fn aggregate_match(match_id: i32, roster: &[RosterEntry], actions: &[ActionRecord]) -> MatchAggregate {
    let scoped: Vec<ActionRecord> = actions
        .iter()
        .filter(|a| a.match_id == match_id)
        .cloned()
        .collect();

    let mut players: HashMap<i32, PlayerLine> = roster
        .iter()
        .map(|entry| (entry.player_id, PlayerLine::new(entry)))
        .collect();

    let mut overall = MarkCounts::default();
    let mut points = PointSplit::default();
    for action in &scoped {
        players
            .entry(action.player_id)
            .or_insert_with(|| PlayerLine::new(&RosterEntry::unknown(action.player_id)))
            .record(action);
        overall.record(action.mark);
        points.record(&action.kind, action.mark);
    }

    let mut players: Vec<PlayerLine> = players.into_values().collect();
    players.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    debug!(
        match_id,
        players = players.len(),
        actions = scoped.len(),
        "Aggregated match"
    );

    MatchAggregate {
        match_id,
        players,
        actions: tally_by_action(&scoped),
        overall,
        points,
        attack_zones: zone_breakdown(&scoped, Some(&ActionKind::Attack)),
        rotations: rotation_breakdown(&scoped),
        side_out: side_out_breakdown(&scoped),
        setter_distribution: setter_distribution(&scoped),
    }
}

/// Mark counts per action kind, in canonical order.
pub fn tally_by_action(actions: &[ActionRecord]) -> BTreeMap<ActionKind, MarkCounts> {
    let mut tally: BTreeMap<ActionKind, MarkCounts> = BTreeMap::new();
    for action in actions {
        tally
            .entry(action.kind.clone())
            .or_default()
            .record(action.mark);
    }
    tally
}

/// Per action kind summary over any set of rows.
pub fn summarize_by_action(actions: &[ActionRecord]) -> Vec<ActionLine> {
    tally_by_action(actions)
        .into_iter()
        .map(|(kind, counts)| ActionLine::new(kind, counts))
        .collect()
}

/// Count actions per zone, optionally only of one kind.
///
/// Missing zones are reported as [`NO_ZONE`]. Ordered by count descending, then zone.
pub fn zone_breakdown(actions: &[ActionRecord], kind: Option<&ActionKind>) -> Vec<ZoneShare> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut total = 0u32;
    for action in actions.iter().filter(|a| kind.map_or(true, |k| &a.kind == k)) {
        let zone = action
            .zone
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .unwrap_or(NO_ZONE);
        *counts.entry(zone).or_default() += 1;
        total += 1;
    }

    let mut shares: Vec<ZoneShare> = counts
        .into_iter()
        .map(|(zone, count)| {
            ZoneShare {
                zone: zone.to_string(),
                count,
                share_pct: round1(f64::from(count) / f64::from(total) * 100.0),
            }
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.zone.cmp(&b.zone)));
    shares
}

/// Outcome counts per rotation, ascending, with unknown rotation last.
pub fn rotation_breakdown(actions: &[ActionRecord]) -> Vec<RotationLine> {
    let mut counts: BTreeMap<(bool, Option<i32>), MarkCounts> = BTreeMap::new();
    for action in actions {
        counts
            .entry((action.rotation.is_none(), action.rotation))
            .or_default()
            .record(action.mark);
    }

    let total = actions.len() as f64;
    counts
        .into_iter()
        .map(|((_, rotation), counts)| {
            RotationLine {
                rotation,
                counts,
                share_pct: round1(f64::from(counts.total) / total * 100.0),
                efficiency_pct: counts.efficiency_pct(),
            }
        })
        .collect()
}

/// Classify attacks as side-out or counter-attack.
///
/// Within each match, receptions, sets and attacks are ordered by id. An attack whose
/// previous action is a reception, or a set preceded by a reception, is side-out. Every
/// other attack is a counter-attack. Phases without attacks are omitted.
pub fn side_out_breakdown(actions: &[ActionRecord]) -> Vec<PhaseLine> {
    let mut by_match: BTreeMap<i32, Vec<&ActionRecord>> = BTreeMap::new();
    for action in actions {
        if matches!(
            action.kind,
            ActionKind::Reception | ActionKind::Set | ActionKind::Attack
        ) {
            by_match.entry(action.match_id).or_default().push(action);
        }
    }

    let mut phases: BTreeMap<AttackPhase, MarkCounts> = BTreeMap::new();
    for sequence in by_match.values_mut() {
        sequence.sort_by_key(|a| a.id);
        for (i, action) in sequence.iter().enumerate() {
            if action.kind != ActionKind::Attack {
                continue;
            }
            let previous = |back: usize| i.checked_sub(back).map(|j| &sequence[j].kind);
            let side_out = match previous(1) {
                Some(ActionKind::Reception) => true,
                Some(ActionKind::Set) => previous(2) == Some(&ActionKind::Reception),
                _ => false,
            };
            let phase = if side_out {
                AttackPhase::SideOut
            }
            else {
                AttackPhase::CounterAttack
            };
            phases.entry(phase).or_default().record(action.mark);
        }
    }

    phases
        .into_iter()
        .map(|(phase, counts)| {
            PhaseLine {
                phase,
                label: phase.label(),
                counts,
                efficacy_pct: counts.efficacy_pct(),
                efficiency_pct: counts.efficiency_pct(),
            }
        })
        .collect()
}

/// Zone distribution of sets.
pub fn setter_distribution(actions: &[ActionRecord]) -> Vec<ZoneShare> { zone_breakdown(actions, Some(&ActionKind::Set)) }
