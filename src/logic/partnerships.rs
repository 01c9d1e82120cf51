//! Partnership constraints: fold fixed pairs into the pool as atomic units.

use crate::models::{PartnershipConstraint, Player, PlayerId};

/// An atomic unit of the playing pool: a lone player, or a fixed pair that is
/// assigned and benched together.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PoolUnit {
    Single(Player),
    Pair(Player, Player),
}

impl PoolUnit {
    pub(crate) fn len(&self) -> usize {
        match self {
            PoolUnit::Single(_) => 1,
            PoolUnit::Pair(_, _) => 2,
        }
    }

    pub(crate) fn members(&self) -> Vec<&Player> {
        match self {
            PoolUnit::Single(p) => vec![p],
            PoolUnit::Pair(a, b) => vec![a, b],
        }
    }

    pub(crate) fn member_ids(&self) -> Vec<PlayerId> {
        self.members().iter().map(|p| p.id).collect()
    }

    pub(crate) fn is_pair(&self) -> bool {
        matches!(self, PoolUnit::Pair(_, _))
    }
}

/// Build pool units from the eligible pool and the session's partnership
/// configuration.
///
/// A partnership whose two members are both eligible becomes one `Pair` unit.
/// A partnership with exactly one eligible member forces that member out of
/// the round entirely (returned in `forced_out`): the pair sits out together
/// rather than being split. A player named by more than one partnership keeps
/// only the first, in declared order.
pub(crate) fn build_units(
    eligible: &[Player],
    constraint: Option<&PartnershipConstraint>,
) -> (Vec<PoolUnit>, Vec<PlayerId>) {
    let mut units: Vec<PoolUnit> = Vec::new();
    let mut forced_out: Vec<PlayerId> = Vec::new();
    let mut claimed: Vec<PlayerId> = Vec::new();

    let find = |id: PlayerId| eligible.iter().find(|p| p.id == id);

    if let Some(constraint) = constraint {
        for pair in &constraint.partnerships {
            if pair.player1_id == pair.player2_id {
                continue;
            }
            if claimed.contains(&pair.player1_id) || claimed.contains(&pair.player2_id) {
                continue;
            }
            match (find(pair.player1_id), find(pair.player2_id)) {
                (Some(a), Some(b)) => {
                    units.push(PoolUnit::Pair(a.clone(), b.clone()));
                    claimed.push(a.id);
                    claimed.push(b.id);
                }
                (Some(half), None) | (None, Some(half)) => {
                    // Partner is paused or absent: this half sits out too.
                    forced_out.push(half.id);
                    claimed.push(half.id);
                }
                (None, None) => {}
            }
        }
    }

    for p in eligible {
        if !claimed.contains(&p.id) {
            units.push(PoolUnit::Single(p.clone()));
        }
    }

    (units, forced_out)
}
