use crate::core::{Pair, Pairing, Participant, Roster};
use std::collections::VecDeque;

/// Pairs the roster from the ends inward after a stable ascending sort by
/// `sort_key`. The front member of each pair owns the scheduling.
pub fn pair(roster: Roster) -> Pairing {
    let mut sorted = roster.into_participants();
    // sort_by_key 是穩定排序，相同時區維持名單原順序
    sorted.sort_by_key(|p| p.sort_key);

    let mut queue: VecDeque<Participant> = sorted.into();
    let mut pairs = Vec::with_capacity(queue.len() / 2);

    while queue.len() > 1 {
        if let (Some(owner), Some(partner)) = (queue.pop_front(), queue.pop_back()) {
            pairs.push(Pair { owner, partner });
        }
    }

    Pairing {
        pairs,
        leftover: queue.pop_front(),
    }
}

/// Slack mention markup for a member id.
pub fn mention(id: &str) -> String {
    format!("<@{}>", id)
}

pub fn render(pairing: &Pairing) -> String {
    let mut output = String::new();

    for Pair { owner, partner } in &pairing.pairs {
        let owner_ref = mention(&owner.id);
        output.push_str(&format!(
            "* {} matched with {}. {}, you are in charge of scheduling the 1-1.\n",
            owner_ref,
            mention(&partner.id),
            owner_ref
        ));
    }

    if let Some(member) = &pairing.leftover {
        output.push_str(&format!(
            "* {} couldn't be paired with anyone.\n",
            mention(&member.id)
        ));
    }

    output
}
