// src/resolve/matcher.rs

use std::collections::HashSet;

use super::{index::EntityIndex, variants::variants};
use crate::core::sanitize::normalize_name;
use crate::specs::ImageCandidate;

/// Minimum length (exclusive) of both sides of a weak-tier substring test.
const WEAK_MIN_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// A variant of the candidate name is an index key.
    Exact,
    /// Substring containment against an index key.
    Weak,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchAssignment {
    pub entry_id: String,
    pub candidate: ImageCandidate,
    pub tier: Tier,
}

/// Assign candidates to entries in page order; each entry at most once.
///
/// Exact tier first: the first variant (in generation order) that is a key of
/// an entry not yet assigned. If the variants only hit entries that are already
/// assigned, the candidate is another picture of a claimed entry and is dropped.
/// Otherwise the weak tier takes the first unassigned key, in index order,
/// that contains or is contained in the normalized name (both longer than 3).
pub fn resolve(candidates: &[ImageCandidate], index: &EntityIndex) -> Vec<MatchAssignment> {
    let mut assigned: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for cand in candidates {
        let names = variants(&cand.raw_name);
        let mut claimed_hit = false;
        let mut hit = None;
        for v in &names {
            if let Some(id) = index.get(v) {
                if assigned.contains(id) {
                    claimed_hit = true;
                } else {
                    hit = Some((id, Tier::Exact));
                    break;
                }
            }
        }

        if hit.is_none() && !claimed_hit {
            hit = weak_match(&normalize_name(&cand.raw_name), index, &assigned)
                .map(|id| (id, Tier::Weak));
        }

        match hit {
            Some((id, tier)) => {
                log::debug!("{:?} match: {:?} -> {id}", tier, cand.raw_name);
                assigned.insert(id);
                out.push(MatchAssignment { entry_id: id.to_string(), candidate: cand.clone(), tier });
            }
            None => log::debug!("no match: {:?}", cand.raw_name),
        }
    }
    out
}

fn weak_match<'a>(normalized: &str, index: &'a EntityIndex, assigned: &HashSet<&str>) -> Option<&'a str> {
    if normalized.len() <= WEAK_MIN_LEN { return None; }
    index
        .iter()
        .filter(|(key, id)| key.len() > WEAK_MIN_LEN && !assigned.contains(id))
        .find(|(key, _)| normalized.contains(key) || key.contains(normalized))
        .map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CatalogEntry;

    fn cand(name: &str) -> ImageCandidate {
        ImageCandidate { raw_name: name.into(), source_url: format!("https://img/{name}.png") }
    }

    fn index(entries: &[(&str, &str)]) -> EntityIndex {
        let entries: Vec<CatalogEntry> = entries.iter().map(|(id, n)| CatalogEntry::new(id, n)).collect();
        EntityIndex::build(&entries, &HashSet::new())
    }

    #[test]
    fn exact_beats_weak() {
        // "bonk" is a weak hit on big_bonk (earlier in the index) and exact on bonk
        let idx = index(&[("big_bonk", "Big Bonk"), ("bonk", "Bonk")]);
        let got = resolve(&[cand("Bonk")], &idx);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].entry_id, "bonk");
        assert_eq!(got[0].tier, Tier::Exact);
    }

    #[test]
    fn weak_tier_uses_index_order() {
        let idx = index(&[("spicy_meatball", "Spicy Meatball"), ("meatball", "Meatball Sub")]);
        let got = resolve(&[cand("Spicy Meatball Deluxe Edition")], &idx);
        assert_eq!(got[0].entry_id, "spicy_meatball");
        assert_eq!(got[0].tier, Tier::Weak);
    }

    #[test]
    fn short_names_never_weak_match() {
        let idx = index(&[("xp", "XP Tome"), ("bowling_ball", "Bowling Ball")]);
        assert_eq!(resolve(&[cand("XP")], &idx)[0].tier, Tier::Exact);
        assert!(resolve(&[cand("Bow")], &idx).is_empty());
    }

    #[test]
    fn duplicate_pictures_are_dropped() {
        let idx = index(&[("anvil", "Anvil"), ("anvil_plus", "Anvil Plus")]);
        let got = resolve(&[cand("Anvil"), cand("Anvil Icon"), cand("Unknown")], &idx);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].entry_id, "anvil");
    }

    #[test]
    fn partition_holds() {
        let idx = index(&[("ice_cube", "Ice Cube"), ("ice_staff", "Ice Staff"), ("cube", "Cube")]);
        let cands: Vec<_> = ["Ice Cube", "Ice Cube", "Ice Staff Icon", "Cube", "Ice Cubes", "Staff"]
            .iter().map(|n| cand(n)).collect();
        let got = resolve(&cands, &idx);
        let ids: HashSet<_> = got.iter().map(|a| a.entry_id.as_str()).collect();
        assert_eq!(ids.len(), got.len());
        assert!(got.len() <= cands.len());
    }
}
