use std::collections::HashSet;

use crate::ident::{Id, IdGen};
use crate::models::Entry;
use crate::parser::ParsedEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The full entry collection after the merge, newest first.
    pub updated: Vec<Entry>,
    /// How many entries of `updated` are new; they occupy its head.
    pub added: usize,
}

/// Reconciles one feed's freshly parsed entries against everything already
/// known.
///
/// The dedup key is the entry link, checked against ALL existing entries
/// regardless of owning feed, so the same article referenced by two feeds
/// shows up once. New entries keep the parser's relative order and are
/// prepended; existing entries are never reordered, mutated, or dropped.
/// Within one parsed batch only the first occurrence of a link counts.
/// Identities are assigned only to entries that are genuinely new.
pub fn merge(existing: &[Entry], feed_id: Id, parsed: &[ParsedEntry], ids: &IdGen) -> MergeOutcome {
    let mut known: HashSet<&str> = existing.iter().map(|entry| entry.link.as_str()).collect();

    let mut fresh: Vec<Entry> = Vec::new();
    for item in parsed {
        if !known.insert(item.link.as_str()) {
            continue;
        }
        fresh.push(Entry {
            id: ids.next_id(),
            feed_id,
            title: item.title.clone(),
            link: item.link.clone(),
            description: item.description.clone(),
        });
    }

    let added = fresh.len();
    let mut updated = fresh;
    updated.extend_from_slice(existing);

    MergeOutcome { updated, added }
}
