//! Message grouper
//!
//! Partitions recipients by identical payload so each distinct count goes out
//! as a single message. Grouping only reduces bus traffic; delivering one
//! message per recipient would be equivalent.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::{CountPayload, CountResult, MessageGroup};

/// Group results by payload.
///
/// Groups appear in the order their payload was first seen, and user ids
/// within a group are sorted, so a fixed input always yields the same output.
/// A user id seen more than once keeps only its first result.
pub fn group_by_payload(results: &[CountResult]) -> Vec<MessageGroup> {
    let mut index: HashMap<CountPayload, usize> = HashMap::new();
    let mut groups: Vec<MessageGroup> = Vec::new();
    let mut assigned = HashSet::new();

    for result in results {
        if !assigned.insert(result.user_id) {
            tracing::warn!(user_id = %result.user_id, "Duplicate count result dropped");
            continue;
        }
        let slot = *index.entry(result.payload).or_insert_with(|| {
            groups.push(MessageGroup {
                payload: result.payload,
                user_ids: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].user_ids.push(result.user_id);
    }

    for group in &mut groups {
        group.user_ids.sort();
    }
    groups
}
