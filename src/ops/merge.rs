use std::collections::HashSet;

use crate::model::record::Record;

/// How local-only records are folded into the remote set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergePolicy {
    /// Collapse duplicate local names to their first occurrence.
    /// Off by default: every local record whose name is missing remotely is kept.
    pub dedupe_local: bool,
}

/// Result of reconciling the remote and local replicas
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub records: Vec<Record>,
    /// True iff at least one local record was appended
    pub changed: bool,
}

/// Merge with the default policy.
pub fn merge(remote: Vec<Record>, local: Vec<Record>) -> Merged {
    merge_with(remote, local, MergePolicy::default())
}

/// Append each local record whose name is not already present remotely.
///
/// Remote records are kept as-is and always win over same-named local ones;
/// there is no field-level merge. Absent and null names share one key.
pub fn merge_with(remote: Vec<Record>, local: Vec<Record>, policy: MergePolicy) -> Merged {
    let mut seen: HashSet<Option<String>> = remote.iter().map(Record::key).collect();
    let mut records = remote;
    let mut changed = false;

    for record in local {
        let key = record.key();
        if seen.contains(&key) {
            continue;
        }
        if policy.dedupe_local {
            seen.insert(key);
        }
        records.push(record);
        changed = true;
    }

    Merged { records, changed }
}
