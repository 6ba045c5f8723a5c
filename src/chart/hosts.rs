// Host lister for the chart's host selector.

use std::collections::HashSet;

use crate::models::RawSample;

/// Unique hosts in first-seen order.
///
/// A non-empty explicit list (after trimming out blanks) wins verbatim; otherwise
/// hosts are derived from the raw samples, including records the normalizer rejects.
pub fn list_hosts(explicit: &[String], raws: &[RawSample]) -> Vec<String> {
    let from_explicit = dedup(explicit.iter().map(|h| h.trim()));
    if !from_explicit.is_empty() {
        return from_explicit;
    }
    dedup(raws.iter().filter_map(RawSample::host_name))
}

fn dedup<'a>(hosts: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for host in hosts {
        if !host.is_empty() && seen.insert(host) {
            out.push(host.to_string());
        }
    }
    out
}
