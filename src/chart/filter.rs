// Host filter: "all" passes everything, anything else is an exact host match.

use crate::models::{HostSelector, Sample};

pub fn filter_by_host(samples: Vec<Sample>, selector: &HostSelector) -> Vec<Sample> {
    match selector {
        HostSelector::All => samples,
        HostSelector::Host(_) => samples
            .into_iter()
            .filter(|s| selector.matches(s.host.as_deref()))
            .collect(),
    }
}
