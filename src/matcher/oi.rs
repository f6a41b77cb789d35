//! Roaming consortium OI evaluation.

use std::collections::HashSet;

use crate::anqp::AnqpElements;
use crate::error::Result;
use crate::types::NetworkDetail;

/// Collect the OIs a network advertises: beacon OIs plus those in the
/// Roaming Consortium ANQP element, when one has been fetched.
pub fn observed_ois(network: &NetworkDetail, anqp: Option<&AnqpElements>) -> Result<HashSet<u64>> {
    let mut ois: HashSet<u64> = network.roaming_consortiums.iter().copied().collect();

    if let Some(anqp) = anqp {
        if let Some(rc) = anqp.roaming_consortium()? {
            ois.extend(rc.ois.iter().copied());
        }
    }

    Ok(ois)
}

/// Evaluate a "match all" rule.
///
/// Returns `None` when `required` is empty (no rule configured), otherwise
/// whether every required OI was observed.
pub fn evaluate_match_all(required: &[u64], observed: &HashSet<u64>) -> Option<bool> {
    if required.is_empty() {
        return None;
    }
    Some(required.iter().all(|oi| observed.contains(oi)))
}

/// Evaluate "match any" together with the known roaming consortiums.
pub fn evaluate_match_any(
    any_set: &HashSet<u64>,
    roaming_set: &HashSet<u64>,
    observed: &HashSet<u64>,
) -> bool {
    !any_set.is_disjoint(observed) || !roaming_set.is_disjoint(observed)
}
