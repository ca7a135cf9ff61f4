//! Reconciliation diff - pure set difference between persisted and desired
//! city sets for one date

use std::collections::BTreeSet;

use planbord_domain::CityDelta;

/// Compute the add/remove delta between the currently persisted city set
/// and an operator's desired set.
///
/// Both inputs are deduplicated first, so duplicate rows in the store or
/// repeated entries in the desired list cannot produce duplicate work.
/// The outputs are disjoint by construction, which is why removals and
/// additions can be applied as two independent batches in either order.
pub fn reconcile<S: AsRef<str>>(current: &[S], desired: &[S]) -> CityDelta {
    let current: BTreeSet<&str> = current.iter().map(AsRef::as_ref).collect();
    let desired: BTreeSet<&str> = desired.iter().map(AsRef::as_ref).collect();

    CityDelta {
        to_add: desired.difference(&current).map(ToString::to_string).collect(),
        to_remove: current.difference(&desired).map(ToString::to_string).collect(),
    }
}
