use super::domain::{AllocatedRoom, Occupant};
use super::pool::RoomPool;
use super::PassOutcome;
use std::cmp::Reverse;
use tracing::debug;

/// Seats couples and families, largest household first.
///
/// Each fragment gets a room to itself: a room that only partly absorbs a
/// household is still closed to everyone else. When the pool runs dry the
/// household's whole remainder becomes a single shortfall entry.
///
/// Returns the rooms nobody claimed, in their original order.
pub(crate) fn place_families(
    mut pool: RoomPool,
    mut households: Vec<Occupant>,
) -> (RoomPool, PassOutcome) {
    // Stable, so equal sizes keep input order.
    households.sort_by_key(|household| Reverse(household.size));

    let mut outcome = PassOutcome::default();

    for household in &households {
        let mut remaining = household.size;

        while remaining > 0 {
            let Some(capacity) = pool.claim_first_open() else {
                debug!(
                    group = household.group,
                    remaining, "no room left for household"
                );
                outcome.unallocated.push(household.shortfall(remaining));
                break;
            };

            let seated = remaining.min(capacity);
            let mut room = AllocatedRoom::empty(capacity);
            room.seat(household.fragment(seated));
            outcome.rooms.push(room);
            remaining -= seated;
        }
    }

    (pool.into_unclaimed(), outcome)
}
