use super::domain::{AllocatedRoom, Occupant};
use super::pool::RoomPool;
use super::PassOutcome;
use tracing::debug;

/// Decides which rooms a single-gender pass leaves for the next one.
///
/// `packed` holds every room the pass was offered, in pool order, including
/// the ones it never touched. The returned capacities form the next pool, in
/// the order given.
pub trait PoolHandoff: Send + Sync {
    fn hand_off(&self, packed: &[AllocatedRoom]) -> Vec<u32>;
}

/// A room that received anyone is gone for good, spare seats included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExcludeTouchedRooms;

impl PoolHandoff for ExcludeTouchedRooms {
    fn hand_off(&self, packed: &[AllocatedRoom]) -> Vec<u32> {
        packed
            .iter()
            .filter(|room| room.occupants.is_empty())
            .map(|room| room.capacity)
            .collect()
    }
}

/// First-fit packing of single people into shared rooms.
///
/// Every person goes to the first room, in pool order, that still has a free
/// seat. People who find none are reported one entry each.
pub(crate) fn pack_singles<H>(
    pool: RoomPool,
    people: Vec<Occupant>,
    handoff: &H,
) -> (RoomPool, PassOutcome)
where
    H: PoolHandoff + ?Sized,
{
    let mut rooms = pool.open_rooms();
    let mut unallocated = Vec::new();

    for person in people {
        match rooms.iter_mut().find(|room| room.has_space()) {
            Some(room) => room.seat(person),
            None => {
                debug!(group = person.group, kind = ?person.kind, "no seat left for single");
                unallocated.push(person);
            }
        }
    }

    let rest = RoomPool::from_capacities(handoff.hand_off(&rooms));
    rooms.retain(|room| !room.occupants.is_empty());

    (rest, PassOutcome { rooms, unallocated })
}
