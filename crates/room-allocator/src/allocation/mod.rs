//! Segregated room allocation.
//!
//! Groups are seated in three passes over one room pool sorted largest
//! first: households (couples and families), then single men, then single
//! women. Each pass takes the pool left by the previous one and returns what
//! it did not use, so no room is ever shared across passes. The placement is
//! a greedy heuristic; tie-break order (room size, household size, input
//! order) is part of the contract and keeps runs reproducible.

pub mod domain;
mod family;
mod pool;
pub mod report;
mod singles;

pub use domain::{
    check_group_limits, AllocatedRoom, AllocationResult, Gender, GroupKind, GroupRecord,
    GroupValidationError, InventoryError, Occupant, OccupantKind, PassengerGroup, RoomInventory,
    MAX_PEOPLE_PER_RUN, MAX_ROOMS_PER_RUN, MAX_ROOM_CAPACITY,
};
pub use report::{AllocationSummary, CategoryBreakdown, RoomCategory};
pub use singles::{ExcludeTouchedRooms, PoolHandoff};

use pool::RoomPool;
use tracing::debug;

/// Rooms filled by one pass and the people it could not seat.
#[derive(Debug, Default)]
pub(crate) struct PassOutcome {
    pub(crate) rooms: Vec<AllocatedRoom>,
    pub(crate) unallocated: Vec<Occupant>,
}

/// Input a run refuses before expanding it into rooms and occupants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Groups(#[from] GroupValidationError),
}

/// Runs an allocation with the default [`ExcludeTouchedRooms`] handoff.
///
/// Input is trusted; use [`try_allocate`] for request or file data.
pub fn allocate(inventory: &RoomInventory, groups: &[PassengerGroup]) -> AllocationResult {
    Allocator::with_handoff(ExcludeTouchedRooms).allocate(inventory, groups)
}

/// [`allocate`] behind the per-run room and people limits.
pub fn try_allocate(
    inventory: &RoomInventory,
    groups: &[PassengerGroup],
) -> Result<AllocationResult, AllocationError> {
    Allocator::with_handoff(ExcludeTouchedRooms).try_allocate(inventory, groups)
}

/// Allocation entry point carrying the rule that decides which rooms the
/// men's pass leaves for the women's pass.
#[derive(Debug, Clone, Default)]
pub struct Allocator<H = ExcludeTouchedRooms> {
    handoff: H,
}

impl<H: PoolHandoff> Allocator<H> {
    pub fn with_handoff(handoff: H) -> Self {
        Self { handoff }
    }

    pub fn try_allocate(
        &self,
        inventory: &RoomInventory,
        groups: &[PassengerGroup],
    ) -> Result<AllocationResult, AllocationError> {
        inventory.check_limits()?;
        check_group_limits(groups)?;
        Ok(self.allocate(inventory, groups))
    }

    pub fn allocate(&self, inventory: &RoomInventory, groups: &[PassengerGroup]) -> AllocationResult {
        let Expanded {
            households,
            men,
            women,
        } = expand(groups);
        let pool = RoomPool::from_inventory(inventory);
        debug!(
            rooms = pool.len(),
            households = households.len(),
            men = men.len(),
            women = women.len(),
            "starting allocation"
        );

        let (pool, families) = family::place_families(pool, households);
        let (pool, men) = singles::pack_singles(pool, men, &self.handoff);
        let (pool, women) = singles::pack_singles(pool, women, &self.handoff);

        let mut unallocated = families.unallocated;
        unallocated.extend(men.unallocated);
        unallocated.extend(women.unallocated);

        let result = AllocationResult {
            family_rooms: families.rooms,
            men_rooms: men.rooms,
            women_rooms: women.rooms,
            unallocated,
        };
        debug!(
            family_rooms = result.family_rooms.len(),
            men_rooms = result.men_rooms.len(),
            women_rooms = result.women_rooms.len(),
            unallocated_people = result.unallocated_people(),
            idle_rooms = pool.len(),
            "allocation finished"
        );
        result
    }
}

struct Expanded {
    households: Vec<Occupant>,
    men: Vec<Occupant>,
    women: Vec<Occupant>,
}

fn expand(groups: &[PassengerGroup]) -> Expanded {
    let mut expanded = Expanded {
        households: Vec::new(),
        men: Vec::new(),
        women: Vec::new(),
    };

    for (index, group) in groups.iter().enumerate() {
        match *group {
            PassengerGroup::Couple | PassengerGroup::Family { .. } => {
                expanded.households.push(Occupant::household(index, group));
            }
            PassengerGroup::Men { adults } => expanded
                .men
                .extend((0..adults).map(|_| Occupant::single(index, Gender::Male))),
            PassengerGroup::Women { adults } => expanded
                .women
                .extend((0..adults).map(|_| Occupant::single(index, Gender::Female))),
        }
    }

    expanded
}
