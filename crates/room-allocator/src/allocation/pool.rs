use super::domain::{AllocatedRoom, RoomInventory};

/// One physical room in the working pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RoomSlot {
    pub(crate) capacity: u32,
    pub(crate) claimed: bool,
}

/// Rooms still open to the pass that receives this pool, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RoomPool {
    slots: Vec<RoomSlot>,
}

impl RoomPool {
    pub(crate) fn from_inventory(inventory: &RoomInventory) -> Self {
        let mut slots: Vec<RoomSlot> = inventory
            .by_capacity_desc()
            .flat_map(|(capacity, count)| {
                std::iter::repeat(RoomSlot {
                    capacity,
                    claimed: false,
                })
                .take(count as usize)
            })
            .collect();
        // Already descending by construction; the stable sort keeps that an invariant.
        slots.sort_by(|a, b| b.capacity.cmp(&a.capacity));
        Self { slots }
    }

    pub(crate) fn from_capacities<I: IntoIterator<Item = u32>>(capacities: I) -> Self {
        Self {
            slots: capacities
                .into_iter()
                .map(|capacity| RoomSlot {
                    capacity,
                    claimed: false,
                })
                .collect(),
        }
    }

    /// Marks the first unclaimed room as taken and returns its capacity.
    pub(crate) fn claim_first_open(&mut self) -> Option<u32> {
        let slot = self.slots.iter_mut().find(|slot| !slot.claimed)?;
        slot.claimed = true;
        Some(slot.capacity)
    }

    /// Drops every claimed room, keeping the order of the rest.
    pub(crate) fn into_unclaimed(self) -> Self {
        Self {
            slots: self
                .slots
                .into_iter()
                .filter(|slot| !slot.claimed)
                .collect(),
        }
    }

    /// Empty working rooms, one per open slot, in pool order.
    pub(crate) fn open_rooms(&self) -> Vec<AllocatedRoom> {
        self.slots
            .iter()
            .filter(|slot| !slot.claimed)
            .map(|slot| AllocatedRoom::empty(slot.capacity))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn capacities(&self) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|slot| !slot.claimed)
            .map(|slot| slot.capacity)
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.claimed).count()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_materializes_one_slot_per_room_descending() {
        let inventory = RoomInventory {
            capacity1: 2,
            capacity4: 1,
            capacity6: 1,
            ..RoomInventory::default()
        };
        let pool = RoomPool::from_inventory(&inventory);
        assert_eq!(pool.capacities(), vec![6, 4, 1, 1]);
    }

    #[test]
    fn claims_walk_the_pool_in_order() {
        let mut pool = RoomPool::from_capacities([5, 3, 2]);
        assert_eq!(pool.claim_first_open(), Some(5));
        assert_eq!(pool.claim_first_open(), Some(3));
        assert_eq!(pool.len(), 1);

        let rest = pool.into_unclaimed();
        assert_eq!(rest.capacities(), vec![2]);
        assert_eq!(rest.open_rooms(), vec![AllocatedRoom::empty(2)]);
    }

    #[test]
    fn empty_pool_has_nothing_to_claim() {
        let mut pool = RoomPool::from_inventory(&RoomInventory::default());
        assert!(pool.is_empty());
        assert_eq!(pool.claim_first_open(), None);
    }
}
