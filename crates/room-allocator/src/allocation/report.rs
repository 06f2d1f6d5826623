use super::domain::{saturating_sum, AllocatedRoom, AllocationResult, RoomInventory};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Family,
    Men,
    Women,
}

impl RoomCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Family, Self::Men, Self::Women]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Family => "Family rooms",
            Self::Men => "Men's rooms",
            Self::Women => "Women's rooms",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: RoomCategory,
    pub category_label: &'static str,
    pub rooms: usize,
    pub occupancy: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationSummary {
    pub total_people: u32,
    pub placed_people: u32,
    pub unallocated_people: u32,
    pub rooms_available: u32,
    pub rooms_used: usize,
    pub beds_available: u32,
    pub beds_occupied: u32,
    /// Empty beds inside rooms that were handed to someone.
    pub idle_beds_in_used_rooms: u32,
    pub categories: Vec<CategoryBreakdown>,
    pub fully_allocated: bool,
}

impl AllocationResult {
    pub fn rooms_for(&self, category: RoomCategory) -> &[AllocatedRoom] {
        match category {
            RoomCategory::Family => &self.family_rooms,
            RoomCategory::Men => &self.men_rooms,
            RoomCategory::Women => &self.women_rooms,
        }
    }

    /// Totals for rendering, measured against the inventory the run used.
    pub fn summary(&self, inventory: &RoomInventory) -> AllocationSummary {
        let categories: Vec<CategoryBreakdown> = RoomCategory::ordered()
            .into_iter()
            .map(|category| {
                let rooms = self.rooms_for(category);
                CategoryBreakdown {
                    category,
                    category_label: category.label(),
                    rooms: rooms.len(),
                    occupancy: saturating_sum(rooms.iter().map(|room| room.occupancy)),
                    capacity: saturating_sum(rooms.iter().map(|room| room.capacity)),
                }
            })
            .collect();

        let placed_people = self.placed_people();
        let unallocated_people = self.unallocated_people();
        let used_capacity = saturating_sum(categories.iter().map(|entry| entry.capacity));

        AllocationSummary {
            total_people: placed_people.saturating_add(unallocated_people),
            placed_people,
            unallocated_people,
            rooms_available: inventory.total_rooms(),
            rooms_used: categories.iter().map(|entry| entry.rooms).sum(),
            beds_available: inventory.total_beds(),
            beds_occupied: placed_people,
            idle_beds_in_used_rooms: used_capacity.saturating_sub(placed_people),
            categories,
            fully_allocated: self.is_fully_allocated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::allocation::{allocate, PassengerGroup, RoomCategory, RoomInventory};

    #[test]
    fn summary_counts_people_rooms_and_idle_beds() {
        let inventory: RoomInventory = "4=1,3=1,2=1".parse().expect("inventory");
        let result = allocate(
            &inventory,
            &[
                PassengerGroup::Couple,
                PassengerGroup::Men { adults: 2 },
                PassengerGroup::Women { adults: 3 },
            ],
        );
        let summary = result.summary(&inventory);

        // couple -> 4, men -> 3 (one seat left), women -> 2 (one woman left over)
        assert_eq!(summary.total_people, 7);
        assert_eq!(summary.placed_people, 6);
        assert_eq!(summary.unallocated_people, 1);
        assert_eq!(summary.rooms_available, 3);
        assert_eq!(summary.rooms_used, 3);
        assert_eq!(summary.beds_available, 9);
        assert_eq!(summary.idle_beds_in_used_rooms, 3);
        assert!(!summary.fully_allocated);

        let men = summary
            .categories
            .iter()
            .find(|entry| entry.category == RoomCategory::Men)
            .expect("men category present");
        assert_eq!((men.rooms, men.occupancy, men.capacity), (1, 2, 3));
    }

    #[test]
    fn summary_of_a_huge_inventory_saturates_bed_totals() {
        let inventory = RoomInventory {
            capacity6: 1_000_000_000,
            ..RoomInventory::default()
        };
        let summary = allocate(&RoomInventory::default(), &[]).summary(&inventory);
        assert_eq!(summary.rooms_available, 1_000_000_000);
        assert_eq!(summary.beds_available, u32::MAX);
        assert_eq!(summary.rooms_used, 0);
    }

    #[test]
    fn empty_run_is_fully_allocated() {
        let inventory = RoomInventory::default();
        let summary = allocate(&inventory, &[]).summary(&inventory);
        assert_eq!(summary.total_people, 0);
        assert_eq!(summary.categories.len(), 3);
        assert!(summary.fully_allocated);
    }
}
