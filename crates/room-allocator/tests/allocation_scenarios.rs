use room_allocator::allocation::{
    allocate, AllocatedRoom, AllocationResult, OccupantKind, PassengerGroup, RoomInventory,
};
use std::collections::HashSet;

fn inventory(raw: &str) -> RoomInventory {
    raw.parse().expect("valid inventory")
}

fn input_people(groups: &[PassengerGroup]) -> u32 {
    groups.iter().map(PassengerGroup::size).sum()
}

fn assert_invariants(groups: &[PassengerGroup], result: &AllocationResult) {
    assert_eq!(
        result.placed_people() + result.unallocated_people(),
        input_people(groups),
        "every person is either placed or unallocated"
    );

    for room in result.rooms() {
        assert!(room.occupancy <= room.capacity, "room over capacity: {room:?}");
        assert_eq!(
            room.occupancy,
            room.occupants.iter().map(|o| o.size).sum::<u32>(),
            "occupancy matches occupants"
        );
        assert!(!room.occupants.is_empty(), "reported rooms hold someone");
    }

    for room in &result.family_rooms {
        let groups: HashSet<usize> = room.occupants.iter().map(|o| o.group).collect();
        assert_eq!(groups.len(), 1, "family room mixes households: {room:?}");
        assert!(room
            .occupants
            .iter()
            .all(|o| matches!(o.kind, OccupantKind::Couple | OccupantKind::Family)));
    }

    let only = |rooms: &[AllocatedRoom], kind: OccupantKind| {
        rooms
            .iter()
            .flat_map(|room| &room.occupants)
            .all(|occupant| occupant.kind == kind)
    };
    assert!(only(&result.men_rooms, OccupantKind::SingleMan));
    assert!(only(&result.women_rooms, OccupantKind::SingleWoman));
}

#[test]
fn family_matching_room_size_takes_one_room() {
    let groups = [PassengerGroup::family(2, 2, 2)];
    let result = allocate(&inventory("6=1"), &groups);

    assert_eq!(result.family_rooms.len(), 1);
    assert_eq!(result.family_rooms[0].capacity, 6);
    assert_eq!(result.family_rooms[0].occupancy, 6);
    assert!(result.unallocated.is_empty());
    assert_invariants(&groups, &result);
}

#[test]
fn family_larger_than_inventory_leaves_remainder_unallocated() {
    let groups = [PassengerGroup::family(2, 2, 2)];
    let result = allocate(&inventory("4=1"), &groups);

    assert_eq!(result.family_rooms.len(), 1);
    let room = &result.family_rooms[0];
    assert_eq!((room.capacity, room.occupancy), (4, 4));
    assert_eq!(room.occupants[0].size, 4);
    assert_eq!(room.occupants[0].original_size, 6);
    assert!(room.occupants[0].description.contains("4 of 6"));

    assert_eq!(result.unallocated.len(), 1);
    assert_eq!(result.unallocated[0].size, 2);
    assert_invariants(&groups, &result);
}

#[test]
fn single_men_fill_rooms_first_fit() {
    let groups = [PassengerGroup::Men { adults: 3 }];
    let result = allocate(&inventory("2=2"), &groups);

    assert_eq!(result.men_rooms.len(), 2);
    assert_eq!(
        (result.men_rooms[0].capacity, result.men_rooms[0].occupancy),
        (2, 2)
    );
    assert_eq!(
        (result.men_rooms[1].capacity, result.men_rooms[1].occupancy),
        (2, 1)
    );
    assert!(result.unallocated.is_empty());
    assert_invariants(&groups, &result);
}

#[test]
fn room_touched_by_men_is_closed_to_women() {
    let groups = [
        PassengerGroup::Men { adults: 1 },
        PassengerGroup::Women { adults: 1 },
    ];
    let result = allocate(&inventory("2=1"), &groups);

    assert_eq!(result.men_rooms.len(), 1);
    assert_eq!(result.men_rooms[0].free_beds(), 1);
    assert!(result.women_rooms.is_empty());
    assert_eq!(result.unallocated.len(), 1);
    assert_eq!(result.unallocated[0].kind, OccupantKind::SingleWoman);
    assert_invariants(&groups, &result);
}

#[test]
fn empty_inventory_leaves_everyone_unallocated() {
    let groups = [
        PassengerGroup::family(1, 1, 1),
        PassengerGroup::Couple,
        PassengerGroup::Men { adults: 2 },
        PassengerGroup::Women { adults: 1 },
    ];
    let result = allocate(&RoomInventory::default(), &groups);

    assert_eq!(result.rooms().count(), 0);
    assert_eq!(result.unallocated_people(), 8);
    // one entry per household, one per single
    assert_eq!(result.unallocated.len(), 2 + 2 + 1);
    assert_invariants(&groups, &result);
}

#[test]
fn empty_group_list_yields_empty_result() {
    let result = allocate(&inventory("6=3,2=2"), &[]);
    assert_eq!(result, AllocationResult::default());
}

#[test]
fn zero_adult_single_groups_are_no_ops() {
    let groups = [
        PassengerGroup::Men { adults: 0 },
        PassengerGroup::Women { adults: 0 },
    ];
    let result = allocate(&inventory("1=1"), &groups);
    assert_eq!(result, AllocationResult::default());
}

#[test]
fn household_fragments_never_share_rooms_across_families() {
    let groups = [
        PassengerGroup::family(2, 3, 2),
        PassengerGroup::family(2, 2, 1),
        PassengerGroup::Couple,
    ];
    let result = allocate(&inventory("4=2,3=1,2=2"), &groups);

    // 7 -> 4+4, 5 -> 3+2, couple -> 2
    let seated: Vec<(usize, u32, u32)> = result
        .family_rooms
        .iter()
        .map(|room| (room.occupants[0].group, room.capacity, room.occupancy))
        .collect();
    assert_eq!(
        seated,
        vec![(0, 4, 4), (0, 4, 3), (1, 3, 3), (1, 2, 2), (2, 2, 2)]
    );
    assert!(result.unallocated.is_empty());
    assert_invariants(&groups, &result);
}

#[test]
fn allocation_is_deterministic() {
    let groups = [
        PassengerGroup::Women { adults: 5 },
        PassengerGroup::family(1, 2, 2),
        PassengerGroup::Men { adults: 7 },
        PassengerGroup::Couple,
        PassengerGroup::family(2, 0, 1),
    ];
    let inventory = inventory("5=1,4=2,3=1,2=3,1=2");

    let first = allocate(&inventory, &groups);
    let second = allocate(&inventory, &groups);
    assert_eq!(first, second);
}

#[test]
fn invariants_hold_across_inventory_and_group_mixes() {
    let inventories = [
        "",
        "1=1",
        "6=1",
        "2=3",
        "6=1,1=4",
        "5=2,3=2,2=1",
        "4=3,3=3,2=3,1=3",
        "6=2,5=2,4=2,3=2,2=2,1=2",
    ];
    let group_sets: Vec<Vec<PassengerGroup>> = vec![
        vec![PassengerGroup::family(3, 4, 2)],
        vec![
            PassengerGroup::Men { adults: 5 },
            PassengerGroup::Women { adults: 4 },
        ],
        vec![
            PassengerGroup::Couple,
            PassengerGroup::Couple,
            PassengerGroup::Women { adults: 3 },
        ],
        vec![
            PassengerGroup::family(2, 1, 0),
            PassengerGroup::Men { adults: 2 },
            PassengerGroup::family(1, 3, 3),
            PassengerGroup::Women { adults: 6 },
            PassengerGroup::Couple,
            PassengerGroup::Men { adults: 1 },
        ],
    ];

    for raw in inventories {
        let inventory = inventory(raw);
        for groups in &group_sets {
            let result = allocate(&inventory, groups);
            assert_invariants(groups, &result);
            assert!(result.rooms().count() as u32 <= inventory.total_rooms());
        }
    }
}
