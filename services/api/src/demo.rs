use crate::routes::AllocationResponse;
use clap::Args;
use room_allocator::allocation::{
    try_allocate, AllocatedRoom, AllocationResult, AllocationSummary, PassengerGroup,
    RoomInventory,
};
use room_allocator::config::AppConfig;
use room_allocator::error::AppError;
use room_allocator::manifest::ManifestImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    /// Passenger manifest CSV (columns: type,adults,boys,girls,gender)
    #[arg(long)]
    pub(crate) manifest: PathBuf,
    /// Room inventory, e.g. 6=1,4=2 (defaults to APP_DEFAULT_INVENTORY)
    #[arg(long, value_parser = crate::infra::parse_inventory)]
    pub(crate) inventory: Option<RoomInventory>,
    /// Print the allocation as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Room inventory, e.g. 6=1,4=2 (defaults to a sample hotel block)
    #[arg(long, value_parser = crate::infra::parse_inventory)]
    pub(crate) inventory: Option<RoomInventory>,
    /// Print the allocation as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_allocate(args: AllocateArgs) -> Result<(), AppError> {
    let AllocateArgs {
        manifest,
        inventory,
        json,
    } = args;

    let inventory = match inventory {
        Some(inventory) => inventory,
        None => AppConfig::load()?.allocation.default_inventory,
    };
    let groups = ManifestImporter::from_path(manifest)?;
    let result = try_allocate(&inventory, &groups)?;

    if json {
        print_json(inventory, result);
    } else {
        let summary = result.summary(&inventory);
        render_allocation(&inventory, &groups, &result, &summary);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { inventory, json } = args;

    let inventory = inventory.unwrap_or_else(demo_inventory);
    let groups = demo_groups();
    let result = try_allocate(&inventory, &groups)?;

    if json {
        print_json(inventory, result);
    } else {
        println!("Pilgrim room allocation demo");
        let summary = result.summary(&inventory);
        render_allocation(&inventory, &groups, &result, &summary);
    }

    Ok(())
}

pub(crate) fn demo_inventory() -> RoomInventory {
    RoomInventory {
        capacity6: 2,
        capacity5: 1,
        capacity4: 3,
        capacity3: 2,
        capacity2: 4,
        capacity1: 2,
    }
}

pub(crate) fn demo_groups() -> Vec<PassengerGroup> {
    vec![
        PassengerGroup::family(2, 2, 2),
        PassengerGroup::Couple,
        PassengerGroup::Men { adults: 9 },
        PassengerGroup::family(2, 3, 2),
        PassengerGroup::Women { adults: 7 },
        PassengerGroup::family(1, 1, 1),
        PassengerGroup::Couple,
    ]
}

fn print_json(inventory: RoomInventory, result: AllocationResult) {
    let response = AllocationResponse::new(inventory, result, true);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Allocation payload unavailable: {}", err),
    }
}

pub(crate) fn render_allocation(
    inventory: &RoomInventory,
    groups: &[PassengerGroup],
    result: &AllocationResult,
    summary: &AllocationSummary,
) {
    println!(
        "Inventory: {} rooms / {} beds ({})",
        inventory.total_rooms(),
        inventory.total_beds(),
        inventory
    );

    println!("\nGroups");
    for (index, group) in groups.iter().enumerate() {
        println!("- #{} {}", index + 1, group.label());
    }

    render_rooms("Family rooms", &result.family_rooms, |room| {
        room.occupants
            .iter()
            .map(|occupant| occupant.description.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    });
    render_rooms("Men's rooms", &result.men_rooms, |room| {
        format!("{} men", room.occupants.len())
    });
    render_rooms("Women's rooms", &result.women_rooms, |room| {
        format!("{} women", room.occupants.len())
    });

    if result.unallocated.is_empty() {
        println!("\nAll pilgrims were allocated a room.");
    } else {
        println!("\nUnallocated pilgrims");
        for occupant in &result.unallocated {
            println!("- {}", occupant.description);
        }
        println!("Add more rooms to seat these pilgrims.");
    }

    println!(
        "\nPlaced {}/{} people | {} of {} rooms used | {} idle beds in used rooms",
        summary.placed_people,
        summary.total_people,
        summary.rooms_used,
        summary.rooms_available,
        summary.idle_beds_in_used_rooms
    );
}

fn render_rooms<F>(title: &str, rooms: &[AllocatedRoom], describe: F)
where
    F: Fn(&AllocatedRoom) -> String,
{
    if rooms.is_empty() {
        return;
    }

    println!("\n{} ({})", title, rooms.len());
    for (index, room) in rooms.iter().enumerate() {
        println!(
            "- Room {} (capacity {}, occupied {}): {}",
            index + 1,
            room.capacity,
            room.occupancy,
            describe(room)
        );
    }
}
