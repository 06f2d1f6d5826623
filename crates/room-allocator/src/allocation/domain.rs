use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest room size the inventory tracks.
pub const MAX_ROOM_CAPACITY: u32 = 6;

/// Most rooms a single allocation run accepts.
pub const MAX_ROOMS_PER_RUN: u32 = 10_000;

/// Most people a single allocation run accepts, across all groups.
pub const MAX_PEOPLE_PER_RUN: u32 = 50_000;

/// Number of rooms available for each capacity from 1 to 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomInventory {
    pub capacity6: u32,
    pub capacity5: u32,
    pub capacity4: u32,
    pub capacity3: u32,
    pub capacity2: u32,
    pub capacity1: u32,
}

impl RoomInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RoomInventory::set_count`].
    pub fn with_rooms(mut self, capacity: u32, count: u32) -> Result<Self, InventoryError> {
        self.set_count(capacity, count)?;
        Ok(self)
    }

    pub fn count(&self, capacity: u32) -> u32 {
        match capacity {
            6 => self.capacity6,
            5 => self.capacity5,
            4 => self.capacity4,
            3 => self.capacity3,
            2 => self.capacity2,
            1 => self.capacity1,
            _ => 0,
        }
    }

    pub fn set_count(&mut self, capacity: u32, count: u32) -> Result<(), InventoryError> {
        *self.slot_mut(capacity)? = count;
        Ok(())
    }

    fn slot_mut(&mut self, capacity: u32) -> Result<&mut u32, InventoryError> {
        match capacity {
            6 => Ok(&mut self.capacity6),
            5 => Ok(&mut self.capacity5),
            4 => Ok(&mut self.capacity4),
            3 => Ok(&mut self.capacity3),
            2 => Ok(&mut self.capacity2),
            1 => Ok(&mut self.capacity1),
            other => Err(InventoryError::UnsupportedCapacity(other)),
        }
    }

    /// Capacities from largest to smallest, paired with their room counts.
    pub fn by_capacity_desc(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (1..=MAX_ROOM_CAPACITY)
            .rev()
            .map(move |capacity| (capacity, self.count(capacity)))
    }

    /// Saturates at `u32::MAX`.
    pub fn total_rooms(&self) -> u32 {
        saturating_sum(self.by_capacity_desc().map(|(_, count)| count))
    }

    /// Saturates at `u32::MAX`.
    pub fn total_beds(&self) -> u32 {
        saturating_sum(
            self.by_capacity_desc()
                .map(|(capacity, count)| capacity.saturating_mul(count)),
        )
    }

    /// Rejects inventories larger than one run may expand into rooms.
    pub fn check_limits(&self) -> Result<(), InventoryError> {
        let rooms = self.total_rooms();
        if rooms > MAX_ROOMS_PER_RUN {
            return Err(InventoryError::TooManyRooms {
                rooms,
                limit: MAX_ROOMS_PER_RUN,
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.total_rooms() == 0
    }
}

/// Parses the compact `"6=1,4=2"` form. Repeated capacities accumulate.
impl FromStr for RoomInventory {
    type Err = InventoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut inventory = RoomInventory::default();

        for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (capacity, count) = entry
                .split_once('=')
                .ok_or_else(|| InventoryError::MalformedEntry(entry.to_string()))?;
            let capacity = capacity
                .trim()
                .parse::<u32>()
                .map_err(|_| InventoryError::MalformedEntry(entry.to_string()))?;
            let count = count
                .trim()
                .parse::<u32>()
                .map_err(|_| InventoryError::MalformedEntry(entry.to_string()))?;

            let slot = inventory.slot_mut(capacity)?;
            *slot = slot
                .checked_add(count)
                .ok_or_else(|| InventoryError::MalformedEntry(entry.to_string()))?;
        }

        Ok(inventory)
    }
}

impl fmt::Display for RoomInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (capacity, count) in self.by_capacity_desc().filter(|(_, count)| *count > 0) {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{capacity}={count}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("room capacity {0} is not supported (expected 1 to 6)")]
    UnsupportedCapacity(u32),
    #[error("inventory entry '{0}' must look like <capacity>=<count>")]
    MalformedEntry(String),
    #[error("inventory holds {rooms} rooms, more than the {limit} a run accepts")]
    TooManyRooms { rooms: u32, limit: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Couple,
    Family,
    Men,
    Women,
}

impl GroupKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Couple => "couple",
            Self::Family => "family",
            Self::Men => "men",
            Self::Women => "women",
        }
    }
}

/// One unit of caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GroupRecord", into = "GroupRecord")]
pub enum PassengerGroup {
    Couple,
    Family { adults: u32, boys: u32, girls: u32 },
    Men { adults: u32 },
    Women { adults: u32 },
}

impl PassengerGroup {
    pub fn family(adults: u32, boys: u32, girls: u32) -> Self {
        Self::Family {
            adults,
            boys,
            girls,
        }
    }

    pub const fn kind(&self) -> GroupKind {
        match self {
            Self::Couple => GroupKind::Couple,
            Self::Family { .. } => GroupKind::Family,
            Self::Men { .. } => GroupKind::Men,
            Self::Women { .. } => GroupKind::Women,
        }
    }

    /// Head count the group contributes to an allocation run.
    pub fn size(&self) -> u32 {
        match *self {
            Self::Couple => 2,
            Self::Family {
                adults,
                boys,
                girls,
            } => adults.saturating_add(boys).saturating_add(girls),
            Self::Men { adults } | Self::Women { adults } => adults,
        }
    }

    /// Single-gender groups report the gender their members expand into.
    pub const fn single_gender(&self) -> Option<Gender> {
        match self {
            Self::Men { .. } => Some(Gender::Male),
            Self::Women { .. } => Some(Gender::Female),
            Self::Couple | Self::Family { .. } => None,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            Self::Couple => "Couple (2 adults)".to_string(),
            Self::Family {
                adults,
                boys,
                girls,
            } => format!(
                "Family ({} {}, {} {}, {} {})",
                adults,
                plural(adults, "adult", "adults"),
                boys,
                plural(boys, "boy", "boys"),
                girls,
                plural(girls, "girl", "girls"),
            ),
            Self::Men { adults } => format!("{} {}", adults, plural(adults, "man", "men")),
            Self::Women { adults } => format!("{} {}", adults, plural(adults, "woman", "women")),
        }
    }
}

pub(crate) fn saturating_sum<I: IntoIterator<Item = u32>>(values: I) -> u32 {
    values.into_iter().fold(0, u32::saturating_add)
}

fn plural(count: u32, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Wire form of a passenger group, as submitted by forms, JSON bodies and manifest rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(rename = "type")]
    pub kind: GroupKind,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub boys: u32,
    #[serde(default)]
    pub girls: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl TryFrom<GroupRecord> for PassengerGroup {
    type Error = GroupValidationError;

    fn try_from(record: GroupRecord) -> Result<Self, Self::Error> {
        let GroupRecord {
            kind,
            adults,
            boys,
            girls,
            gender,
        } = record;

        match kind {
            GroupKind::Couple => {
                if adults != 2 || boys != 0 || girls != 0 {
                    return Err(GroupValidationError::InvalidCouple {
                        adults,
                        boys,
                        girls,
                    });
                }
                Ok(Self::Couple)
            }
            GroupKind::Family => {
                if adults == 0 {
                    return Err(GroupValidationError::FamilyWithoutAdults);
                }
                adults
                    .checked_add(boys)
                    .and_then(|size| size.checked_add(girls))
                    .filter(|size| *size <= MAX_PEOPLE_PER_RUN)
                    .ok_or(GroupValidationError::GroupTooLarge {
                        kind,
                        limit: MAX_PEOPLE_PER_RUN,
                    })?;
                Ok(Self::Family {
                    adults,
                    boys,
                    girls,
                })
            }
            GroupKind::Men | GroupKind::Women => {
                if boys != 0 || girls != 0 {
                    return Err(GroupValidationError::ChildrenInSingleGroup { kind });
                }
                if adults > MAX_PEOPLE_PER_RUN {
                    return Err(GroupValidationError::GroupTooLarge {
                        kind,
                        limit: MAX_PEOPLE_PER_RUN,
                    });
                }
                let group = if kind == GroupKind::Men {
                    Self::Men { adults }
                } else {
                    Self::Women { adults }
                };
                match (gender, group.single_gender()) {
                    (Some(declared), Some(expected)) if declared != expected => {
                        Err(GroupValidationError::GenderMismatch { kind, declared })
                    }
                    _ => Ok(group),
                }
            }
        }
    }
}

impl From<PassengerGroup> for GroupRecord {
    fn from(group: PassengerGroup) -> Self {
        let kind = group.kind();
        let gender = group.single_gender();
        let (adults, boys, girls) = match group {
            PassengerGroup::Couple => (2, 0, 0),
            PassengerGroup::Family {
                adults,
                boys,
                girls,
            } => (adults, boys, girls),
            PassengerGroup::Men { adults } | PassengerGroup::Women { adults } => (adults, 0, 0),
        };

        GroupRecord {
            kind,
            adults,
            boys,
            girls,
            gender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    #[error("a couple must be exactly two adults without children (got {adults} adults, {boys} boys, {girls} girls)")]
    InvalidCouple { adults: u32, boys: u32, girls: u32 },
    #[error("a family needs at least one adult")]
    FamilyWithoutAdults,
    #[error("a {} group cannot include children", .kind.label())]
    ChildrenInSingleGroup { kind: GroupKind },
    #[error("a {} group cannot be declared {}", .kind.label(), .declared.label())]
    GenderMismatch { kind: GroupKind, declared: Gender },
    #[error("a {} group cannot hold more than {limit} people", .kind.label())]
    GroupTooLarge { kind: GroupKind, limit: u32 },
    #[error("groups add up to {people} people, more than the {limit} a run accepts")]
    TooManyPeople { people: u32, limit: u32 },
}

/// Rejects a group list larger than one run may expand into occupants.
pub fn check_group_limits(groups: &[PassengerGroup]) -> Result<(), GroupValidationError> {
    let people = saturating_sum(groups.iter().map(PassengerGroup::size));
    if people > MAX_PEOPLE_PER_RUN {
        return Err(GroupValidationError::TooManyPeople {
            people,
            limit: MAX_PEOPLE_PER_RUN,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupantKind {
    Couple,
    Family,
    SingleMan,
    SingleWoman,
}

/// A placement unit: a whole family or couple, a fragment of one, or a single person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub kind: OccupantKind,
    /// Position of the originating group in the caller's input.
    pub group: usize,
    pub size: u32,
    pub original_size: u32,
    pub description: String,
}

impl Occupant {
    pub(crate) fn single(group: usize, gender: Gender) -> Self {
        let (kind, description) = match gender {
            Gender::Male => (OccupantKind::SingleMan, "Man"),
            Gender::Female => (OccupantKind::SingleWoman, "Woman"),
        };
        Self {
            kind,
            group,
            size: 1,
            original_size: 1,
            description: description.to_string(),
        }
    }

    pub(crate) fn household(group: usize, source: &PassengerGroup) -> Self {
        let kind = match source {
            PassengerGroup::Couple => OccupantKind::Couple,
            _ => OccupantKind::Family,
        };
        let size = source.size();
        Self {
            kind,
            group,
            size,
            original_size: size,
            description: source.label(),
        }
    }

    /// The part of this household seated in one room.
    pub(crate) fn fragment(&self, seated: u32) -> Self {
        Self {
            size: seated,
            description: format!("{} ({} of {})", self.description, seated, self.original_size),
            ..self.clone()
        }
    }

    /// The part of this household left without a room.
    pub(crate) fn shortfall(&self, remaining: u32) -> Self {
        Self {
            size: remaining,
            description: format!("{} - {} unallocated", self.description, remaining),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatedRoom {
    pub capacity: u32,
    pub occupants: Vec<Occupant>,
    pub occupancy: u32,
}

impl AllocatedRoom {
    pub(crate) fn empty(capacity: u32) -> Self {
        Self {
            capacity,
            occupants: Vec::new(),
            occupancy: 0,
        }
    }

    pub(crate) fn has_space(&self) -> bool {
        self.occupancy < self.capacity
    }

    pub(crate) fn seat(&mut self, occupant: Occupant) {
        self.occupancy += occupant.size;
        self.occupants.push(occupant);
    }

    pub fn free_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.occupancy)
    }
}

/// Outcome of one allocation run. Built once and handed to the caller as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub family_rooms: Vec<AllocatedRoom>,
    pub men_rooms: Vec<AllocatedRoom>,
    pub women_rooms: Vec<AllocatedRoom>,
    pub unallocated: Vec<Occupant>,
}

impl AllocationResult {
    pub fn rooms(&self) -> impl Iterator<Item = &AllocatedRoom> {
        self.family_rooms
            .iter()
            .chain(&self.men_rooms)
            .chain(&self.women_rooms)
    }

    pub fn placed_people(&self) -> u32 {
        saturating_sum(self.rooms().map(|room| room.occupancy))
    }

    pub fn unallocated_people(&self) -> u32 {
        saturating_sum(self.unallocated.iter().map(|occupant| occupant.size))
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.unallocated.is_empty()
    }
}
