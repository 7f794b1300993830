//! Room model.

use serde::{Deserialize, Serialize};

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Classroom,
    Laboratory,
    Auditorium,
    SeminarHall,
    ExamHall,
}

/// A physical room that can host sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Room number (e.g. "301").
    pub room_number: String,
    /// Display name (e.g. "Classroom 301").
    pub room_name: String,
    /// Room classification.
    pub room_type: RoomType,
    /// Seating capacity.
    pub capacity: u32,
    /// Floor number.
    pub floor: i32,
    /// Building name.
    pub building: String,
    /// Facility tags (e.g. "projector", "smart_board").
    pub facilities: Vec<String>,
    /// Unavailable rooms are excluded from placement.
    pub is_available: bool,
}

impl Room {
    /// Creates a new available classroom.
    pub fn new(
        id: impl Into<String>,
        room_number: impl Into<String>,
        room_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            room_number: room_number.into(),
            room_name: room_name.into(),
            room_type: RoomType::Classroom,
            capacity: 60,
            floor: 0,
            building: String::new(),
            facilities: Vec::new(),
            is_available: true,
        }
    }

    /// Sets the room type.
    pub fn with_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets floor and building.
    pub fn with_location(mut self, floor: i32, building: impl Into<String>) -> Self {
        self.floor = floor;
        self.building = building.into();
        self
    }

    /// Adds a facility tag.
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facilities.push(facility.into());
        self
    }

    /// Sets the availability flag.
    pub fn with_available(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    /// Whether this room has a given facility tag.
    pub fn has_facility(&self, facility: &str) -> bool {
        self.facilities.iter().any(|f| f == facility)
    }
}
