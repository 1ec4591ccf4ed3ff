use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Whether a slot is sold to one client or by the seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Individual,
    Group,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i32,
    pub trainer_id: Option<i32>,
    pub service_id: Option<i32>,
    pub group_class_id: Option<i32>,
    pub dates: NaiveDate,
    pub times: NaiveTime,
    pub available: bool,
    pub available_spots: i32,
}

impl TimeSlot {
    pub fn kind(&self) -> SlotKind {
        if self.group_class_id.is_some() {
            SlotKind::Group
        } else {
            SlotKind::Individual
        }
    }

    /// Whether one more booking could currently be taken.
    ///
    /// Advisory only: the repository commit re-checks under a lock.
    pub fn has_capacity(&self) -> bool {
        match self.kind() {
            SlotKind::Individual => self.available,
            SlotKind::Group => self.available && self.available_spots > 0,
        }
    }
}

/// Slot row to insert; ids are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeSlot {
    pub trainer_id: Option<i32>,
    pub service_id: Option<i32>,
    pub group_class_id: Option<i32>,
    pub dates: NaiveDate,
    pub times: NaiveTime,
    pub available: bool,
    pub available_spots: i32,
}

/// Listing filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotFilter {
    pub trainer_id: Option<i32>,
    pub service_id: Option<i32>,
    pub group_class_id: Option<i32>,
    pub kind: Option<SlotKind>,
    pub date: Option<NaiveDate>,
    pub only_available: bool,
}

impl SlotFilter {
    pub fn matches(&self, slot: &TimeSlot) -> bool {
        self.trainer_id.is_none_or(|id| slot.trainer_id == Some(id))
            && self.service_id.is_none_or(|id| slot.service_id == Some(id))
            && self
                .group_class_id
                .is_none_or(|id| slot.group_class_id == Some(id))
            && self.kind.is_none_or(|kind| slot.kind() == kind)
            && self.date.is_none_or(|date| slot.dates == date)
            && (!self.only_available || slot.has_capacity())
    }
}

/// Admin request body for `POST /api/admin/time/add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub trainer_name: String,
    pub service_name: Option<String>,
    #[serde(alias = "group_name")]
    pub group_class_name: Option<String>,
    pub date: NaiveDate,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub available_spots: i32,
}

fn default_status() -> bool {
    true
}

impl CreateTimeSlotRequest {
    pub fn parse_time(&self) -> BookingResult<NaiveTime> {
        let raw = self.time.trim();
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map_err(|_| BookingError::validation(format!("Invalid time '{}', expected HH:MM", raw)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotResponse {
    pub message: String,
    pub time_slot: TimeSlot,
}
