use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub service_id: Option<i32>,
    pub trainer_id: Option<i32>,
    pub group_class_id: Option<i32>,
    pub timeslot_id: i32,
    pub date: NaiveDate,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Booking row handed to a repository commit; inserted in the same
/// transaction that consumes the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub service_id: Option<i32>,
    pub trainer_id: Option<i32>,
    pub group_class_id: Option<i32>,
    pub timeslot_id: i32,
    pub date: NaiveDate,
    pub contact: Option<ContactInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Raw body of `POST /api/bookings`.
///
/// Both booking shapes share one endpoint, so every field is optional here
/// and [`BookingRequest::try_from`] decides which shape was sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub service_id: Option<i32>,
    pub trainer_id: Option<i32>,
    pub class_id: Option<i32>,
    pub time_slot_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndividualBookingRequest {
    pub service_id: i32,
    pub trainer_id: i32,
    pub time_slot_id: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBookingRequest {
    pub class_id: i32,
    pub time_slot_id: i32,
    pub date: NaiveDate,
    pub contact: ContactInfo,
}

/// A booking request whose shape has been validated.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingRequest {
    Individual(IndividualBookingRequest),
    Group(GroupBookingRequest),
}

impl BookingRequest {
    pub fn time_slot_id(&self) -> i32 {
        match self {
            BookingRequest::Individual(request) => request.time_slot_id,
            BookingRequest::Group(request) => request.time_slot_id,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            BookingRequest::Individual(_) => "individual",
            BookingRequest::Group(_) => "group",
        }
    }
}

impl TryFrom<CreateBookingPayload> for BookingRequest {
    type Error = BookingError;

    fn try_from(payload: CreateBookingPayload) -> BookingResult<Self> {
        let individual = payload.service_id.is_some() || payload.trainer_id.is_some();
        let group = payload.class_id.is_some();

        if individual && group {
            return Err(BookingError::validation(
                "classId cannot be combined with serviceId or trainerId",
            ));
        }
        if !individual && !group {
            return Err(BookingError::validation(
                "Either serviceId and trainerId or classId is required",
            ));
        }

        let time_slot_id = payload
            .time_slot_id
            .ok_or_else(|| BookingError::validation("timeSlotId is required"))?;
        let date = payload
            .date
            .ok_or_else(|| BookingError::validation("date is required"))?;

        if individual {
            let service_id = payload
                .service_id
                .ok_or_else(|| BookingError::validation("serviceId is required"))?;
            let trainer_id = payload
                .trainer_id
                .ok_or_else(|| BookingError::validation("trainerId is required"))?;

            return Ok(BookingRequest::Individual(IndividualBookingRequest {
                service_id,
                trainer_id,
                time_slot_id,
                date,
            }));
        }

        let class_id = payload
            .class_id
            .ok_or_else(|| BookingError::validation("classId is required"))?;
        let name = required_text(payload.name, "name")?;
        let phone = required_text(payload.phone, "phone")?;
        let email = match payload.email.map(|email| email.trim().to_string()) {
            Some(email) if email.is_empty() => None,
            Some(email) if !email.contains('@') => {
                return Err(BookingError::validation("email is not a valid address"));
            }
            other => other,
        };

        Ok(BookingRequest::Group(GroupBookingRequest {
            class_id,
            time_slot_id,
            date,
            contact: ContactInfo { name, phone, email },
        }))
    }
}

fn required_text(value: Option<String>, field: &str) -> BookingResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BookingError::validation(format!("{} is required", field))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: i32,
}

/// Confirmation-screen projection of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub booking_id: i32,
    pub service_name: Option<String>,
    pub trainer_name: Option<String>,
    pub class_name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /api/booking-details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingDetailsResponse {
    Found(BookingDetails),
    Missing { error: String },
}

impl From<Option<BookingDetails>> for BookingDetailsResponse {
    fn from(details: Option<BookingDetails>) -> Self {
        match details {
            Some(details) => BookingDetailsResponse::Found(details),
            None => BookingDetailsResponse::Missing {
                error: "No booking found".to_string(),
            },
        }
    }
}
