use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yoga_core::models::{
    booking::{Booking, BookingDetails},
    catalog::{GroupClass, Service, ServiceType, Trainer},
    time_slot::TimeSlot,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTrainer {
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub description: Option<String>,
    pub price: i32,
    pub service_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGroupClass {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub description: Option<String>,
    pub price: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: i32,
    pub trainer_id: Option<i32>,
    pub service_id: Option<i32>,
    pub group_class_id: Option<i32>,
    pub dates: NaiveDate,
    pub times: NaiveTime,
    pub available: bool,
    pub available_spots: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingDetails {
    pub booking_id: i32,
    pub service_name: Option<String>,
    pub trainer_name: Option<String>,
    pub class_name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl From<DbTrainer> for Trainer {
    fn from(row: DbTrainer) -> Self {
        Trainer {
            id: row.id,
            name: row.name,
            specialization: row.specialization,
            description: row.description,
            photo: row.photo,
        }
    }
}

impl TryFrom<DbService> for Service {
    type Error = Report;

    fn try_from(row: DbService) -> Result<Self, Self::Error> {
        let service_type = ServiceType::parse(&row.service_type)
            .ok_or_else(|| eyre!("Unknown service type '{}' on service {}", row.service_type, row.id))?;

        Ok(Service {
            id: row.id,
            name: row.name,
            duration: row.duration,
            description: row.description,
            price: row.price,
            service_type,
        })
    }
}

impl From<DbGroupClass> for GroupClass {
    fn from(row: DbGroupClass) -> Self {
        GroupClass {
            id: row.id,
            name: row.name,
            duration: row.duration,
            description: row.description,
            price: row.price,
        }
    }
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        TimeSlot {
            id: row.id,
            trainer_id: row.trainer_id,
            service_id: row.service_id,
            group_class_id: row.group_class_id,
            dates: row.dates,
            times: row.times,
            available: row.available,
            available_spots: row.available_spots,
        }
    }
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Booking {
            id: row.id,
            service_id: row.service_id,
            trainer_id: row.trainer_id,
            group_class_id: row.group_class_id,
            timeslot_id: row.timeslot_id,
            date: row.date,
            client_name: row.client_name,
            client_phone: row.client_phone,
            client_email: row.client_email,
            created_at: row.created_at,
        }
    }
}

impl From<DbBookingDetails> for BookingDetails {
    fn from(row: DbBookingDetails) -> Self {
        BookingDetails {
            booking_id: row.booking_id,
            service_name: row.service_name,
            trainer_name: row.trainer_name,
            class_name: row.class_name,
            date: row.date,
            time: row.time,
            created_at: row.created_at,
        }
    }
}
