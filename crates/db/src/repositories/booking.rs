use crate::models::{DbBooking, DbBookingDetails};
use chrono::Utc;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use yoga_core::models::booking::NewBooking;

const DETAILS_SELECT: &str = r#"
    SELECT b.id AS booking_id,
           s.name AS service_name,
           t.name AS trainer_name,
           g.name AS class_name,
           ts.dates AS date,
           ts.times AS time,
           b.created_at
    FROM bookings b
    JOIN time_slots ts ON ts.id = b.timeslot_id
    LEFT JOIN services s ON s.id = b.service_id
    LEFT JOIN trainers t ON t.id = b.trainer_id
    LEFT JOIN group_classes g ON g.id = b.group_class_id
"#;

/// Inserts a booking row. Callers run this inside the transaction that
/// consumed the slot.
pub async fn create_booking(conn: &mut PgConnection, booking: &NewBooking) -> Result<DbBooking> {
    let now = Utc::now();
    let contact = booking.contact.as_ref();

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (service_id, trainer_id, group_class_id, timeslot_id, date,
                              client_name, client_phone, client_email, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, service_id, trainer_id, group_class_id, timeslot_id, date,
                  client_name, client_phone, client_email, created_at
        "#,
    )
    .bind(booking.service_id)
    .bind(booking.trainer_id)
    .bind(booking.group_class_id)
    .bind(booking.timeslot_id)
    .bind(booking.date)
    .bind(contact.map(|c| c.name.as_str()))
    .bind(contact.map(|c| c.phone.as_str()))
    .bind(contact.and_then(|c| c.email.as_deref()))
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(booking)
}

pub async fn get_booking_details_by_id(
    pool: &Pool<Postgres>,
    booking_id: i32,
) -> Result<Option<DbBookingDetails>> {
    let query = format!("{DETAILS_SELECT} WHERE b.id = $1");
    let details = sqlx::query_as::<_, DbBookingDetails>(&query)
        .bind(booking_id)
        .fetch_optional(pool)
        .await?;

    Ok(details)
}

pub async fn get_latest_booking_details(pool: &Pool<Postgres>) -> Result<Option<DbBookingDetails>> {
    let query = format!("{DETAILS_SELECT} ORDER BY b.created_at DESC, b.id DESC LIMIT 1");
    let details = sqlx::query_as::<_, DbBookingDetails>(&query)
        .fetch_optional(pool)
        .await?;

    Ok(details)
}
