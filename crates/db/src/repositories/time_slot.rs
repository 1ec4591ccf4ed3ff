use crate::models::DbTimeSlot;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use yoga_core::models::time_slot::{NewTimeSlot, SlotFilter, SlotKind};

pub async fn create_time_slot(pool: &Pool<Postgres>, slot: &NewTimeSlot) -> Result<DbTimeSlot> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (trainer_id, service_id, group_class_id, dates, times, available, available_spots)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, trainer_id, service_id, group_class_id, dates, times, available, available_spots
        "#,
    )
    .bind(slot.trainer_id)
    .bind(slot.service_id)
    .bind(slot.group_class_id)
    .bind(slot.dates)
    .bind(slot.times)
    .bind(slot.available)
    .bind(slot.available_spots)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, trainer_id, service_id, group_class_id, dates, times, available, available_spots
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

/// Reads a slot and holds a row lock on it until the surrounding
/// transaction ends. Concurrent lockers of the same id block here.
pub async fn lock_time_slot_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, trainer_id, service_id, group_class_id, dates, times, available, available_spots
        FROM time_slots
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(time_slot)
}

/// Flips an individual slot to unavailable. Returns false if it already was.
pub async fn mark_time_slot_unavailable(conn: &mut PgConnection, id: i32) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE time_slots
        SET available = FALSE
        WHERE id = $1 AND available = TRUE
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Takes one spot from a group slot, clearing `available` with the last one.
/// Returns the updated row, or `None` when no spot was left.
pub async fn take_group_spot(conn: &mut PgConnection, id: i32) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET available_spots = available_spots - 1,
            available = (available_spots - 1) > 0
        WHERE id = $1 AND available = TRUE AND available_spots > 0
        RETURNING id, trainer_id, service_id, group_class_id, dates, times, available, available_spots
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(time_slot)
}

pub async fn find_time_slots(pool: &Pool<Postgres>, filter: &SlotFilter) -> Result<Vec<DbTimeSlot>> {
    let group_only = filter.kind.map(|kind| kind == SlotKind::Group);

    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, trainer_id, service_id, group_class_id, dates, times, available, available_spots
        FROM time_slots
        WHERE ($1::INTEGER IS NULL OR trainer_id = $1)
          AND ($2::INTEGER IS NULL OR service_id = $2)
          AND ($3::INTEGER IS NULL OR group_class_id = $3)
          AND ($4::BOOLEAN IS NULL OR (group_class_id IS NOT NULL) = $4)
          AND ($5::DATE IS NULL OR dates = $5)
          AND (NOT $6 OR (available = TRUE AND (group_class_id IS NULL OR available_spots > 0)))
        ORDER BY dates ASC, times ASC, id ASC
        "#,
    )
    .bind(filter.trainer_id)
    .bind(filter.service_id)
    .bind(filter.group_class_id)
    .bind(group_only)
    .bind(filter.date)
    .bind(filter.only_available)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}
