//! Demo studio data for local development.

use chrono::{Duration, NaiveTime, Utc};
use eyre::{Result, eyre};
use tracing::info;
use yoga_core::models::{catalog::ServiceType, time_slot::NewTimeSlot};

use crate::{
    DbPool,
    repositories::{catalog, time_slot},
};

/// Inserts a small demo catalog and tomorrow's slots. Does nothing when the
/// demo trainer already exists, so it is safe to run on every start.
pub async fn seed_demo_data(pool: &DbPool) -> Result<()> {
    if catalog::get_trainer_by_name(pool, "Мастер-тренер")
        .await?
        .is_some()
    {
        info!("Demo data already present, skipping seed");
        return Ok(());
    }

    let master = catalog::create_trainer(pool, "Мастер-тренер", Some("Йога")).await?;
    catalog::create_trainer(pool, "Тренер", Some("Фитнес")).await?;

    let hatha = catalog::create_service(
        pool,
        "Хатха йога",
        60,
        1000,
        ServiceType::Individual.as_str(),
    )
    .await?;
    catalog::create_service(
        pool,
        "Аштанга виньяса йога",
        30,
        500,
        ServiceType::Group.as_str(),
    )
    .await?;

    let alignment =
        catalog::create_group_class(pool, "Йога критического выравнивания", 90, 1500).await?;
    catalog::create_group_class(pool, "Парная йога", 45, 750).await?;

    let tomorrow = (Utc::now() + Duration::days(1)).date_naive();
    for hour in [9, 11, 18] {
        let times = NaiveTime::from_hms_opt(hour, 0, 0)
            .ok_or_else(|| eyre!("Invalid seed hour {}", hour))?;
        time_slot::create_time_slot(
            pool,
            &NewTimeSlot {
                trainer_id: Some(master.id),
                service_id: Some(hatha.id),
                group_class_id: None,
                dates: tomorrow,
                times,
                available: true,
                available_spots: 0,
            },
        )
        .await?;
    }

    time_slot::create_time_slot(
        pool,
        &NewTimeSlot {
            trainer_id: Some(master.id),
            service_id: None,
            group_class_id: Some(alignment.id),
            dates: tomorrow,
            times: NaiveTime::from_hms_opt(19, 30, 0)
                .ok_or_else(|| eyre!("Invalid seed time"))?,
            available: true,
            available_spots: 5,
        },
    )
    .await?;

    info!(date = %tomorrow, "Demo data seeded");
    Ok(())
}
