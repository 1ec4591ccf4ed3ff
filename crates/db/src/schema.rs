use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_time_slots_trainer_id ON time_slots(trainer_id)",
    "CREATE INDEX IF NOT EXISTS idx_time_slots_service_id ON time_slots(service_id)",
    "CREATE INDEX IF NOT EXISTS idx_time_slots_group_class_id ON time_slots(group_class_id)",
    "CREATE INDEX IF NOT EXISTS idx_time_slots_dates ON time_slots(dates)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_timeslot_id ON bookings(timeslot_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings(created_at)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create trainers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trainers (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            specialization VARCHAR(255) NULL,
            description TEXT NULL,
            photo VARCHAR(512) NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            duration INTEGER NOT NULL,
            description TEXT NULL,
            price INTEGER NOT NULL,
            service_type VARCHAR(32) NOT NULL DEFAULT 'individual',
            CONSTRAINT valid_service_type CHECK (service_type IN ('individual', 'group'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create group_classes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_classes (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            duration INTEGER NOT NULL,
            description TEXT NULL,
            price INTEGER NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id SERIAL PRIMARY KEY,
            trainer_id INTEGER NULL REFERENCES trainers(id),
            service_id INTEGER NULL REFERENCES services(id),
            group_class_id INTEGER NULL REFERENCES group_classes(id),
            dates DATE NOT NULL,
            times TIME NOT NULL,
            available BOOLEAN NOT NULL DEFAULT TRUE,
            available_spots INTEGER NOT NULL DEFAULT 0,
            CONSTRAINT non_negative_spots CHECK (available_spots >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id SERIAL PRIMARY KEY,
            service_id INTEGER NULL REFERENCES services(id),
            trainer_id INTEGER NULL REFERENCES trainers(id),
            group_class_id INTEGER NULL REFERENCES group_classes(id),
            timeslot_id INTEGER NOT NULL REFERENCES time_slots(id),
            date DATE NOT NULL,
            client_name VARCHAR(255) NULL,
            client_phone VARCHAR(64) NULL,
            client_email VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
