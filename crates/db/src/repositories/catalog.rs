use crate::models::{DbGroupClass, DbService, DbTrainer};
use eyre::Result;
use sqlx::{Pool, Postgres};

// Trainer Repository

pub async fn create_trainer(
    pool: &Pool<Postgres>,
    name: &str,
    specialization: Option<&str>,
) -> Result<DbTrainer> {
    let trainer = sqlx::query_as::<_, DbTrainer>(
        r#"
        INSERT INTO trainers (name, specialization)
        VALUES ($1, $2)
        RETURNING id, name, specialization, description, photo
        "#,
    )
    .bind(name)
    .bind(specialization)
    .fetch_one(pool)
    .await?;

    Ok(trainer)
}

pub async fn get_trainer_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbTrainer>> {
    let trainer = sqlx::query_as::<_, DbTrainer>(
        r#"
        SELECT id, name, specialization, description, photo
        FROM trainers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(trainer)
}

pub async fn get_trainer_by_name(pool: &Pool<Postgres>, name: &str) -> Result<Option<DbTrainer>> {
    let trainer = sqlx::query_as::<_, DbTrainer>(
        r#"
        SELECT id, name, specialization, description, photo
        FROM trainers
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(trainer)
}

// Service Repository

pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    duration: i32,
    price: i32,
    service_type: &str,
) -> Result<DbService> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (name, duration, price, service_type)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, duration, description, price, service_type
        "#,
    )
    .bind(name)
    .bind(duration)
    .bind(price)
    .bind(service_type)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration, description, price, service_type
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_name(pool: &Pool<Postgres>, name: &str) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration, description, price, service_type
        FROM services
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

// Group Class Repository

pub async fn create_group_class(
    pool: &Pool<Postgres>,
    name: &str,
    duration: i32,
    price: i32,
) -> Result<DbGroupClass> {
    let group_class = sqlx::query_as::<_, DbGroupClass>(
        r#"
        INSERT INTO group_classes (name, duration, price)
        VALUES ($1, $2, $3)
        RETURNING id, name, duration, description, price
        "#,
    )
    .bind(name)
    .bind(duration)
    .bind(price)
    .fetch_one(pool)
    .await?;

    Ok(group_class)
}

pub async fn get_group_class_by_id(
    pool: &Pool<Postgres>,
    id: i32,
) -> Result<Option<DbGroupClass>> {
    let group_class = sqlx::query_as::<_, DbGroupClass>(
        r#"
        SELECT id, name, duration, description, price
        FROM group_classes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(group_class)
}

pub async fn get_group_class_by_name(
    pool: &Pool<Postgres>,
    name: &str,
) -> Result<Option<DbGroupClass>> {
    let group_class = sqlx::query_as::<_, DbGroupClass>(
        r#"
        SELECT id, name, duration, description, price
        FROM group_classes
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(group_class)
}
