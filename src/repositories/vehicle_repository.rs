use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::AppResult;
use crate::utils::pagination::PageRequest;
use crate::utils::validation::like_pattern;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    async fn count(&self, search: Option<&str>) -> AppResult<i64>;

    async fn list(&self, search: Option<&str>, page: PageRequest) -> AppResult<Vec<Vehicle>>;

    async fn list_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;

    /// Borra el vehículo y sus controles. `false` si no existía.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SEARCH_FILTER: &str =
    "($1::text IS NULL OR plate ILIKE $1 OR brand ILIKE $1 OR model ILIKE $1)";

fn count_query() -> String {
    format!("SELECT COUNT(*) FROM vehicle WHERE {}", SEARCH_FILTER)
}

fn list_query() -> String {
    format!(
        "SELECT * FROM vehicle WHERE {} ORDER BY id ASC LIMIT $2 OFFSET $3",
        SEARCH_FILTER
    )
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicle (plate, brand, model, oil_change_km)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(vehicle.plate)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.oil_change_km)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn count(&self, search: Option<&str>) -> AppResult<i64> {
        let query = count_query();
        let total = sqlx::query_scalar::<_, i64>(&query)
            .bind(search.map(like_pattern))
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn list(&self, search: Option<&str>, page: PageRequest) -> AppResult<Vec<Vehicle>> {
        let query = list_query();
        let vehicles = sqlx::query_as::<_, Vehicle>(&query)
            .bind(search.map(like_pattern))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicle
            SET plate = $2, brand = $3, model = $4, oil_change_km = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.plate)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.oil_change_km)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicle WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
