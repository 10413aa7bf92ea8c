use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Driver, NewDriver};
use crate::utils::errors::AppResult;
use crate::utils::pagination::PageRequest;
use crate::utils::validation::like_pattern;

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn create(&self, driver: NewDriver) -> AppResult<Driver>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>>;

    async fn count(&self, search: Option<&str>) -> AppResult<i64>;

    /// Página de conductores en orden de inserción
    async fn list(&self, search: Option<&str>, page: PageRequest) -> AppResult<Vec<Driver>>;

    async fn list_all(&self) -> AppResult<Vec<Driver>>;

    /// `None` si el conductor ya no existe
    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>>;

    /// Borra el conductor y, en cascada, sus controles. `false` si no existía.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SEARCH_FILTER: &str =
    "($1::text IS NULL OR name ILIKE $1 OR phone ILIKE $1 OR license_number ILIKE $1)";

fn count_query() -> String {
    format!("SELECT COUNT(*) FROM driver WHERE {}", SEARCH_FILTER)
}

fn list_query() -> String {
    format!(
        "SELECT * FROM driver WHERE {} ORDER BY id ASC LIMIT $2 OFFSET $3",
        SEARCH_FILTER
    )
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, driver: NewDriver) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO driver (name, phone, license_number)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(driver.name)
        .bind(driver.phone)
        .bind(driver.license_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn count(&self, search: Option<&str>) -> AppResult<i64> {
        let query = count_query();
        let total = sqlx::query_scalar::<_, i64>(&query)
            .bind(search.map(like_pattern))
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn list(&self, search: Option<&str>, page: PageRequest) -> AppResult<Vec<Driver>> {
        let query = list_query();
        let drivers = sqlx::query_as::<_, Driver>(&query)
            .bind(search.map(like_pattern))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    async fn list_all(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM driver ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE driver
            SET name = $2, phone = $3, license_number = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.phone)
        .bind(&driver.license_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM driver WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_covers_text_columns() {
        for column in ["name", "phone", "license_number"] {
            assert!(SEARCH_FILTER.contains(&format!("{} ILIKE $1", column)));
        }
        assert!(SEARCH_FILTER.starts_with("($1::text IS NULL OR"));
    }

    #[test]
    fn test_list_query_pages_in_id_order() {
        let query = list_query();
        assert!(query.starts_with("SELECT * FROM driver WHERE ($1::text IS NULL"));
        assert!(query.ends_with("ORDER BY id ASC LIMIT $2 OFFSET $3"));
        assert_eq!(
            count_query(),
            format!("SELECT COUNT(*) FROM driver WHERE {}", SEARCH_FILTER)
        );
    }
}
