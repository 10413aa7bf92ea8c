use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::models::{Control, ControlData, ControlDetail, ControlOrdering, Driver, Vehicle};
use crate::utils::errors::AppResult;
use crate::utils::pagination::PageRequest;
use crate::utils::validation::like_pattern;

#[async_trait]
pub trait ControlRepository: Send + Sync {
    async fn create(&self, data: ControlData) -> AppResult<Control>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Control>>;

    /// Control con conductor y vehículo embebidos
    async fn find_detail(&self, id: i64) -> AppResult<Option<ControlDetail>>;

    async fn count(&self, search: Option<&str>) -> AppResult<i64>;

    async fn list(
        &self,
        search: Option<&str>,
        ordering: ControlOrdering,
        page: PageRequest,
    ) -> AppResult<Vec<ControlDetail>>;

    async fn update(&self, id: i64, data: ControlData) -> AppResult<Option<Control>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Suma de `distance_traveled` de los controles del vehículo; los viajes
    /// abiertos cuentan como 0.
    async fn total_distance_for_vehicle(&self, vehicle_id: i64) -> AppResult<i64>;
}

pub struct PgControlRepository {
    pool: PgPool,
}

impl PgControlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SEARCH_FILTER: &str =
    "($1::text IS NULL OR c.departure_date::text ILIKE $1 OR c.return_date::text ILIKE $1)";

const DETAIL_SELECT: &str = r#"
    SELECT c.id, c.departure_date, c.departure_time, c.departure_km, c.destination,
           c.return_date, c.return_time, c.return_km, c.distance_traveled,
           v.id AS vehicle_id, v.plate AS vehicle_plate, v.brand AS vehicle_brand,
           v.model AS vehicle_model, v.oil_change_km AS vehicle_oil_change_km,
           d.id AS driver_id, d.name AS driver_name, d.phone AS driver_phone,
           d.license_number AS driver_license_number
    FROM control c
    JOIN vehicle v ON v.id = c.vehicle_id
    JOIN driver d ON d.id = c.driver_id
"#;

fn detail_query() -> String {
    format!("{} WHERE c.id = $1", DETAIL_SELECT)
}

fn count_query() -> String {
    format!("SELECT COUNT(*) FROM control c WHERE {}", SEARCH_FILTER)
}

// El ORDER BY sale de un enum cerrado, nunca del texto del cliente
fn list_query(ordering: ControlOrdering) -> String {
    format!(
        "{} WHERE {} ORDER BY {} LIMIT $2 OFFSET $3",
        DETAIL_SELECT,
        SEARCH_FILTER,
        ordering.sql()
    )
}

// Fila plana del JOIN control + vehicle + driver
#[derive(Debug, sqlx::FromRow)]
struct ControlDetailRow {
    id: i64,
    departure_date: NaiveDate,
    departure_time: NaiveTime,
    departure_km: i32,
    destination: String,
    return_date: Option<NaiveDate>,
    return_time: Option<NaiveTime>,
    return_km: Option<i32>,
    distance_traveled: Option<i32>,
    vehicle_id: i64,
    vehicle_plate: String,
    vehicle_brand: String,
    vehicle_model: String,
    vehicle_oil_change_km: i32,
    driver_id: i64,
    driver_name: String,
    driver_phone: String,
    driver_license_number: String,
}

impl From<ControlDetailRow> for ControlDetail {
    fn from(row: ControlDetailRow) -> Self {
        ControlDetail {
            id: row.id,
            vehicle: Vehicle {
                id: row.vehicle_id,
                plate: row.vehicle_plate,
                brand: row.vehicle_brand,
                model: row.vehicle_model,
                oil_change_km: row.vehicle_oil_change_km,
            },
            driver: Driver {
                id: row.driver_id,
                name: row.driver_name,
                phone: row.driver_phone,
                license_number: row.driver_license_number,
            },
            departure_date: row.departure_date,
            departure_time: row.departure_time,
            departure_km: row.departure_km,
            destination: row.destination,
            return_date: row.return_date,
            return_time: row.return_time,
            return_km: row.return_km,
            distance_traveled: row.distance_traveled,
        }
    }
}

#[async_trait]
impl ControlRepository for PgControlRepository {
    async fn create(&self, data: ControlData) -> AppResult<Control> {
        let control = sqlx::query_as::<_, Control>(
            r#"
            INSERT INTO control (
                vehicle_id, driver_id, departure_date, departure_time, departure_km,
                destination, return_date, return_time, return_km, distance_traveled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.vehicle_id)
        .bind(data.driver_id)
        .bind(data.departure_date)
        .bind(data.departure_time)
        .bind(data.departure_km)
        .bind(&data.destination)
        .bind(data.return_date)
        .bind(data.return_time)
        .bind(data.return_km)
        .bind(data.distance_traveled())
        .fetch_one(&self.pool)
        .await?;

        Ok(control)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Control>> {
        let control = sqlx::query_as::<_, Control>("SELECT * FROM control WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(control)
    }

    async fn find_detail(&self, id: i64) -> AppResult<Option<ControlDetail>> {
        let query = detail_query();
        let row = sqlx::query_as::<_, ControlDetailRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ControlDetail::from))
    }

    async fn count(&self, search: Option<&str>) -> AppResult<i64> {
        let query = count_query();
        let total = sqlx::query_scalar::<_, i64>(&query)
            .bind(search.map(like_pattern))
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn list(
        &self,
        search: Option<&str>,
        ordering: ControlOrdering,
        page: PageRequest,
    ) -> AppResult<Vec<ControlDetail>> {
        let query = list_query(ordering);
        let rows = sqlx::query_as::<_, ControlDetailRow>(&query)
            .bind(search.map(like_pattern))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ControlDetail::from).collect())
    }

    async fn update(&self, id: i64, data: ControlData) -> AppResult<Option<Control>> {
        let control = sqlx::query_as::<_, Control>(
            r#"
            UPDATE control
            SET vehicle_id = $2, driver_id = $3, departure_date = $4, departure_time = $5,
                departure_km = $6, destination = $7, return_date = $8, return_time = $9,
                return_km = $10, distance_traveled = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.vehicle_id)
        .bind(data.driver_id)
        .bind(data.departure_date)
        .bind(data.departure_time)
        .bind(data.departure_km)
        .bind(&data.destination)
        .bind(data.return_date)
        .bind(data.return_time)
        .bind(data.return_km)
        .bind(data.distance_traveled())
        .fetch_optional(&self.pool)
        .await?;

        Ok(control)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM control WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn total_distance_for_vehicle(&self, vehicle_id: i64) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(distance_traveled), 0)::BIGINT FROM control WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_row() -> ControlDetailRow {
        ControlDetailRow {
            id: 7,
            departure_date: NaiveDate::from_ymd_opt(2023, 8, 11).unwrap(),
            departure_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            departure_km: 150,
            destination: "São Paulo".to_string(),
            return_date: None,
            return_time: None,
            return_km: Some(250),
            distance_traveled: Some(100),
            vehicle_id: 2,
            vehicle_plate: "ABC-1234".to_string(),
            vehicle_brand: "Volkswagen".to_string(),
            vehicle_model: "Fusca".to_string(),
            vehicle_oil_change_km: 1000,
            driver_id: 1,
            driver_name: "Matheus".to_string(),
            driver_phone: "14 99655-5555".to_string(),
            driver_license_number: "ABC123".to_string(),
        }
    }

    #[test]
    fn test_detail_row_embeds_relations() {
        let detail = ControlDetail::from(detail_row());

        assert_eq!(detail.id, 7);
        assert_eq!(detail.vehicle.id, 2);
        assert_eq!(detail.vehicle.oil_change_km, 1000);
        assert_eq!(detail.driver.id, 1);
        assert_eq!(detail.driver.license_number, "ABC123");
        assert_eq!(detail.distance_traveled, Some(100));
    }

    #[test]
    fn test_detail_select_aliases_every_row_column() {
        for alias in [
            "v.id AS vehicle_id",
            "v.plate AS vehicle_plate",
            "v.brand AS vehicle_brand",
            "v.model AS vehicle_model",
            "v.oil_change_km AS vehicle_oil_change_km",
            "d.id AS driver_id",
            "d.name AS driver_name",
            "d.phone AS driver_phone",
            "d.license_number AS driver_license_number",
        ] {
            assert!(DETAIL_SELECT.contains(alias), "missing {}", alias);
        }
        assert!(detail_query().ends_with("WHERE c.id = $1"));
    }

    #[test]
    fn test_list_query_uses_ordering_and_paging() {
        let descending: ControlOrdering = "-return_km".parse().unwrap();
        let query = list_query(descending);
        assert!(query.contains(SEARCH_FILTER));
        let expected = "ORDER BY c.return_km DESC NULLS LAST, c.id ASC LIMIT $2 OFFSET $3";
        assert!(query.ends_with(expected));

        let ascending: ControlOrdering = "departure_km".parse().unwrap();
        let query = list_query(ascending);
        assert!(query.contains("ORDER BY c.departure_km ASC NULLS FIRST, c.id ASC"));
    }

    #[test]
    fn test_search_matches_dates_as_text() {
        assert!(count_query().starts_with("SELECT COUNT(*) FROM control c WHERE"));
        assert!(SEARCH_FILTER.contains("c.departure_date::text ILIKE $1"));
        assert!(SEARCH_FILTER.contains("c.return_date::text ILIKE $1"));
        assert_eq!(like_pattern("08_1"), "%08\\_1%");
    }
}
