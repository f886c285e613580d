use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::AppError;
use crate::models::ride::Ride;
use crate::models::rider::Rider;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rider (
    rider_id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    rating REAL NOT NULL DEFAULT 0.0
);

CREATE TABLE IF NOT EXISTS ride (
    awb TEXT PRIMARY KEY NOT NULL,
    pickup_address TEXT NOT NULL,
    delivery_address TEXT NOT NULL,
    distance TEXT NOT NULL,
    price REAL NOT NULL,
    rider_id TEXT REFERENCES rider(rider_id),
    status TEXT NOT NULL DEFAULT 'Pending'
);

CREATE INDEX IF NOT EXISTS idx_ride_rider ON ride(rider_id);
"#;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const RIDE_COLUMNS: &str =
    "awb, pickup_address, delivery_address, distance, price, rider_id, status";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    async fn with_connection<T, F>(&self, func: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, AppError> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open_connection(&db_path)?;
            func(&connection)
        })
        .await
        .map_err(|err| AppError::Internal(format!("store task failed: {err}")))?
    }

    pub async fn init(&self) -> Result<(), AppError> {
        self.with_connection(|connection| {
            connection.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
    }

    pub async fn insert_rider(&self, rider: Rider) -> Result<Rider, AppError> {
        self.with_connection(move |connection| {
            connection.execute(
                "INSERT INTO rider (rider_id, name, email, phone, rating) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![rider.rider_id, rider.name, rider.email, rider.phone, rider.rating],
            )?;
            Ok(rider)
        })
        .await
    }

    pub async fn get_rider(&self, rider_id: &str) -> Result<Option<Rider>, AppError> {
        let rider_id = rider_id.to_string();
        self.with_connection(move |connection| {
            let rider = connection
                .query_row(
                    "SELECT rider_id, name, email, phone, rating FROM rider WHERE rider_id = ?1",
                    [&rider_id],
                    rider_from_row,
                )
                .optional()?;
            Ok(rider)
        })
        .await
    }

    pub async fn list_riders(&self) -> Result<Vec<Rider>, AppError> {
        self.with_connection(|connection| {
            let mut stmt = connection
                .prepare("SELECT rider_id, name, email, phone, rating FROM rider ORDER BY rider_id")?;
            let riders = stmt
                .query_map([], rider_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(riders)
        })
        .await
    }

    pub async fn insert_ride(&self, ride: Ride) -> Result<Ride, AppError> {
        self.with_connection(move |connection| {
            connection.execute(
                &format!("INSERT INTO ride ({RIDE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                params![
                    ride.awb,
                    ride.pickup_address,
                    ride.delivery_address,
                    ride.distance,
                    ride.price,
                    ride.rider_id,
                    ride.status.as_str(),
                ],
            )?;
            Ok(ride)
        })
        .await
    }

    pub async fn get_ride(&self, awb: &str) -> Result<Option<Ride>, AppError> {
        let awb = awb.to_string();
        self.with_connection(move |connection| {
            let ride = connection
                .query_row(
                    &format!("SELECT {RIDE_COLUMNS} FROM ride WHERE awb = ?1"),
                    [&awb],
                    ride_from_row,
                )
                .optional()?;
            Ok(ride)
        })
        .await
    }

    pub async fn list_rides(&self) -> Result<Vec<Ride>, AppError> {
        self.with_connection(|connection| {
            let mut stmt =
                connection.prepare(&format!("SELECT {RIDE_COLUMNS} FROM ride ORDER BY awb"))?;
            let rides = stmt
                .query_map([], ride_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rides)
        })
        .await
    }
}

fn open_connection(path: &Path) -> Result<Connection, AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| AppError::Internal(format!("failed to create {}: {err}", parent.display())))?;
    }
    let connection = Connection::open(path)?;
    connection.busy_timeout(BUSY_TIMEOUT)?;
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(connection)
}

fn rider_from_row(row: &Row<'_>) -> rusqlite::Result<Rider> {
    Ok(Rider {
        rider_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        rating: row.get(4)?,
    })
}

fn ride_from_row(row: &Row<'_>) -> rusqlite::Result<Ride> {
    let status: String = row.get(6)?;

    Ok(Ride {
        awb: row.get(0)?,
        pickup_address: row.get(1)?,
        delivery_address: row.get(2)?,
        distance: row.get(3)?,
        price: row.get(4)?,
        rider_id: row.get(5)?,
        status: status.into(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::SqliteStore;
    use crate::error::AppError;
    use crate::models::ride::{Ride, RideStatus};
    use crate::models::rider::Rider;

    async fn store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("dispatch.db"));
        store.init().await.unwrap();
        (dir, store)
    }

    fn rider(id: &str) -> Rider {
        Rider {
            rider_id: id.to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "555-0101".to_string(),
            rating: 4.7,
        }
    }

    fn ride(awb: &str, rider_id: Option<&str>) -> Ride {
        Ride {
            awb: awb.to_string(),
            pickup_address: "1 Depot Rd".to_string(),
            delivery_address: "12 Main St".to_string(),
            distance: "4.2 km".to_string(),
            price: 120.0,
            rider_id: rider_id.map(str::to_string),
            status: RideStatus::Pending,
        }
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let (_dir, store) = store().await;
        store.init().await.unwrap();
        assert!(store.list_rides().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ride_with_known_rider_is_stored_and_read_back() {
        let (_dir, store) = store().await;
        store.insert_rider(rider("RIDER-101")).await.unwrap();
        store
            .insert_ride(ride("AWB-00000001", Some("RIDER-101")))
            .await
            .unwrap();

        let stored = store.get_ride("AWB-00000001").await.unwrap().unwrap();
        assert_eq!(stored.rider_id.as_deref(), Some("RIDER-101"));
        assert_eq!(stored.status, RideStatus::Pending);
        assert_eq!(
            store.get_rider("RIDER-101").await.unwrap().unwrap().rating,
            4.7
        );
    }

    #[tokio::test]
    async fn dangling_rider_reference_is_rejected() {
        let (_dir, store) = store().await;

        let err = store
            .insert_ride(ride("AWB-00000002", Some("RIDER-404")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.get_ride("AWB-00000002").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_awb_is_rejected() {
        let (_dir, store) = store().await;
        store.insert_ride(ride("AWB-00000003", None)).await.unwrap();

        let err = store.insert_ride(ride("AWB-00000003", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn status_written_by_another_system_is_read_verbatim() {
        let (dir, store) = store().await;
        let connection = rusqlite::Connection::open(dir.path().join("dispatch.db")).unwrap();
        connection
            .execute(
                "INSERT INTO ride (awb, pickup_address, delivery_address, distance, price, status) \
                 VALUES ('AWB-0000beef', 'a', 'b', '1 km', 10.0, 'Picked Up')",
                [],
            )
            .unwrap();

        let ride = store.get_ride("AWB-0000beef").await.unwrap().unwrap();
        assert_eq!(ride.status, RideStatus::Other("Picked Up".to_string()));
    }

    #[tokio::test]
    async fn missing_ride_reads_as_none() {
        let (_dir, store) = store().await;
        assert!(store.get_ride("AWB-ffffffff").await.unwrap().is_none());
    }
}
