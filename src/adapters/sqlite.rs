use crate::domain::model::{
    BankEntry, BankFilter, ComplianceRecord, NewBankEntry, NewRoute, PoolId, PoolMember,
    PoolResult, Route, StoredPool,
};
use crate::domain::ports::{
    BankLedger, ComplianceLookup, ComplianceStore, PoolStore, RouteRepository,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS routes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        route_id TEXT NOT NULL UNIQUE,
        vessel_type TEXT NOT NULL,
        fuel_type TEXT NOT NULL,
        year INTEGER NOT NULL,
        ghg_intensity REAL NOT NULL,
        fuel_consumption REAL NOT NULL,
        distance REAL NOT NULL,
        total_emissions REAL NOT NULL,
        is_baseline INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS ship_compliance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ship_id TEXT NOT NULL,
        year INTEGER NOT NULL,
        cb_gco2eq REAL NOT NULL,
        UNIQUE (ship_id, year)
    )",
    "CREATE TABLE IF NOT EXISTS bank_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ship_id TEXT NOT NULL,
        year INTEGER NOT NULL,
        amount_gco2eq REAL NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS pools (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year INTEGER NOT NULL,
        total_cb REAL NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS pool_members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pool_id INTEGER NOT NULL REFERENCES pools (id),
        position INTEGER NOT NULL,
        ship_id TEXT NOT NULL,
        cb_before REAL NOT NULL,
        cb_after REAL NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_pool_members_pool ON pool_members (pool_id, position)",
];

const ROUTE_COLUMNS: &str = "id, route_id, vessel_type, fuel_type, year, ghg_intensity, \
     fuel_consumption, distance, total_emissions, is_baseline";

#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        tracing::info!("Connected to {}", url);
        Ok(repo)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("Schema is up to date");
        Ok(())
    }
}

fn route_from_row(row: &SqliteRow) -> Result<Route> {
    Ok(Route {
        id: row.try_get("id")?,
        route_id: row.try_get("route_id")?,
        vessel_type: row.try_get("vessel_type")?,
        fuel_type: row.try_get("fuel_type")?,
        year: row.try_get("year")?,
        ghg_intensity: row.try_get("ghg_intensity")?,
        fuel_consumption: row.try_get("fuel_consumption")?,
        distance: row.try_get("distance")?,
        total_emissions: row.try_get("total_emissions")?,
        is_baseline: row.try_get("is_baseline")?,
    })
}

fn bank_entry_from_row(row: &SqliteRow) -> Result<BankEntry> {
    Ok(BankEntry {
        id: row.try_get("id")?,
        ship_id: row.try_get("ship_id")?,
        year: row.try_get("year")?,
        amount_gco2eq: row.try_get("amount_gco2eq")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ComplianceLookup for SqliteRepository {
    async fn find_cb(&self, ship_id: &str, year: i32) -> Result<Option<ComplianceRecord>> {
        let row = sqlx::query(
            "SELECT ship_id, year, cb_gco2eq FROM ship_compliance WHERE ship_id = ? AND year = ?",
        )
        .bind(ship_id)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| -> Result<ComplianceRecord> {
            Ok(ComplianceRecord {
                ship_id: row.try_get("ship_id")?,
                year: row.try_get("year")?,
                cb_gco2eq: row.try_get("cb_gco2eq")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl ComplianceStore for SqliteRepository {
    async fn upsert_cb(&self, record: &ComplianceRecord) -> Result<ComplianceRecord> {
        sqlx::query(
            "INSERT INTO ship_compliance (ship_id, year, cb_gco2eq) VALUES (?, ?, ?)
             ON CONFLICT (ship_id, year) DO UPDATE SET cb_gco2eq = excluded.cb_gco2eq",
        )
        .bind(&record.ship_id)
        .bind(record.year)
        .bind(record.cb_gco2eq)
        .execute(&self.pool)
        .await?;

        Ok(record.clone())
    }
}

#[async_trait]
impl PoolStore for SqliteRepository {
    async fn create_pool(
        &self,
        year: i32,
        total_cb: f64,
        members: &[PoolMember],
    ) -> Result<PoolId> {
        let mut tx = self.pool.begin().await?;

        let pool_id =
            sqlx::query("INSERT INTO pools (year, total_cb, created_at) VALUES (?, ?, ?)")
                .bind(year)
                .bind(total_cb)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();

        for (position, member) in members.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pool_members (pool_id, position, ship_id, cb_before, cb_after)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(pool_id)
            .bind(position as i64)
            .bind(&member.ship_id)
            .bind(member.cb_before)
            .bind(member.cb_after)
            .execute(&mut *tx)
            .await?;
        }

        // dropping tx on any early return above rolls everything back
        tx.commit().await?;
        Ok(pool_id)
    }

    async fn find_pool(&self, pool_id: PoolId) -> Result<Option<StoredPool>> {
        let Some(pool_row) = sqlx::query("SELECT id, year, total_cb, created_at FROM pools WHERE id = ?")
            .bind(pool_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let member_rows = sqlx::query(
            "SELECT ship_id, cb_before, cb_after FROM pool_members
             WHERE pool_id = ? ORDER BY position",
        )
        .bind(pool_id)
        .fetch_all(&self.pool)
        .await?;

        let members = member_rows
            .iter()
            .map(|row| -> Result<PoolMember> {
                Ok(PoolMember {
                    ship_id: row.try_get("ship_id")?,
                    cb_before: row.try_get("cb_before")?,
                    cb_after: row.try_get("cb_after")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(StoredPool {
            result: PoolResult {
                pool_id,
                year: pool_row.try_get("year")?,
                total_cb: pool_row.try_get("total_cb")?,
                members,
            },
            created_at: pool_row.try_get("created_at")?,
        }))
    }
}

#[async_trait]
impl RouteRepository for SqliteRepository {
    async fn list_routes(&self) -> Result<Vec<Route>> {
        let rows = sqlx::query(&format!("SELECT {ROUTE_COLUMNS} FROM routes ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(route_from_row).collect()
    }

    async fn find_route(&self, id: i64) -> Result<Option<Route>> {
        let row = sqlx::query(&format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(route_from_row).transpose()
    }

    async fn find_route_for_ship(&self, ship_id: &str, year: i32) -> Result<Option<Route>> {
        let row = sqlx::query(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE route_id = ? AND year = ? LIMIT 1"
        ))
        .bind(ship_id)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(route_from_row).transpose()
    }

    async fn find_baseline(&self) -> Result<Option<Route>> {
        let row = sqlx::query(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE is_baseline = 1 ORDER BY id LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(route_from_row).transpose()
    }

    async fn set_baseline(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE routes SET is_baseline = 0 WHERE is_baseline = 1")
            .execute(&mut *tx)
            .await?;
        let updated = sqlx::query("UPDATE routes SET is_baseline = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn upsert_route(&self, route: &NewRoute) -> Result<Route> {
        sqlx::query(
            "INSERT INTO routes (route_id, vessel_type, fuel_type, year, ghg_intensity,
                                 fuel_consumption, distance, total_emissions)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (route_id) DO UPDATE SET
                vessel_type = excluded.vessel_type,
                fuel_type = excluded.fuel_type,
                year = excluded.year,
                ghg_intensity = excluded.ghg_intensity,
                fuel_consumption = excluded.fuel_consumption,
                distance = excluded.distance,
                total_emissions = excluded.total_emissions",
        )
        .bind(&route.route_id)
        .bind(&route.vessel_type)
        .bind(&route.fuel_type)
        .bind(route.year)
        .bind(route.ghg_intensity)
        .bind(route.fuel_consumption)
        .bind(route.distance)
        .bind(route.total_emissions)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(&format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE route_id = ?"))
            .bind(&route.route_id)
            .fetch_one(&self.pool)
            .await?;
        route_from_row(&row)
    }
}

#[async_trait]
impl BankLedger for SqliteRepository {
    async fn append_entry(&self, entry: &NewBankEntry) -> Result<BankEntry> {
        let created_at = Utc::now();
        let id = sqlx::query(
            "INSERT INTO bank_entries (ship_id, year, amount_gco2eq, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.ship_id)
        .bind(entry.year)
        .bind(entry.amount_gco2eq)
        .bind(created_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(BankEntry {
            id,
            ship_id: entry.ship_id.clone(),
            year: entry.year,
            amount_gco2eq: entry.amount_gco2eq,
            created_at,
        })
    }

    async fn list_entries(&self, filter: &BankFilter) -> Result<Vec<BankEntry>> {
        // NULL parameters disable the corresponding condition
        let rows = sqlx::query(
            "SELECT id, ship_id, year, amount_gco2eq, created_at FROM bank_entries
             WHERE (?1 IS NULL OR ship_id = ?1) AND (?2 IS NULL OR year = ?2)
             ORDER BY id",
        )
        .bind(filter.ship_id.as_deref())
        .bind(filter.year)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(bank_entry_from_row).collect()
    }
}
