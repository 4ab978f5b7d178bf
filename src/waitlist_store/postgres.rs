use crate::domain::{
    EntrantEmail, EntrantName, Provenance, Role, WaitlistEntry, WaitlistStats,
};
use crate::waitlist_store::{EntryStore, StoreError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

/// SQLSTATE raised by Postgres when a unique index rejects an insert.
const UNIQUE_VIOLATION: &str = "23505";

/// Key of the transaction-scoped advisory lock that serializes appends.
const APPEND_LOCK: i64 = 0x5741_4954_4c49_5354;

/// An `EntryStore` backed by the `waitlist_entries` table.
///
/// Uniqueness of emails is enforced by a unique index on `LOWER(email)`, so two concurrent
/// submissions for the same address cannot both be stored, and concurrent inserts of different
/// addresses never overwrite each other.
#[derive(Clone)]
pub struct PgEntryStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgEntryStore {
    /// `timeout` bounds every single store operation, on top of the pool's acquire timeout.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Creates the schema if it is not there yet. Safe to call on every start.
    #[tracing::instrument(name = "Initialising the waitlist store", skip(self))]
    pub async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to migrate the waitlist database.")?;
        Ok(())
    }
}

impl EntryStore for PgEntryStore {
    async fn load(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        bounded(self.timeout, load_entries(&self.pool)).await
    }

    async fn email_exists(&self, email: &EntrantEmail) -> Result<bool, StoreError> {
        bounded(self.timeout, email_exists(&self.pool, email)).await
    }

    async fn append(&self, entry: &WaitlistEntry) -> Result<WaitlistStats, StoreError> {
        let (transaction, stats) = bounded(self.timeout, insert_entry(&self.pool, entry)).await?;
        // Unbounded: a COMMIT that reached the server may have stored the entry.
        transaction
            .commit()
            .await
            .context("Failed to commit SQL transaction to store a new waitlist entry.")?;
        Ok(stats)
    }

    async fn remove(&self, email: &str) -> Result<bool, StoreError> {
        bounded(self.timeout, delete_entries(&self.pool, email)).await
    }

    async fn stats(&self) -> Result<WaitlistStats, StoreError> {
        bounded(self.timeout, compute_stats(&self.pool)).await
    }
}

/// Fails with `StoreError::Timeout` when `operation` has not completed within `timeout`. The
/// operation is dropped at that point, so an open transaction inside it is rolled back.
async fn bounded<T>(
    timeout: Duration,
    operation: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(timeout, operation).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!(
                timeout_ms = timeout.as_millis() as u64,
                "A waitlist store operation timed out"
            );
            Err(StoreError::Timeout)
        }
    }
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    company: Option<String>,
    firm: Option<String>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<EntryRow> for WaitlistEntry {
    type Error = anyhow::Error;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: EntrantName::parse(row.name).map_err(anyhow::Error::msg)?,
            email: EntrantEmail::parse(row.email).map_err(anyhow::Error::msg)?,
            role: Role::from_columns(&row.role, row.company, row.firm)
                .map_err(anyhow::Error::msg)?,
            created_at: row.created_at,
            provenance: Provenance {
                ip_address: row.ip_address,
                user_agent: row.user_agent,
            },
        })
    }
}

/// A row that no longer parses into a valid entry is reported, never skipped: silently shrinking
/// the waitlist would be worse than failing the request.
#[tracing::instrument(name = "Loading all waitlist entries", skip(pool))]
async fn load_entries(pool: &PgPool) -> Result<Vec<WaitlistEntry>, StoreError> {
    let rows = sqlx::query_as::<_, EntryRow>(
        r#"
        SELECT id, name, email, role, company, firm, ip_address, user_agent, created_at
        FROM waitlist_entries
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to perform a query to retrieve waitlist entries.")?;

    let entries = rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            WaitlistEntry::try_from(row)
                .with_context(|| format!("Stored waitlist entry {id} is corrupt."))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

#[tracing::instrument(name = "Checking whether an email is already on the waitlist", skip(pool))]
async fn email_exists(pool: &PgPool, email: &EntrantEmail) -> Result<bool, StoreError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM waitlist_entries WHERE LOWER(email) = LOWER($1))
        "#,
    )
    .bind(email.as_ref())
    .fetch_one(pool)
    .await
    .context("Failed to check for an existing waitlist entry.")?;
    Ok(exists)
}

/// The insert and the stats recomputation share a transaction, which is handed back uncommitted:
/// the returned stats include the new entry, and the caller reports them only after committing.
///
/// Appends are serialized on `APPEND_LOCK` until the transaction ends, so the total read here is
/// exactly the entry's rank by arrival order.
#[tracing::instrument(
    name = "Saving new waitlist entry in the database",
    skip(pool, entry),
    fields(entry_id = %entry.id)
)]
async fn insert_entry(
    pool: &PgPool,
    entry: &WaitlistEntry,
) -> Result<(Transaction<'static, Postgres>, WaitlistStats), StoreError> {
    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a Postgres connection from the pool.")?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(APPEND_LOCK)
        .execute(&mut transaction)
        .await
        .context("Failed to take the waitlist append lock.")?;

    sqlx::query(
        r#"
        INSERT INTO waitlist_entries
            (id, name, email, role, company, firm, ip_address, user_agent, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(entry.id)
    .bind(entry.name.as_ref())
    .bind(entry.email.as_ref())
    .bind(entry.role.kind().as_str())
    .bind(entry.role.company())
    .bind(entry.role.firm())
    .bind(entry.provenance.ip_address.as_deref())
    .bind(entry.provenance.user_agent.as_deref())
    .bind(entry.created_at)
    .execute(&mut transaction)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            StoreError::DuplicateEmail
        } else {
            StoreError::from(anyhow::Error::new(e).context("Failed to insert a new waitlist entry."))
        }
    })?;

    let stats = compute_stats(&mut transaction).await?;
    Ok((transaction, stats))
}

#[tracing::instrument(name = "Removing waitlist entries by email", skip(pool))]
async fn delete_entries(pool: &PgPool, email: &str) -> Result<bool, StoreError> {
    let result = sqlx::query(
        r#"
        DELETE FROM waitlist_entries WHERE LOWER(email) = LOWER($1)
        "#,
    )
    .bind(email.trim())
    .execute(pool)
    .await
    .context("Failed to delete waitlist entries.")?;
    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(name = "Computing waitlist stats", skip(executor))]
async fn compute_stats(executor: impl PgExecutor<'_>) -> Result<WaitlistStats, StoreError> {
    let (founders, lawyers): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE role = 'founder'),
            COUNT(*) FILTER (WHERE role = 'lawyer')
        FROM waitlist_entries
        "#,
    )
    .fetch_one(executor)
    .await
    .context("Failed to compute waitlist stats.")?;

    let founders = u64::try_from(founders).context("Negative founder count.")?;
    let lawyers = u64::try_from(lawyers).context("Negative lawyer count.")?;
    Ok(WaitlistStats::from_counts(founders, lawyers))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
