//! PostgreSQL ledger archive
//!
//! Implements the `LedgerArchive` port on top of the trips,
//! trip_participants, and expense_records tables. Split policies and
//! participant lists are stored as JSONB; amounts as BIGINT minor units
//! alongside their currency code, so nothing is ever rounded on the way
//! in or out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{Currency, ExpenseId, Money, ParticipantId, TripId};
use domain_ledger::{
    ArchiveError, ArchivedTrip, ExpenseCategory, ExpenseRecord, LedgerArchive, SplitPolicy,
    TripMeta,
};
use domain_roster::Participant;

use crate::error::DatabaseError;

impl From<DatabaseError> for ArchiveError {
    fn from(error: DatabaseError) -> Self {
        match &error {
            DatabaseError::NotFound(msg) => ArchiveError::NotFound(msg.clone()),
            DatabaseError::SerializationError(msg) => ArchiveError::Serialization(msg.clone()),
            e if e.is_connection_error() => ArchiveError::Connection(error.to_string()),
            _ => ArchiveError::Query(error.to_string()),
        }
    }
}

/// Ledger archive backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgLedgerArchive {
    pool: PgPool,
}

impl PgLedgerArchive {
    /// Creates a new archive with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_trip(&self, meta: &TripMeta) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO trips (id, name, currency, created_at) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::from(meta.id))
            .bind(&meta.name)
            .bind(meta.currency.code())
            .bind(meta.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_participant(
        &self,
        trip: TripId,
        participant: &Participant,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO trip_participants (trip_id, id, display_name, email, joined_at, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::from(trip))
        .bind(Uuid::from(participant.id))
        .bind(&participant.display_name)
        .bind(&participant.email)
        .bind(participant.joined_at)
        .bind(participant.active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_inactive(
        &self,
        trip: TripId,
        participant: ParticipantId,
    ) -> Result<(), DatabaseError> {
        let result =
            sqlx::query("UPDATE trip_participants SET active = FALSE WHERE trip_id = $1 AND id = $2")
                .bind(Uuid::from(trip))
                .bind(Uuid::from(participant))
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Participant", participant));
        }
        Ok(())
    }

    async fn insert_expense(
        &self,
        trip: TripId,
        record: &ExpenseRecord,
    ) -> Result<(), DatabaseError> {
        let split = serde_json::to_value(&record.split)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        let participants = serde_json::to_value(&record.participants)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO expense_records
                (trip_id, id, title, payer, amount_minor, currency, category,
                 split, participants, created_at, reverses)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::from(trip))
        .bind(Uuid::from(record.id))
        .bind(&record.title)
        .bind(Uuid::from(record.payer))
        .bind(record.amount.minor_units())
        .bind(record.amount.currency().code())
        .bind(record.category.as_str())
        .bind(split)
        .bind(participants)
        .bind(record.created_at)
        .bind(record.reverses.map(Uuid::from))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch_trip(&self, trip: TripId) -> Result<Option<ArchivedTrip>, DatabaseError> {
        let Some(trip_row) =
            sqlx::query("SELECT name, currency, created_at FROM trips WHERE id = $1")
                .bind(Uuid::from(trip))
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let currency = parse_currency(&trip_row.try_get::<String, _>("currency")?)?;
        let meta = TripMeta {
            id: trip,
            name: trip_row.try_get("name")?,
            currency,
            created_at: trip_row.try_get("created_at")?,
        };

        let participant_rows = sqlx::query(
            r#"
            SELECT id, display_name, email, joined_at, active
            FROM trip_participants
            WHERE trip_id = $1
            ORDER BY position
            "#,
        )
        .bind(Uuid::from(trip))
        .fetch_all(&self.pool)
        .await?;

        let mut participants = Vec::with_capacity(participant_rows.len());
        for row in participant_rows {
            participants.push(Participant {
                id: ParticipantId::from(row.try_get::<Uuid, _>("id")?),
                display_name: row.try_get("display_name")?,
                email: row.try_get("email")?,
                joined_at: row.try_get("joined_at")?,
                active: row.try_get("active")?,
            });
        }

        let record_rows = sqlx::query(
            r#"
            SELECT id, title, payer, amount_minor, currency, category,
                   split, participants, created_at, reverses
            FROM expense_records
            WHERE trip_id = $1
            ORDER BY seq
            "#,
        )
        .bind(Uuid::from(trip))
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(record_rows.len());
        for row in record_rows {
            let currency = parse_currency(&row.try_get::<String, _>("currency")?)?;
            let category: ExpenseCategory = row
                .try_get::<String, _>("category")?
                .parse()
                .map_err(|e: domain_ledger::expense::UnknownCategory| {
                    DatabaseError::SerializationError(e.to_string())
                })?;
            let split: SplitPolicy =
                serde_json::from_value(row.try_get::<serde_json::Value, _>("split")?)
                    .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
            let members: Vec<ParticipantId> =
                serde_json::from_value(row.try_get::<serde_json::Value, _>("participants")?)
                    .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

            records.push(ExpenseRecord {
                id: ExpenseId::from(row.try_get::<Uuid, _>("id")?),
                title: row.try_get("title")?,
                payer: ParticipantId::from(row.try_get::<Uuid, _>("payer")?),
                amount: Money::from_minor(row.try_get::<i64, _>("amount_minor")?, currency),
                category,
                split,
                participants: members,
                created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
                reverses: row
                    .try_get::<Option<Uuid>, _>("reverses")?
                    .map(ExpenseId::from),
            });
        }

        Ok(Some(ArchivedTrip {
            meta,
            participants,
            records,
        }))
    }
}

fn parse_currency(code: &str) -> Result<Currency, DatabaseError> {
    code.parse()
        .map_err(|e: core_kernel::MoneyError| DatabaseError::SerializationError(e.to_string()))
}

#[async_trait]
impl LedgerArchive for PgLedgerArchive {
    async fn create_trip(&self, meta: &TripMeta) -> Result<(), ArchiveError> {
        self.insert_trip(meta).await?;
        Ok(())
    }

    async fn record_participant(
        &self,
        trip: TripId,
        participant: &Participant,
    ) -> Result<(), ArchiveError> {
        self.insert_participant(trip, participant).await?;
        Ok(())
    }

    async fn deactivate_participant(
        &self,
        trip: TripId,
        participant: ParticipantId,
    ) -> Result<(), ArchiveError> {
        self.mark_inactive(trip, participant).await?;
        Ok(())
    }

    async fn record_expense(
        &self,
        trip: TripId,
        record: &ExpenseRecord,
    ) -> Result<(), ArchiveError> {
        self.insert_expense(trip, record).await?;
        Ok(())
    }

    async fn load_trip(&self, trip: TripId) -> Result<Option<ArchivedTrip>, ArchiveError> {
        Ok(self.fetch_trip(trip).await?)
    }
}
