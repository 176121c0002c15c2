//! PostgreSQL persistence for the mirrored record tables.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::records::{
    BookingRecord, ChainTransactionRecord, NewBookingRecord, NewChainTransactionRecord,
    NewPropertyRecord, NewReviewRecord, NewUserRecord, PropertyRecord, ReviewRecord, UserRecord,
};

/// Idempotent schema, applied at startup. `IF NOT EXISTS` keeps restarts and
/// multi-instance deployments safe.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        wallet_address TEXT NOT NULL UNIQUE,
        username TEXT NOT NULL,
        email TEXT NOT NULL,
        identity_verification_hash TEXT,
        is_identity_verified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS properties (
        id BIGSERIAL PRIMARY KEY,
        owner_address TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        location TEXT,
        price_per_night BIGINT NOT NULL,
        chain_property_id BIGINT,
        verification_hash TEXT,
        is_verified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id BIGSERIAL PRIMARY KEY,
        property_id BIGINT NOT NULL REFERENCES properties(id),
        tenant_address TEXT NOT NULL,
        check_in BIGINT NOT NULL,
        check_out BIGINT NOT NULL,
        total_price BIGINT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        chain_booking_id BIGINT,
        contract_hash TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id BIGSERIAL PRIMARY KEY,
        booking_id BIGINT NOT NULL REFERENCES bookings(id),
        reviewer_address TEXT NOT NULL,
        receiver_address TEXT NOT NULL,
        rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
        comment TEXT NOT NULL,
        review_hash TEXT,
        chain_verified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS chain_transactions (
        id BIGSERIAL PRIMARY KEY,
        sender_address TEXT NOT NULL,
        kind TEXT NOT NULL,
        tx_hash TEXT NOT NULL UNIQUE,
        related_object_id BIGINT,
        related_object_type TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        confirmed_at TIMESTAMPTZ
    )
    "#,
];

/// Connection-pool wrapper around the mirrored tables. Plain CRUD; every
/// method is a single statement.
pub struct RecordStore {
    pool: PgPool,
}

impl RecordStore {
    /// Builds the pool without touching the database; the first query opens
    /// the connection. Keeps the chain-facing endpoints usable (and testable)
    /// when PostgreSQL is absent.
    pub fn connect_lazy(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> sqlx::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // --- users ---

    pub async fn insert_user(&self, user: &NewUserRecord) -> sqlx::Result<UserRecord> {
        sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (wallet_address, username, email, identity_verification_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&user.wallet_address)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.identity_verification_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn user_by_address(&self, wallet_address: &str) -> sqlx::Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE wallet_address = $1")
            .bind(wallet_address)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn mark_user_verified(
        &self,
        wallet_address: &str,
        verification_hash: &str,
    ) -> sqlx::Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(
            "UPDATE users
             SET is_identity_verified = TRUE,
                 identity_verification_hash = $2,
                 updated_at = now()
             WHERE wallet_address = $1
             RETURNING *",
        )
        .bind(wallet_address)
        .bind(verification_hash)
        .fetch_optional(&self.pool)
        .await
    }

    // --- properties ---

    pub async fn insert_property(
        &self,
        property: &NewPropertyRecord,
    ) -> sqlx::Result<PropertyRecord> {
        sqlx::query_as::<_, PropertyRecord>(
            "INSERT INTO properties
                 (owner_address, title, description, location, price_per_night,
                  chain_property_id, verification_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&property.owner_address)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.location)
        .bind(property.price_per_night)
        .bind(property.chain_property_id)
        .bind(&property.verification_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn property_by_id(&self, id: i64) -> sqlx::Result<Option<PropertyRecord>> {
        sqlx::query_as::<_, PropertyRecord>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_properties(&self, limit: i64) -> sqlx::Result<Vec<PropertyRecord>> {
        sqlx::query_as::<_, PropertyRecord>(
            "SELECT * FROM properties ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    // --- bookings ---

    pub async fn insert_booking(&self, booking: &NewBookingRecord) -> sqlx::Result<BookingRecord> {
        sqlx::query_as::<_, BookingRecord>(
            "INSERT INTO bookings
                 (property_id, tenant_address, check_in, check_out, total_price,
                  chain_booking_id, contract_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(booking.property_id)
        .bind(&booking.tenant_address)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.total_price)
        .bind(booking.chain_booking_id)
        .bind(&booking.contract_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn booking_by_id(&self, id: i64) -> sqlx::Result<Option<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn set_booking_status(
        &self,
        id: i64,
        status: &str,
    ) -> sqlx::Result<Option<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>(
            "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    // --- reviews ---

    pub async fn insert_review(&self, review: &NewReviewRecord) -> sqlx::Result<ReviewRecord> {
        sqlx::query_as::<_, ReviewRecord>(
            "INSERT INTO reviews
                 (booking_id, reviewer_address, receiver_address, rating, comment, review_hash)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(review.booking_id)
        .bind(&review.reviewer_address)
        .bind(&review.receiver_address)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(&review.review_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn reviews_for_booking(&self, booking_id: i64) -> sqlx::Result<Vec<ReviewRecord>> {
        sqlx::query_as::<_, ReviewRecord>(
            "SELECT * FROM reviews WHERE booking_id = $1 ORDER BY id",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
    }

    // --- chain transactions ---

    pub async fn insert_transaction(
        &self,
        tx: &NewChainTransactionRecord,
    ) -> sqlx::Result<ChainTransactionRecord> {
        sqlx::query_as::<_, ChainTransactionRecord>(
            "INSERT INTO chain_transactions
                 (sender_address, kind, tx_hash, related_object_id, related_object_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&tx.sender_address)
        .bind(&tx.kind)
        .bind(&tx.tx_hash)
        .bind(tx.related_object_id)
        .bind(&tx.related_object_type)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn transaction_by_hash(
        &self,
        tx_hash: &str,
    ) -> sqlx::Result<Option<ChainTransactionRecord>> {
        sqlx::query_as::<_, ChainTransactionRecord>(
            "SELECT * FROM chain_transactions WHERE tx_hash = $1",
        )
        .bind(tx_hash)
        .fetch_optional(&self.pool)
        .await
    }

    /// Status transition; stamps `confirmed_at` the first time a transaction
    /// reaches `confirmed`.
    pub async fn set_transaction_status(
        &self,
        tx_hash: &str,
        status: &str,
    ) -> sqlx::Result<Option<ChainTransactionRecord>> {
        sqlx::query_as::<_, ChainTransactionRecord>(
            "UPDATE chain_transactions
             SET status = $2,
                 confirmed_at = CASE
                     WHEN $2 = 'confirmed' AND confirmed_at IS NULL THEN now()
                     ELSE confirmed_at
                 END
             WHERE tx_hash = $1
             RETURNING *",
        )
        .bind(tx_hash)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }
}
