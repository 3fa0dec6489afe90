//! PostgreSQL member repository implementation.

use super::decode_blob;
use crate::{traits::MemberRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use veris_core::{Member, MemberId, MemberStatus, VerisResult};

/// PostgreSQL member repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = MemberRepository)]
pub struct PgMemberRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgMemberRepository {
    /// Creates a new PostgreSQL member repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member. JSON blob columns come back
/// as raw text and are decoded leniently.
#[derive(Debug, FromRow)]
struct MemberRow {
    id: Uuid,
    identifier: String,
    name: Option<String>,
    birth_date: NaiveDate,
    gender: String,
    contact_info: Option<String>,
    address: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            identifier: MemberId::new(row.identifier),
            name: decode_blob("name", row.name),
            birth_date: row.birth_date,
            gender: row.gender,
            contact_info: decode_blob("contact_info", row.contact_info),
            address: decode_blob("address", row.address),
            status: MemberStatus::parse(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_identifier(&self, identifier: &MemberId) -> VerisResult<Option<Member>> {
        debug!("Finding member by identifier: {}", identifier);

        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, identifier, name, birth_date, gender, contact_info,
                   address, status, created_at, updated_at
            FROM members
            WHERE identifier = $1 AND status = 'active'
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Member::from))
    }
}
