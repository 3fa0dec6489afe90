//! PostgreSQL coverage repository implementation.

use super::{decode_blob, encode_blob};
use crate::{
    traits::{CoverageFilter, CoverageRepository},
    DatabasePoolInterface,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shaku::Component;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use veris_core::{
    AuthRuleSet, Coverage, CoverageId, CoverageStatus, CoverageType, MemberId, VerisResult,
};

/// Maximum page size for coverage searches.
const MAX_SEARCH_COUNT: i64 = 100;

const COVERAGE_COLUMNS: &str = "id, member_id, payer_id, policy_number, group_number, status, \
     type, effective_date, expiration_date, benefit_details, cost_sharing, \
     network, prior_auth_rules, limitations, created_at, updated_at";

/// PostgreSQL coverage repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CoverageRepository)]
pub struct PgCoverageRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCoverageRepository {
    /// Creates a new PostgreSQL coverage repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a coverage. Blob columns are raw text,
/// decoded leniently so one malformed document never fails the row.
#[derive(Debug, FromRow)]
struct CoverageRow {
    id: Uuid,
    member_id: String,
    payer_id: String,
    policy_number: String,
    group_number: Option<String>,
    status: String,
    #[sqlx(rename = "type")]
    kind: String,
    effective_date: NaiveDate,
    expiration_date: Option<NaiveDate>,
    benefit_details: Option<String>,
    cost_sharing: Option<String>,
    network: Option<String>,
    prior_auth_rules: Option<String>,
    limitations: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CoverageRow> for Coverage {
    fn from(row: CoverageRow) -> Self {
        Coverage {
            id: CoverageId::from_uuid(row.id),
            member_id: MemberId::new(row.member_id),
            payer_id: row.payer_id,
            policy_number: row.policy_number,
            group_number: row.group_number.unwrap_or_default(),
            status: CoverageStatus::parse(&row.status),
            kind: CoverageType::parse(&row.kind),
            effective_date: row.effective_date,
            expiration_date: row.expiration_date,
            benefit_details: decode_blob("benefit_details", row.benefit_details),
            cost_sharing: decode_blob("cost_sharing", row.cost_sharing),
            network: row.network.unwrap_or_default(),
            prior_auth_rules: AuthRuleSet::from_value(decode_blob(
                "prior_auth_rules",
                row.prior_auth_rules,
            )),
            limitations: decode_blob("limitations", row.limitations),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CoverageRepository for PgCoverageRepository {
    async fn find_by_id(&self, id: CoverageId) -> VerisResult<Option<Coverage>> {
        debug!("Finding coverage by id: {}", id);

        let row = sqlx::query_as::<_, CoverageRow>(&format!(
            "SELECT {COVERAGE_COLUMNS} FROM coverage WHERE id = $1 AND status != 'deleted'"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Coverage::from))
    }

    async fn find_in_force(
        &self,
        member_id: &MemberId,
        service_date: NaiveDate,
    ) -> VerisResult<Vec<Coverage>> {
        debug!(
            "Finding in-force coverages for member {} on {}",
            member_id, service_date
        );

        let rows = sqlx::query_as::<_, CoverageRow>(&format!(
            r#"
            SELECT {COVERAGE_COLUMNS}
            FROM coverage
            WHERE member_id = $1
              AND status = 'active'
              AND effective_date <= $2
              AND (expiration_date IS NULL OR expiration_date >= $2)
            ORDER BY effective_date DESC
            "#
        ))
        .bind(member_id.as_str())
        .bind(service_date)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Coverage::from).collect())
    }

    async fn search(&self, filter: CoverageFilter) -> VerisResult<Vec<Coverage>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {COVERAGE_COLUMNS} FROM coverage WHERE status != 'deleted'"
        ));

        if let Some(member_id) = &filter.member_id {
            builder.push(" AND member_id = ");
            builder.push_bind(member_id.as_str().to_string());
        }
        if let Some(payer_id) = &filter.payer_id {
            builder.push(" AND payer_id = ");
            builder.push_bind(payer_id.clone());
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.to_string());
        }
        if let Some(effective_on) = filter.effective_on {
            builder.push(" AND effective_date <= ");
            builder.push_bind(effective_on);
        }

        builder.push(" ORDER BY effective_date DESC LIMIT ");
        builder.push_bind(filter.count.clamp(1, MAX_SEARCH_COUNT));
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset.max(0));

        let rows = builder
            .build_query_as::<CoverageRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Coverage::from).collect())
    }

    async fn insert(&self, coverage: &Coverage) -> VerisResult<Coverage> {
        debug!("Inserting coverage {} for member {}", coverage.id, coverage.member_id);

        sqlx::query(
            r#"
            INSERT INTO coverage (id, member_id, payer_id, policy_number, group_number,
                                  status, type, effective_date, expiration_date,
                                  benefit_details, cost_sharing, network,
                                  prior_auth_rules, limitations, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(coverage.id.into_inner())
        .bind(coverage.member_id.as_str())
        .bind(&coverage.payer_id)
        .bind(&coverage.policy_number)
        .bind(&coverage.group_number)
        .bind(coverage.status.to_string())
        .bind(coverage.kind.to_string())
        .bind(coverage.effective_date)
        .bind(coverage.expiration_date)
        .bind(encode_blob(&coverage.benefit_details))
        .bind(encode_blob(&coverage.cost_sharing))
        .bind(&coverage.network)
        .bind(encode_blob(&coverage.prior_auth_rules.0))
        .bind(encode_blob(&coverage.limitations))
        .bind(coverage.created_at)
        .bind(coverage.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(coverage.clone())
    }

    async fn update(&self, coverage: &Coverage) -> VerisResult<Coverage> {
        debug!("Updating coverage {}", coverage.id);

        sqlx::query(
            r#"
            UPDATE coverage
            SET payer_id = $2, policy_number = $3, group_number = $4, status = $5,
                type = $6, effective_date = $7, expiration_date = $8,
                benefit_details = $9, cost_sharing = $10, network = $11,
                prior_auth_rules = $12, limitations = $13, updated_at = $14
            WHERE id = $1 AND status != 'deleted'
            "#,
        )
        .bind(coverage.id.into_inner())
        .bind(&coverage.payer_id)
        .bind(&coverage.policy_number)
        .bind(&coverage.group_number)
        .bind(coverage.status.to_string())
        .bind(coverage.kind.to_string())
        .bind(coverage.effective_date)
        .bind(coverage.expiration_date)
        .bind(encode_blob(&coverage.benefit_details))
        .bind(encode_blob(&coverage.cost_sharing))
        .bind(&coverage.network)
        .bind(encode_blob(&coverage.prior_auth_rules.0))
        .bind(encode_blob(&coverage.limitations))
        .bind(Utc::now())
        .execute(self.pool.inner())
        .await?;

        Ok(coverage.clone())
    }

    async fn soft_delete(&self, id: CoverageId) -> VerisResult<bool> {
        debug!("Soft-deleting coverage {}", id);

        let result = sqlx::query(
            "UPDATE coverage SET status = 'deleted', updated_at = $2 WHERE id = $1 AND status != 'deleted'",
        )
        .bind(id.into_inner())
        .bind(Utc::now())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
