//! # Veris Repository
//!
//! Store accessor layer for the eligibility engine:
//!
//! ```text
//! Engine
//!   ↓  Arc<dyn MemberRepository> / Arc<dyn CoverageRepository>
//! PgMemberRepository / PgCoverageRepository   (SQLx)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```
//!
//! The repositories own no business logic: they issue date-filtered
//! queries and decode rows. JSON blob columns (benefit details, cost
//! sharing, auth rules, limitations) are decoded leniently — a malformed
//! document is logged and replaced with an empty default so the row still
//! serves.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::{PgCoverageRepository, PgMemberRepository};
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use veris_core::{Coverage, CoverageId, CoverageStatus, MemberId, VerisResult};

    /// In-memory coverage repository mirroring the Postgres semantics.
    struct InMemoryCoverageRepository {
        coverages: Mutex<HashMap<CoverageId, Coverage>>,
    }

    impl InMemoryCoverageRepository {
        fn new() -> Self {
            Self {
                coverages: Mutex::new(HashMap::new()),
            }
        }

        fn with_coverages(coverages: Vec<Coverage>) -> Self {
            let repo = Self::new();
            for coverage in coverages {
                repo.coverages.lock().unwrap().insert(coverage.id, coverage);
            }
            repo
        }
    }

    #[async_trait]
    impl CoverageRepository for InMemoryCoverageRepository {
        async fn find_by_id(&self, id: CoverageId) -> VerisResult<Option<Coverage>> {
            Ok(self
                .coverages
                .lock()
                .unwrap()
                .get(&id)
                .filter(|c| c.status != CoverageStatus::Deleted)
                .cloned())
        }

        async fn find_in_force(
            &self,
            member_id: &MemberId,
            service_date: NaiveDate,
        ) -> VerisResult<Vec<Coverage>> {
            let mut found: Vec<Coverage> = self
                .coverages
                .lock()
                .unwrap()
                .values()
                .filter(|c| &c.member_id == member_id && c.is_in_force(service_date))
                .cloned()
                .collect();
            found.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
            Ok(found)
        }

        async fn search(&self, filter: CoverageFilter) -> VerisResult<Vec<Coverage>> {
            let mut found: Vec<Coverage> = self
                .coverages
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.status != CoverageStatus::Deleted)
                .filter(|c| filter.member_id.as_ref().map_or(true, |m| &c.member_id == m))
                .filter(|c| filter.payer_id.as_ref().map_or(true, |p| &c.payer_id == p))
                .filter(|c| filter.status.map_or(true, |s| c.status == s))
                .filter(|c| filter.effective_on.map_or(true, |d| c.effective_date <= d))
                .cloned()
                .collect();
            found.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
            let start = usize::try_from(filter.offset.max(0)).unwrap_or(0);
            Ok(found
                .into_iter()
                .skip(start)
                .take(usize::try_from(filter.count.max(0)).unwrap_or(0))
                .collect())
        }

        async fn insert(&self, coverage: &Coverage) -> VerisResult<Coverage> {
            self.coverages
                .lock()
                .unwrap()
                .insert(coverage.id, coverage.clone());
            Ok(coverage.clone())
        }

        async fn update(&self, coverage: &Coverage) -> VerisResult<Coverage> {
            self.coverages
                .lock()
                .unwrap()
                .insert(coverage.id, coverage.clone());
            Ok(coverage.clone())
        }

        async fn soft_delete(&self, id: CoverageId) -> VerisResult<bool> {
            let mut coverages = self.coverages.lock().unwrap();
            match coverages.get_mut(&id) {
                Some(c) if c.status != CoverageStatus::Deleted => {
                    c.mark_deleted();
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    fn active_coverage(member: &str, effective: (i32, u32, u32)) -> Coverage {
        let mut c = Coverage::new(
            MemberId::new(member),
            "PAYER-1",
            "POL-1",
            NaiveDate::from_ymd_opt(effective.0, effective.1, effective.2).unwrap(),
        );
        c.activate();
        c
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_find_in_force_orders_newest_effective_first() {
        let older = active_coverage("M1", (2024, 1, 1));
        let newer = active_coverage("M1", (2025, 1, 1));
        let repo = InMemoryCoverageRepository::with_coverages(vec![older.clone(), newer.clone()]);

        let found = repo
            .find_in_force(&MemberId::new("M1"), date(2025, 8, 13))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, newer.id);
        assert_eq!(found[1].id, older.id);
    }

    #[tokio::test]
    async fn test_find_in_force_excludes_future_and_expired() {
        let future = active_coverage("M1", (2025, 9, 1));
        let mut expired = active_coverage("M1", (2024, 1, 1));
        expired.expiration_date = Some(date(2024, 12, 31));
        let repo = InMemoryCoverageRepository::with_coverages(vec![future, expired]);

        let found = repo
            .find_in_force(&MemberId::new("M1"), date(2025, 8, 13))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_in_force_is_member_scoped() {
        let repo = InMemoryCoverageRepository::with_coverages(vec![
            active_coverage("M1", (2025, 1, 1)),
            active_coverage("M2", (2025, 1, 1)),
        ]);

        let found = repo
            .find_in_force(&MemberId::new("M1"), date(2025, 8, 13))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].member_id, MemberId::new("M1"));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_lookups() {
        let coverage = active_coverage("M1", (2025, 1, 1));
        let id = coverage.id;
        let repo = InMemoryCoverageRepository::with_coverages(vec![coverage]);

        assert!(repo.soft_delete(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(repo
            .find_in_force(&MemberId::new("M1"), date(2025, 8, 13))
            .await
            .unwrap()
            .is_empty());
        // Second delete is a no-op
        assert!(!repo.soft_delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_filters_and_pagination() {
        let mut cancelled = active_coverage("M1", (2023, 1, 1));
        cancelled.status = CoverageStatus::Cancelled;
        let repo = InMemoryCoverageRepository::with_coverages(vec![
            active_coverage("M1", (2025, 1, 1)),
            active_coverage("M1", (2024, 1, 1)),
            cancelled,
        ]);

        let active_only = repo
            .search(CoverageFilter {
                member_id: Some(MemberId::new("M1")),
                status: Some(CoverageStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active_only.len(), 2);

        let paged = repo
            .search(CoverageFilter {
                member_id: Some(MemberId::new("M1")),
                count: 1,
                offset: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].effective_date, date(2024, 1, 1));
    }
}
