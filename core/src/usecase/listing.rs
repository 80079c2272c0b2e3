use std::cmp::Ordering;
use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::status::ChoreState;
use crate::repository::traits::{AwayDateRepository, ChoreRepository, LogRepository};
use crate::service::dto::ChoreOverview;
use crate::service::status_service::{compute_status, weight};

/// Display buckets of the grouped view, in their fixed emit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Pending,
    Completed,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// The grouped view. Both buckets are always present, each keeping the
/// overall weight-descending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedChores {
    pub pending: Vec<ChoreOverview>,
    pub completed: Vec<ChoreOverview>,
}

impl GroupedChores {
    /// Buckets in display order: Pending first, then Completed.
    pub fn buckets(&self) -> [(Bucket, &[ChoreOverview]); 2] {
        [
            (Bucket::Pending, self.pending.as_slice()),
            (Bucket::Completed, self.completed.as_slice()),
        ]
    }
}

/// Builds the urgency-ordered chore overview for one owner.
pub struct ChoreListing<'a, C, L, A>
where
    C: ChoreRepository,
    L: LogRepository,
    A: AwayDateRepository,
{
    chores: &'a C,
    logs: &'a L,
    away_dates: &'a A,
}

impl<'a, C, L, A> ChoreListing<'a, C, L, A>
where
    C: ChoreRepository,
    L: LogRepository,
    A: AwayDateRepository,
{
    pub fn new(chores: &'a C, logs: &'a L, away_dates: &'a A) -> Self {
        Self {
            chores,
            logs,
            away_dates,
        }
    }

    /// Flat overview, most urgent first. The tag filter is applied before
    /// any status is computed; `now` and the away-date snapshot are fixed
    /// for the whole pass so every chore is judged against the same
    /// instant.
    pub fn build(
        &self,
        owner: &Uuid,
        tag: Option<&Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChoreOverview>> {
        let away_dates = self.away_dates.list(owner)?;
        let mut chores = self.chores.list(owner)?;
        if let Some(tag_id) = tag {
            chores.retain(|chore| chore.tags.contains(tag_id));
        }

        let mut overviews = Vec::with_capacity(chores.len());
        for chore in chores {
            let last = self.logs.latest_for(&chore.id)?.map(|log| log.timestamp);
            let status = compute_status(now, last, chore.due_days, chore.overdue_days, &away_dates);
            let score = weight(&status);
            overviews.push(ChoreOverview::from_entity(chore, last, status, score));
        }

        sort_by_weight(&mut overviews);
        Ok(overviews)
    }

    /// Same ordering, split into the Pending and Completed buckets.
    pub fn build_grouped(
        &self,
        owner: &Uuid,
        tag: Option<&Uuid>,
        now: DateTime<Utc>,
    ) -> Result<GroupedChores> {
        Ok(group_by_bucket(self.build(owner, tag, now)?))
    }
}

/// Descending by weight. The sort is stable, so equal weights keep their
/// input order; there is no secondary key.
pub fn sort_by_weight(overviews: &mut [ChoreOverview]) {
    overviews.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
}

/// Splits a sorted overview into the two buckets. Every chore lands in
/// exactly one, keeping its relative order: Due and Overdue chores are
/// Pending, the rest Completed.
pub fn group_by_bucket(overviews: Vec<ChoreOverview>) -> GroupedChores {
    let mut grouped = GroupedChores::default();
    for overview in overviews {
        match overview.state {
            ChoreState::Due | ChoreState::Overdue => grouped.pending.push(overview),
            ChoreState::Completed => grouped.completed.push(overview),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::away_date::AwayDate;
    use crate::model::chore::Chore;
    use crate::model::log::CompletionLog;
    use chrono::Duration;

    struct MockChoreRepo {
        chores: Vec<Chore>,
    }

    impl ChoreRepository for MockChoreRepo {
        fn create(&self, _chore: Chore) -> Result<Chore> {
            unimplemented!()
        }
        fn get(&self, _id: &Uuid) -> Result<Chore> {
            unimplemented!()
        }
        fn update(&self, _chore: &Chore) -> Result<()> {
            unimplemented!()
        }
        fn delete(&self, _id: &Uuid) -> Result<()> {
            unimplemented!()
        }
        fn list(&self, owner: &Uuid) -> Result<Vec<Chore>> {
            Ok(self
                .chores
                .iter()
                .filter(|chore| chore.owner == *owner)
                .cloned()
                .collect())
        }
    }

    struct MockLogRepo {
        logs: Vec<CompletionLog>,
    }

    impl LogRepository for MockLogRepo {
        fn append(&self, _log: CompletionLog) -> Result<CompletionLog> {
            unimplemented!()
        }
        fn latest_for(&self, chore_id: &Uuid) -> Result<Option<CompletionLog>> {
            Ok(self
                .logs
                .iter()
                .filter(|log| log.chore_id == *chore_id)
                .max_by_key(|log| log.timestamp)
                .cloned())
        }
        fn delete_for(&self, _chore_id: &Uuid) -> Result<()> {
            unimplemented!()
        }
    }

    struct MockAwayRepo {
        away_dates: Vec<AwayDate>,
    }

    impl AwayDateRepository for MockAwayRepo {
        fn create(&self, _away_date: AwayDate) -> Result<AwayDate> {
            unimplemented!()
        }
        fn delete(&self, _id: &Uuid) -> Result<()> {
            unimplemented!()
        }
        fn list(&self, owner: &Uuid) -> Result<Vec<AwayDate>> {
            Ok(self
                .away_dates
                .iter()
                .filter(|away| away.owner == *owner)
                .cloned()
                .collect())
        }
    }

    fn chore(name: &str, owner: Uuid) -> Chore {
        let mut chore = Chore::new(name.to_string(), 1, owner);
        chore.overdue_days = Some(1);
        chore
    }

    fn log(chore: &Chore, at: DateTime<Utc>) -> CompletionLog {
        CompletionLog::new(at, chore.id, chore.owner)
    }

    /// Completed an hour ago, due an hour into its grace window, a day
    /// past the grace window, and never completed at all.
    fn fixture(owner: Uuid, now: DateTime<Utc>) -> (MockChoreRepo, MockLogRepo) {
        let completed = chore("completed", owner);
        let due = chore("due", owner);
        let overdue = chore("overdue", owner);
        let never_logged = chore("never-logged", owner);

        let logs = vec![
            log(&completed, now - Duration::hours(1)),
            log(&due, now - Duration::days(1) - Duration::hours(1)),
            log(&overdue, now - Duration::days(3)),
        ];
        let chores = vec![completed, due, overdue, never_logged];

        (MockChoreRepo { chores }, MockLogRepo { logs })
    }

    #[test]
    fn test_flat_list_is_weight_descending() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let (chores, logs) = fixture(owner, now);
        let away = MockAwayRepo { away_dates: vec![] };

        let overviews = ChoreListing::new(&chores, &logs, &away)
            .build(&owner, None, now)
            .unwrap();

        let names: Vec<&str> = overviews.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["overdue", "due", "never-logged", "completed"]);
        for pair in overviews.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn test_grouped_buckets_split_and_keep_order() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let (chores, logs) = fixture(owner, now);
        let away = MockAwayRepo { away_dates: vec![] };

        let grouped = ChoreListing::new(&chores, &logs, &away)
            .build_grouped(&owner, None, now)
            .unwrap();

        let pending: Vec<&str> = grouped.pending.iter().map(|o| o.name.as_str()).collect();
        let completed: Vec<&str> = grouped.completed.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(pending, vec!["overdue", "due", "never-logged"]);
        assert_eq!(completed, vec!["completed"]);

        // Every chore lands in exactly one bucket.
        assert_eq!(grouped.pending.len() + grouped.completed.len(), 4);

        let [(first, _), (second, _)] = grouped.buckets();
        assert_eq!(first, Bucket::Pending);
        assert_eq!(second, Bucket::Completed);
    }

    #[test]
    fn test_equal_weights_keep_input_order() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        // Three never-completed chores all weigh exactly 100.
        let chores = MockChoreRepo {
            chores: vec![
                chore("first", owner),
                chore("second", owner),
                chore("third", owner),
            ],
        };
        let logs = MockLogRepo { logs: vec![] };
        let away = MockAwayRepo { away_dates: vec![] };

        let overviews = ChoreListing::new(&chores, &logs, &away)
            .build(&owner, None, now)
            .unwrap();

        let names: Vec<&str> = overviews.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_tag_filter_runs_before_the_engine() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let tag_id = Uuid::new_v4();

        let mut tagged = chore("tagged", owner);
        tagged.tags.push(tag_id);
        let untagged = chore("untagged", owner);

        let chores = MockChoreRepo {
            chores: vec![untagged, tagged],
        };
        let logs = MockLogRepo { logs: vec![] };
        let away = MockAwayRepo { away_dates: vec![] };

        let overviews = ChoreListing::new(&chores, &logs, &away)
            .build(&owner, Some(&tag_id), now)
            .unwrap();

        assert_eq!(overviews.len(), 1);
        assert_eq!(overviews[0].name, "tagged");
    }

    #[test]
    fn test_only_owners_away_dates_apply() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let now = Utc::now();

        // Completed 2 days ago on a 1-day cadence with no grace window:
        // normally Due, but the owner's vacation covers the whole stretch.
        let mine = Chore::new("mine".to_string(), 1, owner);
        let logs = MockLogRepo {
            logs: vec![log(&mine, now - Duration::days(2))],
        };
        let chores = MockChoreRepo { chores: vec![mine] };

        let vacation = |owner: Uuid| {
            AwayDate::new(
                "trip".to_string(),
                (now - Duration::days(1)).date_naive(),
                (now + Duration::days(2)).date_naive(),
                owner,
            )
        };

        let away = MockAwayRepo {
            away_dates: vec![vacation(owner)],
        };
        let listing = ChoreListing::new(&chores, &logs, &away);
        assert_eq!(
            listing.build(&owner, None, now).unwrap()[0].state,
            ChoreState::Completed
        );

        // A stranger's vacation changes nothing.
        let away = MockAwayRepo {
            away_dates: vec![vacation(stranger)],
        };
        let listing = ChoreListing::new(&chores, &logs, &away);
        assert_eq!(
            listing.build(&owner, None, now).unwrap()[0].state,
            ChoreState::Due
        );
    }
}
