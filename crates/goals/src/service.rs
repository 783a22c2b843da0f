//! Owner-scoped goal operations.
//!
//! Every operation takes the acting [`Principal`] explicitly. Reads are
//! scoped by construction; mutations check existence first and ownership
//! second, before any field is touched.

use std::sync::Arc;

use lifegoals_auth::{assert_ownership, Principal};
use lifegoals_core::{Clock, GoalId, IdGenerator};

use crate::error::GoalError;
use crate::goal::{validate_title, Goal, GoalChanges, NewGoal};
use crate::store::GoalStore;

#[derive(Clone)]
pub struct GoalService {
    store: Arc<dyn GoalStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl GoalService {
    pub fn new(store: Arc<dyn GoalStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, clock, ids }
    }

    /// Goals owned by `principal`, never anyone else's.
    pub fn list(&self, principal: &Principal) -> Result<Vec<Goal>, GoalError> {
        Ok(self.store.find_by_owner(&principal.user_id())?)
    }

    pub fn get(&self, principal: &Principal, id: &GoalId) -> Result<Goal, GoalError> {
        let goal = self.load(id)?;
        assert_ownership(&goal, principal)?;
        Ok(goal)
    }

    pub fn create(&self, principal: &Principal, new: NewGoal) -> Result<Goal, GoalError> {
        let title = validate_title(&new.title)?;
        let now = self.clock.now();

        let goal = Goal {
            id: GoalId::from_uuid(self.ids.next_uuid()),
            owner_id: principal.user_id(),
            title,
            description: new.description,
            completed: new.completed,
            created_at: now,
            updated_at: now,
        };

        let saved = self.store.save(goal)?;
        tracing::debug!(goal_id = %saved.id, owner_id = %saved.owner_id, "goal created");
        Ok(saved)
    }

    pub fn update(&self, principal: &Principal, id: &GoalId, changes: GoalChanges) -> Result<Goal, GoalError> {
        let mut goal = self.load(id)?;
        self.check_owner(&goal, principal)?;

        goal.apply(changes, self.clock.now())?;

        let saved = self.store.save(goal)?;
        tracing::debug!(goal_id = %saved.id, "goal updated");
        Ok(saved)
    }

    pub fn delete(&self, principal: &Principal, id: &GoalId) -> Result<(), GoalError> {
        let goal = self.load(id)?;
        self.check_owner(&goal, principal)?;

        self.store.delete_by_id(id)?;
        tracing::debug!(goal_id = %id, "goal deleted");
        Ok(())
    }

    fn load(&self, id: &GoalId) -> Result<Goal, GoalError> {
        self.store.find_by_id(id)?.ok_or(GoalError::NotFound)
    }

    fn check_owner(&self, goal: &Goal, principal: &Principal) -> Result<(), GoalError> {
        assert_ownership(goal, principal).map_err(|e| {
            tracing::warn!(goal_id = %goal.id, user_id = %principal.user_id(), "ownership check failed");
            GoalError::from(e)
        })
    }
}

impl core::fmt::Debug for GoalService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GoalService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone, Utc};
    use lifegoals_core::{DomainError, FixedClock, UserId, UuidV7Generator};
    use proptest::prelude::*;

    #[derive(Default)]
    struct MapStore {
        rows: Mutex<BTreeMap<GoalId, Goal>>,
    }

    impl GoalStore for MapStore {
        fn find_by_id(&self, id: &GoalId) -> Result<Option<Goal>, DomainError> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Goal>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().filter(|g| g.owner_id == *owner).cloned().collect())
        }

        fn save(&self, goal: Goal) -> Result<Goal, DomainError> {
            self.rows.lock().unwrap().insert(goal.id, goal.clone());
            Ok(goal)
        }

        fn delete_by_id(&self, id: &GoalId) -> Result<(), DomainError> {
            self.rows.lock().unwrap().remove(id);
            Ok(())
        }
    }

    fn ann() -> Principal {
        Principal::new(UserId::new(), "ann@x.com")
    }

    fn bob() -> Principal {
        Principal::new(UserId::new(), "bob@x.com")
    }

    fn service_with_clock() -> (GoalService, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
        let svc = GoalService::new(Arc::new(MapStore::default()), clock.clone(), Arc::new(UuidV7Generator));
        (svc, clock)
    }

    fn new_goal(title: &str) -> NewGoal {
        NewGoal {
            title: title.to_string(),
            description: Some("details".to_string()),
            completed: false,
        }
    }

    #[test]
    fn create_sets_owner_and_timestamps_from_capabilities() {
        let (svc, clock) = service_with_clock();
        let ann = ann();

        let g = svc.create(&ann, new_goal("Learn Rust")).unwrap();
        assert_eq!(g.owner_id, ann.user_id());
        assert_eq!(g.created_at, clock.now());
        assert_eq!(g.updated_at, clock.now());
        assert_eq!(g.title, "Learn Rust");
    }

    #[test]
    fn create_rejects_blank_title() {
        let (svc, _) = service_with_clock();
        assert!(matches!(svc.create(&ann(), new_goal("  ")), Err(GoalError::Validation(_))));
    }

    #[test]
    fn update_by_other_identity_is_not_owner_and_leaves_goal_untouched() {
        let (svc, _) = service_with_clock();
        let (ann, bob) = (ann(), bob());
        let g1 = svc.create(&ann, new_goal("Learn Rust")).unwrap();

        let err = svc
            .update(
                &bob,
                &g1.id,
                GoalChanges {
                    title: Some("Hijacked".to_string()),
                    description: None,
                    completed: true,
                },
            )
            .unwrap_err();
        assert_eq!(err, GoalError::NotOwner);
        assert_eq!(svc.get(&ann, &g1.id).unwrap(), g1);
    }

    #[test]
    fn partial_update_only_touches_completed_and_timestamp() {
        let (svc, clock) = service_with_clock();
        let ann = ann();
        let g1 = svc.create(&ann, new_goal("Learn Rust")).unwrap();

        clock.advance(Duration::minutes(3));
        let updated = svc
            .update(
                &ann,
                &g1.id,
                GoalChanges {
                    completed: true,
                    ..GoalChanges::default()
                },
            )
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, g1.title);
        assert_eq!(updated.description, g1.description);
        assert_eq!(updated.created_at, g1.created_at);
        assert_eq!(updated.updated_at, g1.updated_at + Duration::minutes(3));
    }

    #[test]
    fn missing_goal_is_not_found_before_ownership() {
        let (svc, _) = service_with_clock();
        let missing = GoalId::new();
        assert_eq!(svc.update(&ann(), &missing, GoalChanges::default()), Err(GoalError::NotFound));
        assert_eq!(svc.delete(&ann(), &missing), Err(GoalError::NotFound));
        assert_eq!(svc.get(&ann(), &missing), Err(GoalError::NotFound));
    }

    #[test]
    fn owner_delete_then_get_is_not_found() {
        let (svc, _) = service_with_clock();
        let (ann, bob) = (ann(), bob());
        let g1 = svc.create(&ann, new_goal("Learn Rust")).unwrap();

        assert_eq!(svc.delete(&bob, &g1.id), Err(GoalError::NotOwner));
        svc.delete(&ann, &g1.id).unwrap();
        assert_eq!(svc.get(&ann, &g1.id), Err(GoalError::NotFound));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: listing for one identity never includes another identity's goals.
        #[test]
        fn list_is_scoped_to_owner(owners in prop::collection::vec(0usize..3, 0..20)) {
            let (svc, _) = service_with_clock();
            let people = [ann(), bob(), Principal::new(UserId::new(), "cy@x.com")];

            for (i, owner) in owners.iter().enumerate() {
                svc.create(&people[*owner], new_goal(&format!("goal {i}"))).unwrap();
            }

            for (idx, person) in people.iter().enumerate() {
                let listed = svc.list(person).unwrap();
                prop_assert!(listed.iter().all(|g| g.owner_id == person.user_id()));
                prop_assert_eq!(listed.len(), owners.iter().filter(|o| **o == idx).count());
            }
        }
    }
}
