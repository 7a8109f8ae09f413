use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, error};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::analytics;
use crate::errors::{Error, Result};
use crate::goals::goals_model::{Goal, GoalStatus, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    /// Per-goal locks serializing contributions. Contributions to different
    /// goals proceed concurrently; two contributions to the same goal are
    /// applied one after the other, against a fresh read each time.
    contribution_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService {
            repository,
            contribution_locks: DashMap::new(),
        }
    }

    fn degrade_on_store_failure(result: Result<Vec<Goal>>) -> Result<Vec<Goal>> {
        match result {
            Err(err @ Error::Store(_)) => {
                error!("goal read failed, serving empty set: {err}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn lock_for(&self, id: i64) -> Arc<Mutex<()>> {
        self.contribution_locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn get_goals(&self) -> Result<Vec<Goal>> {
        Self::degrade_on_store_failure(self.repository.list().await)
    }

    async fn get_goal(&self, id: i64) -> Result<Goal> {
        self.repository.get(id).await
    }

    async fn get_active_goals(&self) -> Result<Vec<Goal>> {
        Self::degrade_on_store_failure(self.repository.list_by_status(GoalStatus::Active).await)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let created = self.repository.create(new_goal).await?;
        debug!("created goal {} '{}'", created.id, created.name);
        Ok(created)
    }

    async fn update_goal(&self, id: i64, mut update: GoalUpdate) -> Result<Goal> {
        update.validate()?;
        if update.current_amount.is_some() || update.target_amount.is_some() {
            // Completion is derived here so remote stores persist it too;
            // either side of the comparison may change in the patch.
            let current_record = self.repository.get(id).await?;
            let current = update.current_amount.unwrap_or(current_record.current_amount);
            let target = update.target_amount.unwrap_or(current_record.target_amount);
            if current >= target {
                update.status = Some(GoalStatus::Completed);
            }
        }
        self.repository.update(id, update).await
    }

    async fn delete_goal(&self, id: i64) -> Result<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            self.contribution_locks.remove(&id);
        }
        Ok(deleted)
    }

    async fn add_contribution(&self, id: i64, amount: Decimal) -> Result<Goal> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let goal = self.repository.get(id).await?;
        let updated = analytics::apply_contribution(&goal, amount)?;
        let update = GoalUpdate {
            current_amount: Some(updated.current_amount),
            status: Some(updated.status),
            ..Default::default()
        };
        let persisted = self.repository.update(id, update).await?;
        debug!(
            "contribution of {amount} brought goal {id} to {}",
            persisted.current_amount
        );
        Ok(persisted)
    }
}
