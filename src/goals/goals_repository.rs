use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{Error, Result};
use crate::goals::goals_model::{Goal, GoalStatus, GoalUpdate, NewGoal};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::store::{MemoryBackend, Record, RecordClient};

/// Soonest deadline first.
fn sort_deadline_ascending(goals: &mut [Goal]) {
    goals.sort_by(|a, b| a.deadline.cmp(&b.deadline));
}

pub struct InMemoryGoalRepository {
    backend: Arc<MemoryBackend>,
}

impl InMemoryGoalRepository {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        InMemoryGoalRepository { backend }
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    async fn list(&self) -> Result<Vec<Goal>> {
        let mut goals = self.backend.goals.list().await;
        sort_deadline_ascending(&mut goals);
        Ok(goals)
    }

    async fn get(&self, id: i64) -> Result<Goal> {
        self.backend.goals.get(id).await
    }

    async fn list_by_status(&self, status: GoalStatus) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .backend
            .goals
            .list()
            .await
            .into_iter()
            .filter(|goal| goal.status == status)
            .collect();
        sort_deadline_ascending(&mut goals);
        Ok(goals)
    }

    async fn create(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let created_at = Utc::now();
        let created = self
            .backend
            .goals
            .insert(|id| new_goal.into_record(id, created_at))
            .await;
        Ok(created)
    }

    async fn update(&self, id: i64, update: GoalUpdate) -> Result<Goal> {
        update.validate()?;
        self.backend
            .goals
            .update_with(id, |record| update.apply_to(record))
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.backend.goals.remove(id).await
    }
}

/// Create payload for the record store. The core stamps the timestamp and
/// the initial status (a starting amount may already complete the goal).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalCreateBody {
    name: String,
    target_amount: Decimal,
    current_amount: Decimal,
    deadline: NaiveDate,
    created_at: DateTime<Utc>,
    status: GoalStatus,
}

pub struct RemoteGoalRepository {
    client: Arc<RecordClient>,
}

impl RemoteGoalRepository {
    pub fn new(client: Arc<RecordClient>) -> Self {
        RemoteGoalRepository { client }
    }
}

#[async_trait]
impl GoalRepositoryTrait for RemoteGoalRepository {
    async fn list(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self.client.list(Goal::COLLECTION, &[]).await?;
        sort_deadline_ascending(&mut goals);
        Ok(goals)
    }

    async fn get(&self, id: i64) -> Result<Goal> {
        self.client
            .get(Goal::COLLECTION, id)
            .await?
            .ok_or_else(|| Error::not_found(Goal::ENTITY, id))
    }

    async fn list_by_status(&self, status: GoalStatus) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .client
            .list(Goal::COLLECTION, &[("status", status.to_string())])
            .await?;
        sort_deadline_ascending(&mut goals);
        Ok(goals)
    }

    async fn create(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        // Evaluate the completion rule locally so the stored record never
        // starts in an inconsistent status.
        let record = new_goal.into_record(0, Utc::now());
        let body = GoalCreateBody {
            name: record.name,
            target_amount: record.target_amount,
            current_amount: record.current_amount,
            deadline: record.deadline,
            created_at: record.created_at,
            status: record.status,
        };
        Ok(self.client.create(Goal::COLLECTION, &body).await?)
    }

    async fn update(&self, id: i64, update: GoalUpdate) -> Result<Goal> {
        update.validate()?;
        self.client
            .update(Goal::COLLECTION, id, &update)
            .await?
            .ok_or_else(|| Error::not_found(Goal::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.client.delete(Goal::COLLECTION, id).await?;
        if deleted {
            Ok(true)
        } else {
            Err(Error::not_found(Goal::ENTITY, id))
        }
    }
}
