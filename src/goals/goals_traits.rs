use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalStatus, GoalUpdate, NewGoal};

/// Trait for goal repository operations.
///
/// `list` and `list_by_status` return goals ordered by deadline ascending
/// (soonest first).
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Goal>>;
    async fn get(&self, id: i64) -> Result<Goal>;
    async fn list_by_status(&self, status: GoalStatus) -> Result<Vec<Goal>>;
    async fn create(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update(&self, id: i64, update: GoalUpdate) -> Result<Goal>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn get_goals(&self) -> Result<Vec<Goal>>;
    async fn get_goal(&self, id: i64) -> Result<Goal>;
    async fn get_active_goals(&self) -> Result<Vec<Goal>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, id: i64, update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, id: i64) -> Result<bool>;
    /// Adds to the goal's current amount under per-goal isolation.
    async fn add_contribution(&self, id: i64, amount: Decimal) -> Result<Goal>;
}
