//! Day-budget resolution for the three generation call sites.
//!
//! The arithmetic lives in `common::schedule`; this module gathers deadlines
//! and sibling counts through a [`ScheduleStore`] and feeds them in.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use common::schedule::{
    self, Budget, DeadlineBasis, Level, ROADMAP, ROADMAP_ITEM_TRAIL, RoadmapPlan,
    STANDALONE_TRAIL, ScheduledDate, resolve_budget,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::info;

use crate::entity::{key_result, objective, roadmap, roadmap_category, roadmap_item};
use crate::error::AppError;

/// The scheduling-relevant part of a Key Result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResultRef {
    pub id: i32,
    pub objective_id: i32,
    pub explicit_date: Option<NaiveDate>,
}

impl From<&key_result::Model> for KeyResultRef {
    fn from(m: &key_result::Model) -> Self {
        Self {
            id: m.id,
            objective_id: m.objective_id,
            explicit_date: m.expected_completion_date,
        }
    }
}

/// Lookups the budget resolution depends on. Failures are propagated as-is.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn key_result(&self, id: i32) -> Result<KeyResultRef, AppError>;

    /// The objective's completion date; NotFound when the objective is absent.
    async fn objective_deadline(&self, objective_id: i32) -> Result<Option<NaiveDate>, AppError>;

    /// Key Results of an objective in creation order.
    async fn key_results_of(&self, objective_id: i32) -> Result<Vec<KeyResultRef>, AppError>;

    /// Id of the Key Result whose roadmap holds the item.
    async fn item_owner(&self, item_id: i32) -> Result<i32, AppError>;

    /// Item ids of a Key Result's roadmap, category order then item order.
    /// Empty when the Key Result has no roadmap.
    async fn roadmap_items_of(&self, key_result_id: i32) -> Result<Vec<i32>, AppError>;
}

/// [`ScheduleStore`] backed by the database.
pub struct DbScheduleStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DbScheduleStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait> ScheduleStore for DbScheduleStore<'a, C> {
    async fn key_result(&self, id: i32) -> Result<KeyResultRef, AppError> {
        key_result::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .map(|m| KeyResultRef::from(&m))
            .ok_or_else(|| AppError::NotFound("Key result not found".into()))
    }

    async fn objective_deadline(&self, objective_id: i32) -> Result<Option<NaiveDate>, AppError> {
        let deadline: Option<Option<NaiveDate>> = objective::Entity::find_by_id(objective_id)
            .select_only()
            .column(objective::Column::CompletionDate)
            .into_tuple()
            .one(self.conn)
            .await?;
        deadline.ok_or_else(|| AppError::NotFound("Objective not found".into()))
    }

    async fn key_results_of(&self, objective_id: i32) -> Result<Vec<KeyResultRef>, AppError> {
        let rows = key_result::Entity::find()
            .filter(key_result::Column::ObjectiveId.eq(objective_id))
            .order_by_asc(key_result::Column::CreatedAt)
            .order_by_asc(key_result::Column::Id)
            .all(self.conn)
            .await?;
        Ok(rows.iter().map(KeyResultRef::from).collect())
    }

    async fn item_owner(&self, item_id: i32) -> Result<i32, AppError> {
        let not_found = || AppError::NotFound("Roadmap item not found".into());

        let category_id: i32 = roadmap_item::Entity::find_by_id(item_id)
            .select_only()
            .column(roadmap_item::Column::CategoryId)
            .into_tuple()
            .one(self.conn)
            .await?
            .ok_or_else(not_found)?;
        let roadmap_id: i32 = roadmap_category::Entity::find_by_id(category_id)
            .select_only()
            .column(roadmap_category::Column::RoadmapId)
            .into_tuple()
            .one(self.conn)
            .await?
            .ok_or_else(not_found)?;
        let key_result_id: i32 = roadmap::Entity::find_by_id(roadmap_id)
            .select_only()
            .column(roadmap::Column::KeyResultId)
            .into_tuple()
            .one(self.conn)
            .await?
            .ok_or_else(not_found)?;

        Ok(key_result_id)
    }

    async fn roadmap_items_of(&self, key_result_id: i32) -> Result<Vec<i32>, AppError> {
        let Some(roadmap) = roadmap::Entity::find()
            .filter(roadmap::Column::KeyResultId.eq(key_result_id))
            .one(self.conn)
            .await?
        else {
            return Ok(Vec::new());
        };

        let category_ids: Vec<i32> = roadmap_category::Entity::find()
            .filter(roadmap_category::Column::RoadmapId.eq(roadmap.id))
            .order_by_asc(roadmap_category::Column::Position)
            .order_by_asc(roadmap_category::Column::Id)
            .select_only()
            .column(roadmap_category::Column::Id)
            .into_tuple()
            .all(self.conn)
            .await?;
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut items: Vec<(i32, i32, i32)> = roadmap_item::Entity::find()
            .filter(roadmap_item::Column::CategoryId.is_in(category_ids.clone()))
            .select_only()
            .column(roadmap_item::Column::Id)
            .column(roadmap_item::Column::CategoryId)
            .column(roadmap_item::Column::Position)
            .into_tuple()
            .all(self.conn)
            .await?;

        let rank = |category_id: i32| category_ids.iter().position(|&c| c == category_id);
        items.sort_by_key(|&(id, category_id, position)| (rank(category_id), position, id));
        Ok(items.into_iter().map(|(id, _, _)| id).collect())
    }
}

/// Budget and item-count hint for a Key Result's roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadmapBudget {
    pub budget: Budget,
    pub plan: RoadmapPlan,
}

/// Resolves day budgets through a [`ScheduleStore`].
pub struct BudgetPlanner<S> {
    store: S,
}

impl<S: ScheduleStore> BudgetPlanner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Budget for generating the roadmap of `key_result_id`.
    pub async fn roadmap_budget(
        &self,
        key_result_id: i32,
        now: DateTime<Utc>,
    ) -> Result<RoadmapBudget, AppError> {
        let kr = self.store.key_result(key_result_id).await?;

        let budget = match kr.explicit_date {
            Some(date) => {
                resolve_budget(&ROADMAP, Some(&DeadlineBasis::from_date(date)), None, now)
            }
            None => {
                let ancestor = self.objective_basis(&kr).await?;
                resolve_budget(&ROADMAP, None, ancestor.as_ref(), now)
            }
        };
        let plan = schedule::plan_roadmap(budget.days);

        info!(
            key_result_id,
            days = budget.days,
            source = ?budget.source,
            exact_item_count = plan.exact_item_count,
            "Resolved roadmap budget"
        );
        Ok(RoadmapBudget { budget, plan })
    }

    /// Budget for generating the trail of roadmap item `item_id`.
    pub async fn item_trail_budget(
        &self,
        item_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Budget, AppError> {
        let key_result_id = self.store.item_owner(item_id).await?;
        let kr = self.store.key_result(key_result_id).await?;

        let items = self.store.roadmap_items_of(key_result_id).await?;
        let index = items.iter().position(|&id| id == item_id).unwrap_or(0);
        let item_level = Level::new(items.len(), index);

        // The Key Result's own date is the nearest dated ancestor; the item has none.
        let ancestor = match kr.explicit_date {
            Some(date) => Some(DeadlineBasis::from_date(date)),
            None => self.objective_basis(&kr).await?,
        }
        .map(|basis| basis.divided_by(item_level));
        let budget = resolve_budget(&ROADMAP_ITEM_TRAIL, None, ancestor.as_ref(), now);

        info!(
            item_id,
            key_result_id,
            days = budget.days,
            source = ?budget.source,
            "Resolved trail budget"
        );
        Ok(budget)
    }

    // The objective's deadline divided among its Key Results, or None when the
    // objective has no date.
    async fn objective_basis(&self, kr: &KeyResultRef) -> Result<Option<DeadlineBasis>, AppError> {
        let Some(deadline) = self.store.objective_deadline(kr.objective_id).await? else {
            return Ok(None);
        };
        let siblings = self.store.key_results_of(kr.objective_id).await?;
        let index = siblings.iter().position(|s| s.id == kr.id).unwrap_or(0);

        Ok(Some(
            DeadlineBasis::from_date(deadline).divided_by(Level::new(siblings.len(), index)),
        ))
    }
}

/// Budget for a trail generated outside any roadmap.
pub fn standalone_trail_budget(target_date: Option<NaiveDate>, now: DateTime<Utc>) -> Budget {
    let explicit = target_date.map(DeadlineBasis::from_date);
    let budget = resolve_budget(&STANDALONE_TRAIL, explicit.as_ref(), None, now);
    info!(days = budget.days, source = ?budget.source, "Resolved standalone trail budget");
    budget
}

/// Dates for an objective's Key Results, given in creation order. Stored dates
/// are kept; undated ones share the days left until `deadline`.
pub fn schedule_key_results(
    deadline: Option<NaiveDate>,
    key_results: &[KeyResultRef],
    now: DateTime<Utc>,
) -> Vec<ScheduledDate> {
    let explicit: Vec<Option<NaiveDate>> = key_results.iter().map(|kr| kr.explicit_date).collect();
    schedule::spread_deadlines(deadline, &explicit, now)
}
