//! Plan operations for the Planner.

use jiff::civil::Date;
use log::{debug, info};

use super::Planner;
use crate::{
    db::BackfillSummary,
    display::PlanSummaries,
    error::{PlannerError, Result},
    models::{Plan, PlanSummary},
    params::{Breakdown, CreatePlan, Id, UpdatePlan},
    schedule,
};

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PlannerError::invalid_input("title").with_reason("must not be empty"));
    }
    Ok(())
}

impl Planner {
    /// Creates a new plan. The title must not be blank.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        debug!("create_plan: {:?}", params.title);
        require_title(&params.title)?;

        let title = params.title.clone();
        let description = params.description.clone();
        let color = params.color.clone();

        self.with_database(move |db| {
            db.create_plan(&title, description.as_deref(), color.as_deref())
        })
        .await
    }

    /// Retrieves a plan with its chunks.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.with_database(move |db| db.get_plan(plan_id)).await
    }

    /// Lists all plans with their chunks, oldest first.
    pub async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.with_database(|db| db.list_plans()).await
    }

    /// Lists all plans as summaries with chunk counts.
    pub async fn list_plan_summaries(&self) -> Result<PlanSummaries> {
        let plans = self.list_plans().await?;
        Ok(PlanSummaries(plans.iter().map(PlanSummary::from).collect()))
    }

    /// Applies a partial update to a plan and returns the updated plan.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<Plan> {
        debug!("update_plan: {}", params.id);
        if let Some(title) = &params.changes.title {
            require_title(title)?;
        }

        let plan_id = params.id;
        let changes = params.changes.clone();

        self.with_database(move |db| {
            db.update_plan(plan_id, &changes)?;
            db.get_plan(plan_id)?
                .ok_or(PlannerError::PlanNotFound { id: plan_id })
        })
        .await
    }

    /// Permanently deletes a plan and all its chunks.
    ///
    /// Returns the plan as it was before deletion.
    pub async fn delete_plan(&self, params: &Id) -> Result<Plan> {
        debug!("delete_plan: {}", params.id);
        let plan_id = params.id;

        self.with_database(move |db| {
            let plan = db
                .get_plan(plan_id)?
                .ok_or(PlannerError::PlanNotFound { id: plan_id })?;
            db.delete_plan(plan_id)?;
            Ok(plan)
        })
        .await
    }

    /// Splits the plan description into chunks, schedules them from the start
    /// date (today by default) and appends them to the plan.
    ///
    /// Returns the plan with all of its chunks.
    pub async fn breakdown_plan(&self, params: &Breakdown) -> Result<Plan> {
        debug!("breakdown_plan: {}", params.id);
        let start = match params.start_date.as_deref() {
            Some(raw) => schedule::parse_date("start_date", raw)?,
            None => schedule::today(),
        };
        let plan_id = params.id;
        let chunks_per_day = params.chunks_per_day;

        let plan = self
            .with_database(move |db| {
                let plan = db
                    .get_plan(plan_id)?
                    .ok_or(PlannerError::PlanNotFound { id: plan_id })?;

                let mut drafts = schedule::suggest_chunks(&plan.description);
                schedule::schedule(&mut drafts, start, chunks_per_day);
                db.insert_chunks(plan_id, &drafts)?;

                db.get_plan(plan_id)?
                    .ok_or(PlannerError::PlanNotFound { id: plan_id })
            })
            .await?;

        info!("Plan {} now has {} chunks", plan.id, plan.chunks.len());
        Ok(plan)
    }

    /// Recomputes a plan's deadline from its chunks.
    pub async fn recalculate_plan_deadline(&self, params: &Id) -> Result<Option<Date>> {
        let plan_id = params.id;
        self.with_database(move |db| db.recalculate_plan_deadline(plan_id))
            .await
    }

    /// Fills in missing chunk deadlines across all plans, then recomputes
    /// every plan deadline.
    pub async fn backfill_deadlines(&self) -> Result<BackfillSummary> {
        let today = schedule::today();
        let summary = self
            .with_database(move |db| db.backfill_deadlines(today))
            .await?;

        info!(
            "Backfilled {} chunk deadlines across {} plans",
            summary.chunks_updated, summary.plans_recalculated
        );
        Ok(summary)
    }
}
