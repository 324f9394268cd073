//! Plan lookups shared by the plan and entry handlers.

use chrono::NaiveDate;

use crate::domain::care_plan::{AgeProfile, CarePlanError, LifeCarePlan};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId};
use crate::ports::LifeCarePlanRepository;

/// A plan with its ages derived as of the request date.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub plan: LifeCarePlan,
    pub ages: AgeProfile,
}

impl PlanView {
    pub(crate) fn as_of(plan: LifeCarePlan, today: NaiveDate) -> Self {
        let ages = plan.age_profile(today);
        Self { plan, ages }
    }
}

/// Calendar date ages are derived against.
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Loads a plan or fails with [`CarePlanError::PlanNotFound`].
pub(crate) async fn load_plan(
    plans: &dyn LifeCarePlanRepository,
    id: PlanId,
) -> Result<LifeCarePlan, CarePlanError> {
    plans
        .find_by_id(&id)
        .await?
        .ok_or_else(|| CarePlanError::plan_not_found(id))
}

/// Fails with [`CarePlanError::PlanNotFound`] unless the plan exists.
pub(crate) async fn ensure_plan(plans: &dyn LifeCarePlanRepository, id: PlanId) -> Result<(), CarePlanError> {
    if plans.exists(&id).await? {
        Ok(())
    } else {
        Err(CarePlanError::plan_not_found(id))
    }
}

/// Maps a repository error, turning `PlanNotFound` into
/// [`CarePlanError::PlanNotFound`].
pub(crate) fn plan_error(id: PlanId, err: DomainError) -> CarePlanError {
    if err.code == ErrorCode::PlanNotFound {
        CarePlanError::plan_not_found(id)
    } else {
        CarePlanError::from(err)
    }
}
