mod alerts;
mod error;
mod job_schedulers;
mod shared;

pub use alerts::run_evaluation::{
    AlertDelivery, EvaluationResult, RunEvaluationUseCase, UseCaseError,
};
pub use error::ChurnverseError;
pub use job_schedulers::start_send_alerts_job;
use churnverse_infra::ChurnverseContext;

/// Runs a single card inactivity check
pub async fn run_evaluation(
    usecase: RunEvaluationUseCase,
    ctx: &ChurnverseContext,
) -> Result<EvaluationResult, ChurnverseError> {
    shared::usecase::execute(usecase, ctx)
        .await
        .map_err(ChurnverseError::from)
}
