use crate::{error::ChurnverseError, shared::usecase::UseCase};
use chrono::NaiveDate;
use churnverse_domain::{
    build_batch, render_message, AlertRecord, AlertThresholds, InvalidThresholdsError, User, ID,
};
use churnverse_infra::{ChurnverseContext, IMessageSender, LogMessageSender, OutgoingMessage};
use futures::{stream, StreamExt};
use std::{
    fmt::Display,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{error, info, warn};

/// Checks the cards of every user for inactivity and sends each user with
/// inactive cards one alert.
#[derive(Debug, Default)]
pub struct RunEvaluationUseCase {
    /// Date to evaluate inactivity at. Defaults to today in the configured timezone.
    pub reference_date: Option<NaiveDate>,
    /// Overrides the configured warning threshold
    pub warning_days: Option<i64>,
    /// Overrides the configured critical threshold
    pub critical_days: Option<i64>,
    /// Only log the alerts instead of sending and recording them
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidThresholds(InvalidThresholdsError),
    StorageError(String),
}

impl From<UseCaseError> for ChurnverseError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidThresholds(e) => Self::InvalidConfiguration(e.to_string()),
            UseCaseError::StorageError(e) => Self::StorageUnavailable(e),
        }
    }
}

/// What happened to the alerts that were due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDelivery {
    /// Handed to the mail relay and recorded as sent
    Sent,
    /// Only logged because no mail relay is in use. Not recorded, so a later
    /// run with a relay sends them.
    LoggedOnly,
    /// Only logged on request
    DryRun,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub reference_date: NaiveDate,
    pub delivery: AlertDelivery,
    pub users_scanned: usize,
    pub users_alerted: usize,
    pub cards_alerted: usize,
    pub delivery_failures: usize,
    pub lookup_failures: usize,
    pub duration: Duration,
}

impl Display for EvaluationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Card inactivity check for {} finished in {}ms.",
            self.reference_date,
            self.duration.as_millis()
        )?;
        writeln!(f, "Users scanned: {}", self.users_scanned)?;
        let alerts = match self.delivery {
            AlertDelivery::Sent => "Alerts sent",
            AlertDelivery::LoggedOnly => "Alerts not delivered (no mail relay configured)",
            AlertDelivery::DryRun => "Alerts that would be sent (dry run)",
        };
        writeln!(
            f,
            "{}: {} (covering {} card(s))",
            alerts, self.users_alerted, self.cards_alerted
        )?;
        writeln!(f, "Delivery failures: {}", self.delivery_failures)?;
        write!(f, "Card lookup failures: {}", self.lookup_failures)?;
        if self.users_alerted == 0 && self.delivery_failures == 0 && self.lookup_failures == 0 {
            write!(f, "\nNo inactive cards found today. All clear!")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum UserOutcome {
    NothingToSend,
    Alerted { cards: usize },
    LookupFailed,
    DeliveryFailed,
}

struct Evaluation {
    ctx: ChurnverseContext,
    sender: Arc<dyn IMessageSender>,
    reference_date: NaiveDate,
    thresholds: AlertThresholds,
    record_alerts: bool,
}

impl Evaluation {
    async fn evaluate_user(&self, user: &User) -> UserOutcome {
        let cards = match self.ctx.repos.cards.find_by_user(&user.id).await {
            Ok(cards) => cards,
            Err(e) => {
                error!("Unable to fetch cards for user {}: {:?}", user.id, e);
                return UserOutcome::LookupFailed;
            }
        };

        let batch = match build_batch(cards, self.reference_date, &self.thresholds) {
            Some(batch) => batch,
            None => return UserOutcome::NothingToSend,
        };

        let card_ids = batch
            .tiered_cards()
            .map(|(card, _)| card.id.clone())
            .collect::<Vec<ID>>();
        let records = match self.ctx.repos.alert_records.find_by_cards(&card_ids).await {
            Ok(records) => records,
            Err(e) => {
                error!("Unable to fetch alert records for user {}: {:?}", user.id, e);
                return UserOutcome::LookupFailed;
            }
        };
        let batch = match batch.retain(|card, tier| {
            !records
                .iter()
                .any(|r| r.card_id == card.id && r.covers(tier, self.reference_date))
        }) {
            Some(batch) => batch,
            None => {
                info!(
                    "User {} was already alerted about all inactive cards on {}",
                    user.id, self.reference_date
                );
                return UserOutcome::NothingToSend;
            }
        };

        let message = render_message(&user.username, &batch, &self.thresholds);
        let outgoing = OutgoingMessage {
            to: user.email.clone(),
            subject: message.subject,
            body: message.body,
        };
        if let Err(e) = self.sender.send(&outgoing).await {
            warn!("Unable to send alert to user {}: {}", user.id, e);
            return UserOutcome::DeliveryFailed;
        }
        if self.record_alerts {
            info!(
                "Successfully sent alert to {} for {} card(s).",
                user.email,
                batch.card_count()
            );
        }

        if self.record_alerts {
            let records = batch
                .tiered_cards()
                .map(|(card, tier)| AlertRecord::new(card.id.clone(), tier, self.reference_date))
                .collect::<Vec<_>>();
            if let Err(e) = self.ctx.repos.alert_records.upsert_many(&records).await {
                // The alert went out, but it might be sent again on a re-run today
                error!("Unable to record alerts sent to user {}: {:?}", user.id, e);
            }
        }

        UserOutcome::Alerted {
            cards: batch.card_count(),
        }
    }
}

impl RunEvaluationUseCase {
    fn thresholds(&self, ctx: &ChurnverseContext) -> Result<AlertThresholds, UseCaseError> {
        AlertThresholds::new(
            self.warning_days
                .unwrap_or(ctx.config.warning_threshold_days),
            self.critical_days
                .unwrap_or(ctx.config.critical_threshold_days),
        )
        .map_err(UseCaseError::InvalidThresholds)
    }
}

#[async_trait::async_trait]
impl UseCase for RunEvaluationUseCase {
    type Response = EvaluationResult;
    type Error = UseCaseError;

    const NAME: &'static str = "RunEvaluation";

    async fn execute(&mut self, ctx: &ChurnverseContext) -> Result<Self::Response, Self::Error> {
        let started = Instant::now();
        let thresholds = self.thresholds(ctx)?;
        let reference_date = self
            .reference_date
            .unwrap_or_else(|| ctx.sys.today(&ctx.config.timezone));

        info!("Starting card inactivity check for {}...", reference_date);

        let users = ctx
            .repos
            .users
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        let sender: Arc<dyn IMessageSender> = if self.dry_run {
            Arc::new(LogMessageSender {})
        } else {
            ctx.sender.clone()
        };
        let delivery = if self.dry_run {
            AlertDelivery::DryRun
        } else if sender.confirms_delivery() {
            AlertDelivery::Sent
        } else {
            AlertDelivery::LoggedOnly
        };
        let evaluation = Arc::new(Evaluation {
            ctx: ctx.clone(),
            sender,
            reference_date,
            thresholds,
            record_alerts: delivery == AlertDelivery::Sent,
        });

        let users_scanned = users.len();
        let outcomes = stream::iter(users)
            .map(|user| {
                let evaluation = Arc::clone(&evaluation);
                async move { evaluation.evaluate_user(&user).await }
            })
            .buffer_unordered(ctx.config.concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut res = EvaluationResult {
            reference_date,
            delivery,
            users_scanned,
            users_alerted: 0,
            cards_alerted: 0,
            delivery_failures: 0,
            lookup_failures: 0,
            duration: Duration::default(),
        };
        for outcome in outcomes {
            match outcome {
                UserOutcome::NothingToSend => {}
                UserOutcome::Alerted { cards } => {
                    res.users_alerted += 1;
                    res.cards_alerted += cards;
                }
                UserOutcome::LookupFailed => res.lookup_failures += 1,
                UserOutcome::DeliveryFailed => res.delivery_failures += 1,
            }
        }
        res.duration = started.elapsed();

        info!(
            users_scanned = res.users_scanned,
            users_alerted = res.users_alerted,
            delivery_failures = res.delivery_failures,
            lookup_failures = res.lookup_failures,
            "Finished card inactivity check for {}",
            reference_date
        );

        Ok(res)
    }
}
