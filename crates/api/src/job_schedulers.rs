use crate::{alerts::run_evaluation::RunEvaluationUseCase, shared::usecase::execute};
use chrono::{DateTime, Duration as ChronoDuration, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use churnverse_infra::ChurnverseContext;
use std::time::Duration;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{info, info_span};
use tracing_futures::Instrument;

/// A scheduled card inactivity check: the calendar date it evaluates and
/// when it should start.
#[derive(Debug, Clone, PartialEq)]
pub struct NextRun {
    pub date: NaiveDate,
    pub at: DateTime<Tz>,
}

/// The instant the wall clock in `tz` reads `send_time` on `date`. A time
/// skipped by a daylight saving change resolves to one hour later and a
/// repeated time to its first occurrence.
fn local_send_time(tz: &Tz, date: NaiveDate, send_time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(send_time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(naive + ChronoDuration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// Next check to run given the current local time. After the first run every
/// calendar date is checked exactly once, so the date following `last_run` is
/// returned even when its send time has already passed.
pub fn get_next_run(
    now: &DateTime<Tz>,
    send_time: NaiveTime,
    last_run: Option<NaiveDate>,
) -> NextRun {
    let tz = now.timezone();
    let date = match last_run {
        Some(last_run) => last_run.succ_opt().unwrap_or(last_run),
        None => {
            let today = now.date_naive();
            if local_send_time(&tz, today, send_time) > *now {
                today
            } else {
                today.succ_opt().unwrap_or(today)
            }
        }
    };
    NextRun {
        date,
        at: local_send_time(&tz, date, send_time),
    }
}

/// Runs the card inactivity check once a day at the configured local send time
pub fn start_send_alerts_job(ctx: ChurnverseContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_run = None;
        loop {
            let now = ctx.sys.now(&ctx.config.timezone);
            let next = get_next_run(&now, ctx.config.send_time, last_run);
            let delay = (next.at - now).to_std().unwrap_or(Duration::ZERO);
            info!(
                "Next card inactivity check for {} at {} in {} seconds",
                next.date,
                next.at,
                delay.as_secs()
            );

            sleep(delay).await;
            send_alerts(ctx.clone(), next.date)
                .instrument(info_span!("send_alerts_job", date = %next.date))
                .await;
            last_run = Some(next.date);
        }
    })
}

async fn send_alerts(context: ChurnverseContext, date: NaiveDate) {
    let usecase = RunEvaluationUseCase {
        reference_date: Some(date),
        ..Default::default()
    };
    // Errors are logged by `execute`
    if let Ok(res) = execute(usecase, &context).await {
        info!("{}", res);
    }
}
