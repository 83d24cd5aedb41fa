use churnverse_domain::{
    AlertThresholds, InvalidThresholdsError, DEFAULT_CRITICAL_THRESHOLD_DAYS,
    DEFAULT_WARNING_THRESHOLD_DAYS,
};
use chrono::NaiveTime;
use chrono_tz::Tz;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

const DEFAULT_FROM_ADDRESS: &str = "alerts@churnverse.com";
const DEFAULT_SEND_TIME: &str = "09:00";
const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct MailWebhookSettings {
    pub url: String,
    /// Sent in the `churnverse-webhook-key` header so that the relay can
    /// authenticate the request
    pub key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Exact number of inactive days at which a card gets its single warning
    pub warning_threshold_days: i64,
    /// Number of inactive days from which a card is alerted as critical
    pub critical_threshold_days: i64,
    /// Timezone used to decide what "today" is for the alerts job
    pub timezone: Tz,
    /// Local time of day at which the scheduled alerts job runs
    pub send_time: NaiveTime,
    /// Maximum number of users that are evaluated and notified concurrently
    pub concurrency: usize,
    /// Sender address of the alert emails
    pub from_address: String,
    /// Relay that turns alerts into emails. When not set alerts are only logged.
    pub mail_webhook: Option<MailWebhookSettings>,
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match lookup(name) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, raw, default
                );
                default
            }
        },
    }
}

fn parse_mail_webhook(lookup: &impl Fn(&str) -> Option<String>) -> Option<MailWebhookSettings> {
    let url = match lookup("MAIL_WEBHOOK_URL") {
        Some(url) => url,
        None => {
            info!("Did not find MAIL_WEBHOOK_URL environment variable. Alerts will only be logged.");
            return None;
        }
    };
    match url::Url::parse(&url) {
        Ok(parsed) if ["https", "http"].contains(&parsed.scheme()) => {}
        _ => {
            warn!(
                "The given MAIL_WEBHOOK_URL: {} is not a valid http(s) url. Alerts will only be logged.",
                url
            );
            return None;
        }
    }
    let key = lookup("MAIL_WEBHOOK_KEY");
    if key.is_none() {
        warn!("MAIL_WEBHOOK_KEY is not set, requests to the mail relay will be unauthenticated.");
    }
    Some(MailWebhookSettings { url, key })
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from the given variable lookup. Invalid values are
    /// logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let send_time = match lookup("ALERT_SEND_TIME") {
            None => None,
            Some(raw) => match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
                Ok(time) => Some(time),
                Err(_) => {
                    warn!(
                        "The given ALERT_SEND_TIME: {} is not valid, falling back to the default: {}.",
                        raw, DEFAULT_SEND_TIME
                    );
                    None
                }
            },
        };
        let concurrency = match parse_or_default(&lookup, "ALERT_CONCURRENCY", DEFAULT_CONCURRENCY)
        {
            0 => {
                warn!("ALERT_CONCURRENCY must be at least 1, using 1.");
                1
            }
            n => n,
        };

        Self {
            warning_threshold_days: parse_or_default(
                &lookup,
                "WARNING_THRESHOLD_DAYS",
                DEFAULT_WARNING_THRESHOLD_DAYS,
            ),
            critical_threshold_days: parse_or_default(
                &lookup,
                "CRITICAL_THRESHOLD_DAYS",
                DEFAULT_CRITICAL_THRESHOLD_DAYS,
            ),
            timezone: parse_or_default(&lookup, "ALERT_TIMEZONE", Tz::UTC),
            send_time: send_time.unwrap_or_else(default_send_time),
            concurrency,
            from_address: lookup("ALERT_FROM_ADDRESS").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.into()),
            mail_webhook: parse_mail_webhook(&lookup),
        }
    }

    /// The configured thresholds. Fails if they are not a valid combination.
    pub fn thresholds(&self) -> Result<AlertThresholds, InvalidThresholdsError> {
        AlertThresholds::new(self.warning_threshold_days, self.critical_threshold_days)
    }
}

fn default_send_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |name| vars.get(name).cloned())
    }

    #[test]
    fn it_uses_defaults() {
        let config = Config::default();
        assert_eq!(config.warning_threshold_days, 90);
        assert_eq!(config.critical_threshold_days, 180);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.send_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.from_address, "alerts@churnverse.com");
        assert!(config.mail_webhook.is_none());
        assert_eq!(config.thresholds(), Ok(AlertThresholds::default()));
    }

    #[test]
    fn it_reads_values() {
        let config = config_from(&[
            ("WARNING_THRESHOLD_DAYS", "30"),
            ("CRITICAL_THRESHOLD_DAYS", "60"),
            ("ALERT_TIMEZONE", "Europe/Oslo"),
            ("ALERT_SEND_TIME", "07:30"),
            ("ALERT_CONCURRENCY", "16"),
            ("MAIL_WEBHOOK_URL", "https://relay.example.com/send"),
            ("MAIL_WEBHOOK_KEY", "secret"),
        ]);
        assert_eq!(config.thresholds(), AlertThresholds::new(30, 60));
        assert_eq!(config.timezone, chrono_tz::Europe::Oslo);
        assert_eq!(config.send_time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(config.concurrency, 16);
        let webhook = config.mail_webhook.expect("Webhook to be configured");
        assert_eq!(webhook.url, "https://relay.example.com/send");
        assert_eq!(webhook.key.as_deref(), Some("secret"));
    }

    #[test]
    fn it_falls_back_on_invalid_values() {
        let config = config_from(&[
            ("WARNING_THRESHOLD_DAYS", "ninety"),
            ("ALERT_TIMEZONE", "Mars/Olympus"),
            ("ALERT_SEND_TIME", "25:99"),
            ("ALERT_CONCURRENCY", "0"),
            ("MAIL_WEBHOOK_URL", "ftp://relay.example.com"),
        ]);
        assert_eq!(config.warning_threshold_days, 90);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.send_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(config.concurrency, 1);
        assert!(config.mail_webhook.is_none());
    }

    #[test]
    fn invalid_threshold_combination_is_reported() {
        let config = config_from(&[
            ("WARNING_THRESHOLD_DAYS", "200"),
            ("CRITICAL_THRESHOLD_DAYS", "100"),
        ]);
        assert!(config.thresholds().is_err());
    }
}
