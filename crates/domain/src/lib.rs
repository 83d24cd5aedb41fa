mod alert;
mod alert_record;
mod batch;
mod card;
mod message;
mod shared;
mod user;

pub use alert::{
    classify, AlertThresholds, AlertTier, InvalidAlertTierError, InvalidThresholdsError,
    DEFAULT_CRITICAL_THRESHOLD_DAYS, DEFAULT_WARNING_THRESHOLD_DAYS,
};
pub use alert_record::AlertRecord;
pub use batch::{build_batch, NotificationBatch};
pub use card::{Card, InvalidCardError, NICKNAME_MAX_LEN};
pub use message::{render_message, RenderedMessage, ALERT_SUBJECT};
pub use shared::entity::{InvalidIDError, ID};
pub use user::User;
