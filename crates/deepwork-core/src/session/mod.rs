mod accounting;
mod classifier;
mod lifecycle;
mod model;
mod view;

pub use classifier::{OVERRUN_FACTOR, PAUSE_LIMIT};
pub use lifecycle::{REASON_MAX_LEN, SCHEDULED_MINUTES_MAX, TITLE_MAX_LEN};
pub use model::{Interruption, Session, SessionStatus};
pub use view::{InterruptionView, SessionDetail, SessionSummary};
