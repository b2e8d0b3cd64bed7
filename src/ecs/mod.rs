//! Bevy host for the rebellion engine: an hourly clock, a daily run
//! condition, and messages carrying signals in and notifications out.

pub mod app;
pub mod campaign;
pub mod clock;
pub mod conditions;
pub mod rebellion;
pub mod schedule;

pub use app::{build_campaign_app, build_campaign_app_with_executor};
pub use campaign::{Campaign, CampaignNotification, CampaignSignal, Rebellion, SimRng};
pub use clock::SimClock;
pub use conditions::daily;
pub use schedule::{SimPhase, SimTick, configure_sim_schedule};
