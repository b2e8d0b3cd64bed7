pub mod config;
pub mod db;
pub mod ecs;
pub mod id;
pub mod model;
pub mod persist;
pub mod scenario;
pub mod sim;

pub use config::{ConfigError, RebellionConfig};
pub use id::IdGenerator;
pub use model::{CampaignWorld, MapFaction, SimTimestamp};
pub use persist::{PersistError, SaveStore};
pub use sim::{RebellionSystem, Signal};
