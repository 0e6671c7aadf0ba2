pub mod admin;
pub mod error;
pub mod names;
pub mod plan;
pub mod settings;
pub mod step;

pub use admin::{AdminClient, Password, RoleGrant, UserInfo, UserSpec};
pub use error::ProvisionError;
pub use plan::{ProvisionPlan, StepReport};
pub use step::{ProvisionStep, Session, StepOutcome};
