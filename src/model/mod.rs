mod audit;
mod config;
mod entity;
pub mod keys;
mod user;

pub use self::audit::{AuditRecord, sort_newest_first};
pub use self::config::{ConsoleConfig, RemoteConfig, SessionState};
pub use self::entity::{
    AuditSetting, EntityKind, Hierarchy, Project, Stage, StageVars, Team, Var,
};
pub use self::user::{TeamMember, UserPreferences, UserProfile, WhoAmI};
