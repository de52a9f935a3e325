pub use self::actor::{Actor, Role};
pub use self::profile::StudentProfile;
pub use self::project::{ApprovalStatus, EvaluationStatus, Project, ProjectId};

mod actor;
mod profile;
mod project;
