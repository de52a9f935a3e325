use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Supervisor,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Student => "student",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        })
    }
}

/// The authenticated user on whose behalf a command runs. Built once from the
/// session configuration and passed explicitly to the filter and the workflow
/// engine; there is no ambient current-user state. Evaluators are supervisors
/// with projects assigned to them through the `evaluator` field.
#[derive(Clone, Debug)]
pub struct Actor {
    /// Stable identity (the account e-mail), matched against `created_by`.
    pub identity: String,
    /// Display name, matched against `supervisor` and `evaluator`.
    pub display_name: String,
    pub role: Role,
}
