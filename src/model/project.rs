use eyre::{Error, bail};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Approval workflow state. `Approved` and `Rejected` are terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s {
            "Pending" => ApprovalStatus::Pending,
            "Approved" => ApprovalStatus::Approved,
            "Rejected" => ApprovalStatus::Rejected,
            other => bail!("unknown project status: {other}"),
        })
    }
}

/// Evaluation workflow state. `Evaluated` is terminal. A project with no
/// stored evaluation state has not been assigned for evaluation yet and is
/// shown as pending.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EvaluationStatus {
    Pending,
    Evaluated,
}

impl EvaluationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationStatus::Pending => "Pending",
            EvaluationStatus::Evaluated => "Evaluated",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s {
            "Pending" => EvaluationStatus::Pending,
            "Evaluated" => EvaluationStatus::Evaluated,
            other => bail!("unknown evaluation status: {other}"),
        })
    }
}

/// One tracked project. The approval and evaluation life-cycles live on the
/// same record but never gate one another.
#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub supervisor: String,
    pub created_by: String,
    pub group_members: Vec<String>,
    pub number_of_students: u32,
    pub area: String,
    pub degree_type: String,
    pub description: String,
    pub status: ApprovalStatus,
    pub evaluator: Option<String>,
    pub evaluation_status: Option<EvaluationStatus>,
    pub evaluation_remarks: Option<String>,
}

impl Project {
    pub fn evaluation(&self) -> EvaluationStatus {
        self.evaluation_status.unwrap_or(EvaluationStatus::Pending)
    }
}

#[test]
fn test_status_round_trip() {
    for s in ["Pending", "Approved", "Rejected"] {
        assert_eq!(s.parse::<ApprovalStatus>().unwrap().as_str(), s);
    }
    assert!("approved".parse::<ApprovalStatus>().is_err());
    assert_eq!(
        "Evaluated".parse::<EvaluationStatus>().unwrap(),
        EvaluationStatus::Evaluated
    );
    assert!("Done".parse::<EvaluationStatus>().is_err());
}
