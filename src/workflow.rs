//! Pure decision logic for the two project life-cycles. Every function maps a
//! current state and a requested action to either a patch to persist or a
//! denial; the store call itself is the caller's next, separate step, so the
//! rules stay testable without a database.

use crate::model::{ApprovalStatus, EvaluationStatus};
use thiserror::Error;

/// Why a requested transition was not permitted. The display text is the
/// message shown to the user; no store call is made after a denial.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Denied {
    #[error("project has already been {0}, the decision is final")]
    AlreadyDecided(ApprovalStatus),
    #[error("please enter remarks before submitting the evaluation")]
    EmptyRemarks,
    #[error("project has already been evaluated")]
    AlreadyEvaluated,
    #[error("only approved projects can be deleted, this one is {0}")]
    NotApproved(ApprovalStatus),
}

/// A supervisor's verdict on a pending request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Approve,
    Reject,
}

impl Verdict {
    pub fn status(self) -> ApprovalStatus {
        match self {
            Verdict::Approve => ApprovalStatus::Approved,
            Verdict::Reject => ApprovalStatus::Rejected,
        }
    }
}

/// Field update for the approval workflow: `{status}` and nothing else.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalPatch {
    pub status: ApprovalStatus,
}

/// Field update for the evaluation workflow: `{evaluation_status,
/// evaluation_remarks}` and nothing else. The status is always `Evaluated`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvaluationPatch {
    pub evaluation_status: EvaluationStatus,
    pub evaluation_remarks: String,
}

/// Go-ahead to remove a project record entirely.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Deletion;

/// A pending request may be approved or rejected exactly once; both outcomes
/// are terminal.
pub fn decide_approval(
    current: ApprovalStatus,
    verdict: Verdict,
) -> Result<ApprovalPatch, Denied> {
    match current {
        ApprovalStatus::Pending => Ok(ApprovalPatch {
            status: verdict.status(),
        }),
        decided => Err(Denied::AlreadyDecided(decided)),
    }
}

/// An evaluation needs non-blank remarks and may be submitted exactly once.
/// The remarks are kept verbatim; trimming is only used for the emptiness
/// check.
pub fn decide_evaluation(
    current: Option<EvaluationStatus>,
    remarks: &str,
) -> Result<EvaluationPatch, Denied> {
    if current == Some(EvaluationStatus::Evaluated) {
        return Err(Denied::AlreadyEvaluated);
    }
    if remarks.trim().is_empty() {
        return Err(Denied::EmptyRemarks);
    }
    Ok(EvaluationPatch {
        evaluation_status: EvaluationStatus::Evaluated,
        evaluation_remarks: remarks.to_owned(),
    })
}

/// Deletion is offered only from the approved-projects view, so only an
/// approved project may be removed. Applies to admins as well.
pub fn decide_deletion(current: ApprovalStatus) -> Result<Deletion, Denied> {
    match current {
        ApprovalStatus::Approved => Ok(Deletion),
        other => Err(Denied::NotApproved(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_from_pending() {
        assert_eq!(
            decide_approval(ApprovalStatus::Pending, Verdict::Approve),
            Ok(ApprovalPatch {
                status: ApprovalStatus::Approved
            })
        );
        assert_eq!(
            decide_approval(ApprovalStatus::Pending, Verdict::Reject),
            Ok(ApprovalPatch {
                status: ApprovalStatus::Rejected
            })
        );
    }

    #[test]
    fn decided_projects_are_terminal() {
        for decided in [ApprovalStatus::Approved, ApprovalStatus::Rejected] {
            for verdict in [Verdict::Approve, Verdict::Reject] {
                assert_eq!(
                    decide_approval(decided, verdict),
                    Err(Denied::AlreadyDecided(decided))
                );
            }
        }
    }

    #[test]
    fn approve_then_reject_is_denied() {
        let patch = decide_approval(ApprovalStatus::Pending, Verdict::Approve).unwrap();
        assert_eq!(patch.status, ApprovalStatus::Approved);
        assert_eq!(
            decide_approval(patch.status, Verdict::Reject),
            Err(Denied::AlreadyDecided(ApprovalStatus::Approved))
        );
    }

    #[test]
    fn evaluation_requires_remarks() {
        assert_eq!(decide_evaluation(None, ""), Err(Denied::EmptyRemarks));
        assert_eq!(decide_evaluation(None, "   "), Err(Denied::EmptyRemarks));
        assert_eq!(
            decide_evaluation(Some(EvaluationStatus::Pending), "\t\n"),
            Err(Denied::EmptyRemarks)
        );
    }

    #[test]
    fn evaluation_patch_keeps_remarks_verbatim() {
        assert_eq!(
            decide_evaluation(None, "Good work"),
            Ok(EvaluationPatch {
                evaluation_status: EvaluationStatus::Evaluated,
                evaluation_remarks: "Good work".to_owned()
            })
        );
        // An unassigned project and an assigned-but-pending one behave alike.
        assert_eq!(
            decide_evaluation(Some(EvaluationStatus::Pending), " solid effort "),
            Ok(EvaluationPatch {
                evaluation_status: EvaluationStatus::Evaluated,
                evaluation_remarks: " solid effort ".to_owned()
            })
        );
    }

    #[test]
    fn evaluation_is_terminal() {
        assert_eq!(
            decide_evaluation(Some(EvaluationStatus::Evaluated), "again"),
            Err(Denied::AlreadyEvaluated)
        );
    }

    #[test]
    fn deletion_only_when_approved() {
        assert_eq!(decide_deletion(ApprovalStatus::Approved), Ok(Deletion));
        assert_eq!(
            decide_deletion(ApprovalStatus::Pending),
            Err(Denied::NotApproved(ApprovalStatus::Pending))
        );
        assert_eq!(
            decide_deletion(ApprovalStatus::Rejected),
            Err(Denied::NotApproved(ApprovalStatus::Rejected))
        );
    }
}
