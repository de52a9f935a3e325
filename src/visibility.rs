//! Role-scoped views over the full project collection. The store is always
//! read unfiltered; each view applies exactly one single-field equality
//! predicate here, client-side, preserving input order and never mutating.

use crate::model::{Actor, ApprovalStatus, Project, Role};

/// One predicate per role-view pair. A role mismatch yields the empty view,
/// the same as visiting a dashboard that is not yours.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum View {
    /// Projects the student created.
    StudentOwn,
    /// All requests addressed to the supervisor, whatever their status.
    SupervisorRequests,
    /// The supervisor's requests that have been approved.
    SupervisorApproved,
    /// Projects assigned to the actor for evaluation.
    EvaluatorAssigned,
    /// The whole collection, admins only.
    AdminAll,
}

pub fn visible<'a>(projects: &'a [Project], actor: &Actor, view: View) -> Vec<&'a Project> {
    projects.iter().filter(|p| allows(p, actor, view)).collect()
}

fn allows(project: &Project, actor: &Actor, view: View) -> bool {
    match view {
        View::StudentOwn => {
            actor.role == Role::Student && project.created_by == actor.identity
        }
        View::SupervisorRequests => {
            actor.role == Role::Supervisor && project.supervisor == actor.display_name
        }
        View::SupervisorApproved => {
            actor.role == Role::Supervisor
                && project.supervisor == actor.display_name
                && project.status == ApprovalStatus::Approved
        }
        View::EvaluatorAssigned => {
            actor.role == Role::Supervisor
                && project.evaluator.as_deref() == Some(actor.display_name.as_str())
        }
        View::AdminAll => actor.role == Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluationStatus, ProjectId};

    fn project(id: &str, supervisor: &str, created_by: &str, status: ApprovalStatus) -> Project {
        Project {
            id: ProjectId(id.to_owned()),
            name: format!("Project {id}"),
            supervisor: supervisor.to_owned(),
            created_by: created_by.to_owned(),
            group_members: Vec::new(),
            number_of_students: 2,
            area: "Web Development Projects".to_owned(),
            degree_type: "BS".to_owned(),
            description: String::new(),
            status,
            evaluator: None,
            evaluation_status: None,
            evaluation_remarks: None,
        }
    }

    fn actor(identity: &str, display_name: &str, role: Role) -> Actor {
        Actor {
            identity: identity.to_owned(),
            display_name: display_name.to_owned(),
            role,
        }
    }

    fn collection() -> Vec<Project> {
        let mut with_evaluator = project("3", "Dr. B", "bob@uni.edu", ApprovalStatus::Approved);
        with_evaluator.evaluator = Some("Dr. A".to_owned());
        with_evaluator.evaluation_status = Some(EvaluationStatus::Pending);
        vec![
            project("1", "Dr. A", "alice@uni.edu", ApprovalStatus::Pending),
            project("2", "Dr. A", "bob@uni.edu", ApprovalStatus::Approved),
            with_evaluator,
            project("4", "Dr. C", "alice@uni.edu", ApprovalStatus::Rejected),
        ]
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.0.clone()).collect()
    }

    #[test]
    fn supervisor_requests_vs_approved() {
        let all = collection();
        let dr_a = actor("a@uni.edu", "Dr. A", Role::Supervisor);
        // The requests view keeps decided projects; the approved view does not.
        assert_eq!(ids(&visible(&all, &dr_a, View::SupervisorRequests)), ["1", "2"]);
        assert_eq!(ids(&visible(&all, &dr_a, View::SupervisorApproved)), ["2"]);
    }

    #[test]
    fn student_sees_own_projects_only() {
        let all = collection();
        let alice = actor("alice@uni.edu", "Alice", Role::Student);
        assert_eq!(ids(&visible(&all, &alice, View::StudentOwn)), ["1", "4"]);
    }

    #[test]
    fn evaluator_view_matches_evaluator_field() {
        let all = collection();
        let dr_a = actor("a@uni.edu", "Dr. A", Role::Supervisor);
        let dr_c = actor("c@uni.edu", "Dr. C", Role::Supervisor);
        assert_eq!(ids(&visible(&all, &dr_a, View::EvaluatorAssigned)), ["3"]);
        assert!(visible(&all, &dr_c, View::EvaluatorAssigned).is_empty());
    }

    #[test]
    fn admin_sees_everything_others_do_not() {
        let all = collection();
        let admin = actor("root@uni.edu", "Root", Role::Admin);
        assert_eq!(visible(&all, &admin, View::AdminAll).len(), all.len());
        let alice = actor("alice@uni.edu", "Alice", Role::Student);
        assert!(visible(&all, &alice, View::AdminAll).is_empty());
    }

    #[test]
    fn role_mismatch_is_empty_not_an_error() {
        let all = collection();
        // A student with a supervisor's display name still sees no requests.
        let impostor = actor("alice@uni.edu", "Dr. A", Role::Student);
        assert!(visible(&all, &impostor, View::SupervisorRequests).is_empty());
        // And nothing matching at all is an empty sequence, not a failure.
        let nobody = actor("x@uni.edu", "Nobody", Role::Supervisor);
        assert!(visible(&all, &nobody, View::SupervisorRequests).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let all = collection();
        let alice = actor("alice@uni.edu", "Alice", Role::Student);
        let mine = visible(&all, &alice, View::StudentOwn);
        assert_eq!(ids(&mine), ["1", "4"]);
        let positions: Vec<usize> = mine
            .iter()
            .map(|p| all.iter().position(|q| q.id == p.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
