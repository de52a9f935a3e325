use crate::model::{Project, StudentProfile};
use crate::visibility::View;

/// Render one view of the collection. Empty views get their own line rather
/// than silence, so the user can tell an empty result from a broken one.
pub fn render(view: View, projects: &[&Project]) {
    match view {
        View::StudentOwn => results(projects),
        View::SupervisorRequests => requests(projects),
        View::SupervisorApproved => supervised(projects),
        View::EvaluatorAssigned => evaluations(projects),
        View::AdminAll => all(projects),
    }
}

fn badge(status: &str) -> String {
    format!("[{status}]")
}

fn requests(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No requests found.");
        return;
    }
    println!("Project requests:");
    for (n, p) in projects.iter().enumerate() {
        println!(
            "  {}. {} {} ({}) submitted by {}",
            n + 1,
            badge(p.status.as_str()),
            p.name,
            p.area,
            p.created_by
        );
    }
}

fn supervised(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No approved projects found.");
        return;
    }
    println!("Projects under my supervision:");
    for (n, p) in projects.iter().enumerate() {
        println!(
            "  {}. {} {} ({} {}, {} students)",
            n + 1,
            badge(p.status.as_str()),
            p.name,
            p.degree_type,
            p.area,
            p.number_of_students
        );
        if !p.group_members.is_empty() {
            println!("     members: {}", p.group_members.join(", "));
        }
    }
}

fn evaluations(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No evaluations assigned.");
        return;
    }
    println!("Evaluations under me:");
    for (n, p) in projects.iter().enumerate() {
        println!(
            "  {}. {} {} created by {}",
            n + 1,
            badge(p.evaluation().as_str()),
            p.name,
            p.created_by
        );
        if let Some(remarks) = &p.evaluation_remarks {
            println!("     remarks: {remarks}");
        }
    }
}

fn results(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No projects found for your account.");
        return;
    }
    println!("My evaluation results:");
    for p in projects {
        println!("  - {} {}", badge(p.evaluation().as_str()), p.name);
        println!(
            "    remarks: {}",
            p.evaluation_remarks.as_deref().unwrap_or("no remarks yet")
        );
    }
}

fn all(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    println!("All projects:");
    for (n, p) in projects.iter().enumerate() {
        println!(
            "  {}. {} {} - supervisor {}, {} students, {}",
            n + 1,
            badge(p.status.as_str()),
            p.name,
            p.supervisor,
            p.number_of_students,
            p.area
        );
    }
}

pub fn profile(p: &StudentProfile) {
    println!("My profile:");
    println!("  Full name: {}", p.full_name);
    println!("  Registration number: {}", p.reg_number);
    println!("  Semester: {}", p.semester);
    println!("  Phone: {}", p.phone);
    println!("  Email: {}", p.email);
    println!("  Batch/stream: {}", p.batch_stream);
}
