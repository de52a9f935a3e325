use crate::config::Config;
use crate::model::{Actor, Project, Role, StudentProfile};
use crate::store::Store;
use crate::visibility::View;
use crate::workflow::Verdict;
use clap::{ArgAction, Parser, Subcommand};
use eyre::{Result, bail};
use tracing::{Level, info, warn};

mod config;
mod display;
mod model;
mod store;
mod visibility;
mod workflow;

#[derive(Parser)]
#[command(version, about = "Track academic project approval and evaluation workflows")]
struct Args {
    /// Use FILE instead of projtrack.toml
    #[arg(short, long, value_name = "FILE", default_value = "projtrack.toml")]
    config: String,
    /// Decide only, do not write back to the store
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
    /// Act with this identity instead of the configured session's
    #[arg(long, value_name = "EMAIL")]
    identity: Option<String>,
    /// Act with this display name instead of the configured session's
    #[arg(long, value_name = "NAME")]
    display_name: Option<String>,
    /// Act with this role instead of the configured session's
    #[arg(long, value_enum)]
    role: Option<Role>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List project requests addressed to you
    Requests,
    /// List your approved projects under supervision
    Supervised,
    /// List projects assigned to you for evaluation
    Evaluations,
    /// Show the evaluation outcome of your own projects
    Results,
    /// List every project in the store (admins)
    All,
    /// Approve a pending request
    Approve { project: String },
    /// Reject a pending request
    Reject { project: String },
    /// Submit an evaluation for a project assigned to you
    Evaluate {
        project: String,
        /// Evaluation remarks, required to be non-blank
        #[arg(long, value_name = "TEXT")]
        remarks: String,
    },
    /// Delete an approved project under your supervision
    Delete { project: String },
    /// Show your student profile, or update the given fields
    Profile(ProfileArgs),
}

#[derive(clap::Args)]
struct ProfileArgs {
    #[arg(long, value_name = "NAME")]
    full_name: Option<String>,
    #[arg(long, value_name = "NUMBER")]
    reg_number: Option<String>,
    #[arg(long, value_name = "SEMESTER")]
    semester: Option<String>,
    #[arg(long, value_name = "PHONE")]
    phone: Option<String>,
    #[arg(long, value_name = "BATCH")]
    batch_stream: Option<String>,
}

impl ProfileArgs {
    fn is_show_only(&self) -> bool {
        self.full_name.is_none()
            && self.reg_number.is_none()
            && self.semester.is_none()
            && self.phone.is_none()
            && self.batch_stream.is_none()
    }
}

/// Build the acting user from the configured session, with CLI overrides. No
/// session and no complete override means no actor, which every command
/// treats as "no data to show".
fn resolve_actor(config: &Config, args: &Args) -> Option<Actor> {
    let session = config.session.as_ref();
    Some(Actor {
        identity: args
            .identity
            .clone()
            .or_else(|| session.map(|s| s.identity.clone()))?,
        display_name: args
            .display_name
            .clone()
            .or_else(|| session.map(|s| s.display_name.clone()))?,
        role: args.role.or_else(|| session.map(|s| s.role))?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    sqlx::any::install_default_drivers();
    let config = Config::load(&args.config)?;
    let actor = resolve_actor(&config, &args);
    let mut store = Store::new(&config.store.url).await?;
    match &args.command {
        Command::Requests => show_view(&mut store, actor.as_ref(), View::SupervisorRequests).await,
        Command::Supervised => {
            show_view(&mut store, actor.as_ref(), View::SupervisorApproved).await
        }
        Command::Evaluations => {
            show_view(&mut store, actor.as_ref(), View::EvaluatorAssigned).await
        }
        Command::Results => show_view(&mut store, actor.as_ref(), View::StudentOwn).await,
        Command::All => show_view(&mut store, actor.as_ref(), View::AdminAll).await,
        Command::Approve { project } => {
            decide_request(&mut store, actor.as_ref(), project, Verdict::Approve, args.dry_run)
                .await
        }
        Command::Reject { project } => {
            decide_request(&mut store, actor.as_ref(), project, Verdict::Reject, args.dry_run)
                .await
        }
        Command::Evaluate { project, remarks } => {
            evaluate(&mut store, actor.as_ref(), project, remarks, args.dry_run).await
        }
        Command::Delete { project } => {
            delete(&mut store, actor.as_ref(), project, args.dry_run).await
        }
        Command::Profile(fields) => {
            profile(&mut store, actor.as_ref(), fields, args.dry_run).await
        }
    }
}

/// One view command: fetch the whole collection, filter client-side, render.
/// Without a session there is nothing to fetch and the view is empty.
async fn show_view(store: &mut Store, actor: Option<&Actor>, view: View) -> Result<()> {
    let Some(actor) = actor else {
        info!("no active session");
        display::render(view, &[]);
        return Ok(());
    };
    let projects = store.load_projects().await?;
    display::render(view, &visibility::visible(&projects, actor, view));
    Ok(())
}

/// Locate a project inside the subset the actor is allowed to see. Asking for
/// anything outside that subset is a user error, not a store round-trip.
fn find_visible<'a>(
    projects: &'a [Project],
    actor: &Actor,
    view: View,
    id: &str,
) -> Result<&'a Project> {
    match visibility::visible(projects, actor, view)
        .into_iter()
        .find(|p| p.id.0 == id)
    {
        Some(project) => Ok(project),
        None => bail!("project {id} is not in your view"),
    }
}

async fn decide_request(
    store: &mut Store,
    actor: Option<&Actor>,
    id: &str,
    verdict: Verdict,
    dry_run: bool,
) -> Result<()> {
    let Some(actor) = actor else {
        warn!("no active session, nothing to act on");
        return Ok(());
    };
    let projects = store.load_projects().await?;
    let project = find_visible(&projects, actor, View::SupervisorRequests, id)?;
    let patch = workflow::decide_approval(project.status, verdict)?;
    if dry_run {
        println!("Would mark {} as {}.", project.name, patch.status);
        return Ok(());
    }
    store.save_approval(&project.id, &patch).await?;
    println!(
        "Project {} {} successfully.",
        project.name,
        patch.status.as_str().to_lowercase()
    );
    Ok(())
}

async fn evaluate(
    store: &mut Store,
    actor: Option<&Actor>,
    id: &str,
    remarks: &str,
    dry_run: bool,
) -> Result<()> {
    let Some(actor) = actor else {
        warn!("no active session, nothing to act on");
        return Ok(());
    };
    let projects = store.load_projects().await?;
    let project = find_visible(&projects, actor, View::EvaluatorAssigned, id)?;
    let patch = workflow::decide_evaluation(project.evaluation_status, remarks)?;
    if dry_run {
        println!("Would mark {} as evaluated.", project.name);
        return Ok(());
    }
    store.save_evaluation(&project.id, &patch).await?;
    println!("Evaluation submitted for {}.", project.name);
    Ok(())
}

async fn delete(store: &mut Store, actor: Option<&Actor>, id: &str, dry_run: bool) -> Result<()> {
    let Some(actor) = actor else {
        warn!("no active session, nothing to act on");
        return Ok(());
    };
    // Admins may delete from the full listing, supervisors only from their
    // approved projects; the approved-only guard applies to both.
    let view = if actor.role == Role::Admin {
        View::AdminAll
    } else {
        View::SupervisorApproved
    };
    let projects = store.load_projects().await?;
    let project = find_visible(&projects, actor, view, id)?;
    workflow::decide_deletion(project.status)?;
    if dry_run {
        println!("Would delete {}.", project.name);
        return Ok(());
    }
    store.delete_project(&project.id).await?;
    println!("Project {} deleted successfully.", project.name);
    Ok(())
}

async fn profile(
    store: &mut Store,
    actor: Option<&Actor>,
    fields: &ProfileArgs,
    dry_run: bool,
) -> Result<()> {
    let Some(actor) = actor else {
        info!("no active session");
        println!("Profile data not found.");
        return Ok(());
    };
    let current = store.load_profile(&actor.identity).await?;
    if fields.is_show_only() {
        match current {
            Some(profile) => display::profile(&profile),
            None => println!("Profile data not found."),
        }
        return Ok(());
    }
    let mut profile = current
        .unwrap_or_else(|| StudentProfile::empty(&actor.identity, &actor.identity));
    if let Some(name) = &fields.full_name {
        profile.full_name = name.clone();
    }
    if let Some(number) = &fields.reg_number {
        profile.reg_number = number.clone();
    }
    if let Some(semester) = &fields.semester {
        profile.semester = semester.clone();
    }
    if let Some(phone) = &fields.phone {
        profile.phone = phone.clone();
    }
    if let Some(batch) = &fields.batch_stream {
        profile.batch_stream = batch.clone();
    }
    if dry_run {
        display::profile(&profile);
        return Ok(());
    }
    store.save_profile(&profile).await?;
    println!("Profile saved successfully.");
    Ok(())
}
