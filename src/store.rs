#![allow(clippy::cast_sign_loss)]

use crate::model::{Project, ProjectId, StudentProfile};
use crate::workflow::{ApprovalPatch, EvaluationPatch};
use eyre::{Error, WrapErr, ensure};
use sqlx::any::{AnyConnectOptions, AnyRow};
use sqlx::{AnyConnection, Connection, Row};
use std::str::FromStr;
use tracing::trace;

/// Access to the shared project store. Reads fetch whole collections and are
/// filtered client-side; writes are partial single-record updates. Concurrent
/// writers race with last-write-wins, there are no optimistic-concurrency
/// tokens.
pub struct Store {
    conn: AnyConnection,
}

impl Store {
    pub async fn new(url: &str) -> Result<Self, Error> {
        Ok(Self {
            conn: AnyConnection::connect_with(&AnyConnectOptions::from_str(url)?).await?,
        })
    }

    /// Load the full project collection, with group members stitched in.
    pub async fn load_projects(&mut self) -> Result<Vec<Project>, Error> {
        let mut projects = self.load_records().await.wrap_err("cannot load projects")?;
        let members = self
            .load_members()
            .await
            .wrap_err("cannot load group members")?;
        for project in &mut projects {
            project.group_members = members
                .iter()
                .filter_map(|(p, m)| (*p == project.id.0).then(|| m.clone()))
                .collect();
            if !project.group_members.is_empty() {
                trace!(
                    project = %project.id,
                    members = ?project.group_members,
                    "project has registered group members",
                );
            }
        }
        Ok(projects)
    }

    async fn load_records(&mut self) -> Result<Vec<Project>, Error> {
        sqlx::query(
            "SELECT id, name, supervisor, created_by, number_of_students, area, \
             degree_type, description, status, evaluator, evaluation_status, \
             evaluation_remarks FROM projects",
        )
        .map(|row: AnyRow| {
            Ok(Project {
                id: ProjectId(row.get("id")),
                name: row.get("name"),
                supervisor: row.get("supervisor"),
                created_by: row.get("created_by"),
                group_members: Vec::new(),
                number_of_students: row.get::<i32, _>("number_of_students") as u32,
                area: row.get("area"),
                degree_type: row.get("degree_type"),
                description: row.get("description"),
                status: row.get::<String, _>("status").parse()?,
                evaluator: row
                    .get::<Option<String>, _>("evaluator")
                    .filter(|e| !e.is_empty()),
                evaluation_status: row
                    .get::<Option<String>, _>("evaluation_status")
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse())
                    .transpose()?,
                evaluation_remarks: row
                    .get::<Option<String>, _>("evaluation_remarks")
                    .filter(|r| !r.is_empty()),
            })
        })
        .fetch_all(&mut self.conn)
        .await?
        .into_iter()
        .collect()
    }

    async fn load_members(&mut self) -> Result<Vec<(String, String)>, Error> {
        sqlx::query(
            "SELECT project_id, name FROM group_members ORDER BY project_id, position",
        )
        .map(|row: AnyRow| Ok((row.get("project_id"), row.get("name"))))
        .fetch_all(&mut self.conn)
        .await?
        .into_iter()
        .collect()
    }

    /// Apply an approval decision: updates the `status` field only.
    pub async fn save_approval(
        &mut self,
        project: &ProjectId,
        patch: &ApprovalPatch,
    ) -> Result<(), Error> {
        let done = sqlx::query("UPDATE projects SET status=? WHERE id=?")
            .bind(patch.status.as_str())
            .bind(&project.0)
            .execute(&mut self.conn)
            .await
            .wrap_err("cannot update project status")?;
        ensure!(done.rows_affected() == 1, "project {project} not found in store");
        Ok(())
    }

    /// Apply an evaluation: updates the two evaluation fields only.
    pub async fn save_evaluation(
        &mut self,
        project: &ProjectId,
        patch: &EvaluationPatch,
    ) -> Result<(), Error> {
        let done =
            sqlx::query("UPDATE projects SET evaluation_status=?, evaluation_remarks=? WHERE id=?")
                .bind(patch.evaluation_status.as_str())
                .bind(&patch.evaluation_remarks)
                .bind(&project.0)
                .execute(&mut self.conn)
                .await
                .wrap_err("cannot save evaluation")?;
        ensure!(done.rows_affected() == 1, "project {project} not found in store");
        Ok(())
    }

    /// Remove a project record entirely, members included. Hard delete, no
    /// tombstone.
    pub async fn delete_project(&mut self, project: &ProjectId) -> Result<(), Error> {
        let mut trans = self.conn.begin().await?;
        sqlx::query("DELETE FROM group_members WHERE project_id=?")
            .bind(&project.0)
            .execute(&mut *trans)
            .await
            .wrap_err("cannot delete group members")?;
        let done = sqlx::query("DELETE FROM projects WHERE id=?")
            .bind(&project.0)
            .execute(&mut *trans)
            .await
            .wrap_err("cannot delete project")?;
        ensure!(done.rows_affected() == 1, "project {project} not found in store");
        trans
            .commit()
            .await
            .wrap_err("error when committing transaction")?;
        Ok(())
    }

    /// Fetch one student profile by identity, if it exists.
    pub async fn load_profile(&mut self, identity: &str) -> Result<Option<StudentProfile>, Error> {
        sqlx::query(
            "SELECT identity, full_name, reg_number, semester, phone, email, batch_stream \
             FROM students WHERE identity=?",
        )
        .bind(identity)
        .map(|row: AnyRow| StudentProfile {
            identity: row.get("identity"),
            full_name: row.get("full_name"),
            reg_number: row.get("reg_number"),
            semester: row.get("semester"),
            phone: row.get("phone"),
            email: row.get("email"),
            batch_stream: row.get("batch_stream"),
        })
        .fetch_optional(&mut self.conn)
        .await
        .wrap_err("cannot load student profile")
    }

    /// Store a student profile, replacing any previous record. Written as
    /// delete-then-insert so it stays portable across the Any driver's
    /// backends.
    pub async fn save_profile(&mut self, profile: &StudentProfile) -> Result<(), Error> {
        let mut trans = self.conn.begin().await?;
        sqlx::query("DELETE FROM students WHERE identity=?")
            .bind(&profile.identity)
            .execute(&mut *trans)
            .await
            .wrap_err("cannot replace student profile")?;
        sqlx::query(
            "INSERT INTO students (identity, full_name, reg_number, semester, phone, email, \
             batch_stream) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&profile.identity)
        .bind(&profile.full_name)
        .bind(&profile.reg_number)
        .bind(&profile.semester)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.batch_stream)
        .execute(&mut *trans)
        .await
        .wrap_err("cannot save student profile")?;
        trans
            .commit()
            .await
            .wrap_err("error when committing transaction")?;
        Ok(())
    }
}
