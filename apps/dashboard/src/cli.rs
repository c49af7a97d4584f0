use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::StudentApi;
use shared::{
    domain::{StudentDraft, StudentId, StudentPatch},
    validation::{validate_draft, validate_patch},
};

use crate::ui::render::{render_student, render_table};

#[derive(Parser, Debug)]
#[command(name = "student-dashboard", about = "Manage student records over the student API")]
pub struct Args {
    /// Config file (defaults to ./dashboard.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every student.
    List,
    /// Print one student fetched by id.
    Show { id: i64 },
    /// Create a student.
    Create(CreateArgs),
    /// Update the given fields of a student.
    Update(UpdateArgs),
    /// Delete a student.
    Delete { id: i64 },
}

#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub nic: String,
    #[arg(long)]
    pub course: String,
    #[arg(long)]
    pub contact: String,
}

#[derive(ClapArgs, Debug)]
pub struct UpdateArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub nic: Option<String>,
    #[arg(long)]
    pub course: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
}

impl From<CreateArgs> for StudentDraft {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            nic: args.nic,
            course: args.course,
            contact: args.contact,
        }
    }
}

impl UpdateArgs {
    fn patch(&self) -> StudentPatch {
        StudentPatch {
            name: self.name.clone(),
            nic: self.nic.clone(),
            course: self.course.clone(),
            contact: self.contact.clone(),
        }
    }
}

/// Runs a one-shot command and returns the text to print.
pub async fn run_command(api: &impl StudentApi, command: Command) -> Result<String> {
    match command {
        Command::List => Ok(render_table(&api.list().await?)),
        Command::Show { id } => Ok(render_student(&api.get_by_id(StudentId(id)).await?)),
        Command::Create(args) => {
            let draft = StudentDraft::from(args);
            validate_draft(&draft)?;
            let response = api.create(&draft).await?;
            Ok(format!("created student ({})", response.status))
        }
        Command::Update(args) => {
            let patch = args.patch();
            if patch.is_empty() {
                bail!("nothing to update; pass at least one of --name, --nic, --course, --contact");
            }
            validate_patch(&patch)?;
            let response = api.update(StudentId(args.id), &patch).await?;
            Ok(format!("updated student #{} ({})", args.id, response.status))
        }
        Command::Delete { id } => {
            let response = api.delete(StudentId(id)).await?;
            Ok(format!("deleted student #{id} ({})", response.status))
        }
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
