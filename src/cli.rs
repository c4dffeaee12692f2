// src/cli.rs
use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ClientConfig;
use crate::core::ServiceClient;
use crate::types::{EmailDraft, JobDetails, ProfileDraft, ProfileId, ResumeFile};
use crate::utils;
use crate::workflow::WorkflowCoordinator;

#[derive(Parser)]
#[command(name = "jobmailer")]
#[command(about = "Create a profile, generate an application email and cover letter, and send it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML config file (defaults to ./jobmailer.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the service base address
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the service is up
    Health,
    /// Create or inspect profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Run the whole workflow: profile, job details, then optionally send
    Apply(ApplyArgs),
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show a stored profile
    Show { id: String },
    /// Create a profile from a TOML file
    Create {
        file: PathBuf,
        #[arg(long)]
        resume: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Profile TOML file
    #[arg(long)]
    pub profile: PathBuf,
    /// Resume to upload with the profile (pdf, doc, docx)
    #[arg(long)]
    pub resume: Option<PathBuf>,
    /// Job details TOML file
    #[arg(long)]
    pub job: PathBuf,
    /// Where to save the cover letter
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Send the email once generated
    #[arg(long)]
    pub send: bool,
    #[arg(long)]
    pub subject: Option<String>,
    /// Send this body instead of the generated one
    #[arg(long)]
    pub body_file: Option<PathBuf>,
}

pub async fn load_profile(path: &Path, resume: Option<&Path>) -> Result<ProfileDraft> {
    let content = utils::read_file_safe(path).await?;
    let mut draft: ProfileDraft = toml::from_str(&content)
        .with_context(|| format!("Failed to parse profile: {}", path.display()))?;

    if draft.graduation_year.is_none() {
        draft.graduation_year = Some(Utc::now().year());
    }

    if let Some(resume_path) = resume {
        let file_name = resume_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid resume path: {}", resume_path.display()))?;
        let content = utils::read_file_bytes(resume_path).await?;
        draft.resume_file = Some(ResumeFile::new(file_name, content));
    }

    Ok(draft)
}

pub async fn load_job(path: &Path) -> Result<JobDetails> {
    let content = utils::read_file_safe(path).await?;
    toml::from_str(&content).with_context(|| format!("Failed to parse job details: {}", path.display()))
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    let client = ServiceClient::new(config.base_url.clone())?;
    let mut coordinator = WorkflowCoordinator::new(client);

    match cli.command {
        Command::Health => {
            let health = coordinator.check_health().await.context("Health check failed")?;
            println!(
                "✅ {} ({})",
                health.status,
                health.message.unwrap_or_default()
            );
        }

        Command::Profile(ProfileCommand::Show { id }) => {
            let profile = coordinator
                .client()
                .get_profile(&ProfileId::new(id))
                .await
                .context("Failed to load profile")?;

            println!("Profile {}", profile.id);
            println!("  Name:      {}", profile.name);
            println!("  Email:     {}", profile.primary_email.unwrap_or_default());
            println!("  Location:  {}", profile.location.unwrap_or_default());
            println!("  Languages: {}", profile.programming_languages.unwrap_or_default());
            println!("  Resume:    {}", if profile.has_resume { "yes" } else { "no" });
            if let Some(created) = profile.created_at {
                println!("  Created:   {}", created.format("%Y-%m-%d %H:%M"));
            }
        }

        Command::Profile(ProfileCommand::Create { file, resume }) => {
            let draft = load_profile(&file, resume.as_deref()).await?;
            let id = coordinator
                .submit_profile(draft)
                .await
                .context("Failed to create profile")?;
            println!("✅ Profile created: {}", id);
        }

        Command::Apply(args) => {
            let out_dir = match args.out.as_deref() {
                Some(dir) => utils::resolve_path(dir)?,
                None => config.output_dir.clone(),
            };
            run_apply(&mut coordinator, args, out_dir).await?;
        }
    }

    Ok(())
}

async fn run_apply(
    coordinator: &mut WorkflowCoordinator,
    args: ApplyArgs,
    out_dir: PathBuf,
) -> Result<()> {
    let draft = load_profile(&args.profile, args.resume.as_deref()).await?;
    let job = load_job(&args.job).await?;

    let id = coordinator
        .submit_profile(draft)
        .await
        .context("Failed to create profile")?;
    println!("✅ Profile created: {}", id);

    let artifacts = coordinator
        .submit_job_details(job)
        .await
        .context("Failed to generate email and cover letter")?
        .clone();

    for advisory in coordinator.session().advisories() {
        println!("⚠️  {}", advisory);
    }

    println!("\n{}\n", artifacts.email_text);

    if let Some(letter) = &artifacts.cover_letter {
        let path = letter.save_to(&out_dir).await?;
        println!("📄 Cover letter saved: {}", path.display());
    }

    if !args.send {
        info!("Skipping send; pass --send to deliver the email");
        return Ok(());
    }

    let body = match args.body_file {
        Some(path) => utils::read_file_safe(&path).await?,
        None => artifacts.email_text.clone(),
    };
    let confirmation = coordinator
        .send_email(EmailDraft::new(args.subject.unwrap_or_default(), body))
        .await
        .context("Failed to send email")?;
    println!("✅ {}", confirmation.summary());

    Ok(())
}
