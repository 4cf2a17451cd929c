use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use client_core::{BriefingForm, FormError, FormPhase, FormSchema, PortalClient};
use server_api::report::{subject, ReportRenderer};
use shared::{draft::Draft, protocol::ProjectsQuery};
use tracing_subscriber::EnvFilter;

mod prompt;

use prompt::{Navigation, Prompter};

#[derive(Parser, Debug)]
#[command(about = "Client portal and website briefing from the terminal")]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through the briefing questions and submit them.
    Brief,
    /// Submit a briefing saved as JSON.
    Submit { draft: PathBuf },
    /// Exchange an access code for a session token.
    Login { access_code: String },
    /// List the projects visible to a session.
    Projects {
        #[arg(long)]
        token: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Render the operator email for a saved briefing without sending it.
    Preview {
        draft: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Brief => {
            let client = PortalClient::new(&cli.server_url)?;
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            run_briefing(&mut prompter, &client).await?;
        }
        Command::Submit { draft } => {
            let client = PortalClient::new(&cli.server_url)?;
            let mut form = BriefingForm::new(FormSchema::briefing()).with_draft(load_draft(&draft)?);
            while !form.is_last_step() {
                form.advance();
            }
            match form.submit(&client).await {
                Ok(()) => println!("Briefing submitted. We'll be in touch within 24-48 hours."),
                Err(FormError::SubmissionFailed) => {
                    anyhow::bail!("{}", form.last_error().unwrap_or_default())
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Login { access_code } => {
            let mut client = PortalClient::new(&cli.server_url)?;
            let session = client.login(&access_code).await?;
            println!("Logged in as {} ({})", session.client_name, session.client_id);
            println!("token={}", session.token);
        }
        Command::Projects { token, search, tag } => {
            let client = PortalClient::new(&cli.server_url)?.with_token(token);
            let listing = client.projects(&ProjectsQuery { search, tag }).await?;
            println!(
                "All ({}) Proposal ({}) Merchandise ({}) Internal ({}) Briefing ({})",
                listing.tag_counts.all,
                listing.tag_counts.proposal,
                listing.tag_counts.merchandise,
                listing.tag_counts.internal,
                listing.tag_counts.briefing
            );
            if listing.projects.is_empty() {
                println!("No projects found");
            }
            for project in listing.projects {
                println!(
                    "- [{}] {} ({}, {})\n  {}\n  {}",
                    project.tag, project.title, project.client, project.date, project.description,
                    project.href
                );
            }
        }
        Command::Preview { draft, out } => {
            let draft = load_draft(&draft)?;
            let html = ReportRenderer::new()?.render(&draft, Utc::now())?;
            match out {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Subject: {}", subject(&draft));
                    println!("Report written to {}", path.display());
                }
                None => {
                    println!("Subject: {}\n", subject(&draft));
                    println!("{html}");
                }
            }
        }
    }

    Ok(())
}

fn load_draft(path: &PathBuf) -> Result<Draft> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a briefing draft", path.display()))
}

async fn run_briefing<R: io::BufRead, W: io::Write>(
    prompter: &mut Prompter<R, W>,
    client: &PortalClient,
) -> Result<()> {
    let mut form = BriefingForm::new(FormSchema::briefing());
    prompter.say("Website Project Briefing (fields marked * are required)")?;
    prompter.say("Press Enter to keep an answer or '-' to clear it.")?;

    while form.phase() != FormPhase::Submitted {
        if !prompter.fill_step(&mut form)? {
            prompter.say("\nInput closed; briefing abandoned.")?;
            return Ok(());
        }
        match prompter.navigation(&form)? {
            Navigation::Next => {
                form.advance();
            }
            Navigation::Back => {
                form.retreat();
            }
            Navigation::Quit => {
                form.reset();
                prompter.say("Briefing abandoned.")?;
                return Ok(());
            }
            Navigation::Submit => match form.submit(client).await {
                Ok(()) => {
                    prompter.say("\nThank you! Your briefing has been submitted successfully.")?;
                    prompter.say("We'll review your requirements and get back to you within 24-48 hours.")?;
                }
                Err(FormError::MissingRequired(fields)) => {
                    prompter.say("Please fill in the required fields first:")?;
                    for field in fields {
                        prompter.say(format!("  - {}", field.label()))?;
                    }
                }
                Err(FormError::SubmissionFailed) => {
                    prompter.say(form.last_error().unwrap_or_default())?;
                }
                Err(err @ FormError::StepIncomplete { .. }) => {
                    prompter.say(err.to_string())?;
                }
                Err(err) => return Err(err.into()),
            },
        }
    }
    Ok(())
}
