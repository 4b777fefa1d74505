// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::{extract_text, ConfigManager, FsOps};
use crate::extraction::selectors::CONTACT_REGION;
use crate::extraction::{merge_profiles, wait_for_locator, ContactRegion, PageRequest};
use crate::report::format_profile;
use crate::types::ExtractionResponse;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "profile-extractor")]
#[command(about = "Extract candidate profiles from profile pages and resumes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve,
    /// Extract a profile from a saved profile page
    Page {
        html: PathBuf,
        /// Address the page was saved from
        #[arg(long)]
        source_url: Option<String>,
        /// The contact details region was opened before saving
        #[arg(long)]
        contact_visible: bool,
        /// Re-read the page until the contact region shows up, or time out
        #[arg(long)]
        wait_for_contact: bool,
        /// Resume to merge into the page result (txt, md or pdf)
        #[arg(long)]
        resume: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Extract a profile from a resume (txt, md or pdf)
    Document {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Serve => start_web_server(config).await,

        Command::Page {
            html,
            source_url,
            contact_visible,
            wait_for_contact,
            resume,
            format,
        } => {
            let contact_region = if contact_visible {
                ContactRegion::Visible
            } else if wait_for_contact {
                await_contact_region(&html, &config).await
            } else {
                ContactRegion::Hidden
            };

            let page = FsOps::read_file_safe(&html).await?;
            let request = PageRequest {
                source_url: source_url.clone(),
                contact_region,
            };
            let mut response = config.page_extractor().extract(&page, &request);

            if let Some(resume) = resume {
                response = merge_resume(response, &resume, &config).await?;
            }

            println!("{}", render(&response, format, source_url.as_deref())?);
            Ok(())
        }

        Command::Document { file, format } => {
            let text = extract_text(&file)
                .await
                .with_context(|| format!("Failed to read document {}", file.display()))?;
            let response = config.document_extractor().extract(&text);
            let source = file.display().to_string();
            println!("{}", render(&response, format, Some(&source))?);
            Ok(())
        }
    }
}

async fn await_contact_region(html: &Path, config: &ConfigManager) -> ContactRegion {
    info!("Waiting for the contact region in {}", html.display());
    let waited =
        wait_for_locator(html, CONTACT_REGION, config.wait_timeout(), config.wait_poll()).await;
    match waited {
        Ok(()) => ContactRegion::Visible,
        Err(e) => {
            warn!("{}; continuing without the contact region", e);
            ContactRegion::Hidden
        }
    }
}

async fn merge_resume(
    page: ExtractionResponse,
    resume: &Path,
    config: &ConfigManager,
) -> Result<ExtractionResponse> {
    if !page.success {
        warn!("Page extraction failed, skipping resume merge");
        return Ok(page);
    }

    let text = extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let document = config.document_extractor().extract(&text);

    let mut warnings = page.warnings;
    warnings.extend(document.warnings);
    let merged = merge_profiles(&page.data, &document.data);
    Ok(ExtractionResponse::success(merged).with_warnings(warnings))
}

pub fn render(
    response: &ExtractionResponse,
    format: OutputFormat,
    source: Option<&str>,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(response).context("Failed to serialize response")
        }
        OutputFormat::Text => {
            if let Some(error) = &response.error {
                warn!("Extraction failed: {}", error);
            }
            Ok(format_profile(&response.data, source))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateProfile;
    use chrono::Utc;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::try_parse_from([
            "profile-extractor",
            "page",
            "saved.html",
            "--source-url",
            "https://www.linkedin.com/in/jane",
            "--resume",
            "jane.pdf",
            "--format",
            "text",
        ])
        .unwrap();

        match cli.command {
            Command::Page {
                html,
                source_url,
                contact_visible,
                resume,
                format,
                ..
            } => {
                assert_eq!(html, PathBuf::from("saved.html"));
                assert_eq!(source_url.as_deref(), Some("https://www.linkedin.com/in/jane"));
                assert!(!contact_visible);
                assert_eq!(resume, Some(PathBuf::from("jane.pdf")));
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected page command"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let args = ["profile-extractor", "document", "cv.txt", "--format", "xml"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_render_json_uses_camel_case() {
        let response = ExtractionResponse::success(CandidateProfile::empty(Utc::now()));
        let json = render(&response, OutputFormat::Json, None).unwrap();
        assert!(json.contains("\"totalYearsExperience\""));
        assert!(json.contains("\"techStack\""));
    }

    #[tokio::test]
    async fn test_merge_resume_fills_page_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("resume.txt");
        tokio::fs::write(&resume, "Jane Doe\njane@example.com\nKubernetes, Python\n")
            .await
            .unwrap();

        let config = ConfigManager::load_from(None, "local").unwrap();
        let mut page = CandidateProfile::empty(Utc::now());
        page.name = "Jane A. Doe".to_string();

        let merged = merge_resume(ExtractionResponse::success(page), &resume, &config)
            .await
            .unwrap();
        assert!(merged.success);
        assert_eq!(merged.data.name, "Jane A. Doe");
        assert_eq!(merged.data.contact_info.email, "jane@example.com");
        assert_eq!(merged.data.tech_stack, vec!["python", "kubernetes"]);
    }
}
