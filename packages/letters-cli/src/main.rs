//! CLI for the CUDL letter pipeline.
//!
//! Fetches a letter's TEI metadata from a landing-page URL, extracts its
//! title and transcription, derives IIIF image URLs, and runs NER over the
//! transcription (requires `OPENAI_API_KEY`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use cudl_client::{CudlClient, HttpFetch};
use letters::ner::openai::OpenAiNer;
use letters::{Letter, NamedEntityDocument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "letters")]
#[command(about = "Fetch, parse, and annotate CUDL manuscript letters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw TEI metadata for a landing-page URL
    Metadata { url: String },

    /// Print a letter's title and transcription
    Letter { url: String },

    /// Derive the IIIF image URL for a scan
    ImageUrl {
        url: String,
        /// Scan sequence number
        #[arg(long, default_value_t = 1)]
        seq: u32,
        /// Probe the image server to confirm the scan exists
        #[arg(long)]
        check: bool,
    },

    /// Extract named entities from the transcription
    Entities {
        url: String,
        /// Emit entities as JSON
        #[arg(long)]
        json: bool,
        /// Expand scribal abbreviations (&c, bare &) before annotation
        #[arg(long)]
        clean: bool,
    },

    /// Render the entity visualization to an HTML file
    Viz {
        url: String,
        /// Output path for the HTML fragment
        #[arg(long, default_value = "entities.html")]
        out: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,cudl_client=info,letters=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = CudlClient::new(HttpFetch::new());

    match cli.command {
        Commands::Metadata { url } => {
            let tei = client.get_metadata(&url).await?;
            println!("{}", tei);
        }

        Commands::Letter { url } => {
            let letter = fetch_letter(&client, &url).await?;
            println!("{}", letter.title()?.bold());
            println!();
            println!("{}", letter.transcription()?);
        }

        Commands::ImageUrl { url, seq, check } => {
            if check {
                let image_url = client.get_iiif_image_url(&url, seq).await?;
                println!("{}", image_url);
            } else {
                let page = cudl_client::PageReference::parse(&url)?;
                println!("{}", page.iiif_image_url(seq));
            }
        }

        Commands::Entities { url, json, clean } => {
            let mut doc = annotated_document(&client, &url, clean).await?;
            let entities = doc.entities().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(entities)?);
            } else if entities.is_empty() {
                println!("{}", "no entities found".dimmed());
            } else {
                for entity in entities {
                    println!("{}  {}", entity.label.cyan().bold(), entity.text);
                }
            }
        }

        Commands::Viz { url, out } => {
            let mut doc = annotated_document(&client, &url, false).await?;
            let html = doc.viz_html().await?;
            std::fs::write(&out, html).with_context(|| format!("failed to write {}", out))?;
            println!("{} {}", "wrote".green(), out);
        }
    }

    Ok(())
}

async fn fetch_letter(client: &CudlClient<HttpFetch>, url: &str) -> Result<Letter> {
    let tei = client
        .get_metadata(url)
        .await
        .context("failed to fetch TEI metadata")?;
    Ok(Letter::new(&tei))
}

async fn annotated_document(
    client: &CudlClient<HttpFetch>,
    url: &str,
    clean: bool,
) -> Result<NamedEntityDocument<OpenAiNer>> {
    let letter = fetch_letter(client, url).await?;
    let transcription = letter.transcription()?;
    let tagger = OpenAiNer::from_env().context("OpenAI tagger unavailable")?;

    Ok(if clean {
        NamedEntityDocument::with_cleaned_text(&transcription, tagger)
    } else {
        NamedEntityDocument::new(transcription, tagger)
    })
}
