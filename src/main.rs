use std::env;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facetag::{config, ContactDirectory, Direction, TaggingSession};
use facetag::observations::JsonObservations;
use image::GenericImageView;
use log::info;

#[derive(Parser)]
#[command(name = "facetag")]
#[command(version, about = "Face detection and tagging assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect faces in a photo and print them in reading order
    Detect {
        /// Photo to process
        #[arg(short, long)]
        image: PathBuf,
        /// Observation sidecar produced by an external detector
        #[arg(short, long)]
        observations: PathBuf,
        /// Write numbered thumbnail PNGs into this directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Step through detected faces and bind them to contacts
    Tag {
        /// Photo to process
        #[arg(short, long)]
        image: PathBuf,
        /// Observation sidecar produced by an external detector
        #[arg(short, long)]
        observations: PathBuf,
        /// Contact directory JSON (defaults to built-in sample contacts)
        #[arg(short, long)]
        contacts: Option<PathBuf>,
    },
    /// Open config file in editor
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(None)?;

    match cli.command {
        Commands::Detect {
            image,
            observations,
            out,
        } => detect(&cfg, &image, &observations, out.as_deref()).await,
        Commands::Tag {
            image,
            observations,
            contacts,
        } => tag(&cfg, &image, &observations, contacts.as_deref()).await,
        Commands::Config => open_config(),
    }
}

async fn detect(
    cfg: &config::Config,
    image_path: &Path,
    observations_path: &Path,
    out: Option<&Path>,
) -> Result<()> {
    let image = image::open(image_path)
        .with_context(|| format!("opening {}", image_path.display()))?;
    let detector = JsonObservations::new(observations_path);

    let session =
        TaggingSession::start(&detector, &image, ContactDirectory::default(), cfg.inflate).await;

    if session.is_empty() {
        info!("no faces found");
        return Ok(());
    }
    for (index, face) in session.faces().iter().enumerate() {
        match face.capture_quality {
            Some(quality) => info!(
                "face {}: {}x{} quality {:.2}",
                index,
                face.image.width(),
                face.image.height(),
                quality
            ),
            None => info!(
                "face {}: {}x{}",
                index,
                face.image.width(),
                face.image.height()
            ),
        }
    }

    if let Some(dir) = out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        for (index, face) in session.faces().iter().enumerate() {
            let path = dir.join(format!("face-{index:02}.png"));
            face.image
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        info!(
            "{} thumbnail(s) written to {}",
            session.faces().len(),
            dir.display()
        );
    }
    Ok(())
}

async fn tag(
    cfg: &config::Config,
    image_path: &Path,
    observations_path: &Path,
    contacts_path: Option<&Path>,
) -> Result<()> {
    let image = image::open(image_path)
        .with_context(|| format!("opening {}", image_path.display()))?;
    let directory = match contacts_path.or(cfg.contacts.as_deref()) {
        Some(path) => ContactDirectory::load(path)?,
        None => ContactDirectory::sample(),
    };
    let detector = JsonObservations::new(observations_path);

    let mut session = TaggingSession::start(&detector, &image, directory, cfg.inflate).await;

    if session.is_empty() {
        info!("no faces to tag");
        return Ok(());
    }
    info!(
        "{} face(s). Type a name to assign it, 'n'/'p' to move, '/text' to search, 's <i>' to select, '.' for state, 'quit' to finish.",
        session.faces().len()
    );
    print_cursor(&session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            "" => {}
            "quit" | "q" => break,
            "n" => {
                session.advance(Direction::Next);
                print_cursor(&session);
            }
            "p" => {
                session.advance(Direction::Previous);
                print_cursor(&session);
            }
            "." => print_state(&session),
            _ if input.starts_with('/') => {
                session.update_search(&input[1..]);
                if session.filtered_contacts().is_empty() {
                    println!("  no matches");
                }
                for contact in session.filtered_contacts() {
                    println!("  {}", contact.name);
                }
            }
            _ if input.starts_with("s ") => match input[2..].trim().parse::<usize>() {
                Ok(index) => {
                    session.select(index);
                    print_cursor(&session);
                }
                Err(_) => println!("not an index: {}", &input[2..]),
            },
            name => {
                session.assign_contact(name);
                print_cursor(&session);
            }
        }
    }

    #[derive(serde::Serialize)]
    struct Assignment<'a> {
        face: usize,
        contact: Option<&'a str>,
    }
    let assignments: Vec<Assignment> = session
        .faces()
        .iter()
        .enumerate()
        .map(|(face, f)| Assignment {
            face,
            contact: f.contact.as_ref().map(|c| c.name.as_str()),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&assignments)?);
    Ok(())
}

fn print_cursor(session: &TaggingSession) {
    if let Some(face) = session.selected_face() {
        let name = face
            .contact
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("unassigned");
        println!(
            "face {}/{}: {}",
            session.selected_index() + 1,
            session.faces().len(),
            name
        );
    }
}

fn print_state(session: &TaggingSession) {
    for (index, face) in session.faces().iter().enumerate() {
        let marker = if index == session.selected_index() {
            ">"
        } else {
            " "
        };
        let name = face
            .contact
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("unassigned");
        println!("{marker} face {index}: {name}");
    }
}

fn open_config() -> Result<()> {
    let config_path = config::CONFIG_PATH.as_os_str();
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
