//! ddexgen CLI - Generate DDEX ERN 3.8.2 messages from release bundles
//!
//! # Main Commands
//!
//! ```bash
//! ddexgen generate release.json -o release.xml   # Bundle JSON to ERN XML
//! ddexgen serve                                  # Start HTTP server (port 3000)
//! ```
//!
//! # Inspection Commands
//!
//! ```bash
//! ddexgen duration 3:45          # Show a normalized ISO 8601 duration
//! ddexgen vocabulary             # Show role, explicit and mix-version tables
//! ddexgen deals --profile full   # Show the deal catalog
//! ```

use clap::{Parser, Subcommand};
use ddexgen::ern::deals::catalog_description;
use ddexgen::ern::vocabulary::{EXPLICIT_TABLE, MIX_VERSION_TABLE, ROLE_TABLE};
use ddexgen::{generate_from_file, normalize_duration, DealProfile, ErnConfig, GenerateOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ddexgen")]
#[command(about = "Generate DDEX ERN 3.8.2 NewReleaseMessage documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a release bundle JSON file into ERN XML
    Generate {
        /// Input bundle JSON file ({ "release": ..., "tracks": [...] })
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deal profile: full or reduced (default: DDEX_DEAL_PROFILE or full)
        #[arg(short, long)]
        profile: Option<DealProfile>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Normalize a duration the way the generator does
    Duration {
        /// Raw duration ("3:45", "1:02:03", "PT3M45S")
        value: String,
    },

    /// Show the controlled-vocabulary tables
    Vocabulary,

    /// Show the deal catalog for a profile
    Deals {
        /// Deal profile: full or reduced
        #[arg(short, long)]
        profile: Option<DealProfile>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { input, output, profile } => {
            cmd_generate(&input, output.as_deref(), profile)
        }

        Commands::Serve { port } => cmd_serve(port).await,

        Commands::Duration { value } => cmd_duration(&value),

        Commands::Vocabulary => cmd_vocabulary(),

        Commands::Deals { profile } => cmd_deals(profile),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_generate(
    input: &Path,
    output: Option<&Path>,
    profile: Option<DealProfile>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let options = GenerateOptions { profile };
    let result = generate_from_file(input, &options)?;

    eprintln!("   Message ID: {}", result.message_id);
    eprintln!("   Release:    {}", result.release_reference);
    eprintln!("   Tracks:     {}", result.track_count);
    eprintln!("   Deals:      {}", result.deal_count);
    if result.has_image {
        eprintln!("   Cover image included");
    }

    write_output(&result.xml, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    ddexgen::server::start_server(port).await
}

fn cmd_duration(value: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", normalize_duration(value));
    Ok(())
}

fn cmd_vocabulary() -> Result<(), Box<dyn std::error::Error>> {
    println!("Roles (exact match, otherwise Contributor):");
    for (input, role) in ROLE_TABLE {
        println!("  {:<24} -> {}", input, role);
    }

    println!("\nExplicit flags (case-insensitive):");
    for (input, warning) in EXPLICIT_TABLE {
        println!("  {:<24} -> {}", input, warning);
    }

    println!("\nMix versions (first keyword contained wins):");
    for (keyword, version) in MIX_VERSION_TABLE {
        println!("  {:<24} -> {}", keyword, version);
    }
    Ok(())
}

fn cmd_deals(profile: Option<DealProfile>) -> Result<(), Box<dyn std::error::Error>> {
    let profile = profile.unwrap_or(ErnConfig::from_env().deal_profile);
    eprintln!("📋 Deal catalog ({:?}):\n", profile);
    println!("{}", catalog_description(profile));
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
