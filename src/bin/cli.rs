//! Save-the-date CLI
//!
//! Command-line interface for a running save-the-date server:
//! - Show the countdown
//! - Sign and read the guest book
//! - Click the excitement button
//! - Download the calendar file

use clap::{Parser, Subcommand};
use save_the_date::guestbook::read_photo_data_url;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "save-the-date-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Talk to the Ben & Emily save-the-date page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show time remaining until the ceremony
    Countdown,

    /// Sign the guest book
    Sign {
        /// Your name
        name: String,
        /// Message for the couple
        message: String,
        /// Selfie to attach
        #[arg(short, long)]
        photo: Option<PathBuf>,
    },

    /// List guest book entries, newest first
    Entries,

    /// Press the "Can't Wait!" button
    Excite,

    /// Download the calendar file
    Calendar {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Countdown => {
            let response = client
                .get(format!("{}/api/v1/countdown", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let data: serde_json::Value = resp.json().await?;

                    if data["has_passed"].as_bool().unwrap_or(false) {
                        println!("The big day is here!");
                    } else {
                        println!(
                            "{} days, {:02}h {:02}m {:02}s",
                            data["days"].as_i64().unwrap_or(0),
                            data["hours"].as_u64().unwrap_or(0),
                            data["minutes"].as_u64().unwrap_or(0),
                            data["seconds"].as_u64().unwrap_or(0)
                        );
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to the save-the-date server at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin save-the-date");
                    std::process::exit(1);
                }
            }
        }

        Commands::Sign {
            name,
            message,
            photo,
        } => {
            let photo = read_photo_data_url(photo.as_deref()).await?;

            let body = serde_json::json!({
                "name": name,
                "message": message,
                "photo": photo,
            });

            let response = client
                .post(format!("{}/api/v1/guestbook", cli.api_url))
                .json(&body)
                .send()
                .await?;

            match response.status() {
                reqwest::StatusCode::CREATED => {
                    let data: serde_json::Value = response.json().await?;
                    println!(
                        "Signed as {} at {}",
                        data["entry"]["name"].as_str().unwrap_or("-"),
                        data["entry"]["timestamp"].as_str().unwrap_or("-")
                    );
                }
                reqwest::StatusCode::NO_CONTENT => {
                    eprintln!("Name and message are both required");
                    std::process::exit(1);
                }
                status => {
                    let text = response.text().await.unwrap_or_default();
                    eprintln!("Failed ({}): {}", status, text);
                    std::process::exit(1);
                }
            }
        }

        Commands::Entries => {
            let response = client
                .get(format!("{}/api/v1/guestbook", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Failed to fetch guest book: {}", response.status());
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;
            let entries = data["entries"].as_array().cloned().unwrap_or_default();

            if entries.is_empty() {
                println!("No one has signed the guest book yet.");
                println!();
                println!("Be the first:");
                println!("  save-the-date-cli sign \"Your Name\" \"Congratulations!\"");
            } else {
                println!("{:<20} {:<26} {:<6} {}", "Name", "Signed", "Photo", "Message");
                println!("{}", "-".repeat(80));

                for entry in entries {
                    println!(
                        "{:<20} {:<26} {:<6} {}",
                        entry["name"].as_str().unwrap_or("-"),
                        entry["timestamp"].as_str().unwrap_or("-"),
                        if entry["photo"].is_string() { "yes" } else { "" },
                        entry["message"].as_str().unwrap_or("-")
                    );
                }
            }
        }

        Commands::Excite => {
            let response = client
                .post(format!("{}/api/v1/excitement", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Failed ({})", response.status());
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;
            println!(
                "🎉 {} people can't wait!",
                data["count"].as_u64().unwrap_or(0)
            );
        }

        Commands::Calendar { output } => {
            let response = client
                .get(format!("{}/calendar.ics", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Calendar download failed: {}", response.status());
                std::process::exit(1);
            }

            let ics = response.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &ics)?;
                    println!("Calendar saved to {:?}", path);
                }
                None => {
                    print!("{}", ics);
                }
            }
        }

        Commands::Config { output } => {
            let config = save_the_date::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}
