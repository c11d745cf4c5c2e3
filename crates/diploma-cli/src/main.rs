// Diploma CLI - issue and verify certificates from the command line

mod client;

use clap::{Parser, Subcommand};
use colored::Colorize;

use client::ApiClient;
use diploma_core::IssueCertificateRequest;

/// Diploma - certificate issuance and verification client
#[derive(Parser)]
#[command(name = "diploma")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the Diploma server
    #[arg(long, global = true, env = "DIPLOMA_SERVER", default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a certificate (re-issuing re-renders the document)
    Issue {
        /// Certificate identifier
        #[arg(long)]
        id: String,

        /// Recipient name
        #[arg(long)]
        name: String,

        /// Recipient grade
        #[arg(long)]
        grade: String,
    },
    /// Verify a certificate by identifier
    Verify {
        /// Certificate identifier
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server);

    let result = match cli.command {
        Commands::Issue { id, name, grade } => {
            handle_issue(&client, IssueCertificateRequest { id, name, grade })
        }
        Commands::Verify { id } => handle_verify(&client, &id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn handle_issue(client: &ApiClient, request: IssueCertificateRequest) -> anyhow::Result<()> {
    let response = client.issue(&request)?;

    println!("{} {}", "✓".green().bold(), response.message.green());
    println!();
    println!("  ID:       {}", request.id);
    println!("  Document: {}", response.url);
    Ok(())
}

fn handle_verify(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let response = client.verify(id)?;

    match (response.name, response.url) {
        (Some(name), Some(url)) => {
            println!("{} {}", "✓".green().bold(), response.message.green());
            println!();
            println!("  ID:       {}", id);
            println!("  Name:     {}", name);
            println!("  Document: {}", url);
            Ok(())
        }
        _ => {
            eprintln!("{} {}", "✗".red().bold(), response.message.red());
            Err(anyhow::anyhow!("no certificate issued under '{}'", id))
        }
    }
}
