// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the fetch pipeline and print the results
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Because fetching a repository means many network requests
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod error;         // src/error.rs - pipeline error types
mod filter;        // src/filter.rs - relevance filtering
mod github;        // src/github/ - GitHub fetching pipeline

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser;  // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

use github::ContentRecord;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = repository fetched
//   Err = anything went wrong (bad URL, API failure, nothing to fetch)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Fetch { repo_url, json } => {
            handle_fetch(&repo_url, json).await
        }
        Commands::List { repo_url, json } => {
            handle_list(&repo_url, json).await
        }
    }
}

// Handles the 'fetch' subcommand
// Parameters:
//   repo_url: GitHub repository URL (e.g., "https://github.com/user/repo")
//   json: whether to output JSON format
async fn handle_fetch(repo_url: &str, json: bool) -> Result<i32> {
    // Run the full pipeline: resolve, filter, download
    let documents = github::fetch_repo_documents(repo_url).await?;

    if json {
        // Serialize the documents to JSON and print
        // This is the shape downstream indexers consume
        let json_output = serde_json::to_string_pretty(&documents)?;
        println!("{}", json_output);
    } else {
        print_document_table(&documents);
    }

    Ok(0)
}

// Handles the 'list' subcommand
// Parameters:
//   repo_url: GitHub repository URL
//   json: whether to output JSON format
async fn handle_list(repo_url: &str, json: bool) -> Result<i32> {
    // Run the pipeline up to the relevance filter, skipping all downloads
    let paths = github::list_relevant_paths(repo_url).await?;

    if json {
        let json_output = serde_json::to_string_pretty(&paths)?;
        println!("{}", json_output);
    } else {
        println!();
        for path in &paths {
            println!("   {}", path);
        }
        println!("\n📊 {} file(s) would be fetched", paths.len());
    }

    Ok(0)
}

// Prints fetched documents as a human-readable table in the terminal
fn print_document_table(documents: &[ContentRecord]) {
    // Print table header
    println!();
    println!("{:<60} {:>12}", "FILE", "SIZE");
    println!("{}", "=".repeat(73));

    // Print each document with the size of its text
    for document in documents {
        let source = &document.metadata.source;

        // Truncate path if too long for display
        let source_display = if source.len() > 57 {
            format!("{}...", &source[..57])
        } else {
            source.clone()
        };

        println!(
            "{:<60} {:>12}",
            source_display,
            format_size(document.page_content.len())
        );
    }

    println!();

    // Print summary
    let total_bytes: usize = documents.iter().map(|d| d.page_content.len()).sum();

    println!("📊 Summary:");
    println!("   📄 Files: {}", documents.len());
    println!("   💾 Total text: {}", format_size(total_bytes));
}

// Formats a byte count for humans (e.g., "4.2 KB")
fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
