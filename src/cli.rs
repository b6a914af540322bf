// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "repo-harvester",
    version = "0.1.0",
    about = "A CLI tool to fetch the relevant text files of a GitHub repository",
    long_about = "repo-harvester downloads the text files of a GitHub repository that matter for \
                  indexing or embedding: source code, configs, and docs, skipping dependency and \
                  build directories. Results come out as a summary table or as JSON documents."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (fetch, list)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the relevant files of a repository, contents included
    ///
    /// Example: repo-harvester fetch https://github.com/rust-lang/rust
    Fetch {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        ///
        /// This is a positional argument (required, no flag needed)
        repo_url: String,

        /// Output the fetched documents as JSON instead of a summary table
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,
    },

    /// List which files would be fetched, without downloading contents
    ///
    /// Example: repo-harvester list https://github.com/rust-lang/rust
    List {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        ///
        /// This is a positional argument (required)
        repo_url: String,

        /// Output the file paths as a JSON array instead of plain lines
        #[arg(long)]
        json: bool,
    },
}
