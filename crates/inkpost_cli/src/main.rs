//! Admin command-line front end for the article repository.
//!
//! # Responsibility
//! - Expose list/show/new/edit/rm over one repository instance.
//! - Keep every content rule in `inkpost_core`; this binary only parses
//!   arguments and formats output.

use clap::{Parser, Subcommand};
use inkpost_core::{default_log_level, init_logging, ArticleRepository, FsRecordStore};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "inkpost", version, about = "File-backed article store")]
struct Cli {
    /// Directory holding one JSON record per article.
    #[arg(long, env = "INKPOST_ARTICLES_DIR", default_value = "articles")]
    articles_dir: PathBuf,

    /// Absolute directory for rotating log files; logging stays off
    /// without it.
    #[arg(long, env = "INKPOST_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List indexed articles, oldest first.
    List,
    /// Print one article in full.
    Show { title: String },
    /// Create a new article.
    New {
        title: String,
        #[arg(long)]
        author: String,
        /// Body text; read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
    },
    /// Replace an article's content, optionally under a new title.
    Edit {
        title: String,
        /// New title; keeps the current one when omitted.
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        author: String,
        /// Body text; read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
    },
    /// Delete an article.
    Rm { title: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsRecordStore::open(&cli.articles_dir)?;
    let repo = ArticleRepository::open(store)?;

    match cli.command {
        Command::List => {
            for article in repo.snapshot() {
                println!(
                    "{}\t{}\t{}\t{}",
                    article.created.format("%Y-%m-%d"),
                    article.title,
                    article.author,
                    article.description
                );
            }
        }
        Command::Show { title } => {
            let article = repo.get(&title)?;
            println!("# {}", article.title);
            println!(
                "by {} | created {} | updated {}",
                article.author,
                article.created.to_rfc3339(),
                article.updated.to_rfc3339()
            );
            println!();
            println!("{}", article.text);
        }
        Command::New { title, author, text } => {
            let body = body_arg(text)?;
            let article = repo.create(&title, &author, body)?;
            println!("created `{}`", article.title);
        }
        Command::Edit {
            title,
            rename,
            author,
            text,
        } => {
            let body = body_arg(text)?;
            let new_title = rename.unwrap_or_else(|| title.clone());
            let article = repo.edit(&title, &new_title, &author, body)?;
            println!("updated `{}`", article.title);
        }
        Command::Rm { title } => {
            repo.delete(&title)?;
            println!("deleted `{title}`");
        }
    }

    Ok(())
}

fn body_arg(text: Option<String>) -> std::io::Result<String> {
    match text {
        Some(body) => Ok(body),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}
