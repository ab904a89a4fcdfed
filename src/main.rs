use anyhow::Context;
use clap::{Parser, Subcommand};
use eigensim::transport;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether the matrix is diagonalizable
    Check {
        /// JSON body {"matrix": [[...], ...]}, or "-" to read it from stdin
        body: String,
    },
    /// Compute the similarity transform P, D, P_inv
    Transform {
        /// JSON body {"matrix": [[...], ...]}, or "-" to read it from stdin
        body: String,
    },
    /// Compute the Jordan decomposition P, J, P_inv
    Jordan {
        /// JSON body {"matrix": [[...], ...]}, or "-" to read it from stdin
        body: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let response = match cli.command {
        Commands::Check { body } => transport::check(&read_body(body)?),
        Commands::Transform { body } => transport::transform(&read_body(body)?),
        Commands::Jordan { body } => transport::jordan(&read_body(body)?),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    if transport::is_failure(&response) {
        std::process::exit(1);
    }
    Ok(())
}

fn read_body(body: String) -> anyhow::Result<String> {
    if body == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .context("reading matrix body from stdin")?;
        Ok(buf)
    } else {
        Ok(body)
    }
}
