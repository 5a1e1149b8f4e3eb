use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quill",
    about = "Quill — content-managed blog server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Write a sample post into the local posts directory
    Seed(SeedArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address, overriding QUILL_BIND_ADDR
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct SeedArgs {
    /// Target posts directory, overriding QUILL_POSTS_DIR
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_serve() {
        let cli = Cli::try_parse_from(["quill", "serve", "--bind", "0.0.0.0:3000"]).unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind, Some("0.0.0.0:3000".parse().unwrap()));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn cli_parses_seed() {
        let cli = Cli::try_parse_from(["quill", "seed", "--dir", "tmp/posts"]).unwrap();
        match cli.command {
            Command::Seed(args) => {
                assert_eq!(args.dir, Some(PathBuf::from("tmp/posts")));
            }
            _ => panic!("expected seed"),
        }
    }
}
