use crate::recommend::{run_countries, run_recommend, RecommendArgs, TableArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use uni_finder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "University Finder",
    about = "Shortlist universities into Ambitious, Target, and Safe tiers from an applicant profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a profile and print the country breakdown, gap analysis, and tiers
    Recommend(RecommendArgs),
    /// List the countries present in the reference weight table
    Countries(TableArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) tables: TableArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Countries(args) => run_countries(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn recommend_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "uni-finder-api",
            "recommend",
            "--country",
            "USA",
            "--country",
            "UK",
            "--ap",
            "4",
            "--ap",
            "5",
            "--class-12",
            "91",
            "--community-service",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Recommend(args)) => {
                assert_eq!(args.countries, vec!["USA", "UK"]);
                let profile = args.profile();
                assert_eq!(profile.ap_scores, vec![4.0, 5.0]);
                assert_eq!(profile.class_12, 91.0);
                assert!(profile.community_service);
                assert!(!profile.research_project);
                assert_eq!(profile.sat, 400.0);
                assert!(profile.validate().is_ok());
                assert!(args.json);
            }
            other => panic!("expected recommend command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["uni-finder-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
