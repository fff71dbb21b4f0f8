//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::domain::District;

/// Rental listings catalog of Tashkent.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Command to run, an interactive shell by default.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command of the [`Args`].
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Searches listings by a search page URL or its query string, like
    /// `/search?district=chilanzar&rooms=2&sort=price-low`.
    Search {
        /// Search page URL or its query string.
        #[arg(default_value = "")]
        url: String,
    },

    /// Runs an interactive shell reading events from the standard input.
    Shell,

    /// Prints featured and the most recently listed properties.
    Home,

    /// Prints an overview of the districts.
    Districts,

    /// Prints the properties of a single district, like `mirzo-ulugbek`.
    District {
        /// Name of the district.
        name: District,
    },
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::domain::District;

    use super::{Args, Command};

    #[test]
    fn parses_search_command() {
        let args = Args::try_parse_from([
            "housing",
            "--config",
            "local.toml",
            "search",
            "/search?district=sergeli",
        ])
        .unwrap();

        assert_eq!(args.config, "local.toml");
        assert!(matches!(
            args.command,
            Some(Command::Search { url }) if url == "/search?district=sergeli",
        ));
    }

    #[test]
    fn parses_district_command() {
        let args =
            Args::try_parse_from(["housing", "district", "mirzo-ulugbek"])
                .unwrap();

        assert!(matches!(
            args.command,
            Some(Command::District {
                name: District::MirzoUlugbek,
            }),
        ));
        assert!(
            Args::try_parse_from(["housing", "district", "atlantis"]).is_err()
        );
    }

    #[test]
    fn defaults_to_shell() {
        let args = Args::try_parse_from(["housing"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(args.command.is_none());
    }
}
