use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "roza", version, author, about = "Ramadan 2026 companion for Bangladesh: sehri, iftar, prayers and more")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick your division and district interactively
    Setup,
    /// Show sehri, iftar and prayer times for a Ramadan day
    Times {
        /// Ramadan day (1-30); defaults to today
        #[arg(long)]
        day: Option<u32>,
        /// District name; defaults to the saved district
        #[arg(long)]
        district: Option<String>,
    },
    /// Print the full 30-day sehri/iftar timetable
    Calendar {
        #[arg(long)]
        district: Option<String>,
    },
    /// Show the live status: iftar countdown, adhan or next prayer
    Status,
    /// District selection
    District {
        #[command(subcommand)]
        action: DistrictCommands,
    },
    /// Record a donation
    Donate {
        #[arg(long)]
        name: String,
        /// Whole taka, 10 to 10000 (ASCII or Bengali digits)
        #[arg(long)]
        amount: String,
        /// masjid, orphan, iftar, winter, quran or sadaqah
        #[arg(long)]
        cause: Option<String>,
        /// bkash, nagad or rocket
        #[arg(long)]
        payment: Option<String>,
        /// Donor photo
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List recorded donations, most recent first
    Donations,
    /// Render or export a text card
    Card {
        #[command(subcommand)]
        kind: CardCommands,
    },
    /// Today's inspirational quote
    Quote,
    /// Ask the assistant a single question
    Ask {
        question: String,
    },
    /// Interactive chat with the assistant
    Chat {
        /// Message the admin desk instead of the AI assistant
        #[arg(long)]
        admin: bool,
    },
    /// Show or change the colour theme
    Theme {
        /// emerald, golden or indigo
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DistrictCommands {
    /// List all divisions and their districts
    List,
    /// Save a district by name
    Set {
        name: String,
    },
    /// Find the district for coordinates and save it
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Thank-you card for a recorded donation
    Donation {
        /// Position in `roza donations` (1 = most recent)
        index: usize,
        /// Write the card into this directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the share text
        #[arg(long)]
        share: bool,
    },
    /// Sehri and iftar card for a Ramadan day
    Day {
        day: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["roza"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_times_flags() {
        let cli = Cli::try_parse_from(["roza", "times", "--day", "15", "--district", "রাজশাহী"]).unwrap();
        match cli.command {
            Some(Commands::Times { day, district }) => {
                assert_eq!(day, Some(15));
                assert_eq!(district.as_deref(), Some("রাজশাহী"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_card_donation() {
        let cli = Cli::try_parse_from(["roza", "card", "donation", "2", "--share"]).unwrap();
        match cli.command {
            Some(Commands::Card { kind: CardCommands::Donation { index, out, share } }) => {
                assert_eq!(index, 2);
                assert!(out.is_none());
                assert!(share);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn locate_accepts_coordinates() {
        let cli = Cli::try_parse_from(["roza", "district", "locate", "--lat", "24.37", "--lon", "88.6"]).unwrap();
        match cli.command {
            Some(Commands::District { action: DistrictCommands::Locate { lat, lon } }) => {
                assert!((lat - 24.37).abs() < 1e-9);
                assert!((lon - 88.6).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
