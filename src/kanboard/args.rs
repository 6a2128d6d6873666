use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kanboard::model::Priority;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(about = "Kanban board in your terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the board and config (overrides the platform default)
    #[arg(long, global = true, env = "KANBOARD_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the board
    #[command(alias = "ls")]
    Show,

    /// Add, edit or remove lists
    #[command(subcommand)]
    List(ListCommands),

    /// Add, edit or remove cards
    #[command(subcommand)]
    Card(CardCommands),

    /// Fuzzy search lists by list title, card title and description
    #[command(alias = "s")]
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., search-threshold)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Add a list at the end of the board
    Add {
        title: String,

        #[arg(long, default_value = "")]
        color: String,
    },

    /// Change a list's title or color
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a list and all of its cards
    #[command(alias = "rm")]
    Remove { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Add a card to a list
    Add {
        /// Id of the list the card goes into
        list_id: u64,

        title: String,

        #[command(flatten)]
        fields: CardFields,
    },

    /// Change fields of a card
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: CardFields,
    },

    /// Remove a card
    #[command(alias = "rm")]
    Remove { id: u64 },
}

#[derive(Args, Debug, Default)]
pub struct CardFields {
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date, YYYY-MM-DD (defaults to today for new cards)
    #[arg(long, value_parser = parse_due)]
    pub due: Option<NaiveDate>,

    #[arg(short, long)]
    pub tag: Option<String>,

    /// Tag color, e.g. #1A2B3C (random for new cards)
    #[arg(long)]
    pub tag_color: Option<String>,

    /// low, medium or high
    #[arg(short, long)]
    pub priority: Option<Priority>,
}

fn parse_due(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid due date: {} (expected YYYY-MM-DD)", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_card_add() {
        let cli = Cli::try_parse_from([
            "kb", "card", "add", "2", "Write docs", "-d", "README", "--due", "2024-05-01", "-p",
            "high",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Card(CardCommands::Add {
                list_id,
                title,
                fields,
            })) => {
                assert_eq!(list_id, 2);
                assert_eq!(title, "Write docs");
                assert_eq!(fields.description.as_deref(), Some("README"));
                assert_eq!(fields.due, NaiveDate::from_ymd_opt(2024, 5, 1));
                assert_eq!(fields.priority, Some(Priority::High));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_due_date() {
        assert!(
            Cli::try_parse_from(["kb", "card", "edit", "1", "--due", "tomorrow"]).is_err()
        );
    }

    #[test]
    fn no_subcommand_means_show() {
        let cli = Cli::try_parse_from(["kb"]).unwrap();
        assert!(cli.command.is_none());
    }
}
