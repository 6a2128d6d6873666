use clap::Parser;
use directories::ProjectDirs;
use kanboard::api::{self, CardPatch, CmdResult, ConfigAction, KanbanApi, ListPatch};
use kanboard::config::BoardConfig;
use kanboard::editors::EditOutcome;
use kanboard::error::{KanbanError, Result};
use kanboard::logging::init_logging;
use kanboard::store::fs::FileStore;
use std::path::{Path, PathBuf};

mod args;
mod print;
use args::{CardCommands, CardFields, Cli, Commands, ListCommands};
use print::{print_board, print_config, print_field_errors, print_hits, print_messages};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: KanbanApi,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli)?;

    let config_path = data_dir.join("config.json");
    let config = BoardConfig::load(&data_dir).map_err(|err| {
        KanbanError::Config(format!("{} is unreadable: {}", config_path.display(), err))
    })?;
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_logging(level, &data_dir.join("logs"))?;

    // Config commands never open the board, so a bad setting can be undone.
    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&data_dir, key, value),
        Some(Commands::Show) | None => handle_show(&open_board(&data_dir, config)?),
        Some(Commands::List(command)) => {
            handle_list(&mut open_board(&data_dir, config)?, command)
        }
        Some(Commands::Card(command)) => {
            handle_card(&mut open_board(&data_dir, config)?, command)
        }
        Some(Commands::Search { query }) => {
            handle_search(&mut open_board(&data_dir, config)?, query)
        }
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(ProjectDirs::from("com", "kanboard", "kanboard")
            .ok_or_else(|| KanbanError::Config("Could not determine data dir".into()))?
            .data_dir()
            .to_path_buf()),
    }
}

fn open_board(data_dir: &Path, config: BoardConfig) -> Result<AppContext> {
    let api = KanbanApi::open(FileStore::new(data_dir), config)?;
    Ok(AppContext { api })
}

fn handle_show(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show();
    print_board(&result.lists);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, command: ListCommands) -> Result<()> {
    let result = match command {
        ListCommands::Add { title, color } => ctx.api.add_list(&title, &color)?,
        ListCommands::Edit { id, title, color } => {
            ctx.api.edit_list(id, ListPatch { title, color })?
        }
        ListCommands::Remove { id } => ctx.api.delete_list(id)?,
    };
    report(result)
}

fn handle_card(ctx: &mut AppContext, command: CardCommands) -> Result<()> {
    let result = match command {
        CardCommands::Add {
            list_id,
            title,
            fields,
        } => ctx.api.add_card(list_id, card_patch(Some(title), fields))?,
        CardCommands::Edit { id, title, fields } => {
            ctx.api.edit_card(id, card_patch(title, fields))?
        }
        CardCommands::Remove { id } => ctx.api.delete_card(id)?,
    };
    report(result)
}

fn handle_search(ctx: &mut AppContext, query: Vec<String>) -> Result<()> {
    let result = ctx.api.search(&query.join(" "));
    print_hits(&result.hits);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api::config(data_dir, action)?;
    if show_all && let Some(config) = &result.config {
        print_config(&config.entries());
    }
    print_messages(&result.messages);
    Ok(())
}

fn card_patch(title: Option<String>, fields: CardFields) -> CardPatch {
    CardPatch {
        title,
        description: fields.description,
        due: fields.due,
        tag: fields.tag,
        tag_color: fields.tag_color,
        priority: fields.priority,
    }
}

/// Print the outcome of an edit. A rejected form is an error for the shell.
fn report(result: CmdResult) -> Result<()> {
    if matches!(
        result.outcome,
        Some(EditOutcome::Invalid | EditOutcome::NoTarget)
    ) {
        print_field_errors(&result.field_errors);
        let reason = result
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "not saved".to_string());
        return Err(KanbanError::Api(reason));
    }
    print_messages(&result.messages);
    Ok(())
}
