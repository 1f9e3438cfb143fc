use anyhow::{bail, Result};

use crate::config;
use crate::model::form::{parse_due_date, TaskForm};
use crate::providers::trello::TrelloClient;
use crate::providers::Fetched;

fn client() -> Result<TrelloClient> {
    let config = config::load_config()?;
    TrelloClient::new(config.trello)
}

fn report<T>(fetched: &Fetched<T>) {
    if let Some(diagnostic) = &fetched.diagnostic {
        eprintln!("warning: {diagnostic}");
    }
}

/// Parse CLI args for `taskcard add` and create the card in the default list.
pub async fn handle_add(args: &[String]) -> Result<()> {
    let form = parse_add_args(args)?;
    if let Err(errors) = form.validate() {
        let lines: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
        bail!("Invalid task:\n{}", lines.join("\n"));
    }

    let client = client()?;
    match client.create_task(&form).await {
        Ok(task) => {
            println!("Task created successfully: {}", task.name);
            if task.is_synced() {
                let link = task.url.as_deref().or(task.card_id.as_deref());
                println!("  {}", link.unwrap_or_default());
            } else {
                println!("  Trello did not return the new card; see `taskcard list`");
            }
            let notes = local_fields(&form);
            if !notes.is_empty() {
                println!("Kept locally, not sent to Trello:");
                for note in notes {
                    println!("  {note}");
                }
            }
            Ok(())
        }
        Err(e) => bail!("An error occurred: {e}"),
    }
}

pub async fn handle_list(args: &[String]) -> Result<()> {
    let client = client()?;
    let fetched = match args.first() {
        Some(list_id) => client.list_cards_for_list(list_id).await,
        None => client.tasks_for_display().await,
    };
    report(&fetched);

    if fetched.items.is_empty() && !fetched.is_degraded() {
        println!("No open cards.");
    }
    for task in &fetched.items {
        println!("{}  {}", task.id.as_deref().unwrap_or("-"), task.name);
        if let Some(url) = &task.url {
            println!("    {url}");
        }
    }
    Ok(())
}

pub async fn handle_boards() -> Result<()> {
    let fetched = client()?.list_boards_for_current_user().await;
    report(&fetched);
    for board in &fetched.items {
        println!("{}  {}", board.id, board.name);
    }
    Ok(())
}

pub async fn handle_lists(args: &[String]) -> Result<()> {
    let client = client()?;
    let fetched = match args.first() {
        Some(board_id) => client.list_lists_for_board(board_id).await,
        None => client.list_lists_for_configured_board().await,
    };
    report(&fetched);
    for list in &fetched.items {
        println!("{}  {}", list.id, list.name);
    }
    Ok(())
}

pub async fn handle_auth() -> Result<()> {
    let client = client()?;
    if !client.is_service_ready() {
        bail!("Trello is not configured. Set key and token in ~/.taskcard/config.toml or TRELLO_API_KEY / TRELLO_TOKEN");
    }
    if !client.check_authentication().await {
        bail!("Trello authentication failed. Check key and token.");
    }
    println!("Trello authentication is valid.");
    if !client.config().has_default_list_id() {
        println!("Note: no default list configured; `taskcard add` will not work.");
    }
    Ok(())
}

/// Form fields that cards have no place for.
fn local_fields(form: &TaskForm) -> Vec<String> {
    let mut notes = Vec::new();
    if form.has_category() {
        notes.push(format!("category: {}", form.category.as_deref().unwrap_or_default()));
    }
    if form.has_assignee() {
        notes.push(format!("assignee: {}", form.assignee.as_deref().unwrap_or_default()));
    }
    if form.has_due_date() {
        let due = form.due_date.map(|d| d.to_string()).unwrap_or_default();
        notes.push(format!("due: {due}"));
    }
    if form.is_jira() {
        notes.push(format!("platform: {}", form.platform));
    }
    notes
}

/// Parse `taskcard add` arguments into a task form.
///
/// Supported forms:
///   taskcard add "My task title"
///   taskcard add My task title
///   taskcard add "My task" -d "The description" -p High
///   taskcard add "My task" --due 2024-06-30 --platform trello
pub fn parse_add_args(args: &[String]) -> Result<TaskForm> {
    if args.is_empty() {
        bail!("Usage: taskcard add <title> [-d <description>] [-p <priority>]\n\nExamples:\n  taskcard add \"Fix the login bug\"\n  taskcard add \"Fix the login bug\" -d \"Users can't log in with SSO\" -p High");
    }

    let mut title_parts: Vec<&str> = Vec::new();
    let mut flags: Vec<(&str, &String)> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        if !flag.starts_with('-') || flag == "-" {
            title_parts.push(flag);
            continue;
        }
        let Some(value) = iter.next() else {
            bail!("Missing value for {flag} flag");
        };
        flags.push((flag, value));
    }

    let mut form = TaskForm::new(title_parts.join(" "));
    if form.title.trim().is_empty() {
        bail!("Task title cannot be empty");
    }

    for (flag, value) in flags {
        match flag {
            "-d" | "--desc" | "--description" => form.description = Some(value.clone()),
            "-p" | "--priority" => form.priority = Some(value.clone()),
            "-c" | "--category" => form.category = Some(value.clone()),
            "-a" | "--assignee" => form.assignee = Some(value.clone()),
            "--due" => form.due_date = Some(parse_due_date(value)?),
            "--platform" => form.platform = value.parse()?,
            _ => bail!("Unknown flag {flag}"),
        }
    }

    Ok(form)
}

pub fn print_help() {
    println!("taskcard: create and browse Trello cards as tasks\n");
    println!("USAGE:");
    println!("  taskcard                    Launch the TUI dashboard");
    println!("  taskcard add <title>        Create a task as a card in the default list");
    println!("  taskcard list [list-id]     Show open cards (default list if omitted)");
    println!("  taskcard boards             Show your open boards");
    println!("  taskcard lists [board-id]   Show open lists (configured board if omitted)");
    println!("  taskcard auth               Check the configured key and token");
    println!();
    println!("ADD OPTIONS:");
    println!("  -d, --desc <text>           Set a description for the task");
    println!("  -p, --priority <text>       Priority, appended to the description (default Medium)");
    println!("  -c, --category <text>       Category");
    println!("  -a, --assignee <name>       Assignee");
    println!("      --due <YYYY-MM-DD>      Due date");
    println!("      --platform <name>       jira or trello");
    println!();
    println!("CONFIG:");
    println!("  ~/.taskcard/config.toml, [trello] section; TRELLO_* variables override it.");
    println!("  Logs are written to ~/.taskcard/taskcard.log (RUST_LOG sets the level).");
}
