//! Command execution against the core services.

use crate::cli::{Cli, Commands};
use crate::error::{CliError, CliResult};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use std::path::{Path, PathBuf};
use todoshare_core::db::open_db;
use todoshare_core::model::share::is_share_id;
use todoshare_core::repo::local_storage::{
    clear_all_data, is_storage_available, load_settings, load_shared_lists, save_settings,
    save_shared_lists,
};
use todoshare_core::{
    count_tasks, default_log_level, init_logging, parse_share_link, view_shared_lists,
    view_todos, KvShareRepository, KvSnapshotRepository, Priority, Settings, ShareOptions,
    SharePermission, ShareRecord, ShareRegistry, SharedList, SharedListSort, SortBy,
    SqliteKeyValueStore, Todo, TodoFilter, TodoPatch, TodoQuery, TodoStore,
};

const DB_FILE_NAME: &str = "todoshare.sqlite3";
const LOG_DIR_NAME: &str = "logs";

pub fn run(cli: Cli) -> CliResult<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    let log_dir = data_dir.join(LOG_DIR_NAME);
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| CliError::InvalidInput("data dir is not valid UTF-8".to_string()))?;
    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(level, log_dir)?;

    let conn = open_db(data_dir.join(DB_FILE_NAME))?;
    let kv = SqliteKeyValueStore::new(&conn);
    if !is_storage_available(&kv) {
        return Err(CliError::InvalidInput(format!(
            "storage under `{}` is not writable",
            data_dir.display()
        )));
    }

    let mut store = TodoStore::open(KvSnapshotRepository::new(&kv));
    let registry = ShareRegistry::new(KvShareRepository::new(&kv));
    let settings = load_settings(&kv);

    match cli.command {
        Commands::Add {
            text,
            priority,
            due,
        } => {
            let text = text.trim();
            if text.is_empty() {
                return Err(CliError::InvalidInput("task text is empty".to_string()));
            }
            let priority = match priority {
                Some(raw) => parse_priority(&raw)?,
                None => settings.default_priority,
            };
            let due_date = due.as_deref().map(parse_due_date).transpose()?;
            let id = store.add_todo(text, Some(priority), due_date);
            println!("added {id}");
        }
        Commands::List { search, sort, json } => {
            let sort_by = sort.as_deref().map_or(settings.sort_by, SortBy::parse);
            let visible: Vec<&Todo> = store
                .filtered_todos()
                .into_iter()
                .filter(|todo| settings.show_completed || !todo.completed)
                .collect();
            let query = TodoQuery::new(search).sorted_by(sort_by);
            let view = view_todos(visible.iter().copied(), &query);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }
            for todo in &view {
                println!("{}", format_todo(todo));
            }
            let all: Vec<&Todo> = store.todos().iter().collect();
            println!(
                "filter={} shown={} active={} completed={}",
                store.filter().as_str(),
                view.len(),
                count_tasks(&all, &TodoFilter::Active),
                count_tasks(&all, &TodoFilter::Completed)
            );
        }
        Commands::Toggle { id } => {
            require_todo(&store, id)?;
            store.toggle_todo(id);
        }
        Commands::Remove { id } => {
            require_todo(&store, id)?;
            store.remove_todo(id);
        }
        Commands::Edit {
            id,
            text,
            priority,
            due,
            clear_due,
        } => {
            require_todo(&store, id)?;
            let mut patch = TodoPatch::default();
            if let Some(text) = text {
                let text = text.trim();
                if text.is_empty() {
                    return Err(CliError::InvalidInput("task text is empty".to_string()));
                }
                patch = patch.text(text);
            }
            if let Some(raw) = priority {
                patch = patch.priority(parse_priority(&raw)?);
            }
            if let Some(raw) = due {
                patch = patch.due_date(Some(parse_due_date(&raw)?));
            }
            if clear_due {
                patch = patch.due_date(None);
            }
            if patch.is_empty() {
                return Err(CliError::InvalidInput("nothing to change".to_string()));
            }
            store.update_todo(id, patch);
        }
        Commands::Filter { value } => {
            store.set_filter(value.trim());
            println!("filter={}", store.filter().as_str());
        }
        Commands::Share {
            id,
            permission,
            expiry_days,
        } => {
            let options = ShareOptions::default()
                .with_permission(SharePermission::from(permission.trim()))
                .with_expiry_days(expiry_days);
            let link = registry
                .generate_share_link(store.get_todo(id), &options)
                .map_err(|err| CliError::InvalidInput(err.to_string()))?;
            if let Some(share_id) = parse_share_link(&link) {
                store.share_todo_list(id, share_id);
            }
            println!("{link}");
        }
        Commands::Open { link } => {
            let share_id = share_id_arg(&link)?;
            let record = registry
                .validate_share_link(share_id)
                .ok_or_else(|| CliError::NotFound(format!("share `{share_id}` (or expired)")))?;
            println!("{}", format_share(&record));
        }
        Commands::Revoke { share_id } => {
            let share_id = share_id_arg(&share_id)?;
            if !registry.revoke_access(share_id) {
                return Err(CliError::InvalidInput(format!("could not revoke `{share_id}`")));
            }
            println!("revoked {share_id}");
        }
        Commands::Extend { share_id, days } => {
            let share_id = share_id_arg(&share_id)?;
            let record = registry
                .extend_share_expiry(share_id, days)
                .ok_or_else(|| {
                    CliError::NotFound(format!("share `{share_id}` (or expiry out of range)"))
                })?;
            println!("{}", format_share(&record));
        }
        Commands::Permission {
            share_id,
            permission,
        } => {
            let share_id = share_id_arg(&share_id)?;
            if !registry.update_share_permissions(share_id, permission.trim()) {
                return Err(CliError::NotFound(format!("share `{share_id}`")));
            }
        }
        Commands::Shares { id } => {
            for record in registry.get_active_shares(id) {
                println!("{}", format_share(&record));
            }
        }
        Commands::Cleanup => {
            let purged = registry.cleanup_expired_shares();
            println!("purged {purged}");
        }
        Commands::Import { file, keep_list } => {
            let list = read_shared_list(&file)?;
            let count = list.todos.len();
            store.import_shared_list(list.todos.clone(), list.share_id.clone());
            if keep_list {
                let mut lists = load_shared_lists(&kv);
                lists.retain(|existing| existing.share_id != list.share_id);
                lists.push(list);
                save_shared_lists(&kv, &lists);
                store.load_shared_lists(lists);
            }
            println!("imported {count}");
        }
        Commands::Lists { search, sort } => {
            let sort = SharedListSort::parse(&sort);
            for list in view_shared_lists(store.shared_lists(), &search, sort) {
                let (preview, hidden) = list.preview();
                println!(
                    "{}  {}  by {}  {}/{} done",
                    list.share_id,
                    list.title,
                    list.shared_by,
                    list.completed_count(),
                    list.task_count()
                );
                for todo in preview {
                    println!("    {}", format_todo(todo));
                }
                if hidden > 0 {
                    println!("    +{hidden} more");
                }
            }
        }
        Commands::Settings {
            theme,
            sort_by,
            show_completed,
            default_priority,
            notifications,
        } => {
            let mut updated = settings.clone();
            if let Some(theme) = theme {
                updated.theme = theme;
            }
            if let Some(raw) = sort_by {
                updated.sort_by = SortBy::parse(&raw);
            }
            if let Some(show_completed) = show_completed {
                updated.show_completed = show_completed;
            }
            if let Some(raw) = default_priority {
                updated.default_priority = parse_priority(&raw)?;
            }
            if let Some(notifications) = notifications {
                updated.notifications = notifications;
            }
            if updated != settings && !save_settings(&kv, &updated) {
                return Err(CliError::InvalidInput("settings were not saved".to_string()));
            }
            print_settings(&updated)?;
        }
        Commands::Clear { yes } => {
            if !yes {
                return Err(CliError::InvalidInput(
                    "refusing to clear data without --yes".to_string(),
                ));
            }
            if !clear_all_data(&kv) {
                return Err(CliError::InvalidInput(
                    "some data could not be removed".to_string(),
                ));
            }
            info!("event=data_clear module=cli status=ok");
            println!("cleared");
        }
    }
    Ok(())
}

fn resolve_data_dir(data_dir: Option<PathBuf>) -> CliResult<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match data_dir {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => cwd,
    })
}

fn require_todo<R, C>(store: &TodoStore<R, C>, id: i64) -> CliResult<()>
where
    R: todoshare_core::TodoSnapshotRepository,
    C: todoshare_core::Clock,
{
    store
        .get_todo(id)
        .map(|_| ())
        .ok_or_else(|| CliError::NotFound(format!("task {id}")))
}

fn parse_priority(raw: &str) -> CliResult<Priority> {
    Priority::parse(raw).ok_or_else(|| {
        CliError::InvalidInput(format!("unknown priority `{raw}`; expected low|medium|high"))
    })
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_due_date(raw: &str) -> CliResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| CliError::InvalidInput(format!("invalid due date `{raw}`")))
}

/// Accepts either a full `todoShare://share/<id>` link or a bare id.
fn share_id_arg(raw: &str) -> CliResult<&str> {
    let raw = raw.trim();
    match parse_share_link(raw) {
        Some(share_id) => Ok(share_id),
        None if is_share_id(raw) => Ok(raw),
        None => Err(CliError::InvalidInput(format!("not a share link or id: `{raw}`"))),
    }
}

fn read_shared_list(path: &Path) -> CliResult<SharedList> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn format_todo(todo: &Todo) -> String {
    let mut line = format!(
        "[{}] {:>4}  {:<6}  {}",
        if todo.completed { "x" } else { " " },
        todo.id,
        todo.priority,
        todo.text
    );
    if let Some(due) = todo.due_date {
        line.push_str(&format!("  due {}", due.format("%Y-%m-%d")));
    }
    if todo.shared {
        line.push_str("  (shared)");
    }
    if todo.is_imported() {
        line.push_str("  (imported)");
    }
    line
}

fn format_share(record: &ShareRecord) -> String {
    format!(
        "{}  todo={}  permission={}  expires={}",
        record.link,
        record.todo_id,
        record.permission,
        record.expires_at.to_rfc3339()
    )
}

fn print_settings(settings: &Settings) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
