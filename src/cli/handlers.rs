use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output;
use crate::cli::theme::LabelPalette;
use crate::filter::{DateFilter, DatePreset, filter_presets};
use crate::io::config_io;
use crate::io::{JsonFileRepository, TaskRepository};
use crate::model::{SubtaskDraft, Task, TaskList, parse_labels};
use crate::store::{ApplyResult, SubtaskPatch, SubtaskStore};

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn dispatch(cli: Cli) -> CliResult {
    let json = cli.json;
    let cwd = std::env::current_dir()?;
    let config = config_io::read_config(&cwd)?;
    let store_path = config_io::resolve_store_path(cli.file.as_deref(), &config, &cwd);
    let repo = JsonFileRepository::new(store_path);

    match cli.command {
        Commands::Init => cmd_init(repo),
        Commands::Add(args) => cmd_add(repo, args, json),
        Commands::List(args) => cmd_list(repo, args, json),
        Commands::Show(args) => cmd_show(repo, args, json),
        Commands::Sub(cmd) => match cmd.command {
            SubCommands::Add(args) => cmd_sub_add(repo, args, json),
            SubCommands::Toggle(args) => cmd_sub_toggle(repo, args, json),
            SubCommands::Rm(args) => cmd_sub_rm(repo, args, json),
            SubCommands::Set(args) => cmd_sub_set(repo, args, json),
        },
        Commands::Presets(args) => cmd_presets(args, json),
    }
}

// ---------------------------------------------------------------------------
// Collection commands
// ---------------------------------------------------------------------------

fn cmd_init(mut repo: JsonFileRepository) -> CliResult {
    if repo.load_all()?.is_some() {
        println!("already initialized: {}", repo.path().display());
        return Ok(());
    }
    repo.init()?;
    println!("created {}", repo.path().display());
    Ok(())
}

fn cmd_add(mut repo: JsonFileRepository, args: AddArgs, json: bool) -> CliResult {
    let mut tasks = repo
        .load_all()?
        .ok_or("no task collection yet (run `kario init`)")?;

    let now = Local::now();
    let id = next_task_id(&tasks, now.timestamp_millis());
    let mut task = Task::new(id, args.title, now.format("%-m/%-d/%Y").to_string());
    apply_fields_to_task(&mut task, &args.fields)?;

    tasks.push(task.clone());
    repo.save_all(&tasks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("added task {}: {}", task.id, task.title);
    }
    Ok(())
}

fn cmd_list(repo: JsonFileRepository, args: ListArgs, json: bool) -> CliResult {
    let Some(tasks) = repo.load_all()? else {
        println!("no task collection yet (run `kario init`)");
        return Ok(());
    };

    let filter = match &args.due {
        None => DateFilter::default(),
        Some(raw) => {
            let preset = DatePreset::parse(raw)
                .ok_or_else(|| format!("unknown date preset '{raw}' (try `kario presets`)"))?;
            DateFilter {
                active: true,
                selection: Some(preset),
                picker_open: false,
            }
        }
    };

    let today = Local::now().date_naive();
    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| args.all || !t.completed)
        .filter(|t| filter.matches_due(t.due_date, today))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }
    let palette = LabelPalette::default();
    for task in visible {
        println!("{}", output::task_row(task, &palette));
    }
    Ok(())
}

fn cmd_show(repo: JsonFileRepository, args: ShowArgs, json: bool) -> CliResult {
    let tasks = repo
        .load_all()?
        .ok_or("no task collection yet (run `kario init`)")?;
    let task = tasks
        .get(&args.task_id)
        .ok_or_else(|| format!("task not found: {}", args.task_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        print!("{}", output::render_task_detail(task, &LabelPalette::default()));
    }
    Ok(())
}

fn cmd_presets(args: PresetsArgs, json: bool) -> CliResult {
    let matches = filter_presets(args.query.as_deref().unwrap_or(""));
    if json {
        println!("{}", serde_json::to_string(&matches)?);
        return Ok(());
    }
    for preset in matches {
        println!("{preset}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Subtask commands — all go through the detail-view store
// ---------------------------------------------------------------------------

fn cmd_sub_add(repo: JsonFileRepository, args: SubAddArgs, json: bool) -> CliResult {
    let mut store = open_session(repo, &args.task_id)?;
    stage_draft(store.draft_mut(), args.title, &args.fields)?;

    match store.add_subtask() {
        ApplyResult::Skipped => {
            println!("nothing added (empty title)");
            Ok(())
        }
        ApplyResult::Applied(_) => {
            let task = store.task().ok_or("session closed unexpectedly")?;
            if json {
                println!("{}", serde_json::to_string_pretty(task)?);
            } else if let Some(subtask) = task.subtasks.last() {
                println!("added subtask {}: {}", subtask.id, subtask.title);
            }
            Ok(())
        }
    }
}

fn cmd_sub_toggle(repo: JsonFileRepository, args: SubTargetArgs, json: bool) -> CliResult {
    let mut store = open_session(repo, &args.task_id)?;
    report_target_op(
        store.toggle_subtask(&args.subtask_id),
        &store,
        &args.subtask_id,
        "toggled",
        json,
    )
}

fn cmd_sub_rm(repo: JsonFileRepository, args: SubTargetArgs, json: bool) -> CliResult {
    let mut store = open_session(repo, &args.task_id)?;
    report_target_op(
        store.delete_subtask(&args.subtask_id),
        &store,
        &args.subtask_id,
        "deleted",
        json,
    )
}

fn cmd_sub_set(repo: JsonFileRepository, args: SubSetArgs, json: bool) -> CliResult {
    let patch = patch_from_args(&args)?;
    if patch.is_empty() {
        println!("nothing to change");
        return Ok(());
    }
    let mut store = open_session(repo, &args.task_id)?;
    report_target_op(
        store.update_subtask(&args.subtask_id, &patch),
        &store,
        &args.subtask_id,
        "updated",
        json,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the collection and open a detail-view session for one task.
fn open_session(
    repo: JsonFileRepository,
    task_id: &str,
) -> Result<SubtaskStore<'static, JsonFileRepository>, Box<dyn std::error::Error>> {
    let tasks = repo
        .load_all()?
        .ok_or("no task collection yet (run `kario init`)")?;
    let task = tasks
        .get(task_id)
        .ok_or_else(|| format!("task not found: {task_id}"))?
        .clone();
    let mut store = SubtaskStore::new(repo);
    store.open(task);
    Ok(store)
}

fn report_target_op(
    result: ApplyResult,
    store: &SubtaskStore<'_, JsonFileRepository>,
    subtask_id: &str,
    verb: &str,
    json: bool,
) -> CliResult {
    match result {
        // Missing targets are not failures; the state is already consistent.
        ApplyResult::Skipped => {
            println!("no matching subtask: {subtask_id}");
            Ok(())
        }
        ApplyResult::Applied(_) => {
            if json {
                let task = store.task().ok_or("session closed unexpectedly")?;
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                println!("{verb} subtask {subtask_id}");
            }
            Ok(())
        }
    }
}

fn stage_draft(
    draft: &mut SubtaskDraft,
    title: String,
    fields: &FieldArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    draft.title = title;
    if let Some(desc) = &fields.description {
        draft.description = desc.clone();
    }
    if let Some(date) = &fields.date {
        draft.due_date = Some(parse_date(date)?);
    }
    if let Some(time) = &fields.time {
        draft.time = time.clone();
    }
    if let Some(priority) = &fields.priority {
        draft.priority = parse_priority(priority)?;
    }
    draft.reminder = fields.reminder.clone();
    if let Some(labels) = &fields.labels {
        draft.set_labels_from_input(labels);
    }
    if let Some(repeat) = &fields.repeat {
        draft.repeat = repeat.clone();
    }
    Ok(())
}

fn apply_fields_to_task(
    task: &mut Task,
    fields: &FieldArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(desc) = &fields.description {
        task.description = desc.clone();
    }
    if let Some(date) = &fields.date {
        task.due_date = Some(parse_date(date)?);
    }
    task.time = fields.time.clone();
    if let Some(priority) = &fields.priority {
        task.priority = parse_priority(priority)?;
    }
    task.reminder = fields.reminder.clone();
    if let Some(labels) = &fields.labels {
        let labels = parse_labels(labels);
        task.labels = if labels.is_empty() { None } else { Some(labels) };
    }
    task.repeat = fields.repeat.clone();
    Ok(())
}

fn patch_from_args(args: &SubSetArgs) -> Result<SubtaskPatch, Box<dyn std::error::Error>> {
    let mut patch = SubtaskPatch {
        title: args.title.clone(),
        description: args.fields.description.clone(),
        ..Default::default()
    };
    if args.done {
        patch.completed = Some(true);
    } else if args.not_done {
        patch.completed = Some(false);
    }
    if let Some(date) = &args.fields.date {
        patch.due_date = Some(Some(parse_date(date)?));
    } else if args.clear_date {
        patch.due_date = Some(None);
    }
    if let Some(time) = &args.fields.time {
        patch.time = Some(Some(time.clone()));
    } else if args.clear_time {
        patch.time = Some(None);
    }
    if let Some(priority) = &args.fields.priority {
        patch.priority = Some(parse_priority(priority)?);
    }
    if let Some(reminder) = &args.fields.reminder {
        patch.reminder = Some(Some(reminder.clone()));
    } else if args.clear_reminder {
        patch.reminder = Some(None);
    }
    if let Some(labels) = &args.fields.labels {
        let labels = parse_labels(labels);
        patch.labels = Some(if labels.is_empty() { None } else { Some(labels) });
    } else if args.clear_labels {
        patch.labels = Some(None);
    }
    if let Some(repeat) = &args.fields.repeat {
        patch.repeat = Some(Some(repeat.clone()));
    } else if args.clear_repeat {
        patch.repeat = Some(None);
    }
    Ok(patch)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

fn parse_priority(s: &str) -> Result<crate::model::Priority, String> {
    crate::model::Priority::parse(s).ok_or_else(|| format!("invalid priority '{s}' (use 1-6)"))
}

/// Task ids come from the same millisecond-timestamp source as subtask
/// ids, bumped on collision.
fn next_task_id(tasks: &TaskList, now_millis: i64) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if tasks.get(&id).is_none() {
            return id;
        }
        candidate += 1;
    }
}
