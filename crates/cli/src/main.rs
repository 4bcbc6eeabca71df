use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use filter_engine::{
    add_to_list, count_problems, create_custom_list, derive, list_questions, rebuild_special_list,
    remove_from_list, special_list, FilterBuilder, SpecialList,
};
use question_store::{
    AppConfig, Language, Question, QuestionFilter, QuestionFlag, QuestionId, QuestionList,
    QuestionStore, Reminder, Repository,
};
use reminders::{
    count_problems_for, pick_question, InMemoryScheduler, ReminderDraft, ReminderError,
    ReminderService,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// algo - practice question tracker
#[derive(Parser)]
#[command(name = "algo")]
#[command(about = "Browse, filter and track coding-interview questions", long_about = None)]
struct Cli {
    /// Path to the store snapshot
    #[arg(short, long, default_value = "data/algo.json")]
    data_file: PathBuf,

    /// Path to the settings file
    #[arg(short, long, default_value = "data/config.json")]
    config: PathBuf,

    /// Hide solved questions regardless of the saved setting
    #[arg(long)]
    hide_solved: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import questions from a JSON array file
    Import {
        #[arg(long)]
        path: PathBuf,
    },

    /// List the questions matching a filter
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Count the questions matching a filter
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one question with its note
    Show {
        #[arg(long)]
        id: QuestionId,
    },

    /// List every known tag
    Tags,

    /// List every known company
    Companies,

    /// Toggle a flag on a question
    Mark {
        #[arg(long)]
        id: QuestionId,

        #[arg(long, value_enum)]
        flag: MarkFlag,
    },

    /// Show the Saved or Solved list
    Lists {
        #[arg(value_enum)]
        kind: ListKind,

        /// Recompute the list from the current flags
        #[arg(long)]
        rebuild: bool,
    },

    /// Manage custom lists
    Custom {
        #[command(subcommand)]
        action: CustomAction,
    },

    /// Write the note of a question
    Note {
        #[arg(long)]
        id: QuestionId,

        #[arg(long)]
        content: String,

        #[arg(long, default_value = "markdown", value_parser = parse_language)]
        language: Language,
    },

    /// List notes, most recent first
    Notes,

    /// Delete a note by id, e.g. note-42
    DeleteNote {
        #[arg(long)]
        id: String,
    },

    /// Manage reminders
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },

    /// Update saved settings
    Settings {
        #[arg(long)]
        premium: Option<bool>,

        #[arg(long)]
        hide_solved: Option<bool>,
    },
}

#[derive(Subcommand)]
enum CustomAction {
    /// Create a list from question ids
    Create {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long = "question")]
        questions: Vec<QuestionId>,
    },

    /// Append a question to a list
    Add {
        #[arg(long)]
        list: String,

        #[arg(long)]
        question: QuestionId,
    },

    /// Remove a question from a list
    Remove {
        #[arg(long)]
        list: String,

        #[arg(long)]
        question: QuestionId,
    },

    /// Show the questions of a list
    Show {
        #[arg(long)]
        list: String,
    },
}

#[derive(Subcommand)]
enum ReminderAction {
    /// Create or edit a reminder
    Save {
        /// Existing reminder id to edit
        #[arg(long)]
        id: Option<String>,

        /// RFC 3339 date, e.g. 2024-06-03T19:00:00Z
        #[arg(long)]
        date: DateTime<Utc>,

        /// Repeat day, 1 = Sunday ... 7 = Saturday (repeatable)
        #[arg(long = "day")]
        days: Vec<u8>,

        /// Attach a question from the filter to the notification
        #[arg(long)]
        send_problem: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List reminders
    List,

    /// Enable or disable a reminder
    Toggle {
        #[arg(long)]
        id: String,
    },

    /// Delete a reminder
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Pick the question a reminder would surface now
    Fire {
        #[arg(long)]
        id: String,
    },
}

/// Filter toggles. Repeating a value toggles it back off.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Tag to match (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Company to match (repeatable)
    #[arg(long = "company")]
    companies: Vec<String>,

    /// Difficulty: easy, medium, hard or a rank (repeatable)
    #[arg(long = "level")]
    levels: Vec<String>,

    /// "Top Liked" or "Top Interviewed" (repeatable)
    #[arg(long = "remark")]
    remarks: Vec<String>,

    /// Only saved questions
    #[arg(long)]
    saved: bool,

    /// Ignore every other option and match all questions
    #[arg(long)]
    clear: bool,
}

impl FilterArgs {
    fn build(&self, store: &QuestionStore) -> QuestionFilter {
        let mut builder = FilterBuilder::new(store.subscribe_vocabulary());
        for tag in &self.tags {
            builder.update_category(tag);
        }
        for company in &self.companies {
            builder.update_company(company);
        }
        for level in &self.levels {
            builder.update_level(level);
        }
        for remark in &self.remarks {
            builder.update_remark(remark);
        }
        builder.set_saved(self.saved);
        builder.build_filter(self.clear)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkFlag {
    Read,
    Solved,
    Saved,
}

impl From<MarkFlag> for QuestionFlag {
    fn from(flag: MarkFlag) -> Self {
        match flag {
            MarkFlag::Read => QuestionFlag::Read,
            MarkFlag::Solved => QuestionFlag::Solved,
            MarkFlag::Saved => QuestionFlag::Saved,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Saved,
    Solved,
}

impl From<ListKind> for SpecialList {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Saved => SpecialList::Saved,
            ListKind::Solved => SpecialList::Solved,
        }
    }
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    Language::parse(s).ok_or_else(|| format!("unknown language '{}'", s))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    let mut store = QuestionStore::load_from_file(&cli.data_file)
        .with_context(|| format!("Failed to load store from {}", cli.data_file.display()))?;
    let (questions, lists, reminders, notes) = store.counts();
    info!(
        "Store ready: {} questions, {} lists, {} reminders, {} notes",
        questions, lists, reminders, notes
    );
    let only_unsolved = cli.hide_solved || config.hides_solved_problems;

    // Dispatch to appropriate command handler
    let dirty = match cli.command {
        Commands::Import { path } => {
            let imported = store
                .import_questions(&path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            println!("{} Imported {} questions", "✓".green(), imported);
            true
        }
        Commands::List { filter } => {
            handle_list(&store, &filter.build(&store), only_unsolved);
            false
        }
        Commands::Count { filter } => {
            let filter = filter.build(&store);
            print_count(count_problems(store.questions(), Some(&filter), only_unsolved));
            false
        }
        Commands::Show { id } => {
            handle_show(&store, id)?;
            false
        }
        Commands::Tags => {
            let tags = store.vocabulary().tags();
            print_names("Tags", tags.iter().map(|tag| tag.name.as_str()));
            false
        }
        Commands::Companies => {
            let companies = store.vocabulary().companies();
            print_names("Companies", companies.iter().map(|company| company.name.as_str()));
            false
        }
        Commands::Mark { id, flag } => {
            let flag = QuestionFlag::from(flag);
            let value = store.toggle_flag(id, flag)?;
            println!("{} Question {} {}: {}", "✓".green(), id, flag.name(), value);
            true
        }
        Commands::Lists { kind, rebuild } => {
            handle_lists(&mut store, kind.into(), rebuild)?;
            true
        }
        Commands::Note {
            id,
            content,
            language,
        } => {
            store.update_note(id, &content, language, Utc::now())?;
            println!("{} Saved {} note for question {}", "✓".green(), language, id);
            true
        }
        Commands::Custom { action } => handle_custom(&mut store, action)?,
        Commands::Notes => {
            handle_notes(&store);
            false
        }
        Commands::DeleteNote { id } => {
            let removed = store.delete_note(&id);
            if removed.is_some() {
                println!("{} Deleted note {}", "✓".green(), id);
            }
            removed.is_some()
        }
        Commands::Reminder { action } => {
            handle_reminder(&mut store, &config, action, only_unsolved)?
        }
        Commands::Settings {
            premium,
            hide_solved,
        } => {
            handle_settings(&mut config, &cli.config, premium, hide_solved)?;
            false
        }
    };

    if dirty {
        store
            .save_to_file(&cli.data_file)
            .with_context(|| format!("Failed to save store to {}", cli.data_file.display()))?;
    }
    Ok(())
}

/// Handle the 'list' command
fn handle_list(store: &QuestionStore, filter: &QuestionFilter, only_unsolved: bool) {
    let chips = filter.all_filters();
    if !chips.is_empty() {
        println!("{} {}", "Filters:".bold(), chips.join(", "));
    }
    let questions = derive(store.questions(), filter, only_unsolved);
    print_questions(&questions);
    print_count(questions.len());
}

/// Handle the 'show' command
fn handle_show(store: &QuestionStore, id: QuestionId) -> Result<()> {
    let question = store
        .question(id)
        .ok_or_else(|| anyhow!("Question {} not found", id))?;

    println!("{}", format!("{}. {}", question.id, question.title).bold().blue());
    println!("{}Difficulty: {}", "• ".green(), question.difficulty_level);
    println!("{}Tags: {}", "• ".green(), join(&question.tags));
    println!("{}Companies: {}", "• ".green(), join(&question.companies));
    println!(
        "{}Read: {}  Solved: {}  Saved: {}",
        "• ".cyan(),
        question.read,
        question.solved,
        question.saved
    );
    if !question.content.is_empty() {
        println!("\n{}", question.content);
    }
    if !question.note.is_empty() {
        println!("\n{} ({})", "Note".bold(), question.note_language);
        println!("{}", question.note);
    }
    Ok(())
}

/// Handle the 'lists' command
fn handle_lists(store: &mut QuestionStore, kind: SpecialList, rebuild: bool) -> Result<()> {
    let list = if rebuild {
        rebuild_special_list(store, kind)
    } else {
        special_list(store, kind)
    };
    println!("{}", list.name.bold().blue());
    let questions = list_questions(store, &list.id)?;
    print_questions(&questions);
    print_count(questions.len());
    Ok(())
}

/// Handle the 'custom' subcommands. Returns whether the store changed.
fn handle_custom(store: &mut QuestionStore, action: CustomAction) -> Result<bool> {
    match action {
        CustomAction::Create { id, name, questions } => {
            let list = create_custom_list(store, id, &name, &questions);
            println!(
                "{} Created list {} ({}) with {} questions",
                "✓".green(),
                list.name,
                list.id,
                list.question_ids.len()
            );
            Ok(true)
        }
        CustomAction::Add { list, question } => {
            let list = add_to_list(store, &list, question)?;
            print_list_size(&list);
            Ok(true)
        }
        CustomAction::Remove { list, question } => {
            let list = remove_from_list(store, &list, question)?;
            print_list_size(&list);
            Ok(true)
        }
        CustomAction::Show { list } => {
            let questions = list_questions(store, &list)?;
            print_questions(&questions);
            print_count(questions.len());
            Ok(false)
        }
    }
}

/// Handle the 'notes' command
fn handle_notes(store: &QuestionStore) {
    let notes = store.notes_by_recency();
    if notes.is_empty() {
        println!("No notes yet.");
        return;
    }
    for note in notes {
        let title = note
            .question_id
            .and_then(|id| store.question(id))
            .map(|question| question.title)
            .unwrap_or_else(|| note.id.clone());
        println!(
            "{} [{}] {}",
            title.bold(),
            note.language,
            note.last_updated.format("%Y-%m-%d %H:%M")
        );
        let preview: String = note.content.lines().next().unwrap_or("").chars().take(80).collect();
        println!("  {}", preview);
    }
}

/// Handle the 'reminder' subcommands. Returns whether the store changed.
fn handle_reminder(
    store: &mut QuestionStore,
    config: &AppConfig,
    action: ReminderAction,
    only_unsolved: bool,
) -> Result<bool> {
    let mut service = ReminderService::new(InMemoryScheduler::new(), config.clone());

    match action {
        ReminderAction::Save {
            id,
            date,
            days,
            send_problem,
            filter,
        } => {
            let filter = filter.build(store);
            let found = count_problems_for(store, send_problem.then_some(&filter), only_unsolved);
            if found > 0 {
                println!("{} problems found", found);
            } else {
                println!(
                    "{}",
                    "No problems found. Please consider adjusting your filters.".yellow()
                );
            }

            let draft = ReminderDraft {
                id,
                date,
                repeat_days: days.into_iter().collect(),
                send_problem,
                filter,
            };
            match service.save_reminder(store, draft) {
                Ok(reminder) => {
                    println!("{} Saved reminder {}", "✓".green(), reminder.id);
                    print_scheduled(&service, &reminder.id);
                    Ok(true)
                }
                Err(ReminderError::PremiumRequired) => {
                    println!(
                        "{} Unlock premium with `algo settings --premium true`.",
                        "Reminders are a premium feature.".yellow()
                    );
                    Ok(false)
                }
                Err(err) => Err(err.into()),
            }
        }
        ReminderAction::List => {
            let reminders = service.reminders(store);
            if reminders.is_empty() {
                println!("No reminders.");
            }
            for reminder in reminders {
                print_reminder(&reminder);
            }
            Ok(false)
        }
        ReminderAction::Toggle { id } => match service.toggle_reminder(store, &id)? {
            Some(reminder) => {
                print_reminder(&reminder);
                print_scheduled(&service, &reminder.id);
                Ok(true)
            }
            None => {
                println!("Reminder {} not found", id);
                Ok(false)
            }
        },
        ReminderAction::Delete { id } => {
            let removed = service.delete_reminder(store, &id)?;
            if removed.is_some() {
                println!("{} Deleted reminder {}", "✓".green(), id);
            }
            Ok(removed.is_some())
        }
        ReminderAction::Fire { id } => {
            let reminder = store
                .reminders()
                .get(&id)
                .ok_or_else(|| anyhow!("Reminder {} not found", id))?;
            match pick_question(store, &reminder, only_unsolved, &mut rand::rng()) {
                Some(question) => print_questions(&[question]),
                None => println!("No problems match this reminder."),
            }
            Ok(false)
        }
    }
}

/// Handle the 'settings' command
fn handle_settings(
    config: &mut AppConfig,
    path: &Path,
    premium: Option<bool>,
    hide_solved: Option<bool>,
) -> Result<()> {
    if let Some(premium) = premium {
        config.is_premium = premium;
    }
    if let Some(hide_solved) = hide_solved {
        config.hides_solved_problems = hide_solved;
    }
    config
        .save(path)
        .with_context(|| format!("Failed to save settings to {}", path.display()))?;
    println!(
        "Premium: {}  Hide solved: {}",
        config.is_premium, config.hides_solved_problems
    );
    Ok(())
}

fn print_questions(questions: &[Question]) {
    for question in questions {
        let mut marks = String::new();
        if question.solved {
            marks.push_str(" ✓");
        }
        if question.saved {
            marks.push_str(" ★");
        }
        println!(
            "{:>5}. {} [{}]{}",
            question.id.to_string().green(),
            question.title,
            question.difficulty_level,
            marks
        );
    }
}

fn print_list_size(list: &QuestionList) {
    println!(
        "{} {} now has {} questions",
        "✓".green(),
        list.name,
        list.question_ids.len()
    );
}

fn print_count(count: usize) {
    println!("{}", format!("{} problems found", count).bold());
}

fn print_names<'a>(title: &str, names: impl Iterator<Item = &'a str>) {
    println!("{}", title.bold().blue());
    for name in names {
        println!("  - {}", name);
    }
}

fn print_reminder(reminder: &Reminder) {
    let status = if reminder.enabled {
        "on".green()
    } else {
        "off".red()
    };
    let scope = match &reminder.filter {
        Some(filter) if filter.is_empty() => "any problem".to_string(),
        Some(filter) => filter.all_filters().join(", "),
        None => "no problem attached".to_string(),
    };
    println!(
        "{} {} {} ({}) [{}]",
        reminder.id.bold(),
        reminder.date.format("%H:%M"),
        reminder.repeat_description(),
        scope,
        status
    );
}

fn print_scheduled(service: &ReminderService<InMemoryScheduler, AppConfig>, reminder_id: &str) {
    let pending = service.scheduler().scheduled_for(reminder_id);
    println!("  {} notification(s) scheduled", pending.len());
}

fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
