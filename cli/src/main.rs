mod config;
mod table;
mod tui;

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use chores_core::{
    compute_status, default_data_dir, parse_date, parse_day_duration, parse_input, AwayDate,
    AwayDateService, Chore, ChoreListing, ChoreService, FileAwayDateRepository,
    FileChoreRepository, FileLogRepository, FileTagRepository, ParsedInput, TagService,
};

pub(crate) const KNOWN_KEYS: &[&str] = &["due", "overdue", "description", "tag"];

#[derive(Parser)]
#[command(name = "chores")]
#[command(about = "Track recurring chores with away-aware scheduling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a chore (usage: add "Water plants" due:3d overdue:2d tag:garden)
    Add {
        /// Chore name followed by key:value fields
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List chores, most urgent first
    List {
        /// Split into Pending and Completed buckets
        #[arg(long)]
        group: bool,
        /// Only chores carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Record a completion
    Done {
        /// Chore name or id prefix
        chore: String,
    },
    /// Change a chore (usage: edit <chore> [new name] [key:value ...])
    Edit {
        /// Chore name or id prefix
        chore: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a chore and its history
    Rm {
        /// Chore name or id prefix
        chore: String,
    },
    /// Manage tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Manage away dates
    Away {
        #[command(subcommand)]
        command: AwayCommands,
    },
    /// Open the interactive screen
    Tui,
}

#[derive(Subcommand)]
enum TagCommands {
    Add { name: String },
    List,
    Rm { name: String },
}

#[derive(Subcommand)]
enum AwayCommands {
    /// Add an away range (usage: away add Vacation 2026-08-10 [2026-08-20])
    Add {
        name: String,
        start_date: String,
        end_date: Option<String>,
    },
    List,
    Rm { name: String },
}

/// File-backed repositories plus the services over them, all scoped to the
/// local profile's owner id.
pub(crate) struct Services {
    chore_repo: FileChoreRepository,
    log_repo: FileLogRepository,
    away_repo: FileAwayDateRepository,
    pub chores: ChoreService<FileChoreRepository, FileLogRepository>,
    pub tags: TagService<FileTagRepository>,
    pub away: AwayDateService<FileAwayDateRepository>,
    pub owner: Uuid,
}

impl Services {
    pub fn open(owner: Uuid) -> Result<Self> {
        let chore_repo = FileChoreRepository::new(None)?;
        let log_repo = FileLogRepository::new(None)?;
        let tag_repo = FileTagRepository::new(None)?;
        let away_repo = FileAwayDateRepository::new(None)?;

        Ok(Self {
            chores: ChoreService::new(chore_repo.clone(), log_repo.clone()),
            tags: TagService::new(tag_repo),
            away: AwayDateService::new(away_repo.clone()),
            chore_repo,
            log_repo,
            away_repo,
            owner,
        })
    }

    pub fn listing(
        &self,
    ) -> ChoreListing<'_, FileChoreRepository, FileLogRepository, FileAwayDateRepository> {
        ChoreListing::new(&self.chore_repo, &self.log_repo, &self.away_repo)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = default_data_dir()?;
    let config = config::Config::load_or_create(&data_dir)?;
    let services = Services::open(config.owner)?;

    match cli.command {
        Some(Commands::Add { args }) => cmd_add(&services, &args),
        Some(Commands::List { group, tag }) => cmd_list(&services, group, tag),
        Some(Commands::Done { chore }) => cmd_done(&services, &chore),
        Some(Commands::Edit { chore, args }) => cmd_edit(&services, &chore, &args),
        Some(Commands::Rm { chore }) => cmd_rm(&services, &chore),
        Some(Commands::Tag { command }) => cmd_tag(&services, command),
        Some(Commands::Away { command }) => cmd_away(&services, command),
        Some(Commands::Tui) | None => tui::run(services),
    }
}

fn cmd_add(services: &Services, args: &[String]) -> Result<()> {
    let parsed = parse_input(args, KNOWN_KEYS)?;
    if parsed.name.is_empty() {
        return Err(anyhow!("A chore name is required"));
    }

    let chore = services.chores.create(build_chore(services, parsed)?)?;

    println!("Added \"{}\" ({})", chore.name, table::short_id(&chore.id));
    println!("  Due every {} day(s)", chore.due_days);
    if let Some(grace) = chore.overdue_days {
        println!("  Overdue {} day(s) after that", grace);
    }
    Ok(())
}

fn cmd_list(services: &Services, group: bool, tag: Option<String>) -> Result<()> {
    let tag_id = match tag {
        Some(name) => {
            let tag = services
                .tags
                .find(&services.owner, &name)?
                .ok_or_else(|| anyhow!("No such tag: {}", name))?;
            Some(tag.id)
        }
        None => None,
    };

    let now = Utc::now();
    let all_tags = services.tags.list(&services.owner)?;
    let listing = services.listing();

    if group {
        let grouped = listing.build_grouped(&services.owner, tag_id.as_ref(), now)?;
        if grouped.pending.is_empty() && grouped.completed.is_empty() {
            println!("No chores to display.");
        } else {
            table::print_grouped(&grouped, &all_tags);
        }
    } else {
        let overviews = listing.build(&services.owner, tag_id.as_ref(), now)?;
        if overviews.is_empty() {
            println!("No chores to display.");
        } else {
            table::print_overviews(&overviews, &all_tags);
        }
    }
    Ok(())
}

fn cmd_done(services: &Services, needle: &str) -> Result<()> {
    let chores = services.chores.list(&services.owner)?;
    let chore = resolve_chore(&chores, needle)?;

    let now = Utc::now();
    services.chores.complete(&services.owner, &chore.id, now)?;

    println!("Completed \"{}\"", chore.name);
    let away_dates = services.away.list(&services.owner)?;
    let status = compute_status(now, Some(now), chore.due_days, chore.overdue_days, &away_dates);
    if let Some(next_due) = status.next_due {
        println!("  Next due {}", next_due.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

fn cmd_edit(services: &Services, needle: &str, args: &[String]) -> Result<()> {
    let chores = services.chores.list(&services.owner)?;
    let mut chore = resolve_chore(&chores, needle)?;

    let parsed = parse_input(args, KNOWN_KEYS)?;
    if !parsed.name.is_empty() {
        chore.name = parsed.name;
    }
    apply_fields(services, &mut chore, &parsed.fields)?;

    services.chores.update(&services.owner, &chore)?;
    println!("Updated \"{}\"", chore.name);
    Ok(())
}

fn cmd_rm(services: &Services, needle: &str) -> Result<()> {
    let chores = services.chores.list(&services.owner)?;
    let chore = resolve_chore(&chores, needle)?;

    services.chores.delete(&services.owner, &chore.id)?;
    println!("Deleted \"{}\"", chore.name);
    Ok(())
}

fn cmd_tag(services: &Services, command: TagCommands) -> Result<()> {
    match command {
        TagCommands::Add { name } => {
            let tag = services.tags.create(&services.owner, &name)?;
            println!("Added tag \"{}\"", tag.name);
        }
        TagCommands::List => {
            let tags = services.tags.list(&services.owner)?;
            if tags.is_empty() {
                println!("No tags to display.");
            } else {
                table::print_tags(&tags);
            }
        }
        TagCommands::Rm { name } => {
            services.tags.delete(&services.owner, &name)?;
            println!("Deleted tag \"{}\"", name);
        }
    }
    Ok(())
}

fn cmd_away(services: &Services, command: AwayCommands) -> Result<()> {
    match command {
        AwayCommands::Add {
            name,
            start_date,
            end_date,
        } => {
            let start = parse_date(&start_date)?;
            let end = match end_date {
                Some(raw) => parse_date(&raw)?,
                None => start,
            };
            let away = services
                .away
                .create(AwayDate::new(name, start, end, services.owner))?;
            println!("Away \"{}\" {}", away.name, table::range_label(&away));
        }
        AwayCommands::List => {
            let away_dates = services.away.list(&services.owner)?;
            if away_dates.is_empty() {
                println!("No away dates to display.");
            } else {
                table::print_away_dates(&away_dates);
            }
        }
        AwayCommands::Rm { name } => {
            services.away.delete(&services.owner, &name)?;
            println!("Deleted away date \"{}\"", name);
        }
    }
    Ok(())
}

/// Builds a chore from parsed input; the due duration is mandatory, the
/// rest optional.
pub(crate) fn build_chore(services: &Services, parsed: ParsedInput) -> Result<Chore> {
    let due = parsed
        .fields
        .get("due")
        .ok_or_else(|| anyhow!("A due duration is required (due:<days>)"))?;
    let mut chore = Chore::new(parsed.name, parse_day_duration(due)?, services.owner);
    apply_fields(services, &mut chore, &parsed.fields)?;
    Ok(chore)
}

/// Applies key:value fields onto a chore. Unknown tags are created on the
/// fly; "overdue:none" clears the grace window.
pub(crate) fn apply_fields(
    services: &Services,
    chore: &mut Chore,
    fields: &HashMap<String, String>,
) -> Result<()> {
    for (key, value) in fields {
        match key.as_str() {
            "due" => chore.due_days = parse_day_duration(value)?,
            "overdue" => {
                chore.overdue_days = if value == "none" {
                    None
                } else {
                    Some(parse_day_duration(value)?)
                };
            }
            "description" => chore.description = Some(value.clone()),
            "tag" => {
                let tag = match services.tags.find(&services.owner, value)? {
                    Some(tag) => tag,
                    None => services.tags.create(&services.owner, value)?,
                };
                if !chore.tags.contains(&tag.id) {
                    chore.tags.push(tag.id);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Picks a chore by id prefix or exact (case-insensitive) name.
pub(crate) fn resolve_chore(chores: &[Chore], needle: &str) -> Result<Chore> {
    let needle_lower = needle.to_lowercase();
    let matches: Vec<&Chore> = chores
        .iter()
        .filter(|chore| {
            chore.id.to_string().starts_with(&needle_lower)
                || chore.name.to_lowercase() == needle_lower
        })
        .collect();

    match matches.len() {
        1 => Ok(matches[0].clone()),
        0 => Err(anyhow!("No chore matches \"{}\"", needle)),
        _ => Err(anyhow!(
            "\"{}\" is ambiguous ({} chores match)",
            needle,
            matches.len()
        )),
    }
}
