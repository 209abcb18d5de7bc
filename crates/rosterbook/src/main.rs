//! `roster` - CLI for rosterbook
//!
//! This binary provides the command-line interface for managing the local
//! user registry, either through one-shot commands or the interactive form.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use clap::Parser;

use rosterbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat,
};
use rosterbook::view::{submit_once, ConsolePrompt, FormView, Prompt};
use rosterbook::{init_logging, Config, Draft, Registry, SlotStore, SubmitOutcome};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Form => handle_form(&config),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_registry(config: &Config) -> anyhow::Result<Registry> {
    let store = SlotStore::open(config.database_path())?;
    Ok(Registry::open(store))
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let mut registry = open_registry(config)?;
    let draft = Draft::new(cmd.name.clone(), cmd.email.clone(), cmd.city.clone());

    match submit_once(&mut registry, draft)? {
        SubmitOutcome::Added(id) => println!("Added user {id} ({}).", cmd.name),
        SubmitOutcome::MissingFields => println!("Fill in all fields: name, email, and city."),
        SubmitOutcome::Updated(_) => unreachable!("add never starts in edit mode"),
    }
    Ok(())
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    let mut registry = open_registry(config)?;
    if !registry.begin_edit(cmd.id) {
        println!("No user with id {}.", cmd.id);
        return Ok(());
    }

    // Flags overwrite the prefilled drafts; omitted fields keep the
    // record's current values.
    let mut draft = registry.draft().clone();
    if let Some(name) = &cmd.name {
        draft.name = name.clone();
    }
    if let Some(email) = &cmd.email {
        draft.email = email.clone();
    }
    if let Some(city) = &cmd.city {
        draft.city = city.clone();
    }
    registry.set_draft(draft);

    match registry.submit()? {
        SubmitOutcome::Updated(id) => println!("Updated user {id}."),
        SubmitOutcome::MissingFields => println!("Fill in all fields: name, email, and city."),
        SubmitOutcome::Added(_) => unreachable!("edit always starts in edit mode"),
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut registry = open_registry(config)?;
    let Some(name) = registry.get(cmd.id).map(|u| u.name.clone()) else {
        println!("No user with id {}.", cmd.id);
        return Ok(());
    };

    if config.ui.confirm_delete && !cmd.yes {
        let mut prompt = ConsolePrompt;
        if !prompt.confirm(&format!("Really delete {name}?")) {
            println!("Aborted.");
            return Ok(());
        }
    }

    registry.delete(cmd.id)?;
    println!("Deleted user {} ({name}).", cmd.id);
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let registry = open_registry(config)?;
    let users = registry.users();

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(users)?);
        }
        OutputFormat::Plain => {
            for user in users {
                println!("{}\t{}\t{}\t{}", user.id, user.name, user.email, user.city);
            }
        }
        OutputFormat::Table => {
            render_table(users, &mut std::io::stdout())?;
        }
    }
    Ok(())
}

fn render_table(users: &[rosterbook::UserRecord], out: &mut impl Write) -> std::io::Result<()> {
    if users.is_empty() {
        writeln!(out, "No users registered yet.")?;
        return Ok(());
    }

    // Widths in characters, not bytes, so non-ASCII names line up
    let name_width = users
        .iter()
        .map(|u| u.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let email_width = users
        .iter()
        .map(|u| u.email.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    writeln!(
        out,
        "{:<15} {:<name_width$} {:<email_width$} CITY",
        "ID", "NAME", "EMAIL"
    )?;
    for user in users {
        writeln!(
            out,
            "{:<15} {:<name_width$} {:<email_width$} {}",
            user.id, user.name, user.email, user.city
        )?;
    }
    Ok(())
}

fn handle_form(config: &Config) -> anyhow::Result<()> {
    let registry = open_registry(config)?;
    let mut view = FormView::new(
        registry,
        ConsolePrompt,
        std::io::stdout(),
        config.ui.confirm_delete,
    );
    view.run()?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!();
                println!("[UI]");
                println!("  Confirm delete:  {}", config.ui.confirm_delete);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterbook::UserRecord;

    fn render_to_string(users: &[UserRecord]) -> String {
        let mut out = Vec::new();
        render_table(users, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_table_empty() {
        let out = render_to_string(&[]);
        assert!(out.contains("No users registered yet."));
    }

    #[test]
    fn test_render_table_has_header_and_rows() {
        let users = vec![UserRecord::new(
            1,
            "Ana".to_string(),
            "a@x.com".to_string(),
            "Rio".to_string(),
        )];
        let out = render_to_string(&users);

        assert!(out.contains("ID"));
        assert!(out.contains("NAME"));
        assert!(out.contains("EMAIL"));
        assert!(out.contains("CITY"));
        assert!(out.contains("Ana"));
    }

    #[test]
    fn test_render_table_aligns_non_ascii_names() {
        let users = vec![
            UserRecord::new(
                1,
                "José".to_string(),
                "jose@x.com".to_string(),
                "São Paulo".to_string(),
            ),
            UserRecord::new(
                2,
                "Ann".to_string(),
                "ann@x.com".to_string(),
                "Rio".to_string(),
            ),
        ];
        let out = render_to_string(&users);

        // "José" is the longest name at four characters (five bytes), and
        // the longest email is ten characters, so the city column starts
        // at character offset 15 + 1 + 4 + 1 + 10 + 1 = 32 on every line.
        let cities = ["CITY", "São Paulo", "Rio"];
        for (line, city) in out.lines().zip(cities) {
            assert!(line.ends_with(city), "unexpected line: {line}");
            assert_eq!(
                line.chars().count() - city.chars().count(),
                32,
                "misaligned line: {line}"
            );
        }
    }
}
