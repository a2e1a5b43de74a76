use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use migtasks::export::{build_export_document, write_export, DEFAULT_EXPORT_FILE};
use migtasks::import::parse_tasks;
use migtasks::store::TaskList;
use migtasks::task::Field;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "migtasks")]
#[command(about = "Interactive builder for migration task JSON documents")]
#[command(version)]
struct Cli {
    /// JSON document to import on startup
    file: Option<PathBuf>,

    /// Default path written by `export` when no path is given
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // One store per session, owned by the loop; starts with one blank row
    let mut list = TaskList::new();

    if let Some(path) = &cli.file {
        import_file(&mut list, path);
    }

    render(&list);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read command")? == 0 {
            break; // EOF
        }

        if !dispatch(&mut list, &cli.output, line.trim_end_matches(['\r', '\n'])) {
            break;
        }
    }

    Ok(())
}

/// Handle one command line to completion. Returns false to end the session.
fn dispatch(list: &mut TaskList, default_output: &Path, line: &str) -> bool {
    let trimmed = line.trim_start();
    let (command, rest) = match trimmed.split_once(' ') {
        Some((c, r)) => (c, r),
        None => (trimmed, ""),
    };

    match command {
        "" => {}
        "list" | "show" => render(list),
        "add" => {
            list.add_task();
            render(list);
        }
        "remove" | "rm" => cmd_remove(list, rest),
        "set" => cmd_set(list, rest),
        "import" => cmd_import(list, rest),
        "export" => cmd_export(list, default_output, rest),
        "help" => print_help(),
        "quit" | "exit" | "q" => return false,
        other => eprintln!("{}", format!("Unknown command '{other}'. Type 'help'.").red()),
    }
    true
}

fn cmd_remove(list: &mut TaskList, args: &str) {
    let Some(index) = parse_row(list, args) else {
        return;
    };
    // The last remaining row is not removable, as in the form UI: there is
    // always at least one row to edit.
    if list.len() <= 1 {
        eprintln!("{}", "Cannot remove the last remaining task.".yellow());
        return;
    }
    list.remove_task(index);
    render(list);
}

fn cmd_set(list: &mut TaskList, args: &str) {
    let (row_token, rest) = match args.trim_start().split_once(' ') {
        Some(parts) => parts,
        None => {
            eprintln!("{}", "Usage: set <row> <field> <value>".red());
            return;
        }
    };
    let Some(index) = parse_row(list, row_token) else {
        return;
    };

    // The value is the rest of the line after the field name, verbatim;
    // omitting it clears the field.
    let (field_token, value) = match rest.split_once(' ') {
        Some((f, v)) => (f, v),
        None => (rest, ""),
    };
    let field: Field = match field_token.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return;
        }
    };

    list.update_field(index, field, value);
    render(list);
}

fn cmd_import(list: &mut TaskList, args: &str) {
    let path = args.trim();
    if path.is_empty() {
        eprintln!("{}", "Usage: import <path>".red());
        return;
    }
    import_file(list, Path::new(path));
    render(list);
}

fn cmd_export(list: &TaskList, default_output: &Path, args: &str) {
    let path = match args.trim() {
        "" => default_output.to_path_buf(),
        p => PathBuf::from(p),
    };

    if let Err(err) = build_export_document(list.tasks()) {
        let rows: Vec<String> = err.invalid.iter().map(|i| (i + 1).to_string()).collect();
        eprintln!(
            "{}",
            format!(
                "Export aborted: fill in all fields for every task first (incomplete: row {})",
                rows.join(", ")
            )
            .red()
        );
        return;
    }

    match write_export(&path, list.tasks()) {
        Ok(()) => println!(
            "{}",
            format!("Wrote {} task(s) to {}", list.len(), path.display()).green()
        ),
        Err(e) => eprintln!("{}", format!("Export failed: {e:#}").red()),
    }
}

/// Read and apply an uploaded document against the current list. Any
/// failure leaves the list exactly as it was.
fn import_file(list: &mut TaskList, path: &Path) {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", format!("Cannot read {}: {e}", path.display()).red());
            return;
        }
    };

    match parse_tasks(&contents) {
        Ok(Some(tasks)) => {
            println!(
                "{}",
                format!("Imported {} task(s) from {}", tasks.len(), path.display()).green()
            );
            list.replace_all(tasks);
        }
        Ok(None) => println!(
            "{}",
            format!("{} has no Tasks array; list unchanged.", path.display()).yellow()
        ),
        Err(e) => eprintln!("{}", format!("Failed to parse JSON file: {e}").red()),
    }
}

/// Parse a 1-based row number against the current list.
fn parse_row(list: &TaskList, token: &str) -> Option<usize> {
    let row: usize = match token.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("{}", format!("'{}' is not a row number.", token.trim()).red());
            return None;
        }
    };
    if row == 0 || row > list.len() {
        eprintln!(
            "{}",
            format!("Row {row} is out of range (1..{}).", list.len()).red()
        );
        return None;
    }
    Some(row - 1)
}

fn render(list: &TaskList) {
    if list.is_empty() {
        println!("{}", "(no tasks - 'add' to create one)".yellow());
        return;
    }
    for (i, task) in list.tasks().iter().enumerate() {
        let marker = if task.is_valid() {
            "ok".green()
        } else {
            "incomplete".yellow()
        };
        println!("{} [{marker}]", format!("Task {}", i + 1).bold());
        for field in Field::ALL {
            println!("    {:<24} {}", field.key(), task.field(field));
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list                     show all tasks");
    println!("  add                      append a blank task");
    println!("  remove <row>             remove a task (at least one must remain)");
    println!("  set <row> <field> <val>  set a field; fields: SourcePath, TargetPath,");
    println!("                           TargetList, TargetListRelativePath");
    println!("  import <path>            replace the list from a JSON document");
    println!("  export [path]            validate and write the JSON document");
    println!("  quit                     end the session");
}
