//! Command-line caller over the roster storage core.
//!
//! # Responsibility
//! - Parse arguments, select a backend, and invoke the core service.
//! - Map operation failures to exit codes and stderr messages.
//!
//! All storage semantics live in `roster_core`; this binary is glue.

use roster_core::{
    default_log_level, init_logging, KvStore, KvUserRepository, SqliteStore,
    SqliteUserRepository, User, UserRepository, UserService,
};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "\
usage: roster [--backend kv|sqlite] [--db PATH] <command>

commands:
  create <first-name> <last-name>   persist one record and print it as JSON
  list                              print every record, one JSON object per line

options:
  --backend kv|sqlite   storage backend (default: kv)
  --db PATH             database file (default: roster.redb / roster.db)

environment:
  ROSTER_LOG_DIR        absolute directory for rolling log files (optional)";

const DEFAULT_KV_PATH: &str = "roster.redb";
const DEFAULT_SQLITE_PATH: &str = "roster.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Kv,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Create {
        first_name: String,
        last_name: String,
    },
    List,
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    backend: Backend,
    db_path: Option<String>,
    command: Command,
}

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var("ROSTER_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: {err}");
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&parsed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_run module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut backend = Backend::Kv;
    let mut db_path = None;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--backend" => {
                backend = match iter.next().map(String::as_str) {
                    Some("kv") => Backend::Kv,
                    Some("sqlite") => Backend::Sqlite,
                    Some(other) => return Err(format!("unknown backend `{other}`")),
                    None => return Err("--backend requires a value".to_string()),
                };
            }
            "--db" => {
                db_path = Some(
                    iter.next()
                        .ok_or_else(|| "--db requires a value".to_string())?
                        .clone(),
                );
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option `{other}`"));
            }
            _ => rest.push(arg.clone()),
        }
    }

    let command = match rest.first().map(String::as_str) {
        Some("create") => match rest.get(1..3) {
            Some([first_name, last_name]) if rest.len() == 3 => Command::Create {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
            },
            _ => return Err("create takes exactly <first-name> <last-name>".to_string()),
        },
        Some("list") if rest.len() == 1 => Command::List,
        Some("list") => return Err("list takes no arguments".to_string()),
        Some(other) => return Err(format!("unknown command `{other}`")),
        None => return Err("no command provided".to_string()),
    };

    Ok(CliArgs {
        backend,
        db_path,
        command,
    })
}

fn run(args: &CliArgs) -> Result<(), String> {
    match args.backend {
        Backend::Kv => {
            let path = args.db_path.as_deref().unwrap_or(DEFAULT_KV_PATH);
            let store = KvStore::open(path).map_err(|err| err.to_string())?;
            run_command(
                &UserService::new(KvUserRepository::new(&store)),
                &args.command,
            )
        }
        Backend::Sqlite => {
            let path = args.db_path.as_deref().unwrap_or(DEFAULT_SQLITE_PATH);
            let store = SqliteStore::open(path).map_err(|err| err.to_string())?;
            run_command(
                &UserService::new(SqliteUserRepository::new(&store)),
                &args.command,
            )
        }
    }
}

fn run_command<R: UserRepository>(
    service: &UserService<R>,
    command: &Command,
) -> Result<(), String> {
    match command {
        Command::Create {
            first_name,
            last_name,
        } => {
            let user = service
                .create_user(first_name.clone(), last_name.clone())
                .map_err(|err| err.to_string())?;
            println!("{}", render_user(&user)?);
            Ok(())
        }
        Command::List => {
            for user in service.list_users().map_err(|err| err.to_string())? {
                println!("{}", render_user(&user)?);
            }
            Ok(())
        }
    }
}

fn render_user(user: &User) -> Result<String, String> {
    serde_json::to_string(user).map_err(|err| format!("could not render user as JSON: {err}"))
}
