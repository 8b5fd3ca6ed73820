use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the route_translate workspace",
    long_about = "Translates saved routing responses through the example binary,\n\
                  runs the Criterion benchmarks, and runs the CI gate."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a saved routing response and print its maneuvers
    Translate {
        /// Vendor response JSON file
        response: PathBuf,
        /// Translator config JSON file
        #[arg(long, env = "ROUTE_TRANSLATE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Run the Criterion benchmarks
    Bench,
    /// Run CI jobs
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CiJob {
    /// fmt, clippy and tests
    Check,
    /// Benchmarks only
    Bench,
    /// Check, then benchmarks
    All,
}

/// A failed task: what was running and the exit code to hand back.
struct Failure {
    task: String,
    code: u8,
}

type TaskResult = Result<(), Failure>;

fn cargo(label: &str, args: &[&str]) -> TaskResult {
    eprintln!("\n=== {label} ===");
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status().map_err(|err| Failure {
        task: format!("{label}: cannot start cargo: {err}"),
        code: 1,
    })?;
    if status.success() {
        return Ok(());
    }
    let code = status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1);
    Err(Failure {
        task: label.to_string(),
        code,
    })
}

fn translate(response: &Path, config: Option<&Path>) -> TaskResult {
    if !response.is_file() {
        return Err(Failure {
            task: format!("response file {} does not exist", response.display()),
            code: 2,
        });
    }

    let mut args = vec![
        "run".to_string(),
        "--quiet".to_string(),
        "-p".to_string(),
        "route_translate".to_string(),
        "--example".to_string(),
        "translate_route".to_string(),
        "--".to_string(),
        response.display().to_string(),
    ];
    args.extend(config.map(|path| path.display().to_string()));
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    cargo("Translate", &args)
}

fn bench() -> TaskResult {
    cargo(
        "Benchmarks",
        &["bench", "-p", "route_translate", "--bench", "performance"],
    )
}

fn check() -> TaskResult {
    cargo("Formatting", &["fmt", "--all", "--", "--check"])?;
    cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )?;
    cargo("Tests", &["test", "--workspace"])
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Translate { response, config } => translate(&response, config.as_deref()),
        Commands::Bench => bench(),
        Commands::Ci { job } => match job {
            CiJob::Check => check(),
            CiJob::Bench => bench(),
            CiJob::All => check().and_then(|()| bench()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure { task, code }) => {
            eprintln!("\nxtask failed: {task}");
            ExitCode::from(code)
        }
    }
}
