use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use papergen::cli::Shell;
use papergen::config::Config;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api <url>] [--state-dir <path>] [--downloads <path>] [--user <u> --password <p>] [--generate <subject-id> [--marks <n>]] [--repl]\n\nFlags:\n  --api <url>              Backend base URL (default: PAPERGEN_API_URL or http://localhost:8080)\n  --state-dir <path>       Directory for the persisted session record (default: PAPERGEN_STATE_DIR or state)\n  --downloads <path>       Directory generated PDFs are saved into (default: PAPERGEN_DOWNLOAD_DIR or downloads)\n  --user <u>               Username for auto-login before any other action\n  --password <p>           Password for auto-login\n  --generate <subject-id>  One-shot: generate a paper for this subject and exit (unless --repl)\n  --marks <n>              Total marks for --generate (default: 50)\n  --repl                   Start the interactive interpreter\n  -h, --help               Show this help\n\nInteractive commands:\n  login, register, logout, whoami, subjects, generate, help, quit\n\nExamples:\n  {program} --repl\n  {program} --user asha --password secret --generate 3 --marks 80"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let mut args: Vec<String> = std::env::args().collect();
    let program = args.remove(0);

    let mut api: Option<String> = None;
    let mut state_dir: Option<String> = None;
    let mut downloads: Option<String> = None;
    let mut user: Option<String> = None;
    let mut password: Option<String> = None;
    let mut generate: Option<i64> = None;
    let mut marks: Option<i64> = None;
    let mut repl: bool = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--api" => {
                if i + 1 >= args.len() { eprintln!("--api requires a value"); print_usage(&program); std::process::exit(2); }
                api = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--state-dir" => {
                if i + 1 >= args.len() { eprintln!("--state-dir requires a value"); print_usage(&program); std::process::exit(2); }
                state_dir = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--downloads" => {
                if i + 1 >= args.len() { eprintln!("--downloads requires a value"); print_usage(&program); std::process::exit(2); }
                downloads = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--user" => {
                if i + 1 >= args.len() { eprintln!("--user requires a value"); print_usage(&program); std::process::exit(2); }
                user = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--password" => {
                if i + 1 >= args.len() { eprintln!("--password requires a value"); print_usage(&program); std::process::exit(2); }
                password = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--generate" => {
                if i + 1 >= args.len() { eprintln!("--generate requires a subject id"); print_usage(&program); std::process::exit(2); }
                match args[i + 1].parse::<i64>() {
                    Ok(v) => generate = Some(v),
                    Err(_) => { eprintln!("--generate expects a numeric subject id"); std::process::exit(2); }
                }
                i += 2; continue;
            }
            "--marks" => {
                if i + 1 >= args.len() { eprintln!("--marks requires a value"); print_usage(&program); std::process::exit(2); }
                match args[i + 1].parse::<i64>() {
                    Ok(v) => marks = Some(v),
                    Err(_) => { eprintln!("--marks expects a number"); std::process::exit(2); }
                }
                i += 2; continue;
            }
            "--repl" => { repl = true; i += 1; continue; }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            unk => {
                eprintln!("Unrecognized argument: {}", unk);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    let env_cfg = Config::from_env()?;
    let config = Config::build(
        api.as_deref().unwrap_or(env_cfg.api_base.as_str()),
        state_dir.as_deref().unwrap_or(&env_cfg.state_dir.to_string_lossy()),
        downloads.as_deref().unwrap_or(&env_cfg.download_dir.to_string_lossy()),
    )?;

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "papergen",
        "papergen starting: RUST_LOG='{}', api='{}', state_dir='{}', downloads='{}'",
        rust_log,
        config.api_base,
        config.state_dir.display(),
        config.download_dir.display()
    );

    let shell = Shell::new(config)?;

    if let (Some(u), Some(p)) = (user.as_deref(), password.as_deref()) {
        shell.auto_login(u, p).await;
    }

    if let Some(subject_id) = generate {
        let ok = shell.screen_generate(subject_id, marks.unwrap_or(50)).await;
        if !repl {
            if !ok {
                std::process::exit(1);
            }
            return Ok(());
        }
    }

    shell.repl().await;
    Ok(())
}
