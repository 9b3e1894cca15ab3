//! Interactive screens for the papergen client. Every protected screen is
//! entered through the route guard, evaluated fresh on each navigation; the
//! decision is never cached across commands.

pub mod outputformatter;

use std::io::{BufRead, Write};

use tracing::warn;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::papers::{ArtifactResponse, ArtifactRetrievalWorkflow, GenerationRequest};
use crate::session::{evaluate, GuardDecision, GuardSpec, Role, SessionLifecycle, SessionStore};
use crate::subjects::list_subjects;

pub struct Shell {
    config: Config,
    api: ApiClient,
    store: SessionStore,
}

impl Shell {
    pub fn new(config: Config) -> AppResult<Self> {
        let api = ApiClient::new(config.api_base.clone())?;
        let store = SessionStore::new(&config.state_dir);
        Ok(Self { config, api, store })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Line-oriented command loop. Exits on `quit`, `exit` or EOF.
    pub async fn repl(&self) {
        println!("Type 'help' for commands.");
        let stdin = std::io::stdin();
        loop {
            print!("papergen> ");
            let _ = std::io::stdout().flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    eprintln!("input error: {}", e);
                    break;
                }
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let cmd = parts.next().unwrap_or("");
            let args: Vec<&str> = parts.collect();
            match cmd {
                "help" => print_help(),
                "quit" | "exit" => break,
                "login" => self.screen_login(&args).await,
                "register" => self.screen_register(&args).await,
                "logout" => self.screen_logout(),
                "whoami" | "dashboard" => self.screen_dashboard(),
                "subjects" => self.screen_subjects().await,
                "generate" => {
                    let sid = args.first().and_then(|s| s.parse::<i64>().ok());
                    let marks = args.get(1).and_then(|s| s.parse::<i64>().ok());
                    match (sid, marks) {
                        (Some(sid), Some(marks)) => {
                            let _ = self.screen_generate(sid, marks).await;
                        }
                        _ => println!("usage: generate <subject-id> <total-marks>"),
                    }
                }
                other => println!("unknown command '{}'; type 'help'", other),
            }
        }
    }

    /// Authenticate and report the outcome. Login only counts as successful
    /// when the store afterwards holds a session; a 2xx signin without a
    /// token is reported as a failure to establish one.
    pub async fn auto_login(&self, username: &str, password: &str) {
        let lifecycle = SessionLifecycle::new(&self.api, &self.store);
        match lifecycle.login(username, password).await {
            Ok(_) => {
                if self.store.load().is_some() {
                    println!("Login successful");
                    self.screen_dashboard();
                } else {
                    println!("Login did not establish a session; contact the administrator.");
                }
            }
            Err(e) => println!("Login failed: {}", e.message()),
        }
    }

    /// Login is a public screen: a logged-in user is sent home instead, the
    /// same way the router treats the login route.
    async fn screen_login(&self, args: &[&str]) {
        if self.store.load().is_some() {
            println!("already logged in");
            self.screen_dashboard();
            return;
        }
        match (args.first(), args.get(1)) {
            (Some(user), Some(pass)) => self.auto_login(user, pass).await,
            _ => println!("usage: login <username> <password>"),
        }
    }

    async fn screen_register(&self, args: &[&str]) {
        if self.store.load().is_some() {
            println!("already logged in");
            self.screen_dashboard();
            return;
        }
        let (Some(user), Some(pass)) = (args.first(), args.get(1)) else {
            println!("usage: register <username> <password> [admin|faculty]");
            return;
        };
        let role = match args.get(2).copied() {
            None | Some("faculty") => Role::Faculty,
            Some("admin") => Role::Admin,
            Some(other) => {
                println!("unknown role '{}'; expected admin or faculty", other);
                return;
            }
        };
        let lifecycle = SessionLifecycle::new(&self.api, &self.store);
        match lifecycle.register(user, pass, role).await {
            Ok(message) => {
                println!("{}", message);
                println!("Now log in with: login {} <password>", user);
            }
            Err(e) => println!("Registration failed: {}", e.message()),
        }
    }

    fn screen_logout(&self) {
        SessionLifecycle::new(&self.api, &self.store).logout();
        println!("Logged out.");
    }

    /// The neutral landing screen. Requires any recognised role.
    fn screen_dashboard(&self) {
        let spec = GuardSpec::any_of([Role::Admin, Role::Faculty]);
        match evaluate(&self.store, &spec) {
            GuardDecision::RedirectLogin => {
                println!("not logged in; use: login <username> <password>");
            }
            GuardDecision::RedirectHome => {
                println!("Your account has no role this client recognises.");
            }
            GuardDecision::Render => {
                let Some(s) = self.store.load() else { return };
                let mut labels: Vec<&str> = s.roles.iter().map(|r| r.label()).collect();
                labels.sort_unstable();
                println!("Welcome, {}!", s.username);
                println!(
                    "Your role: {}",
                    if labels.is_empty() { "none".to_string() } else { labels.join(", ") }
                );
            }
        }
    }

    /// Subject administration listing; Admin only.
    async fn screen_subjects(&self) {
        let spec = GuardSpec::any_of([Role::Admin]);
        match evaluate(&self.store, &spec) {
            GuardDecision::RedirectLogin => {
                println!("not logged in; use: login <username> <password>");
            }
            GuardDecision::RedirectHome => {
                println!("Subject administration needs the Admin role.");
                self.screen_dashboard();
            }
            GuardDecision::Render => match list_subjects(&self.api, &self.store).await {
                Ok(subs) => outputformatter::print_subject_table(&subs),
                Err(e) => println!("Failed to load subjects. {}", e.message()),
            },
        }
    }

    /// Generation screen; any recognised role. Returns whether a paper was
    /// delivered.
    pub async fn screen_generate(&self, subject_id: i64, total_marks: i64) -> bool {
        let spec = GuardSpec::any_of([Role::Admin, Role::Faculty]);
        match evaluate(&self.store, &spec) {
            GuardDecision::RedirectLogin => {
                println!("not logged in; use: login <username> <password>");
                false
            }
            GuardDecision::RedirectHome => {
                self.screen_dashboard();
                false
            }
            GuardDecision::Render => {
                let subjects = match list_subjects(&self.api, &self.store).await {
                    Ok(s) => s,
                    Err(e) => {
                        println!("Failed to load subjects. {}", e.message());
                        return false;
                    }
                };
                let request = GenerationRequest::for_subject(&subjects, subject_id, total_marks);
                let workflow =
                    ArtifactRetrievalWorkflow::new(&self.api, &self.store, &self.config.download_dir);
                println!("Generating PDF, please wait...");
                match workflow.run(&request, &subjects).await {
                    ArtifactResponse::BinarySuccess { filename, bytes, path } => {
                        println!(
                            "Paper generated! Saved {} ({} bytes) to {}",
                            filename,
                            bytes.len(),
                            path.display()
                        );
                        true
                    }
                    ArtifactResponse::TypedError { message } => {
                        warn!("{}", message);
                        println!("{}", message);
                        false
                    }
                }
            }
        }
    }
}

fn print_help() {
    println!(
        "Commands:\n  login <username> <password>              authenticate and store the session\n  register <username> <password> [role]    create an account (role: admin|faculty, default faculty)\n  logout                                   drop the stored session\n  whoami | dashboard                       show the current identity and roles\n  subjects                                 list subjects (Admin only)\n  generate <subject-id> <total-marks>      generate a question paper PDF\n  help                                     show this help\n  quit | exit                              leave the interpreter"
    );
}
