use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use mobprog::app::App;
use mobprog::backend::Collaborators;
use mobprog::config::AppConfig;
use mobprog::error::Result;
use mobprog::router::TABS;
use mobprog::screens::{LoginField, RegisterField};
use mobprog::Supabase;

#[derive(Parser, Debug)]
#[clap(name = "mobprog", version)]
#[clap(about = "Log in, register and visit the members-only homepage", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Project URL
    #[clap(long, env = "SUPABASE_URL")]
    url: String,

    /// Anonymous API key
    #[clap(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    anon_key: String,

    /// Where to keep the session between runs
    #[clap(long, env = "MOBPROG_SESSION_FILE", default_value = ".mobprog/session.json")]
    session_file: PathBuf,

    /// Output debug logs to stderr
    #[clap(long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and go to the homepage
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Create an account and a profile row
    Register {
        #[clap(long)]
        username: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Visit the homepage; needs a session from an earlier login
    Home,
    /// Show the screen for a route, e.g. `/register`
    Open { path: String },
    /// List the tabs
    Tabs,
}

fn init_logging(debug: bool) {
    if debug {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::init();
    }
}

fn config(cli: &Cli) -> Result<AppConfig> {
    Ok(AppConfig::new(&cli.url, &cli.anon_key)?.with_session_file(cli.session_file.clone()))
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Tabs = cli.command {
        for tab in TABS.iter() {
            println!("{:<10} {}", tab.label, tab.path);
        }
        return Ok(());
    }

    let config = config(&cli)?;
    let mut app = App::new(Collaborators::supabase(Supabase::from_config(&config)));

    match cli.command {
        Commands::Login { email, password } => {
            if let Some(form) = app.login_form() {
                form.change(LoginField::Email, &email);
                form.change(LoginField::Password, &password);
            }
            submit_and_print(&mut app).await;
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            app.open("/register").await;
            if let Some(form) = app.register_form() {
                form.change(RegisterField::Username, &username);
                form.change(RegisterField::Email, &email);
                form.change(RegisterField::Password, &password);
            }
            submit_and_print(&mut app).await;
        }
        Commands::Home => app.open("/homepage").await,
        Commands::Open { path } => app.open(&path).await,
        Commands::Tabs => {}
    }

    print!("{}", app.render());
    Ok(())
}

/// Submit the mounted form. When the submit navigated away, print the
/// form as it was left so its message is not lost.
async fn submit_and_print(app: &mut App) {
    let before = app.navigator().current().clone();
    if let Some(submission) = app.submit().await {
        log::debug!("submit finished with {:?}", submission.outcome);
        if app.navigator().current() != &before {
            println!("{}", submission.form_view);
            println!("-> {}", app.navigator().current());
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_the_config() {
        let cli = Cli::try_parse_from([
            "mobprog",
            "--url",
            "http://127.0.0.1:9",
            "--anon-key",
            "key",
            "--session-file",
            "/tmp/mobprog-session.json",
            "login",
            "--email",
            "a@b.com",
            "--password",
            "secret1",
        ])
        .unwrap();

        let config = config(&cli).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9");
        assert_eq!(config.anon_key, "key");
        assert_eq!(
            config.session_file.as_deref(),
            Some(std::path::Path::new("/tmp/mobprog-session.json"))
        );
        assert!(matches!(cli.command, Commands::Login { .. }));
    }

    #[test]
    fn bad_key_flag_is_a_config_error() {
        let cli = Cli::try_parse_from([
            "mobprog",
            "--url",
            "http://127.0.0.1:9",
            "--anon-key",
            "bad key",
            "tabs",
        ])
        .unwrap();

        let err = config(&cli).unwrap_err();
        assert!(matches!(err, mobprog::error::Error::Config(_)));
    }
}
