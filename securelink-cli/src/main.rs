use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use securelink_core::batch::{describe_line_count, seal_lines, seal_one};
use securelink_core::crypto::strength::StrengthResult;
use securelink_core::link::DEFAULT_SHARE_BASE;
use securelink_core::{
    extract_urls, generate_password, get_settings_path, open_tracked_with_params, resolve_token,
    score_password, validate_url, DecryptionAttempts, KdfParams, SecureLinkError, Settings, ShareLink,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

/// SecureLink CLI - password-protected, shareable URL tokens
#[derive(Parser)]
#[command(name = "securelink")]
#[command(about = "Seal URLs into password-protected tokens and open them again", long_about = None)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal a single URL
    Seal {
        /// URL to protect; https:// is added when no scheme is given
        url: String,

        /// Password (will prompt if not provided)
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,

        /// Generate a strong password and print it
        #[arg(long)]
        generate: bool,

        /// Page that opens tokens; the share link points here
        #[arg(long, default_value = DEFAULT_SHARE_BASE)]
        base: String,
    },

    /// Seal every valid URL in a file, one per line ("-" for stdin)
    SealBulk {
        input: PathBuf,

        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,

        /// Page that opens tokens; the share links point here
        #[arg(long, default_value = DEFAULT_SHARE_BASE)]
        base: String,
    },

    /// List the URLs found in free text ("-" for stdin)
    Scan { input: PathBuf },

    /// Open a token or share link
    Open {
        /// Token, or a share link carrying one in its data parameter
        token: String,

        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,

        /// Extra prompts after a rejected password
        #[arg(long, default_value_t = 2)]
        retries: u32,

        /// Derive the key with PBKDF2-HMAC-SHA1, as older CryptoJS builds did
        #[arg(long)]
        legacy_kdf: bool,
    },

    /// Generate a strong 16-character password
    Generate,

    /// Score a password
    Strength { password: String },

    /// Check and normalize a URL
    Validate { url: String },

    /// Show or change display settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,
    /// Change one setting (autoRedirect, redirectDelay, showPasswordStrength)
    Set { key: String, value: String },
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }
}

fn obtain_password(given: Option<String>, prompt: &str) -> Result<Zeroizing<String>> {
    let password = match given {
        Some(password) => password,
        None => rpassword::prompt_password(prompt).context("Failed to read password")?,
    };
    if password.is_empty() {
        bail!("Please enter a password");
    }
    Ok(Zeroizing::new(password))
}

fn print_strength(result: &StrengthResult) {
    eprintln!(
        "Strength: {}{}\x1b[0m ({}/5 criteria)",
        result.level.color_code(),
        result.level.label(),
        result.count
    );
}

fn print_share_link(link: &ShareLink) {
    println!("Original: {}", link.original);
    println!("Token:    {}", link.token);
    println!("Link:     {}", link.link);
}

fn open_interactive(
    input: &str,
    given: Option<String>,
    retries: u32,
    params: &KdfParams,
    settings: &Settings,
) -> Result<()> {
    let token = resolve_token(input);
    let prompts_allowed = given.is_none();
    let mut attempts = DecryptionAttempts::new();
    let mut password = obtain_password(given, "Password: ")?;

    loop {
        match open_tracked_with_params(&token, &password, params, &mut attempts) {
            Ok(url) => {
                println!("{}", url);
                if settings.auto_redirect {
                    eprintln!("Redirect target ready (delay {}s)", settings.redirect_delay);
                }
                return Ok(());
            }
            Err(SecureLinkError::Envelope(_)) => {
                let message = attempts
                    .message()
                    .unwrap_or_else(|| "Incorrect password".to_string());
                eprintln!("{}", message);
                if !prompts_allowed || attempts.failed() > retries {
                    bail!("Could not open the link");
                }
                password = obtain_password(None, "Try again: ")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings_path = cli.settings.unwrap_or_else(get_settings_path);
    // Managing the file itself needs the real error; everything else only reads preferences
    let settings = match cli.command {
        Commands::Settings { .. } => Settings::load_or_default(&settings_path)?,
        _ => Settings::load_or_warn(&settings_path),
    };
    debug!(?settings, "settings in effect");

    match cli.command {
        Commands::Seal {
            url,
            password,
            generate,
            base,
        } => {
            let password = if generate {
                let generated = Zeroizing::new(generate_password());
                eprintln!("Generated password: {}", generated.as_str());
                generated
            } else {
                obtain_password(password, "Password: ")?
            };
            if settings.show_password_strength {
                print_strength(&score_password(&password));
            }

            let link = seal_one(&url, &password, &base)?;
            print_share_link(&link);
        }
        Commands::SealBulk {
            input,
            password,
            base,
        } => {
            let text = read_input(&input)?;
            eprintln!("{}", describe_line_count(&text));

            let password = obtain_password(password, "Password: ")?;
            if settings.show_password_strength {
                print_strength(&score_password(&password));
            }

            let links = seal_lines(&text, &password, &base)?;
            for link in &links {
                println!("{}\t{}", link.original, link.link);
            }
            eprintln!("{} URLs encrypted successfully!", links.len());
        }
        Commands::Scan { input } => {
            let text = read_input(&input)?;
            let urls = extract_urls(&text);
            if urls.is_empty() {
                bail!("No URLs found");
            }
            for url in &urls {
                println!("{}", url);
            }
        }
        Commands::Open {
            token,
            password,
            retries,
            legacy_kdf,
        } => {
            let params = if legacy_kdf {
                KdfParams::legacy()
            } else {
                KdfParams::default()
            };
            open_interactive(&token, password, retries, &params, &settings)?
        }
        Commands::Generate => {
            let password = Zeroizing::new(generate_password());
            println!("{}", password.as_str());
            if settings.show_password_strength {
                print_strength(&score_password(&password));
            }
        }
        Commands::Strength { password } => {
            let password = Zeroizing::new(password);
            let result = score_password(&password);
            println!("{} ({}/5)", result.level.as_str(), result.count);
        }
        Commands::Validate { url } => {
            let result = validate_url(&url);
            println!("{}", result.message);
            match result.normalized {
                Some(normalized) if result.valid => println!("{}", normalized),
                _ => std::process::exit(1),
            }
        }
        Commands::Settings { action } => match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => {
                println!("# {}", settings_path.display());
                println!("autoRedirect = {}", settings.auto_redirect);
                println!("redirectDelay = {}", settings.redirect_delay);
                println!("showPasswordStrength = {}", settings.show_password_strength);
            }
            SettingsAction::Set { key, value } => {
                let mut settings = settings;
                settings.set(&key, &value)?;
                settings.save(&settings_path)?;
            }
        },
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
