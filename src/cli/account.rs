//! Account CLI commands
//!
//! Every command except `register` and `currencies` acts on the user given
//! by the global `--user` option and asks for that user's password, unless
//! it is supplied with `--password` or `EASYFINANCE_PASSWORD`.

use clap::Subcommand;

use super::read_password;
use crate::config::Settings;
use crate::display::format_user_profile;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{available_currencies, User};
use crate::services::{AccountService, DeletionOutcome};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new user
    Register {
        /// Email address
        email: String,
        /// Password (prompted if omitted)
        #[arg(long, env = "EASYFINANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show the current user's profile
    Show {
        #[arg(long, env = "EASYFINANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Change first name, last name or preferred currency
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// ISO currency code, see `account currencies`
        #[arg(long)]
        currency: Option<String>,
        #[arg(long, env = "EASYFINANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Change the email address
    Email {
        /// New email address
        email: String,
        #[arg(long, env = "EASYFINANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Change the password
    Password {
        /// Current password (prompted if omitted)
        #[arg(long, env = "EASYFINANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// New password (prompted if omitted)
        #[arg(long, env = "EASYFINANCE_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },

    /// Delete the account; run once for a token, again with --token to confirm
    Delete {
        /// Confirmation token from the first call
        #[arg(long)]
        token: Option<String>,
        #[arg(long, env = "EASYFINANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// List the supported currencies
    Currencies,
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    user: Option<&str>,
    cmd: AccountCommands,
) -> EasyFinanceResult<()> {
    let service = AccountService::with_settings(storage, settings);

    match cmd {
        AccountCommands::Register { email, password } => {
            let password = read_password(password, "Password: ")?;
            let user = service.register(&email, &password)?;

            println!("Registered user: {}", user.email());
            println!("  ID: {}", user.id());
        }

        AccountCommands::Show { password } => {
            let user = sign_in(&service, user, password)?;
            print!("{}", format_user_profile(&user));
        }

        AccountCommands::Profile {
            first_name,
            last_name,
            currency,
            password,
        } => {
            if first_name.is_none() && last_name.is_none() && currency.is_none() {
                println!("No changes specified. Use --first-name, --last-name or --currency.");
                return Ok(());
            }

            let user = sign_in(&service, user, password)?;
            let updated = service.update_profile(
                user.id(),
                first_name.as_deref(),
                last_name.as_deref(),
                currency.as_deref(),
            )?;
            print!("{}", format_user_profile(&updated));
        }

        AccountCommands::Email { email, password } => {
            let user = sign_in(&service, user, password)?;
            let updated = service.change_email(user.id(), &email)?;
            println!("Email changed: {} -> {}", user.email(), updated.email());
        }

        AccountCommands::Password {
            password,
            new_password,
        } => {
            let current = read_password(password, "Current password: ")?;
            let user = service.authenticate(require_user(user)?, &current)?;
            let new = read_password(new_password, "New password: ")?;

            service.change_password(user.id(), &current, &new)?;
            println!("Password changed for {}", user.email());
        }

        AccountCommands::Delete { token, password } => {
            let user = sign_in(&service, user, password)?;

            match service.delete(user.id(), token.as_deref())? {
                DeletionOutcome::ConfirmationRequired { token, message } => {
                    println!("{}", message);
                    println!();
                    println!("Confirmation token: {}", token);
                    println!("Run 'easyfinance account delete --token={}' to confirm.", token);
                }
                DeletionOutcome::Deleted(user) => {
                    println!("Deleted account: {}", user.email());
                }
            }
        }

        AccountCommands::Currencies => {
            for code in available_currencies() {
                println!("{}", code);
            }
        }
    }

    Ok(())
}

fn sign_in(
    service: &AccountService<'_>,
    email: Option<&str>,
    password: Option<String>,
) -> EasyFinanceResult<User> {
    let email = require_user(email)?;
    let password = read_password(password, &format!("Password for {}: ", email))?;
    service.authenticate(email, &password)
}

fn require_user(email: Option<&str>) -> EasyFinanceResult<&str> {
    email.ok_or_else(|| EasyFinanceError::InvalidInput("no user selected, pass --user <email>".into()))
}
