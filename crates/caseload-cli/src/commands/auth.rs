use anyhow::{Result, bail};
use std::env;
use std::io::{self, BufRead, Write};

use caseload_application::AppContext;
use caseload_core::auth::Credentials;

const PASSWORD_ENV: &str = "CASELOAD_PASSWORD";

pub async fn login(ctx: &AppContext, email: String) -> Result<()> {
    let password = resolve_password(env::var(PASSWORD_ENV).ok(), || {
        print!("Password: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    })?;
    let identity = ctx.auth.login(&Credentials { email, password }).await?;
    println!("✅ Signed in as therapist {}", identity);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    if !ctx.auth.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }
    ctx.auth.logout().await?;
    println!("👋 Signed out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.auth.identity() {
        Some(identity) => println!("Signed in as therapist {}", identity),
        None => println!("Not signed in."),
    }
    Ok(())
}

/// The environment value wins; otherwise `prompt` supplies one line.
fn resolve_password(
    from_env: Option<String>,
    prompt: impl FnOnce() -> io::Result<String>,
) -> Result<String> {
    if let Some(password) = from_env.filter(|p| !p.is_empty()) {
        return Ok(password);
    }
    let password = prompt()?.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("No password given (set {} or type it at the prompt)", PASSWORD_ENV);
    }
    Ok(password)
}
