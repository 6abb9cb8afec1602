use anyhow::Result;

use caseload_application::AppContext;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let status = ctx.health.status().try_fetch().await?;
    match status.version {
        Some(version) => println!("🩺 {} (version {})", status.status, version),
        None => println!("🩺 {}", status.status),
    }
    Ok(())
}
