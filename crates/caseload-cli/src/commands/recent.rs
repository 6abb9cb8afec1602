use anyhow::Result;

use caseload_application::AppContext;

pub async fn run(ctx: &AppContext, clear: bool) -> Result<()> {
    if clear {
        ctx.recently_viewed.clear().await?;
        println!("🧹 Cleared recently viewed students");
        return Ok(());
    }

    let entries = ctx.recently_viewed.list().await?;
    if entries.is_empty() {
        println!("No recently viewed students.");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "  {:<12} {:<28} {}",
            entry.student.id,
            entry.student.display_name(),
            entry.viewed_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
