use anyhow::{Result, bail};

use caseload_core::util::grade::{grade_options, grade_to_display, grade_to_storage};

/// Without a value lists the selectable grades; with one, maps it both ways.
pub fn run(value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        println!("{}", grade_options().join(", "));
        return Ok(());
    };

    match grade_to_storage(value) {
        Some(stored) => {
            println!("display: {}", grade_to_display(Some(stored)));
            println!("stored:  {}", stored);
            Ok(())
        }
        None => bail!("'{}' is not a grade (expected K or 1-12)", value),
    }
}
