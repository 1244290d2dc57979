//! The `mathdrill check` command.

use anyhow::Result;

use mathdrill_core::matches;

pub fn execute(expected: &str, given: &str) -> Result<()> {
    if matches(expected, given) {
        println!("correct");
    } else {
        println!("incorrect");
    }
    Ok(())
}
