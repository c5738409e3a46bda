//! Domains command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the domains command.
pub fn execute_domains(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_domains()?);
    Ok(())
}
