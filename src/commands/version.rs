use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("nagkit version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
