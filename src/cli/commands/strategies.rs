//! List strategies command.

use advisor_strategies::StrategyRegistry;
use anyhow::Result;

pub async fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Strategies");
    println!("============================================================");
    println!();

    for info in registry.list() {
        println!("  {}", info.id);
        println!("  ----------------------------------------------------------");
        println!("  {}", info.description);
        println!();
    }

    println!("Use --strategy <name> with the analyze command to select one.");

    Ok(())
}
