use reactor_runner::{ReactorSimulation, SimulationConfig};

fn print_help() {
    eprintln!(
        r#"Reactor Simulator - seeded agents trading against a reserve reactor

USAGE:
    reactor-sim [CONFIG]

ARGS:
    CONFIG              JSON configuration file (optional)

ENVIRONMENT VARIABLES:
    REACTOR_SIM_CONFIG  Configuration file used when CONFIG is omitted
    RUST_LOG            Log level filter (default: info)
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("--help" | "-h")) {
        print_help();
        return Ok(());
    }

    let config = SimulationConfig::load(arg);
    let simulation = ReactorSimulation::new(config)?;
    let results = simulation.run().await?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
