use clap::Parser;
use wavy_prompts::cli::Cli;
use wavy_prompts::commands;
use wavy_prompts::{AppCtx, PromptStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let ctx = AppCtx::init(cli.home.as_deref(), cli.origin.as_deref()).map_err(|e| e.to_string())?;
    let store = PromptStore::open(&ctx).map_err(|e| e.to_string())?;
    commands::dispatch(cli.command, &ctx, &store)
}
