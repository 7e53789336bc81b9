use clap::Parser;
use turath_ops::utils::logger;
use turath_ops::{CommonArgs, ProcessInvenioCli, RoleSetup};

/// Ensure admin and curator roles with their permissions. Safe to run
/// multiple times.
#[derive(Parser)]
#[command(name = "setup_production_roles")]
struct Args {
    /// Account attached to the admin role when it exists
    #[arg(long)]
    admin_email: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.common.verbose, args.common.json_logs);

    println!("\n{}", "=".repeat(60));
    println!("Turath InvenioRDM - Production Role Setup");
    println!("{}\n", "=".repeat(60));

    let code = tokio::select! {
        result = run(&args) => match result {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(e) => {
                e.report("Role setup");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Setup interrupted by user");
            1
        }
    };

    std::process::exit(code);
}

async fn run(args: &Args) -> turath_ops::Result<bool> {
    let config = args.common.resolve_with_admin(args.admin_email.clone())?;
    let cli = ProcessInvenioCli::from_config(&config)?;
    RoleSetup::new(cli, config.admin_email.clone()).setup().await
}
