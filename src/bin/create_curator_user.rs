use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use turath_ops::core::curator::DEFAULT_TOKEN_NAME;
use turath_ops::utils::{logger, validation};
use turath_ops::{CommonArgs, CuratorProvisioner, ProcessInvenioCli};

/// Create a curator user for Turath InvenioRDM. Safe to run multiple times.
#[derive(Parser)]
#[command(name = "create_curator_user")]
struct Args {
    /// Email of the curator account
    email: String,

    /// Password; prompted for on stdin when omitted
    #[arg(env = "TURATH_CURATOR_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Also issue a personal API token for the curator
    #[arg(long)]
    create_token: bool,

    /// Name of the API token created with --create-token
    #[arg(long, default_value = DEFAULT_TOKEN_NAME)]
    token_name: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.common.verbose, args.common.json_logs);

    println!("\n{}", "=".repeat(60));
    println!("Turath InvenioRDM - Create Curator User");
    println!("{}\n", "=".repeat(60));

    let resolved = match &args.password {
        Some(password) => validation::validate_password(password).map(|_| password.clone()),
        None => {
            let mut stdin = BufReader::new(tokio::io::stdin());
            let password = prompt_line(&mut stdin, &format!("Enter password for {}: ", args.email))
                .await
                .context("reading password")?;
            let confirm = prompt_line(&mut stdin, "Confirm password: ")
                .await
                .context("reading password confirmation")?;
            validation::confirm_password(&password, &confirm)
        }
    };
    let password = match resolved {
        Ok(password) => password,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let code = tokio::select! {
        result = run(&args, &password) => match result {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(e) => {
                e.report("Curator user creation");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted by user");
            1
        }
    };

    std::process::exit(code);
}

async fn run(args: &Args, password: &str) -> turath_ops::Result<bool> {
    let config = args.common.resolve()?;
    let cli = ProcessInvenioCli::from_config(&config)?;
    let provisioner = CuratorProvisioner::new(cli, &config.base_url);

    if !provisioner.create_curator(&args.email, password).await? {
        return Ok(false);
    }

    if args.create_token {
        match provisioner.create_token(&args.email, &args.token_name).await? {
            Some(token) => println!("API token for {}: {}", args.email, token),
            None => return Ok(false),
        }
    }

    Ok(true)
}

/// No echo suppression: input is expected to be piped or typed in a
/// throwaway container shell.
async fn prompt_line(stdin: &mut BufReader<Stdin>, prompt: &str) -> std::io::Result<String> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(prompt.as_bytes()).await?;
    stderr.flush().await?;

    let mut line = String::new();
    stdin.read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
