use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use faunakey_function::config::schema::{DEFAULT_FUNCTION_PATH, DEFAULT_SECRET_ENV_VAR};
use faunakey_function::function::{
    ClientContext, Clock, EnvSecret, FaunaKeyFunction, InvocationEvent, SecretSource,
    StaticSecret, SystemClock, UserClaim,
};

#[derive(Parser)]
#[command(name = "faunakey-cli")]
#[command(about = "Invoke the faunakey function locally or against a running host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the function in-process and print the response envelope
    Invoke {
        #[command(flatten)]
        claim: ClaimArgs,

        /// Secret to hand out (defaults to reading the environment)
        #[arg(long)]
        secret: Option<String>,

        /// Environment variable holding the secret
        #[arg(long, default_value = DEFAULT_SECRET_ENV_VAR)]
        secret_env: String,
    },
    /// POST an invocation to a running host and print the reply
    Request {
        #[command(flatten)]
        claim: ClaimArgs,

        #[arg(short, long, default_value = "http://localhost:8888")]
        url: String,

        #[arg(short, long, default_value = DEFAULT_FUNCTION_PATH)]
        path: String,
    },
}

#[derive(Args)]
struct ClaimArgs {
    /// Absolute expiry, seconds since epoch
    #[arg(long, conflicts_with_all = ["ttl", "anonymous"])]
    exp: Option<f64>,

    /// Expiry relative to now, in seconds (negative for an expired claim)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "anonymous")]
    ttl: Option<f64>,

    /// Send no user at all
    #[arg(long)]
    anonymous: bool,

    /// Subject to put in the claim
    #[arg(long)]
    sub: Option<String>,
}

impl ClaimArgs {
    fn event(&self) -> InvocationEvent {
        let exp = match (self.exp, self.ttl) {
            (Some(exp), _) => Some(exp),
            (None, Some(ttl)) => Some(SystemClock.now_secs() + ttl),
            (None, None) if self.anonymous => None,
            // One hour, like a freshly issued identity token.
            (None, None) => Some(SystemClock.now_secs() + 3600.0),
        };

        let context = match exp {
            Some(exp) => ClientContext::with_user(UserClaim {
                sub: self.sub.clone(),
                ..UserClaim::expiring_at(exp)
            }),
            None => ClientContext::anonymous(),
        };
        InvocationEvent::new(context)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke { claim, secret, secret_env } => {
            let secrets: Arc<dyn SecretSource> = match secret {
                Some(secret) => Arc::new(StaticSecret::new(secret)),
                None => Arc::new(EnvSecret::new(secret_env)),
            };
            let function = FaunaKeyFunction::new(secrets, Arc::new(SystemClock));
            let response = function.invoke(&claim.event());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Request { claim, url, path } => {
            let client = reqwest::Client::new();
            let res = client
                .post(format!("{}{}", url.trim_end_matches('/'), path))
                .json(&claim.event())
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    println!("Status: {}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
