use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Dump the automation API surface as JSON, for documentation or for
/// diffing against a newer vendor build.
#[derive(Parser, Debug)]
#[command(name = "api_surface", version, about = "Reference dump of the Commence automation surface")]
struct Args {
    /// Print only this method (exact automation name)
    #[arg(long)]
    method: Option<String>,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    match &args.method {
        Some(name) => match commence_db::schema::method(name) {
            Some(found) => print_json(&found),
            None => {
                error!("no automation method named {name}");
                std::process::exit(1);
            }
        },
        None => match commence_db::schema::to_json() {
            Ok(surface) => print_json(&surface),
            Err(e) => {
                error!("failed to render the surface: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            error!("failed to render JSON: {e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
