use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use country_roulette::app::App;
use country_roulette::config::Config;
use country_roulette::countries;
use country_roulette::graphql::GraphQLClient;
use country_roulette::render;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so the display stays readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("country_roulette=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!("Using countries API at {}", config.api_url);

    let client = GraphQLClient::new(config.api_url.clone());
    let mut app = App::new(config.initial_country_code.clone());

    print_display(&app, &config);

    // Code list and initial country are independent requests
    let (codes, initial) = tokio::join!(
        countries::get_all_country_codes(&client),
        countries::get_country_info(&client, app.selected()),
    );

    match codes {
        Ok(codes) => app.set_codes(codes),
        Err(e) => report(anyhow::Error::new(e).context("Failed to fetch country codes")),
    }

    let initial_code = app.selected().clone();
    match initial {
        Ok(country) => {
            app.apply_country(&initial_code, country);
            print_display(&app, &config);
        }
        Err(e) => report(
            anyhow::Error::new(e).context(format!("Failed to fetch country {}", initial_code)),
        ),
    }

    println!("\nPress Enter (or r) for a random country 🌎, q to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match line.trim() {
            "q" | "quit" => break,
            "" | "r" => {
                let result = app
                    .select_random_country(&client, &mut rand::rng())
                    .await
                    .map(|code| code.clone());
                match result {
                    Ok(code) => {
                        info!("Showing {}", code);
                        print_display(&app, &config);
                    }
                    Err(e) => report(anyhow::Error::new(e).context("Failed to show a random country")),
                }
            }
            other => println!("Unknown command '{}'. Enter/r for a random country, q to quit.", other),
        }
    }

    info!("Bye");
    Ok(())
}

fn print_display(app: &App, config: &Config) {
    println!("\n{}", render::render(app.display(), config.color));
}

/// Failures are shown with their full context chain and never end the session
fn report(err: anyhow::Error) {
    eprintln!("{}", describe(&err));
}

fn describe(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err)
}
