//! Example fetching an access token from the sandbox

use daraja::{DarajaClient, Environment};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = DarajaClient::new(
        Environment::Sandbox,
        "51Bg1WQcZ9g0yq0DSjogNwLpsxxUQzD1",
        "roLeNZCP5BVcmXDa",
    )?;

    println!("--- Getting the access token ---");
    match client.generate_token().await {
        Ok(token) => println!(
            "access_token = {}, expires_in = {:?} secs",
            token.access_token,
            token.expiry_seconds()
        ),
        Err(e) => println!("Error: {}", e),
    }
    println!("--- Done getting the access token ---");

    Ok(())
}
