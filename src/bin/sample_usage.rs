//! Walk through the broker API against a live server.
//!
//! Creates a domain and applications, exercises cartridges and SSH keys, then
//! force-deletes every domain of the account. Use a throwaway account.
//!
//! ```sh
//! RUST_LOG=rhc_rest=debug cargo run --bin rhc-sample -- \
//!     https://openshift.example.com/broker/rest alice secret d1
//! ```

use rhc_rest_api::{Application, BrokerClient, Credentials};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [endpoint, username, password, domain_id] = args.as_slice() else {
        eprintln!("Usage: rhc-sample https://<hostname>/broker/rest <username> <password> <domain_id>");
        std::process::exit(1);
    };

    if let Err(e) = run(endpoint, username, password, domain_id).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(
    endpoint: &str,
    username: &str,
    password: &str,
    domain_id: &str,
) -> rhc_rest_api::Result<()> {
    let client = BrokerClient::connect(endpoint, Credentials::basic(username, password)).await?;

    println!("Creating a domain");
    let domain = client.add_domain(domain_id).await?;
    println!("Domain created: {}", domain.id());

    println!("Getting all cartridges...");
    for cart in client.cartridges().await? {
        println!("  {} (type: {})", cart.name(), cart.cartridge_type());
    }

    println!("Creating application appone");
    let carts = client.find_cartridge("php-5.3").await?;
    let Some(php) = carts.first() else {
        println!("Cartridge php-5.3 is not offered by this broker");
        return Ok(());
    };
    domain.add_application("appone", php.name(), false).await?;

    println!("Try deleting domain with an application");
    if let Err(e) = domain.delete(false).await {
        println!("{e}");
    }

    println!("Getting all domains and applications...");
    for domain in client.domains().await? {
        println!("  Domain: {}", domain.id());
        for app in domain.applications().await? {
            println!("    Application: {}", app.name());
            for cart in app.cartridges().await? {
                println!("      Cartridge {} ({})", cart.name(), cart.cartridge_type());
            }
        }
    }

    println!("Find application=appone and restart it...");
    match client.find_application("appone").await?.first() {
        Some(app) => app.restart().await?,
        None => println!("  Application appone not found"),
    }

    match client.find_application("appthree").await?.first() {
        Some(app) => {
            println!("Deleting leftover application appthree");
            app.delete().await?;
        }
        None => println!("No leftover application appthree"),
    }

    println!("Create new application named appthree...");
    let Some(first) = client.domains().await?.into_iter().next() else {
        println!("  No domain available");
        return Ok(());
    };
    let app = first.add_application("appthree", "php-5.3", false).await?;
    cartridge_round_trip(&app).await?;
    println!("Deleting appthree");
    app.delete().await?;

    println!("Adding, updating and deleting keys");
    let key = client
        .user()
        .await?
        .add_key("newkey", "NEWKEYCONTENT", "ssh-rsa")
        .await?;

    println!("Added key: {} updating key content", key.name());
    let key = key.update(key.key_type(), "NEWKEYCONTENT123").await?;

    println!("Getting all keys...");
    for key in client.user().await?.keys().await? {
        println!("  Key: {} (type: {}) {}", key.name(), key.key_type(), key.content());
    }

    println!("Deleting key");
    if let Err(e) = key.delete().await {
        println!("{e}");
    }

    println!("Clean up domains and apps by force deleting domain");
    for domain in client.domains().await? {
        domain.delete(true).await?;
    }

    Ok(())
}

async fn cartridge_round_trip(app: &Application) -> rhc_rest_api::Result<()> {
    println!("Adding MySQL cartridge to appthree");
    let cartridge = app.add_cartridge("mysql-5.1").await?;

    println!("Check to see if it was added");
    let before = app.cartridges().await?;
    for cart in &before {
        println!("Cartridge {} ({})", cart.name(), cart.cartridge_type());
    }

    println!("Restart MySQL cartridge");
    cartridge.restart().await?;
    println!("Deleting MySQL cartridge");
    cartridge.delete().await?;

    println!("Check to see if it was deleted");
    let after = app.cartridges().await?;
    if after.iter().all(|c| c.name() != cartridge.name()) {
        println!("MySQL cartridge is deleted");
    } else {
        println!(
            "MySQL cartridge still listed ({} -> {} cartridges)",
            before.len(),
            after.len()
        );
    }
    Ok(())
}
