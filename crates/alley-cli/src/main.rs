// Artisan Alley CLI - operator tool for the marketplace server

mod api;
mod session;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use api::ApiClient;

/// Artisan Alley - marketplace operator tool
#[derive(Parser)]
#[command(name = "alley")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,
    /// Log in and cache the session token
    Login {
        /// Account email
        email: String,
    },
    /// List products
    Products {
        /// Only this artist's products (UUID)
        #[arg(long)]
        artist: Option<String>,

        /// Limit the number of rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Submit a product for authenticity verification
    VerifyProduct {
        /// Product UUID
        product_id: String,

        /// Experience band: 1-2, 3-5, 6-10 or 10+
        #[arg(long, default_value = "")]
        experience: String,

        /// Craft specialization
        #[arg(long, default_value = "")]
        specialization: String,

        /// Tools used
        #[arg(long, default_value = "")]
        tools: String,

        /// Time the piece took to create
        #[arg(long, default_value = "")]
        creation_time: String,

        /// Accept the artist undertaking (required by the server)
        #[arg(long)]
        accept_undertaking: bool,
    },
    /// Generate (and persist) the AI story for a product
    Story {
        /// Product UUID
        product_id: String,
    },
    /// Show admin stats (requires an admin session)
    Stats,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Health => handle_health(),
        Commands::Login { email } => handle_login(&email),
        Commands::Products { artist, limit } => handle_products(artist.as_deref(), limit),
        Commands::VerifyProduct {
            product_id,
            experience,
            specialization,
            tools,
            creation_time,
            accept_undertaking,
        } => handle_verify_product(
            &product_id,
            &experience,
            &specialization,
            &tools,
            &creation_time,
            accept_undertaking,
        ),
        Commands::Story { product_id } => handle_story(&product_id),
        Commands::Stats => handle_stats(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn client() -> anyhow::Result<ApiClient> {
    let token = session::load()?.map(|s| s.token);
    Ok(ApiClient::from_env(token))
}

fn handle_health() -> anyhow::Result<()> {
    let response = ApiClient::from_env(None).get("/api/health")?;
    if response["status"] == "ok" {
        println!("{}", "Server is up".green());
    } else {
        println!("{} {}", "Unexpected response:".yellow(), response);
    }
    Ok(())
}

fn handle_login(email: &str) -> anyhow::Result<()> {
    let password = rpassword::prompt_password("Password: ")?;

    let response = ApiClient::from_env(None).post(
        "/api/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )?;

    let token = response["token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("server response missing token"))?;

    session::save(&session::Session {
        token: token.to_string(),
        email: email.to_string(),
    })?;

    println!("{} {}", "Logged in as".green(), email);
    println!("Session saved to ~/.alley/session.json");
    Ok(())
}

fn handle_products(artist: Option<&str>, limit: Option<usize>) -> anyhow::Result<()> {
    let mut path = "/api/products".to_string();
    let mut query = Vec::new();
    if let Some(artist) = artist {
        query.push(format!("artistId={}", artist));
    }
    if let Some(limit) = limit {
        query.push(format!("limit={}", limit));
    }
    if !query.is_empty() {
        path = format!("{}?{}", path, query.join("&"));
    }

    let products = client()?.get(&path)?;
    let Some(products) = products.as_array() else {
        anyhow::bail!("unexpected response shape");
    };

    for product in products {
        let status = product["authenticityStatus"].as_str().unwrap_or("?");
        let status = match status {
            "verified" => status.green(),
            "rejected" => status.red(),
            _ => status.yellow(),
        };
        println!(
            "{}  {:40}  ₹{:>10}  {}",
            product["id"].as_str().unwrap_or("?"),
            product["title"].as_str().unwrap_or("?"),
            product["price"].as_str().unwrap_or("?"),
            status,
        );
    }
    println!("{} product(s)", products.len());
    Ok(())
}

fn handle_verify_product(
    product_id: &str,
    experience: &str,
    specialization: &str,
    tools: &str,
    creation_time: &str,
    accept_undertaking: bool,
) -> anyhow::Result<()> {
    let response = client()?.post(
        "/api/artist/verify-product",
        serde_json::json!({
            "productId": product_id,
            "experienceYears": experience,
            "specialization": specialization,
            "toolsUsed": tools,
            "creationTime": creation_time,
            "undertakingAccepted": accept_undertaking,
        }),
    )?;

    let status = response["status"].as_str().unwrap_or("?");
    let verdict = match status {
        "verified" => "VERIFIED".green().bold(),
        "rejected" => "REJECTED".red().bold(),
        _ => "PENDING".yellow().bold(),
    };

    println!("{}", verdict);
    println!(
        "Final score: {}  (AI pre-score: {})",
        response["finalScore"], response["authenticityScore"]
    );
    println!(
        "Verification ID: {}",
        response["verificationId"].as_str().unwrap_or("?")
    );
    println!("{}", response["message"].as_str().unwrap_or(""));
    Ok(())
}

fn handle_story(product_id: &str) -> anyhow::Result<()> {
    let story = client()?.post(
        "/api/ai/story",
        serde_json::json!({ "productId": product_id }),
    )?;

    println!("{}", story["aiStory"].as_str().unwrap_or(""));
    println!();
    print_field(&story, "artistJourney", "Journey");
    print_field(&story, "inspiration", "Inspiration");
    print_field(&story, "technique", "Technique");
    print_field(&story, "timeToComplete", "Time to complete");
    Ok(())
}

fn print_field(value: &Value, key: &str, label: &str) {
    if let Some(text) = value[key].as_str() {
        println!("{} {}", format!("{}:", label).bold(), text);
    }
}

fn handle_stats() -> anyhow::Result<()> {
    let stats = client()?.get("/api/admin/stats")?;

    println!("Users:    {}", stats["totalUsers"]);
    println!("Products: {}", stats["totalProducts"]);
    println!("Orders:   {}", stats["totalOrders"]);
    println!("Revenue:  ₹{}", stats["totalRevenue"].as_str().unwrap_or("0"));
    println!(
        "Pending verifications: {} artist(s), {} product(s)",
        stats["pendingArtistVerifications"], stats["pendingProductVerifications"]
    );
    Ok(())
}
