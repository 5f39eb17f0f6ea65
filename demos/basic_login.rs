//! Basic login example.
//!
//! This example logs in with a TOTP, prints holdings, limits and positions,
//! and logs out again.
//!
//! Run with: cargo run --example basic_login

use shoonya_rs::api::LimitsQuery;
use shoonya_rs::{LoginCredentials, Session};

#[tokio::main]
async fn main() -> shoonya_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let user_id = std::env::var("SHOONYA_USER_ID")
        .expect("SHOONYA_USER_ID environment variable required");
    let password = std::env::var("SHOONYA_PASSWORD")
        .expect("SHOONYA_PASSWORD environment variable required");
    let vendor_code = std::env::var("SHOONYA_VENDOR_CODE")
        .expect("SHOONYA_VENDOR_CODE environment variable required");
    let api_key = std::env::var("SHOONYA_API_KEY")
        .expect("SHOONYA_API_KEY environment variable required");
    let totp = std::env::var("SHOONYA_TOTP")
        .expect("SHOONYA_TOTP environment variable required");
    let debug = std::env::var("SHOONYA_DEBUG").is_ok();

    let session = Session::builder(user_id).debug(debug).build()?;

    let creds = LoginCredentials::new(password, vendor_code, api_key).factor2(totp);
    let login = session.login(&creds).await?;
    println!(
        "Logged in as {} ({})",
        login.uname.as_deref().unwrap_or("unknown"),
        session.account_id().await
    );

    let holdings = session.portfolio().holdings(None).await?;
    println!("\nHoldings:");
    for holding in holdings.records() {
        println!(
            "  - {}: {:?} @ {:?}",
            holding.symbol().unwrap_or("?"),
            holding.holdqty,
            holding.upldprc
        );
    }

    let limits = session.portfolio().limits(LimitsQuery::new()).await?;
    println!("\nCash: {:?}  Margin used: {:?}", limits.cash, limits.marginused);

    let positions = session.portfolio().positions().await?;
    println!("\nPositions:");
    for position in positions.records().iter().filter(|p| !p.is_flat()) {
        println!(
            "  - {}: {:?} (LTP {:?})",
            position.tsym.as_deref().unwrap_or("?"),
            position.netqty,
            position.lp
        );
    }

    session.logout().await?;
    println!("\nDone!");
    Ok(())
}
