use smart_broker::domain::account::{Role, SignupData};
use smart_broker::domain::lead::LeadStatus;
use smart_broker::domain::price::format_price;
use smart_broker::market::commission::Closed;
use smart_broker::sync::SyncBus;
use smart_broker::{Market, MarketConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    // 1️⃣ Logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smart_broker=info")),
        )
        .init();

    // 2️⃣ Open the store
    let config = MarketConfig::from_env();
    let admin = (config.admin_email.clone(), config.admin_password.clone());
    let mut market = match Market::open(config, SyncBus::new()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("❌ Store initialization failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Seed a demo pipeline
    if let Err(e) = seed(&mut market, &admin) {
        eprintln!("❌ Seeding failed: {e}");
        std::process::exit(1);
    }

    // 4️⃣ Summary
    let data = market.data();
    tracing::info!(
        accounts = data.accounts.len(),
        properties = data.properties.len(),
        interests = data.interests.len(),
        leads = data.leads.len(),
        claims = data.claims.len(),
        "store ready"
    );
    for entry in market.commission_leaderboard() {
        println!(
            "{:<20} {:>3} deal(s)  {}",
            entry.name,
            entry.deals,
            format_price(entry.total_commission)
        );
    }
}

fn seed(market: &mut Market, admin: &(String, String)) -> Result<(), Box<dyn std::error::Error>> {
    let (admin_email, admin_password) = admin;
    let agent_email = "agent@smartbroker.com";
    let buyer_email = "buyer@smartbroker.com";
    let password = "Demo#2024";

    if market.accounts().iter().any(|a| a.email == agent_email) {
        tracing::info!("demo data already present, skipping seed");
        return Ok(());
    }

    market.signup(SignupData {
        name: "Mona Marketer".into(),
        email: agent_email.into(),
        phone: "01000000001".into(),
        password: password.into(),
        role: Some(Role::Marketer),
        ..Default::default()
    })?;
    market.signup(SignupData {
        name: "Omar Buyer".into(),
        email: buyer_email.into(),
        phone: "01000000002".into(),
        password: password.into(),
        role: Some(Role::Buyer),
        budget: Some("1m+".into()),
        preferred_location: Some("Zamalek".into()),
    })?;

    // Listings belong to whoever is signed in
    market.login(agent_email, password)?;
    let listings = market.generate_test_data();
    if let Some(w) = listings.warning {
        tracing::warn!(warning = w.message(), "seed listings");
    }
    market.logout();

    market.login(admin_email, admin_password)?;
    for p in &listings.value {
        market.approve_property(&p.id)?;
    }
    market.logout();

    let Some(first) = listings.value.first() else {
        return Ok(());
    };

    market.login(buyer_email, password)?;
    let interest = market.submit_interest(&first.id, "Is the price negotiable?")?;
    market.logout();

    market.login(admin_email, admin_password)?;
    let lead = market.approve_interest(&interest.id)?;
    market.logout();

    market.login(agent_email, password)?;
    market.update_lead_status(&lead.id, LeadStatus::Contacted, "Called the buyer")?;
    let closed = market.close_deal(&lead.id, first.price, LeadStatus::ClosedWon)?;
    market.logout();

    if let Closed::Won(claim) = closed {
        market.login(admin_email, admin_password)?;
        market.approve_commission(&claim.id)?;
        market.logout();
    }

    Ok(())
}
