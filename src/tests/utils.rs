use crate::config::MarketConfig;
use crate::domain::account::{Account, Role, SignupData};
use crate::domain::property::{Property, PropertyDraft};
use crate::market::Market;
use crate::sync::SyncBus;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PASSWORD: &str = "Secret#123";
pub const ADMIN_EMAIL: &str = "admin@smartbroker.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Fresh in-memory market with default settings.
pub fn init_test_market() -> Market {
    Market::in_memory().unwrap_or_else(|e| panic!("Market initialization failed: {e}"))
}

/// Market on an in-memory database with a custom byte quota.
pub fn market_with_quota(quota: usize) -> Market {
    Market::open(MarketConfig::in_memory().with_quota(quota), SyncBus::new())
        .unwrap_or_else(|e| panic!("Market initialization failed: {e}"))
}

/// Temp directory holding a database file. Keep the `TempDir` alive for
/// the duration of the test.
pub fn temp_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("smart_broker.sqlite3");
    (dir, path)
}

/// Open a handle on `path` joined to `bus`, the way a second tab would.
pub fn open_tab(path: &Path, bus: &SyncBus) -> Market {
    Market::open(MarketConfig::default().with_db_path(path), bus.clone())
        .unwrap_or_else(|e| panic!("Market initialization failed: {e}"))
}

pub fn signup_as(market: &mut Market, name: &str, role: Role) -> Account {
    let slug = name.to_lowercase().replace(' ', ".");
    let phone = format!("010{:08}", market.accounts().len() + 1);
    market
        .signup(SignupData {
            name: name.to_string(),
            email: format!("{slug}@example.com"),
            phone,
            password: PASSWORD.to_string(),
            role: Some(role),
            ..Default::default()
        })
        .expect("signup")
}

pub fn login(market: &mut Market, account: &Account) {
    market.login(&account.email, PASSWORD).expect("login");
}

pub fn login_admin(market: &mut Market) {
    market.login(ADMIN_EMAIL, ADMIN_PASSWORD).expect("admin login");
}

pub fn draft(address: &str, price: f64) -> PropertyDraft {
    PropertyDraft {
        address: address.to_string(),
        price,
        beds: 3,
        baths: 2,
        sqft: 1500.0,
        ..Default::default()
    }
}

/// Listing created by `agent` and approved by the admin. Leaves nobody
/// signed in.
pub fn approved_listing(market: &mut Market, agent: &Account, address: &str, price: f64) -> Property {
    login(market, agent);
    let p = market.add_property(draft(address, price)).expect("add property").value;
    login_admin(market);
    market.approve_property(&p.id).expect("approve property");
    market.logout();
    market.find_property(&p.id).cloned().expect("listing exists")
}

/// The whole fixture most pipeline tests start from: an agent, a buyer and
/// an approved listing.
pub struct Fixture {
    pub market: Market,
    pub agent: Account,
    pub buyer: Account,
    pub property: Property,
}

pub fn fixture() -> Fixture {
    let mut market = init_test_market();
    let agent = signup_as(&mut market, "Mona Marketer", Role::Marketer);
    let buyer = signup_as(&mut market, "Omar Buyer", Role::Buyer);
    let property = approved_listing(&mut market, &agent, "12 Nile St, Zamalek, Cairo", 500_000.0);
    Fixture {
        market,
        agent,
        buyer,
        property,
    }
}

/// Run the pipeline up to an assigned lead. Leaves nobody signed in.
pub fn lead_for(fx: &mut Fixture) -> crate::domain::lead::Lead {
    login(&mut fx.market, &fx.buyer);
    let interest = fx
        .market
        .submit_interest(&fx.property.id, "Interested")
        .expect("submit interest");
    login_admin(&mut fx.market);
    let lead = fx.market.approve_interest(&interest.id).expect("approve interest");
    fx.market.logout();
    lead
}
