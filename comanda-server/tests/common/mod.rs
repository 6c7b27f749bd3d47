//! Shared test fixtures: an embedded database in a tempdir plus known
//! reference rows (waiter Ana, table 5, a small menu).

use comanda_server::{Config, DbService, ServerState};

pub struct TestContext {
    pub state: ServerState,
    // Held so the database directory outlives the test
    _tmp: tempfile::TempDir,
}

/// Open a fresh database with the schema applied
pub async fn setup() -> TestContext {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("comanda.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();

    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    TestContext {
        state: ServerState::new(config, service.db),
        _tmp: tmp,
    }
}

/// Insert reference rows with fixed ids so tests can refer to them
pub async fn seed_reference(state: &ServerState) {
    state
        .db
        .query(
            "CREATE employee:ana CONTENT { name: 'Ana', role: 'WAITER' }; \
             CREATE employee:marta CONTENT { name: 'Marta', role: 'MANAGER' }; \
             CREATE dining_table:t5 CONTENT { number: 5, seats: 8 }; \
             CREATE menu_item:burger CONTENT { name: 'Burger', price: 10.0, is_enabled: true }; \
             CREATE menu_item:soda CONTENT { name: 'Soda', price: 3.0, is_enabled: true }; \
             CREATE menu_item:espresso CONTENT { name: 'Espresso', price: 2.33, is_enabled: true }; \
             CREATE menu_item:special CONTENT { name: 'Daily Special', price: 12.0, is_enabled: false };",
        )
        .await
        .unwrap()
        .check()
        .unwrap();
}

/// setup() + seed_reference() in one call
pub async fn setup_seeded() -> TestContext {
    let ctx = setup().await;
    seed_reference(&ctx.state).await;
    ctx
}
