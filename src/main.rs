use std::sync::Arc;

use deckhub::config::AppConfig;
use deckhub::pages::deck_builder::DeckBuilderPage;
use deckhub::pages::home::{HomePage, HomeServices};
use deckhub::services::feedback::Confirmation;
use deckhub::services::memory::{
    MemoryAppStore, MemoryAuth, MemoryBlogStore, MemoryConfirmer, MemoryDeckStore, MemoryNavigator, MemoryNotifier,
};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let rights = Arc::new(config.load_rights().expect("rights load failed"));
    let seed = config.load_blog_seed().expect("blog seed load failed");

    let blog = if seed.is_empty() { MemoryBlogStore::new() } else { MemoryBlogStore::with_entries(seed) };
    let services = HomeServices {
        auth: Arc::new(MemoryAuth::new(None)),
        blog: Arc::new(blog),
        confirmer: Arc::new(MemoryConfirmer::new(Confirmation::Reject)),
        notifier: Arc::new(MemoryNotifier::new()),
        navigator: Arc::new(MemoryNavigator::new()),
    };

    let mut home = HomePage::new(services, rights);
    home.mount().await.expect("blog entries load failed");
    tracing::info!(
        published = home.blog_entries().len(),
        hidden = home.blog_entries_hidden().len(),
        "home page mounted"
    );

    let decks = Arc::new(MemoryDeckStore::new());
    let app = Arc::new(MemoryAppStore::new());
    let mut builder = DeckBuilderPage::new(decks, app, config.viewport_width);
    match builder.mount(config.deck_id.as_deref()).await {
        Ok(deck) => tracing::info!(deck_id = ?deck.map(|d| d.id), "deck builder mounted"),
        Err(e) => tracing::warn!(error = %e, "deck load failed"),
    }
    let panels = builder.panels();
    tracing::info!(
        tier = ?builder.tier(),
        deck = panels.deck_visible,
        collection = panels.collection_visible,
        stats = panels.stats_visible,
        toggles = panels.toggles_visible,
        "deck builder layout"
    );

    builder.teardown();
    home.teardown();
}
