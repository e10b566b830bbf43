//! Seed script for development: populates the database with sample resources.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads `DATABASE_PATH` like the server does (`.env` is honoured).

use resource_manager::config::AppConfig;
use resource_manager::db;
use resource_manager::models::filter::ResourceFilter;
use resource_manager::models::page_window::PageWindow;
use resource_manager::models::resource::{CreateResource, Metadata, ResourceStatus};
use resource_manager::services::resource::ResourceService;

const CATEGORIES: [&str; 4] = ["tech", "design", "ops", "finance"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(dir)?;
    }
    let pool = db::create_pool(&config.database_url(), 1).await?;
    db::migrate(&pool).await?;

    println!("=== Resource Manager Seed Script ===");

    let service = ResourceService::new(pool);
    let existing = service.list(&ResourceFilter::default()).await?;
    if existing.pagination.total > 0 {
        println!("[skip] {} resources already present", existing.pagination.total);
        return Ok(());
    }

    for i in 1..=42 {
        let category = CATEGORIES[i % CATEGORIES.len()];
        let status = ResourceStatus::ALL[i % ResourceStatus::ALL.len()];
        let mut metadata = Metadata::new();
        metadata.insert("seed".to_string(), true.into());
        metadata.insert("index".to_string(), i.into());
        let input = CreateResource {
            name: format!("Sample {category} resource {i:02}"),
            description: (i % 3 != 0).then(|| format!("Seeded {category} item number {i}")),
            category: Some(category.to_string()),
            status: Some(status),
            metadata: Some(metadata),
        };
        service.create(&input).await?;
    }
    println!("[done] Created 42 resources");

    let first_page = service.list(&ResourceFilter::default()).await?;
    if let Some(window) = PageWindow::from_meta(&first_page.pagination) {
        println!(
            "[info] {} pages at default limit: {}",
            first_page.pagination.total_pages,
            serde_json::to_string(&window.entries)?
        );
    }

    println!("\n=== Seed complete! ===");
    Ok(())
}
