//! Database initialization
//!
//! Opens (creating if needed) a SQLite database and ensures the `THESAURI`
//! table exists. Column length limits are enforced with CHECK constraints
//! so that the database rejects rows the normalizer should have truncated.

use crate::record::limits;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Open the database at `url` (e.g. `sqlite://thesauri.db`) and create tables
pub async fn init_database(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    let newly_created = if in_memory {
        true
    } else {
        let db_path = options.get_filename();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        !db_path.exists()
    };

    // Every connection to an in-memory database sees a different database,
    // so keep exactly one and never recycle it
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    let pool = pool_options.connect_with(options).await?;

    if newly_created {
        info!("Initialized new database: {}", url);
    } else {
        info!("Opened existing database: {}", url);
    }

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_thesauri_table(&pool).await?;

    Ok(pool)
}

/// Create the THESAURI table (idempotent)
pub async fn create_thesauri_table(pool: &SqlitePool) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS "THESAURI" (
            puri TEXT PRIMARY KEY CHECK (length(puri) <= {puri}),
            provenance TEXT NOT NULL CHECK (length(provenance) <= {provenance}),
            identifier TEXT NOT NULL CHECK (length(identifier) <= {identifier}),
            "label_NL" TEXT CHECK (length("label_NL") <= {label}),
            "label_FR" TEXT CHECK (length("label_FR") <= {label}),
            "label_EN" TEXT CHECK (length("label_EN") <= {label}),
            "scope_NL" TEXT CHECK (length("scope_NL") <= {scope}),
            "scope_FR" TEXT CHECK (length("scope_FR") <= {scope}),
            "scope_EN" TEXT CHECK (length("scope_EN") <= {scope}),
            modified_at TEXT,
            "AAT" TEXT CHECK (length("AAT") <= {xref}),
            "Wikidata" TEXT CHECK (length("Wikidata") <= {xref})
        )
        "#,
        puri = limits::PURI,
        provenance = limits::PROVENANCE,
        identifier = limits::IDENTIFIER,
        label = limits::LABEL,
        scope = limits::SCOPE,
        xref = limits::CROSS_REFERENCE,
    );

    sqlx::query(&sql).execute(pool).await?;

    Ok(())
}
