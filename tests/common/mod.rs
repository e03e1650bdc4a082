//! Shared harness for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use ironpress::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// File-backed SQLite database, migrated on creation and deleted on drop.
///
/// The pool applies the crate's WAL pragmas, so a `-shm`/`-wal` sidecar pair
/// appears next to the database file; cleanup removes all three.
pub struct TestDb {
    path: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(path: &str) -> Self {
        remove_with_sidecars(path); // leftovers from an aborted run

        let pool = establish_connection_pool(path).expect("failed to open the test database");
        let mut conn = pool
            .get()
            .expect("failed to check a connection out of the pool");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("migrations failed");

        TestDb {
            path: path.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        remove_with_sidecars(&self.path);
    }
}

fn remove_with_sidecars(path: &str) {
    std::fs::remove_file(path).ok();
    std::fs::remove_file(format!("{path}-shm")).ok();
    std::fs::remove_file(format!("{path}-wal")).ok();
}
