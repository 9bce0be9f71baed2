//! Schema migrations for the blog database.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_posts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_posts_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectionTrait, Database, DatabaseBackend, Statement};

    fn sql(raw: &str) -> Statement {
        Statement::from_string(DatabaseBackend::Sqlite, raw)
    }

    #[tokio::test]
    async fn test_up_and_down() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let manager = SchemaManager::new(&db);

        Migrator::up(&db, None).await.unwrap();
        assert!(manager.has_table("users").await.unwrap());
        assert!(manager.has_table("posts").await.unwrap());

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("posts").await.unwrap());
        assert!(!manager.has_table("users").await.unwrap());
    }

    #[tokio::test]
    async fn test_status_column_only_accepts_known_codes() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        db.execute(sql(
            "INSERT INTO users (id, username, email, created_at, updated_at) \
             VALUES ('u1', 'alice', 'alice@example.com', '2024-01-01', '2024-01-01')",
        ))
        .await
        .unwrap();

        let insert = |id: &str, status: &str| {
            sql(&format!(
                "INSERT INTO posts (id, title, slug, author_id, body, publish, created, updated, status) \
                 VALUES ('{id}', 'Hello', 'hello', 'u1', 'Body', '2024-01-01', '2024-01-01', '2024-01-01', '{status}')"
            ))
        };

        assert!(db.execute(insert("p1", "XX")).await.is_err());
        assert!(db.execute(insert("p2", "PB")).await.is_ok());
        assert!(db.execute(insert("p3", "DF")).await.is_ok());
    }
}
