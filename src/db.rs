use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One statement per execute; the sqlite driver prepares each string as a
    // single statement.
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS client (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            surname TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS encheres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )
        "#,
        // sold_price / sold_to / sold_at are null while the lot is available
        // and all set once sold. Deleting the buying client nulls the
        // reference but keeps the recorded price and timestamp.
        r#"
        CREATE TABLE IF NOT EXISTS lots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            enchere_id INTEGER NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            starting_price REAL NOT NULL DEFAULT 0,
            sold_price REAL,
            sold_to INTEGER,
            sold_at TEXT,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            FOREIGN KEY (enchere_id) REFERENCES encheres(id) ON DELETE CASCADE,
            FOREIGN KEY (sold_to) REFERENCES client(id) ON DELETE SET NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_lots_enchere_id ON lots(enchere_id)",
        "CREATE INDEX IF NOT EXISTS idx_lots_sold_to ON lots(sold_to)",
        r#"
        CREATE TABLE IF NOT EXISTS images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lot_id INTEGER NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            file_path TEXT NOT NULL,
            file_size INTEGER NOT NULL DEFAULT 0,
            mime_type TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            FOREIGN KEY (lot_id) REFERENCES lots(id) ON DELETE CASCADE
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_images_lot_id ON images(lot_id)",
        // local_number is an integer so the roster orders numerically;
        // display padding happens at the DTO layer.
        r#"
        CREATE TABLE IF NOT EXISTS participation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            enchere_id INTEGER NOT NULL,
            client_id INTEGER NOT NULL,
            local_number INTEGER NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            registered_at TEXT NOT NULL,
            UNIQUE (enchere_id, client_id),
            FOREIGN KEY (enchere_id) REFERENCES encheres(id) ON DELETE CASCADE,
            FOREIGN KEY (client_id) REFERENCES client(id) ON DELETE CASCADE
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_participation_enchere_id ON participation(enchere_id)",
    ];

    for sql in statements {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_owned(),
        ))
        .await?;
    }

    Ok(())
}
