#![allow(dead_code)]

use traitquiz::db::Db;
use traitquiz::models::{NewQuestion, Options, Pool};

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("traitquiz_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());
    Db::new(&url).await.expect("failed to create test database")
}

pub fn new_question(prefix: &str, n: usize) -> NewQuestion {
    NewQuestion {
        question: format!("{prefix} question {n}"),
        options: Options {
            a: format!("{prefix}{n}-a"),
            b: format!("{prefix}{n}-b"),
            c: format!("{prefix}{n}-c"),
            d: format!("{prefix}{n}-d"),
        },
    }
}

/// Fill a pool with `count` questions, inserted in order.
pub async fn seed_pool(db: &Db, pool: Pool, count: usize) {
    let prefix = match pool {
        Pool::Classic => "c",
        Pool::Trait => "t",
    };
    for n in 1..=count {
        db.insert_question(pool, &new_question(prefix, n))
            .await
            .expect("insert question");
    }
}
