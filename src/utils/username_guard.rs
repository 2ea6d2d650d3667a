use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;
use std::time::Duration;

/// Two-tier username availability check in front of the users table:
/// a cuckoo filter answers "definitely free" without I/O, a moka cache
/// answers "definitely taken" for recently seen names, and only the
/// remaining maybes fall through to the database.

/// Tune these based on real account counts.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;
const CACHE_CAPACITY: u64 = 500_000;
const CACHE_TTL_SECS: u64 = 86_400; // 24h

static TAKEN_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

static TAKEN_CACHE: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(CACHE_CAPACITY)
        .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
        .build()
});

#[inline]
fn normalize(username: &str) -> String {
    username.to_lowercase()
}

/// Record a freshly registered username in both tiers.
pub async fn note_registered(username: &str) {
    let username = normalize(username);
    TAKEN_FILTER
        .write()
        .expect("username filter poisoned")
        .add(&username);
    TAKEN_CACHE.insert(username, true).await;
}

/// true  => username AVAILABLE
/// false => username TAKEN
pub async fn is_available(username: &str, pool: &MySqlPool) -> bool {
    let username = normalize(username);

    // 1. Cuckoo filter — a miss is a guaranteed free name.
    if !TAKEN_FILTER
        .read()
        .expect("username filter poisoned")
        .contains(&username)
    {
        return true;
    }

    // 2. Moka cache — a hit is a guaranteed taken name.
    if TAKEN_CACHE.get(&username).await.unwrap_or(false) {
        return false;
    }

    // 3. Database fallback for filter false-positives.
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? LIMIT 1)",
    )
    .bind(&username)
    .fetch_one(pool)
    .await
    .unwrap_or(true); // fail-safe: treat lookup failure as taken

    !exists
}

/// Warm both tiers at startup: every username goes into the filter, and
/// accounts active within `recent_days` also land in the cache, streamed
/// in batches so a large users table never sits in memory at once.
pub async fn warmup(pool: &MySqlPool, recent_days: u32, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>("SELECT username FROM users").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (username,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;
        batch.push(normalize(&username));
        total += 1;

        if batch.len() == batch_size {
            fill_filter(&batch);
            batch.clear();
        }
    }
    if !batch.is_empty() {
        fill_filter(&batch);
    }

    let mut recent = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT username
        FROM users
        WHERE last_login_at >= NOW() - INTERVAL ? DAY
        ORDER BY last_login_at DESC
        "#,
    )
    .bind(recent_days)
    .fetch(pool);

    let mut cached = 0usize;
    while let Some(row) = recent.next().await {
        let (username,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;
        TAKEN_CACHE.insert(normalize(&username), true).await;
        cached += 1;
    }

    log::info!(
        "Username guard warmup complete: {} users in filter, {} recent (last {} days) in cache",
        total,
        cached,
        recent_days
    );
    Ok(())
}

fn fill_filter(usernames: &[String]) {
    let mut filter = TAKEN_FILTER.write().expect("username filter poisoned");
    for username in usernames {
        filter.add(username);
    }
}
