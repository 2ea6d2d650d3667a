use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per (staff, year, month) bucket. Summary recomputes and
/// payslip upserts hold the bucket's lock across their read-compute-write
/// cycle so concurrent requests for the same period cannot lose updates;
/// different buckets proceed in parallel.
static PERIOD_LOCKS: Lazy<DashMap<(u64, i32, u32), Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

pub async fn lock_period(staff_id: u64, year: i32, month: u32) -> OwnedMutexGuard<()> {
    let lock = PERIOD_LOCKS
        .entry((staff_id, year, month))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone();
    lock.lock_owned().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_period_is_mutually_exclusive() {
        let guard = lock_period(7, 2026, 2).await;

        let contended = PERIOD_LOCKS.get(&(7, 2026, 2)).unwrap().clone();
        assert!(contended.try_lock().is_err());

        drop(guard);
        assert!(contended.try_lock().is_ok());
    }

    #[tokio::test]
    async fn different_periods_do_not_contend() {
        let _january = lock_period(8, 2026, 1).await;
        let _february = lock_period(8, 2026, 2).await;
        let _other_staff = lock_period(9, 2026, 1).await;
    }
}
