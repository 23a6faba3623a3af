/// Batched timestamp utility.
///
/// Every date in the system (account creation, auction start/end, bid and
/// comment dates) is a u64 nanosecond count since the Unix epoch. Under
/// load each request needs several timestamps, so the system call is only
/// made every `UPDATE_INTERVAL` reads and a cached value is served in
/// between.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Cached timestamp shared by all threads.
static TIMESTAMP_CACHE: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static UPDATE_COUNTER: std::cell::Cell<u32> = std::cell::Cell::new(0);
}

/// How many reads are served from the cache between system calls.
const UPDATE_INTERVAL: u32 = 100;

pub const NANOS_PER_SEC: u64 = 1_000_000_000;
pub const NANOS_PER_DAY: u64 = 86_400 * NANOS_PER_SEC;

/// Returns the current time in nanoseconds since the Unix epoch, refreshed
/// at most every `UPDATE_INTERVAL` calls per thread.
///
/// Auction dates only need second-level accuracy, so the staleness window
/// is irrelevant here; use [`get_precise_timestamp`] where it is not.
#[inline]
pub fn get_fast_timestamp() -> u64 {
    UPDATE_COUNTER.with(|counter| {
        let count = counter.get();
        let cached = TIMESTAMP_CACHE.load(Ordering::Relaxed);

        // A cold cache (process start) must not serve zero.
        if count >= UPDATE_INTERVAL || cached == 0 {
            let new_ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64;

            TIMESTAMP_CACHE.store(new_ts, Ordering::Relaxed);
            counter.set(0);
            new_ts
        } else {
            counter.set(count + 1);
            cached
        }
    })
}

/// Uncached timestamp, one system call per invocation.
#[inline]
pub fn get_precise_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Forces the cache to refresh, e.g. after a long idle stretch.
pub fn force_update_timestamp() {
    let new_ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;

    TIMESTAMP_CACHE.store(new_ts, Ordering::Release);

    UPDATE_COUNTER.with(|counter| {
        counter.set(0);
    });
}
