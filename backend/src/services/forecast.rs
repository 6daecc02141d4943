//! Forecast service: provider abstraction and refresh-ahead cache
//!
//! The cache stores aggregated daily summaries per location. A fresh entry is
//! served as is. A stale entry is still served while a single background task
//! refreshes it. A location with no entry yet is loaded once; concurrent
//! callers wait for that one load instead of each hitting the provider.

use async_trait::async_trait;
use shared::{aggregate_forecast, DailyForecastSummary, LocationKey, RawForecastSample};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::error::AppResult;

/// Source of raw forecast samples for a location
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fails with `DataUnavailable` when the forecast cannot be obtained
    async fn fetch(&self, location: &LocationKey) -> AppResult<Vec<RawForecastSample>>;
}

/// Aggregated forecast for a location
pub type ForecastSnapshot = Arc<Vec<DailyForecastSummary>>;

#[derive(Clone)]
struct CachedForecast {
    summaries: ForecastSnapshot,
    fetched_at: Instant,
}

/// Per-location cache slot
#[derive(Default)]
struct Slot {
    current: RwLock<Option<CachedForecast>>,
    /// Held for the duration of a cold load
    load_lock: Mutex<()>,
    refreshing: AtomicBool,
}

impl Slot {
    async fn snapshot(&self) -> Option<CachedForecast> {
        self.current.read().await.clone()
    }

    async fn store(&self, summaries: ForecastSnapshot) {
        *self.current.write().await = Some(CachedForecast {
            summaries,
            fetched_at: Instant::now(),
        });
    }
}

/// Refresh-ahead forecast cache
pub struct ForecastCache {
    provider: Arc<dyn ForecastProvider>,
    ttl: Duration,
    slots: Mutex<HashMap<LocationKey, Arc<Slot>>>,
}

impl ForecastCache {
    pub fn new(provider: Arc<dyn ForecastProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Daily summaries for a location
    pub async fn get(&self, location: &LocationKey) -> AppResult<ForecastSnapshot> {
        let slot = self.slot(location).await;

        if let Some(cached) = slot.snapshot().await {
            if cached.fetched_at.elapsed() >= self.ttl {
                self.spawn_refresh(location.clone(), slot.clone());
            }
            return Ok(cached.summaries);
        }

        let _guard = slot.load_lock.lock().await;
        // Another caller may have finished the load while we waited
        if let Some(cached) = slot.snapshot().await {
            return Ok(cached.summaries);
        }

        tracing::info!("Loading forecast for {}", location);
        match load_summaries(self.provider.as_ref(), location).await {
            Ok(summaries) => {
                slot.store(summaries.clone()).await;
                Ok(summaries)
            }
            Err(e) => {
                self.evict_empty(location, &slot).await;
                Err(e)
            }
        }
    }

    async fn slot(&self, location: &LocationKey) -> Arc<Slot> {
        let mut slots = self.slots.lock().await;
        slots.entry(location.clone()).or_default().clone()
    }

    /// Drop a slot that never held a value, so failed lookups leave no entry
    async fn evict_empty(&self, location: &LocationKey, slot: &Arc<Slot>) {
        let mut slots = self.slots.lock().await;
        let is_same_slot = slots
            .get(location)
            .is_some_and(|current| Arc::ptr_eq(current, slot));
        if is_same_slot && slot.current.read().await.is_none() {
            slots.remove(location);
        }
    }

    /// Start a background refresh unless one is already running for this slot
    fn spawn_refresh(&self, location: LocationKey, slot: Arc<Slot>) {
        if slot.refreshing.swap(true, Ordering::AcqRel) {
            return;
        }

        let provider = self.provider.clone();
        tokio::spawn(async move {
            match load_summaries(provider.as_ref(), &location).await {
                Ok(summaries) => {
                    slot.store(summaries).await;
                    tracing::debug!("Refreshed forecast for {}", location);
                }
                Err(e) => {
                    tracing::warn!(
                        "Forecast refresh for {} failed, serving previous value: {}",
                        location,
                        e
                    );
                }
            }
            slot.refreshing.store(false, Ordering::Release);
        });
    }
}

async fn load_summaries(
    provider: &dyn ForecastProvider,
    location: &LocationKey,
) -> AppResult<ForecastSnapshot> {
    let samples = provider.fetch(location).await?;
    Ok(Arc::new(aggregate_forecast(&samples)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn sample(day: u32) -> RawForecastSample {
        RawForecastSample {
            timestamp: NaiveDate::from_ymd_opt(2026, 7, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            temperature: Decimal::from(20),
            feels_like: Decimal::from(20),
            humidity_percent: 50,
            rainfall_last_3h_mm: None,
            wind_speed_mps: None,
            weather_description: "clear sky".to_string(),
            weather_icon: "01d".to_string(),
        }
    }

    /// Provider that counts calls, returns one more day per call and can be
    /// told to fail or to block until released
    #[derive(Default)]
    struct StubProvider {
        calls: AtomicUsize,
        fail_after_first: AtomicBool,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl ForecastProvider for StubProvider {
        async fn fetch(&self, _location: &LocationKey) -> AppResult<Vec<RawForecastSample>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call > 1 {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                if self.fail_after_first.load(Ordering::SeqCst) {
                    return Err(AppError::DataUnavailable("feed offline".to_string()));
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok((1..=call as u32).map(sample).collect())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ForecastProvider for FailingProvider {
        async fn fetch(&self, _location: &LocationKey) -> AppResult<Vec<RawForecastSample>> {
            Err(AppError::DataUnavailable("feed offline".to_string()))
        }
    }

    fn key() -> LocationKey {
        LocationKey::parse("bangkok").unwrap()
    }

    #[tokio::test]
    async fn test_concurrent_cold_loads_hit_provider_once() {
        let provider = Arc::new(StubProvider::default());
        let cache = Arc::new(ForecastCache::new(provider.clone(), Duration::from_secs(3600)));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.get(&key()).await }));
        }
        for handle in handles {
            let summaries = handle.await.unwrap().unwrap();
            assert_eq!(summaries.len(), 1);
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fresh_entry_is_served_from_cache() {
        let provider = Arc::new(StubProvider::default());
        let cache = ForecastCache::new(provider.clone(), Duration::from_secs(3600));

        cache.get(&key()).await.unwrap();
        cache.get(&key()).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_served_while_single_refresh_runs() {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(StubProvider {
            gate: Some(gate.clone()),
            ..StubProvider::default()
        });
        let cache = ForecastCache::new(provider.clone(), Duration::ZERO);

        assert_eq!(cache.get(&key()).await.unwrap().len(), 1);

        // Entry is immediately stale; every read serves the old value while
        // exactly one refresh is in flight
        for _ in 0..5 {
            assert_eq!(cache.get(&key()).await.unwrap().len(), 1);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(50)).await;
        let refreshed = cache.get(&key()).await.unwrap();
        assert_eq!(refreshed.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_value() {
        let provider = Arc::new(StubProvider::default());
        provider.fail_after_first.store(true, Ordering::SeqCst);
        let cache = ForecastCache::new(provider.clone(), Duration::ZERO);

        cache.get(&key()).await.unwrap();
        cache.get(&key()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let summaries = cache.get(&key()).await.unwrap();
        assert_eq!(summaries.len(), 1);
    }

    #[tokio::test]
    async fn test_cold_load_failure_propagates() {
        let cache = ForecastCache::new(Arc::new(FailingProvider), Duration::from_secs(60));
        let err = cache.get(&key()).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_failed_cold_loads_leave_no_slots() {
        let cache = ForecastCache::new(Arc::new(FailingProvider), Duration::from_secs(60));

        for i in 0..1000 {
            let location = LocationKey::parse(&format!("junk{}", i)).unwrap();
            assert!(cache.get(&location).await.is_err());
        }

        assert_eq!(cache.slots.lock().await.len(), 0);
    }
}
