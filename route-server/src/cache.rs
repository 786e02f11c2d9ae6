//! Caching layer for route queries.
//!
//! The route network never changes after it is built, so a cached answer
//! is never stale. The TTL and capacity only bound memory use.
//!
//! A miss enumerates every (origin departure, destination vertex) pair and
//! walks a successor table for each, so it runs on the blocking pool.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{ClockTime, Route, StationId, Weighting};
use crate::planner::{DepartureFilter, RouteNetwork};

/// Cache key for route lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteQuery {
    /// Cheapest route under a weighting.
    Shortest {
        origin: StationId,
        destination: StationId,
        weighting: Weighting,
    },
    /// Cheapest layover-inclusive route leaving at a given time.
    Departing {
        origin: StationId,
        destination: StationId,
        filter: DepartureFilter,
    },
}

/// Cached route entry. `None` records that no route exists.
type RouteEntry = Option<Arc<Route>>;

/// A query could not be answered.
#[derive(Debug, thiserror::Error)]
#[error("route query did not complete: {0}")]
pub struct QueryError(#[from] tokio::task::JoinError);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self { ttl, max_capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 10_000,
        }
    }
}

/// Route network with cached query answers.
///
/// Wraps a shared `RouteNetwork`; uncached lookups go straight to it.
pub struct CachedRouteNetwork {
    network: Arc<RouteNetwork>,
    routes: MokaCache<RouteQuery, RouteEntry>,
    direct: MokaCache<(StationId, StationId), bool>,
}

impl CachedRouteNetwork {
    /// Create a new cached network.
    pub fn new(network: Arc<RouteNetwork>, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let direct = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            network,
            routes,
            direct,
        }
    }

    /// Cheapest route under `weighting`, using the cache if available.
    pub async fn shortest_route(
        &self,
        origin: StationId,
        destination: StationId,
        weighting: Weighting,
    ) -> Result<RouteEntry, QueryError> {
        self.route(RouteQuery::Shortest {
            origin,
            destination,
            weighting,
        })
        .await
    }

    /// Route leaving at `time`, accepting the twelve-hour-earlier reading.
    pub async fn route_at_time(
        &self,
        time: ClockTime,
        origin: StationId,
        destination: StationId,
    ) -> Result<RouteEntry, QueryError> {
        self.route_departing(DepartureFilter::EitherHalfDay(time), origin, destination)
            .await
    }

    /// Route whose first departure passes `filter`.
    pub async fn route_departing(
        &self,
        filter: DepartureFilter,
        origin: StationId,
        destination: StationId,
    ) -> Result<RouteEntry, QueryError> {
        self.route(RouteQuery::Departing {
            origin,
            destination,
            filter,
        })
        .await
    }

    /// Whether any route exists, sharing the layover-inclusive route cache.
    pub async fn path_exists(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<bool, QueryError> {
        Ok(self
            .shortest_route(origin, destination, Weighting::WithLayovers)
            .await?
            .is_some())
    }

    /// Whether a single trip connects the two stations.
    pub async fn direct_path_exists(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<bool, QueryError> {
        let key = (origin, destination);
        if let Some(cached) = self.direct.get(&key).await {
            return Ok(cached);
        }

        let exists = self
            .off_worker(move |network| network.direct_path_exists(origin, destination))
            .await?;
        self.direct.insert(key, exists).await;

        Ok(exists)
    }

    /// The uncached network, for lookups that need no caching.
    pub fn network(&self) -> &RouteNetwork {
        &self.network
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count() + self.direct.entry_count()
    }

    async fn route(&self, query: RouteQuery) -> Result<RouteEntry, QueryError> {
        if let Some(cached) = self.routes.get(&query).await {
            trace!(?query, "Route cache hit");
            return Ok(cached);
        }

        let entry = self
            .off_worker(move |network| match query {
                RouteQuery::Shortest {
                    origin,
                    destination,
                    weighting,
                } => network.shortest_route(origin, destination, weighting),
                RouteQuery::Departing {
                    origin,
                    destination,
                    filter,
                } => network.route_departing(filter, origin, destination),
            })
            .await?
            .map(Arc::new);

        self.routes.insert(query, entry.clone()).await;

        Ok(entry)
    }

    /// Run `work` against the network on the blocking pool.
    async fn off_worker<T, F>(&self, work: F) -> Result<T, QueryError>
    where
        F: FnOnce(&RouteNetwork) -> T + Send + 'static,
        T: Send + 'static,
    {
        let network = Arc::clone(&self.network);
        Ok(tokio::task::spawn_blocking(move || work(&network)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trip;
    use crate::planner::PlannerConfig;

    fn station(id: i64) -> StationId {
        StationId::new(id).unwrap()
    }

    fn time(hhmm: u32) -> ClockTime {
        ClockTime::from_hhmm(hhmm).unwrap()
    }

    fn trip(from: i64, to: i64, dep: u32, arr: u32) -> Trip {
        Trip::new(station(from), station(to), time(dep), time(arr)).unwrap()
    }

    fn cached() -> CachedRouteNetwork {
        let network = RouteNetwork::build(
            &[station(1), station(2), station(3)],
            &[
                trip(1, 2, 800, 830),
                trip(2, 3, 900, 930),
                trip(1, 3, 800, 1000),
            ],
            &PlannerConfig::default(),
        )
        .unwrap();
        CachedRouteNetwork::new(Arc::new(network), &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn cache_creation() {
        let cache = cached();
        assert_eq!(cache.entry_count(), 0);
        assert_eq!(cache.network().vertex_count(), 6);
    }

    #[tokio::test]
    async fn cached_answer_matches_network() {
        let cache = cached();

        let first = cache
            .shortest_route(station(1), station(3), Weighting::WithLayovers)
            .await
            .unwrap()
            .unwrap();
        let second = cache
            .shortest_route(station(1), station(3), Weighting::WithLayovers)
            .await
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            Some(first.as_ref()),
            cache
                .network()
                .shortest_route(station(1), station(3), Weighting::WithLayovers)
                .as_ref()
        );
    }

    #[tokio::test]
    async fn caches_missing_routes() {
        let cache = cached();

        assert!(
            cache
                .shortest_route(station(3), station(1), Weighting::RideOnly)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!cache.path_exists(station(3), station(1)).await.unwrap());

        cache.routes.run_pending_tasks().await;
        assert_eq!(cache.routes.entry_count(), 2);
    }

    #[tokio::test]
    async fn weightings_cached_separately() {
        let cache = cached();

        let with = cache
            .shortest_route(station(1), station(3), Weighting::WithLayovers)
            .await
            .unwrap()
            .unwrap();
        let ride = cache
            .shortest_route(station(1), station(3), Weighting::RideOnly)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(with.total_weight(Weighting::WithLayovers), 90);
        assert_eq!(ride.total_weight(Weighting::RideOnly), 60);
    }

    #[tokio::test]
    async fn timed_queries() {
        let cache = cached();

        assert!(
            cache
                .route_at_time(time(2000), station(1), station(3))
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            cache
                .route_departing(DepartureFilter::Exact(time(2000)), station(1), station(3))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn direct_paths() {
        let cache = cached();

        assert!(cache.direct_path_exists(station(1), station(3)).await.unwrap());
        assert!(!cache.direct_path_exists(station(2), station(1)).await.unwrap());
        assert!(cache.direct_path_exists(station(1), station(3)).await.unwrap());

        cache.direct.run_pending_tasks().await;
        assert_eq!(cache.direct.entry_count(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn misses_run_off_the_async_worker() {
        let cache = cached();
        let worker = std::thread::current().id();

        let ran_on = cache
            .off_worker(|_| std::thread::current().id())
            .await
            .unwrap();

        assert_ne!(ran_on, worker);
    }

    #[tokio::test]
    async fn failed_query_is_an_error() {
        let cache = cached();

        let err = cache
            .off_worker(|_| -> bool { panic!("query failed") })
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("route query did not complete"));
    }
}
