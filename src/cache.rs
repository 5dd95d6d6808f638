// src/cache.rs

//! Staleness-aware project cache with a background refresh sweep.
//!
//! Holds the authoritative in-process view of all known events. On-demand
//! reads are served from memory while fresh; stale entries trigger a
//! blocking re-fetch whose result is merged by project id. A background
//! sweep opportunistically refreshes stale entries, at most one per tick,
//! skipping events nobody has requested in a while.
//!
//! Concurrency discipline: one lock guards the event map, and fetches
//! always happen outside it. Two concurrent requests for the same stale
//! entry may both fetch; the merge is idempotent and last-writer-wins on
//! `last_refresh`, so the race is wasteful but safe.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::CacheConfig;
use crate::devpost::ProjectSource;
use crate::error::{Error, Result};
use crate::models::{Event, Project};

/// Version of the persisted snapshot document. Unknown versions are
/// rejected at load rather than guessed at.
pub(crate) const SNAPSHOT_VERSION: u32 = 1;

/// Persisted form of the whole event map.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub version: u32,
    pub events: HashMap<String, Event>,
}

/// Result of an on-demand listing read.
///
/// When a refresh fails but prior data exists, the stale projects are
/// returned and the failure is kept observable in `refresh_error`.
#[derive(Debug)]
pub struct FetchOutcome {
    pub projects: Vec<Project>,
    pub refresh_error: Option<Error>,
}

/// Staleness-aware cache over a [`ProjectSource`].
pub struct ProjectCache {
    inner: Arc<CacheInner>,
    shutdown: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

struct CacheInner {
    source: Box<dyn ProjectSource>,
    freshness: TimeDelta,
    auto_refresh: TimeDelta,
    inactivity_cutoff: TimeDelta,
    snapshot_path: PathBuf,
    events: Mutex<HashMap<String, Event>>,
}

/// One refresh decision of the background sweep.
enum SweepAction {
    Listing(String),
    Detail(Project),
}

impl ProjectCache {
    /// Create a cache from configuration, load the persisted snapshot and
    /// start the background sweep.
    pub async fn new(source: Box<dyn ProjectSource>, config: &CacheConfig) -> Result<Self> {
        Self::with_durations(
            source,
            config.freshness(),
            config.auto_refresh(),
            config.inactivity_cutoff(),
            config.sweep_tick(),
            &config.snapshot_path,
        )
        .await
    }

    /// Create a cache with explicit durations.
    ///
    /// Fails fast when `freshness <= auto_refresh`: every on-demand read
    /// would otherwise race a needless fetch against the sweep.
    pub async fn with_durations(
        source: Box<dyn ProjectSource>,
        freshness: Duration,
        auto_refresh: Duration,
        inactivity_cutoff: Duration,
        sweep_tick: Duration,
        snapshot_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        if freshness <= auto_refresh {
            return Err(Error::config(
                "freshness must be greater than auto_refresh",
            ));
        }
        if sweep_tick.is_zero() {
            return Err(Error::config("sweep_tick must be > 0"));
        }
        let snapshot_path = snapshot_path.into();
        let events = load_snapshot(&snapshot_path).await?;
        let inner = Arc::new(CacheInner {
            source,
            freshness: to_delta(freshness)?,
            auto_refresh: to_delta(auto_refresh)?,
            inactivity_cutoff: to_delta(inactivity_cutoff)?,
            snapshot_path,
            events: Mutex::new(events),
        });
        let (shutdown, rx) = watch::channel(false);
        let sweeper = tokio::spawn(sweep_loop(Arc::clone(&inner), rx, sweep_tick));
        Ok(Self {
            inner,
            shutdown,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// All projects of an event, from cache when fresh, re-fetched and
    /// merged otherwise.
    pub async fn fetch_projects(&self, event_id: &str) -> Result<FetchOutcome> {
        let prior = {
            let now = Utc::now();
            let mut events = self.inner.events.lock().await;
            match events.get_mut(event_id) {
                Some(event) => {
                    event.last_requested = Some(now);
                    if !is_stale(event.last_refresh, self.inner.freshness, now) {
                        return Ok(FetchOutcome {
                            projects: event.projects.clone(),
                            refresh_error: None,
                        });
                    }
                    Some(event.projects.clone())
                }
                None => None,
            }
        };
        match self.inner.refresh_listing(event_id).await {
            Ok(projects) => Ok(FetchOutcome {
                projects,
                refresh_error: None,
            }),
            Err(err) => match prior {
                // Stale data beats no data; the error stays observable.
                Some(projects) => {
                    log::warn!("refresh of {event_id} failed, serving stale data: {err}");
                    Ok(FetchOutcome {
                        projects,
                        refresh_error: Some(err),
                    })
                }
                None => Err(err),
            },
        }
    }

    /// Refresh a single project's detail fields in place. No-op while the
    /// project is fresher than the freshness threshold.
    pub async fn fetch_project(&self, project: &mut Project) -> Result<()> {
        if !is_stale(project.last_refresh, self.inner.freshness, Utc::now()) {
            return Ok(());
        }
        self.inner.refresh_detail(project).await
    }

    /// Stop the background sweep and persist the snapshot.
    pub async fn close(&self) -> Result<()> {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.sweeper.lock().await.take() {
            let _ = handle.await;
        }
        self.inner.save_snapshot().await
    }
}

impl CacheInner {
    /// Fetch a full listing and merge it into the map. Structural fields
    /// from the new listing win; detail-only fields are carried forward for
    /// project ids already known.
    async fn refresh_listing(&self, event_id: &str) -> Result<Vec<Project>> {
        let mut projects = self.source.fetch_projects(event_id).await?;
        let now = Utc::now();
        let mut events = self.events.lock().await;
        match events.get_mut(event_id) {
            Some(event) => {
                let old: HashMap<String, Project> = event
                    .projects
                    .drain(..)
                    .map(|p| (p.id.clone(), p))
                    .collect();
                for project in &mut projects {
                    if let Some(prev) = old.get(&project.id) {
                        project.description = prev.description.clone();
                        project.description_md = prev.description_md.clone();
                        project.tags = prev.tags.clone();
                        project.last_refresh = prev.last_refresh;
                    }
                }
                event.projects = projects.clone();
                event.last_refresh = Some(now);
            }
            None => {
                // The very first fetch for an id is inherently
                // request-driven, so stamp last_requested at creation.
                events.insert(
                    event_id.to_string(),
                    Event {
                        id: event_id.to_string(),
                        projects: projects.clone(),
                        last_refresh: Some(now),
                        last_requested: Some(now),
                    },
                );
            }
        }
        Ok(projects)
    }

    /// Fetch a project's detail page and write the refreshed project back
    /// into its owning event entry.
    async fn refresh_detail(&self, project: &mut Project) -> Result<()> {
        self.source.fetch_project(project).await?;
        project.last_refresh = Some(Utc::now());
        let mut events = self.events.lock().await;
        for event in events.values_mut() {
            if let Some(slot) = event.projects.iter_mut().find(|p| p.id == project.id) {
                *slot = project.clone();
                break;
            }
        }
        Ok(())
    }

    /// Choose at most one refresh action for this sweep tick.
    ///
    /// Events not requested since the inactivity cutoff are starved
    /// entirely; among the rest, a stale event listing takes priority over
    /// any stale contained project.
    fn pick_action(&self, events: &HashMap<String, Event>) -> Option<SweepAction> {
        let now = Utc::now();
        for (id, event) in events {
            if let Some(requested) = event.last_requested {
                if now - requested > self.inactivity_cutoff {
                    continue;
                }
            }
            if is_stale(event.last_refresh, self.auto_refresh, now) {
                return Some(SweepAction::Listing(id.clone()));
            }
            if let Some(project) = event
                .projects
                .iter()
                .find(|p| is_stale(p.last_refresh, self.auto_refresh, now))
            {
                return Some(SweepAction::Detail(project.clone()));
            }
        }
        None
    }

    /// Execute one sweep action, logging failures and leaving them for the
    /// next tick.
    async fn run_action(&self, action: SweepAction) {
        match action {
            SweepAction::Listing(event_id) => {
                log::info!("auto-refreshing event {event_id}");
                if let Err(e) = self.refresh_listing(&event_id).await {
                    log::warn!("auto-refresh of event {event_id} failed: {e}");
                }
            }
            SweepAction::Detail(mut project) => {
                log::info!("auto-refreshing project {}", project.id);
                if let Err(e) = self.refresh_detail(&mut project).await {
                    log::warn!("auto-refresh of project {} failed: {}", project.id, e);
                }
            }
        }
    }

    /// Write the snapshot atomically (temp file, then rename).
    async fn save_snapshot(&self) -> Result<()> {
        let snapshot = {
            let events = self.events.lock().await;
            Snapshot {
                version: SNAPSHOT_VERSION,
                events: events.clone(),
            }
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        if let Some(parent) = self.snapshot_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.snapshot_path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.snapshot_path).await?;
        log::info!(
            "saved cache snapshot with {} events to {}",
            snapshot.events.len(),
            self.snapshot_path.display()
        );
        Ok(())
    }
}

/// Background sweep: ticks on a fixed short interval, checks for shutdown
/// every tick and performs at most one refresh action per tick.
async fn sweep_loop(
    inner: Arc<CacheInner>,
    mut shutdown: watch::Receiver<bool>,
    tick: Duration,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = shutdown.changed() => return,
            _ = ticker.tick() => {}
        }
        let action = {
            let events = inner.events.lock().await;
            inner.pick_action(&events)
        };
        let Some(action) = action else { continue };
        // Abandon the in-flight fetch cooperatively at shutdown.
        tokio::select! {
            _ = shutdown.changed() => return,
            _ = inner.run_action(action) => {}
        }
    }
}

/// Load the persisted map. A missing file is an empty cache; a decode
/// failure or unknown version is fatal.
async fn load_snapshot(path: &Path) -> Result<HashMap<String, Event>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no cache snapshot at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => return Err(e.into()),
    };
    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::config(format!(
            "unsupported cache snapshot version {}",
            snapshot.version
        )));
    }
    log::info!(
        "loaded cache snapshot with {} events from {}",
        snapshot.events.len(),
        path.display()
    );
    Ok(snapshot.events)
}

fn to_delta(d: Duration) -> Result<TimeDelta> {
    TimeDelta::from_std(d).map_err(|_| Error::config("duration out of range"))
}

fn is_stale(ts: Option<DateTime<Utc>>, window: TimeDelta, now: DateTime<Utc>) -> bool {
    match ts {
        None => true,
        Some(t) => now - t > window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct MockSource {
        listing: StdMutex<Vec<Project>>,
        fail_listing: AtomicBool,
        listing_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    impl MockSource {
        fn new(listing: Vec<Project>) -> Arc<Self> {
            Arc::new(Self {
                listing: StdMutex::new(listing),
                fail_listing: AtomicBool::new(false),
                listing_calls: AtomicUsize::new(0),
                detail_calls: AtomicUsize::new(0),
            })
        }

        fn listing_calls(&self) -> usize {
            self.listing_calls.load(Ordering::SeqCst)
        }

        fn detail_calls(&self) -> usize {
            self.detail_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ProjectSource for Arc<MockSource> {
        async fn fetch_projects(&self, _event_id: &str) -> Result<Vec<Project>> {
            self.listing_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(Error::status(500, b"boom"));
            }
            Ok(self.listing.lock().unwrap().clone())
        }

        async fn fetch_project(&self, project: &mut Project) -> Result<()> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            project.description = "detail".to_string();
            project.description_md = "**detail**".to_string();
            project.tags = vec!["rust".to_string()];
            Ok(())
        }
    }

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            ..Project::default()
        }
    }

    /// Cache with a sweep tick long enough to never fire during a test.
    async fn quiet_cache(
        source: Arc<MockSource>,
        freshness: Duration,
        path: &Path,
    ) -> ProjectCache {
        ProjectCache::with_durations(
            Box::new(source),
            freshness,
            freshness / 2,
            Duration::from_secs(4 * 3600),
            Duration::from_secs(3600),
            path,
        )
        .await
        .unwrap()
    }

    fn snapshot_with(path: &Path, events: Vec<Event>) {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            events: events.into_iter().map(|e| (e.id.clone(), e)).collect(),
        };
        std::fs::write(path, serde_json::to_vec(&snapshot).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn rejects_freshness_not_above_auto_refresh() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![]);
        let result = ProjectCache::with_durations(
            Box::new(source),
            Duration::from_secs(5),
            Duration::from_secs(5),
            Duration::from_secs(3600),
            Duration::from_secs(1),
            tmp.path().join("cache.json"),
        )
        .await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn fresh_read_performs_no_fetch() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![project("1")]);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_secs(60),
            &tmp.path().join("cache.json"),
        )
        .await;

        let first = cache.fetch_projects("demo").await.unwrap();
        assert_eq!(first.projects.len(), 1);
        assert!(first.refresh_error.is_none());
        assert_eq!(source.listing_calls(), 1);

        let second = cache.fetch_projects("demo").await.unwrap();
        assert_eq!(second.projects.len(), 1);
        assert_eq!(source.listing_calls(), 1, "fresh read must not fetch");
    }

    #[tokio::test]
    async fn stale_read_performs_exactly_one_fetch() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![project("1")]);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_millis(100),
            &tmp.path().join("cache.json"),
        )
        .await;

        cache.fetch_projects("demo").await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        cache.fetch_projects("demo").await.unwrap();
        assert_eq!(source.listing_calls(), 2);
    }

    #[tokio::test]
    async fn merge_carries_detail_fields_forward() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![project("1"), project("2")]);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_millis(100),
            &tmp.path().join("cache.json"),
        )
        .await;

        let outcome = cache.fetch_projects("demo").await.unwrap();
        let mut p = outcome.projects[0].clone();
        cache.fetch_project(&mut p).await.unwrap();
        assert_eq!(p.description, "detail");
        assert_eq!(source.detail_calls(), 1);

        // A second, identical listing fetch must not wipe the detail fields.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let outcome = cache.fetch_projects("demo").await.unwrap();
        let merged = outcome.projects.iter().find(|p| p.id == "1").unwrap();
        assert_eq!(merged.description, "detail");
        assert_eq!(merged.description_md, "**detail**");
        assert_eq!(merged.tags, vec!["rust"]);
        assert!(merged.last_refresh.is_some());
        let untouched = outcome.projects.iter().find(|p| p.id == "2").unwrap();
        assert_eq!(untouched.description, "");
    }

    #[tokio::test]
    async fn detail_refresh_is_noop_while_fresh() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![project("1")]);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_secs(60),
            &tmp.path().join("cache.json"),
        )
        .await;

        let mut p = project("1");
        p.last_refresh = Some(Utc::now());
        cache.fetch_project(&mut p).await.unwrap();
        assert_eq!(source.detail_calls(), 0);
    }

    #[tokio::test]
    async fn stale_read_on_error_returns_prior_data() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![project("1")]);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_millis(100),
            &tmp.path().join("cache.json"),
        )
        .await;

        cache.fetch_projects("demo").await.unwrap();
        source.fail_listing.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(200)).await;

        let outcome = cache.fetch_projects("demo").await.unwrap();
        assert_eq!(outcome.projects.len(), 1, "stale data beats no data");
        assert!(matches!(
            outcome.refresh_error,
            Some(Error::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn error_without_prior_data_propagates() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![]);
        source.fail_listing.store(true, Ordering::SeqCst);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_secs(60),
            &tmp.path().join("cache.json"),
        )
        .await;

        let err = cache.fetch_projects("demo").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn first_fetch_stamps_last_requested() {
        let tmp = TempDir::new().unwrap();
        let source = MockSource::new(vec![project("1")]);
        let cache = quiet_cache(
            Arc::clone(&source),
            Duration::from_secs(60),
            &tmp.path().join("cache.json"),
        )
        .await;

        cache.fetch_projects("demo").await.unwrap();
        let events = cache.inner.events.lock().await;
        assert!(events["demo"].last_requested.is_some());
    }

    #[tokio::test]
    async fn snapshot_round_trips_across_restart() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");

        let source = MockSource::new(vec![project("1")]);
        let cache = quiet_cache(Arc::clone(&source), Duration::from_secs(60), &path).await;
        cache.fetch_projects("demo").await.unwrap();
        cache.close().await.unwrap();
        assert!(path.exists());

        // A second cache over the same file serves the entry without I/O.
        let source2 = MockSource::new(vec![]);
        let cache2 = quiet_cache(Arc::clone(&source2), Duration::from_secs(60), &path).await;
        let outcome = cache2.fetch_projects("demo").await.unwrap();
        assert_eq!(outcome.projects.len(), 1);
        assert_eq!(source2.listing_calls(), 0);
    }

    #[tokio::test]
    async fn unknown_snapshot_version_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");
        std::fs::write(&path, r#"{"version": 99, "events": {}}"#).unwrap();

        let source = MockSource::new(vec![]);
        let result = quiet_cache_result(source, &path).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");
        std::fs::write(&path, "not json at all").unwrap();

        let source = MockSource::new(vec![]);
        let result = quiet_cache_result(source, &path).await;
        assert!(matches!(result, Err(Error::Json(_))));
    }

    async fn quiet_cache_result(
        source: Arc<MockSource>,
        path: &Path,
    ) -> Result<ProjectCache> {
        ProjectCache::with_durations(
            Box::new(source),
            Duration::from_secs(60),
            Duration::from_secs(30),
            Duration::from_secs(4 * 3600),
            Duration::from_secs(3600),
            path,
        )
        .await
    }

    /// Cache wired for sweep tests: fast tick, small auto-refresh window.
    async fn sweeping_cache(
        source: Arc<MockSource>,
        inactivity_cutoff: Duration,
        path: &Path,
    ) -> ProjectCache {
        ProjectCache::with_durations(
            Box::new(source),
            Duration::from_secs(30),
            Duration::from_millis(50),
            inactivity_cutoff,
            Duration::from_millis(20),
            path,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn sweep_refreshes_stale_event() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");
        snapshot_with(
            &path,
            vec![Event {
                id: "demo".to_string(),
                projects: vec![],
                last_refresh: Some(Utc::now() - TimeDelta::hours(1)),
                last_requested: None,
            }],
        );

        let source = MockSource::new(vec![project("1")]);
        let cache = sweeping_cache(Arc::clone(&source), Duration::from_secs(3600), &path).await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(source.listing_calls() >= 1, "sweep must refresh the event");
        let events = cache.inner.events.lock().await;
        assert_eq!(events["demo"].projects.len(), 1);
    }

    #[tokio::test]
    async fn sweep_refreshes_stale_project_detail() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");
        snapshot_with(
            &path,
            vec![Event {
                id: "demo".to_string(),
                // Event itself is fresh; only the project's detail is stale.
                projects: vec![project("1")],
                last_refresh: Some(Utc::now()),
                last_requested: Some(Utc::now()),
            }],
        );

        let source = MockSource::new(vec![]);
        let cache = sweeping_cache(Arc::clone(&source), Duration::from_secs(3600), &path).await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(source.detail_calls() >= 1, "sweep must refresh the detail");
        let events = cache.inner.events.lock().await;
        assert_eq!(events["demo"].projects[0].description, "detail");
    }

    #[tokio::test]
    async fn sweep_starves_inactive_events() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");
        snapshot_with(
            &path,
            vec![Event {
                id: "forgotten".to_string(),
                projects: vec![],
                // Maximally stale, but nobody has asked in a long time.
                last_refresh: None,
                last_requested: Some(Utc::now() - TimeDelta::hours(10)),
            }],
        );

        let source = MockSource::new(vec![project("1")]);
        let _cache = sweeping_cache(Arc::clone(&source), Duration::from_secs(3600), &path).await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(source.listing_calls(), 0);
        assert_eq!(source.detail_calls(), 0);
    }

    #[tokio::test]
    async fn close_stops_the_sweep() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.json");
        snapshot_with(
            &path,
            vec![Event {
                id: "demo".to_string(),
                projects: vec![],
                last_refresh: None,
                last_requested: None,
            }],
        );

        let source = MockSource::new(vec![project("1")]);
        let cache = sweeping_cache(Arc::clone(&source), Duration::from_secs(3600), &path).await;
        cache.close().await.unwrap();

        let after_close = source.listing_calls();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(source.listing_calls(), after_close);
    }
}
