//! Dashboard session
//!
//! Holds everything a session shows (the main snapshot, pinned locations,
//! the auxiliary cities, the loading flag, the error message and the
//! appearance) and runs the flows that change it. Every main flow takes a
//! request token; a response that is no longer the latest issued is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::appearance::{Appearance, ThemeMode};
use crate::config::DashboardConfig;
use crate::geolocation::{ConfiguredGeolocation, GeolocationProvider};
use crate::location_resolver::{LocationParser, LocationQuery, LocationResolver};
use crate::models::WeatherSnapshot;
use crate::pins::PinnedSet;
use crate::view_model::{self, DashboardView, ViewSettings, WeatherCardView};
use crate::weather::{self, OpenMeteoClient};
use crate::{DashboardError, Result};

/// Identifies one run of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out increasing tokens and remembers the latest one
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

/// Result of one auxiliary city fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CityOutcome {
    Ready(WeatherSnapshot),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityWeather {
    pub query: String,
    pub outcome: CityOutcome,
}

impl CityWeather {
    #[must_use]
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.outcome {
            CityOutcome::Ready(s) => Some(s),
            CityOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub main: Option<WeatherSnapshot>,
    pub pinned: PinnedSet,
    pub others: Vec<CityWeather>,
    pub loading: bool,
    /// User-facing message of the last failed flow
    pub error: Option<String>,
    pub appearance: Appearance,
}

/// What happened to a main flow's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The snapshot replaced the main location
    Applied,
    /// The flow failed and its message is in the state
    Failed,
    /// A newer flow was started; the response was dropped
    Stale,
}

/// One auxiliary city as presented
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CityCardView {
    pub query: String,
    pub card: Option<WeatherCardView>,
    pub error: Option<String>,
}

/// The whole page, ready for a renderer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub heading: String,
    pub loading: bool,
    pub error: Option<String>,
    pub appearance: Appearance,
    pub main: Option<DashboardView>,
    pub pinned: Vec<WeatherCardView>,
    pub others: Vec<CityCardView>,
}

pub struct Dashboard {
    config: DashboardConfig,
    client: OpenMeteoClient,
    geolocation: Arc<dyn GeolocationProvider>,
    state: RwLock<DashboardState>,
    main_requests: RequestSequencer,
    city_requests: RequestSequencer,
}

impl Dashboard {
    /// Build a session using the position from the configuration as geolocation
    pub fn from_config(config: DashboardConfig) -> Result<Self> {
        let geolocation = Arc::new(ConfiguredGeolocation::from_config(&config.geolocation));
        Self::new(config, geolocation)
    }

    pub fn new(config: DashboardConfig, geolocation: Arc<dyn GeolocationProvider>) -> Result<Self> {
        let client = OpenMeteoClient::new(&config.api)?;
        let state = DashboardState {
            appearance: config.appearance,
            ..DashboardState::default()
        };
        Ok(Self {
            config,
            client,
            geolocation,
            state: RwLock::new(state),
            main_requests: RequestSequencer::new(),
            city_requests: RequestSequencer::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Copy of the current session state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Cold start: show the deep-linked place, or the user's position, and
    /// fetch the auxiliary cities alongside.
    pub async fn start(&self, query: Option<LocationQuery>) -> FlowOutcome {
        let main = async {
            match query {
                Some(query) => self.show(query).await,
                None => self.locate().await,
            }
        };
        let (outcome, _) = tokio::join!(main, self.refresh_other_cities());
        outcome
    }

    /// Search submit: a place name or a `lat,lon` pair
    pub async fn search(&self, input: &str) -> FlowOutcome {
        match LocationParser::parse(input) {
            Ok(query) => self.show(query).await,
            Err(e) => {
                let token = self.begin().await;
                self.finish(token, Err(e)).await
            }
        }
    }

    /// Resolve and fetch `query`, replacing the main location
    pub async fn show(&self, query: LocationQuery) -> FlowOutcome {
        let token = self.begin().await;
        let result = self.load(&query).await;
        self.finish(token, result).await
    }

    /// Show the user's position; when it cannot be determined, the default city
    pub async fn locate(&self) -> FlowOutcome {
        let token = self.begin().await;
        let query = match self.geolocation.current_position().await {
            Ok(position) => LocationQuery::Coordinates(position),
            Err(e) => {
                warn!(
                    "Geolocation failed: {}, falling back to {}",
                    e, self.config.defaults.default_city
                );
                LocationQuery::Text(self.config.defaults.default_city.clone())
            }
        };
        let result = self.load(&query).await;
        self.finish(token, result).await
    }

    /// Fetch every auxiliary city concurrently; each keeps its own result.
    /// Returns how many succeeded.
    pub async fn refresh_other_cities(&self) -> usize {
        let token = self.city_requests.issue();
        let cities = &self.config.defaults.other_cities;
        info!("Refreshing {} other cities", cities.len());

        let results = join_all(cities.iter().map(|city| async move {
            let outcome = match self.load(&LocationQuery::Text(city.clone())).await {
                Ok(snapshot) => CityOutcome::Ready(snapshot),
                Err(e) => {
                    warn!("Failed to load {}: {}", city, e);
                    CityOutcome::Failed {
                        message: e.user_message(),
                    }
                }
            };
            CityWeather {
                query: city.clone(),
                outcome,
            }
        }))
        .await;

        let ready = results.iter().filter(|c| c.snapshot().is_some()).count();
        let mut state = self.state.write().await;
        if self.city_requests.is_latest(token) {
            state.others = results;
        } else {
            debug!("Dropping stale city refresh {:?}", token);
        }
        ready
    }

    /// Pin the main snapshot. Returns whether the pinned set changed.
    pub async fn pin_current(&self) -> Result<bool> {
        let mut state = self.state.write().await;
        let snapshot = state
            .main
            .clone()
            .ok_or_else(|| DashboardError::validation("No location loaded to pin"))?;
        let name = snapshot.location.name.clone();
        let added = state.pinned.pin(snapshot);
        info!("Pin {}: {}", name, if added { "added" } else { "already pinned" });
        Ok(added)
    }

    pub async fn unpin(&self, name: &str) -> usize {
        let removed = self.state.write().await.pinned.unpin(name);
        info!("Unpinned {} entries named {}", removed, name);
        removed
    }

    pub async fn toggle_theme(&self) -> ThemeMode {
        self.state.write().await.appearance.toggle_theme()
    }

    /// Assemble the page for the current state
    pub async fn page(&self) -> PageView {
        let state = self.state.read().await;
        let settings = self.view_settings(&state.appearance);

        PageView {
            heading: view_model::heading(state.main.as_ref()),
            loading: state.loading,
            error: state.error.clone(),
            appearance: state.appearance,
            main: state
                .main
                .as_ref()
                .map(|s| DashboardView::build(s, &settings)),
            pinned: state
                .pinned
                .iter()
                .map(|s| WeatherCardView::build(s, settings.code_style))
                .collect(),
            others: state
                .others
                .iter()
                .map(|city| CityCardView {
                    query: city.query.clone(),
                    card: city
                        .snapshot()
                        .map(|s| WeatherCardView::build(s, settings.code_style)),
                    error: match &city.outcome {
                        CityOutcome::Failed { message } => Some(message.clone()),
                        CityOutcome::Ready(_) => None,
                    },
                })
                .collect(),
        }
    }

    fn view_settings(&self, appearance: &Appearance) -> ViewSettings {
        self.config.view.settings(appearance.code_style)
    }

    #[instrument(skip(self))]
    async fn load(&self, query: &LocationQuery) -> Result<WeatherSnapshot> {
        let location = LocationResolver::new(&self.client)
            .with_reverse_geocode(self.config.defaults.reverse_geocode)
            .resolve(query)
            .await?;
        weather::fetch_forecast(&self.client, &location).await
    }

    async fn begin(&self) -> RequestToken {
        // issued under the guard so tokens follow the order state is touched
        let mut state = self.state.write().await;
        let token = self.main_requests.issue();
        state.loading = true;
        state.error = None;
        debug!("Started main flow {:?}", token);
        token
    }

    async fn finish(&self, token: RequestToken, result: Result<WeatherSnapshot>) -> FlowOutcome {
        let mut state = self.state.write().await;
        if !self.main_requests.is_latest(token) {
            debug!("Dropping stale response for {:?}", token);
            return FlowOutcome::Stale;
        }

        state.loading = false;
        match result {
            Ok(snapshot) => {
                info!("Showing weather for {}", snapshot.location.display_name());
                state.main = Some(snapshot);
                state.error = None;
                FlowOutcome::Applied
            }
            Err(e) => {
                warn!("Main flow failed: {}", e);
                state.error = Some(e.user_message());
                FlowOutcome::Failed
            }
        }
    }
}
