//! Weather panel state.
//!
//! The panel owns the recent-cities list and whatever is currently on display. Lookups are
//! split into [`WeatherPanel::begin`] and [`WeatherPanel::finish`] so the caller can run the
//! network part on its own (and race it against cancellation). Every `begin` issues a new
//! [`Ticket`]; `finish` drops results carrying an outdated ticket or arriving after
//! [`WeatherPanel::close`]. [`WeatherPanel::search`] and [`WeatherPanel::search_here`] wrap the
//! whole sequence and take a future that cancels the lookup when it resolves.

use chrono::{DateTime, FixedOffset};

use crate::{
    WeatherError,
    forecast::aggregate_daily,
    geolocation::Geolocator,
    model::{DailySummary, ForecastSample, LocationQuery, WeatherSnapshot},
    provider::{WeatherProvider, fetch_current_and_forecast},
    recent::RecentCities,
};

/// Current conditions plus the daily forecast, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub daily: Vec<DailySummary>,
}

impl WeatherReport {
    /// Daily buckets use the location's own calendar.
    pub fn new(snapshot: WeatherSnapshot, samples: &[ForecastSample]) -> Self {
        let daily = aggregate_daily(samples, &snapshot.local_offset());
        Self { snapshot, daily }
    }

    pub fn local_time(&self, at: DateTime<chrono::Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.snapshot.local_offset())
    }
}

#[derive(Debug, Default)]
pub enum PanelView {
    #[default]
    Idle,
    Loading,
    Ready(WeatherReport),
    Failed(WeatherError),
}

/// How a [`WeatherPanel::search`] or [`WeatherPanel::search_here`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The result (success or failure) is now on display.
    Applied,
    /// The result arrived for a stale ticket or a closed panel.
    Dropped,
    /// Blank input; nothing was requested.
    Skipped,
    /// The cancel future won; the panel is back to idle.
    Cancelled,
}

/// Generation stamp of an outstanding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct WeatherPanel {
    recent: RecentCities,
    view: PanelView,
    generation: u64,
    closed: bool,
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recent(&self) -> &RecentCities {
        &self.recent
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start a lookup. Any lookup still in flight becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        if !self.closed {
            self.view = PanelView::Loading;
        }
        Ticket(self.generation)
    }

    /// Apply the outcome of the lookup started with `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale or the panel is closed.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        query: &LocationQuery,
        result: Result<(WeatherSnapshot, Vec<ForecastSample>), WeatherError>,
    ) -> bool {
        self.apply(ticket, query.is_city(), result)
    }

    fn apply(
        &mut self,
        ticket: Ticket,
        record_city: bool,
        result: Result<(WeatherSnapshot, Vec<ForecastSample>), WeatherError>,
    ) -> bool {
        if self.closed || ticket.0 != self.generation {
            tracing::debug!("dropping stale weather result");
            return false;
        }

        self.view = match result {
            Ok((snapshot, samples)) => {
                if record_city {
                    self.recent = self.recent.record_search(&snapshot.location_name);
                }
                tracing::info!(location = %snapshot.location_name, "weather panel updated");
                PanelView::Ready(WeatherReport::new(snapshot, &samples))
            }
            Err(err) => {
                tracing::info!(error = %err, "weather panel lookup failed");
                PanelView::Failed(err)
            }
        };
        true
    }

    /// Tear the panel down. Results that arrive afterwards are ignored.
    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
    }

    /// Abandon the lookup started with `ticket` and go back to idle. The panel stays open.
    ///
    /// Returns `false` when the ticket is already stale or the panel is closed.
    pub fn cancel(&mut self, ticket: Ticket) -> bool {
        if self.closed || ticket.0 != self.generation {
            return false;
        }
        self.generation += 1;
        self.view = PanelView::Idle;
        true
    }

    /// Look up a city by name, giving up as soon as `cancel` resolves.
    ///
    /// Blank input is ignored without touching the panel.
    pub async fn search<P, C>(&mut self, provider: &P, city: &str, cancel: C) -> LookupOutcome
    where
        P: WeatherProvider + ?Sized,
        C: Future,
    {
        let Some(query) = LocationQuery::city(city) else {
            return LookupOutcome::Skipped;
        };
        let ticket = self.begin();

        tokio::select! {
            biased;
            _ = cancel => self.abandon(ticket),
            result = fetch_current_and_forecast(provider, &query) => {
                self.settle(ticket, query.is_city(), result)
            }
        }
    }

    /// Look up the user's own position. Geolocation failures never reach the network.
    pub async fn search_here<P, G, C>(
        &mut self,
        provider: &P,
        geolocator: &G,
        cancel: C,
    ) -> LookupOutcome
    where
        P: WeatherProvider + ?Sized,
        G: Geolocator + ?Sized,
        C: Future,
    {
        let ticket = self.begin();
        let located = async {
            let coords = geolocator
                .locate()
                .await
                .inspect_err(|err| tracing::debug!(error = %err, "geolocation failed"))?;
            fetch_current_and_forecast(provider, &LocationQuery::Coordinates(coords)).await
        };

        tokio::select! {
            biased;
            _ = cancel => self.abandon(ticket),
            result = located => self.settle(ticket, false, result),
        }
    }

    fn abandon(&mut self, ticket: Ticket) -> LookupOutcome {
        tracing::debug!("weather lookup cancelled");
        self.cancel(ticket);
        LookupOutcome::Cancelled
    }

    fn settle(
        &mut self,
        ticket: Ticket,
        record_city: bool,
        result: Result<(WeatherSnapshot, Vec<ForecastSample>), WeatherError>,
    ) -> LookupOutcome {
        if self.apply(ticket, record_city, result) {
            LookupOutcome::Applied
        } else {
            LookupOutcome::Dropped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeolocationError;
    use crate::geolocation::ConfiguredGeolocator;
    use crate::model::Coordinates;
    use crate::provider::tests::{StubProvider, snapshot};
    use std::future::{pending, ready};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn successful_search_records_canonical_name() {
        let provider = StubProvider::default();
        let mut panel = WeatherPanel::new();

        assert_eq!(
            panel.search(&provider, "sEOUL", pending::<()>()).await,
            LookupOutcome::Applied
        );

        assert_eq!(panel.recent().as_slice(), ["Seoul"]);
        match panel.view() {
            PanelView::Ready(report) => assert_eq!(report.snapshot.location_name, "Seoul"),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_search_leaves_recents_untouched() {
        let mut panel = WeatherPanel::new();
        panel.search(&StubProvider::default(), "busan", pending::<()>()).await;

        let failing = StubProvider {
            not_found: true,
            ..StubProvider::default()
        };
        assert_eq!(
            panel.search(&failing, "nowhere", pending::<()>()).await,
            LookupOutcome::Applied
        );

        assert_eq!(panel.recent().as_slice(), ["Busan"]);
        assert!(matches!(panel.view(), PanelView::Failed(WeatherError::LocationNotFound)));
    }

    #[tokio::test]
    async fn blank_search_is_ignored() {
        let provider = StubProvider::default();
        let mut panel = WeatherPanel::new();

        assert_eq!(
            panel.search(&provider, "   ", ready(())).await,
            LookupOutcome::Skipped
        );
        assert!(matches!(panel.view(), PanelView::Idle));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn geolocation_denied_skips_network() {
        let provider = StubProvider::default();
        let geo = ConfiguredGeolocator::new(Some(Coordinates { lat: 1.0, lon: 2.0 }), false);
        let mut panel = WeatherPanel::new();

        assert_eq!(
            panel.search_here(&provider, &geo, pending::<()>()).await,
            LookupOutcome::Applied
        );

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            panel.view(),
            PanelView::Failed(WeatherError::Geolocation(GeolocationError::Denied))
        ));
    }

    #[tokio::test]
    async fn coordinate_search_does_not_touch_recents() {
        let provider = StubProvider::default();
        let geo = ConfiguredGeolocator::new(Some(Coordinates { lat: 37.5, lon: 127.0 }), true);
        let mut panel = WeatherPanel::new();

        assert_eq!(
            panel.search_here(&provider, &geo, pending::<()>()).await,
            LookupOutcome::Applied
        );

        assert!(panel.recent().is_empty());
        assert!(matches!(panel.view(), PanelView::Ready(_)));
        let queries = provider.queries.lock().unwrap();
        assert_eq!(
            queries.as_slice(),
            [LocationQuery::Coordinates(Coordinates { lat: 37.5, lon: 127.0 })]
        );
    }

    #[tokio::test]
    async fn cancelled_search_keeps_panel_open() {
        let provider = StubProvider::default();
        let mut panel = WeatherPanel::new();

        assert_eq!(
            panel.search(&provider, "Seoul", ready(())).await,
            LookupOutcome::Cancelled
        );

        assert!(!panel.is_closed());
        assert!(matches!(panel.view(), PanelView::Idle));
        assert!(panel.recent().is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            panel.search(&provider, "Busan", pending::<()>()).await,
            LookupOutcome::Applied
        );
        assert_eq!(panel.recent().as_slice(), ["Busan"]);
    }

    #[tokio::test]
    async fn cancelled_location_search_skips_geolocation_and_network() {
        let provider = StubProvider::default();
        let geo = ConfiguredGeolocator::new(Some(Coordinates { lat: 37.5, lon: 127.0 }), true);
        let mut panel = WeatherPanel::new();

        assert_eq!(
            panel.search_here(&provider, &geo, ready(())).await,
            LookupOutcome::Cancelled
        );

        assert!(!panel.is_closed());
        assert!(matches!(panel.view(), PanelView::Idle));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn result_for_cancelled_ticket_is_dropped() {
        let mut panel = WeatherPanel::new();
        let query = LocationQuery::city("Seoul").unwrap();

        let ticket = panel.begin();
        assert!(panel.cancel(ticket));
        assert!(!panel.cancel(ticket));

        assert!(!panel.finish(ticket, &query, Ok((snapshot("Seoul"), Vec::new()))));
        assert!(matches!(panel.view(), PanelView::Idle));
        assert!(panel.recent().is_empty());
        assert!(!panel.is_closed());
    }

    #[test]
    fn cancel_after_close_is_refused() {
        let mut panel = WeatherPanel::new();
        let ticket = panel.begin();
        panel.close();

        assert!(!panel.cancel(ticket));
        assert!(panel.is_closed());
    }

    #[test]
    fn superseded_ticket_is_dropped() {
        let mut panel = WeatherPanel::new();
        let query = LocationQuery::city("Seoul").unwrap();

        let old = panel.begin();
        let new = panel.begin();

        assert!(!panel.finish(old, &query, Ok((snapshot("Seoul"), Vec::new()))));
        assert!(matches!(panel.view(), PanelView::Loading));
        assert!(panel.recent().is_empty());

        assert!(panel.finish(new, &query, Ok((snapshot("Seoul"), Vec::new()))));
        assert_eq!(panel.recent().as_slice(), ["Seoul"]);
    }

    #[test]
    fn results_after_close_are_ignored() {
        let mut panel = WeatherPanel::new();
        let query = LocationQuery::city("Seoul").unwrap();

        let ticket = panel.begin();
        panel.close();

        assert!(!panel.finish(ticket, &query, Ok((snapshot("Seoul"), Vec::new()))));
        assert!(panel.is_closed());
        assert!(panel.recent().is_empty());
    }

    #[test]
    fn report_buckets_by_location_calendar() {
        use chrono::{DateTime, NaiveDate};

        // 2024-04-30T20:00:00Z and 2024-05-01T02:00:00Z are both May 1st at +09:00.
        let samples: Vec<ForecastSample> = [1_714_507_200, 1_714_528_800]
            .into_iter()
            .map(|ts| ForecastSample {
                at: DateTime::from_timestamp(ts, 0).unwrap(),
                temp_min_c: 10.0,
                temp_max_c: 12.0,
                description: "맑음".into(),
                icon: "01d".into(),
            })
            .collect();

        let report = WeatherReport::new(snapshot("Seoul"), &samples);

        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
