use crate::engine::AnalyticsEngine;
use crate::report::DashboardReport;
use crate::selection::FilterSelection;
use core_types::Dataset;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Identifies one recomputation, in the order selection changes were triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Published {
    ticket: Ticket,
    report: Arc<DashboardReport>,
}

/// Owns the immutable loaded dataset and the most recently published report.
///
/// The host calls `refresh` whenever the selection changes. Hosts that can
/// run recomputations concurrently use `begin` before computing and
/// `publish` afterwards: a report is accepted only if no later-triggered
/// report was already published, so stale results are dropped, never merged.
#[derive(Debug)]
pub struct DashboardSession {
    dataset: Dataset,
    engine: AnalyticsEngine,
    next_ticket: AtomicU64,
    latest: Mutex<Option<Published>>,
}

impl DashboardSession {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            engine: AnalyticsEngine::new(),
            next_ticket: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The selection a fresh dashboard starts with: everything.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all(&self.dataset)
    }

    /// Reserves a ticket for a recomputation about to start.
    pub fn begin(&self) -> Ticket {
        Ticket(self.next_ticket.fetch_add(1, Ordering::SeqCst))
    }

    /// Runs the pipeline against the session's dataset without publishing.
    pub fn compute(&self, selection: &FilterSelection) -> DashboardReport {
        self.engine.calculate(&self.dataset, selection)
    }

    /// Publishes `report` unless a later ticket already has been.
    /// Returns whether the report was accepted.
    pub fn publish(&self, ticket: Ticket, report: DashboardReport) -> bool {
        self.publish_shared(ticket, Arc::new(report))
    }

    fn publish_shared(&self, ticket: Ticket, report: Arc<DashboardReport>) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = latest.as_ref() {
            if current.ticket > ticket {
                debug!(?ticket, current = ?current.ticket, "Discarding stale report");
                return false;
            }
        }
        *latest = Some(Published { ticket, report });
        true
    }

    /// Recomputes for `selection` and publishes the result.
    ///
    /// Returns the report now current, which is this one unless a
    /// later-triggered recomputation finished first.
    pub fn refresh(&self, selection: &FilterSelection) -> Arc<DashboardReport> {
        let ticket = self.begin();
        let report = Arc::new(self.compute(selection));
        if self.publish_shared(ticket, Arc::clone(&report)) {
            report
        } else {
            self.latest().unwrap_or(report)
        }
    }

    /// The last published report, if any.
    pub fn latest(&self) -> Option<Arc<DashboardReport>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|published| Arc::clone(&published.report))
    }
}
