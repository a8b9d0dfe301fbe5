//! Roster cache and its synchronisation with persistence.
//!
//! [`ScheduleStore`] is the only writer of the roster cache. Every mutation
//! goes to persistence first and touches the cache only once the server
//! has acknowledged it, so a failed request leaves the cache exactly as it
//! was. Readers ([`LiveCounter`](crate::counter::LiveCounter), renderers)
//! get immutable `Arc<Roster>` snapshots through a `watch` channel; each
//! successful operation publishes one new snapshot.

pub mod http;
pub mod persistence;
pub mod wire;

pub use http::HttpPersistence;
pub use persistence::Persistence;

use crate::error::{DashboardError, Result};
use crate::schedule::{DaySchedule, Employee, EmployeeId, Roster, WeeklySchedule, Weekday};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Owner of the session's roster cache.
pub struct ScheduleStore<P> {
    persistence: P,
    roster: watch::Sender<Arc<Roster>>,
}

impl<P: Persistence> ScheduleStore<P> {
    /// Create a store with an empty cache.
    pub fn new(persistence: P) -> Self {
        let (roster, _) = watch::channel(Arc::new(Roster::default()));
        Self {
            persistence,
            roster,
        }
    }

    /// The current roster snapshot.
    pub fn snapshot(&self) -> Arc<Roster> {
        self.roster.borrow().clone()
    }

    /// Subscribe to roster replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Roster>> {
        self.roster.subscribe()
    }

    /// Look one employee up in the cache.
    pub fn employee(&self, id: &EmployeeId) -> Option<Employee> {
        self.roster.borrow().get(id).cloned()
    }

    /// The persistence backend.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Fetch the roster and replace the whole cache.
    ///
    /// On failure the cache is cleared, so a stale roster from an earlier
    /// session is never shown as current.
    pub async fn load(&self) -> Result<Arc<Roster>> {
        match self.persistence.fetch_roster().await {
            Ok(employees) => {
                let roster = Arc::new(Roster::new(employees));
                info!(employees = roster.len(), "roster loaded");
                self.roster.send_replace(roster.clone());
                Ok(roster)
            }
            Err(e) => {
                warn!(error = %e, "roster load failed, cache cleared");
                self.roster.send_replace(Arc::new(Roster::default()));
                Err(e)
            }
        }
    }

    /// Create an employee with seven empty days.
    ///
    /// The name is trimmed and must not be empty. The employee is added to
    /// the cache only after the server has assigned an id.
    pub async fn add_employee(&self, name: &str) -> Result<Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::Validation(
                "employee name cannot be empty".to_owned(),
            ));
        }

        let schedule = WeeklySchedule::empty_week();
        let id = self.persistence.create_employee(name, &schedule).await?;
        let employee = Employee {
            id,
            name: name.to_owned(),
            schedule,
        };

        self.roster.send_modify(|roster| {
            Arc::make_mut(roster).push(employee.clone());
        });
        info!(employee = %employee.id, name, "employee added");
        Ok(employee)
    }

    /// Delete an employee and drop it, schedule included, from the cache.
    pub async fn remove_employee(&self, id: &EmployeeId) -> Result<()> {
        self.persistence.delete_employee(id).await?;

        let removed = self.roster.send_if_modified(|roster| {
            if roster.get(id).is_none() {
                return false;
            }
            Arc::make_mut(roster).remove(id).is_some()
        });
        if removed {
            info!(employee = %id, "employee removed");
        } else {
            warn!(employee = %id, "deleted employee was not in the cache");
        }
        Ok(())
    }

    /// Replace one weekday's schedule for an employee.
    ///
    /// The whole day record is replaced, not merged.
    pub async fn set_day_schedule(
        &self,
        id: &EmployeeId,
        weekday: Weekday,
        day: DaySchedule,
    ) -> Result<()> {
        self.persistence.update_day(id, weekday, &day).await?;

        let updated = self.roster.send_if_modified(|roster| {
            if roster.get(id).is_none() {
                return false;
            }
            match Arc::make_mut(roster).get_mut(id) {
                Some(employee) => {
                    employee.schedule.set_day(weekday, day);
                    true
                }
                None => false,
            }
        });
        if updated {
            info!(employee = %id, %weekday, "day schedule replaced");
        } else {
            warn!(employee = %id, %weekday, "updated employee was not in the cache");
        }
        Ok(())
    }
}
