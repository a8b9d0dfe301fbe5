//! The persistence seam used by [`ScheduleStore`](super::ScheduleStore).

use crate::error::Result;
use crate::schedule::{DaySchedule, Employee, EmployeeId, WeeklySchedule, Weekday};
use async_trait::async_trait;

/// Remote storage for the roster.
///
/// Every call is a single request/response. Implementations must not
/// retry; a failure is reported as [`DashboardError::Persistence`]
/// and the caller decides whether to try again.
///
/// [`DashboardError::Persistence`]: crate::error::DashboardError::Persistence
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Fetch every employee with their schedule.
    async fn fetch_roster(&self) -> Result<Vec<Employee>>;

    /// Create an employee and return the server-assigned id.
    async fn create_employee(&self, name: &str, schedule: &WeeklySchedule) -> Result<EmployeeId>;

    /// Replace one weekday's record for an employee.
    async fn update_day(&self, id: &EmployeeId, weekday: Weekday, day: &DaySchedule) -> Result<()>;

    /// Delete an employee.
    async fn delete_employee(&self, id: &EmployeeId) -> Result<()>;
}
