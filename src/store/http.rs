//! REST implementation of [`Persistence`].
//!
//! | Operation         | Request                                   |
//! |-------------------|-------------------------------------------|
//! | fetch roster      | `GET {base}/employees`                    |
//! | create employee   | `POST {base}/employees {name, schedule}`  |
//! | update one day    | `PUT {base}/employees/{id} {day, schedule}` |
//! | delete employee   | `DELETE {base}/employees/{id}`            |

use crate::config::ApiConfig;
use crate::error::{DashboardError, Result};
use crate::schedule::{DaySchedule, Employee, EmployeeId, WeeklySchedule, Weekday};
use crate::store::persistence::Persistence;
use crate::store::wire::{
    CreateEmployeeRequest, CreateEmployeeResponse, UpdateDayRequest, WireDay, WireEmployee,
};
use async_trait::async_trait;
use tracing::debug;

/// Longest response-body excerpt carried in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Persistence backed by the dashboard's HTTP API.
pub struct HttpPersistence {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPersistence {
    /// Create a client for the configured API.
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn employees_url(&self) -> String {
        format!("{}/employees", self.base_url)
    }

    fn employee_url(&self, id: &EmployeeId) -> String {
        format!("{}/employees/{}", self.base_url, urlencoding::encode(id.as_str()))
    }
}

/// Map a transport error to a persistence failure.
fn transport_error(op: &str, err: reqwest::Error) -> DashboardError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    DashboardError::Persistence(format!("{op}: {kind}: {err}"))
}

/// Turn a non-2xx response into a persistence failure.
async fn ensure_success(op: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    let message = if excerpt.is_empty() {
        format!("{op}: HTTP {}", status.as_u16())
    } else {
        format!("{op}: HTTP {}: {excerpt}", status.as_u16())
    };
    Err(DashboardError::Persistence(message))
}

async fn decode<T: serde::de::DeserializeOwned>(op: &str, resp: reqwest::Response) -> Result<T> {
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(op, e))?;
    serde_json::from_str(&body)
        .map_err(|e| DashboardError::Persistence(format!("{op}: malformed response: {e}")))
}

#[async_trait]
impl Persistence for HttpPersistence {
    async fn fetch_roster(&self) -> Result<Vec<Employee>> {
        const OP: &str = "fetch roster";
        let url = self.employees_url();
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        let resp = ensure_success(OP, resp).await?;
        let employees: Vec<WireEmployee> = decode(OP, resp).await?;
        Ok(employees
            .into_iter()
            .map(WireEmployee::into_employee)
            .collect())
    }

    async fn create_employee(&self, name: &str, schedule: &WeeklySchedule) -> Result<EmployeeId> {
        const OP: &str = "create employee";
        let url = self.employees_url();
        debug!(%url, name, "POST");
        let resp = self
            .client
            .post(&url)
            .json(&CreateEmployeeRequest::new(name, schedule))
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        let resp = ensure_success(OP, resp).await?;
        let created: CreateEmployeeResponse = decode(OP, resp).await?;
        match created.id {
            Some(id) if !id.trim().is_empty() => Ok(EmployeeId::new(id)),
            _ => Err(DashboardError::Persistence(format!(
                "{OP}: server returned no id"
            ))),
        }
    }

    async fn update_day(&self, id: &EmployeeId, weekday: Weekday, day: &DaySchedule) -> Result<()> {
        const OP: &str = "update schedule";
        let url = self.employee_url(id);
        debug!(%url, %weekday, "PUT");
        let body = UpdateDayRequest {
            day: weekday,
            schedule: WireDay::from(day),
        };
        let resp = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        ensure_success(OP, resp).await?;
        Ok(())
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<()> {
        const OP: &str = "delete employee";
        let url = self.employee_url(id);
        debug!(%url, "DELETE");
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        ensure_success(OP, resp).await?;
        Ok(())
    }
}
