// Client for the web analytics reporting API.
//
// Thin wrapper by design: it fetches `(label, count_string)` rows and caches
// the raw payloads; all interesting work happens downstream in the
// normalization and aggregation pipeline.
use crate::cache;
use anyhow::{Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

const REPORTING_URL: &str = "https://www.googleapis.com/analytics/v3/data/ga";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Events,
    Users,
    Sessions,
    Crashes,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Events => "ga:totalEvents",
            Metric::Users => "ga:users",
            Metric::Sessions => "ga:sessions",
            Metric::Crashes => "ga:fatalExceptions",
        })
    }
}

/// Custom dimensions registered for the desktop property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Aircraft,
    Region,
    Mission,
    EndCondition,
    Retry,
    ProductLevel,
    Screen,
    VrHeadset,
    VrControllers,
    FlightControls,
    RenderingSettings,
    AcfStartType,
    Os,
    Cpu,
    Gpu,
    Ram,
    AbTests,
}

impl Dimension {
    fn index(self) -> u8 {
        match self {
            Dimension::Aircraft => 2,
            Dimension::Region => 3,
            Dimension::Mission => 4,
            Dimension::EndCondition => 5,
            Dimension::Retry => 7,
            Dimension::ProductLevel => 8,
            Dimension::Screen => 10,
            Dimension::VrHeadset => 11,
            Dimension::VrControllers => 12,
            Dimension::FlightControls => 13,
            Dimension::RenderingSettings => 14,
            Dimension::AcfStartType => 15,
            Dimension::Os => 16,
            Dimension::Cpu => 17,
            Dimension::Gpu => 18,
            Dimension::Ram => 19,
            Dimension::AbTests => 20,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ga:dimension{}", self.index())
    }
}

/// Which slice of the user base a query covers. Product levels containing
/// "Demo" mark unpaid users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UserGroup {
    All,
    PaidOnly,
    DemoOnly,
}

impl UserGroup {
    fn filter(self) -> &'static str {
        match self {
            UserGroup::All => "",
            UserGroup::PaidOnly => "ga:dimension8!@Demo",
            UserGroup::DemoOnly => "ga:dimension8=@Demo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserGroup::All => "All",
            UserGroup::PaidOnly => "PaidOnly",
            UserGroup::DemoOnly => "DemoOnly",
        }
    }
}

// Renders the CLI value name so clap can round-trip defaults.
impl fmt::Display for UserGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserGroup::All => "all",
            UserGroup::PaidOnly => "paid-only",
            UserGroup::DemoOnly => "demo-only",
        })
    }
}

/// One reportable simulator release window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionWindow {
    pub name: &'static str,
    /// True for stable/final releases, false for betas and pre-final RCs.
    pub is_final: bool,
    pub start: &'static str,
    pub end: &'static str,
}

/// Release windows worth reporting on. Start dates mark when a build reached
/// enough users for the data to mean something.
pub const VERSIONS: &[VersionWindow] = &[
    VersionWindow { name: "10", is_final: false, start: "2015-09-19", end: "2017-06-01" },
    VersionWindow { name: "10.51r2", is_final: true, start: "2016-10-26", end: "2017-06-01" },
    VersionWindow { name: "11", is_final: false, start: "2016-11-24", end: "today" },
    VersionWindow { name: "11.20r4", is_final: true, start: "2018-05-02", end: "2019-01-22" },
    VersionWindow { name: "11.26r2", is_final: true, start: "2018-08-23", end: "2019-01-22" },
    VersionWindow { name: "11.30r1", is_final: false, start: "2018-12-14", end: "2018-12-25" },
    VersionWindow { name: "11.30r2", is_final: false, start: "2018-12-24", end: "2019-01-10" },
    VersionWindow { name: "11.30r3", is_final: true, start: "2019-01-08", end: "2019-02-02" },
    VersionWindow { name: "11.31r1", is_final: true, start: "2019-01-26", end: "2019-03-11" },
    VersionWindow { name: "11.32r1", is_final: false, start: "2019-02-06", end: "2019-02-22" },
    VersionWindow { name: "11.32r2", is_final: true, start: "2019-02-21", end: "2019-05-01" },
    VersionWindow { name: "11.33b1", is_final: false, start: "2019-02-21", end: "2019-05-07" },
    VersionWindow { name: "11.33r1", is_final: false, start: "2019-04-24", end: "2019-08-01" },
    VersionWindow { name: "11.33r2", is_final: true, start: "2019-04-26", end: "today" },
    VersionWindow { name: "11.34r1", is_final: true, start: "2019-05-07", end: "today" },
    VersionWindow { name: "11.35b2", is_final: false, start: "2019-06-06", end: "today" },
];

pub fn version_named(name: &str) -> Result<&'static VersionWindow> {
    VERSIONS
        .iter()
        .find(|v| v.name == name)
        .with_context(|| format!("unknown simulator version {name:?}"))
}

impl VersionWindow {
    pub fn start_date(&self) -> NaiveDate {
        // The table is compile-time data; a bad date is a programming error.
        NaiveDate::parse_from_str(self.start, "%Y-%m-%d").expect("version table start date")
    }

    pub fn end_date(&self) -> NaiveDate {
        if self.end == "today" {
            Local::now().date_naive()
        } else {
            NaiveDate::parse_from_str(self.end, "%Y-%m-%d").expect("version table end date")
        }
    }

    /// Version-specific windows carry a point release in the name ("11.20r4"
    /// vs just "11").
    pub fn is_specific_release(&self) -> bool {
        self.name.len() > 2
    }

    /// Whether the upstream property still retains per-user data for this
    /// window. Retention runs 26 calendar months back from today.
    pub fn has_full_data_retention(&self) -> bool {
        let today = Local::now().date_naive();
        let first_of_month = today.with_day0(0).unwrap_or(today);
        let end_of_retention = first_of_month
            .checked_sub_months(Months::new(26))
            .unwrap_or(first_of_month);
        self.start_date() > end_of_retention
    }
}

#[derive(Debug, Deserialize)]
struct ReportResponse {
    rows: Option<Vec<Vec<String>>>,
}

/// Authenticated handle on one analytics property view.
pub struct AnalyticsClient {
    http: reqwest::Client,
    token: String,
    profile_id: String,
}

impl AnalyticsClient {
    /// Credentials come from the environment; there is nothing interactive
    /// about a reporting cron job.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("SIMSTATS_ANALYTICS_TOKEN")
            .context("SIMSTATS_ANALYTICS_TOKEN must hold an OAuth access token for the reporting API")?;
        let profile_id = std::env::var("SIMSTATS_ANALYTICS_PROFILE")
            .context("SIMSTATS_ANALYTICS_PROFILE must hold the analytics view (profile) id")?;
        Ok(AnalyticsClient {
            http: reqwest::Client::new(),
            token,
            profile_id,
        })
    }

    pub async fn events(
        &self,
        version: &VersionWindow,
        dimension: Dimension,
        group: UserGroup,
    ) -> Result<Vec<(String, String)>> {
        self.query(version, Metric::Events, Some(dimension), group, None).await
    }

    pub async fn users(
        &self,
        version: &VersionWindow,
        dimension: Dimension,
        group: UserGroup,
        override_start: Option<NaiveDate>,
    ) -> Result<Vec<(String, String)>> {
        self.query(version, Metric::Users, Some(dimension), group, override_start)
            .await
    }

    /// Run one reporting query, served from the response cache when fresh.
    /// Returns the result rows as `(label, count_string)` pairs.
    pub async fn query(
        &self,
        version: &VersionWindow,
        metric: Metric,
        dimension: Option<Dimension>,
        group: UserGroup,
        override_start: Option<NaiveDate>,
    ) -> Result<Vec<(String, String)>> {
        let start = override_start
            .map(|d| d.to_string())
            .unwrap_or_else(|| version.start.to_string());
        let dimension_str = dimension.map(|d| d.to_string()).unwrap_or_default();
        let cache_key = format!(
            "query-{}-{}-{}-{}-{}",
            version.name,
            metric,
            dimension_str,
            group.label(),
            start
        );
        if let Some(rows) = cache::load_fresh(&cache_key, cache::DEFAULT_TTL)? {
            debug!("cache hit for {cache_key}");
            return Ok(rows);
        }

        let mut filters = format!("ga:appVersion=@X-Plane {}", version.name);
        if !group.filter().is_empty() {
            filters.push(';');
            filters.push_str(group.filter());
        }

        let response: ReportResponse = self
            .http
            .get(REPORTING_URL)
            .bearer_auth(&self.token)
            .query(&[
                ("ids", format!("ga:{}", self.profile_id)),
                ("samplingLevel", "HIGHER_PRECISION".to_string()),
                ("start-date", start),
                ("end-date", version.end_date().to_string()),
                ("metrics", metric.to_string()),
                ("dimensions", dimension_str),
                ("sort", format!("-{metric}")),
                ("filters", filters),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("malformed reporting API response")?;

        let rows: Vec<(String, String)> = response
            .rows
            .unwrap_or_default()
            .into_iter()
            .filter_map(|mut row| {
                if row.len() < 2 {
                    return None;
                }
                let count = row.pop()?;
                let label = row.remove(0);
                Some((label, count))
            })
            .collect();
        if rows.is_empty() {
            warn!(
                "no results for metric {metric} on version {} (this almost certainly indicates a logic error)",
                version.name
            );
        }

        cache::store(&cache_key, &rows)?;
        Ok(rows)
    }
}
