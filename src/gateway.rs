// Scenery Gateway statistics client
use crate::cache;
use anyhow::{ensure, Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

const STATS_URL: &str = "https://gateway.x-plane.com/apiv1/stats/by-month";

/// Counters the Gateway publishes as monthly time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GatewayStat {
    Airports,
    Airports3d,
    Submissions,
    Artists,
}

impl GatewayStat {
    pub const ALL: [GatewayStat; 4] = [
        GatewayStat::Airports,
        GatewayStat::Airports3d,
        GatewayStat::Submissions,
        GatewayStat::Artists,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GatewayStat::Airports => "Airports with 2-D or 3-D Scenery",
            GatewayStat::Airports3d => "Airports with 3-D Scenery",
            GatewayStat::Submissions => "Total Scenery Pack Submissions",
            GatewayStat::Artists => "Registered Scenery Artists",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            GatewayStat::Airports => "Number of Airports (2-D or 3-D)",
            GatewayStat::Airports3d => "Number of 3-D Airports",
            GatewayStat::Submissions => "Number of Scenery Submissions",
            GatewayStat::Artists => "Number of Artists",
        }
    }

    pub fn metric_label(self) -> &'static str {
        match self {
            GatewayStat::Airports => "Airports",
            GatewayStat::Airports3d => "3-D Airports",
            GatewayStat::Submissions => "Scenery Packs",
            GatewayStat::Artists => "Artists",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MonthlyStats {
    months: Vec<String>,
    airports: Vec<u64>,
    #[serde(rename = "recommended3dAirports")]
    recommended_3d_airports: Vec<u64>,
    #[serde(rename = "totalUserSceneryPacks")]
    total_user_scenery_packs: Vec<u64>,
    #[serde(rename = "registeredArtists")]
    registered_artists: Vec<u64>,
}

impl MonthlyStats {
    fn series(&self, stat: GatewayStat) -> &[u64] {
        match stat {
            GatewayStat::Airports => &self.airports,
            GatewayStat::Airports3d => &self.recommended_3d_airports,
            GatewayStat::Submissions => &self.total_user_scenery_packs,
            GatewayStat::Artists => &self.registered_artists,
        }
    }
}

pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
}

impl GatewayClient {
    pub fn new() -> Self {
        let url = std::env::var("SIMSTATS_GATEWAY_URL").unwrap_or_else(|_| STATS_URL.to_string());
        GatewayClient {
            http: reqwest::Client::new(),
            url,
        }
    }

    /// One counter as `(month, value)` pairs in chronological order. Months
    /// that have not started yet are dropped; the Gateway pads its series to
    /// the end of the year.
    pub async fn stat_over_time(&self, stat: GatewayStat) -> Result<Vec<(String, u64)>> {
        let all = self.monthly_stats().await?;
        months_through(&all, stat, Local::now().date_naive())
    }

    async fn monthly_stats(&self) -> Result<MonthlyStats> {
        if let Some(stats) = cache::load_fresh("gateway-by-month", cache::DEFAULT_TTL)? {
            debug!("gateway stats served from cache");
            return Ok(stats);
        }

        let stats: MonthlyStats = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("gateway stats endpoint returned a malformed payload")?;

        cache::store("gateway-by-month", &stats)?;
        Ok(stats)
    }
}

impl Default for GatewayClient {
    fn default() -> Self {
        Self::new()
    }
}

fn months_through(
    all: &MonthlyStats,
    stat: GatewayStat,
    today: NaiveDate,
) -> Result<Vec<(String, u64)>> {
    let series = all.series(stat);
    ensure!(
        series.len() == all.months.len(),
        "gateway series length mismatch for {:?}",
        stat
    );

    let mut out = Vec::with_capacity(series.len());
    for (month, count) in all.months.iter().zip(series) {
        let first_of_month = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
            .with_context(|| format!("unparseable gateway month {month:?}"))?;
        if first_of_month < today {
            out.push((month.clone(), *count));
        }
    }
    Ok(out)
}
