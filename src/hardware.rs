// Hardware, OS, VR, and flight-controls analysis
//
// Classification helpers here are pure string → bucket functions over the
// raw analytics labels; the async methods just wire them to the client.
use crate::analytics::{AnalyticsClient, Dimension, UserGroup, VersionWindow};
use crate::percents::{map_to_percents, round_to};
use crate::stats::parse_count;
use anyhow::{Context, Result};
use fxhash::FxHashMap;
use regex::Regex;
use tracing::debug;

/// Bucket a raw OS label by platform.
pub fn classify_platform(os_string: &str) -> &'static str {
    let os_string = os_string.trim();
    if os_string == "Windows" || os_string.starts_with("IBM") {
        "Windows"
    } else if os_string == "Mac" || os_string.starts_with("APL") {
        "Mac"
    } else if os_string == "Linux" || os_string.starts_with("LIN") {
        "Linux"
    } else {
        "Dafuq?"
    }
}

/// Human OS version label for a raw OS cell; empty when unrecognized.
pub fn os_version_label(os_cell: &str) -> Result<String> {
    let os_cell = os_cell.trim();
    let mut version_name = String::new();

    if let Some(version_raw) = os_cell.strip_prefix("IBM") {
        version_name.push_str("Windows ");
        if version_raw.starts_with("10.") {
            version_name.push_str(&version_raw[..4.min(version_raw.len())]);
        } else if version_raw.starts_with("6.3") {
            version_name.push_str("8.1");
        } else if version_raw.starts_with("6.2") {
            version_name.push_str("8.0");
        } else if version_raw.starts_with("6.1") {
            version_name.push_str("7");
        } else if version_raw.starts_with("6.0") {
            version_name.push_str("Vista");
        } else if version_raw.starts_with('5') {
            version_name.push_str("XP");
        }

        if os_cell.contains("_32_") {
            version_name.push_str(" 32-bit");
        } else {
            version_name.push_str(" 64-bit");
        }
    } else if let Some(version_raw) = os_cell.strip_prefix("APL") {
        let osx_version = Regex::new(r"^([0-9][0-9]\.[0-9]+)")?;
        if let Some(captures) = osx_version.captures(version_raw) {
            version_name = format!("\"OSX {}\"", &captures[1]);
        }
    } else if os_cell.starts_with("LIN") {
        let bit_depth = if os_cell.contains("32bit") { " 32-bit" } else { " 64-bit" };
        version_name = format!("Linux{bit_depth}");
    }
    Ok(version_name)
}

/// GPU vendor bucket.
pub fn gpu_manufacturer(gpu_string: &str) -> &'static str {
    if lower_contains(gpu_string, &["firepro", "firegl", "radeon", "amd "])
        || ["67EF", "67DF", "ASUS EAH", "ASUS R"].iter().any(|p| gpu_string.starts_with(p))
    {
        "AMD/ATI"
    } else if lower_contains(gpu_string, &["Quadro", "GeForce", "TITAN"])
        || ["NVS ", "NV1"].iter().any(|p| gpu_string.starts_with(p))
    {
        "Nvidia"
    } else if gpu_string.contains("Intel") {
        "Intel"
    } else {
        "Unknown"
    }
}

/// GPU generation bucket. The rules are an accretion of marketing naming
/// schemes; they match in fixed order, lowest generation first.
pub fn gpu_generation(gpu_string: &str) -> Result<String> {
    let gpu = gpu_string.to_lowercase();
    if gpu.contains("quadro") {
        return Ok("Nvidia Quadro (All Generations)".to_string());
    } else if gpu.contains("firepro") || gpu.contains("firegl") {
        return Ok("AMD FirePro (All Generations)".to_string());
    }

    if gpu.contains("radeon") || gpu.contains("asus") {
        for gen in 2..=9u32 {
            if gpu_string.contains(&format!("R{gen} M")) {
                return Ok(format!("Radeon R{gen}M"));
            } else if gpu_string.contains(&format!("R{gen} ")) {
                return Ok(format!("Radeon R{gen}"));
            } else if Regex::new(&format!(r"{gen}\d\d\dM"))?.is_match(gpu_string)
                || (gpu_string.contains("Mobility")
                    && Regex::new(&format!(r"{gen}\d\d\d"))?.is_match(gpu_string))
            {
                return Ok(format!("Radeon {gen}xxxM"));
            } else if Regex::new(&format!(r"{gen}\d\d\d"))?.is_match(gpu_string) {
                return Ok(format!("Radeon {gen}xxxM"));
            }
        }
        return Ok("Radeon (Other)".to_string());
    } else if gpu.contains("titan x") {
        return Ok("GeForce 9xx".to_string());
    } else if gpu.contains("titan") {
        return Ok("GeForce 7xx".to_string());
    } else if gpu.contains("geforce") {
        const BASE: &str = r"GeForce (G|GT|GTX|GTS)?\s*";
        for gen in 1..=9u32 {
            if Regex::new(&format!(r"{BASE}{gen}\d\d\s*(Ti)?(\s|/)"))?.is_match(gpu_string) {
                return Ok(format!("GeForce {gen}xx"));
            } else if Regex::new(&format!(r"{BASE}{gen}\d\dM"))?.is_match(gpu_string) {
                return Ok(format!("GeForce {gen}xxM"));
            } else if Regex::new(&format!(r"{BASE}{gen}\d\d\d\s*(Ti)?(\s|/)"))?.is_match(gpu_string)
            {
                return Ok(format!("GeForce {gen}xxx"));
            } else if Regex::new(&format!(r"{BASE}{gen}\d\d\dM"))?.is_match(gpu_string) {
                return Ok(format!("GeForce {gen}xxxM"));
            }
        }
        return Ok("GeForce (Other)".to_string());
    } else if gpu.contains("intel") {
        if ["gma", "gm45", "g41", "g45", "q45", "eaglelake", "4 series"]
            .iter()
            .any(|ident| gpu.contains(ident))
        {
            return Ok("Intel Integrated (GMA or earlier)".to_string());
        } else if gpu.contains("hd") || gpu.contains("iris") {
            if ["2000", "3000"].iter().any(|ident| gpu.contains(ident)) {
                return Ok("Intel Integrated (6th Generation; HD 2000/3000)".to_string());
            } else if ["4000", "4200", "4400", "4600", "4700", "5000", "5100", "5200"]
                .iter()
                .any(|ident| gpu.contains(ident))
            {
                return Ok("Intel Integrated (7th Generation; HD 2500/4x00/5x00)".to_string());
            } else if ["5300", "5500", "5600", "5700", "6000", "6100", "6200", "6300"]
                .iter()
                .any(|ident| gpu.contains(ident))
            {
                return Ok("Intel Integrated (8th Generation; HD 5x00/6x00)".to_string());
            } else if ["500", "505", "510", "515", "520", "530", "540", "550", "580"]
                .iter()
                .any(|ident| gpu.contains(ident))
            {
                return Ok("Intel Integrated (9th Generation; HD 5xx)".to_string());
            }
            return Ok("Intel Integrated (5th Generation; HD)".to_string());
        } else if gpu.contains("sandybridge") {
            return Ok("Intel Integrated (6th Generation; HD 2000/3000)".to_string());
        } else if gpu.contains("haswell") || gpu.contains("ivybridge") || gpu.contains("bay trail")
        {
            return Ok("Intel Integrated (7th Generation; HD 2500/4x00/5x00)".to_string());
        } else if gpu.contains("broadwell") {
            return Ok("Intel Integrated (8th Generation; HD 5x00/6x00)".to_string());
        } else if gpu.contains("skylake") {
            return Ok("Intel Integrated (9th Generation; HD 5xx)".to_string());
        } else if gpu.contains("ironlake") {
            return Ok("Intel Integrated (5th Generation; HD)".to_string());
        }
        return Ok(gpu_string.to_string());
    }
    Ok("Other".to_string())
}

/// Mobile vs. desktop, derived from the generation label.
pub fn gpu_platform(gpu_string: &str) -> Result<&'static str> {
    let generation = gpu_generation(gpu_string)?;
    Ok(if generation.starts_with("Intel") {
        "Intel"
    } else if generation.ends_with('M') {
        "Mobile"
    } else {
        "Desktop"
    })
}

/// Search terms → deduped headset names, matched in order, first hit wins.
const KNOWN_HEADSETS: &[(&str, &str)] = &[
    ("rift", "Oculus Rift"),
    ("oculus", "Oculus Rift"),
    ("pimax 5k", "Pimax 5K"),
    ("psvr", "PSVR Headset"),
    ("windows", "Windows Mixed Reality"),
    ("lighthouse", "OpenVR (like HTC Vive)"),
    ("vive", "OpenVR (like HTC Vive)"),
    ("aapvr", "Phone"),
    ("vridge", "Phone"),
    ("ivry", "Phone"),
    ("phonevr", "Phone"),
];

/// Dedupe a raw headset label; unknown labels pass through unchanged.
pub fn canonical_headset(label: &str) -> String {
    let lower = label.to_lowercase();
    for (search_term, deduped) in KNOWN_HEADSETS {
        if lower.contains(search_term) {
            return deduped.to_string();
        }
    }
    debug!("unknown headset: {label}");
    label.to_string()
}

const KNOWN_YOKES: &[&str] = &[
    "Saitek Pro Flight Yoke",
    "Saitek X52",
    "CH FLIGHT SIM YOKE",
    "CH ECLIPSE YOKE",
    "Pro Flight Cessna Yoke",
    "PFC Cirrus Yoke",
    "CH 3-Axis 10-Button POV USB Yoke",
];

const KNOWN_STICKS: &[&str] = &[
    "Logitech 3D Pro",
    "T.Flight Hotas",
    "T.Flight Stick X",
    "Logitech Attack 3",
    "Mad Catz F.L.Y.5 Stick",
    "SideWinder Precision 2",
    "T.16000M",
    "SideWinder Force Feedback 2",
    "Saitek Pro Flight X-55 Rhino Stick",
    "Cyborg",
    "Saitek Cyborg USB Stick",
    "AV8R",
    "Logitech Freedom 2.4",
    "SideWinder Joystick",
    "Mad Catz V.1 Stick",
    "SideWinder Precision Pro",
    "SideWinder 3D Pro",
    "Logitech Force 3D Pro",
    "WingMan Force 3D",
    "Joystick - HOTAS Warthog",
    "WingMan Extreme Digital 3D",
    "WingMan Extreme 3D",
    "Top Gun Afterburner",
    "CH FLIGHTSTICK PRO",
    "CH FIGHTERSTICK",
    "CH COMBATSTICK",
    "Saitek ST290",
    "Saitek ST90",
    "Top Gun Fox 2",
    "Aviator for Playstation 3",
    "Dark Tornado Joystick",
    "Saitek X45",
    "Saitek X36",
    "USB Joystick",
    "Pro Flight X65",
    "G940",
    "HOTAS Cougar Joystick",
    "MetalStrik 3D",
    "WingMan Attack 2",
];

const KNOWN_CONTROLLERS: &[&str] = &[
    "XBOX",
    "Playstation(R)3 Controller",
    "WingMan Cordless Gamepad",
    "WingMan RumblePad",
    "Logitech Dual Action",
    "RumblePad 2",
    "ASUS Gamepad",
    "USB WirelessGamepad",
    "Betop Controller",
    "Logitech(R) Precision(TM) Gamepad",
    "Wireless Gamepad F710",
];

const KNOWN_RC_CONTROLLERS: &[&str] = &["InterLink Elite", "RealFlight Interface"];

/// Canonical flight-control device name: VID/PID fixups first, then the
/// known-device catalogues, then a comma-safe passthrough.
pub fn canonical_flight_control(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("Mouse") {
        return "Mouse".to_string();
    } else if raw.contains("VID:1133PID:49685") {
        return "Logitech Extreme 3D".to_string();
    } else if raw.contains("WingMan Ext Digital 3D") {
        return "WingMan Extreme Digital 3D".to_string();
    } else if raw.contains("VID:1699PID:1890") {
        return "Saitek X52".to_string();
    } else if raw.contains("Wireless 360 Controller") {
        return "XBOX".to_string();
    } else if raw.contains("VID:121PID:6") {
        return "Generic USB Joystick".to_string();
    } else if raw.contains("VID:1678PID:49402") {
        return "CH Products (Unknown)".to_string();
    }
    let lower = raw.to_lowercase();
    for control in KNOWN_YOKES.iter().chain(KNOWN_STICKS).chain(KNOWN_CONTROLLERS) {
        if lower.contains(&control.to_lowercase()) {
            return control.to_string();
        }
    }
    if raw.contains(',') {
        return raw.replace(',', ";");
    }
    raw.to_string()
}

/// Flight-control device class (Yoke/Joystick/Gamepad/...).
pub fn flight_control_class(raw: &str) -> &'static str {
    let canonical = canonical_flight_control(raw);
    if canonical == "Mouse" {
        "Mouse"
    } else if KNOWN_YOKES.contains(&canonical.as_str()) {
        "Yoke"
    } else if KNOWN_STICKS.contains(&canonical.as_str()) {
        "Joystick"
    } else if KNOWN_CONTROLLERS.contains(&canonical.as_str()) {
        "Gamepad"
    } else if KNOWN_RC_CONTROLLERS.contains(&canonical.as_str()) {
        "RC Controller"
    } else if canonical.to_lowercase().contains("yoke") {
        "Yoke"
    } else if canonical.to_lowercase().contains("stick") {
        "Joystick"
    } else if canonical.to_lowercase().contains("pad") {
        "Gamepad"
    } else {
        "Unknown"
    }
}

/// Core count from a CPU label of the form "... - Cores: N - ...".
pub fn cpu_core_count(cpu_line: &str) -> u32 {
    for segment in cpu_line.split(" - ") {
        if let Some(rest) = segment.strip_prefix("Cores:") {
            return rest.trim().parse().unwrap_or(0);
        }
    }
    0
}

/// Flight-controls rollup across the raw rows.
#[derive(Debug, Default)]
pub struct FlightControlsReport {
    /// Canonical model → users, rare models collapsed into "Other", mouse
    /// users excluded.
    pub models: Vec<(String, u64)>,
    pub classes: FxHashMap<String, u64>,
    pub with_pedals: u64,
    pub without_pedals: u64,
}

pub fn flight_controls_report(rows: &[(String, String)]) -> Result<FlightControlsReport> {
    let mut models: FxHashMap<String, u64> = FxHashMap::default();
    let mut classes: FxHashMap<String, u64> = FxHashMap::default();
    let mut with_pedals = 0u64;
    let mut without_pedals = 0u64;

    for (label, count_str) in rows {
        let count = parse_count(count_str)
            .with_context(|| format!("bad count {count_str:?} for controls {label:?}"))?;
        *models.entry(canonical_flight_control(label)).or_insert(0) += count;
        *classes.entry(flight_control_class(label).to_string()).or_insert(0) += count;

        let lower = label.trim().to_lowercase();
        if lower.contains("rudder") || lower.contains("pedals") {
            with_pedals += count;
        } else {
            without_pedals += count;
        }
    }

    // Long tail of one-off devices says nothing; fold models seen fewer
    // than 5 times into "Other" and drop mouse users from the model list.
    let mut collapsed: FxHashMap<String, u64> = FxHashMap::default();
    for (model, count) in models {
        if model == "Mouse" {
            continue;
        }
        if count < 5 {
            *collapsed.entry("Other".to_string()).or_insert(0) += count;
        } else {
            *collapsed.entry(model).or_insert(0) += count;
        }
    }
    let mut ranked: Vec<(String, u64)> = collapsed.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(FlightControlsReport {
        models: ranked,
        classes,
        with_pedals,
        without_pedals,
    })
}

fn lower_contains(s: &str, checks: &[&str]) -> bool {
    let lower = s.to_lowercase();
    checks.iter().any(|sub| lower.contains(&sub.to_lowercase()))
}

/// Hardware statistics over one version window and user group.
pub struct HardwareStats<'a> {
    client: &'a AnalyticsClient,
    version: &'static VersionWindow,
    group: UserGroup,
}

impl<'a> HardwareStats<'a> {
    pub fn new(
        client: &'a AnalyticsClient,
        version: &'static VersionWindow,
        group: UserGroup,
    ) -> Self {
        HardwareStats { client, version, group }
    }

    async fn counted_rows(&self, dimension: Dimension) -> Result<Vec<(String, u64)>> {
        let rows = self.client.users(self.version, dimension, self.group, None).await?;
        rows.iter()
            .map(|(label, count_str)| {
                let count = parse_count(count_str)
                    .with_context(|| format!("bad count {count_str:?} for {label:?}"))?;
                Ok((label.clone(), count))
            })
            .collect()
    }

    /// Platform share as percents.
    pub async fn operating_systems(&self) -> Result<Vec<(String, f64)>> {
        let mut platform_count: FxHashMap<String, u64> = FxHashMap::default();
        for (label, count) in self.counted_rows(Dimension::Os).await? {
            *platform_count.entry(classify_platform(&label).to_string()).or_insert(0) += count;
        }
        Ok(map_to_percents(&platform_count, None, 0.0))
    }

    /// Per-platform OS version counts (absolute, for nested dumps).
    pub async fn operating_system_versions(
        &self,
    ) -> Result<FxHashMap<String, FxHashMap<String, u64>>> {
        let mut versions: FxHashMap<String, FxHashMap<String, u64>> = FxHashMap::default();
        for (label, count) in self.counted_rows(Dimension::Os).await? {
            let platform = classify_platform(&label).to_string();
            let version = os_version_label(&label)?;
            if !version.is_empty() {
                *versions.entry(platform).or_default().entry(version).or_insert(0) += count;
            }
        }
        Ok(versions)
    }

    /// Cumulative "users with at least N GB" tiers, as percents of all users.
    pub async fn ram_amounts(&self) -> Result<Vec<(String, f64)>> {
        let mut tiers: FxHashMap<String, u64> = FxHashMap::default();
        let mut total_users = 0u64;
        for (label, count) in self.counted_rows(Dimension::Ram).await? {
            total_users += count;
            let ram_gb: u64 = label
                .trim()
                .parse()
                .with_context(|| format!("bad RAM class {label:?}"))?;
            for tier in [2u64, 4, 8, 16, 32] {
                if ram_gb >= tier {
                    *tiers.entry(format!("{tier}GB")).or_insert(0) += count;
                }
            }
        }
        Ok(map_to_percents(&tiers, Some(total_users), 0.0))
    }

    pub async fn gpu_manufacturers(&self) -> Result<Vec<(String, f64)>> {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        for (label, count) in self.counted_rows(Dimension::Gpu).await? {
            *counts.entry(gpu_manufacturer(&label).to_string()).or_insert(0) += count;
        }
        let mut percents = map_to_percents(&counts, None, 0.0);
        // A sub-noise "Unknown" slice just clutters the chart.
        percents.retain(|(label, pct)| label != "Unknown" || *pct >= 0.3);
        Ok(percents)
    }

    pub async fn gpu_generations(&self) -> Result<Vec<(String, f64)>> {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        for (label, count) in self.counted_rows(Dimension::Gpu).await? {
            *counts.entry(gpu_generation(&label)?).or_insert(0) += count;
        }
        Ok(map_to_percents(&counts, None, 0.0))
    }

    pub async fn gpu_platforms(&self) -> Result<Vec<(String, f64)>> {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        for (label, count) in self.counted_rows(Dimension::Gpu).await? {
            *counts.entry(gpu_platform(&label)?.to_string()).or_insert(0) += count;
        }
        Ok(map_to_percents(&counts, None, 0.0))
    }

    pub async fn vr_headsets(&self) -> Result<Vec<(String, f64)>> {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        for (label, count) in self.counted_rows(Dimension::VrHeadset).await? {
            *counts.entry(canonical_headset(&label)).or_insert(0) += count;
        }
        Ok(map_to_percents(&counts, None, 1.0))
    }

    /// VR adoption since headset support shipped.
    pub async fn vr_usage(&self) -> Result<Vec<(String, f64)>> {
        let vr_start = crate::analytics::version_named("11.20r4")?.start_date();
        let total_users: u64 = self
            .client
            .users(self.version, Dimension::Ram, self.group, Some(vr_start))
            .await?
            .iter()
            .map(|(_, c)| parse_count(c))
            .sum::<Result<u64>>()?;
        let vr_users: u64 = self
            .client
            .users(self.version, Dimension::VrHeadset, self.group, Some(vr_start))
            .await?
            .iter()
            .map(|(_, c)| parse_count(c))
            .sum::<Result<u64>>()?;
        if total_users == 0 {
            return Ok(Vec::new());
        }
        let vr_pct = round_to(vr_users as f64 / total_users as f64 * 100.0, 2);
        Ok(vec![
            ("Have Used VR".to_string(), vr_pct),
            ("2-D Monitor Only".to_string(), 100.0 - vr_pct),
        ])
    }

    /// CPU core-count distribution (absolute user counts).
    pub async fn cpu_cores(&self) -> Result<Vec<(String, u64)>> {
        let rows = self.client.users(self.version, Dimension::Cpu, self.group, None).await?;
        let mut cores: FxHashMap<u32, u64> = FxHashMap::default();
        for (label, count_str) in &rows {
            let count = parse_count(count_str)
                .with_context(|| format!("bad count {count_str:?} for CPU {label:?}"))?;
            *cores.entry(cpu_core_count(label)).or_insert(0) += count;
        }
        let mut ranked: Vec<(u32, u64)> = cores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(ranked.into_iter().map(|(n, c)| (n.to_string(), c)).collect())
    }

    pub async fn flight_controls(&self) -> Result<FlightControlsReport> {
        let rows = self
            .client
            .users(self.version, Dimension::FlightControls, self.group, None)
            .await?;
        flight_controls_report(&rows)
    }

    pub async fn total_users(&self) -> Result<u64> {
        self.counted_rows(Dimension::Ram)
            .await
            .map(|rows| rows.iter().map(|(_, c)| c).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_classification() {
        assert_eq!(classify_platform("Windows"), "Windows");
        assert_eq!(classify_platform("IBM10.0.17134_64_8_gb"), "Windows");
        assert_eq!(classify_platform(" APL10.14.5 "), "Mac");
        assert_eq!(classify_platform("LIN4.15.0-54 64bit"), "Linux");
        assert_eq!(classify_platform("BeOS"), "Dafuq?");
    }

    #[test]
    fn windows_version_labels() {
        assert_eq!(os_version_label("IBM10.0.17134_64_x").unwrap(), "Windows 10.0 64-bit");
        assert_eq!(os_version_label("IBM6.3.9600_32_x").unwrap(), "Windows 8.1 32-bit");
        assert_eq!(os_version_label("IBM6.1.7601_64_x").unwrap(), "Windows 7 64-bit");
        assert_eq!(os_version_label("IBM6.0.6002_64_x").unwrap(), "Windows Vista 64-bit");
        assert_eq!(os_version_label("IBM5.1.2600_32_x").unwrap(), "Windows XP 32-bit");
    }

    #[test]
    fn mac_and_linux_version_labels() {
        assert_eq!(os_version_label("APL10.14.5").unwrap(), "\"OSX 10.14\"");
        assert_eq!(os_version_label("LIN4.15.0 32bit").unwrap(), "Linux 32-bit");
        assert_eq!(os_version_label("LIN4.15.0").unwrap(), "Linux 64-bit");
        assert_eq!(os_version_label("Amiga").unwrap(), "");
    }

    #[test]
    fn gpu_manufacturer_buckets() {
        assert_eq!(gpu_manufacturer("AMD Radeon RX 580"), "AMD/ATI");
        assert_eq!(gpu_manufacturer("ASUS EAH5770"), "AMD/ATI");
        assert_eq!(gpu_manufacturer("NVIDIA GeForce GTX 1080/PCIe/SSE2"), "Nvidia");
        assert_eq!(gpu_manufacturer("TITAN Xp"), "Nvidia");
        assert_eq!(gpu_manufacturer("Intel Iris Pro"), "Intel");
        assert_eq!(gpu_manufacturer("Matrox G400"), "Unknown");
    }

    #[test]
    fn gpu_generation_buckets() {
        assert_eq!(gpu_generation("Quadro K2000").unwrap(), "Nvidia Quadro (All Generations)");
        assert_eq!(gpu_generation("GeForce GTX 970 ").unwrap(), "GeForce 9xx");
        assert_eq!(gpu_generation("GeForce GTX 1080/PCIe/SSE2").unwrap(), "GeForce 1xxx");
        assert_eq!(gpu_generation("TITAN X (Pascal)").unwrap(), "GeForce 9xx");
        assert_eq!(gpu_generation("Radeon R9 290").unwrap(), "Radeon R9");
        assert_eq!(gpu_generation("AMD Radeon HD 7870").unwrap(), "Radeon 7xxxM");
        assert_eq!(
            gpu_generation("Intel HD Graphics 4600").unwrap(),
            "Intel Integrated (7th Generation; HD 2500/4x00/5x00)"
        );
        assert_eq!(gpu_generation("Voodoo2").unwrap(), "Other");
    }

    #[test]
    fn gpu_platform_buckets() {
        assert_eq!(gpu_platform("GeForce GTX 970M").unwrap(), "Mobile");
        assert_eq!(gpu_platform("GeForce GTX 970 ").unwrap(), "Desktop");
        assert_eq!(gpu_platform("Intel HD Graphics 530").unwrap(), "Intel");
    }

    #[test]
    fn headset_dedup_first_match_wins() {
        assert_eq!(canonical_headset("Oculus Rift CV1"), "Oculus Rift");
        assert_eq!(canonical_headset("HTC Vive (lighthouse)"), "OpenVR (like HTC Vive)");
        assert_eq!(canonical_headset("iVRy SteamVR Driver"), "Phone");
        assert_eq!(canonical_headset("Totally New Headset"), "Totally New Headset");
    }

    #[test]
    fn flight_control_canonicalization() {
        assert_eq!(canonical_flight_control("Mouse + keyboard"), "Mouse");
        assert_eq!(canonical_flight_control("VID:1699PID:1890 stick"), "Saitek X52");
        assert_eq!(canonical_flight_control("saitek x52 pro"), "Saitek X52");
        assert_eq!(canonical_flight_control("Odd, Device"), "Odd; Device");
    }

    #[test]
    fn flight_control_classes() {
        assert_eq!(flight_control_class("Mouse"), "Mouse");
        assert_eq!(flight_control_class("Saitek Pro Flight Yoke System"), "Yoke");
        assert_eq!(flight_control_class("T.16000M"), "Joystick");
        assert_eq!(flight_control_class("XBOX One pad"), "Gamepad");
        assert_eq!(flight_control_class("My Custom Yoke Rig"), "Yoke");
        assert_eq!(flight_control_class("Steering Wheel"), "Unknown");
    }

    #[test]
    fn cpu_core_count_extraction() {
        assert_eq!(cpu_core_count("Intel i7 - Cores: 8 - GHz: 3.6"), 8);
        assert_eq!(cpu_core_count("Cores: 4"), 4);
        assert_eq!(cpu_core_count("Mystery CPU"), 0);
    }

    #[test]
    fn flight_controls_report_collapses_rare_models() {
        let rows: Vec<(String, String)> = vec![
            ("Saitek X52".to_string(), "100".to_string()),
            ("One-Off Stick".to_string(), "2".to_string()),
            ("Mouse".to_string(), "50".to_string()),
            ("CH Pedals and rudder".to_string(), "10".to_string()),
        ];
        let report = flight_controls_report(&rows).unwrap();
        assert!(report.models.iter().any(|(m, c)| m == "Saitek X52" && *c == 100));
        assert!(report.models.iter().all(|(m, _)| m != "Mouse"));
        assert!(report.models.iter().any(|(m, c)| m == "Other" && *c == 2));
        assert_eq!(report.with_pedals, 10);
        assert_eq!(report.without_pedals, 152);
    }
}
