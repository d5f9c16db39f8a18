//! Subcommand implementations. Each returns a serializable report that
//! `main` prints as JSON.

use crate::config::GalaxyConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use galaxy_attrs::{derive, id_hash, EntityFeatures, PlanetSize, VisualAttributes};
use galaxy_motion::{ManualScheduler, MotionDriver, MotionEngine, MotionState, Viewport};
use galaxy_store::{
    Authorization, Catalog, MemorySessionStorage, MemoryStore, SessionGuard,
};
use galaxy_types::{demo_projects, Planet, Profile, ProjectRecord};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

// =============================================================================
// attrs
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AttrsReport {
    pub id: String,
    pub hash: i32,
    pub features: EntityFeatures,
    #[serde(flatten)]
    pub attributes: VisualAttributes,
    pub size: PlanetSize,
    pub gradient: String,
}

pub fn attrs(id: &str, features: EntityFeatures) -> AttrsReport {
    let attributes = derive(id, &features);
    AttrsReport {
        id: id.to_string(),
        hash: id_hash(id),
        features,
        size: attributes.size(),
        gradient: attributes.gradient(),
        attributes,
    }
}

// =============================================================================
// planets
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PlanetsReport {
    pub planets: Vec<Planet>,
    pub profile: Profile,
}

/// Records from a JSON array file, or the demo projects.
pub fn read_records(file: Option<&Path>) -> Result<Vec<ProjectRecord>> {
    let Some(path) = file else {
        debug!("no records file, using demo projects");
        return Ok(demo_projects());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse project records in {}", path.display()))
}

pub async fn planets(records: Vec<ProjectRecord>) -> PlanetsReport {
    let catalog = Catalog::with_store(Arc::new(MemoryStore::with_projects(records)));
    let planets = catalog.load().await;
    let profile = catalog.load_profile().await;
    PlanetsReport { planets, profile }
}

// =============================================================================
// simulate
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct SimulateArgs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub ticks: u32,
}

#[derive(Debug, Serialize)]
pub struct SimulateReport {
    pub ticks: u64,
    pub state: MotionState,
    pub residual: f64,
}

/// Feed one sample and run `ticks` frames on a headless engine.
pub fn simulate(config: &GalaxyConfig, args: SimulateArgs) -> Result<SimulateReport> {
    let viewport = Viewport::new(args.width, args.height)?;
    let mut engine = MotionEngine::new(config.motion, ManualScheduler::new());

    engine.report_raw_input(args.x, args.y, viewport);
    if args.ticks > 0 {
        // start() runs the first tick
        engine.start();
        for _ in 1..args.ticks {
            engine.advance();
        }
        engine.stop();
    }

    let state = engine.state();
    Ok(SimulateReport {
        ticks: engine.tick_count(),
        state,
        residual: state.distance_to_target(),
    })
}

/// Same scenario on the async driver, in wall-clock time at the configured
/// frame rate.
pub async fn simulate_realtime(config: &GalaxyConfig, args: SimulateArgs) -> Result<SimulateReport> {
    let viewport = Viewport::new(args.width, args.height)?;
    let driver = MotionDriver::spawn(config.motion)?;
    let mut updates = driver.watch();

    driver.report_raw_input(args.x, args.y, viewport)?;
    driver.start()?;

    let mut ticks = 0u64;
    let deadline = config.motion.frame_period() * args.ticks.saturating_add(1);
    let run = async {
        while ticks < u64::from(args.ticks) && updates.changed().await.is_ok() {
            ticks += 1;
        }
    };
    if tokio::time::timeout(deadline, run).await.is_err() {
        debug!(ticks, "realtime simulation hit its deadline");
    }

    // Shutdown publishes the final, inactive state
    driver.shutdown().await;
    let state = *updates.borrow();

    Ok(SimulateReport {
        ticks,
        state,
        residual: state.distance_to_target(),
    })
}

// =============================================================================
// login
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LoginReport {
    pub authorized: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub request: &'static str,
}

/// Check `secret` against the configured admin secret, then run the
/// server-side cookie check as a protected page load would.
pub fn login(config: &GalaxyConfig, secret: &str, now: DateTime<Utc>) -> Result<LoginReport> {
    let cookies = MemorySessionStorage::new();
    let guard = SessionGuard::new(
        &config.session,
        Arc::new(MemorySessionStorage::new()),
        Arc::new(cookies.clone()),
    )?;

    let authorized = guard.login(secret, now) && guard.check(now);
    let request = match SessionGuard::authorize_request(&cookies, now) {
        Authorization::Authorized => "authorized",
        Authorization::Redirect { location } => location,
    };
    info!(authorized, "admin login checked");

    Ok(LoginReport {
        authorized,
        expires_at: guard.expires_at(),
        request,
    })
}

/// Settle time for a realtime run, for log output.
pub fn expected_duration(config: &GalaxyConfig, ticks: u32) -> Duration {
    config.motion.frame_period() * ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_attrs::PlanetColor;
    use pretty_assertions::assert_eq;

    fn scenario(ticks: u32) -> SimulateArgs {
        SimulateArgs {
            x: 100.0,
            y: 50.0,
            width: 1000.0,
            height: 500.0,
            ticks,
        }
    }

    #[test]
    fn attrs_report_for_known_vector() {
        let report = attrs("1", EntityFeatures::new(16, 4, false));
        assert_eq!(report.hash, 49);
        assert_eq!(report.attributes.color, PlanetColor::Pink);
        assert_eq!(report.attributes.importance, 6);
        assert_eq!(report.size, PlanetSize::Huge);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["color"], "#ec4899");
        assert_eq!(json["importance"], 6);
        assert_eq!(json["size"], "huge");
    }

    #[test]
    fn read_records_defaults_to_demo() {
        let records = read_records(None).unwrap();
        assert_eq!(records.len(), 5);
        assert!(read_records(Some(Path::new("/nonexistent/records.json"))).is_err());
    }

    #[tokio::test]
    async fn planets_report_for_demo_data() {
        let report = planets(demo_projects()).await;
        assert_eq!(report.planets.len(), 5);
        assert_eq!(report.profile, Profile::default());
    }

    #[test]
    fn simulate_matches_closed_form() {
        let report = simulate(&GalaxyConfig::default(), scenario(50)).unwrap();
        assert_eq!(report.ticks, 50);
        assert!(!report.state.active);
        let expected = 100.0 * (1.0 - 0.9f64.powi(50));
        assert!((report.state.current.x - expected).abs() < 1e-9);
    }

    #[test]
    fn simulate_zero_ticks_leaves_current_at_origin() {
        let report = simulate(&GalaxyConfig::default(), scenario(0)).unwrap();
        assert_eq!(report.ticks, 0);
        assert_eq!(report.state.current, MotionState::default().current);
        assert_eq!(report.state.normalized.x, -0.8);
    }

    #[test]
    fn simulate_rejects_degenerate_viewport() {
        let args = SimulateArgs {
            width: 0.0,
            ..scenario(10)
        };
        assert!(simulate(&GalaxyConfig::default(), args).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn realtime_simulation_moves_towards_target() {
        let report = simulate_realtime(&GalaxyConfig::default(), scenario(30))
            .await
            .unwrap();
        assert!(report.ticks > 0);
        assert!(!report.state.active);
        assert!(report.state.current.x > 0.0 && report.state.current.x < 100.0);
        assert!(report.residual > 0.0);
    }

    #[test]
    fn login_with_configured_secret() {
        let config = GalaxyConfig::default().with_admin_secret(Some("open sesame".into()));
        let now = Utc::now();

        let ok = login(&config, "open sesame", now).unwrap();
        assert!(ok.authorized);
        assert_eq!(ok.request, "authorized");
        assert!(ok.expires_at.is_some());

        let rejected = login(&config, "wrong", now).unwrap();
        assert!(!rejected.authorized);
        assert_eq!(rejected.request, "/");
        assert_eq!(rejected.expires_at, None);

        assert!(login(&GalaxyConfig::default(), "anything", now).is_err());
    }
}
