//! End-to-end checks through the facade.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use jyoti_core::AnalyticSource;
use jyoti_rs::{
    AstrologyConfig, Body, CalcFlags, CalendarVariant, CivilDate, EngineFacade, EngineOptions,
    ErrorKind, GeoLocation, Instant, JyotiError, MoonChart, NadiException, Operation,
    PositionTier, PrecisePositionProvider, PrecisionLevel, ProviderError,
};
use jyoti_vedic_base::{Graha, Koota, Nakshatra, Rashi};

fn new_delhi() -> GeoLocation {
    GeoLocation::new(28.6139, 77.2090, 0.0)
}

fn j2000() -> Instant {
    Instant::new(2000, 1, 1, 12, 0, 0.0).unwrap()
}

fn analytic() -> EngineFacade {
    EngineFacade::analytic(AstrologyConfig::default()).unwrap()
}

/// Replies with the analytic model's numbers, tagged precise by the source.
struct Mirror;

impl PrecisePositionProvider for Mirror {
    fn compute(&self, jd_ut: f64, code: i32, _: CalcFlags) -> Result<Vec<f64>, ProviderError> {
        let body = Body::from_provider_code(code).ok_or(ProviderError::Failed {
            code: -1,
            message: format!("unknown body {code}"),
        })?;
        let src = AnalyticSource::default();
        let jd_tt = jd_ut + 64.0 / 86_400.0;
        let p = src.apparent_at(body, jd_tt);
        Ok(vec![p.lon_deg, p.lat_deg, p.distance, src.speed_at(body, jd_tt)])
    }
}

struct Hung {
    calls: AtomicU32,
}

impl PrecisePositionProvider for Hung {
    fn compute(&self, _: f64, _: i32, _: CalcFlags) -> Result<Vec<f64>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(200));
        Ok(vec![0.0, 0.0, 1.0, 1.0])
    }
}

struct Garbage;

impl PrecisePositionProvider for Garbage {
    fn compute(&self, _: f64, _: i32, _: CalcFlags) -> Result<Vec<f64>, ProviderError> {
        Ok(vec![10.0, 0.0])
    }
}

fn fast_options() -> EngineOptions {
    EngineOptions {
        provider_timeout: Duration::from_millis(30),
        provider_max_retries: 1,
        ..Default::default()
    }
}

#[test]
fn new_delhi_chart() {
    let engine = analytic();
    let chart = engine.chart(&j2000(), &new_delhi()).unwrap();
    assert_eq!(chart.placements.len(), 12);
    assert_eq!(chart.tier(), PositionTier::Fallback);

    let moon = chart.placement(Body::Moon).unwrap();
    assert!(
        (moon.sidereal_longitude_deg - 199.47).abs() < 0.1,
        "Moon = {}",
        moon.sidereal_longitude_deg
    );
    assert_eq!(moon.classification.rashi.rashi, Rashi::Tula);
    assert_eq!(moon.classification.nakshatra.nakshatra, Nakshatra::Swati);
    assert_eq!(moon.classification.pada(), 4);

    // Tropical Placidus ascendant ≈ 100.2° less Lahiri ≈ 23.853°
    assert!(chart.houses.sidereal);
    assert!(
        (chart.houses.ascendant_deg - 76.35).abs() < 0.15,
        "Asc = {}",
        chart.houses.ascendant_deg
    );
    assert_eq!(chart.lagna().unwrap().rashi.rashi, Rashi::Mithuna);
    let house = chart.house_of(Body::Moon).unwrap();
    assert!((1..=12).contains(&house));

    let rahu = chart.placement(Body::Rahu).unwrap().sidereal_longitude_deg;
    let ketu = chart.placement(Body::Ketu).unwrap().sidereal_longitude_deg;
    assert!(((rahu - ketu).rem_euclid(360.0) - 180.0).abs() < 1e-9);
}

#[test]
fn dasha_starts_with_rahu_balance() {
    let engine = analytic();
    let timeline = engine.dasha(&j2000(), None).unwrap();
    let first = timeline.mahadashas()[0];
    assert_eq!(first.lord, Graha::Rahu);
    // Moon is ~96% through Swati
    let years = first.duration_days() / 365.256363;
    assert!(years > 0.3 && years < 1.2, "Rahu balance {years} years");

    let again = engine.dasha(&j2000(), None).unwrap();
    assert!(Arc::ptr_eq(&timeline, &again));
}

#[test]
fn current_dasha_before_birth_is_rejected() {
    let engine = analytic();
    let before = Instant::new(1999, 6, 1, 0, 0, 0.0).unwrap();
    let err = engine.current_dasha(&j2000(), None, &before).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let later = Instant::new(2010, 6, 1, 0, 0, 0.0).unwrap();
    let snap = engine.current_dasha(&j2000(), None, &later).unwrap();
    assert_eq!(snap.periods.len(), 3);
    // Rahu balance, then Jupiter's 16 years
    assert_eq!(snap.mahadasha().unwrap().lord, Graha::Guru);
}

#[test]
fn concurrent_dasha_requests_compute_once() {
    let engine = analytic();
    let birth = Instant::new(1985, 3, 14, 4, 30, 0.0).unwrap();
    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| engine.dasha(&birth, None).unwrap());
        }
    });
    assert_eq!(engine.cache_stats(Operation::Dasha).computations, 1);
}

#[test]
fn same_nakshatra_different_pada_cancels_nadi() {
    let bride = MoonChart::new(Rashi::Tula, Nakshatra::Swati, 1).unwrap();
    let groom = MoonChart::new(Rashi::Tula, Nakshatra::Swati, 4).unwrap();

    let engine = analytic();
    let lenient = engine.compatibility(&bride, &groom);
    assert_eq!(lenient.scores.points(Koota::Nadi), 8.0);
    assert!(lenient.nadi_dosha.cancelled);

    let strict = EngineFacade::analytic(
        AstrologyConfig::default().with_nadi_exception(NadiException::Strict),
    )
    .unwrap()
    .compatibility(&bride, &groom);
    assert_eq!(strict.scores.points(Koota::Nadi), 0.0);
    assert!(strict.nadi_dosha.is_active());
    assert!(strict.total() < lenient.total());
}

#[test]
fn compatibility_of_births_uses_moon_charts() {
    let engine = analytic();
    let bride = Instant::new(1990, 5, 20, 6, 0, 0.0).unwrap();
    let groom = Instant::new(1988, 11, 2, 18, 30, 0.0).unwrap();
    let r = engine
        .compatibility_of_births((&bride, None), (&groom, None))
        .unwrap();
    let direct = engine.compatibility(
        &engine.moon_chart(&bride, None).unwrap(),
        &engine.moon_chart(&groom, None).unwrap(),
    );
    assert_eq!(r, direct);
    assert!(r.total() >= 0.0 && r.total() <= 36.0);
}

#[test]
fn precise_provider_results_are_tagged_precise() {
    let engine = EngineFacade::new(
        AstrologyConfig::default(),
        EngineOptions::default(),
        Some(Arc::new(Mirror)),
    )
    .unwrap();
    assert!(engine.source().has_precise());
    let p = engine.position(Body::Moon, &j2000(), None).unwrap();
    assert_eq!(p.tier, PositionTier::Precise);
    let fallback = analytic().position(Body::Moon, &j2000(), None).unwrap();
    assert!((p.longitude_deg - fallback.longitude_deg).abs() < 1e-6);
}

#[test]
fn disabled_native_source_never_calls_provider() {
    let hung = Arc::new(Hung {
        calls: AtomicU32::new(0),
    });
    let engine = EngineFacade::new(
        AstrologyConfig::default().with_native_source(false),
        fast_options(),
        Some(hung.clone()),
    )
    .unwrap();
    let p = engine.position(Body::Sun, &j2000(), None).unwrap();
    assert_eq!(p.tier, PositionTier::Fallback);
    assert_eq!(hung.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn hung_provider_degrades_to_fallback() {
    let hung = Arc::new(Hung {
        calls: AtomicU32::new(0),
    });
    let engine = EngineFacade::new(AstrologyConfig::default(), fast_options(), Some(hung.clone()))
        .unwrap();
    let p = engine.position(Body::Sun, &j2000(), None).unwrap();
    assert_eq!(p.tier, PositionTier::Fallback);
    assert!(hung.calls.load(Ordering::SeqCst) >= 1);
}

#[test]
fn malformed_vector_surfaces_under_require_precise() {
    let config = AstrologyConfig::default().with_precision(PrecisionLevel::RequirePrecise);
    let engine = EngineFacade::new(config, fast_options(), Some(Arc::new(Garbage))).unwrap();
    let err = engine.position(Body::Mars, &j2000(), None).unwrap_err();
    assert!(matches!(err, JyotiError::Position(_)));
    assert_eq!(err.kind(), ErrorKind::CalculationFailure);

    let lenient =
        EngineFacade::new(AstrologyConfig::default(), fast_options(), Some(Arc::new(Garbage)))
            .unwrap();
    let p = lenient.position(Body::Mars, &j2000(), None).unwrap();
    assert_eq!(p.tier, PositionTier::Fallback);
}

#[test]
fn polar_houses_are_reported() {
    let engine = analytic();
    let pole = GeoLocation::new(89.99, 0.0, 0.0);
    let err = engine.houses(&j2000(), &pole).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PolarUndefined);
    // errors are not cached
    assert!(engine.houses(&j2000(), &pole).is_err());
    assert_eq!(engine.cache_stats(Operation::Houses).computations, 2);
}

#[test]
fn invalid_location_is_validation() {
    let engine = analytic();
    let date = CivilDate::new(2024, 4, 9).unwrap();
    let err = engine.day(date, 95.0, 10.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn ugadi_day_and_year() {
    let engine = analytic();
    let date = CivilDate::new(2024, 4, 9).unwrap();
    let day = engine.day(date, 28.6139, 77.2090).unwrap();
    assert!(day.festivals.iter().any(|f| f == "Ugadi"), "{:?}", day.festivals);
    assert!(day.windows.rahu_kalam.is_within(&day.windows.daytime));
    assert!(day.sunrise_jd < day.sunset_jd);

    let year = engine
        .festivals(2024, 28.6139, 77.2090, &CalendarVariant::amanta())
        .unwrap();
    let on = |name: &str| year.iter().find(|o| o.name == name).map(|o| o.date);
    assert_eq!(on("Ugadi"), Some(date));
    assert_eq!(on("Makar Sankranti"), CivilDate::new(2024, 1, 15).ok());
    assert!(year.windows(2).all(|w| w[0].date <= w[1].date));

    let cached = engine
        .festivals(2024, 28.6139, 77.2090, &CalendarVariant::amanta())
        .unwrap();
    assert!(Arc::ptr_eq(&year, &cached));
}

#[test]
fn config_round_trips_through_json() {
    let config = AstrologyConfig::default()
        .with_calendar_variant(CalendarVariant::purnimanta())
        .with_nadi_exception(NadiException::Extended);
    let json = serde_json::to_string(&config).unwrap();
    let back: AstrologyConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    // missing fields take defaults
    let partial: AstrologyConfig = serde_json::from_str(r#"{"topocentric":true}"#).unwrap();
    assert!(partial.topocentric);
    assert_eq!(partial.ayanamsha, AstrologyConfig::default().ayanamsha);

    let options: EngineOptions = serde_json::from_str(r#"{"cache_capacity":16}"#).unwrap();
    assert_eq!(options.cache_capacity, 16);
    assert!(options.validate().is_ok());
}

#[test]
fn moon_chart_json_must_be_consistent() {
    let chart: MoonChart =
        serde_json::from_str(r#"{"rashi":"Tula","nakshatra":"Swati","pada":2}"#).unwrap();
    assert_eq!(chart, MoonChart::new(Rashi::Tula, Nakshatra::Swati, 2).unwrap());

    let impossible =
        serde_json::from_str::<MoonChart>(r#"{"rashi":"Mesha","nakshatra":"Hasta","pada":1}"#);
    assert!(impossible.is_err());
}
