//! Adapter that runs an injected [`PrecisePositionProvider`] on a worker
//! thread.
//!
//! Each request is sent over a channel together with a cancellation flag
//! and a one-shot reply channel. The caller waits with `recv_timeout`; on
//! timeout it raises the flag so the worker skips the job if it has not
//! started it yet. A job that is already running cannot be interrupted, so
//! a provider that hangs keeps the worker busy and later requests time out
//! too. The resilient layer's breaker exists for exactly that case.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use jyoti_frames::normalize_deg;
use jyoti_time::Instant;
use tracing::{debug, info, warn};

use crate::body::Body;
use crate::error::CalculationError;
use crate::location::GeoLocation;
use crate::position::{BodyPosition, PositionTier};
use crate::provider::{CalcFlags, PrecisePositionProvider, ProviderError};
use crate::source::{PositionOptions, PositionSource};
use crate::topocentric::to_topocentric;

/// Timing and retry settings for the precise adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreciseSettings {
    /// Budget for one provider call.
    pub timeout: Duration,
    /// Extra attempts after a timeout. Other failures are not retried.
    pub max_retries: u32,
    pub options: PositionOptions,
}

impl Default for PreciseSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            max_retries: 1,
            options: PositionOptions::default(),
        }
    }
}

type Reply = Result<Vec<f64>, ProviderError>;

struct Job {
    jd_ut: f64,
    code: i32,
    flags: CalcFlags,
    cancelled: Arc<AtomicBool>,
    reply: Sender<Reply>,
}

/// Position source backed by an external precise provider.
pub struct PreciseSource {
    jobs: Sender<Job>,
    settings: PreciseSettings,
}

impl std::fmt::Debug for PreciseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreciseSource")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl PreciseSource {
    /// Start the worker thread that owns calls into `provider`.
    ///
    /// The worker exits once this source (the last job sender) is dropped
    /// and any in-progress call returns.
    pub fn spawn(
        provider: Arc<dyn PrecisePositionProvider>,
        settings: PreciseSettings,
    ) -> Result<Self, CalculationError> {
        if settings.timeout.is_zero() {
            return Err(CalculationError::Validation(
                "provider timeout must be positive".into(),
            ));
        }
        match provider.ephemeris_path() {
            Some(path) => info!(path = %path.display(), "starting precise provider worker"),
            None => info!("starting precise provider worker"),
        }

        let (tx, rx) = mpsc::channel::<Job>();
        thread::Builder::new()
            .name("jyoti-precise".into())
            .spawn(move || {
                for job in rx {
                    if job.cancelled.load(Ordering::Acquire) {
                        debug!(code = job.code, "skipping cancelled provider request");
                        continue;
                    }
                    let result = provider.compute(job.jd_ut, job.code, job.flags);
                    // The caller may have timed out and dropped its receiver.
                    let _ = job.reply.send(result);
                }
            })
            .map_err(|e| {
                CalculationError::SourceUnavailable(format!("cannot start provider worker: {e}"))
            })?;

        Ok(Self { jobs: tx, settings })
    }

    pub fn settings(&self) -> PreciseSettings {
        self.settings
    }

    fn timeout_error(&self, attempts: u32) -> CalculationError {
        CalculationError::Timeout {
            attempts,
            timeout_ms: self.settings.timeout.as_millis() as u64,
        }
    }

    fn call_once(&self, jd_ut: f64, code: i32, flags: CalcFlags) -> Result<Vec<f64>, CalculationError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        self.jobs
            .send(Job {
                jd_ut,
                code,
                flags,
                cancelled: Arc::clone(&cancelled),
                reply: reply_tx,
            })
            .map_err(|_| CalculationError::SourceUnavailable("provider worker has stopped".into()))?;

        match reply_rx.recv_timeout(self.settings.timeout) {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(e)) => Err(CalculationError::from_provider(e, self.settings.timeout)),
            Err(RecvTimeoutError::Timeout) => {
                cancelled.store(true, Ordering::Release);
                Err(self.timeout_error(1))
            }
            Err(RecvTimeoutError::Disconnected) => Err(CalculationError::SourceUnavailable(
                "provider worker dropped the request".into(),
            )),
        }
    }

    /// Raw provider vector, retrying timeouts up to `max_retries` times.
    pub fn raw(&self, jd_ut: f64, code: i32, flags: CalcFlags) -> Result<Vec<f64>, CalculationError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.call_once(jd_ut, code, flags) {
                Err(CalculationError::Timeout { .. }) if attempts <= self.settings.max_retries => {
                    warn!(code, attempt = attempts, "precise provider timed out, retrying");
                }
                Err(CalculationError::Timeout { .. }) => return Err(self.timeout_error(attempts)),
                other => return other,
            }
        }
    }
}

/// Check a provider vector and unpack `(lon, lat, dist, speed)`.
pub fn validate_vector(body: Body, raw: &[f64]) -> Result<[f64; 4], CalculationError> {
    if !(4..=6).contains(&raw.len()) {
        return Err(CalculationError::Failed(format!(
            "provider returned {} values for {body}, expected 4 to 6",
            raw.len()
        )));
    }
    if raw.iter().any(|v| !v.is_finite()) {
        return Err(CalculationError::Failed(format!(
            "provider returned non-finite values for {body}"
        )));
    }
    let lon = normalize_deg(raw[0]);
    let (lat, dist, speed) = (raw[1], raw[2], raw[3]);
    if !(0.0..360.0).contains(&lon) {
        return Err(CalculationError::Failed(format!("longitude {lon} out of range for {body}")));
    }
    if lat.abs() > 90.0 {
        return Err(CalculationError::Failed(format!("latitude {lat} out of range for {body}")));
    }
    if dist < 0.0 {
        return Err(CalculationError::Failed(format!("negative distance {dist} for {body}")));
    }
    Ok([lon, lat, dist, speed])
}

impl PositionSource for PreciseSource {
    fn position(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<BodyPosition, CalculationError> {
        let location = location.map(|l| l.validated()).transpose()?;
        let code = body.provider_code(self.settings.options.node_mode);
        let raw = self.raw(instant.jd_ut(), code, CalcFlags::SPEED)?;
        let [mut lon, mut lat, dist, speed] = validate_vector(body, &raw)?;
        if body == Body::Ketu {
            lon = normalize_deg(lon + 180.0);
            lat = -lat;
        }
        let geocentric = BodyPosition {
            body,
            longitude_deg: lon,
            latitude_deg: lat,
            distance_au: if body.has_distance() { dist } else { 0.0 },
            speed_deg_per_day: speed,
            tier: PositionTier::Precise,
        };
        match location {
            Some(loc) if self.settings.options.topocentric => {
                to_topocentric(geocentric, instant, &loc)
            }
            _ => Ok(geocentric),
        }
    }

    fn tier(&self) -> PositionTier {
        PositionTier::Precise
    }

    fn name(&self) -> &'static str {
        "precise"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::AtomicU32;

    struct Fixed(Vec<f64>);

    impl PrecisePositionProvider for Fixed {
        fn compute(&self, _: f64, _: i32, _: CalcFlags) -> Result<Vec<f64>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct Sleepy {
        delay: Duration,
        calls: AtomicU32,
    }

    impl PrecisePositionProvider for Sleepy {
        fn compute(&self, _: f64, _: i32, _: CalcFlags) -> Result<Vec<f64>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            Ok(vec![10.0, 0.0, 1.0, 1.0])
        }
    }

    fn instant() -> Instant {
        Instant::new(2000, 1, 1, 12, 0, 0.0).unwrap()
    }

    fn settings(timeout_ms: u64, retries: u32) -> PreciseSettings {
        PreciseSettings {
            timeout: Duration::from_millis(timeout_ms),
            max_retries: retries,
            options: PositionOptions::default(),
        }
    }

    #[test]
    fn passes_through_valid_vector() {
        let src = PreciseSource::spawn(
            Arc::new(Fixed(vec![-10.0, 1.5, 0.9, 1.01, 0.0, 0.0])),
            settings(1000, 0),
        )
        .unwrap();
        let p = src.position(Body::Sun, &instant(), None).unwrap();
        assert_eq!(p.tier, PositionTier::Precise);
        assert!((p.longitude_deg - 350.0).abs() < 1e-12);
        assert_eq!(p.latitude_deg, 1.5);
    }

    #[test]
    fn ketu_is_derived_from_node() {
        let src =
            PreciseSource::spawn(Arc::new(Fixed(vec![100.0, 0.0, 0.0, -0.05])), settings(1000, 0))
                .unwrap();
        let rahu = src.position(Body::Rahu, &instant(), None).unwrap();
        let ketu = src.position(Body::Ketu, &instant(), None).unwrap();
        assert!((normalize_deg(ketu.longitude_deg - rahu.longitude_deg) - 180.0).abs() < 1e-12);
        assert!(ketu.is_retrograde());
    }

    #[test]
    fn malformed_vectors_are_calculation_failures() {
        for bad in [
            vec![1.0, 2.0, 3.0],
            vec![f64::NAN, 0.0, 1.0, 1.0],
            vec![10.0, 95.0, 1.0, 1.0],
            vec![10.0, 0.0, -1.0, 1.0],
            vec![0.0; 7],
        ] {
            let err = validate_vector(Body::Mars, &bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CalculationFailure, "{bad:?}");
        }
    }

    #[test]
    fn timeout_is_retried_then_reported() {
        let provider = Arc::new(Sleepy {
            delay: Duration::from_millis(300),
            calls: AtomicU32::new(0),
        });
        let src = PreciseSource::spawn(provider, settings(20, 2)).unwrap();
        let err = src.position(Body::Moon, &instant(), None).unwrap_err();
        assert_eq!(
            err,
            CalculationError::Timeout {
                attempts: 3,
                timeout_ms: 20
            }
        );
    }

    struct Stalled;

    impl PrecisePositionProvider for Stalled {
        fn compute(&self, _: f64, _: i32, _: CalcFlags) -> Result<Vec<f64>, ProviderError> {
            Err(ProviderError::Timeout)
        }
    }

    #[test]
    fn provider_timeout_reports_configured_budget() {
        let src = PreciseSource::spawn(Arc::new(Stalled), settings(250, 1)).unwrap();
        let err = src.position(Body::Sun, &instant(), None).unwrap_err();
        assert_eq!(
            err,
            CalculationError::Timeout {
                attempts: 2,
                timeout_ms: 250
            }
        );
    }

    #[test]
    fn cancelled_requests_are_skipped() {
        let provider = Arc::new(Sleepy {
            delay: Duration::from_millis(200),
            calls: AtomicU32::new(0),
        });
        let shared: Arc<dyn PrecisePositionProvider> = provider.clone();
        let src = PreciseSource::spawn(shared, settings(10, 3)).unwrap();
        assert!(src.position(Body::Moon, &instant(), None).is_err());
        // Let the worker finish the first call and drain the cancelled ones.
        thread::sleep(Duration::from_millis(400));
        assert!(provider.calls.load(Ordering::SeqCst) <= 1);
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = PreciseSource::spawn(Arc::new(Fixed(vec![])), settings(0, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
