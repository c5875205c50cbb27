//! End-to-end tests for the verification orchestrator with in-process fakes.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tz_capture::{
    Camera, CameraConstraints, CameraError, CaptureError, CapturedFrame, ProgressSink,
    RecognitionError, RecognizedText, RecognizerFactory, TextRecognizer,
    TranscriptRecognizerFactory,
};
use tz_core::{DocumentKind, KycLevel, ScanError, SubjectAddress};
use tz_session::{SessionConfig, SessionError, VerificationOrchestrator};
use tz_state::{ScanStage, ScanState, ScanningPhase, TransitionError};
use tz_zkp::{
    KycVerifier, ProofArtifact, ProofError, ProofGenerator, ProofRequest, StubKycVerifier,
    VerificationReceipt, VerifyError,
};

const PASSPORT_TRANSCRIPT: &str = "REPUBLIC OF UTOPIA\n\
P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<\n\
L898902C36UTO7408122F1204159ZE184226B<<<<<10\n";

// ── Fakes ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct CameraCounters {
    initialized: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl CameraCounters {
    fn initialized(&self) -> usize {
        self.initialized.load(Ordering::SeqCst)
    }

    fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct FakeCamera {
    deny: bool,
    frame: Vec<u8>,
    live: bool,
    counters: CameraCounters,
}

impl FakeCamera {
    fn with_frame(frame: &str, counters: &CameraCounters) -> Self {
        Self::with_bytes(frame.as_bytes().to_vec(), counters)
    }

    fn with_bytes(frame: Vec<u8>, counters: &CameraCounters) -> Self {
        Self {
            deny: false,
            frame,
            live: false,
            counters: counters.clone(),
        }
    }

    fn denied(counters: &CameraCounters) -> Self {
        Self {
            deny: true,
            ..Self::with_frame("", counters)
        }
    }
}

impl Camera for FakeCamera {
    fn initialize(
        &mut self,
        _constraints: CameraConstraints,
    ) -> impl Future<Output = Result<(), CameraError>> + Send {
        self.counters.initialized.fetch_add(1, Ordering::SeqCst);
        let result = if self.deny {
            Err(CameraError::PermissionDenied)
        } else {
            self.live = true;
            Ok(())
        };
        async move { result }
    }

    fn capture_frame(&mut self) -> impl Future<Output = Result<CapturedFrame, CaptureError>> + Send {
        let result = if self.live {
            Ok(CapturedFrame::new(self.frame.clone(), "text/plain"))
        } else {
            Err(CaptureError::NotReady)
        };
        async move { result }
    }

    fn is_ready(&self) -> bool {
        self.live
    }

    fn release(&mut self) {
        self.live = false;
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
enum ProverBehavior {
    Respond(ProofArtifact),
    Reject(String),
    Hang,
}

struct FakeProver {
    behavior: ProverBehavior,
    calls: Arc<AtomicUsize>,
}

impl FakeProver {
    fn new(behavior: ProverBehavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                behavior,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl ProofGenerator for FakeProver {
    fn generate_proof(
        &self,
        _request: &ProofRequest,
    ) -> impl Future<Output = Result<ProofArtifact, ProofError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.clone();
        async move {
            match behavior {
                ProverBehavior::Respond(artifact) => Ok(artifact),
                ProverBehavior::Reject(message) => Err(ProofError::Rejected(message)),
                ProverBehavior::Hang => std::future::pending().await,
            }
        }
    }
}

struct StalledRecognizer;

impl TextRecognizer for StalledRecognizer {
    fn recognize(
        self,
        _frame: CapturedFrame,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<RecognizedText, RecognitionError>> + Send + 'static {
        async move {
            progress.report(20);
            std::future::pending::<Result<RecognizedText, RecognitionError>>().await
        }
    }
}

struct StalledFactory;

impl RecognizerFactory for StalledFactory {
    type Recognizer = StalledRecognizer;

    fn create(&self) -> Result<StalledRecognizer, RecognitionError> {
        Ok(StalledRecognizer)
    }
}

struct BrokenFactory;

impl RecognizerFactory for BrokenFactory {
    type Recognizer = StalledRecognizer;

    fn create(&self) -> Result<StalledRecognizer, RecognitionError> {
        Err(RecognitionError::Initialization("language data missing".into()))
    }
}

struct HangingVerifier;

impl KycVerifier for HangingVerifier {
    fn verify_kyc(
        &self,
        _artifact: ProofArtifact,
        _subject: &SubjectAddress,
        _level: KycLevel,
    ) -> impl Future<Output = Result<VerificationReceipt, VerifyError>> + Send {
        std::future::pending::<Result<VerificationReceipt, VerifyError>>()
    }

    fn kyc_level(
        &self,
        _subject: &SubjectAddress,
    ) -> impl Future<Output = Result<KycLevel, VerifyError>> + Send {
        async { Ok(KycLevel::UNVERIFIED) }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn subject() -> SubjectAddress {
    SubjectAddress::new("0x04a1b2c3").unwrap()
}

fn verifier() -> StubKycVerifier {
    StubKycVerifier::new(SubjectAddress::new("0x0badc0de").unwrap())
}

fn artifact() -> ProofArtifact {
    ProofArtifact::new(
        vec![serde_json::json!("0x1"), serde_json::json!("0x2a")],
        vec![serde_json::json!("0x3")],
    )
}

fn fast_config() -> SessionConfig {
    SessionConfig {
        success_delay: Duration::ZERO,
        recognition_timeout: Duration::from_secs(5),
        proof_timeout: Duration::from_secs(5),
        verify_timeout: Duration::from_secs(5),
        ..SessionConfig::default()
    }
}

async fn reviewing<R, P, V>(
    orchestrator: &mut VerificationOrchestrator<FakeCamera, R, P, V>,
) where
    R: RecognizerFactory,
    P: ProofGenerator,
    V: KycVerifier,
{
    orchestrator
        .select_document(DocumentKind::Passport)
        .await
        .unwrap();
    orchestrator.capture().await.unwrap();
    assert_eq!(
        orchestrator.session().state(),
        ScanState::Scanning(ScanningPhase::ReviewingCapture)
    );
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn successful_verification_reaches_success_once() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let callbacks = Arc::new(AtomicUsize::new(0));
    let seen = callbacks.clone();

    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    )
    .on_success(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    let reports = orchestrator.subscribe();

    reviewing(&mut orchestrator).await;
    let outcome = orchestrator.confirm().await.unwrap();

    assert_eq!(orchestrator.session().state(), ScanState::Success);
    assert_eq!(outcome.receipt.level, KycLevel::default());
    assert_eq!(outcome.receipt.subject, subject());
    assert!(outcome.receipt.tx_hash.starts_with("0x"));
    assert_eq!(outcome.identity.nationality, "UTO");
    assert_eq!(outcome.identity.masked_document_number, "L89***");

    assert_eq!(callbacks.load(Ordering::SeqCst), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(counters.released() >= 1);
    assert!(orchestrator.verifier().is_kyc_verified(&subject()).await);

    let report = reports.borrow().clone();
    assert_eq!(report.stage, ScanStage::Success);
    assert_eq!(report.progress, 100);
    assert!(!report.capture_enabled);
    assert!(report.error.is_none());
    assert_eq!(
        report.identity.map(|i| i.masked_document_number),
        Some("L89***".to_string())
    );
    assert!(orchestrator.session().frame().is_none());

    // Terminal: nothing else is accepted.
    let err = orchestrator
        .select_document(DocumentKind::Passport)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Transition(TransitionError::Terminal { .. })));
}

#[tokio::test]
async fn report_never_carries_birth_date_or_full_document_number() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;
    orchestrator.confirm().await.unwrap();

    let json = serde_json::to_string(&orchestrator.report()).unwrap();
    assert!(!json.contains("740812"));
    assert!(!json.contains("L898902C3"));
}

#[tokio::test]
async fn camera_permission_denied_is_terminal() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::denied(&counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );

    let err = orchestrator
        .select_document(DocumentKind::IdCard)
        .await
        .unwrap_err();
    assert!(matches!(err.scan_error(), Some(ScanError::Camera(_))));
    assert_eq!(orchestrator.session().state(), ScanState::CameraError);
    assert!(!orchestrator.session().capture_enabled());
    assert!(orchestrator.session().error().is_some());
    assert_eq!(counters.released(), 1);

    let again = orchestrator
        .select_document(DocumentKind::Passport)
        .await
        .unwrap_err();
    assert!(matches!(again, SessionError::Transition(TransitionError::Terminal { .. })));
    assert_eq!(counters.initialized(), 1);
}

#[tokio::test]
async fn proof_error_returns_to_selection_with_verbatim_message() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Reject("Passport has expired".into()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert_eq!(err.to_string(), "Passport has expired");
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(orchestrator.session().error(), Some("Passport has expired"));
    assert!(orchestrator.session().frame().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1, "proof requests are never retried");
    assert!(counters.released() >= 1);

    // The user can start over.
    orchestrator
        .select_document(DocumentKind::Passport)
        .await
        .unwrap();
    assert_eq!(
        orchestrator.session().state(),
        ScanState::Scanning(ScanningPhase::CameraLive)
    );
    assert!(orchestrator.session().error().is_none());
    assert_eq!(counters.initialized(), 2);
}

#[tokio::test]
async fn frame_without_mrz_never_reaches_prover() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame("PASSPORT\nSurname: ERIKSSON\n", &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert_eq!(err.scan_error(), Some(&ScanError::NoMrzDetected));
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn corrupted_check_digit_is_reported() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let corrupted = PASSPORT_TRANSCRIPT.replace("L898902C36", "L898902C37");
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(&corrupted, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert!(matches!(
        err.scan_error(),
        Some(ScanError::InvalidMrzChecksum { .. })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn capture_outside_live_camera_changes_nothing() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );

    let err = orchestrator.capture().await.unwrap_err();
    assert!(matches!(err.scan_error(), Some(ScanError::Capture(_))));
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert!(orchestrator.session().transition_log().is_empty());

    reviewing(&mut orchestrator).await;
    let before = orchestrator.session().transition_log().len();
    let err = orchestrator.capture().await.unwrap_err();
    assert!(matches!(err.scan_error(), Some(ScanError::Capture(_))));
    assert_eq!(
        orchestrator.session().state(),
        ScanState::Scanning(ScanningPhase::ReviewingCapture)
    );
    assert_eq!(orchestrator.session().transition_log().len(), before);
}

#[tokio::test]
async fn retake_returns_to_live_camera() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;

    orchestrator.retake().unwrap();
    assert_eq!(
        orchestrator.session().state(),
        ScanState::Scanning(ScanningPhase::CameraLive)
    );
    assert!(orchestrator.session().frame().is_none());
    assert!(orchestrator.session().capture_enabled());

    let err = orchestrator.confirm().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Transition(TransitionError::InvalidTransition { .. })
    ));

    orchestrator.capture().await.unwrap();
    orchestrator.confirm().await.unwrap();
    assert_eq!(orchestrator.session().attempt(), 1);
}

#[tokio::test]
async fn stalled_recognition_times_out() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        StalledFactory,
        prover,
        verifier(),
        subject(),
        SessionConfig {
            recognition_timeout: Duration::from_millis(50),
            ..fast_config()
        },
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    match err.scan_error() {
        Some(ScanError::Timeout { stage, .. }) => assert_eq!(stage, "text recognition"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(orchestrator.session().progress(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hanging_prover_times_out() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Hang);
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        SessionConfig {
            proof_timeout: Duration::from_millis(50),
            ..fast_config()
        },
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    match err.scan_error() {
        Some(ScanError::Timeout { stage, .. }) => assert_eq!(stage, "proof generation"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn recognition_engine_error_returns_to_selection() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_bytes(vec![0xff, 0xd8, 0xff, 0xe0], &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert!(matches!(err.scan_error(), Some(ScanError::Recognition(_))));
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert!(orchestrator
        .session()
        .error()
        .is_some_and(|message| !message.is_empty()));
    assert!(orchestrator.session().frame().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(counters.released() >= 1);
}

#[tokio::test]
async fn recognizer_initialization_failure_returns_to_selection() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        BrokenFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert_eq!(
        err.scan_error(),
        Some(&ScanError::Recognition(
            "recognizer initialization failed: language data missing".into()
        ))
    );
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert!(orchestrator.session().frame().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(counters.released() >= 1);
}

#[tokio::test]
async fn hanging_verifier_times_out() {
    let counters = CameraCounters::default();
    let (prover, calls) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let callbacks = Arc::new(AtomicUsize::new(0));
    let seen = callbacks.clone();
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        HangingVerifier,
        subject(),
        SessionConfig {
            verify_timeout: Duration::from_millis(50),
            ..fast_config()
        },
    )
    .on_success(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert_eq!(
        err.scan_error(),
        Some(&ScanError::Timeout {
            stage: "on-chain verification".into(),
            millis: 50,
        })
    );
    assert_eq!(err.to_string(), "on-chain verification timed out after 50ms");
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(callbacks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unverified_level_is_never_reported_as_success() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let callbacks = Arc::new(AtomicUsize::new(0));
    let seen = callbacks.clone();
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        SessionConfig {
            kyc_level: KycLevel::UNVERIFIED,
            ..fast_config()
        },
    )
    .on_success(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert_eq!(
        err.scan_error(),
        Some(&ScanError::Verification("verifier rejected the proof".into()))
    );
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(callbacks.load(Ordering::SeqCst), 0);
    assert!(!orchestrator.verifier().is_kyc_verified(&subject()).await);
}

#[tokio::test]
async fn unconfigured_verifier_fails_verification() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let callbacks = Arc::new(AtomicUsize::new(0));
    let seen = callbacks.clone();
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        StubKycVerifier::new(SubjectAddress::new("0x0").unwrap()),
        subject(),
        fast_config(),
    )
    .on_success(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    reviewing(&mut orchestrator).await;

    let err = orchestrator.confirm().await.unwrap_err();
    assert_eq!(
        err.scan_error(),
        Some(&ScanError::Verification(
            "Verifier contract address not configured".into()
        ))
    );
    assert_eq!(orchestrator.session().state(), ScanState::SelectType);
    assert_eq!(callbacks.load(Ordering::SeqCst), 0);
    assert!(!orchestrator.verifier().is_kyc_verified(&subject()).await);
}

#[tokio::test]
async fn close_releases_camera_and_rejects_further_actions() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    orchestrator
        .select_document(DocumentKind::Passport)
        .await
        .unwrap();

    orchestrator.close();
    orchestrator.close();
    assert!(orchestrator.is_closed());
    assert_eq!(counters.released(), 1);
    assert_eq!(
        orchestrator.capture().await.unwrap_err(),
        SessionError::Closed
    );

    drop(orchestrator);
    assert_eq!(counters.released(), 1);
}

#[tokio::test]
async fn dropping_the_orchestrator_releases_the_camera() {
    let counters = CameraCounters::default();
    let (prover, _) = FakeProver::new(ProverBehavior::Respond(artifact()));
    let mut orchestrator = VerificationOrchestrator::new(
        FakeCamera::with_frame(PASSPORT_TRANSCRIPT, &counters),
        TranscriptRecognizerFactory,
        prover,
        verifier(),
        subject(),
        fast_config(),
    );
    orchestrator
        .select_document(DocumentKind::Passport)
        .await
        .unwrap();
    assert_eq!(counters.released(), 0);

    drop(orchestrator);
    assert_eq!(counters.released(), 1);
}
