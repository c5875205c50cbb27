//! # Verification Orchestrator
//!
//! Sequences one verification session:
//!
//! 1. document selection and camera start-up,
//! 2. capture / retake / confirm,
//! 3. text recognition on a spawned task, tagged with the capture attempt,
//! 4. MRZ extraction and proof generation,
//! 5. on-chain KYC verification, then a short pause and the success callback.
//!
//! Each user action is one `&mut self` method, so two pipelines can never
//! run concurrently on the same session. A failed stage records its error on
//! the session and returns it to the caller; nothing is retried.

use serde::Serialize;
use tokio::sync::watch;
use tz_capture::{
    spawn_recognition, Camera, CameraConstraints, CapturedFrame, RecognitionEvent, RecognitionTask,
    RecognizedText, RecognizerFactory,
};
use tz_core::{DocumentKind, ScanError, SessionId, SubjectAddress};
use tz_state::{IdentitySummary, ScanEvent, ScanSession, TransitionError};
use tz_zkp::{KycVerifier, ProofGenerator, ProofRequest, VerificationReceipt};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::report::{SessionReport, SessionReporter};

type SuccessCallback = Box<dyn FnOnce(&VerificationOutcome) + Send>;

/// Result of a session that reached `SUCCESS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub session_id: SessionId,
    pub receipt: VerificationReceipt,
    pub identity: IdentitySummary,
}

pub struct VerificationOrchestrator<C, R, P, V>
where
    C: Camera,
    R: RecognizerFactory,
    P: ProofGenerator,
    V: KycVerifier,
{
    camera: C,
    recognizers: R,
    prover: P,
    verifier: V,
    subject: SubjectAddress,
    config: SessionConfig,
    session: ScanSession,
    reporter: SessionReporter,
    in_flight: Option<RecognitionTask>,
    on_success: Option<SuccessCallback>,
    closed: bool,
}

impl<C, R, P, V> VerificationOrchestrator<C, R, P, V>
where
    C: Camera,
    R: RecognizerFactory,
    P: ProofGenerator,
    V: KycVerifier,
{
    pub fn new(
        camera: C,
        recognizers: R,
        prover: P,
        verifier: V,
        subject: SubjectAddress,
        config: SessionConfig,
    ) -> Self {
        let session = ScanSession::new();
        let reporter = SessionReporter::new(&session);
        tracing::info!(session = %session.id(), subject = %subject, "verification session opened");
        Self {
            camera,
            recognizers,
            prover,
            verifier,
            subject,
            config,
            session,
            reporter,
            in_flight: None,
            on_success: None,
            closed: false,
        }
    }

    /// Register the callback run once after `SUCCESS` and the success delay.
    pub fn on_success(mut self, callback: impl FnOnce(&VerificationOutcome) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn report(&self) -> SessionReport {
        self.reporter.latest()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionReport> {
        self.reporter.subscribe()
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Choose a document type and start the camera.
    ///
    /// A camera failure moves the session to `CAMERA_ERROR` and is returned.
    pub async fn select_document(&mut self, kind: DocumentKind) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.apply(ScanEvent::DocumentSelected(kind))?;

        match self.camera.initialize(CameraConstraints::default()).await {
            Ok(()) => {
                self.apply(ScanEvent::CameraReady)?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session = %self.session.id(), error = %err, "camera initialization failed");
                self.camera.release();
                let err = ScanError::from(err);
                self.apply(ScanEvent::from(err.clone()))?;
                Err(err.into())
            }
        }
    }

    /// Take a still frame. Only available while the camera is live; at any
    /// other time the call fails with a capture error and the session is
    /// left unchanged.
    pub async fn capture(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        if !self.session.capture_enabled() {
            return Err(ScanError::Capture(format!(
                "capture is not available in state {}",
                self.session.state().name()
            ))
            .into());
        }

        match self.camera.capture_frame().await {
            Ok(frame) => {
                self.apply(ScanEvent::FrameCaptured(frame))?;
                Ok(())
            }
            Err(err) => {
                let err = ScanError::from(err);
                self.apply(ScanEvent::from(err.clone()))?;
                Err(err.into())
            }
        }
    }

    /// Discard the captured frame and go back to the live camera.
    pub fn retake(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.apply(ScanEvent::Retake)?;
        Ok(())
    }

    /// Confirm the captured frame and run the pipeline to `SUCCESS`.
    ///
    /// A pipeline failure returns the session to `SELECT_TYPE` with the
    /// error message set, releases the camera and returns the error.
    pub async fn confirm(&mut self) -> Result<VerificationOutcome, SessionError> {
        self.ensure_open()?;
        let frame = self
            .session
            .frame()
            .cloned()
            .ok_or_else(|| TransitionError::InvalidTransition {
                state: self.session.state().name(),
                event: "CaptureConfirmed",
            })?;
        self.apply(ScanEvent::CaptureConfirmed)?;
        let attempt = self.session.attempt();

        match self.run_pipeline(attempt, frame).await {
            Ok(outcome) => Ok(outcome),
            Err(SessionError::Scan(err)) => {
                self.fail(err.clone());
                Err(err.into())
            }
            Err(other) => Err(other),
        }
    }

    /// Tear the session down: abort recognition and release the camera.
    /// Idempotent; later operations fail with [`SessionError::Closed`].
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.abort_recognition();
        self.camera.release();
        self.closed = true;
        tracing::info!(
            session = %self.session.id(),
            stage = %self.session.state().name(),
            "verification session closed"
        );
    }

    async fn run_pipeline(
        &mut self,
        attempt: u64,
        frame: CapturedFrame,
    ) -> Result<VerificationOutcome, SessionError> {
        let session_id = self.session.id();

        // Step 1: recognize text on the captured frame.
        let text = self.recognize(attempt, frame).await?;

        // Step 2: extract and validate the MRZ.
        let identity = tz_mrz::extract(text.lines()).map_err(ScanError::from)?;
        drop(text);
        let summary = IdentitySummary::from_identity(&identity);
        self.apply(ScanEvent::IdentityExtracted(summary.clone()))?;
        let request = ProofRequest::from_identity(&identity).map_err(ScanError::from)?;
        drop(identity);
        tracing::info!(
            session = %session_id,
            attempt,
            format = %summary.format,
            document = %request.masked_document_number(),
            "identity extracted, requesting proof"
        );

        // Step 3: generate the proof.
        let timeout = self.config.proof_timeout;
        let artifact = tokio::time::timeout(timeout, self.prover.generate_proof(&request))
            .await
            .map_err(|_| ScanError::timeout("proof generation", timeout))?
            .map_err(ScanError::from)?;
        drop(request);
        self.apply(ScanEvent::ProofReceived {
            evidence: artifact.digest(),
        })?;

        // Step 4: submit the proof to the verifier.
        let timeout = self.config.verify_timeout;
        let receipt = tokio::time::timeout(
            timeout,
            self.verifier
                .verify_kyc(artifact, &self.subject, self.config.kyc_level),
        )
        .await
        .map_err(|_| ScanError::timeout("on-chain verification", timeout))?
        .map_err(ScanError::from)?;
        self.apply(ScanEvent::VerificationConfirmed {
            tx_hash: receipt.tx_hash.clone(),
        })?;
        tracing::info!(
            session = %session_id,
            attempt,
            tx_hash = %receipt.tx_hash,
            level = %receipt.level,
            "KYC verification confirmed"
        );

        // Step 5: hold the success state, then hand off.
        let outcome = VerificationOutcome {
            session_id,
            receipt,
            identity: summary,
        };
        tokio::time::sleep(self.config.success_delay).await;
        self.camera.release();
        if let Some(callback) = self.on_success.take() {
            callback(&outcome);
        }
        Ok(outcome)
    }

    /// Run recognition for `attempt`, forwarding progress to the session.
    async fn recognize(
        &mut self,
        attempt: u64,
        frame: CapturedFrame,
    ) -> Result<RecognizedText, SessionError> {
        let task = spawn_recognition(&self.recognizers, frame, attempt).map_err(ScanError::from)?;
        self.in_flight = Some(task);

        let bound = self.config.recognition_timeout;
        let deadline = tokio::time::Instant::now() + bound;
        loop {
            let Some(task) = self.in_flight.as_mut() else {
                return Err(ScanError::Recognition("recognition task was cancelled".into()).into());
            };
            let task_attempt = task.attempt();
            let event = match tokio::time::timeout_at(deadline, task.next_event()).await {
                Ok(event) => event,
                Err(_) => {
                    self.abort_recognition();
                    return Err(ScanError::timeout("text recognition", bound).into());
                }
            };

            match event {
                RecognitionEvent::Progress(percent) => {
                    match self.apply(ScanEvent::RecognitionProgress {
                        attempt: task_attempt,
                        percent: percent.into(),
                    }) {
                        Ok(()) => {}
                        Err(TransitionError::StaleAttempt { current, got }) => {
                            tracing::debug!(current, got, "discarding stale recognition progress");
                        }
                        Err(other) => return Err(other.into()),
                    }
                }
                RecognitionEvent::Finished(result) => {
                    self.in_flight = None;
                    if task_attempt != self.session.attempt() {
                        tracing::debug!(
                            current = self.session.attempt(),
                            got = task_attempt,
                            "discarding stale recognition result"
                        );
                        return Err(
                            ScanError::Recognition("recognition result superseded".into()).into(),
                        );
                    }
                    return result.map_err(|e| SessionError::Scan(e.into()));
                }
            }
        }
    }

    fn apply(&mut self, event: ScanEvent) -> Result<(), TransitionError> {
        let event_name = event.name();
        if let Err(err) = self.session.apply(event) {
            tracing::debug!(
                session = %self.session.id(),
                stage = %self.session.state().name(),
                event = event_name,
                error = %err,
                "event rejected"
            );
            return Err(err);
        }
        self.reporter.publish(&self.session);
        tracing::debug!(
            session = %self.session.id(),
            attempt = self.session.attempt(),
            stage = %self.session.state().name(),
            event = event_name,
            "session advanced"
        );
        Ok(())
    }

    /// Record a pipeline failure and return to selection.
    fn fail(&mut self, err: ScanError) {
        tracing::warn!(
            session = %self.session.id(),
            attempt = self.session.attempt(),
            stage = %self.session.state().name(),
            error = %err,
            "verification pipeline failed"
        );
        self.abort_recognition();
        self.camera.release();
        if let Err(rejected) = self.apply(ScanEvent::Failed(err)) {
            tracing::warn!(error = %rejected, "failure could not be recorded on the session");
        }
    }

    fn abort_recognition(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
            tracing::debug!(attempt = task.attempt(), "recognition aborted");
        }
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        Ok(())
    }
}

impl<C, R, P, V> Drop for VerificationOrchestrator<C, R, P, V>
where
    C: Camera,
    R: RecognizerFactory,
    P: ProofGenerator,
    V: KycVerifier,
{
    fn drop(&mut self) {
        self.close();
    }
}
