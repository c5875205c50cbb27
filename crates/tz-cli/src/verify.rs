//! # Verify Subcommand
//!
//! Runs one verification session end to end and prints the outcome.
//!
//! The frame file is read through [`StillImageCamera`] and its bytes are
//! treated as an OCR transcript, so a text file holding the two or three
//! MRZ lines is enough to exercise the whole pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tz_capture::{StillImageCamera, TranscriptRecognizerFactory};
use tz_core::{DocumentKind, KycLevel, SubjectAddress};
use tz_prover_client::{HttpProofGenerator, ProverConfig};
use tz_session::{SessionConfig, SessionError, VerificationOrchestrator};
use tz_zkp::StubKycVerifier;

/// Verifier contract address used when `TZ_VERIFIER_ADDRESS` is unset.
/// The zero address marks the verifier as not deployed.
pub const DEFAULT_VERIFIER_ADDRESS: &str = "0x0";

/// Document type accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentArg {
    Passport,
    IdCard,
}

impl From<DocumentArg> for DocumentKind {
    fn from(arg: DocumentArg) -> Self {
        match arg {
            DocumentArg::Passport => DocumentKind::Passport,
            DocumentArg::IdCard => DocumentKind::IdCard,
        }
    }
}

/// Arguments for the `tz verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Frame file standing in for the camera.
    #[arg(long)]
    pub frame: PathBuf,

    /// Document type to select.
    #[arg(long, value_enum)]
    pub document: DocumentArg,

    /// Address whose KYC level is recorded.
    #[arg(long)]
    pub subject: String,

    /// KYC level to request (1-4). Defaults to `TZ_KYC_LEVEL` or 2.
    #[arg(long)]
    pub kyc_level: Option<u8>,

    /// Verifier contract address. Defaults to `TZ_VERIFIER_ADDRESS`.
    #[arg(long)]
    pub verifier: Option<String>,
}

/// Resolve the verifier contract address from the flag, then the
/// environment, then [`DEFAULT_VERIFIER_ADDRESS`].
pub fn verifier_address(
    flag: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SubjectAddress> {
    let raw = flag
        .map(str::to_string)
        .or_else(|| lookup("TZ_VERIFIER_ADDRESS"))
        .unwrap_or_else(|| DEFAULT_VERIFIER_ADDRESS.to_string());
    SubjectAddress::new(raw.trim()).context("invalid verifier address")
}

/// Execute `tz verify`. Returns the process exit code.
pub async fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let subject = SubjectAddress::new(args.subject.as_str()).context("invalid --subject")?;

    let mut config = SessionConfig::from_env().context("invalid session configuration")?;
    if let Some(level) = args.kyc_level {
        config.kyc_level = KycLevel::new(level).context("invalid --kyc-level")?;
    }

    let prover_config = ProverConfig::from_env().context("invalid prover configuration")?;
    tracing::debug!(?prover_config, "prover configured");
    let prover = HttpProofGenerator::new(prover_config).context("failed to build prover client")?;

    let contract = verifier_address(args.verifier.as_deref(), |name| std::env::var(name).ok())?;
    if contract.is_zero() {
        tracing::warn!("verifier contract address is not configured; verification will fail");
    }

    let mut orchestrator = VerificationOrchestrator::new(
        StillImageCamera::new(args.frame.clone()),
        TranscriptRecognizerFactory,
        prover,
        StubKycVerifier::new(contract),
        subject,
        config,
    );

    let mut reports = orchestrator.subscribe();
    let watcher = tokio::spawn(async move {
        while reports.changed().await.is_ok() {
            let report = reports.borrow_and_update().clone();
            tracing::info!(
                session = %report.session_id,
                stage = report.stage.name(),
                phase = report.phase.map(|p| p.name()),
                attempt = report.attempt,
                progress = report.progress,
                error = report.error.as_deref(),
                "session report"
            );
        }
    });

    let result = drive(&mut orchestrator, args.document.into()).await;
    orchestrator.close();
    drop(orchestrator);
    if let Err(e) = watcher.await {
        tracing::debug!(error = %e, "report watcher ended abnormally");
    }

    match result {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(0)
        }
        Err(SessionError::Scan(err)) => {
            eprintln!("verification failed: {}", err.user_message());
            Ok(1)
        }
        Err(other) => Err(other.into()),
    }
}

async fn drive<C, R, P, V>(
    orchestrator: &mut VerificationOrchestrator<C, R, P, V>,
    document: DocumentKind,
) -> Result<tz_session::VerificationOutcome, SessionError>
where
    C: tz_capture::Camera,
    R: tz_capture::RecognizerFactory,
    P: tz_zkp::ProofGenerator,
    V: tz_zkp::KycVerifier,
{
    orchestrator.select_document(document).await?;
    orchestrator.capture().await?;
    orchestrator.confirm().await
}
