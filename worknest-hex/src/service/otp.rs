//! OTP application service.

use chrono::Utc;

use worknest_types::{
    AppError, DomainError, Mailer, OtpCode, OtpEmail, OtpRepository, SendOtpRequest,
    VerifyOtpRequest, is_valid_email,
};

/// Application service for issuing and verifying one-time codes.
///
/// Generic over the repository and mailer ports - the adapters are injected
/// at construction time. This enables:
/// - Swapping the store without code changes
/// - Testing with in-memory fakes
/// - Compile-time checks for port implementation
pub struct OtpService<R: OtpRepository, M: Mailer> {
    repo: R,
    mailer: M,
}

impl<R: OtpRepository, M: Mailer> OtpService<R, M> {
    /// Creates a new OTP service with the given adapters.
    pub fn new(repo: R, mailer: M) -> Self {
        Self { repo, mailer }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Issues a fresh code and mails it out.
    ///
    /// Any unused codes for the same `(email, purpose)` are superseded
    /// first. The supersede and insert are separate statements; concurrent
    /// issuance can briefly leave two valid codes, which verification
    /// tolerates because it requires an exact code match.
    ///
    /// The insert is not rolled back on a delivery failure - the code
    /// remains usable even when the error reaches the caller.
    pub async fn issue_code(&self, req: SendOtpRequest) -> Result<(), AppError> {
        let purpose = req
            .purpose
            .ok_or_else(|| AppError::BadRequest("Email and type are required".into()))?;
        if !is_valid_email(&req.email) {
            return Err(DomainError::InvalidEmail.into());
        }

        let otp = OtpCode::issue(&req.email, purpose);

        let superseded = self.repo.invalidate_codes(&req.email, purpose).await?;
        if superseded > 0 {
            tracing::debug!(superseded, %purpose, "superseded previous unused codes");
        }
        self.repo.insert_code(&otp).await?;

        let email = OtpEmail::compose(purpose, &otp.code);
        self.mailer.send(&req.email, &email.subject, &email.body).await?;

        Ok(())
    }

    /// Verifies a submitted code and spends it.
    ///
    /// Wrong, expired, and already-used codes all collapse into
    /// [`AppError::InvalidOtp`] so the response does not leak which case
    /// occurred. The mark-used step is an atomic conditional update, so a
    /// replay - or a racing duplicate request - cannot spend a code twice.
    pub async fn verify_code(&self, req: VerifyOtpRequest) -> Result<(), AppError> {
        let purpose = req
            .purpose
            .ok_or_else(|| AppError::BadRequest("Email, code and type are required".into()))?;
        if req.email.trim().is_empty() || req.code.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Email, code and type are required".into(),
            ));
        }

        let found = self
            .repo
            .find_valid_code(&req.email, &req.code, purpose, Utc::now())
            .await?;
        let otp = found.ok_or(AppError::InvalidOtp)?;

        if !self.repo.mark_used(otp.id).await? {
            return Err(AppError::InvalidOtp);
        }

        Ok(())
    }
}
