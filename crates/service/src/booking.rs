//! Booking submission orchestration.
//!
//! Control flow for one submission: eligibility & pricing → persist →
//! best-effort label acquisition → persist artifacts. A policy rejection
//! blocks persistence entirely; a label failure degrades to "booking saved,
//! label pending" and never unwinds the saved booking.

use rust_decimal::Decimal;
use thiserror::Error;

use boardshipper_core::AccountId;

use crate::label::{LabelError, LabelService};
use crate::models::{Booking, LabelArtifacts, NewBooking, SenderProfile};
use crate::pricing::{self, RejectionReason};
use crate::store::{BookingStore, StoreError};

/// Seam between booking orchestration and the carrier label workflow.
///
/// [`LabelService`] is the production implementation; tests substitute
/// fakes to exercise the degrade path without a network.
pub trait LabelAcquirer {
    /// Purchase a label for a persisted booking.
    async fn purchase_label(
        &self,
        sender: &SenderProfile,
        booking: &Booking,
    ) -> Result<LabelArtifacts, LabelError>;
}

impl LabelAcquirer for LabelService {
    async fn purchase_label(
        &self,
        sender: &SenderProfile,
        booking: &Booking,
    ) -> Result<LabelArtifacts, LabelError> {
        Self::purchase_label(self, sender, booking).await
    }
}

/// Errors that block a submission entirely. Nothing is persisted when one
/// of these is returned.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Policy rejection (country, destination, or board size).
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    /// Weight must be a positive number of pounds.
    #[error("weight must be greater than zero")]
    InvalidWeight,

    /// The booking could not be saved.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// What happened to the label for a saved booking.
#[derive(Debug)]
pub enum LabelOutcome {
    /// Label purchased and recorded on the booking.
    Acquired(LabelArtifacts),

    /// Booking saved, label pending; carries the failure that deferred it.
    /// No automatic retry is scheduled.
    Pending(LabelError),
}

/// Result of a successful submission: the persisted booking plus the label
/// outcome.
#[derive(Debug)]
pub struct Submission {
    pub booking: Booking,
    pub label: LabelOutcome,
}

/// Booking submission service.
pub struct BookingService<S, L> {
    store: S,
    labels: L,
}

impl<S: BookingStore, L: LabelAcquirer> BookingService<S, L> {
    /// Create a booking service over a store and a label acquirer.
    #[must_use]
    pub const fn new(store: S, labels: L) -> Self {
        Self { store, labels }
    }

    /// Submit a booking: price it, persist it, then try to label it once.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Rejected` or `SubmitError::InvalidWeight`
    /// before anything is persisted, and `SubmitError::Store` if the save
    /// itself fails. Label-acquisition failures are not submission errors:
    /// the saved booking comes back with [`LabelOutcome::Pending`].
    pub async fn submit(
        &self,
        account_id: AccountId,
        sender: &SenderProfile,
        new_booking: NewBooking,
    ) -> Result<Submission, SubmitError> {
        if new_booking.weight_lb <= Decimal::ZERO {
            return Err(SubmitError::InvalidWeight);
        }

        let price = pricing::evaluate(
            new_booking.board_size,
            &new_booking.recipient.country,
            &new_booking.recipient.state,
        )?;

        let booking = self.store.save(account_id, new_booking, price).await?;
        tracing::info!(
            booking_id = %booking.id,
            price = %booking.customer_price,
            "booking saved"
        );

        Ok(self.acquire_label(sender, booking).await)
    }

    /// Acquire a label for a saved booking that has none yet.
    ///
    /// The workflow is not idempotent, so a booking that already carries
    /// label artifacts is returned unchanged without touching the carrier.
    /// A failure to record purchased artifacts is logged and accepted; the
    /// label itself was bought and is returned to the caller.
    pub async fn acquire_label(&self, sender: &SenderProfile, mut booking: Booking) -> Submission {
        if let Some(artifacts) = booking.label.clone() {
            return Submission {
                booking,
                label: LabelOutcome::Acquired(artifacts),
            };
        }

        match self.labels.purchase_label(sender, &booking).await {
            Ok(artifacts) => {
                if let Err(err) = self.store.update_label(booking.id, &artifacts).await {
                    tracing::error!(
                        booking_id = %booking.id,
                        error = %err,
                        "label purchased but could not be recorded"
                    );
                }
                booking.label = Some(artifacts.clone());
                Submission {
                    booking,
                    label: LabelOutcome::Acquired(artifacts),
                }
            }
            Err(err) => {
                tracing::warn!(
                    booking_id = %booking.id,
                    error = %err,
                    "label acquisition failed; booking saved, label pending"
                );
                Submission {
                    booking,
                    label: LabelOutcome::Pending(err),
                }
            }
        }
    }
}
