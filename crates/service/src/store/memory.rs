//! In-memory store for tests and local tooling.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use boardshipper_core::{AccountId, BookingId, Email, Price};

use super::{AccountStore, BookingStore, StoreError};
use crate::models::{Account, Booking, LabelArtifacts, NewBooking, SenderProfile};

/// In-memory implementation of both store collaborators.
///
/// Clones share state, so a test can hand one clone to a service and keep
/// another to inspect what was persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<StoredAccount>,
    bookings: Vec<Booking>,
    last_account_id: i32,
    last_booking_id: i32,
}

struct StoredAccount {
    account: Account,
    password_hash: String,
    profile: SenderProfile,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AccountStore for MemoryStore {
    async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        profile: SenderProfile,
    ) -> Result<Account, StoreError> {
        let mut inner = self.lock();

        if inner.accounts.iter().any(|a| a.account.email == *email) {
            return Err(StoreError::Conflict("email already registered".to_owned()));
        }

        inner.last_account_id += 1;
        let account = Account {
            id: AccountId::new(inner.last_account_id),
            email: email.clone(),
            created_at: Utc::now(),
        };

        inner.accounts.push(StoredAccount {
            account: account.clone(),
            password_hash: password_hash.to_owned(),
            profile,
        });

        Ok(account)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.account.email == *email)
            .map(|a| (a.account.clone(), a.password_hash.clone())))
    }

    async fn find(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.account.id == id)
            .map(|a| a.account.clone()))
    }

    async fn sender_profile(&self, id: AccountId) -> Result<Option<SenderProfile>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.account.id == id)
            .map(|a| a.profile.clone()))
    }
}

impl BookingStore for MemoryStore {
    async fn save(
        &self,
        account_id: AccountId,
        booking: NewBooking,
        price: Price,
    ) -> Result<Booking, StoreError> {
        let mut inner = self.lock();

        inner.last_booking_id += 1;
        let booking = Booking {
            id: BookingId::new(inner.last_booking_id),
            account_id,
            sender_name: booking.sender_name,
            recipient: booking.recipient,
            board_size: booking.board_size,
            weight_lb: booking.weight_lb,
            order_reference: booking.order_reference,
            service: booking.service,
            additional_info: booking.additional_info,
            customer_price: price,
            label: None,
            created_at: Utc::now(),
        };

        inner.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_label(
        &self,
        id: BookingId,
        artifacts: &LabelArtifacts,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();

        let booking = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound("booking"))?;

        booking.label = Some(artifacts.clone());
        Ok(())
    }

    async fn find(&self, id: BookingId, owner: AccountId) -> Result<Option<Booking>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .bookings
            .iter()
            .find(|b| b.id == id && b.account_id == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Booking>, StoreError> {
        let inner = self.lock();
        // Insertion order is creation order, so newest first is a reverse scan.
        Ok(inner
            .bookings
            .iter()
            .rev()
            .filter(|b| b.account_id == owner)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use boardshipper_core::BoardSize;

    use super::*;
    use crate::models::{Recipient, ServiceType};

    fn new_booking(state: &str) -> NewBooking {
        NewBooking {
            sender_name: "Board Barn".to_owned(),
            recipient: Recipient {
                first_name: "Kai".to_owned(),
                last_name: "Moana".to_owned(),
                email: Email::parse("kai@example.com").unwrap(),
                phone: "(555) 123-4567".to_owned(),
                street: "1 Ocean Ave".to_owned(),
                city: "Encinitas".to_owned(),
                state: state.to_owned(),
                zip: "92024".to_owned(),
                country: "United States".to_owned(),
            },
            board_size: BoardSize::Shortboard,
            weight_lb: Decimal::from(12),
            order_reference: None,
            service: ServiceType::DoorToDoor,
            additional_info: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let owner = AccountId::new(1);

        let first = store
            .save(owner, new_booking("CA"), Price::new(55))
            .await
            .unwrap();
        let second = store
            .save(owner, new_booking("OR"), Price::new(75))
            .await
            .unwrap();

        assert_eq!(first.id, BookingId::new(1));
        assert_eq!(second.id, BookingId::new(2));
        assert!(first.label.is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first_and_scoped() {
        let store = MemoryStore::new();
        let owner = AccountId::new(1);
        let other = AccountId::new(2);

        store.save(owner, new_booking("CA"), Price::new(55)).await.unwrap();
        store.save(other, new_booking("NV"), Price::new(75)).await.unwrap();
        let newest = store.save(owner, new_booking("OR"), Price::new(75)).await.unwrap();

        let bookings = store.list_by_owner(owner).await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, newest.id);
    }

    #[tokio::test]
    async fn test_find_is_owner_scoped() {
        let store = MemoryStore::new();
        let owner = AccountId::new(1);

        let saved = store.save(owner, new_booking("CA"), Price::new(55)).await.unwrap();

        assert!(BookingStore::find(&store, saved.id, owner).await.unwrap().is_some());
        assert!(BookingStore::find(&store, saved.id, AccountId::new(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let email = Email::parse("shop@surfco.com").unwrap();
        let profile = SenderProfile {
            business_name: "Surf Co".to_owned(),
            street_address: "1 Shaper Way".to_owned(),
            city: "Oceanside".to_owned(),
            state: "CA".to_owned(),
            zip_code: "92054".to_owned(),
            country: "United States".to_owned(),
        };

        store.create(&email, "hash", profile.clone()).await.unwrap();
        let err = store.create(&email, "hash", profile).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_label_missing_booking() {
        let store = MemoryStore::new();
        let artifacts = LabelArtifacts {
            shipment_id: "shp_1".to_owned(),
            label_url: String::new(),
            tracking_url: String::new(),
            tracking_code: String::new(),
            carrier: "GSO".to_owned(),
            service: "CPS".to_owned(),
            carrier_rate: Decimal::ZERO,
        };

        let err = store
            .update_label(BookingId::new(9), &artifacts)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound("booking")));
    }
}
