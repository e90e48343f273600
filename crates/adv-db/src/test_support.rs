//! Shared test utilities for adv-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use adv_core::entities::{CaseRecord, NewCase, Party};
    use adv_core::enums::PartyRole;
    use adv_core::identity::Actor;
    use adv_crypto::CryptoCodec;
    use chrono::NaiveDate;

    use crate::AdvDb;
    use crate::service::CaseService;

    /// Fixed key so blobs written in one test can be opened by the same service.
    pub fn test_codec() -> CryptoCodec {
        CryptoCodec::from_key_bytes(&[0x42; 32]).unwrap()
    }

    /// Create an in-memory `CaseService` with a test key.
    pub async fn test_service() -> CaseService {
        let db = AdvDb::open_local(":memory:").await.unwrap();
        CaseService::from_db(db, test_codec())
    }

    /// Register a party whose names are derived from the email.
    pub async fn register(svc: &CaseService, email: &str, role: PartyRole) -> Party {
        let name = email.split('@').next().unwrap_or("test");
        svc.register_party(email, name, "Tester", role).await.unwrap()
    }

    /// A valid new case for `athlete_id`, with no lawyer.
    pub fn new_case(athlete_id: &str) -> NewCase {
        NewCase {
            athlete_id: athlete_id.to_string(),
            lawyer_id: None,
            alleged_violation: "Presence of a prohibited substance".into(),
            substance_name: Some("Nandrolone".into()),
            sample_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            notification_date: NaiveDate::from_ymd_opt(2026, 4, 2),
            hearing_date: None,
            test_result: "A-sample adverse analytical finding".into(),
            case_summary: Some("Out-of-competition test".into()),
        }
    }

    /// Register an athlete and file a case for them as an admin.
    pub async fn create_test_case(svc: &CaseService) -> CaseRecord {
        let athlete = register(svc, "case-athlete@example.org", PartyRole::Athlete).await;
        let admin = Actor::new("usr-admin", PartyRole::Admin);
        svc.create_case(&admin, new_case(&athlete.id)).await.unwrap()
    }
}
