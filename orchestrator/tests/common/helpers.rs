//! Test helpers for driving appeals through their lifecycle

use orchestrator::{Orchestrator, SqliteStore};
use shared::{Appeal, AppealStatus};

use super::fixtures::TestFixtures;

/// Helper methods shared by the unit and integration suites
pub struct TestHelpers;

impl TestHelpers {
    /// Orchestrator over a fresh in-memory store
    pub fn memory_orchestrator() -> Orchestrator<SqliteStore> {
        let store = SqliteStore::in_memory().expect("in-memory store");
        Orchestrator::new(store)
    }

    /// Create an appeal and drive it into the target status through the
    /// public operations only
    pub async fn appeal_in_status(
        orchestrator: &Orchestrator<SqliteStore>,
        status: AppealStatus,
    ) -> Appeal {
        let appeal = orchestrator
            .create_appeal(TestFixtures::THEME, TestFixtures::MESSAGE)
            .await
            .expect("create appeal");

        match status {
            AppealStatus::New => appeal,
            AppealStatus::InProgress => orchestrator
                .start_processing(appeal.id)
                .await
                .expect("start processing"),
            AppealStatus::Completed => {
                orchestrator
                    .start_processing(appeal.id)
                    .await
                    .expect("start processing");
                orchestrator
                    .complete_appeal(appeal.id, TestFixtures::SOLUTION)
                    .await
                    .expect("complete appeal")
            }
            AppealStatus::Cancelled => orchestrator
                .cancel_appeal(appeal.id, None)
                .await
                .expect("cancel appeal"),
        }
    }
}
