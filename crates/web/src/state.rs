use std::sync::Arc;

use academy::repository::{
    MemoryCheckinRepository, MemoryClassRepository, MemoryPromotionRepository,
    MemoryStudentRepository, StudentRepository,
};
use academy::{AttendanceBasis, AttendanceService, Clock, PromotionLedger};

use crate::seed::SeedData;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<PromotionLedger>,
    pub attendance: Arc<AttendanceService>,
    pub students: Arc<dyn StudentRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wires the engine to map-backed stores preloaded with `seed`.
    pub async fn in_memory(
        seed: SeedData,
        clock: Arc<dyn Clock>,
        basis: AttendanceBasis,
    ) -> anyhow::Result<Self> {
        let students = Arc::new(MemoryStudentRepository::new());
        let promotions = Arc::new(MemoryPromotionRepository::new());
        let classes = Arc::new(MemoryClassRepository::new());
        let checkins = Arc::new(MemoryCheckinRepository::new());

        seed.load(&students, &*promotions, &classes, &*checkins)
            .await?;

        let ledger = PromotionLedger::new(students.clone(), promotions, clock.clone());
        let attendance =
            AttendanceService::new(students.clone(), classes, checkins, clock.clone(), basis);

        Ok(Self {
            ledger: Arc::new(ledger),
            attendance: Arc::new(attendance),
            students,
            clock,
        })
    }
}
