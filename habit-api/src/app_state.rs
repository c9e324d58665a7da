use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::{
        memory::{InMemoryChallengeRepository, InMemoryHabitRepository},
        postgres::{PostgresChallengeAdapter, PostgresHabitAdapter},
    },
    domain::{
        ports::{
            inbound::{ChallengeService, HabitService},
            outbound::{ChallengeRepository, Clock, HabitRepository, SystemClock},
        },
        services::{ChallengeServiceImpl, HabitServiceImpl},
    },
    repositories::{ChallengeRecordRepositoryImpl, HabitRecordRepositoryImpl},
};

#[derive(Clone)]
pub struct AppState {
    pub habit_service: Arc<dyn HabitService>,
    pub challenge_service: Arc<dyn ChallengeService>,
}

impl AppState {
    pub fn new<H, C, K>(habits: Arc<H>, challenges: Arc<C>, clock: Arc<K>) -> Self
    where
        H: HabitRepository,
        C: ChallengeRepository,
        K: Clock,
    {
        let habit_service: Arc<dyn HabitService> =
            Arc::new(HabitServiceImpl::with_clock(habits, clock.clone()));
        let challenge_service = Arc::new(ChallengeServiceImpl::new(
            challenges,
            habit_service.clone(),
            clock,
        ));

        Self {
            habit_service,
            challenge_service,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryHabitRepository::new()),
            Arc::new(InMemoryChallengeRepository::new()),
            Arc::new(SystemClock),
        )
    }

    pub fn postgres(pool: PgPool) -> Self {
        let habits = PostgresHabitAdapter::new(Arc::new(HabitRecordRepositoryImpl::new(pool.clone())));
        let challenges =
            PostgresChallengeAdapter::new(Arc::new(ChallengeRecordRepositoryImpl::new(pool)));

        Self::new(Arc::new(habits), Arc::new(challenges), Arc::new(SystemClock))
    }
}
