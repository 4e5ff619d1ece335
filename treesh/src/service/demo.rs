//! In-memory [`DataService`] backed by the engines.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::{
    DataService, SwipeResponse,
    errors::ServiceResult,
    latency::SimulatedLatency,
    seed::demo_candidates,
};
use crate::{
    arcade::{
        ArcadeSession, ArcadeStats, BlockedUser, Candidate, DiscoveryFilters, MatchId, Report,
        ReportAck, SwipeAction, SwipeDecision,
    },
    chat::{ChatMessage, ChatSummary, ChatThread},
    clock::{Clock, SystemClock},
    config::EngineConfig,
    random::{RandomSource, StdRandom},
    settings::{self, SettingsUpdate, UserSettings},
};

struct DemoState {
    session: ArcadeSession,
    preferences: DiscoveryFilters,
    settings: UserSettings,
}

/// Demo backend: one user's session held behind a mutex.
///
/// Calls are serialized on the state lock, so concurrent calls wait for each
/// other. Scheduled chat replies are delivered lazily at the start of every
/// call once their due time has passed on the service clock.
pub struct DemoService {
    state: Mutex<DemoState>,
    latency: Mutex<SimulatedLatency>,
    clock: Arc<dyn Clock>,
}

impl DemoService {
    pub fn builder(config: EngineConfig) -> DemoServiceBuilder {
        DemoServiceBuilder::new(config)
    }

    /// Demo service with the bundled candidates, wall clock and OS-seeded randomness
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    async fn simulate_latency(&self) {
        let delay = self.latency.lock().await.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Wait out the simulated latency, then lock the state with due replies delivered
    async fn state(&self) -> MutexGuard<'_, DemoState> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let delivered = state.session.deliver_due_replies(self.clock.now());
        if delivered > 0 {
            log::debug!("Delivered {} chat replies", delivered);
        }
        state
    }

    async fn swipe(&self, candidate_id: &str, action: SwipeAction) -> ServiceResult<SwipeResponse> {
        let mut state = self.state().await;
        let outcome = state.session.decide(candidate_id, action, self.clock.now())?;
        Ok(SwipeResponse {
            matched: outcome.is_match(),
            match_id: outcome.matched,
        })
    }

    async fn unlocked<T>(
        &self,
        match_id: MatchId,
        pin: &str,
        op: impl FnOnce(&mut ArcadeSession) -> ServiceResult<T> + Send,
    ) -> ServiceResult<T> {
        let mut state = self.state().await;
        let now = self.clock.now();
        if let Err(err) = state.session.submit_pin(match_id, pin, now) {
            log::warn!("Chat {} access denied: {}", match_id, err);
            return Err(err.into());
        }
        op(&mut state.session)
    }
}

#[async_trait]
impl DataService for DemoService {
    async fn potential_matches(&self) -> ServiceResult<Vec<Candidate>> {
        let state = self.state().await;
        Ok(state
            .session
            .engine()
            .filtered_candidates(&state.preferences)?
            .into_iter()
            .cloned()
            .collect())
    }

    async fn preferences(&self) -> ServiceResult<DiscoveryFilters> {
        Ok(self.state().await.preferences.clone())
    }

    async fn update_preferences(
        &self,
        preferences: DiscoveryFilters,
    ) -> ServiceResult<DiscoveryFilters> {
        let mut state = self.state().await;
        preferences.validate()?;
        state.preferences = preferences;
        log::info!("Discovery preferences updated");
        Ok(state.preferences.clone())
    }

    async fn like(&self, candidate_id: &str) -> ServiceResult<SwipeResponse> {
        self.swipe(candidate_id, SwipeAction::Like).await
    }

    async fn super_like(&self, candidate_id: &str) -> ServiceResult<SwipeResponse> {
        self.swipe(candidate_id, SwipeAction::SuperLike).await
    }

    async fn dislike(&self, candidate_id: &str) -> ServiceResult<SwipeResponse> {
        self.swipe(candidate_id, SwipeAction::Dislike).await
    }

    async fn pass(&self, candidate_id: &str) -> ServiceResult<SwipeResponse> {
        self.swipe(candidate_id, SwipeAction::Pass).await
    }

    async fn interactions(&self) -> ServiceResult<Vec<SwipeDecision>> {
        Ok(self.state().await.session.engine().interactions().to_vec())
    }

    async fn stats(&self) -> ServiceResult<ArcadeStats> {
        Ok(self.state().await.session.stats())
    }

    async fn reset_swipe_history(&self) -> ServiceResult<()> {
        self.state().await.session.reset_swipe_history();
        Ok(())
    }

    async fn block_user(&self, candidate_id: &str) -> ServiceResult<()> {
        let mut state = self.state().await;
        state.session.block_user(candidate_id, self.clock.now())?;
        Ok(())
    }

    async fn unblock_user(&self, candidate_id: &str) -> ServiceResult<()> {
        self.state().await.session.unblock_user(candidate_id)?;
        Ok(())
    }

    async fn blocked_users(&self) -> ServiceResult<Vec<BlockedUser>> {
        Ok(self.state().await.session.engine().blocked().to_vec())
    }

    async fn report_user(&self, report: Report) -> ServiceResult<ReportAck> {
        let state = self.state().await;
        Ok(state.session.report_user(&report, self.clock.now())?)
    }

    async fn chats(&self) -> ServiceResult<Vec<ChatSummary>> {
        Ok(self.state().await.session.chats())
    }

    async fn chat(&self, match_id: MatchId, pin: &str) -> ServiceResult<ChatThread> {
        self.unlocked(match_id, pin, |session| Ok(session.thread(match_id)?.clone()))
            .await
    }

    async fn send_message(
        &self,
        match_id: MatchId,
        text: &str,
        pin: &str,
    ) -> ServiceResult<ChatMessage> {
        let now = self.clock.now();
        self.unlocked(match_id, pin, |session| {
            Ok(session.send_message(match_id, text, now)?)
        })
        .await
    }

    async fn mark_read(&self, match_id: MatchId, pin: &str) -> ServiceResult<()> {
        self.unlocked(match_id, pin, |session| Ok(session.mark_read(match_id)?))
            .await
    }

    async fn leave_chat(&self, match_id: MatchId, pin: &str) -> ServiceResult<()> {
        self.unlocked(match_id, pin, |session| Ok(session.leave_chat(match_id)?))
            .await
    }

    async fn pin_message(
        &self,
        match_id: MatchId,
        message_id: Uuid,
        pin: &str,
    ) -> ServiceResult<()> {
        self.unlocked(match_id, pin, |session| {
            Ok(session.pin_message(match_id, message_id)?)
        })
        .await
    }

    async fn chat_pin(&self, match_id: MatchId) -> ServiceResult<String> {
        let state = self.state().await;
        let chat_match = state.session.engine().find_match(match_id)?;
        Ok(chat_match.chat_pin.as_str().to_string())
    }

    async fn reset_chat_pin(&self, match_id: MatchId) -> ServiceResult<String> {
        Ok(self.state().await.session.reset_pin(match_id)?)
    }

    async fn settings(&self) -> ServiceResult<UserSettings> {
        Ok(self.state().await.settings.clone())
    }

    async fn update_settings(&self, update: SettingsUpdate) -> ServiceResult<UserSettings> {
        let mut state = self.state().await;
        state.settings = settings::apply(&state.settings, update)?;
        Ok(state.settings.clone())
    }

    async fn reset_settings(&self) -> ServiceResult<UserSettings> {
        let mut state = self.state().await;
        state.settings = UserSettings::default();
        log::info!("Settings reset to defaults");
        Ok(state.settings.clone())
    }

    async fn export_settings(&self) -> ServiceResult<String> {
        Ok(settings::export_json(&self.state().await.settings)?)
    }
}

/// Builder for [`DemoService`]
pub struct DemoServiceBuilder {
    config: EngineConfig,
    candidates: Vec<Candidate>,
    clock: Arc<dyn Clock>,
    match_rng: Option<Box<dyn RandomSource>>,
    latency_rng: Option<Box<dyn RandomSource>>,
    preferences: DiscoveryFilters,
    settings: UserSettings,
}

impl DemoServiceBuilder {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            candidates: demo_candidates(),
            clock: Arc::new(SystemClock),
            match_rng: None,
            latency_rng: None,
            preferences: DiscoveryFilters::default(),
            settings: UserSettings::default(),
        }
    }

    #[must_use]
    pub fn candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = candidates;
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Source for match draws and chat PINs
    #[must_use]
    pub fn match_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.match_rng = Some(rng);
        self
    }

    /// Source for simulated latency
    #[must_use]
    pub fn latency_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.latency_rng = Some(rng);
        self
    }

    #[must_use]
    pub fn preferences(mut self, preferences: DiscoveryFilters) -> Self {
        self.preferences = preferences;
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: UserSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> DemoService {
        let match_rng = self
            .match_rng
            .unwrap_or_else(|| Box::new(StdRandom::from_entropy()));
        let latency_rng = self
            .latency_rng
            .unwrap_or_else(|| Box::new(StdRandom::from_entropy()));

        let session = ArcadeSession::new(self.candidates, &self.config, match_rng);
        DemoService {
            state: Mutex::new(DemoState {
                session,
                preferences: self.preferences,
                settings: self.settings,
            }),
            latency: Mutex::new(SimulatedLatency::new(self.config.latency, latency_rng)),
            clock: self.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LatencyConfig, errors::ErrorKind, random::SequenceRandom};
    use tokio::time::{Duration, Instant};

    fn service(draws: Vec<f64>) -> DemoService {
        let config = EngineConfig {
            latency: LatencyConfig::none(),
            ..EngineConfig::default()
        };
        DemoService::builder(config)
            .match_rng(Box::new(SequenceRandom::new(draws)))
            .build()
    }

    #[tokio::test]
    async fn test_like_and_open_chat() {
        let service = service(vec![0.1]);

        let response = service.like("1").await.unwrap();
        assert!(response.matched);
        let match_id = response.match_id.unwrap();

        let pin = service.chat_pin(match_id).await.unwrap();
        let err = service.chat(match_id, "0000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);

        let thread = service.chat(match_id, &pin).await.unwrap();
        assert_eq!(thread.messages()[0].text, "You matched with Emma Wilson!");
        assert_eq!(service.potential_matches().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_candidate() {
        let service = service(vec![]);
        let err = service.pass("42").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let service = service(vec![]);
        let updated = service
            .update_settings(SettingsUpdate::App(settings::AppUpdate::Theme(
                settings::Theme::Dark,
            )))
            .await
            .unwrap();
        assert_eq!(updated.app.theme, settings::Theme::Dark);
        assert_eq!(service.settings().await.unwrap(), updated);

        let reset = service.reset_settings().await.unwrap();
        assert_eq!(reset, UserSettings::default());
        assert!(service.export_settings().await.unwrap().contains("\"theme\""));
    }

    #[tokio::test]
    async fn test_preferences_narrow_potential_matches() {
        let service = service(vec![]);
        assert_eq!(
            service.preferences().await.unwrap(),
            DiscoveryFilters::default()
        );
        assert_eq!(service.potential_matches().await.unwrap().len(), 5);

        let verified_nearby = DiscoveryFilters::default()
            .verified_only()
            .with_max_distance(5);
        service
            .update_preferences(verified_nearby.clone())
            .await
            .unwrap();

        let ids: Vec<_> = service
            .potential_matches()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(service.preferences().await.unwrap(), verified_nearby);

        let err = service
            .update_preferences(DiscoveryFilters::default().with_age_range(40, 20))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(service.preferences().await.unwrap(), verified_nearby);
    }

    #[tokio::test]
    async fn test_leave_chat_checks_pin() {
        let service = service(vec![0.1]);
        let match_id = service.like("1").await.unwrap().match_id.unwrap();
        let pin = service.chat_pin(match_id).await.unwrap();

        let err = service.leave_chat(match_id, "0000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(service.chats().await.unwrap().len(), 1);

        service.leave_chat(match_id, &pin).await.unwrap();
        assert!(service.chats().await.unwrap().is_empty());
        let err = service.chat(match_id, &pin).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_wait_for_latency() {
        let service = DemoService::builder(EngineConfig::default())
            .latency_rng(Box::new(SequenceRandom::new([])))
            .build();

        let started = Instant::now();
        service.stats().await.unwrap();
        // Sequence source yields the lowest delay first
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
