//! Run Debate use case
//!
//! Walks the fixed node graph `Scientist ⇄ Philosopher → … → Judge`,
//! threading a [`DebateState`] that only this use case mutates:
//!
//! ```text
//! Init → Turn(start) → Turn(other) → … → Judging → Done
//!                 \__________ failure __________/→ Aborted
//! ```
//!
//! Every node invocation is retried up to `retry_limit` extra times. When
//! retries run out the session aborts; turns recorded so far are kept and
//! exported with the outcome.

mod judge;
mod persona;
mod types;

pub use judge::{JUDGE_LABEL, JudgeNode};
pub use persona::PersonaNode;
pub use types::{DebateOutcome, RunDebateError, RunDebateInput};

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::debate_exporter::{DebateExporter, NoExport};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{Generator, NodeError, check_cancelled};
use debate_domain::{
    DebateConfig, DebatePhase, DebateState, DomainError, GraphDescription, Persona, ScoreCard,
    Topic, Turn, Verdict, VerdictRecord, transcript_records,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for running one debate session
pub struct RunDebateUseCase<G: LlmGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    exporter: Arc<dyn DebateExporter>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: ExecutionParams,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + ?Sized + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            exporter: Arc::new(NoExport),
            conversation_logger: Arc::new(NoConversationLogger),
            params: ExecutionParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_exporter(mut self, exporter: Arc<dyn DebateExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateOutcome, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Returns `Err` only for invalid input, before any node runs. Failures
    /// during the debate are reported inside the [`DebateOutcome`].
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateOutcome, RunDebateError> {
        let config = input.config;
        config.validate()?;
        let topic = Topic::new(input.topic)?;

        let mut state = DebateState::new(topic, &config);
        info!(
            "Starting debate on '{}' ({} turns, {} opens, retry limit {})",
            state.topic(),
            config.max_turns,
            config.starting_persona,
            config.retry_limit
        );
        progress.on_debate_start(state.topic().content(), config.max_turns);
        self.conversation_logger.log(ConversationEvent::new(
            "debate_started",
            serde_json::json!({
                "topic": state.topic().content(),
                "max_turns": config.max_turns,
                "starting_persona": config.starting_persona,
                "retry_limit": config.retry_limit,
                "model": self.gateway.model_name(),
            }),
        ));

        let error = self.run_to_completion(&mut state, &config, progress).await;

        let phase = match &error {
            None => DebatePhase::Done,
            Some(e) => {
                warn!("Debate aborted after {} turn(s): {}", state.turns().len(), e);
                self.conversation_logger.log(ConversationEvent::new(
                    "debate_aborted",
                    serde_json::json!({
                        "error": e.to_string(),
                        "turns_recorded": state.turns().len(),
                    }),
                ));
                DebatePhase::Aborted
            }
        };

        let scores = ScoreCard::compute(state.turns());
        let export_errors = self.export(&state, &scores);
        progress.on_debate_end(phase, state.verdict());

        Ok(DebateOutcome {
            state,
            phase,
            error,
            scores,
            export_errors,
        })
    }

    /// Drive the state machine until `Done` or the first unrecoverable error
    async fn run_to_completion(
        &self,
        state: &mut DebateState,
        config: &DebateConfig,
        progress: &dyn ProgressNotifier,
    ) -> Option<RunDebateError> {
        let generator = Generator::new(
            self.gateway.as_ref(),
            self.params.call_timeout,
            self.cancellation_token.as_ref(),
            self.conversation_logger.as_ref(),
        );
        let persona_node =
            PersonaNode::new(self.params.persona_options.clone(), config.argument_style);
        let judge_node = JudgeNode::new(self.params.judge_options.clone());

        loop {
            match state.phase() {
                DebatePhase::Turn(persona) => {
                    let turn = match self
                        .persona_turn(&generator, &persona_node, state, persona, config, progress)
                        .await
                    {
                        Ok(turn) => turn,
                        Err(e) => return Some(e),
                    };
                    if let Err(e) = state.record_turn(turn.clone()) {
                        return Some(e.into());
                    }
                    info!(
                        "Turn {} recorded for {} ({} remaining)",
                        turn.index,
                        turn.speaker,
                        state.turns_remaining()
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "turn_recorded",
                        serde_json::json!({
                            "index": turn.index,
                            "round": turn.round(),
                            "speaker": turn.speaker,
                            "text": turn.text,
                        }),
                    ));
                    progress.on_turn_complete(&turn);
                }
                DebatePhase::Judging => {
                    info!("Judging {} turn(s)", state.turns().len());
                    progress.on_judging_start();
                    let verdict = match self
                        .judgment(&generator, &judge_node, state, config, progress)
                        .await
                    {
                        Ok(verdict) => verdict,
                        Err(e) => return Some(e),
                    };
                    info!("Verdict: {} wins", verdict.winner);
                    self.conversation_logger.log(ConversationEvent::new(
                        "verdict",
                        serde_json::json!({
                            "winner": verdict.winner,
                            "justification": verdict.justification,
                        }),
                    ));
                    if let Err(e) = state.record_verdict(verdict) {
                        return Some(e.into());
                    }
                }
                // state.phase() only yields Turn, Judging or Done
                DebatePhase::Done | DebatePhase::Init | DebatePhase::Aborted => return None,
            }
        }
    }

    async fn persona_turn(
        &self,
        generator: &Generator<'_, G>,
        node: &PersonaNode,
        state: &DebateState,
        persona: Persona,
        config: &DebateConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<Turn, RunDebateError> {
        let index = state.next_index();
        debug!("Invoking {} for turn {}", persona, index);
        progress.on_turn_start(persona, index);

        let topic = state.topic();
        let turns = state.turns();
        // Speaker order is enforced by DebateState::record_turn
        self.with_retries(persona.as_str(), config.max_attempts(), progress, || {
            node.act(generator, topic, turns, persona)
        })
        .await
        .map_err(|(attempts, error)| match error {
            NodeError::Cancelled => RunDebateError::Cancelled,
            other => RunDebateError::GenerationFailure {
                node: persona.as_str().to_string(),
                attempts,
                reason: other.to_string(),
            },
        })
    }

    async fn judgment(
        &self,
        generator: &Generator<'_, G>,
        node: &JudgeNode,
        state: &DebateState,
        config: &DebateConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<Verdict, RunDebateError> {
        let topic = state.topic();
        let turns = state.turns();
        self.with_retries(JUDGE_LABEL, config.max_attempts(), progress, || {
            node.judge(generator, topic, turns)
        })
        .await
        .map_err(|(attempts, error)| match error {
            NodeError::Cancelled => RunDebateError::Cancelled,
            NodeError::Judgment(DomainError::JudgmentParseFailure(reason)) => {
                RunDebateError::JudgmentParseFailure { attempts, reason }
            }
            other => RunDebateError::GenerationFailure {
                node: JUDGE_LABEL.to_string(),
                attempts,
                reason: other.to_string(),
            },
        })
    }

    /// Run `attempt` up to `max_attempts` times.
    ///
    /// On exhaustion returns the number of attempts made and the last error.
    /// Cancellation stops immediately.
    async fn with_retries<T, F, Fut>(
        &self,
        node: &str,
        max_attempts: usize,
        progress: &dyn ProgressNotifier,
        mut attempt: F,
    ) -> Result<T, (usize, NodeError)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, NodeError>>,
    {
        let mut last_error = NodeError::EmptyOutput;

        for n in 1..=max_attempts {
            check_cancelled(self.cancellation_token.as_ref()).map_err(|e| (n - 1, e))?;

            match attempt().await {
                Ok(value) => return Ok(value),
                Err(NodeError::Cancelled) => return Err((n, NodeError::Cancelled)),
                Err(e) => {
                    warn!("{} attempt {}/{} failed: {}", node, n, max_attempts, e);
                    self.conversation_logger.log(ConversationEvent::new(
                        "node_retry",
                        serde_json::json!({
                            "node": node,
                            "attempt": n,
                            "max_attempts": max_attempts,
                            "error": e.to_string(),
                        }),
                    ));
                    if n < max_attempts {
                        progress.on_retry(node, n, &e.to_string());
                    }
                    last_error = e;
                }
            }
        }

        Err((max_attempts, last_error))
    }

    /// Export transcript, verdict and graphs; returns the failures
    fn export(&self, state: &DebateState, scores: &ScoreCard) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = self
            .exporter
            .export_transcript(&transcript_records(state.turns()))
        {
            errors.push(format!("transcript: {}", e));
        }

        if let Some(verdict) = state.verdict() {
            let record = VerdictRecord::new(state.topic().content(), verdict, scores.clone());
            if let Err(e) = self.exporter.export_verdict(&record) {
                errors.push(format!("verdict: {}", e));
            }
        }

        if let Err(e) = self.exporter.export_graph(&GraphDescription::debate_flow()) {
            errors.push(format!("graph: {}", e));
        }

        if let Err(e) = self.exporter.export_timeline(state.turns()) {
            errors.push(format!("timeline: {}", e));
        }

        for error in &errors {
            warn!("Export failed: {}", error);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::debate_exporter::MemoryExporter;
    use crate::ports::llm_gateway::{GatewayError, GenerationRequest};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Replays a fixed sequence of generator results, one per call
    struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        labels: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                labels: Mutex::new(Vec::new()),
            }
        }

        fn ok(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        fn labels(&self) -> Vec<String> {
            self.labels.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.labels.lock().unwrap().push(request.label.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    struct HangingGateway;

    #[async_trait]
    impl LlmGateway for HangingGateway {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("never".to_string())
        }
    }

    const TOPIC: &str = "Should AI be regulated like medicine?";
    const VERDICT: &str = "WINNER: Scientist\nJUSTIFICATION: Grounded every claim in trial data.";

    fn four_turn_script() -> Vec<&'static str> {
        vec![
            "Clinical trials catch harms before release.",
            "Medicine regulates bodies; AI shapes minds.",
            "Audits can measure model failure rates.",
            "Measurement presumes we agree on the harm.",
            VERDICT,
        ]
    }

    fn config(max_turns: usize, start: Persona, retry_limit: usize) -> DebateConfig {
        DebateConfig::default()
            .with_max_turns(max_turns)
            .with_starting_persona(start)
            .with_retry_limit(retry_limit)
    }

    fn speakers(outcome: &DebateOutcome) -> Vec<Persona> {
        outcome.turns().iter().map(|t| t.speaker).collect()
    }

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_four_turn_debate_scenario() {
        let gateway = Arc::new(ScriptedGateway::ok(&four_turn_script()));
        let exporter = Arc::new(MemoryExporter::new());
        let use_case = RunDebateUseCase::new(gateway.clone()).with_exporter(exporter.clone());

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(4, Persona::Scientist, 1)))
            .await
            .unwrap();

        assert!(outcome.is_complete());
        assert!(outcome.error.is_none());
        assert_eq!(
            speakers(&outcome),
            vec![
                Persona::Scientist,
                Persona::Philosopher,
                Persona::Scientist,
                Persona::Philosopher
            ]
        );
        let indices: Vec<usize> = outcome.turns().iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let judge_calls = gateway.labels().iter().filter(|l| *l == JUDGE_LABEL).count();
        assert_eq!(judge_calls, 1);

        let verdict = outcome.verdict().unwrap();
        assert!(Persona::ALL.contains(&verdict.winner));
        assert_eq!(verdict.winner, Persona::Scientist);
        assert_eq!(outcome.state.turns_remaining(), 0);

        assert_eq!(exporter.transcript().unwrap().len(), 4);
        assert_eq!(exporter.verdict().unwrap().winner, Persona::Scientist);
        assert_eq!(exporter.graph().unwrap(), GraphDescription::debate_flow());
        assert!(outcome.export_errors.is_empty());
    }

    #[tokio::test]
    async fn test_alternation_from_philosopher() {
        let gateway = Arc::new(ScriptedGateway::ok(&[
            "p0", "s1", "p2", "s3", "p4", "s5", VERDICT,
        ]));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(6, Persona::Philosopher, 0)))
            .await
            .unwrap();

        assert_eq!(outcome.turns().len(), 6);
        for (i, turn) in outcome.turns().iter().enumerate() {
            let expected = if i % 2 == 0 {
                Persona::Philosopher
            } else {
                Persona::Scientist
            };
            assert_eq!(turn.speaker, expected);
        }
        assert_eq!(
            gateway.labels(),
            vec![
                "philosopher",
                "scientist",
                "philosopher",
                "scientist",
                "philosopher",
                "scientist",
                "judge"
            ]
        );
    }

    #[tokio::test]
    async fn test_two_turns_go_straight_to_judgment() {
        let gateway = Arc::new(ScriptedGateway::ok(&["s0", "p1", VERDICT]));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(2, Persona::Scientist, 0)))
            .await
            .unwrap();

        assert!(outcome.is_complete());
        assert_eq!(
            speakers(&outcome),
            vec![Persona::Scientist, Persona::Philosopher]
        );
        assert_eq!(gateway.labels(), vec!["scientist", "philosopher", "judge"]);
    }

    #[tokio::test]
    async fn test_replay_is_deterministic() {
        let run = || async {
            let gateway = Arc::new(ScriptedGateway::ok(&four_turn_script()));
            RunDebateUseCase::new(gateway)
                .execute(RunDebateInput::new(TOPIC, config(4, Persona::Scientist, 1)))
                .await
                .unwrap()
        };

        let first = run().await;
        let second = run().await;
        assert_eq!(first.turns(), second.turns());
        assert_eq!(first.verdict(), second.verdict());
        assert_eq!(first.state, second.state);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_single_failure() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok("s0".to_string()),
            Err(GatewayError::ConnectionError("reset".to_string())),
            Ok("p1".to_string()),
            Ok(VERDICT.to_string()),
        ]));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(2, Persona::Scientist, 1)))
            .await
            .unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.turns()[1].text, "p1");
        assert_eq!(
            gateway.labels(),
            vec!["scientist", "philosopher", "philosopher", "judge"]
        );
    }

    #[tokio::test]
    async fn test_blank_output_counts_as_failed_attempt() {
        let gateway = Arc::new(ScriptedGateway::ok(&["   ", "s0", "p1", VERDICT]));
        let use_case = RunDebateUseCase::new(gateway);

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(2, Persona::Scientist, 1)))
            .await
            .unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.turns()[0].text, "s0");
    }

    #[tokio::test]
    async fn test_exhausted_retries_abort_and_keep_partial_transcript() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Ok("Clinical trials catch harms before release.".to_string()),
            Err(GatewayError::RequestFailed("503".to_string())),
            Err(GatewayError::RequestFailed("503".to_string())),
            Ok("never used".to_string()),
        ]));
        let exporter = Arc::new(MemoryExporter::new());
        let use_case = RunDebateUseCase::new(gateway.clone()).with_exporter(exporter.clone());

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(4, Persona::Scientist, 1)))
            .await
            .unwrap();

        assert_eq!(outcome.phase, DebatePhase::Aborted);
        assert!(!outcome.is_complete());
        assert_eq!(
            outcome.error,
            Some(RunDebateError::GenerationFailure {
                node: "philosopher".to_string(),
                attempts: 2,
                reason: "Request failed: 503".to_string(),
            })
        );
        assert_eq!(outcome.turns().len(), 1);
        assert!(outcome.verdict().is_none());

        let exported = exporter.transcript().unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].speaker, Persona::Scientist);
        assert!(exporter.verdict().is_none());
        assert!(exporter.graph().is_some());
        assert_eq!(gateway.labels().len(), 3);
    }

    #[tokio::test]
    async fn test_unparseable_judgment_keeps_full_transcript() {
        let judge_text = "A spirited exchange; both made fair points.";
        let gateway = Arc::new(ScriptedGateway::ok(&[
            "s0", "p1", "s2", "p3", judge_text, judge_text,
        ]));
        let exporter = Arc::new(MemoryExporter::new());
        let use_case = RunDebateUseCase::new(gateway.clone()).with_exporter(exporter.clone());

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(4, Persona::Scientist, 1)))
            .await
            .unwrap();

        assert_eq!(outcome.phase, DebatePhase::Aborted);
        assert!(matches!(
            outcome.error,
            Some(RunDebateError::JudgmentParseFailure { attempts: 2, .. })
        ));
        assert!(outcome.verdict().is_none());
        assert_eq!(exporter.transcript().unwrap().len(), 4);
        assert!(exporter.verdict().is_none());
        let judge_calls = gateway.labels().iter().filter(|l| *l == JUDGE_LABEL).count();
        assert_eq!(judge_calls, 2);
    }

    #[tokio::test]
    async fn test_invalid_configuration_fails_before_any_node() {
        let gateway = Arc::new(ScriptedGateway::ok(&["unused"]));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let odd = use_case
            .execute(RunDebateInput::new(TOPIC, config(3, Persona::Scientist, 1)))
            .await;
        assert!(matches!(odd, Err(RunDebateError::InvalidConfiguration(_))));

        let empty = use_case
            .execute(RunDebateInput::new("   ", config(4, Persona::Scientist, 1)))
            .await;
        assert!(matches!(empty, Err(RunDebateError::InvalidConfiguration(_))));

        assert!(gateway.labels().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_failed_attempt() {
        let use_case = RunDebateUseCase::new(Arc::new(HangingGateway)).with_params(
            ExecutionParams::default().with_call_timeout(Some(Duration::from_secs(5))),
        );

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(2, Persona::Scientist, 1)))
            .await
            .unwrap();

        assert_eq!(
            outcome.error,
            Some(RunDebateError::GenerationFailure {
                node: "scientist".to_string(),
                attempts: 2,
                reason: "Timeout".to_string(),
            })
        );
        assert!(outcome.turns().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_session_is_aborted() {
        let token = CancellationToken::new();
        token.cancel();
        let gateway = Arc::new(ScriptedGateway::ok(&["s0"]));
        let use_case = RunDebateUseCase::new(gateway.clone()).with_cancellation(token);

        let outcome = use_case
            .execute(RunDebateInput::new(TOPIC, config(2, Persona::Scientist, 3)))
            .await
            .unwrap();

        assert_eq!(outcome.phase, DebatePhase::Aborted);
        assert_eq!(outcome.error, Some(RunDebateError::Cancelled));
        assert!(gateway.labels().is_empty());
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let gateway: Arc<dyn LlmGateway> = Arc::new(ScriptedGateway::ok(&["s0", "p1", VERDICT]));
        let outcome = RunDebateUseCase::new(gateway)
            .execute(RunDebateInput::new(TOPIC, config(2, Persona::Scientist, 0)))
            .await
            .unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.scores.per_turn.len(), 2);
    }
}
