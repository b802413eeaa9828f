//! AI 対局者
//!
//! Wraps the synchronous [`Searcher`] in an async contract: the search runs
//! on a blocking worker against a copy of the position, bounded by a
//! wall-clock timeout, and the answer is held back until a minimum thinking
//! time has passed.

use crate::position::Position;
use crate::search::{SearchError, Searcher, random_move};
use crate::types::{Color, Decision};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// AIの難易度
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 初級
    #[default]
    Beginner,
    /// 中級
    Intermediate,
    /// 上級
    Advanced,
}

impl Difficulty {
    /// 探索深さ
    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Intermediate => 3,
            Difficulty::Advanced => 4,
        }
    }

    /// 最低思考時間
    pub const fn min_thinking_time(self) -> Duration {
        match self {
            Difficulty::Beginner => Duration::from_millis(1000),
            Difficulty::Intermediate => Duration::from_millis(2000),
            Difficulty::Advanced => Duration::from_millis(3000),
        }
    }

    /// 最善手の代わりにランダムな手を指す確率
    pub const fn random_move_rate(self) -> f64 {
        match self {
            Difficulty::Beginner => 0.1,
            Difficulty::Intermediate | Difficulty::Advanced => 0.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        })
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" | "easy" => Ok(Difficulty::Beginner),
            "intermediate" | "normal" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" => Ok(Difficulty::Advanced),
            other => Err(format!(
                "unknown difficulty '{other}' (expected beginner, intermediate or advanced)"
            )),
        }
    }
}

/// AI設定
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub difficulty: Difficulty,
    /// The human's side. The AI plays the other one.
    pub player_side: Color,
    /// Wall-clock limit for one search, in milliseconds.
    pub timeout_ms: u64,
    /// Overrides the per-difficulty minimum thinking time.
    pub min_thinking_ms: Option<u64>,
    /// Fixed RNG seed for reproducible play.
    pub seed: Option<u64>,
}

impl Default for AiSettings {
    fn default() -> Self {
        AiSettings {
            difficulty: Difficulty::default(),
            player_side: Color::Black,
            timeout_ms: 30_000,
            min_thinking_ms: None,
            seed: None,
        }
    }
}

impl AiSettings {
    pub fn ai_color(&self) -> Color {
        self.player_side.opponent()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn min_thinking_time(&self) -> Duration {
        self.min_thinking_ms
            .map_or_else(|| self.difficulty.min_thinking_time(), Duration::from_millis)
    }

    /// 設定どおりの探索器
    pub fn searcher(&self) -> Searcher {
        let searcher = Searcher::new(self.ai_color(), self.difficulty.depth())
            .with_random_move_rate(self.difficulty.random_move_rate());
        match self.seed {
            Some(seed) => searcher.with_seed(seed),
            None => searcher,
        }
    }

    fn fallback_rng(&self) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(self.seed.unwrap_or_else(rand::random))
    }
}

/// One pending `start_thinking` request.
#[derive(Clone)]
struct ThinkJob {
    /// Cleared by `stop_thinking` or by delivery, whichever comes first.
    active: Arc<AtomicBool>,
    /// Raised to make an abandoned search unwind.
    stop: Arc<AtomicBool>,
}

impl ThinkJob {
    fn new() -> Self {
        ThinkJob {
            active: Arc::new(AtomicBool::new(true)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// AI 対局者
#[derive(Default)]
pub struct AiPlayer {
    settings: Mutex<AiSettings>,
    job: Arc<Mutex<Option<ThinkJob>>>,
}

impl AiPlayer {
    pub fn new(settings: AiSettings) -> Self {
        AiPlayer {
            settings: Mutex::new(settings),
            job: Arc::new(Mutex::new(None)),
        }
    }

    pub fn settings(&self) -> AiSettings {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn ai_color(&self) -> Color {
        self.settings().ai_color()
    }

    /// 難易度と人間側の手番を更新する
    pub fn update_settings(&self, difficulty: Difficulty, player_side: Color) {
        let mut settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        settings.difficulty = difficulty;
        settings.player_side = player_side;
        log::info!(
            "AI settings: difficulty={difficulty} depth={} player={player_side} ai={}",
            difficulty.depth(),
            settings.ai_color()
        );
    }

    pub fn is_thinking(&self) -> bool {
        self.job
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|job| job.active.load(Ordering::SeqCst))
    }

    /// 思考を開始する
    ///
    /// `on_decision` is called once with the AI's move or resignation, unless
    /// [`AiPlayer::stop_thinking`] runs first. Returns `None` without doing
    /// anything if a search is already pending or no tokio runtime is
    /// available.
    pub fn start_thinking<F>(&self, pos: &Position, on_decision: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Decision) + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("start_thinking needs a tokio runtime: {e}");
                return None;
            }
        };

        let job = {
            let mut slot = self.job.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.as_ref().is_some_and(|j| j.active.load(Ordering::SeqCst)) {
                log::debug!("already thinking, request ignored");
                return None;
            }
            let job = ThinkJob::new();
            *slot = Some(job.clone());
            job
        };

        let settings = self.settings();
        let pos = pos.clone();
        let slot = Arc::clone(&self.job);

        Some(runtime.spawn(async move {
            let decision = run_search(&settings, &pos, Arc::clone(&job.stop)).await;

            let delivered = job.active.swap(false, Ordering::SeqCst);
            {
                let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.as_ref().is_some_and(|j| Arc::ptr_eq(&j.active, &job.active)) {
                    *slot = None;
                }
            }

            match decision {
                Some(decision) if delivered => on_decision(decision),
                Some(decision) => log::debug!("thinking was stopped, discarding {decision}"),
                None => log::debug!("thinking was stopped before a decision"),
            }
        }))
    }

    /// 思考を中止する（結果は捨てられ、コールバックは呼ばれない）
    pub fn stop_thinking(&self) {
        if let Some(job) = self.job.lock().unwrap_or_else(PoisonError::into_inner).take() {
            job.cancel();
            log::debug!("thinking stopped");
        }
    }

    /// Search `pos` for the AI side and return the decision.
    pub async fn think(&self, pos: &Position) -> Decision {
        let settings = self.settings();
        // この stop フラグは誰も立てない
        let stop = Arc::new(AtomicBool::new(false));
        run_search(&settings, pos, stop)
            .await
            .unwrap_or(Decision::Resign)
    }
}

/// One full think: search with timeout, fallback, minimum latency.
///
/// `None` only when `stop` was raised by the caller before the search finished.
async fn run_search(
    settings: &AiSettings,
    pos: &Position,
    stop: Arc<AtomicBool>,
) -> Option<Decision> {
    let started = Instant::now();
    tokio::task::yield_now().await;

    let ai = settings.ai_color();
    let mut searcher = settings.searcher().with_stop_flag(Arc::clone(&stop));
    let mut work = pos.clone();
    let task = tokio::task::spawn_blocking(move || searcher.search(&mut work, true));

    let decision = match tokio::time::timeout(settings.timeout(), task).await {
        Ok(Ok(Ok(result))) => result.decision.unwrap_or(Decision::Resign),
        Ok(Ok(Err(SearchError::Stopped))) => {
            log::debug!("search stopped before completion");
            return None;
        }
        Ok(Ok(Err(e))) => {
            log::error!("search failed: {e}");
            random_move(pos, ai, &mut settings.fallback_rng())
        }
        Ok(Err(e)) => {
            log::error!("search task failed: {e}");
            random_move(pos, ai, &mut settings.fallback_rng())
        }
        Err(_) => {
            stop.store(true, Ordering::SeqCst);
            let fallback = random_move(pos, ai, &mut settings.fallback_rng());
            log::warn!(
                "search timed out after {:?}, playing {fallback} instead",
                settings.timeout()
            );
            fallback
        }
    };

    tokio::time::sleep_until(started + settings.min_thinking_time()).await;
    Some(decision)
}
