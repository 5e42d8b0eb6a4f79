//! Drives the removal countdown with tokio timers.

use anyhow::Result;
use placepicker_core::{
    countdown::Generation,
    entities::Id,
    gateways::clock::Clock,
    repositories::KeyValueStore,
    selection::SelectionStore,
};
use std::time::{Duration, Instant};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, sleep, MissedTickBehavior},
};

/// A clock that follows the tokio timer, including paused time in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// At most one deferred expiry notification at a time.
pub struct CountdownTimer {
    task: Option<JoinHandle<()>>,
    elapsed_tx: mpsc::UnboundedSender<Generation>,
    elapsed_rx: mpsc::UnboundedReceiver<Generation>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        let (elapsed_tx, elapsed_rx) = mpsc::unbounded_channel();
        Self {
            task: None,
            elapsed_tx,
            elapsed_rx,
        }
    }

    /// Schedules a notification for `generation` and cancels the previous one.
    pub fn start(&mut self, generation: Generation, duration: Duration) {
        self.cancel();
        let elapsed_tx = self.elapsed_tx.clone();
        log::debug!("Timer set");
        self.task = Some(tokio::spawn(async move {
            sleep(duration).await;
            // The receiver is gone if the dialog has been closed.
            let _ = elapsed_tx.send(generation);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            log::debug!("Cleaning up timer");
            task.abort();
        }
    }

    pub async fn elapsed(&mut self) -> Option<Generation> {
        self.elapsed_rx.recv().await
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Self::Yes),
            "n" | "no" => Some(Self::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Removed(Id),
    AutoRemoved(Id),
    Kept(Id),
}

/// Asks for confirmation of a removal.
///
/// The removal is confirmed automatically when the countdown elapses
/// before an answer arrives. A closed answer channel is treated as
/// "no answer".
pub async fn confirm_removal<S, C, F>(
    selection: &mut SelectionStore<'_, S, C>,
    id: &str,
    answers: &mut mpsc::Receiver<Answer>,
    progress_interval: Duration,
    mut on_progress: F,
) -> Result<Outcome>
where
    S: KeyValueStore,
    C: Clock,
    F: FnMut(Duration, f64),
{
    let mut timer = CountdownTimer::new();
    let generation = selection.request_removal(id);
    timer.start(generation, selection.countdown_duration());

    let mut progress = interval(progress_interval);
    progress.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut answers_closed = false;

    loop {
        tokio::select! {
            answer = answers.recv(), if !answers_closed => match answer {
                Some(Answer::Yes) => {
                    timer.cancel();
                    selection.confirm_removal()?;
                    return Ok(Outcome::Removed(id.into()));
                }
                Some(Answer::No) => {
                    timer.cancel();
                    selection.cancel_removal();
                    return Ok(Outcome::Kept(id.into()));
                }
                None => {
                    log::debug!("No more answers, waiting for the countdown");
                    answers_closed = true;
                }
            },
            Some(generation) = timer.elapsed() => {
                if let Some(removed) = selection.countdown_elapsed(generation)? {
                    return Ok(Outcome::AutoRemoved(removed));
                }
            }
            _ = progress.tick() => {
                if let (Some(remaining), Some(ratio)) =
                    (selection.remaining(), selection.remaining_ratio())
                {
                    on_progress(remaining, ratio);
                }
            }
        }
    }
}
