//! Owns a `TurnController` and re-invokes it from a timer thread.
//!
//! All controller access goes through one mutex, so loops requested by the
//! timer, by completion callbacks and by external callers are serialized.
//! The timer thread keeps a sorted set of wake-up deadlines fed through a
//! channel; each due deadline runs `run_loop` once and schedules the wait it
//! reports.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, warn};
use parking_lot::Mutex;

use crate::checkers_errors::{CheckersError, CheckersResult};
use crate::controller::turn_controller::TurnController;
use crate::game::game_model::{GameModel, ModelState};
use crate::game_state::checkers_types::Side;

/// Delay between a computation finishing and the loop that consumes it.
const CALLBACK_DELAY: Duration = Duration::from_millis(1);

struct RunnerShared {
    controller: Mutex<TurnController>,
}

pub struct GameRunner {
    shared: Arc<RunnerShared>,
    wake_tx: Sender<Instant>,
    end_rx: Receiver<ModelState>,
}

impl GameRunner {
    /// Takes ownership of `controller` and starts the timer thread. The game
    /// does not advance until `loop_now` or `loop_later` is called.
    pub fn new(mut controller: TurnController) -> CheckersResult<Self> {
        let (wake_tx, wake_rx) = unbounded::<Instant>();
        let (end_tx, end_rx) = unbounded::<ModelState>();

        let callback_tx = wake_tx.clone();
        controller.set_completion_callback(Arc::new(move || {
            let _ = callback_tx.send(Instant::now() + CALLBACK_DELAY);
        }));
        controller
            .model_mut()
            .add_state_listener(Box::new(move |state: ModelState| {
                if state.is_terminal() {
                    let _ = end_tx.send(state);
                }
            }));

        let shared = Arc::new(RunnerShared {
            controller: Mutex::new(controller),
        });
        let weak = Arc::downgrade(&shared);
        thread::Builder::new()
            .name("game-timer".to_owned())
            .spawn(move || timer_loop(weak, wake_rx))
            .map_err(CheckersError::Io)?;

        Ok(Self {
            shared,
            wake_tx,
            end_rx,
        })
    }

    /// Runs the controller loop as soon as possible on the timer thread.
    pub fn loop_now(&self) {
        self.loop_later(Duration::ZERO);
    }

    pub fn loop_later(&self, delay: Duration) {
        if self.wake_tx.send(Instant::now() + delay).is_err() {
            warn!("game timer thread has stopped");
        }
    }

    /// Cancels any computation and crashes a running game with `reason`.
    pub fn terminate(&self, reason: &str) {
        self.shared.controller.lock().terminate(reason);
    }

    pub fn set_turn_limit(&self, side: Side, limit: Option<Duration>) {
        self.shared.controller.lock().set_turn_limit(side, limit);
    }

    /// Reads the model under the controller lock.
    pub fn with_model<R>(&self, f: impl FnOnce(&GameModel) -> R) -> R {
        f(self.shared.controller.lock().model())
    }

    /// Blocks until the game is FINISHED or INVALID, or `timeout` passes.
    /// Returns the terminal state, or `None` on timeout.
    pub fn wait_for_end(&self, timeout: Duration) -> Option<ModelState> {
        let deadline = Instant::now() + timeout;
        let current = self.with_model(GameModel::state);
        if current.is_terminal() {
            return Some(current);
        }
        loop {
            match self.end_rx.recv_deadline(deadline) {
                Ok(state) if state.is_terminal() => return Some(state),
                Ok(_) => continue,
                Err(_) => {
                    let state = self.with_model(GameModel::state);
                    return state.is_terminal().then_some(state);
                }
            }
        }
    }
}

impl Drop for GameRunner {
    fn drop(&mut self) {
        self.terminate("game runner shut down");
    }
}

fn timer_loop(shared: Weak<RunnerShared>, wake_rx: Receiver<Instant>) {
    let mut pending: BinaryHeap<Reverse<Instant>> = BinaryHeap::new();
    loop {
        let received = match pending.peek() {
            Some(&Reverse(at)) => wake_rx.recv_deadline(at),
            None => wake_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(at) => pending.push(Reverse(at)),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let now = Instant::now();
        let mut due = false;
        while let Some(&Reverse(at)) = pending.peek() {
            if at > now {
                break;
            }
            pending.pop();
            due = true;
        }
        if !due {
            continue;
        }

        let Some(shared) = shared.upgrade() else {
            break;
        };
        let next = shared.controller.lock().run_loop();
        if let Some(delay) = next {
            pending.push(Reverse(Instant::now() + delay));
        }
    }
    debug!("game timer thread exiting");
}
