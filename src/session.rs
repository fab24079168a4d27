//! Single-threaded event loop
//!
//! The platform merges ticks and input into one ordered stream; a `Session`
//! queues that stream and folds it through the reducer one message at a time,
//! emitting a snapshot per accepted message.

use std::collections::VecDeque;

use crate::error::ConfigError;
use crate::settings::GameConfig;
use crate::sim::{GameState, Message, Reducer};
use crate::snapshot::Snapshot;

/// Owns the current state and the pending message queue
#[derive(Debug, Clone)]
pub struct Session {
    reducer: Reducer,
    state: GameState,
    queue: VecDeque<Message>,
}

impl Session {
    /// Start a game for `config`, seeded with `seed`
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Ok(Self::from_reducer(Reducer::new(config, seed)?))
    }

    pub fn from_reducer(reducer: Reducer) -> Self {
        Self {
            state: reducer.initial_state(),
            reducer,
            queue: VecDeque::new(),
        }
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Most recent state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// Queue a message behind everything already pending
    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Messages waiting to be applied
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply the oldest pending message
    pub fn step(&mut self) -> Option<Snapshot> {
        let message = self.queue.pop_front()?;
        Some(self.apply(&message))
    }

    /// Apply every pending message in arrival order
    pub fn drain(&mut self) -> Vec<Snapshot> {
        std::iter::from_fn(|| self.step()).collect()
    }

    /// Queue `messages` and apply them, handing each snapshot to `subscriber`
    pub fn run<I, F>(&mut self, messages: I, mut subscriber: F)
    where
        I: IntoIterator<Item = Message>,
        F: FnMut(&Snapshot),
    {
        self.queue.extend(messages);
        while let Some(snapshot) = self.step() {
            subscriber(&snapshot);
        }
    }

    fn apply(&mut self, message: &Message) -> Snapshot {
        self.state = self.reducer.reduce(&self.state, message);
        Snapshot::from(&self.state)
    }
}

/// Every state produced by folding `messages` over the initial state
pub fn replay(reducer: &Reducer, messages: &[Message]) -> Vec<GameState> {
    messages
        .iter()
        .scan(reducer.initial_state(), |state, message| {
            *state = reducer.reduce(state, message);
            Some(state.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Movement, PlayState};

    #[test]
    fn test_messages_applied_in_order() {
        let mut session = Session::new(GameConfig::pong(), 77).unwrap();
        session.push(Message::Pause);
        session.push(Message::Tick { elapsed: 1 });
        session.push(Message::Pause);
        session.push(Message::Tick { elapsed: 2 });
        assert_eq!(session.pending(), 4);

        let snapshots = session.drain();
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0].play_state, PlayState::Pause);
        // Tick while paused left the clock alone
        assert_eq!(snapshots[1].time, 0);
        assert_eq!(snapshots[2].play_state, PlayState::Play);
        assert_eq!(snapshots[3].time, 2);
        assert_eq!(session.pending(), 0);
        assert!(session.step().is_none());
    }

    #[test]
    fn test_run_feeds_subscriber() {
        let mut session = Session::new(GameConfig::breakout(), 77).unwrap();
        let mut times = Vec::new();
        session.run(
            [
                Message::Move(Movement::Start(Direction::Left)),
                Message::Tick { elapsed: 1 },
                Message::Tick { elapsed: 2 },
            ],
            |snapshot| times.push(snapshot.time),
        );
        assert_eq!(times, vec![0, 1, 2]);
        assert_eq!(session.snapshot().paddles[0].x, 240);
    }

    #[test]
    fn test_replay_matches_session() {
        let reducer = Reducer::new(GameConfig::pong(), 5).unwrap();
        let messages: Vec<Message> = (1..=200).map(|t| Message::Tick { elapsed: t }).collect();
        let states = replay(&reducer, &messages);
        assert_eq!(states.len(), 200);

        let mut session = Session::from_reducer(reducer);
        session.run(messages, |_| {});
        assert_eq!(session.state(), states.last().unwrap());
    }
}
