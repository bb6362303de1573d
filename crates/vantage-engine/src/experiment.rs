use std::time::Duration;

/// States of the repetition loop. One request is ever in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    InFlight,
    Finished,
}

/// What the driver should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopAction {
    StartRequest,
    Wait,
    Finish,
}

/// One experiment result: chosen option, reasoning, elapsed wall-clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub option: String,
    pub reasoning: String,
    pub seconds: f32,
}

impl ResultRow {
    /// Split the response text at the first colon into an option prefix and
    /// a reasoning suffix; non-digit characters are stripped from the
    /// prefix. A colon-free response keeps its full text as reasoning.
    pub fn from_response(text: &str, elapsed: Duration) -> Self {
        let (option, reasoning) = match text.split_once(':') {
            Some((prefix, suffix)) => (
                prefix.chars().filter(|c| c.is_ascii_digit()).collect(),
                suffix.to_string(),
            ),
            None => (String::new(), text.to_string()),
        };
        Self {
            option,
            reasoning,
            seconds: elapsed.as_secs_f32(),
        }
    }
}

/// Explicit state machine for the experiment: repeats the scene analysis
/// until the repetition count is met, advancing on request-completed events
/// rather than per-frame polling. No concurrency, no cancellation, no retry.
#[derive(Debug)]
pub struct ExperimentLoop {
    repetitions: u32,
    completed: u32,
    state: LoopState,
    rows: Vec<ResultRow>,
}

impl ExperimentLoop {
    pub fn new(repetitions: u32) -> Self {
        Self {
            repetitions,
            completed: 0,
            state: LoopState::Idle,
            rows: Vec::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Poll the machine. From Idle this either starts the next repetition or
    /// finishes the experiment; while a request is in flight it is a no-op.
    pub fn next_action(&mut self) -> LoopAction {
        match self.state {
            LoopState::Idle if self.completed < self.repetitions => {
                self.state = LoopState::InFlight;
                LoopAction::StartRequest
            }
            LoopState::Idle => {
                self.state = LoopState::Finished;
                LoopAction::Finish
            }
            LoopState::InFlight => LoopAction::Wait,
            LoopState::Finished => LoopAction::Finish,
        }
    }

    /// Request-completed event: record a row and return to Idle.
    pub fn on_request_completed(&mut self, response_text: &str, elapsed: Duration) {
        debug_assert_eq!(self.state, LoopState::InFlight);
        self.rows.push(ResultRow::from_response(response_text, elapsed));
        self.finish_repetition();
    }

    /// Transport failure: the error text becomes the row's reasoning and the
    /// loop still advances.
    pub fn on_request_failed(&mut self, error: &str, elapsed: Duration) {
        debug_assert_eq!(self.state, LoopState::InFlight);
        self.rows.push(ResultRow {
            option: String::new(),
            reasoning: error.to_string(),
            seconds: elapsed.as_secs_f32(),
        });
        self.finish_repetition();
    }

    fn finish_repetition(&mut self) {
        self.completed += 1;
        self.state = LoopState::Idle;
    }

    /// Drain buffered rows for the single end-of-run flush.
    pub fn take_rows(&mut self) -> Vec<ResultRow> {
        std::mem::take(&mut self.rows)
    }
}
