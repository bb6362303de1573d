use serde::{Deserialize, Serialize};

/// Per-response token usage, raw from the provider.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Run-level accumulated totals (incremented per response).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct AccumulatedUsage {
    pub total_prompt_tokens: u64,
    pub total_completion_tokens: u64,
    pub responses: u32,
}

impl AccumulatedUsage {
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total_prompt_tokens += u64::from(usage.prompt_tokens);
        self.total_completion_tokens += u64::from(usage.completion_tokens);
        self.responses += 1;
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_prompt_tokens + self.total_completion_tokens
    }
}
