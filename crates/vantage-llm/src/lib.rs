pub mod credentials;
pub mod provider;
pub mod wire;

pub mod mock;

pub use credentials::ApiKey;
pub use mock::{MockProvider, MockResponse};
pub use provider::OpenAiProvider;
