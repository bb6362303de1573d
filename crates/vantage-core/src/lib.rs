pub mod camera;
pub mod collider;
pub mod errors;
pub mod ids;
pub mod messages;
pub mod provider;
pub mod scene;
pub mod tokens;

pub use camera::{Camera, Ray, ViewportPoint};
pub use collider::Collider;
pub use errors::ProviderError;
pub use messages::{ChatMessage, Role};
pub use provider::{ChatProvider, Completion};
pub use scene::{NodeId, SceneGraph, SceneNode};
pub use tokens::{AccumulatedUsage, TokenUsage};
