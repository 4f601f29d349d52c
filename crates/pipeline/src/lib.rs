//! Orchestration services over the persistence layer and the generative
//! clients.
//!
//! Every operation is a synchronous request/response chain: remote calls
//! are issued strictly sequentially, nothing runs in the background, and
//! no service retries. State lives in the database; the services here
//! hold only configuration and shared clients, constructed once at
//! process start.

pub mod character;
pub mod cleanup;
pub mod content;
pub mod error;
pub mod generate;
pub mod media;
pub mod seams;

pub use character::{CharacterService, NewCharacterInput};
pub use content::ContentService;
pub use error::PipelineError;
pub use generate::{GenerateService, PreparedVideo};
pub use media::{LegacyVideoOutcome, MediaService};
pub use seams::{MediaGenerator, PromptAuthor};
